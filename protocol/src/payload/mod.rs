//! # PIX Payloads
//!
//! Turns a [`PaymentTarget`] into the "copy and paste" string that goes into
//! a QR code, and reads such strings back.
//!
//! - **target**: the input record and its validation.
//! - **builder**: field assembly and the CRC trailer.
//! - **decoder**: checksum verification and field extraction.
//!
//! ```
//! use pix_protocol::amount::Amount;
//! use pix_protocol::key::PixKeyType;
//! use pix_protocol::payload::{decode_payload, encode, AmountPolicy, PaymentTarget};
//!
//! let target = PaymentTarget::new("123.456.789-01", PixKeyType::Cpf, "JOHN DOE", "SAO PAULO")
//!     .with_amount(Some(Amount::from_centavos(1050)));
//! let payload = encode(&target, AmountPolicy::Open).unwrap();
//! assert!(payload.contains("540510.50"));
//!
//! let decoded = decode_payload(&payload).unwrap();
//! assert_eq!(decoded.recipient_key, "12345678901");
//! ```

pub mod builder;
pub mod decoder;
pub mod target;

pub use builder::{build_final_payload, build_payload, encode, merchant_account_info};
pub use decoder::{decode_payload, split_checksum, verify_checksum, DecodedPayload};
pub use target::{AmountPolicy, PaymentTarget};
