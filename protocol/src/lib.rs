// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # PIX Protocol: Payload Library
//!
//! Builds and reads PIX "copy and paste" payloads: the text behind every
//! PIX QR code. A payload is a flat run of EMV tag-length-value fields
//! closed by a CRC16, and it has exactly one job: get a payer's bank app to
//! pre-fill a transfer to the right key, with the right name, city and
//! (optionally) amount.
//!
//! ## Modules
//!
//! - **config**: Tags, fixed values, limits. Every magic string lives here.
//! - **emv**: Tag-length-value fields and the CRC16/CCITT checksum.
//! - **payload**: Payment targets, the encoder, the decoder.
//! - **key**: Recipient-key categories and their validation rules.
//! - **amount**: Centavo amounts and their text forms.
//! - **profile**: Resolving PIX settings from stored profile rows.
//! - **share**: Chat share text and links.
//! - **error**: The umbrella error for the validated encode path.
//!
//! ## Ground rules
//!
//! 1. Everything here is pure. Nothing reads files, clocks or randomness.
//! 2. The encoder never guesses. Validation happens before it, in one place.
//! 3. Output is checked against fixed vectors, not just against itself.

pub mod amount;
pub mod config;
pub mod emv;
pub mod error;
pub mod key;
pub mod payload;
pub mod profile;
pub mod share;

pub use amount::Amount;
pub use error::PixError;
pub use key::PixKeyType;
pub use payload::{build_final_payload, decode_payload, encode, AmountPolicy, PaymentTarget};
