//! # EMV Primitives
//!
//! The two building blocks under every PIX payload: tag-length-value
//! fields and the CRC16 trailer.
//!
//! - **tlv**: field encoding and splitting.
//! - **crc**: CRC16/CCITT-FALSE and the four-digit hex checksum.
//! - **error**: [`EmvError`], shared by both.

pub mod crc;
pub mod error;
pub mod tlv;

pub use crc::{checksum16, crc16_ccitt};
pub use error::EmvError;
pub use tlv::{encode_field, parse_fields, push_field, Field};
