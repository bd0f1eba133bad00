//! Error types for TLV encoding, parsing and checksum verification.

use thiserror::Error;

/// Errors raised while writing or reading EMV tag-length-value strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmvError {
    /// A value is longer than a two-digit length prefix can declare.
    #[error("field {tag} is {length} characters long, the maximum is 99")]
    FieldTooLong {
        /// Tag of the offending field.
        tag: String,
        /// Length of the value in characters.
        length: usize,
    },

    /// The input ended in the middle of a tag or length prefix.
    #[error("payload truncated at offset {offset}")]
    Truncated {
        /// Character offset where the incomplete header starts.
        offset: usize,
    },

    /// A tag was not two decimal digits.
    #[error("invalid tag {raw:?} at offset {offset}")]
    InvalidTag {
        /// Character offset of the tag.
        offset: usize,
        /// The two characters found in the tag position.
        raw: String,
    },

    /// A length prefix was not two decimal digits.
    #[error("invalid length {raw:?} for field {tag}")]
    InvalidLength {
        /// Tag of the field.
        tag: String,
        /// The two characters found in the length position.
        raw: String,
    },

    /// A declared length runs past the end of the input.
    #[error("field {tag} declares {declared} characters but only {available} remain")]
    ValueOverrun {
        /// Tag of the field.
        tag: String,
        /// Length declared by the prefix.
        declared: usize,
        /// Characters actually left in the input.
        available: usize,
    },

    /// A mandatory field is absent.
    #[error("missing field {tag} ({name})")]
    MissingField {
        /// Tag that was expected.
        tag: &'static str,
        /// Human-readable field name.
        name: &'static str,
    },

    /// A fixed-value field carries something else.
    #[error("field {tag} should be {expected:?}, found {found:?}")]
    UnexpectedValue {
        /// Tag of the field.
        tag: &'static str,
        /// The only value allowed.
        expected: &'static str,
        /// What the payload actually carries.
        found: String,
    },

    /// The payload does not end with a well-formed CRC field.
    #[error("payload does not end with a 4-character CRC field")]
    MissingChecksum,

    /// The CRC in the payload does not match the recomputed one.
    #[error("checksum mismatch: payload says {found}, computed {expected}")]
    ChecksumMismatch {
        /// Checksum computed over the payload.
        expected: String,
        /// Checksum carried by the payload.
        found: String,
    },

    /// The amount field could not be read as a decimal value.
    #[error("invalid amount field: {0}")]
    InvalidAmount(String),
}
