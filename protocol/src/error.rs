//! Umbrella error for the validated encode path.
//!
//! Each concern keeps its own error type ([`EmvError`], [`KeyError`],
//! [`AmountError`]); [`PixError`] wraps them for callers that go through
//! validation and encoding in one step.

use thiserror::Error;

use crate::amount::AmountError;
use crate::emv::EmvError;
use crate::key::KeyError;

/// Anything that can stop a payment request from becoming a payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PixError {
    /// The recipient key does not match its category.
    #[error("invalid recipient key: {0}")]
    Key(#[from] KeyError),

    /// The payload could not be encoded or decoded.
    #[error(transparent)]
    Emv(#[from] EmvError),

    /// An amount could not be parsed.
    #[error(transparent)]
    Amount(#[from] AmountError),

    /// A mandatory text field is blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The caller asked for a fixed-amount payload but gave no amount.
    #[error("an amount greater than zero is required")]
    AmountRequired,
}

impl PixError {
    /// True for errors caused by what the user typed, as opposed to a
    /// payload that cannot be represented.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            PixError::Key(_)
                | PixError::Amount(_)
                | PixError::MissingField(_)
                | PixError::AmountRequired
        )
    }
}
