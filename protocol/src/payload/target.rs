//! The input record of the encoder.

use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::config::{MAX_BENEFICIARY_NAME_LENGTH, MAX_CITY_LENGTH};
use crate::error::PixError;
use crate::key::{ensure_digit_encodable, validate_key, PixKeyType};

/// Whether a payment request must carry an amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmountPolicy {
    /// No amount, or zero, yields an open-amount payload.
    #[default]
    Open,
    /// An amount greater than zero must be present.
    Required,
}

/// Who gets paid, and optionally how much.
///
/// Built fresh from profile or form state whenever a payload is needed.
/// Never stored on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentTarget {
    /// Recipient key as typed. The encoder keeps its digits only.
    pub recipient_key: String,
    /// Category of the key. Used for validation, ignored by the encoder.
    #[serde(default)]
    pub recipient_key_category: PixKeyType,
    /// Beneficiary name; truncated to 25 characters when encoded.
    pub beneficiary_name: String,
    /// Beneficiary city; truncated to 15 characters when encoded.
    pub city: String,
    /// Amount to charge. `None` or zero leaves the amount to the payer.
    #[serde(default)]
    pub amount: Option<Amount>,
}

pub(crate) fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

impl PaymentTarget {
    /// Open-amount target.
    pub fn new(
        recipient_key: impl Into<String>,
        recipient_key_category: PixKeyType,
        beneficiary_name: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            recipient_key: recipient_key.into(),
            recipient_key_category,
            beneficiary_name: beneficiary_name.into(),
            city: city.into(),
            amount: None,
        }
    }

    /// Set (or clear) the amount.
    pub fn with_amount(mut self, amount: Option<Amount>) -> Self {
        self.amount = amount;
        self
    }

    /// The amount that will be written to the payload, if any.
    pub fn encoded_amount(&self) -> Option<Amount> {
        self.amount.filter(Amount::is_positive)
    }

    /// Beneficiary name exactly as it will be encoded.
    pub fn encoded_name(&self) -> String {
        truncate_chars(&self.beneficiary_name, MAX_BENEFICIARY_NAME_LENGTH)
    }

    /// City exactly as it will be encoded.
    pub fn encoded_city(&self) -> String {
        truncate_chars(&self.city, MAX_CITY_LENGTH)
    }

    /// Check everything the encoder does not: key shape, whether the key
    /// survives the digits-only key field, blank fields and, under
    /// [`AmountPolicy::Required`], the presence of an amount.
    pub fn validate(&self, policy: AmountPolicy) -> Result<(), PixError> {
        validate_key(&self.recipient_key, self.recipient_key_category)?;
        ensure_digit_encodable(&self.recipient_key, self.recipient_key_category)?;
        if self.beneficiary_name.trim().is_empty() {
            return Err(PixError::MissingField("beneficiary_name"));
        }
        if self.city.trim().is_empty() {
            return Err(PixError::MissingField("city"));
        }
        if policy == AmountPolicy::Required && self.encoded_amount().is_none() {
            return Err(PixError::AmountRequired);
        }
        Ok(())
    }
}
