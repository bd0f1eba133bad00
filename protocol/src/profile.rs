//! PIX settings stored on a user profile.
//!
//! Profiles carry PIX data twice: a nested `pix` object written by the
//! current dashboard, and flat `pix_enabled` / `pix_key` / `pix_type`
//! columns kept for older rows. Each setting is resolved by taking the first
//! non-empty value of nested field, flat column, then a fallback.

use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::error::PixError;
use crate::key::PixKeyType;
use crate::payload::PaymentTarget;

/// Nested `pix` object of a profile row. Field names follow the stored JSON.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredPixConfig {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub pix_type: Option<String>,
    #[serde(default)]
    pub pix_key: Option<String>,
    #[serde(default)]
    pub beneficiary_name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    /// Fixed amount in reais.
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
}

/// The PIX-related subset of a profile row. Unknown columns are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ProfilePixRecord {
    /// Display name, used as the beneficiary when none is configured.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub pix_enabled: Option<bool>,
    #[serde(default)]
    pub pix_key: Option<String>,
    #[serde(default)]
    pub pix_type: Option<String>,
    #[serde(default)]
    pub pix: Option<StoredPixConfig>,
}

/// Resolved PIX settings, ready to build payment targets from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PixSettings {
    pub enabled: bool,
    pub key_type: PixKeyType,
    pub key: String,
    pub beneficiary_name: String,
    pub city: String,
    /// Fixed amount configured on the profile, if any.
    pub amount: Option<Amount>,
    pub description: Option<String>,
}

fn first_non_empty<'a>(
    candidates: impl IntoIterator<Item = Option<&'a String>>,
) -> Option<&'a str> {
    candidates
        .into_iter()
        .flatten()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
}

impl PixSettings {
    /// Resolve settings from a profile row.
    ///
    /// Fails when the stored key type is not a known category or the stored
    /// amount cannot be represented.
    pub fn from_profile(record: &ProfilePixRecord) -> Result<Self, PixError> {
        let nested = record.pix.clone().unwrap_or_default();

        let key_type = match first_non_empty([nested.pix_type.as_ref(), record.pix_type.as_ref()]) {
            Some(raw) => raw.parse::<PixKeyType>()?,
            None => PixKeyType::default(),
        };

        let key = first_non_empty([nested.pix_key.as_ref(), record.pix_key.as_ref()])
            .unwrap_or_default()
            .to_string();
        let beneficiary_name =
            first_non_empty([nested.beneficiary_name.as_ref(), record.name.as_ref()])
                .unwrap_or_default()
                .to_string();
        let city = first_non_empty([nested.city.as_ref()])
            .unwrap_or_default()
            .to_string();

        Ok(Self {
            enabled: nested.enabled.or(record.pix_enabled).unwrap_or(false),
            key_type,
            key,
            beneficiary_name,
            city,
            amount: nested.amount.map(Amount::from_reais).transpose()?.flatten(),
            description: nested.description.filter(|d| !d.trim().is_empty()),
        })
    }

    /// True when all fields needed for a payload are filled in.
    pub fn is_complete(&self) -> bool {
        !self.key.is_empty() && !self.beneficiary_name.is_empty() && !self.city.is_empty()
    }

    /// Build a payment target. An explicit `amount` overrides the one stored
    /// on the profile.
    pub fn to_target(&self, amount: Option<Amount>) -> PaymentTarget {
        PaymentTarget::new(
            self.key.clone(),
            self.key_type,
            self.beneficiary_name.clone(),
            self.city.clone(),
        )
        .with_amount(amount.or(self.amount))
    }
}
