//! # Recipient Keys
//!
//! A PIX key routes a payment to an account. There are five categories and
//! each one has its own shape: taxpayer numbers and phones are digit counts,
//! e-mails are e-mails, and random keys are fixed-length identifiers.
//!
//! The payload encoder does not look at the category. It strips every
//! non-digit from the key and writes what is left, so a key that does not
//! match its category still produces a well-formed payload that no bank
//! will accept. Validation therefore happens here, before any payload is
//! built, and every entry point goes through [`validate_key`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::config::{
    CNPJ_DIGITS, CPF_DIGITS, PHONE_MAX_DIGITS, PHONE_MIN_DIGITS, RANDOM_KEY_LENGTH,
};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Reasons a recipient key is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// No key at all.
    #[error("recipient key is empty")]
    Empty,

    /// The category name is not one we know.
    #[error("unknown key type: {0:?}")]
    UnknownType(String),

    /// A digit-based key has the wrong number of digits.
    #[error("{kind} key must have {expected} digits, found {found}")]
    DigitCount {
        /// Category being validated.
        kind: PixKeyType,
        /// Human-readable expectation ("11", "10 to 11").
        expected: String,
        /// Digits actually present.
        found: usize,
    },

    /// The key is not a syntactically valid e-mail address.
    #[error("invalid e-mail key: {0:?}")]
    InvalidEmail(String),

    /// A random key has the wrong length.
    #[error("random key must be {expected} characters, found {found}")]
    RandomKeyLength {
        /// Required length.
        expected: usize,
        /// Length of the supplied key.
        found: usize,
    },

    /// The key has characters that a digits-only payload field would drop.
    #[error("{kind} key cannot be carried by a digits-only payload")]
    NotDigitEncodable {
        /// Category of the rejected key.
        kind: PixKeyType,
    },
}

// ---------------------------------------------------------------------------
// Key Types
// ---------------------------------------------------------------------------

/// The category a recipient key belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixKeyType {
    /// Individual taxpayer number, 11 digits.
    #[default]
    Cpf,
    /// Company taxpayer number, 14 digits.
    Cnpj,
    /// E-mail address.
    Email,
    /// Mobile or landline number with area code, 10 or 11 digits.
    #[serde(alias = "telefone")]
    Phone,
    /// Random key issued by the bank, 32 characters.
    #[serde(alias = "chave-aleatoria")]
    Random,
}

impl PixKeyType {
    /// Every category, in the order forms list them.
    pub const ALL: [PixKeyType; 5] = [
        PixKeyType::Cpf,
        PixKeyType::Cnpj,
        PixKeyType::Email,
        PixKeyType::Phone,
        PixKeyType::Random,
    ];

    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PixKeyType::Cpf => "cpf",
            PixKeyType::Cnpj => "cnpj",
            PixKeyType::Email => "email",
            PixKeyType::Phone => "phone",
            PixKeyType::Random => "random",
        }
    }

    /// Input hint shown next to the key field.
    pub fn placeholder(&self) -> &'static str {
        match self {
            PixKeyType::Cpf => "000.000.000-00",
            PixKeyType::Cnpj => "00.000.000/0000-00",
            PixKeyType::Email => "seu@email.com",
            PixKeyType::Phone => "(00) 00000-0000",
            PixKeyType::Random => "Chave aleatória",
        }
    }
}

impl fmt::Display for PixKeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PixKeyType {
    type Err = KeyError;

    /// Accepts canonical names and the Portuguese aliases stored in older
    /// profiles (`telefone`, `chave-aleatoria`). Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cpf" => Ok(PixKeyType::Cpf),
            "cnpj" => Ok(PixKeyType::Cnpj),
            "email" | "e-mail" => Ok(PixKeyType::Email),
            "phone" | "telefone" => Ok(PixKeyType::Phone),
            "random" | "chave-aleatoria" | "aleatoria" => Ok(PixKeyType::Random),
            other => Err(KeyError::UnknownType(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Keep only ASCII digits. This is also what the encoder writes as the key.
pub fn digits_only(key: &str) -> String {
    key.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn is_valid_email(key: &str) -> bool {
    // local@domain.tld, no whitespace, exactly one '@', a dot in the domain
    // with something on both sides of it.
    if key.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = key.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rfind('.') {
        Some(dot) => dot > 0 && dot + 1 < domain.len(),
        None => false,
    }
}

/// Check that `key` has the shape its category requires.
pub fn validate_key(key: &str, kind: PixKeyType) -> Result<(), KeyError> {
    if key.trim().is_empty() {
        return Err(KeyError::Empty);
    }

    match kind {
        PixKeyType::Cpf | PixKeyType::Cnpj => {
            let expected = if kind == PixKeyType::Cpf {
                CPF_DIGITS
            } else {
                CNPJ_DIGITS
            };
            let found = digits_only(key).len();
            if found != expected {
                return Err(KeyError::DigitCount {
                    kind,
                    expected: expected.to_string(),
                    found,
                });
            }
        }
        PixKeyType::Phone => {
            let found = digits_only(key).len();
            if !(PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&found) {
                return Err(KeyError::DigitCount {
                    kind,
                    expected: format!("{} to {}", PHONE_MIN_DIGITS, PHONE_MAX_DIGITS),
                    found,
                });
            }
        }
        PixKeyType::Email => {
            if !is_valid_email(key) {
                return Err(KeyError::InvalidEmail(key.to_string()));
            }
        }
        PixKeyType::Random => {
            let found = key.chars().count();
            if found != RANDOM_KEY_LENGTH {
                return Err(KeyError::RandomKeyLength {
                    expected: RANDOM_KEY_LENGTH,
                    found,
                });
            }
        }
    }

    Ok(())
}

/// Check that the payload's digits-only key field still identifies `key`.
///
/// Punctuation in CPF, CNPJ and phone keys is formatting, so stripping it is
/// harmless. E-mail and random keys are identifiers in full: any character
/// other than a digit would be lost, leaving an empty or unrelated key.
pub fn ensure_digit_encodable(key: &str, kind: PixKeyType) -> Result<(), KeyError> {
    match kind {
        PixKeyType::Cpf | PixKeyType::Cnpj | PixKeyType::Phone => Ok(()),
        PixKeyType::Email | PixKeyType::Random => {
            let trimmed = key.trim();
            if trimmed.is_empty() || digits_only(trimmed) != trimmed {
                Err(KeyError::NotDigitEncodable { kind })
            } else {
                Ok(())
            }
        }
    }
}

/// Boolean form of [`validate_key`], for inline form feedback.
pub fn is_valid_key(key: &str, kind: PixKeyType) -> bool {
    validate_key(key, kind).is_ok()
}
