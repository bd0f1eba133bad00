//! # Payload Configuration & Constants
//!
//! Every tag and fixed value of the PIX "copy and paste" payload lives here.
//! The payload follows the EMV merchant-presented QR layout as profiled by
//! the Banco Central do Brasil, so most of these values are not ours to
//! change: a scanner that sees anything else will reject the code.

// ---------------------------------------------------------------------------
// Field Tags
// ---------------------------------------------------------------------------

/// Payload format indicator. Always the first field.
pub const TAG_FORMAT_INDICATOR: &str = "00";

/// Merchant account information (nested: GUI + recipient key).
pub const TAG_MERCHANT_ACCOUNT: &str = "26";

/// Merchant category code.
pub const TAG_CATEGORY_CODE: &str = "52";

/// Transaction currency (ISO 4217 numeric).
pub const TAG_CURRENCY: &str = "53";

/// Transaction amount. Optional; omitted for open-amount payloads.
pub const TAG_AMOUNT: &str = "54";

/// Country code (ISO 3166-1 alpha-2).
pub const TAG_COUNTRY: &str = "58";

/// Beneficiary (merchant) name.
pub const TAG_BENEFICIARY_NAME: &str = "59";

/// Beneficiary city.
pub const TAG_CITY: &str = "60";

/// CRC16 field. Always the last field and always four hex digits long.
pub const TAG_CRC: &str = "63";

/// Sub-tag of the merchant account field carrying the GUI literal.
pub const SUBTAG_GUI: &str = "00";

/// Sub-tag of the merchant account field carrying the recipient key.
pub const SUBTAG_KEY: &str = "01";

// ---------------------------------------------------------------------------
// Fixed Values
// ---------------------------------------------------------------------------

/// Payload format indicator value.
pub const FORMAT_INDICATOR: &str = "01";

/// Globally unique identifier of the PIX arrangement.
pub const PIX_GUI: &str = "br.gov.bcb.pix";

/// Merchant category code. `0000` means "not informed".
pub const CATEGORY_CODE: &str = "0000";

/// ISO 4217 numeric code for the Brazilian real.
pub const CURRENCY_BRL: &str = "986";

/// ISO 3166-1 alpha-2 code for Brazil.
pub const COUNTRY_BR: &str = "BR";

/// Declared length of the CRC field value.
pub const CRC_LENGTH: usize = 4;

/// The CRC tag and its length, appended before the checksum is computed.
pub const CRC_PREFIX: &str = "6304";

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Width of every tag and every length prefix.
pub const TAG_WIDTH: usize = 2;

/// Largest value a two-digit length prefix can declare.
pub const MAX_FIELD_LENGTH: usize = 99;

/// Beneficiary names longer than this are truncated before encoding.
pub const MAX_BENEFICIARY_NAME_LENGTH: usize = 25;

/// City names longer than this are truncated before encoding.
pub const MAX_CITY_LENGTH: usize = 15;

// ---------------------------------------------------------------------------
// Recipient Key Rules
// ---------------------------------------------------------------------------

/// CPF (individual taxpayer number): exact digit count.
pub const CPF_DIGITS: usize = 11;

/// CNPJ (company taxpayer number): exact digit count.
pub const CNPJ_DIGITS: usize = 14;

/// Phone keys: area code + 8 or 9 digit subscriber number.
pub const PHONE_MIN_DIGITS: usize = 10;

/// Upper bound for phone keys.
pub const PHONE_MAX_DIGITS: usize = 11;

/// Random ("aleatória") keys are fixed-length identifiers.
pub const RANDOM_KEY_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Service Defaults
// ---------------------------------------------------------------------------

/// Crate version string, exposed by the service status endpoint.
pub const PROTOCOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default HTTP API port.
pub const DEFAULT_API_PORT: u16 = 8480;

/// Default metrics (Prometheus) port.
pub const DEFAULT_METRICS_PORT: u16 = 8481;

/// Default minimum edge of rendered QR codes, in pixels.
pub const DEFAULT_QR_SIZE: u32 = 300;

/// Base URL of the WhatsApp click-to-chat share link.
pub const WHATSAPP_SHARE_BASE: &str = "https://wa.me/?text=";
