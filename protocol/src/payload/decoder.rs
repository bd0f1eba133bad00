//! Reading payloads back.
//!
//! Used to check codes before they are shown, and by the service's decode
//! endpoint to inspect codes pasted by users. Fields the encoder never
//! writes (additional data, merchant extensions) are tolerated and listed
//! in [`DecodedPayload::tags`] but not interpreted.

use serde::Serialize;

use crate::amount::Amount;
use crate::config::{
    CRC_LENGTH, CRC_PREFIX, FORMAT_INDICATOR, PIX_GUI, SUBTAG_GUI, SUBTAG_KEY, TAG_AMOUNT,
    TAG_BENEFICIARY_NAME, TAG_CATEGORY_CODE, TAG_CITY, TAG_COUNTRY, TAG_CRC, TAG_CURRENCY,
    TAG_FORMAT_INDICATOR, TAG_MERCHANT_ACCOUNT,
};
use crate::emv::{checksum16, parse_fields, EmvError, Field};

/// The interpreted content of a payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedPayload {
    /// Value of tag `00`.
    pub format_indicator: String,
    /// GUI of the merchant account field.
    pub gui: String,
    /// Recipient key as carried in the payload.
    pub recipient_key: String,
    /// Value of tag `52`.
    pub category_code: String,
    /// Value of tag `53`.
    pub currency: String,
    /// Value of tag `54`, if present.
    pub amount: Option<Amount>,
    /// Value of tag `58`.
    pub country: String,
    /// Value of tag `59`.
    pub beneficiary_name: String,
    /// Value of tag `60`.
    pub city: String,
    /// Value of tag `63`.
    pub checksum: String,
    /// Top-level tags in the order they appear.
    pub tags: Vec<String>,
}

/// Split a payload into the checksummed part (ending in `6304`) and the
/// four checksum characters.
pub fn split_checksum(payload: &str) -> Result<(&str, &str), EmvError> {
    let trailer = CRC_PREFIX.len() + CRC_LENGTH;
    let offsets: Vec<usize> = payload.char_indices().map(|(i, _)| i).collect();
    if offsets.len() < trailer {
        return Err(EmvError::MissingChecksum);
    }

    let prefix_start = offsets[offsets.len() - trailer];
    let crc_start = offsets[offsets.len() - CRC_LENGTH];
    if &payload[prefix_start..crc_start] != CRC_PREFIX {
        return Err(EmvError::MissingChecksum);
    }

    let crc = &payload[crc_start..];
    if !crc.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(EmvError::MissingChecksum);
    }
    Ok((&payload[..crc_start], crc))
}

/// Recompute the checksum and compare it with the one in the payload.
pub fn verify_checksum(payload: &str) -> Result<(), EmvError> {
    let (body, found) = split_checksum(payload)?;
    let expected = checksum16(body);
    if !expected.eq_ignore_ascii_case(found) {
        return Err(EmvError::ChecksumMismatch {
            expected,
            found: found.to_string(),
        });
    }
    Ok(())
}

fn find<'a>(fields: &'a [Field], tag: &str) -> Option<&'a Field> {
    fields.iter().find(|f| f.tag == tag)
}

fn require(fields: &[Field], tag: &'static str, name: &'static str) -> Result<String, EmvError> {
    find(fields, tag)
        .map(|f| f.value.clone())
        .ok_or(EmvError::MissingField { tag, name })
}

/// Verify and decode a complete payload.
pub fn decode_payload(payload: &str) -> Result<DecodedPayload, EmvError> {
    let payload = payload.trim();
    verify_checksum(payload)?;

    let fields = parse_fields(payload)?;
    match fields.last() {
        Some(last) if last.tag == TAG_CRC => {}
        _ => return Err(EmvError::MissingChecksum),
    }

    let format_indicator = require(&fields, TAG_FORMAT_INDICATOR, "format indicator")?;
    if format_indicator != FORMAT_INDICATOR {
        return Err(EmvError::UnexpectedValue {
            tag: TAG_FORMAT_INDICATOR,
            expected: FORMAT_INDICATOR,
            found: format_indicator,
        });
    }

    let account = require(&fields, TAG_MERCHANT_ACCOUNT, "merchant account")?;
    let account_fields = parse_fields(&account)?;
    let gui = require(&account_fields, SUBTAG_GUI, "GUI")?;
    if !gui.eq_ignore_ascii_case(PIX_GUI) {
        return Err(EmvError::UnexpectedValue {
            tag: TAG_MERCHANT_ACCOUNT,
            expected: PIX_GUI,
            found: gui,
        });
    }
    let recipient_key = require(&account_fields, SUBTAG_KEY, "recipient key")?;

    let amount = find(&fields, TAG_AMOUNT)
        .map(|f| Amount::parse_emv(&f.value))
        .transpose()
        .map_err(|e| EmvError::InvalidAmount(e.to_string()))?;

    let decoded = DecodedPayload {
        format_indicator,
        gui,
        recipient_key,
        category_code: require(&fields, TAG_CATEGORY_CODE, "category code")?,
        currency: require(&fields, TAG_CURRENCY, "currency")?,
        amount,
        country: require(&fields, TAG_COUNTRY, "country")?,
        beneficiary_name: require(&fields, TAG_BENEFICIARY_NAME, "beneficiary name")?,
        city: require(&fields, TAG_CITY, "city")?,
        checksum: require(&fields, TAG_CRC, "CRC")?,
        tags: fields.iter().map(|f| f.tag.clone()).collect(),
    };

    tracing::debug!(
        tags = decoded.tags.len(),
        has_amount = decoded.amount.is_some(),
        "decoded PIX payload"
    );
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    const JOHN: &str = "00020126330014br.gov.bcb.pix0111123456789015204000053039865802BR\
                        5908JOHN DOE6009SAO PAULO63043F4F";

    #[test]
    fn test_decode_reference_payload() {
        let decoded = decode_payload(JOHN).unwrap();
        assert_eq!(decoded.format_indicator, "01");
        assert_eq!(decoded.gui, "br.gov.bcb.pix");
        assert_eq!(decoded.recipient_key, "12345678901");
        assert_eq!(decoded.category_code, "0000");
        assert_eq!(decoded.currency, "986");
        assert_eq!(decoded.amount, None);
        assert_eq!(decoded.country, "BR");
        assert_eq!(decoded.beneficiary_name, "JOHN DOE");
        assert_eq!(decoded.city, "SAO PAULO");
        assert_eq!(decoded.checksum, "3F4F");
        assert_eq!(
            decoded.tags,
            vec!["00", "26", "52", "53", "58", "59", "60", "63"]
        );
    }

    #[test]
    fn test_decode_amount() {
        let payload = "00020126330014br.gov.bcb.pix011112345678901520400005303986540510.50\
                       5802BR5908JOHN DOE6009SAO PAULO63043DD2";
        let decoded = decode_payload(payload).unwrap();
        assert_eq!(decoded.amount, Some(Amount::from_centavos(1050)));
    }

    #[test]
    fn test_non_conforming_amount_field_is_rejected() {
        for amount in ["540510,50", "5405R$ 10", "5402.5"] {
            let body = format!(
                "00020126330014br.gov.bcb.pix0111123456789015204000053039865802BR\
                 {amount}5908JOHN DOE6009SAO PAULO6304"
            );
            let payload = format!("{}{}", body, checksum16(&body));
            assert!(
                matches!(decode_payload(&payload), Err(EmvError::InvalidAmount(_))),
                "accepted amount field {amount:?}"
            );
        }
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert!(decode_payload(&format!("  {}\n", JOHN)).is_ok());
    }

    #[test]
    fn test_lowercase_checksum_is_accepted() {
        let lower = JOHN.replace("3F4F", "3f4f");
        assert!(verify_checksum(&lower).is_ok());
    }

    #[test]
    fn test_tampered_payload_fails_checksum() {
        let tampered = JOHN.replace("JOHN DOE", "JOHN DOF");
        assert_eq!(
            verify_checksum(&tampered).unwrap_err(),
            EmvError::ChecksumMismatch {
                expected: checksum16(&tampered[..tampered.len() - 4]),
                found: "3F4F".into()
            }
        );
    }

    #[test]
    fn test_missing_trailer() {
        assert_eq!(
            verify_checksum("000201").unwrap_err(),
            EmvError::MissingChecksum
        );
        assert_eq!(
            verify_checksum(&JOHN[..JOHN.len() - 1]).unwrap_err(),
            EmvError::MissingChecksum
        );
    }

    #[test]
    fn test_split_checksum() {
        let (body, crc) = split_checksum(JOHN).unwrap();
        assert!(body.ends_with("6304"));
        assert_eq!(crc, "3F4F");
    }

    #[test]
    fn test_foreign_gui_is_rejected() {
        let body = "00020126310012br.gov.xyz.x011112345678901520400005303986\
                    5802BR5901A6001B6304";
        let payload = format!("{}{}", body, checksum16(body));
        assert!(matches!(
            decode_payload(&payload).unwrap_err(),
            EmvError::UnexpectedValue { tag: "26", .. }
        ));
    }

    #[test]
    fn test_missing_city_is_reported() {
        let body = "00020126330014br.gov.bcb.pix0111123456789015204000053039865802BR\
                    5908JOHN DOE6304";
        let payload = format!("{}{}", body, checksum16(body));
        assert_eq!(
            decode_payload(&payload).unwrap_err(),
            EmvError::MissingField {
                tag: "60",
                name: "city"
            }
        );
    }

    #[test]
    fn test_unknown_fields_are_tolerated() {
        let body = "00020126330014br.gov.bcb.pix0111123456789015204000053039865802BR\
                    5908JOHN DOE6009SAO PAULO62070503***6304";
        let payload = format!("{}{}", body, checksum16(body));
        let decoded = decode_payload(&payload).unwrap();
        assert!(decoded.tags.contains(&"62".to_string()));
        assert_eq!(decoded.city, "SAO PAULO");
    }
}
