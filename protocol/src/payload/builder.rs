//! Payload assembly.
//!
//! The fields always appear in the same order:
//!
//! ```text
//! 00 format indicator   000201
//! 26 merchant account   26LL 0014br.gov.bcb.pix 01LL<key digits>
//! 52 category code      52040000
//! 53 currency           5303986
//! 54 amount             optional, only when > 0
//! 58 country            5802BR
//! 59 beneficiary name   truncated to 25
//! 60 city               truncated to 15
//! 63 CRC16              6304XXXX
//! ```

use crate::config::{
    CATEGORY_CODE, COUNTRY_BR, CRC_PREFIX, CURRENCY_BRL, FORMAT_INDICATOR, PIX_GUI,
    SUBTAG_GUI, SUBTAG_KEY, TAG_AMOUNT, TAG_BENEFICIARY_NAME, TAG_CATEGORY_CODE, TAG_CITY,
    TAG_COUNTRY, TAG_CURRENCY, TAG_FORMAT_INDICATOR, TAG_MERCHANT_ACCOUNT,
};
use crate::emv::{checksum16, push_field, EmvError};
use crate::error::PixError;
use crate::key::digits_only;

use super::target::{AmountPolicy, PaymentTarget};

/// Nested value of the merchant account field: GUI followed by the key.
pub fn merchant_account_info(recipient_key: &str) -> Result<String, EmvError> {
    let mut info = String::new();
    push_field(&mut info, SUBTAG_GUI, PIX_GUI)?;
    push_field(&mut info, SUBTAG_KEY, &digits_only(recipient_key))?;
    Ok(info)
}

/// Build the payload up to and including the `6304` CRC prefix.
///
/// Pure: no validation beyond length prefixes. A key that does not match its
/// category still produces a well-formed payload; use [`encode`] to refuse
/// those. The only failure is a key with more than 77 digits, which cannot
/// fit the merchant account field.
pub fn build_payload(target: &PaymentTarget) -> Result<String, EmvError> {
    let mut payload = String::with_capacity(128);

    push_field(&mut payload, TAG_FORMAT_INDICATOR, FORMAT_INDICATOR)?;
    push_field(
        &mut payload,
        TAG_MERCHANT_ACCOUNT,
        &merchant_account_info(&target.recipient_key)?,
    )?;
    push_field(&mut payload, TAG_CATEGORY_CODE, CATEGORY_CODE)?;
    push_field(&mut payload, TAG_CURRENCY, CURRENCY_BRL)?;
    if let Some(amount) = target.encoded_amount() {
        push_field(&mut payload, TAG_AMOUNT, &amount.to_emv_string())?;
    }
    push_field(&mut payload, TAG_COUNTRY, COUNTRY_BR)?;
    push_field(&mut payload, TAG_BENEFICIARY_NAME, &target.encoded_name())?;
    push_field(&mut payload, TAG_CITY, &target.encoded_city())?;
    payload.push_str(CRC_PREFIX);

    Ok(payload)
}

/// Build the complete payload: [`build_payload`] plus its checksum.
///
/// This is the string that goes into the QR code and the copy button.
pub fn build_final_payload(target: &PaymentTarget) -> Result<String, EmvError> {
    let mut payload = build_payload(target)?;
    let crc = checksum16(&payload);
    payload.push_str(&crc);

    tracing::debug!(
        length = payload.len(),
        has_amount = target.encoded_amount().is_some(),
        crc = %crc,
        "built PIX payload"
    );
    Ok(payload)
}

/// Validate the target, then build the final payload.
///
/// Every caller that turns user input into a payload goes through here.
pub fn encode(target: &PaymentTarget, policy: AmountPolicy) -> Result<String, PixError> {
    if let Err(e) = target.validate(policy) {
        tracing::debug!(error = %e, "payment target rejected");
        return Err(e);
    }
    Ok(build_final_payload(target)?)
}
