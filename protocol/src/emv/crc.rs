//! CRC16/CCITT-FALSE, as required for the PIX payload checksum field.
//!
//! Polynomial `0x1021`, initial value `0xFFFF`, MSB first, no reflection
//! and no final XOR. The checksum is computed over the whole payload
//! including the `6304` prefix of the CRC field itself.

/// Generator polynomial (x^16 + x^12 + x^5 + 1).
pub const CRC16_POLY: u16 = 0x1021;

/// Initial register value.
pub const CRC16_INIT: u16 = 0xFFFF;

/// Feed one byte through the register.
#[inline]
fn update(mut crc: u16, byte: u8) -> u16 {
    crc ^= (byte as u16) << 8;
    for _ in 0..8 {
        crc = if crc & 0x8000 != 0 {
            (crc << 1) ^ CRC16_POLY
        } else {
            crc << 1
        };
    }
    crc
}

/// Compute the CRC16/CCITT-FALSE of a byte sequence.
///
/// ```
/// use pix_protocol::emv::crc16_ccitt;
///
/// // The catalogued check value for CRC-16/CCITT-FALSE.
/// assert_eq!(crc16_ccitt(b"123456789"), 0x29B1);
/// ```
pub fn crc16_ccitt(data: &[u8]) -> u16 {
    data.iter().fold(CRC16_INIT, |crc, &b| update(crc, b))
}

/// Checksum a payload string and format it as four uppercase hex digits.
///
/// Each character contributes its code point truncated to one byte. For the
/// ASCII payloads scanners accept this is the same as checksumming the
/// UTF-8 bytes; for anything wider it matches what the web front end
/// computed, so codes it printed still verify.
pub fn checksum16(payload: &str) -> String {
    let crc = payload
        .chars()
        .fold(CRC16_INIT, |crc, c| update(crc, (c as u32 & 0xFF) as u8));
    format!("{:04X}", crc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_value() {
        assert_eq!(crc16_ccitt(b"123456789"), 0x29B1);
        assert_eq!(checksum16("123456789"), "29B1");
    }

    #[test]
    fn test_empty_input_is_init_value() {
        assert_eq!(crc16_ccitt(&[]), CRC16_INIT);
        assert_eq!(checksum16(""), "FFFF");
    }

    #[test]
    fn test_known_payload_checksum() {
        let body = "00020126330014br.gov.bcb.pix0111123456789015204000053039865802BR\
                    5908JOHN DOE6009SAO PAULO6304";
        assert_eq!(checksum16(body), "3F4F");
    }

    #[test]
    fn test_output_is_padded_uppercase_hex() {
        for input in ["", "a", "000201", "br.gov.bcb.pix", "6304"] {
            let sum = checksum16(input);
            assert_eq!(sum.len(), 4);
            assert!(sum
                .chars()
                .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
        }
    }

    #[test]
    fn test_ascii_string_matches_byte_crc() {
        let text = "5802BR5908JOHN DOE";
        assert_eq!(
            checksum16(text),
            format!("{:04X}", crc16_ccitt(text.as_bytes()))
        );
    }

    #[test]
    fn test_single_character_change_is_detected() {
        assert_ne!(checksum16("5908JOHN DOE"), checksum16("5908JOHN DOF"));
    }
}
