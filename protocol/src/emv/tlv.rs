//! Tag-length-value fields.
//!
//! Every field is `<2-digit tag><2-digit length><value>`. Lengths count
//! characters, not bytes, which is how the payloads have always been
//! produced by the web front end. In practice every value is ASCII and the
//! two agree.

use super::error::EmvError;
use crate::config::{MAX_FIELD_LENGTH, TAG_WIDTH};

/// One decoded tag-length-value field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Two-digit tag.
    pub tag: String,
    /// Field content; its length is implied by `value.chars().count()`.
    pub value: String,
}

impl Field {
    /// Create a field from a tag and value.
    pub fn new(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            value: value.into(),
        }
    }

    /// Serialize the field. Fails if the value does not fit a two-digit length.
    pub fn encode(&self) -> Result<String, EmvError> {
        encode_field(&self.tag, &self.value)
    }
}

/// Encode a single field as `<tag><len:02><value>`.
pub fn encode_field(tag: &str, value: &str) -> Result<String, EmvError> {
    let mut out = String::with_capacity(TAG_WIDTH * 2 + value.len());
    push_field(&mut out, tag, value)?;
    Ok(out)
}

/// Append a field to `out`. Nothing is written if the value is too long.
pub fn push_field(out: &mut String, tag: &str, value: &str) -> Result<(), EmvError> {
    let length = value.chars().count();
    if length > MAX_FIELD_LENGTH {
        return Err(EmvError::FieldTooLong {
            tag: tag.to_string(),
            length,
        });
    }
    out.push_str(tag);
    out.push_str(&format!("{:02}", length));
    out.push_str(value);
    Ok(())
}

fn two_digits(chars: &[char]) -> Option<usize> {
    if chars.len() != TAG_WIDTH || !chars.iter().all(|c| c.is_ascii_digit()) {
        return None;
    }
    chars
        .iter()
        .try_fold(0usize, |acc, c| Some(acc * 10 + c.to_digit(10)? as usize))
}

/// Split a TLV string into its fields, in order.
///
/// Does not interpret tags and does not check the CRC. Nested structures
/// (such as the merchant account field) come back as a single field whose
/// value can itself be passed to `parse_fields`.
pub fn parse_fields(input: &str) -> Result<Vec<Field>, EmvError> {
    let chars: Vec<char> = input.chars().collect();
    let mut fields = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        let header_end = pos + TAG_WIDTH * 2;
        if header_end > chars.len() {
            return Err(EmvError::Truncated { offset: pos });
        }

        let tag_chars = &chars[pos..pos + TAG_WIDTH];
        if two_digits(tag_chars).is_none() {
            return Err(EmvError::InvalidTag {
                offset: pos,
                raw: tag_chars.iter().collect(),
            });
        }
        let tag: String = tag_chars.iter().collect();

        let len_chars = &chars[pos + TAG_WIDTH..header_end];
        let declared = two_digits(len_chars).ok_or_else(|| EmvError::InvalidLength {
            tag: tag.clone(),
            raw: len_chars.iter().collect(),
        })?;

        let value_end = header_end + declared;
        if value_end > chars.len() {
            return Err(EmvError::ValueOverrun {
                tag,
                declared,
                available: chars.len() - header_end,
            });
        }

        fields.push(Field {
            tag,
            value: chars[header_end..value_end].iter().collect(),
        });
        pos = value_end;
    }

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_fixed_fields() {
        assert_eq!(encode_field("00", "01").unwrap(), "000201");
        assert_eq!(encode_field("52", "0000").unwrap(), "52040000");
        assert_eq!(encode_field("53", "986").unwrap(), "5303986");
        assert_eq!(encode_field("58", "BR").unwrap(), "5802BR");
    }

    #[test]
    fn test_encode_empty_value() {
        assert_eq!(encode_field("60", "").unwrap(), "6000");
    }

    #[test]
    fn test_encode_rejects_oversized_value() {
        let value = "9".repeat(100);
        let err = encode_field("26", &value).unwrap_err();
        assert_eq!(
            err,
            EmvError::FieldTooLong {
                tag: "26".into(),
                length: 100
            }
        );
        assert!(encode_field("26", &value[..99]).is_ok());
    }

    #[test]
    fn test_push_field_leaves_buffer_untouched_on_error() {
        let mut out = String::from("000201");
        assert!(push_field(&mut out, "59", &"x".repeat(120)).is_err());
        assert_eq!(out, "000201");
    }

    #[test]
    fn test_length_counts_characters() {
        assert_eq!(encode_field("60", "SÃO PAULO").unwrap(), "6009SÃO PAULO");
    }

    #[test]
    fn test_parse_sequence() {
        let fields = parse_fields("0002015802BR6000").unwrap();
        assert_eq!(
            fields,
            vec![
                Field::new("00", "01"),
                Field::new("58", "BR"),
                Field::new("60", ""),
            ]
        );
    }

    #[test]
    fn test_parse_nested_value() {
        let fields = parse_fields("26330014br.gov.bcb.pix011112345678901").unwrap();
        assert_eq!(fields.len(), 1);
        let inner = parse_fields(&fields[0].value).unwrap();
        assert_eq!(inner[0], Field::new("00", "br.gov.bcb.pix"));
        assert_eq!(inner[1], Field::new("01", "12345678901"));
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse_fields("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_truncated_header() {
        assert_eq!(
            parse_fields("000201580").unwrap_err(),
            EmvError::Truncated { offset: 6 }
        );
    }

    #[test]
    fn test_parse_bad_tag_and_length() {
        assert!(matches!(
            parse_fields("A00201").unwrap_err(),
            EmvError::InvalidTag { offset: 0, .. }
        ));
        assert!(matches!(
            parse_fields("00X201").unwrap_err(),
            EmvError::InvalidLength { .. }
        ));
    }

    #[test]
    fn test_parse_value_overrun() {
        assert_eq!(
            parse_fields("5910JOHN").unwrap_err(),
            EmvError::ValueOverrun {
                tag: "59".into(),
                declared: 10,
                available: 4
            }
        );
    }

    #[test]
    fn test_field_encode_matches_free_function() {
        let field = Field::new("59", "JOHN DOE");
        assert_eq!(field.encode().unwrap(), "5908JOHN DOE");
    }
}
