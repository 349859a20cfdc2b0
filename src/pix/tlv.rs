//! Tag-length-value fields: `tag ++ %02d(len) ++ value`.
//!
//! Nested blocks are built by concatenating inner fields and passing the result as the
//! value of an outer one.

use super::PixError;

/// Longest value a two-digit length prefix can describe.
pub const MAX_VALUE_LEN: usize = 99;

/// Encodes one field.
///
/// # Errors
/// [`PixError::NonAscii`] if `value` has non-ASCII characters (the length prefix counts
/// bytes and the checksum assumes one byte per character), [`PixError::FieldTooLong`]
/// past [`MAX_VALUE_LEN`] bytes.
pub fn field(tag: &str, value: &str) -> Result<String, PixError> {
    if !value.is_ascii() {
        return Err(PixError::NonAscii { tag: tag.to_string() });
    }
    if value.len() > MAX_VALUE_LEN {
        return Err(PixError::FieldTooLong {
            tag: tag.to_string(),
            len: value.len(),
        });
    }
    Ok(format!("{tag}{:02}{value}", value.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_pads_length() {
        assert_eq!(field("00", "01").unwrap(), "000201");
        assert_eq!(field("58", "BR").unwrap(), "5802BR");
        assert_eq!(field("05", "").unwrap(), "0500");
    }

    #[test]
    fn test_nested_fields() {
        let inner = field("05", "***").unwrap();
        assert_eq!(field("62", &inner).unwrap(), "62070503***");
    }

    #[test]
    fn test_rejects_values_past_two_digit_length() {
        let long = "A".repeat(100);
        assert_eq!(
            field("01", &long),
            Err(PixError::FieldTooLong { tag: "01".into(), len: 100 })
        );
        assert!(field("01", &"A".repeat(99)).is_ok());
    }

    #[test]
    fn test_rejects_non_ascii() {
        assert_eq!(
            field("59", "AÇAÍ"),
            Err(PixError::NonAscii { tag: "59".into() })
        );
    }
}
