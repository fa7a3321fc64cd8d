use super::ParseError;

/// Parse a decimal, non-negative integer path segment (heights, limits).
/// Rejects signs, whitespace, and the `0x...` form explicitly — spec §8
/// scenario 3 requires `/blocks/from/0X/limit/25` to be a malformed integer,
/// not a creative base.
pub fn parse_non_negative_integer(text: &str) -> Result<u64, ParseError> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::new(
            "integer",
            format!("'{text}' is not a non-negative decimal integer"),
        ));
    }

    text.parse::<u64>()
        .map_err(|err| ParseError::new("integer", err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_hex_prefixed_form() {
        assert!(parse_non_negative_integer("0X").is_err());
        assert!(parse_non_negative_integer("0x10").is_err());
    }

    #[test]
    fn rejects_sign() {
        assert!(parse_non_negative_integer("-1").is_err());
        assert!(parse_non_negative_integer("+1").is_err());
    }

    #[test]
    fn accepts_plain_decimal() {
        assert_eq!(parse_non_negative_integer("0").unwrap(), 0);
        assert_eq!(parse_non_negative_integer("25").unwrap(), 25);
    }
}
