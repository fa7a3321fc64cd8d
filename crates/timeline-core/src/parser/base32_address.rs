use super::ParseError;

/// Decode a 39–40 character unpadded base32 address into its canonical
/// 25-byte form.
///
/// Addresses are historically rendered both with a trailing pad character
/// dropped (39 chars) and without trimming (40 chars, the `RFC4648`-aligned
/// encoding of 25 bytes); both are accepted and normalized to 25 bytes.
pub fn parse_base32_address(text: &str) -> Result<[u8; 25], ParseError> {
    if !(39..=40).contains(&text.len()) {
        return Err(ParseError::new(
            "base32-address",
            format!("expected 39-40 chars, got {}", text.len()),
        ));
    }
    if !text.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()) {
        return Err(ParseError::new(
            "base32-address",
            "expected upper-case base32 alphabet",
        ));
    }

    // base32::decode ignores missing padding, so a 39-char input decodes the
    // same way a padded 40-char one would.
    let decoded = base32::decode(base32::Alphabet::Rfc4648 { padding: false }, text)
        .ok_or_else(|| ParseError::new("base32-address", "invalid base32 alphabet"))?;

    if decoded.len() < 25 {
        return Err(ParseError::new(
            "base32-address",
            format!("decoded to {} bytes, expected 25", decoded.len()),
        ));
    }

    let mut out = [0u8; 25];
    out.copy_from_slice(&decoded[..25]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_length() {
        assert!(parse_base32_address("TOOSHORT").is_err());
    }

    #[test]
    fn rejects_lowercase() {
        let text = "n".repeat(40);
        assert!(parse_base32_address(&text).is_err());
    }

    #[test]
    fn accepts_39_and_40_char_forms() {
        let addr40 = "N".repeat(40);
        let addr39 = "N".repeat(39);
        assert!(parse_base32_address(&addr40).is_ok());
        assert!(parse_base32_address(&addr39).is_ok());
    }
}
