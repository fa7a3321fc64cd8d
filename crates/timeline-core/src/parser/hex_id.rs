use super::ParseError;

/// Decode a fixed-length hex identifier, rejecting any length or alphabet
/// mismatch as an [`ParseError`] rather than silently truncating or padding.
fn parse_fixed_hex<const N: usize>(segment: &'static str, text: &str) -> Result<[u8; N], ParseError> {
    if text.len() != N * 2 {
        return Err(ParseError::new(
            segment,
            format!("expected {} hex chars, got {}", N * 2, text.len()),
        ));
    }

    let bytes = hex::decode(text).map_err(|err| ParseError::new(segment, err.to_string()))?;
    bytes
        .try_into()
        .map_err(|_| ParseError::new(segment, "decoded length mismatch"))
}

/// 12-byte internal object id (e.g. a Mongo `ObjectId`).
pub fn parse_object_id(text: &str) -> Result<[u8; 12], ParseError> {
    parse_fixed_hex::<12>("object-id", text)
}

/// 8-byte mosaic id.
pub fn parse_mosaic_id(text: &str) -> Result<[u8; 8], ParseError> {
    parse_fixed_hex::<8>("mosaic-id", text)
}

/// 8-byte namespace id.
pub fn parse_namespace_id(text: &str) -> Result<[u8; 8], ParseError> {
    parse_fixed_hex::<8>("namespace-id", text)
}

/// 32-byte block/transaction hash.
pub fn parse_hash256(text: &str) -> Result<[u8; 32], ParseError> {
    parse_fixed_hex::<32>("hash-256", text)
}

/// 32-byte Ed25519 public key.
pub fn parse_public_key(text: &str) -> Result<[u8; 32], ParseError> {
    parse_fixed_hex::<32>("public-key", text)
}

/// 25-byte decoded address, given in its 50-char hex form.
pub fn parse_hex_address(text: &str) -> Result<[u8; 25], ParseError> {
    parse_fixed_hex::<25>("hex-address", text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_length() {
        assert!(parse_object_id("ab").is_err());
    }

    #[test]
    fn rejects_non_hex_alphabet() {
        let almost = "zz".repeat(12);
        assert!(parse_object_id(&almost).is_err());
    }

    #[test]
    fn accepts_correct_length_and_alphabet() {
        let text = "a".repeat(24);
        assert_eq!(parse_object_id(&text).unwrap(), [0xaa; 12]);
    }
}
