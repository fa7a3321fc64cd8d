use crate::parser::keyword::{Duration, MinMax, SentinelAxis, parse_sentinel};

/// One identifier shape a family recognizes, tried in the family's declared
/// priority order (spec §4.3: "for accounts, base32-address → hex-address →
/// public-key; for transactions, hash → object-id; …").
pub struct IdentifierShape {
    /// Suffix appended to `from`/`since` to name the Timeline entry, e.g.
    /// `"Hash"` for `fromHash`/`sinceHash`.
    pub key_name: &'static str,
    pub matches: fn(&str) -> bool,
}

impl IdentifierShape {
    #[must_use]
    pub const fn new(key_name: &'static str, matches: fn(&str) -> bool) -> Self {
        Self { key_name, matches }
    }
}

/// The Timeline entry an anchor dispatches to, distinguishing the two
/// entry shapes a caller must feed differently: sentinel entries never look
/// at the raw anchor text again, identifier entries need it for the lookup
/// (spec §4.2: `Absolute` vs `Identifier` operation kinds).
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AnchorClass {
    Sentinel(String),
    Identifier(String),
}

impl AnchorClass {
    #[must_use]
    pub fn method_name(&self) -> &str {
        match self {
            Self::Sentinel(name) | Self::Identifier(name) => name,
        }
    }
}

/// Classify an anchor string into the Timeline entry that should handle it,
/// given a family's sentinel axis and identifier-shape priority list.
///
/// Returns `None` when the anchor matches neither the sentinel set nor any
/// declared identifier shape — the caller (the route handler) turns that
/// into spec §4.3's "otherwise → invalid-argument (400-equivalent)", which
/// this layer surfaces as `409 Conflict`.
#[must_use]
pub fn classify_anchor(
    anchor: &str,
    duration: Duration,
    axis: SentinelAxis,
    identifier_shapes: &[IdentifierShape],
) -> Option<AnchorClass> {
    if let Some(min_max) = parse_sentinel(anchor, axis) {
        let suffix = match min_max {
            MinMax::Min => "Min",
            MinMax::Max => "Max",
        };
        return Some(AnchorClass::Sentinel(format!("{}{}", duration.as_str(), suffix)));
    }

    for shape in identifier_shapes {
        if (shape.matches)(anchor) {
            return Some(AnchorClass::Identifier(format!(
                "{}{}",
                duration.as_str(),
                shape.key_name
            )));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn looks_like_hex64(s: &str) -> bool {
        s.len() == 64 && s.bytes().all(|b| b.is_ascii_hexdigit())
    }

    fn looks_like_hex24(s: &str) -> bool {
        s.len() == 24 && s.bytes().all(|b| b.is_ascii_hexdigit())
    }

    #[test]
    fn sentinel_wins_over_identifier_shapes() {
        let shapes = [IdentifierShape::new("Hash", looks_like_hex64)];
        let class = classify_anchor("latest", Duration::From, SentinelAxis::Time, &shapes).unwrap();
        assert_eq!(class, AnchorClass::Sentinel("fromMax".to_string()));
    }

    #[test]
    fn first_matching_shape_in_priority_order_wins() {
        let shapes = [
            IdentifierShape::new("Hash", looks_like_hex64),
            IdentifierShape::new("Id", looks_like_hex24),
        ];
        let hash = "a".repeat(64);
        let class = classify_anchor(&hash, Duration::Since, SentinelAxis::Time, &shapes).unwrap();
        assert_eq!(class, AnchorClass::Identifier("sinceHash".to_string()));
    }

    #[test]
    fn unrecognized_anchor_is_none() {
        let shapes = [IdentifierShape::new("Hash", looks_like_hex64)];
        assert!(classify_anchor("longest", Duration::From, SentinelAxis::Time, &shapes).is_none());
    }
}
