//! Module: parser
//! Responsibility: named recognizers and converters for path segments (spec
//! §4.1) — hex identifiers of fixed byte lengths, base32 addresses,
//! non-negative integers, and the keyword sets (`duration`, sentinels,
//! transfer subfilters, transaction types).
//! Does not own: HTTP extraction, anchor-class priority per family, or
//! range-predicate construction.
//! Boundary: a path segment in, a typed value or [`ParseError`] out.

mod base32_address;
mod hex_id;
mod integer;
pub mod keyword;

pub use base32_address::parse_base32_address;
pub use hex_id::{
    parse_hash256, parse_hex_address, parse_mosaic_id, parse_namespace_id, parse_object_id,
    parse_public_key,
};
pub use integer::parse_non_negative_integer;

use std::fmt;

/// A path segment failed its recognizer. Always maps to spec §7's
/// `Invalid-argument` class (HTTP 409 via the route handler).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseError {
    pub segment: &'static str,
    pub reason: String,
}

impl ParseError {
    #[must_use]
    pub fn new(segment: &'static str, reason: impl Into<String>) -> Self {
        Self {
            segment,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {}", self.segment, self.reason)
    }
}

impl std::error::Error for ParseError {}
