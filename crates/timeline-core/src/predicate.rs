//! Module: predicate
//! Responsibility: the lexicographic "strictly less" / "strictly greater"
//! range predicate described in spec §4.3, generic over any family's
//! sort-key shape.
//! Does not own: how a store turns the predicate into a scan (in-memory
//! linear filter, a BSON compound query, an index range) — that is the
//! store collaborator's concern.
//! Boundary: accepts a row's sort key and an anchor sort key of identical
//! shape, reports whether the row belongs strictly before/after the anchor.

use crate::value::{Value, compare_key};
use std::cmp::Ordering;

/// Which side of the anchor a `From`/`Since` query keeps.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Strictly {
    /// `From`: rows ordered strictly before the anchor.
    Less,
    /// `Since`: rows ordered strictly after the anchor.
    Greater,
}

/// Evaluate the range predicate for one row against one anchor.
///
/// For a primary key `P` with tie-breakers `T1, T2, …` this is exactly the
/// standard lexicographic expansion from spec §4.3:
/// `(P < p) OR (P = p AND T1 < t1) OR (P = p AND T1 = t1 AND T2 < t2) OR …`
/// (substituting `>` throughout for [`Strictly::Greater`]). [`compare_key`]
/// already implements that expansion as a single lexicographic comparison,
/// so this function only needs to interpret its result.
#[must_use]
pub fn matches(row_key: &[Value], anchor: &[Value], strictly: Strictly) -> bool {
    let ordering = compare_key(row_key, anchor);

    match strictly {
        Strictly::Less => ordering == Ordering::Less,
        Strictly::Greater => ordering == Ordering::Greater,
    }
}
