//! Module: cursor
//! Responsibility: scan direction, top-k selection, and anchor
//! classification shared by every family's query builder.
//! Does not own: what a store does with a scan direction, or how a family
//! turns a classified anchor into a `TimelineMethod` name — see
//! `family::*` and `timeline::engine`.
//! Boundary: accepts rows plus a sort key extractor, or an anchor string
//! plus a family's identifier-shape priority list.

mod anchor;
mod order;

pub use anchor::{AnchorClass, IdentifierShape, classify_anchor};
pub use order::{ScanDirection, select_and_sort};
