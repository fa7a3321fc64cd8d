//! Module: family
//! Responsibility: one query builder per entity family (spec §4.3) — each
//! knows its collection, sort key and tie-breakers, identifier-anchor
//! shapes, and any pre-aggregation a family's ranking needs.
//! Does not own: anchor classification, the four Timeline operation kinds,
//! or HTTP concerns — those belong to `cursor`, `timeline`, and the
//! `timeline-api` crate respectively.
//! Boundary: a `Store` handle and a Timeline method name in, a
//! `TimelineOutcome` of the family's row type out.

pub mod accounts;
pub mod blocks;
pub mod mosaics;
pub mod namespaces;
pub mod transactions;

use crate::{
    cursor::{AnchorClass, IdentifierShape, ScanDirection, classify_anchor, select_and_sort},
    error::TimelineError,
    parser::keyword::{Duration, SentinelAxis},
    predicate::{self, Strictly},
    store::Store,
    timeline::{AnchorInput, Timeline, TimelineOutcome},
    value::SortKey,
};
use async_trait::async_trait;

/// One entity family's declarative query surface. Implementations are
/// built fresh per request (`build_timeline` is `async` and takes the
/// store) because the balance-ranked account families must resolve a
/// mosaic alias before their Timeline entries can close over a concrete
/// mosaic id (spec §4.3, §9 "Balance families' dependency on aliases") —
/// every other family ignores the store parameter and returns the same
/// shape every time.
#[async_trait]
pub trait Family<S: Store + Send + Sync + 'static>: Send + Sync {
    type Row: Send + Sync + Clone + 'static;

    /// Response envelope type tag (spec §6: `{ payload: [...], type: "..." }`).
    const TAG: &'static str;

    fn sentinel_axis(&self) -> SentinelAxis;
    fn identifier_shapes(&self) -> &'static [IdentifierShape];
    async fn build_timeline(&self, store: &S) -> Result<Timeline<S, Self::Row>, TimelineError>;
}

/// Route-handler-shaped dispatch (spec §4.4 steps 3–4, minus limit
/// sanitization which is an HTTP concern): classify the anchor, build the
/// family's Timeline, invoke the matching entry with the anchor shape that
/// entry kind needs.
pub async fn dispatch<S, F>(
    family: &F,
    store: &S,
    duration: Duration,
    anchor: &str,
    count: usize,
) -> Result<TimelineOutcome<F::Row>, TimelineError>
where
    S: Store + Send + Sync + 'static,
    F: Family<S>,
{
    let timeline = family.build_timeline(store).await?;

    let class = classify_anchor(anchor, duration, family.sentinel_axis(), family.identifier_shapes())
        .ok_or_else(|| TimelineError::invalid_argument(format!("anchor '{anchor}' not recognized for this family")))?;

    match class {
        AnchorClass::Sentinel(method) => timeline.call(&method, store, AnchorInput::None, count).await,
        AnchorClass::Identifier(method) => timeline.call(&method, store, AnchorInput::Text(anchor), count).await,
    }
}

/// Shared range-query helper every family's `From`/`Since` store method
/// delegates to (spec §4.3 "Ascending-scan, final-descending pattern"):
/// filter candidates by the lexicographic strict predicate, then keep only
/// the `count` rows nearest the scan boundary and present them descending.
///
/// `key_of` is re-evaluated at most twice per row (once to filter, once
/// paired into the kept set) rather than stored on the row itself, because
/// several families' primary sort field is an ephemeral computed attribute
/// (spec §3: "recomputed per query ... not a stored column") rather than a
/// plain field read.
#[must_use]
pub fn run_ranged_query<R>(
    rows: Vec<R>,
    key_of: impl Fn(&R) -> SortKey,
    anchor: &SortKey,
    strictly: Strictly,
    direction: ScanDirection,
    count: usize,
) -> Vec<R> {
    let pairs: Vec<(SortKey, R)> = rows
        .into_iter()
        .map(|row| (key_of(&row), row))
        .filter(|(key, _)| predicate::matches(key, anchor, strictly))
        .collect();

    select_and_sort(pairs, count, direction, |(key, _)| key)
        .into_iter()
        .map(|(_, row)| row)
        .collect()
}
