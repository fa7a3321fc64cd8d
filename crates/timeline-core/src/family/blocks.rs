//! Module: family::blocks
//! Responsibility: the `blocks` family (spec §4.3 "Blocks" — the one family
//! whose sort key is unique, so it clamps an explicit height window instead
//! of running the shared lexicographic predicate).
//! Does not own: HTTP concerns, or how `Store` persists blocks.
//! Boundary: a Timeline method name and count in, a page of `Block` out.

use crate::{
    cursor::IdentifierShape,
    error::TimelineError,
    model::Block,
    parser::keyword::SentinelAxis,
    store::Store,
    timeline::{Timeline, generate_absolute_parameters, generate_id_parameters},
    value::{U64_MAX, U64_MIN, Value},
};
use async_trait::async_trait;
use std::sync::Arc;

pub struct BlocksFamily;

const IDENTIFIER_SHAPES: [IdentifierShape; 2] = [
    IdentifierShape::new("Hash", is_hash256),
    IdentifierShape::new("Height", is_plain_integer),
];

fn is_hash256(text: &str) -> bool {
    text.len() == 64 && text.bytes().all(|b| b.is_ascii_hexdigit())
}

fn is_plain_integer(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

fn target_height(anchor: &[Value]) -> u64 {
    match anchor.first() {
        Some(Value::U64(n)) => *n,
        _ => unreachable!("blocks family keys are always a single U64 height"),
    }
}

/// `From(height)`: range `[max(1, target-count), min(target, chainHeight+1))`
/// sorted descending (spec §4.3 "Blocks").
async fn query_from<S: Store>(store: &S, anchor: crate::value::SortKey, count: usize) -> Result<Vec<Block>, TimelineError> {
    let target = target_height(&anchor);
    let rows = store.all_blocks().await?;
    let chain_height = rows.iter().map(|b| b.height).max().unwrap_or(0);

    let start = target.saturating_sub(count as u64).max(1);
    let end = target.min(chain_height + 1);

    let mut page: Vec<Block> = rows
        .into_iter()
        .filter(|b| b.height >= start && b.height < end)
        .collect();
    page.sort_by(|a, b| b.height.cmp(&a.height));
    page.truncate(count);
    Ok(page)
}

/// `Since(height)`: range `(min(target, chainHeight+1), start+count]` sorted
/// descending. A request anchored above the tip stays empty even as the
/// chain grows (spec §9 "Open questions").
async fn query_since<S: Store>(store: &S, anchor: crate::value::SortKey, count: usize) -> Result<Vec<Block>, TimelineError> {
    let target = target_height(&anchor);
    let rows = store.all_blocks().await?;
    let chain_height = rows.iter().map(|b| b.height).max().unwrap_or(0);

    let start = target.min(chain_height + 1);
    let end = start.saturating_add(count as u64);

    let mut page: Vec<Block> = rows
        .into_iter()
        .filter(|b| b.height > start && b.height <= end)
        .collect();
    page.sort_by(|a, b| b.height.cmp(&a.height));
    page.truncate(count);
    Ok(page)
}

fn from_call<S: Store + Send + Sync + 'static>() -> crate::timeline::RangeCall<S, Block> {
    Arc::new(|store, anchor, count| Box::pin(query_from(store, anchor, count)))
}

fn since_call<S: Store + Send + Sync + 'static>() -> crate::timeline::RangeCall<S, Block> {
    Arc::new(|store, anchor, count| Box::pin(query_since(store, anchor, count)))
}

#[async_trait]
impl<S: Store + Send + Sync + 'static> super::Family<S> for BlocksFamily {
    type Row = Block;
    const TAG: &'static str = "block";

    fn sentinel_axis(&self) -> SentinelAxis {
        SentinelAxis::Time
    }

    fn identifier_shapes(&self) -> &'static [IdentifierShape] {
        &IDENTIFIER_SHAPES
    }

    async fn build_timeline(&self, _store: &S) -> Result<Timeline<S, Block>, TimelineError> {
        let timeline = Timeline::new()
            .with_entries(generate_absolute_parameters(
                || vec![U64_MIN],
                || vec![U64_MAX],
                from_call(),
                since_call(),
            ))
            .with_entries(generate_id_parameters(
                "Hash",
                Arc::new(|store: &S, text: &str| {
                    Box::pin(async move {
                        let bytes = crate::parser::parse_hash256(text)
                            .map_err(|err| TimelineError::invalid_argument(err.to_string()))?;
                        store.block_by_hash(&bytes).await
                    })
                }),
                Arc::new(|block: &Block| vec![Value::U64(block.height)]),
                from_call(),
                since_call(),
            ))
            .with_entries(generate_id_parameters(
                "Height",
                Arc::new(|store: &S, text: &str| {
                    Box::pin(async move {
                        let height = crate::parser::parse_non_negative_integer(text)
                            .map_err(|err| TimelineError::invalid_argument(err.to_string()))?;
                        store.block_by_height(height).await
                    })
                }),
                Arc::new(|block: &Block| vec![Value::U64(block.height)]),
                from_call(),
                since_call(),
            ));

        Ok(timeline)
    }
}

/// Dispatch one request against the blocks family: classify, resolve the
/// anchor if needed, invoke the matching Timeline method.
pub async fn call<S: Store + Send + Sync + 'static>(
    store: &S,
    duration: crate::parser::keyword::Duration,
    anchor: &str,
    count: usize,
) -> Result<crate::timeline::TimelineOutcome<Block>, TimelineError> {
    super::dispatch(&BlocksFamily, store, duration, anchor, count).await
}
