//! Module: family::mosaics
//! Responsibility: the `mosaics` family — composite sort on
//! `(startHeight, objectId)`, single identifier anchor shape (spec §4.3
//! "Mosaics / Namespaces").
//! Does not own: HTTP concerns, or mosaic supply/definition semantics.
//! Boundary: a Timeline method name and count in, a page of `Mosaic` out.

use crate::{
    cursor::IdentifierShape,
    error::TimelineError,
    model::Mosaic,
    parser::keyword::SentinelAxis,
    store::Store,
    timeline::{Timeline, generate_absolute_parameters, generate_id_parameters},
    value::{OBJECT_ID_MAX, OBJECT_ID_MIN, U64_MAX, U64_MIN, Value},
};
use async_trait::async_trait;
use std::sync::Arc;

pub struct MosaicsFamily;

const IDENTIFIER_SHAPES: [IdentifierShape; 1] = [IdentifierShape::new("Id", is_mosaic_id)];

fn is_mosaic_id(text: &str) -> bool {
    text.len() == 16 && text.bytes().all(|b| b.is_ascii_hexdigit())
}

fn key_of(mosaic: &Mosaic) -> Vec<Value> {
    vec![Value::U64(mosaic.start_height), Value::ObjectId(mosaic.object_id)]
}

fn from_call<S: Store + Send + Sync + 'static>() -> crate::timeline::RangeCall<S, Mosaic> {
    Arc::new(|store, anchor, count| {
        Box::pin(async move {
            let rows = store.all_mosaics().await?;
            Ok(super::run_ranged_query(
                rows,
                key_of,
                &anchor,
                crate::predicate::Strictly::Less,
                crate::cursor::ScanDirection::Descending,
                count,
            ))
        })
    })
}

fn since_call<S: Store + Send + Sync + 'static>() -> crate::timeline::RangeCall<S, Mosaic> {
    Arc::new(|store, anchor, count| {
        Box::pin(async move {
            let rows = store.all_mosaics().await?;
            Ok(super::run_ranged_query(
                rows,
                key_of,
                &anchor,
                crate::predicate::Strictly::Greater,
                crate::cursor::ScanDirection::Ascending,
                count,
            ))
        })
    })
}

#[async_trait]
impl<S: Store + Send + Sync + 'static> super::Family<S> for MosaicsFamily {
    type Row = Mosaic;
    const TAG: &'static str = "mosaic";

    fn sentinel_axis(&self) -> SentinelAxis {
        SentinelAxis::Time
    }

    fn identifier_shapes(&self) -> &'static [IdentifierShape] {
        &IDENTIFIER_SHAPES
    }

    async fn build_timeline(&self, _store: &S) -> Result<Timeline<S, Mosaic>, TimelineError> {
        let timeline = Timeline::new()
            .with_entries(generate_absolute_parameters(
                || vec![U64_MIN, OBJECT_ID_MIN],
                || vec![U64_MAX, OBJECT_ID_MAX],
                from_call(),
                since_call(),
            ))
            .with_entries(generate_id_parameters(
                "Id",
                Arc::new(|store: &S, text: &str| {
                    Box::pin(async move {
                        let id = crate::parser::parse_mosaic_id(text)
                            .map_err(|err| TimelineError::invalid_argument(err.to_string()))?;
                        store.mosaic_by_id(&id).await
                    })
                }),
                Arc::new(key_of),
                from_call(),
                since_call(),
            ));

        Ok(timeline)
    }
}

pub async fn call<S: Store + Send + Sync + 'static>(
    store: &S,
    duration: crate::parser::keyword::Duration,
    anchor: &str,
    count: usize,
) -> Result<crate::timeline::TimelineOutcome<Mosaic>, TimelineError> {
    super::dispatch(&MosaicsFamily, store, duration, anchor, count).await
}
