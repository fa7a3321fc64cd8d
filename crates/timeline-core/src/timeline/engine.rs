use super::outcome::TimelineOutcome;
use crate::{error::TimelineError, value::SortKey};
use std::{collections::HashMap, future::Future, pin::Pin, sync::Arc};

/// A boxed, send future — the minimal amount of dynamism needed to hold
/// heterogeneous store calls behind one entry shape without committing to a
/// particular async runtime trait object.
pub type BoxFut<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A store call bound into a Timeline entry. An `Arc` rather than a bare
/// `fn` pointer: most families bind plain functions here (which coerce into
/// the trait object for free), but the balance-by-mosaic account families
/// (spec §4.3, §9 "Balance families' dependency on aliases") must close
/// over a mosaic id resolved fresh for each request, so the entry has to
/// hold a real closure, not just a function name.
pub type RangeCall<St, R> =
    Arc<dyn for<'a> Fn(&'a St, SortKey, usize) -> BoxFut<'a, Result<Vec<R>, TimelineError>> + Send + Sync>;
pub type LookupCall<St, R> =
    Arc<dyn for<'a> Fn(&'a St, &'a str) -> BoxFut<'a, Result<Option<R>, TimelineError>> + Send + Sync>;
pub type ExtractFn<R> = Arc<dyn Fn(&R) -> SortKey + Send + Sync>;

/// One of the four operation kinds from spec §4.2, holding a directly-held
/// callable value rather than a name to look up at call time — the typed
/// port spec §9 calls for in place of the source's `base + 'From'/'Since'`
/// string-concatenation dispatch.
pub enum TimelineEntry<St, R> {
    /// Resolves to the empty sequence immediately, without touching the
    /// store. Used for the two combinations that are trivially empty:
    /// `from min` and `since max`.
    Empty,
    /// Calls a store method with a synthesized min/max seed tuple plus the
    /// request's `count`.
    Absolute { seed: fn() -> SortKey, call: RangeCall<St, R> },
    /// Given an already-resolved anchor record, calls a store method with
    /// keys extracted from that record.
    Record { extract: ExtractFn<R>, call: RangeCall<St, R> },
    /// Performs an id-lookup first; delegates to the same behavior as
    /// [`TimelineEntry::Record`] once the lookup resolves, or reports
    /// "not found" if it doesn't.
    Identifier {
        lookup: LookupCall<St, R>,
        extract: ExtractFn<R>,
        call: RangeCall<St, R>,
    },
}

/// What the caller can supply as an anchor when invoking a Timeline entry.
/// The three entry kinds that need anchor data each require a specific
/// shape; a mismatch is a caller bug, surfaced as `TimelineError::Internal`
/// rather than a panic, since the failure is entirely on this side of the
/// HTTP boundary (spec §7: never swallow, never guess).
pub enum AnchorInput<'a, R> {
    None,
    Text(&'a str),
    Record(&'a R),
}

/// A named set of Timeline entries for one family, assembled declaratively
/// by composing [`generate_absolute_parameters`] and
/// [`generate_id_parameters`] (spec §4.2).
pub struct Timeline<St, R> {
    entries: HashMap<String, TimelineEntry<St, R>>,
}

impl<St, R> Default for Timeline<St, R> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<St, R> Timeline<St, R> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge in a batch of `(name, entry)` pairs, as produced by
    /// [`generate_absolute_parameters`]/[`generate_id_parameters`].
    #[must_use]
    pub fn with_entries<I, N>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (N, TimelineEntry<St, R>)>,
        N: Into<String>,
    {
        for (name, entry) in entries {
            self.entries.insert(name.into(), entry);
        }
        self
    }

    #[must_use]
    pub fn has_method(&self, method: &str) -> bool {
        self.entries.contains_key(method)
    }

    /// Invoke a named entry.
    ///
    /// `count == 0` always resolves to the empty sequence without touching
    /// the store (spec §4.2 invariant), checked once here rather than in
    /// every family's store method.
    pub async fn call(
        &self,
        method: &str,
        store: &St,
        anchor: AnchorInput<'_, R>,
        count: usize,
    ) -> Result<TimelineOutcome<R>, TimelineError> {
        let Some(entry) = self.entries.get(method) else {
            return Err(TimelineError::invalid_argument(format!(
                "no timeline method named '{method}'"
            )));
        };

        match entry {
            TimelineEntry::Empty => Ok(TimelineOutcome::Page(Vec::new())),

            TimelineEntry::Absolute { seed, call } => {
                if count == 0 {
                    return Ok(TimelineOutcome::Page(Vec::new()));
                }
                let args = seed();
                Ok(TimelineOutcome::Page(call(store, args, count).await?))
            }

            TimelineEntry::Record { extract, call } => {
                let AnchorInput::Record(record) = anchor else {
                    return Err(TimelineError::internal(
                        "record entry invoked without a resolved anchor record",
                    ));
                };
                if count == 0 {
                    return Ok(TimelineOutcome::Page(Vec::new()));
                }
                let args = extract(record);
                Ok(TimelineOutcome::Page(call(store, args, count).await?))
            }

            TimelineEntry::Identifier { lookup, extract, call } => {
                let AnchorInput::Text(text) = anchor else {
                    return Err(TimelineError::internal(
                        "identifier entry invoked without raw anchor text",
                    ));
                };
                let Some(record) = lookup(store, text).await? else {
                    return Ok(TimelineOutcome::NotFound);
                };
                if count == 0 {
                    return Ok(TimelineOutcome::Page(Vec::new()));
                }
                let args = extract(&record);
                Ok(TimelineOutcome::Page(call(store, args, count).await?))
            }
        }
    }
}

/// Emit the four entries every family gets from its absolute (sentinel)
/// anchors: `fromMin` (empty), `fromMax` (absolute → base+`From`),
/// `sinceMin` (absolute → base+`Since`), `sinceMax` (empty). Spec §4.2:
/// "`from min` and `since max` are trivially empty."
#[must_use]
pub fn generate_absolute_parameters<St, R>(
    min_args: fn() -> SortKey,
    max_args: fn() -> SortKey,
    from_call: RangeCall<St, R>,
    since_call: RangeCall<St, R>,
) -> [(&'static str, TimelineEntry<St, R>); 4] {
    [
        ("fromMin", TimelineEntry::Empty),
        (
            "fromMax",
            TimelineEntry::Absolute {
                seed: max_args,
                call: from_call,
            },
        ),
        (
            "sinceMin",
            TimelineEntry::Absolute {
                seed: min_args,
                call: since_call,
            },
        ),
        ("sinceMax", TimelineEntry::Empty),
    ]
}

/// Emit the two identifier-anchor entries for one key name: `from<KeyName>`
/// and `since<KeyName>`, both of kind [`TimelineEntry::Identifier`].
#[must_use]
pub fn generate_id_parameters<St, R>(
    key_name: &'static str,
    lookup: LookupCall<St, R>,
    extract: ExtractFn<R>,
    from_call: RangeCall<St, R>,
    since_call: RangeCall<St, R>,
) -> [(String, TimelineEntry<St, R>); 2] {
    [
        (
            format!("from{key_name}"),
            TimelineEntry::Identifier {
                lookup: Arc::clone(&lookup),
                extract: Arc::clone(&extract),
                call: from_call,
            },
        ),
        (
            format!("since{key_name}"),
            TimelineEntry::Identifier {
                lookup,
                extract,
                call: since_call,
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    type Row = u64;

    fn key(n: u64) -> SortKey {
        vec![Value::U64(n)]
    }

    struct FakeStore {
        rows: Vec<Row>,
    }

    fn range_call(
        descending: bool,
    ) -> RangeCall<FakeStore, Row> {
        Arc::new(move |store: &FakeStore, anchor: SortKey, count: usize| {
            let rows = store.rows.clone();
            Box::pin(async move {
                let anchor_n = match anchor[0] {
                    Value::U64(n) => n,
                    _ => unreachable!(),
                };
                let mut matching: Vec<Row> = rows
                    .into_iter()
                    .filter(|r| if descending { *r < anchor_n } else { *r > anchor_n })
                    .collect();
                matching.sort();
                if !descending {
                    matching.reverse();
                }
                matching.truncate(count);
                if descending {
                    matching.sort_by(|a, b| b.cmp(a));
                } else {
                    matching.sort_by(|a, b| b.cmp(a));
                }
                Ok(matching)
            })
        })
    }

    fn build_timeline() -> Timeline<FakeStore, Row> {
        Timeline::new()
            .with_entries(generate_absolute_parameters(
                || key(0),
                || key(u64::MAX),
                range_call(true),
                range_call(false),
            ))
            .with_entries(generate_id_parameters(
                "Id",
                Arc::new(|store: &FakeStore, text: &str| {
                    let found = text.parse::<u64>().ok().filter(|n| store.rows.contains(n));
                    Box::pin(async move { Ok(found) })
                }),
                Arc::new(|row: &Row| key(*row)),
                range_call(true),
                range_call(false),
            ))
    }

    #[tokio::test]
    async fn zero_count_short_circuits_before_touching_store() {
        let timeline = build_timeline();
        let store = FakeStore { rows: vec![1, 2, 3] };
        let outcome = timeline
            .call("fromMax", &store, AnchorInput::None, 0)
            .await
            .unwrap();
        assert_eq!(outcome, TimelineOutcome::Page(vec![]));
    }

    #[tokio::test]
    async fn from_min_and_since_max_are_always_empty() {
        let timeline = build_timeline();
        let store = FakeStore { rows: vec![1, 2, 3] };
        assert_eq!(
            timeline.call("fromMin", &store, AnchorInput::None, 10).await.unwrap(),
            TimelineOutcome::Page(vec![])
        );
        assert_eq!(
            timeline.call("sinceMax", &store, AnchorInput::None, 10).await.unwrap(),
            TimelineOutcome::Page(vec![])
        );
    }

    #[tokio::test]
    async fn identifier_miss_is_not_found() {
        let timeline = build_timeline();
        let store = FakeStore { rows: vec![1, 2, 3] };
        let outcome = timeline
            .call("fromId", &store, AnchorInput::Text("99"), 5)
            .await
            .unwrap();
        assert_eq!(outcome, TimelineOutcome::NotFound);
    }

    #[tokio::test]
    async fn unknown_method_is_invalid_argument() {
        let timeline = build_timeline();
        let store = FakeStore { rows: vec![1] };
        let err = timeline
            .call("fromLongest", &store, AnchorInput::None, 5)
            .await
            .unwrap_err();
        assert!(matches!(err, TimelineError::InvalidArgument { .. }));
    }
}
