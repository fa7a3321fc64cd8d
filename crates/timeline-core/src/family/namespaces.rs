//! Module: family::namespaces
//! Responsibility: the `namespaces` family — composite sort on
//! `(startHeight, objectId)`, two identifier anchor shapes tried in
//! priority order (spec §4.3 "Mosaics / Namespaces": namespace-id lookup
//! must tolerate three depth levels and require the row be active — that
//! tolerance lives in the `Store` implementation, not here).
//! Does not own: HTTP concerns, namespace alias registration semantics.
//! Boundary: a Timeline method name and count in, a page of `Namespace` out.

use crate::{
    cursor::IdentifierShape,
    error::TimelineError,
    model::Namespace,
    parser::keyword::SentinelAxis,
    store::Store,
    timeline::{Timeline, generate_absolute_parameters, generate_id_parameters},
    value::{OBJECT_ID_MAX, OBJECT_ID_MIN, U64_MAX, U64_MIN, Value},
};
use async_trait::async_trait;
use std::sync::Arc;

pub struct NamespacesFamily;

const IDENTIFIER_SHAPES: [IdentifierShape; 2] = [
    IdentifierShape::new("Id", is_namespace_id),
    IdentifierShape::new("ObjectId", is_object_id),
];

fn is_namespace_id(text: &str) -> bool {
    text.len() == 16 && text.bytes().all(|b| b.is_ascii_hexdigit())
}

fn is_object_id(text: &str) -> bool {
    text.len() == 24 && text.bytes().all(|b| b.is_ascii_hexdigit())
}

fn key_of(namespace: &Namespace) -> Vec<Value> {
    vec![Value::U64(namespace.start_height), Value::ObjectId(namespace.object_id)]
}

fn from_call<S: Store + Send + Sync + 'static>() -> crate::timeline::RangeCall<S, Namespace> {
    Arc::new(|store, anchor, count| {
        Box::pin(async move {
            let rows = store.active_namespaces().await?;
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

fn since_call<S: Store + Send + Sync + 'static>() -> crate::timeline::RangeCall<S, Namespace> {
    Arc::new(|store, anchor, count| {
        Box::pin(async move {
            let rows = store.active_namespaces().await?;
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
impl<S: Store + Send + Sync + 'static> super::Family<S> for NamespacesFamily {
    type Row = Namespace;
    const TAG: &'static str = "namespace";

    fn sentinel_axis(&self) -> SentinelAxis {
        SentinelAxis::Time
    }

    fn identifier_shapes(&self) -> &'static [IdentifierShape] {
        &IDENTIFIER_SHAPES
    }

    async fn build_timeline(&self, _store: &S) -> Result<Timeline<S, Namespace>, TimelineError> {
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
                        let id = crate::parser::parse_namespace_id(text)
                            .map_err(|err| TimelineError::invalid_argument(err.to_string()))?;
                        store.namespace_by_id(&id).await
                    })
                }),
                Arc::new(key_of),
                from_call(),
                since_call(),
            ))
            .with_entries(generate_id_parameters(
                "ObjectId",
                Arc::new(|store: &S, text: &str| {
                    Box::pin(async move {
                        let id = crate::parser::parse_object_id(text)
                            .map_err(|err| TimelineError::invalid_argument(err.to_string()))?;
                        store.namespace_by_object_id(&id).await
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
) -> Result<crate::timeline::TimelineOutcome<Namespace>, TimelineError> {
    super::dispatch(&NamespacesFamily, store, duration, anchor, count).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parser::keyword::Duration, store::TransactionCollection};

    #[derive(Default)]
    struct FakeStore {
        namespaces: Vec<Namespace>,
    }

    fn namespace(id: u8, start_height: u64, object_id: u8, active: bool) -> Namespace {
        Namespace {
            levels: [Some([id; 8]), None, None],
            depth: 1,
            active,
            start_height,
            object_id: [object_id; 12],
        }
    }

    /// A sub-namespace carrying its ancestors' ids in the shallower levels
    /// (e.g. `foo.bar` has `foo`'s id at `levels[0]`) and its own id at
    /// `levels[depth - 1]`.
    fn sub_namespace(levels: [Option<u8>; 3], depth: u8, start_height: u64, object_id: u8, active: bool) -> Namespace {
        Namespace {
            levels: [levels[0].map(|b| [b; 8]), levels[1].map(|b| [b; 8]), levels[2].map(|b| [b; 8])],
            depth,
            active,
            start_height,
            object_id: [object_id; 12],
        }
    }

    #[async_trait]
    impl Store for FakeStore {
        async fn all_blocks(&self) -> Result<Vec<crate::model::Block>, TimelineError> {
            unimplemented!()
        }
        async fn block_by_hash(&self, _hash: &[u8; 32]) -> Result<Option<crate::model::Block>, TimelineError> {
            unimplemented!()
        }
        async fn block_by_height(&self, _height: u64) -> Result<Option<crate::model::Block>, TimelineError> {
            unimplemented!()
        }
        async fn transactions_matching(
            &self,
            _collection: TransactionCollection,
            _filter: crate::store::TransactionFilter,
        ) -> Result<Vec<crate::model::Transaction>, TimelineError> {
            unimplemented!()
        }
        async fn transaction_by_hash(
            &self,
            _collection: TransactionCollection,
            _hash: &[u8; 32],
        ) -> Result<Option<crate::model::Transaction>, TimelineError> {
            unimplemented!()
        }
        async fn transaction_by_object_id(
            &self,
            _collection: TransactionCollection,
            _id: &crate::value::ObjectId12,
        ) -> Result<Option<crate::model::Transaction>, TimelineError> {
            unimplemented!()
        }
        async fn inner_transactions(
            &self,
            _collection: TransactionCollection,
            _aggregate_ids: &[crate::value::ObjectId12],
        ) -> Result<Vec<crate::model::Transaction>, TimelineError> {
            unimplemented!()
        }
        async fn multisig_addresses(
            &self,
            _candidates: &[crate::model::HexAddress25],
        ) -> Result<std::collections::HashSet<crate::model::HexAddress25>, TimelineError> {
            unimplemented!()
        }
        async fn all_mosaics(&self) -> Result<Vec<crate::model::Mosaic>, TimelineError> {
            unimplemented!()
        }
        async fn mosaic_by_id(&self, _id: &crate::model::MosaicId8) -> Result<Option<crate::model::Mosaic>, TimelineError> {
            unimplemented!()
        }
        async fn active_namespaces(&self) -> Result<Vec<Namespace>, TimelineError> {
            Ok(self.namespaces.iter().filter(|n| n.active).cloned().collect())
        }
        async fn namespace_by_id(&self, id: &crate::model::NamespaceId8) -> Result<Option<Namespace>, TimelineError> {
            Ok(self.namespaces.iter().find(|n| n.active && n.identifies(*id)).cloned())
        }
        async fn namespace_by_object_id(&self, id: &crate::value::ObjectId12) -> Result<Option<Namespace>, TimelineError> {
            Ok(self.namespaces.iter().find(|n| &n.object_id == id).cloned())
        }
        async fn all_accounts(&self) -> Result<Vec<crate::model::Account>, TimelineError> {
            unimplemented!()
        }
        async fn account_by_address(
            &self,
            _address: &crate::model::HexAddress25,
        ) -> Result<Option<crate::model::Account>, TimelineError> {
            unimplemented!()
        }
        async fn account_by_public_key(
            &self,
            _key: &crate::model::PublicKey32,
        ) -> Result<Option<crate::model::Account>, TimelineError> {
            unimplemented!()
        }
        async fn resolve_mosaic_alias(
            &self,
            _alias: crate::model::MosaicAlias,
        ) -> Result<Option<crate::model::MosaicId8>, TimelineError> {
            unimplemented!()
        }
    }

    #[tokio::test]
    async fn inactive_namespace_is_invisible_to_id_lookup() {
        let store = FakeStore {
            namespaces: vec![namespace(1, 10, 1, false)],
        };
        let id_hex = hex::encode([1u8; 8]);
        let outcome = call(&store, Duration::From, &id_hex, 10).await.unwrap();
        assert_eq!(outcome, crate::timeline::TimelineOutcome::NotFound);
    }

    #[tokio::test]
    async fn from_max_orders_descending_by_start_height() {
        let store = FakeStore {
            namespaces: vec![namespace(1, 5, 1, true), namespace(2, 15, 2, true)],
        };
        let outcome = call(&store, Duration::From, "latest", 10).await.unwrap();
        let page = outcome.into_page().unwrap();
        assert_eq!(page.iter().map(|n| n.start_height).collect::<Vec<_>>(), vec![15, 5]);
    }

    #[tokio::test]
    async fn id_shared_with_an_ancestor_level_does_not_match_the_ancestor_lookup() {
        // `foo.bar` (depth 2) carries `foo`'s id at levels[0] and its own id
        // at levels[1]. A lookup for `foo`'s id must resolve the depth-1 row
        // `foo`, not this depth-2 sub-namespace, even though `foo`'s id also
        // sits in this row's levels array.
        let ancestor_id = 1u8;
        let own_id = 2u8;
        let store = FakeStore {
            namespaces: vec![
                sub_namespace([Some(ancestor_id), None, None], 1, 10, 1, true),
                sub_namespace([Some(ancestor_id), Some(own_id), None], 2, 20, 2, true),
            ],
        };
        let id_hex = hex::encode([ancestor_id; 8]);
        let outcome = call(&store, Duration::From, &id_hex, 10).await.unwrap();
        let page = outcome.into_page().unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].start_height, 10);
    }

    #[tokio::test]
    async fn depth_three_namespace_matches_only_on_its_own_level() {
        let store = FakeStore {
            namespaces: vec![sub_namespace([Some(1), Some(2), Some(3)], 3, 30, 3, true)],
        };

        let own_id_hex = hex::encode([3u8; 8]);
        let outcome = call(&store, Duration::From, &own_id_hex, 10).await.unwrap();
        assert_eq!(outcome.into_page().unwrap().len(), 1);

        let ancestor_id_hex = hex::encode([1u8; 8]);
        let outcome = call(&store, Duration::From, &ancestor_id_hex, 10).await.unwrap();
        assert_eq!(outcome, crate::timeline::TimelineOutcome::NotFound);
    }
}
