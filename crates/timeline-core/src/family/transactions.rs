//! Module: family::transactions
//! Responsibility: the `transactions` / `unconfirmedTransactions` /
//! `partialTransactions` families, their by-type and by-type-with-filter
//! variants, and aggregate-inner-transaction attachment (spec §4.3
//! "Transactions", "Transactions-by-type",
//! "Transactions-by-type-with-filter").
//! Does not own: HTTP concerns, transaction codecs.
//! Boundary: a Timeline method name and count in, a page of [`TransactionPage`]
//! out — parents with their attached inner transactions.

use crate::{
    cursor::IdentifierShape,
    error::TimelineError,
    model::{HexAddress25, MosaicAlias, MosaicId8, Transaction},
    parser::keyword::{Duration, SentinelAxis, TransactionType, TransferFilter},
    store::{Store, TransactionCollection, TransactionFilter},
    timeline::{Timeline, TimelineOutcome, generate_absolute_parameters, generate_id_parameters},
    value::{I32_MAX, I32_MIN, ObjectId12, U64_MAX, U64_MIN, Value},
};
use async_trait::async_trait;
use std::{collections::HashSet, sync::Arc};

/// A transaction result row including its materialized inner transactions
/// (spec's "Aggregate transaction" glossary entry: "the timeline only ever
/// returns parents and materializes their children at serialization time").
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransactionPage {
    pub parent: Transaction,
    pub inner: Vec<Transaction>,
}

pub struct TransactionsFamily {
    pub collection: TransactionCollection,
    pub transaction_type: Option<TransactionType>,
    pub subfilter: Option<TransferFilter>,
}

impl TransactionsFamily {
    #[must_use]
    pub const fn plain(collection: TransactionCollection) -> Self {
        Self {
            collection,
            transaction_type: None,
            subfilter: None,
        }
    }

    #[must_use]
    pub const fn by_type(collection: TransactionCollection, transaction_type: TransactionType) -> Self {
        Self {
            collection,
            transaction_type: Some(transaction_type),
            subfilter: None,
        }
    }

    /// Builds a type+filter family. The `mosaic`/`multisig` subfilters are
    /// defined only for `TransactionType::Transfer` (spec §4.3
    /// "Transactions-by-type-with-filter"); any other type paired with a
    /// filter is a programming error (spec §7), not a user-correctable one,
    /// so it surfaces as `TimelineError::Internal` rather than being
    /// silently accepted and filtered.
    pub fn by_type_with_filter(
        collection: TransactionCollection,
        transaction_type: TransactionType,
        subfilter: TransferFilter,
    ) -> Result<Self, TimelineError> {
        if transaction_type != TransactionType::Transfer {
            return Err(TimelineError::internal(format!(
                "type/filter combination is only defined for the transfer type, got {transaction_type:?}"
            )));
        }
        Ok(Self {
            collection,
            transaction_type: Some(transaction_type),
            subfilter: Some(subfilter),
        })
    }
}

const IDENTIFIER_SHAPES: [IdentifierShape; 2] = [
    IdentifierShape::new("Hash", is_hash256),
    IdentifierShape::new("Id", is_object_id),
];

fn is_hash256(text: &str) -> bool {
    text.len() == 64 && text.bytes().all(|b| b.is_ascii_hexdigit())
}

fn is_object_id(text: &str) -> bool {
    text.len() == 24 && text.bytes().all(|b| b.is_ascii_hexdigit())
}

fn key_of(tx: &Transaction) -> Vec<Value> {
    vec![Value::U64(tx.height), Value::I32(tx.index)]
}

/// Fetch the candidate parent set for one collection+type, then apply the
/// `mosaic`/`multisig` subfilter if present — both joins happen here rather
/// than inside the store contract (spec §4.3).
async fn candidate_parents<S: Store>(
    store: &S,
    collection: TransactionCollection,
    transaction_type: Option<TransactionType>,
    subfilter: Option<TransferFilter>,
) -> Result<Vec<Transaction>, TimelineError> {
    let filter = match transaction_type {
        Some(t) => TransactionFilter::Type(t),
        None => TransactionFilter::None,
    };
    let rows = store.transactions_matching(collection, filter).await?;
    let parents: Vec<Transaction> = rows.into_iter().filter(|t| t.aggregate_id.is_none()).collect();

    match subfilter {
        None => Ok(parents),
        Some(TransferFilter::Mosaic) => {
            let well_known = resolve_well_known_mosaics(store).await?;
            Ok(parents
                .into_iter()
                .filter(|t| t.mosaics.iter().any(|m| !well_known.contains(&m.mosaic_id)))
                .collect())
        }
        Some(TransferFilter::Multisig) => {
            let addresses: Vec<HexAddress25> = parents
                .iter()
                .flat_map(|t| t.participant_addresses.iter().copied())
                .collect();
            let multisig = store.multisig_addresses(&addresses).await?;
            Ok(parents
                .into_iter()
                .filter(|t| t.participant_addresses.iter().any(|a| multisig.contains(a)))
                .collect())
        }
    }
}

/// The `currency`/`harvest` well-known mosaic ids, resolved fresh per
/// query (spec §9). An alias that hasn't been claimed yet is simply absent
/// from the set — unlike the balance account families, an unresolved
/// alias here doesn't 404 the whole page, it just can't disqualify any row
/// on that alias's account.
async fn resolve_well_known_mosaics<S: Store>(store: &S) -> Result<HashSet<MosaicId8>, TimelineError> {
    let mut ids = HashSet::new();
    for alias in [MosaicAlias::Currency, MosaicAlias::Harvest] {
        if let Some(id) = store.resolve_mosaic_alias(alias).await? {
            ids.insert(id);
        }
    }
    Ok(ids)
}

fn from_call<S: Store + Send + Sync + 'static>(
    collection: TransactionCollection,
    transaction_type: Option<TransactionType>,
    subfilter: Option<TransferFilter>,
) -> crate::timeline::RangeCall<S, Transaction> {
    Arc::new(move |store, anchor, count| {
        Box::pin(async move {
            let rows = candidate_parents(store, collection, transaction_type, subfilter).await?;
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

fn since_call<S: Store + Send + Sync + 'static>(
    collection: TransactionCollection,
    transaction_type: Option<TransactionType>,
    subfilter: Option<TransferFilter>,
) -> crate::timeline::RangeCall<S, Transaction> {
    Arc::new(move |store, anchor, count| {
        Box::pin(async move {
            let rows = candidate_parents(store, collection, transaction_type, subfilter).await?;
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
impl<S: Store + Send + Sync + 'static> super::Family<S> for TransactionsFamily {
    type Row = Transaction;
    const TAG: &'static str = "transaction";

    fn sentinel_axis(&self) -> SentinelAxis {
        SentinelAxis::Time
    }

    fn identifier_shapes(&self) -> &'static [IdentifierShape] {
        &IDENTIFIER_SHAPES
    }

    async fn build_timeline(&self, _store: &S) -> Result<Timeline<S, Transaction>, TimelineError> {
        let collection = self.collection;
        let transaction_type = self.transaction_type;
        let subfilter = self.subfilter;

        let timeline = Timeline::new()
            .with_entries(generate_absolute_parameters(
                || vec![U64_MIN, I32_MIN],
                || vec![U64_MAX, I32_MAX],
                from_call(collection, transaction_type, subfilter),
                since_call(collection, transaction_type, subfilter),
            ))
            .with_entries(generate_id_parameters(
                "Hash",
                Arc::new(move |store: &S, text: &str| {
                    Box::pin(async move {
                        let bytes = crate::parser::parse_hash256(text)
                            .map_err(|err| TimelineError::invalid_argument(err.to_string()))?;
                        store.transaction_by_hash(collection, &bytes).await
                    })
                }),
                Arc::new(key_of),
                from_call(collection, transaction_type, subfilter),
                since_call(collection, transaction_type, subfilter),
            ))
            .with_entries(generate_id_parameters(
                "Id",
                Arc::new(move |store: &S, text: &str| {
                    Box::pin(async move {
                        let bytes: ObjectId12 = crate::parser::parse_object_id(text)
                            .map_err(|err| TimelineError::invalid_argument(err.to_string()))?;
                        store.transaction_by_object_id(collection, &bytes).await
                    })
                }),
                Arc::new(key_of),
                from_call(collection, transaction_type, subfilter),
                since_call(collection, transaction_type, subfilter),
            ));

        Ok(timeline)
    }
}

/// Dispatch a request, then attach each returned parent's inner
/// transactions (spec §4.3 "Transactions": "for each returned parent,
/// batch-fetch and attach its inner transactions"). A failed attachment
/// does not fail the page (spec §7 "Partial-failure semantics") — it logs
/// and the parent comes back with no inner transactions.
pub async fn call<S: Store + Send + Sync + 'static>(
    family: &TransactionsFamily,
    store: &S,
    duration: Duration,
    anchor: &str,
    count: usize,
) -> Result<TimelineOutcome<TransactionPage>, TimelineError> {
    let outcome = super::dispatch(family, store, duration, anchor, count).await?;

    let parents = match outcome {
        TimelineOutcome::NotFound => return Ok(TimelineOutcome::NotFound),
        TimelineOutcome::Page(rows) => rows,
    };

    if parents.is_empty() {
        return Ok(TimelineOutcome::Page(Vec::new()));
    }

    let ids: Vec<ObjectId12> = parents.iter().map(|p| p.id).collect();
    let inner_by_parent = match store.inner_transactions(family.collection, &ids).await {
        Ok(rows) => rows,
        Err(err) => {
            tracing::warn!(error = %err, "aggregate inner-transaction attachment failed; returning parents without inner rows");
            Vec::new()
        }
    };

    let pages = parents
        .into_iter()
        .map(|parent| {
            let inner = inner_by_parent
                .iter()
                .filter(|t| t.aggregate_id == Some(parent.id))
                .cloned()
                .collect();
            TransactionPage { parent, inner }
        })
        .collect();

    Ok(TimelineOutcome::Page(pages))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Hash256;

    #[derive(Default, Clone)]
    struct FakeStore {
        transactions: Vec<Transaction>,
        multisig: HashSet<HexAddress25>,
        aliases: std::collections::HashMap<MosaicAlias, MosaicId8>,
    }

    fn tx(id: u8, height: u64, index: i32) -> Transaction {
        Transaction {
            id: [id; 12],
            height,
            index,
            hash: [id; 32],
            transaction_type: TransactionType::Transfer,
            aggregate_id: None,
            mosaics: Vec::new(),
            participant_addresses: Vec::new(),
        }
    }

    #[async_trait]
    impl Store for FakeStore {
        async fn all_blocks(&self) -> Result<Vec<crate::model::Block>, TimelineError> {
            unimplemented!()
        }
        async fn block_by_hash(&self, _hash: &Hash256) -> Result<Option<crate::model::Block>, TimelineError> {
            unimplemented!()
        }
        async fn block_by_height(&self, _height: u64) -> Result<Option<crate::model::Block>, TimelineError> {
            unimplemented!()
        }
        async fn transactions_matching(
            &self,
            _collection: TransactionCollection,
            filter: TransactionFilter,
        ) -> Result<Vec<Transaction>, TimelineError> {
            Ok(self
                .transactions
                .iter()
                .filter(|t| match filter {
                    TransactionFilter::None => true,
                    TransactionFilter::Type(ty) => t.transaction_type == ty,
                })
                .cloned()
                .collect())
        }
        async fn transaction_by_hash(
            &self,
            _collection: TransactionCollection,
            hash: &Hash256,
        ) -> Result<Option<Transaction>, TimelineError> {
            Ok(self.transactions.iter().find(|t| &t.hash == hash).cloned())
        }
        async fn transaction_by_object_id(
            &self,
            _collection: TransactionCollection,
            id: &ObjectId12,
        ) -> Result<Option<Transaction>, TimelineError> {
            Ok(self.transactions.iter().find(|t| &t.id == id).cloned())
        }
        async fn inner_transactions(
            &self,
            _collection: TransactionCollection,
            aggregate_ids: &[ObjectId12],
        ) -> Result<Vec<Transaction>, TimelineError> {
            Ok(self
                .transactions
                .iter()
                .filter(|t| t.aggregate_id.is_some_and(|a| aggregate_ids.contains(&a)))
                .cloned()
                .collect())
        }
        async fn multisig_addresses(
            &self,
            candidates: &[HexAddress25],
        ) -> Result<HashSet<HexAddress25>, TimelineError> {
            Ok(candidates.iter().filter(|a| self.multisig.contains(*a)).copied().collect())
        }
        async fn all_mosaics(&self) -> Result<Vec<crate::model::Mosaic>, TimelineError> {
            unimplemented!()
        }
        async fn mosaic_by_id(&self, _id: &MosaicId8) -> Result<Option<crate::model::Mosaic>, TimelineError> {
            unimplemented!()
        }
        async fn active_namespaces(&self) -> Result<Vec<crate::model::Namespace>, TimelineError> {
            unimplemented!()
        }
        async fn namespace_by_id(
            &self,
            _id: &crate::model::NamespaceId8,
        ) -> Result<Option<crate::model::Namespace>, TimelineError> {
            unimplemented!()
        }
        async fn namespace_by_object_id(&self, _id: &ObjectId12) -> Result<Option<crate::model::Namespace>, TimelineError> {
            unimplemented!()
        }
        async fn all_accounts(&self) -> Result<Vec<crate::model::Account>, TimelineError> {
            unimplemented!()
        }
        async fn account_by_address(&self, _address: &HexAddress25) -> Result<Option<crate::model::Account>, TimelineError> {
            unimplemented!()
        }
        async fn account_by_public_key(
            &self,
            _key: &crate::model::PublicKey32,
        ) -> Result<Option<crate::model::Account>, TimelineError> {
            unimplemented!()
        }
        async fn resolve_mosaic_alias(&self, alias: MosaicAlias) -> Result<Option<MosaicId8>, TimelineError> {
            Ok(self.aliases.get(&alias).copied())
        }
    }

    #[tokio::test]
    async fn from_max_returns_descending_page() {
        let store = FakeStore {
            transactions: vec![tx(1, 1, 0), tx(2, 2, 0), tx(3, 3, 0)],
            ..Default::default()
        };
        let family = TransactionsFamily::plain(TransactionCollection::Confirmed);
        let outcome = call(&family, &store, Duration::From, "latest", 10).await.unwrap();
        let page = outcome.into_page().unwrap();
        assert_eq!(page.iter().map(|p| p.parent.height).collect::<Vec<_>>(), vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn embedded_transactions_are_filtered_from_the_page_but_attached_as_inner() {
        let mut parent = tx(1, 5, 0);
        let mut inner = tx(2, 5, 0);
        inner.aggregate_id = Some(parent.id);
        let store = FakeStore {
            transactions: vec![parent.clone(), inner.clone()],
            ..Default::default()
        };
        let family = TransactionsFamily::plain(TransactionCollection::Confirmed);
        let outcome = call(&family, &store, Duration::From, "latest", 10).await.unwrap();
        let page = outcome.into_page().unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].parent.id, parent.id);
        assert_eq!(page[0].inner, vec![inner]);
        parent.aggregate_id = None; // sanity: parent itself stays un-embedded
        assert!(parent.aggregate_id.is_none());
    }

    #[tokio::test]
    async fn multisig_filter_keeps_only_joined_transactions() {
        let addr_a: HexAddress25 = [1u8; 25];
        let addr_b: HexAddress25 = [2u8; 25];
        let mut t1 = tx(1, 1, 0);
        t1.participant_addresses = vec![addr_a];
        let mut t2 = tx(2, 2, 0);
        t2.participant_addresses = vec![addr_b];

        let mut multisig = HashSet::new();
        multisig.insert(addr_a);
        let store = FakeStore {
            transactions: vec![t1.clone(), t2],
            multisig,
            ..Default::default()
        };
        let family =
            TransactionsFamily::by_type_with_filter(TransactionCollection::Confirmed, TransactionType::Transfer, TransferFilter::Multisig)
                .unwrap();
        let outcome = call(&family, &store, Duration::From, "latest", 10).await.unwrap();
        let page = outcome.into_page().unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].parent.id, t1.id);
    }

    #[tokio::test]
    async fn by_type_with_filter_rejects_a_non_transfer_type() {
        let err = TransactionsFamily::by_type_with_filter(
            TransactionCollection::Confirmed,
            TransactionType::RegisterNamespace,
            TransferFilter::Multisig,
        )
        .unwrap_err();
        assert_eq!(err.class(), crate::error::ErrorClass::Internal);
    }
}
