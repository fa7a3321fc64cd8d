//! Module: family::accounts
//! Responsibility: the four account-ranking families — by importance, by
//! harvested blocks, by harvested fees, by balance in a well-known mosaic
//! (spec §4.3 "Accounts (all variants)") — each sorting on an ephemeral
//! computed attribute recomputed per query, never a stored column.
//! Does not own: HTTP concerns, importance/harvest computation itself
//! (that belongs to the indexer; this only reads the already-computed
//! buckets off the row).
//! Boundary: a Timeline method name and count in, a page of `Account` out.

use crate::{
    cursor::IdentifierShape,
    error::TimelineError,
    model::{Account, MosaicAlias, MosaicId8},
    parser::keyword::SentinelAxis,
    store::Store,
    timeline::{Timeline, generate_absolute_parameters, generate_id_parameters},
    value::{OBJECT_ID_MAX, OBJECT_ID_MIN, U64_MAX, U64_MIN, Value},
};
use async_trait::async_trait;
use std::sync::Arc;

/// Which ephemeral attribute an accounts query ranks on (spec §4.3
/// "Accounts (all variants)").
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AccountRanking {
    Importance,
    HarvestedBlocks,
    HarvestedFees,
    /// Balance in a well-known mosaic, resolved through its namespace
    /// alias (`currency` / `harvest` / `xem`) fresh per query.
    Balance(MosaicAlias),
}

pub struct AccountsFamily {
    pub ranking: AccountRanking,
}

impl AccountsFamily {
    #[must_use]
    pub const fn new(ranking: AccountRanking) -> Self {
        Self { ranking }
    }
}

const IDENTIFIER_SHAPES: [IdentifierShape; 3] = [
    IdentifierShape::new("Base32Address", is_base32_address),
    IdentifierShape::new("HexAddress", is_hex_address),
    IdentifierShape::new("PublicKey", is_public_key),
];

fn is_base32_address(text: &str) -> bool {
    crate::parser::parse_base32_address(text).is_ok()
}

fn is_hex_address(text: &str) -> bool {
    text.len() == 50 && text.bytes().all(|b| b.is_ascii_hexdigit())
}

fn is_public_key(text: &str) -> bool {
    text.len() == 64 && text.bytes().all(|b| b.is_ascii_hexdigit())
}

/// The ephemeral primary sort value for one ranking (spec §4.3): the last
/// importance snapshot, the cardinality of the activity-bucket array, the
/// sum of fees across it, or the sum of mosaic amounts matching a resolved
/// mosaic id.
fn primary_value(ranking: AccountRanking, mosaic_id: Option<MosaicId8>, account: &Account) -> u64 {
    match ranking {
        AccountRanking::Importance => account.importances.last().copied().unwrap_or(0),
        AccountRanking::HarvestedBlocks => account.activity_buckets.len() as u64,
        AccountRanking::HarvestedFees => account.activity_buckets.iter().map(|b| b.total_fees_paid).sum(),
        AccountRanking::Balance(_) => {
            let Some(mosaic_id) = mosaic_id else { return 0 };
            account
                .mosaics
                .iter()
                .filter(|m| m.mosaic_id == mosaic_id)
                .map(|m| m.amount)
                .sum()
        }
    }
}

fn key_of(ranking: AccountRanking, mosaic_id: Option<MosaicId8>, account: &Account) -> Vec<Value> {
    vec![
        Value::U64(primary_value(ranking, mosaic_id, account)),
        Value::U64(account.public_key_height),
        Value::ObjectId(account.object_id),
    ]
}

fn from_call<S: Store + Send + Sync + 'static>(
    ranking: AccountRanking,
    mosaic_id: Option<MosaicId8>,
) -> crate::timeline::RangeCall<S, Account> {
    Arc::new(move |store, anchor, count| {
        Box::pin(async move {
            let rows = store.all_accounts().await?;
            Ok(super::run_ranged_query(
                rows,
                |a| key_of(ranking, mosaic_id, a),
                &anchor,
                crate::predicate::Strictly::Less,
                crate::cursor::ScanDirection::Descending,
                count,
            ))
        })
    })
}

fn since_call<S: Store + Send + Sync + 'static>(
    ranking: AccountRanking,
    mosaic_id: Option<MosaicId8>,
) -> crate::timeline::RangeCall<S, Account> {
    Arc::new(move |store, anchor, count| {
        Box::pin(async move {
            let rows = store.all_accounts().await?;
            Ok(super::run_ranged_query(
                rows,
                |a| key_of(ranking, mosaic_id, a),
                &anchor,
                crate::predicate::Strictly::Greater,
                crate::cursor::ScanDirection::Ascending,
                count,
            ))
        })
    })
}

#[async_trait]
impl<S: Store + Send + Sync + 'static> super::Family<S> for AccountsFamily {
    type Row = Account;
    const TAG: &'static str = "account";

    fn sentinel_axis(&self) -> SentinelAxis {
        SentinelAxis::Quantity
    }

    fn identifier_shapes(&self) -> &'static [IdentifierShape] {
        &IDENTIFIER_SHAPES
    }

    async fn build_timeline(&self, store: &S) -> Result<Timeline<S, Account>, TimelineError> {
        let mosaic_id = match self.ranking {
            AccountRanking::Balance(alias) => Some(
                store
                    .resolve_mosaic_alias(alias)
                    .await?
                    .ok_or(TimelineError::NotFound)?,
            ),
            _ => None,
        };
        let ranking = self.ranking;

        let timeline = Timeline::new()
            .with_entries(generate_absolute_parameters(
                || vec![U64_MIN, U64_MIN, OBJECT_ID_MIN],
                || vec![U64_MAX, U64_MAX, OBJECT_ID_MAX],
                from_call(ranking, mosaic_id),
                since_call(ranking, mosaic_id),
            ))
            .with_entries(generate_id_parameters(
                "Base32Address",
                Arc::new(|store: &S, text: &str| {
                    Box::pin(async move {
                        let address = crate::parser::parse_base32_address(text)
                            .map_err(|err| TimelineError::invalid_argument(err.to_string()))?;
                        store.account_by_address(&address).await
                    })
                }),
                Arc::new(move |a: &Account| key_of(ranking, mosaic_id, a)),
                from_call(ranking, mosaic_id),
                since_call(ranking, mosaic_id),
            ))
            .with_entries(generate_id_parameters(
                "HexAddress",
                Arc::new(|store: &S, text: &str| {
                    Box::pin(async move {
                        let address = crate::parser::parse_hex_address(text)
                            .map_err(|err| TimelineError::invalid_argument(err.to_string()))?;
                        store.account_by_address(&address).await
                    })
                }),
                Arc::new(move |a: &Account| key_of(ranking, mosaic_id, a)),
                from_call(ranking, mosaic_id),
                since_call(ranking, mosaic_id),
            ))
            .with_entries(generate_id_parameters(
                "PublicKey",
                Arc::new(|store: &S, text: &str| {
                    Box::pin(async move {
                        let key = crate::parser::parse_public_key(text)
                            .map_err(|err| TimelineError::invalid_argument(err.to_string()))?;
                        store.account_by_public_key(&key).await
                    })
                }),
                Arc::new(move |a: &Account| key_of(ranking, mosaic_id, a)),
                from_call(ranking, mosaic_id),
                since_call(ranking, mosaic_id),
            ));

        Ok(timeline)
    }
}

pub async fn call<S: Store + Send + Sync + 'static>(
    ranking: AccountRanking,
    store: &S,
    duration: crate::parser::keyword::Duration,
    anchor: &str,
    count: usize,
) -> Result<crate::timeline::TimelineOutcome<Account>, TimelineError> {
    let family = AccountsFamily::new(ranking);
    super::dispatch(&family, store, duration, anchor, count).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parser::keyword::Duration, store::TransactionCollection};
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakeStore {
        accounts: Vec<Account>,
        aliases: HashMap<MosaicAlias, MosaicId8>,
    }

    fn account(object_id: u8, importances: Vec<u64>, harvested_fees: u64, harvested_blocks: usize) -> Account {
        Account {
            address: [object_id; 25],
            public_key: None,
            public_key_height: 0,
            object_id: [object_id; 12],
            importances,
            activity_buckets: (0..harvested_blocks)
                .map(|_| crate::model::ActivityBucket {
                    total_fees_paid: harvested_fees / harvested_blocks.max(1) as u64,
                })
                .collect(),
            mosaics: Vec::new(),
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
        async fn active_namespaces(&self) -> Result<Vec<crate::model::Namespace>, TimelineError> {
            unimplemented!()
        }
        async fn namespace_by_id(
            &self,
            _id: &crate::model::NamespaceId8,
        ) -> Result<Option<crate::model::Namespace>, TimelineError> {
            unimplemented!()
        }
        async fn namespace_by_object_id(
            &self,
            _id: &crate::value::ObjectId12,
        ) -> Result<Option<crate::model::Namespace>, TimelineError> {
            unimplemented!()
        }
        async fn all_accounts(&self) -> Result<Vec<Account>, TimelineError> {
            Ok(self.accounts.clone())
        }
        async fn account_by_address(&self, address: &crate::model::HexAddress25) -> Result<Option<Account>, TimelineError> {
            Ok(self.accounts.iter().find(|a| &a.address == address).cloned())
        }
        async fn account_by_public_key(&self, key: &crate::model::PublicKey32) -> Result<Option<Account>, TimelineError> {
            Ok(self.accounts.iter().find(|a| a.public_key == Some(*key)).cloned())
        }
        async fn resolve_mosaic_alias(&self, alias: MosaicAlias) -> Result<Option<MosaicId8>, TimelineError> {
            Ok(self.aliases.get(&alias).copied())
        }
    }

    #[tokio::test]
    async fn importance_from_most_orders_descending_with_tie_breaker() {
        let store = FakeStore {
            accounts: vec![account(1, vec![10], 0, 0), account(2, vec![30], 0, 0), account(3, vec![30], 0, 0)],
            ..Default::default()
        };
        let outcome = call(AccountRanking::Importance, &store, Duration::From, "most", 10)
            .await
            .unwrap();
        let page = outcome.into_page().unwrap();
        assert_eq!(page.iter().map(|a| a.object_id[0]).collect::<Vec<_>>(), vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn balance_family_404s_on_unresolved_alias() {
        let store = FakeStore::default();
        let err = call(
            AccountRanking::Balance(MosaicAlias::Currency),
            &store,
            Duration::From,
            "most",
            10,
        )
        .await
        .unwrap_err();
        assert_eq!(err.class(), crate::error::ErrorClass::NotFound);
    }

    #[tokio::test]
    async fn harvested_blocks_ranks_by_activity_bucket_count() {
        let store = FakeStore {
            accounts: vec![account(1, vec![], 0, 1), account(2, vec![], 0, 5)],
            ..Default::default()
        };
        let outcome = call(AccountRanking::HarvestedBlocks, &store, Duration::From, "most", 10)
            .await
            .unwrap();
        let page = outcome.into_page().unwrap();
        assert_eq!(page[0].object_id[0], 2);
    }
}
