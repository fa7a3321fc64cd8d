//! Module: store
//! Responsibility: the async contract a document-store collaborator must
//! satisfy for the family query builders to run against it (spec §1, §2
//! item "Store collaborator" — explicitly a collaborator, not redesigned
//! here).
//! Does not own: persistence, indexing, or connection pooling — those are
//! entirely the implementor's concern. `timeline-store` ships one in-memory
//! implementation so this workspace is runnable and testable end to end; a
//! production deployment supplies its own (e.g. MongoDB-backed) without
//! `timeline-core` changing at all.
//! Boundary: family-shaped fetches in, rows or a single optional row out.

use crate::{
    error::TimelineError,
    model::{
        Account, Block, HexAddress25, Mosaic, MosaicAlias, MosaicId8, Namespace, NamespaceId8,
        ObjectId12, PublicKey32, Transaction,
    },
    parser::keyword::TransactionType,
};
use async_trait::async_trait;
use std::collections::HashSet;

/// Which of the three transaction collections a request targets (spec §3:
/// `transactions` / `unconfirmedTransactions` / `partialTransactions` are
/// distinct collections sharing the same sort key and query shape).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TransactionCollection {
    Confirmed,
    Unconfirmed,
    Partial,
}

/// What a transactions query should narrow its store-level candidate set
/// to; the `mosaic`/`multisig` subfilters (spec §4.3
/// "Transactions-by-type-with-filter") are applied on top of this by the
/// family query builder itself, since they need a join the store contract
/// doesn't otherwise need to know about.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TransactionFilter {
    None,
    Type(TransactionType),
}

#[async_trait]
pub trait Store: Send + Sync {
    async fn all_blocks(&self) -> Result<Vec<Block>, TimelineError>;
    async fn block_by_hash(&self, hash: &[u8; 32]) -> Result<Option<Block>, TimelineError>;
    async fn block_by_height(&self, height: u64) -> Result<Option<Block>, TimelineError>;

    async fn transactions_matching(
        &self,
        collection: TransactionCollection,
        filter: TransactionFilter,
    ) -> Result<Vec<Transaction>, TimelineError>;
    async fn transaction_by_hash(
        &self,
        collection: TransactionCollection,
        hash: &[u8; 32],
    ) -> Result<Option<Transaction>, TimelineError>;
    async fn transaction_by_object_id(
        &self,
        collection: TransactionCollection,
        id: &ObjectId12,
    ) -> Result<Option<Transaction>, TimelineError>;
    /// Batch-fetch every transaction embedded in one of the given
    /// aggregates, by their `aggregateId` back-reference (spec §4.3
    /// "Transactions", §5 "aggregate-transaction attachment query").
    async fn inner_transactions(
        &self,
        collection: TransactionCollection,
        aggregate_ids: &[ObjectId12],
    ) -> Result<Vec<Transaction>, TimelineError>;
    /// Which of the given addresses are linked multisig accounts (spec
    /// §4.3 "filter = multisig": "left-joins each transaction's
    /// participating addresses against a multisig-account collection").
    async fn multisig_addresses(
        &self,
        candidates: &[HexAddress25],
    ) -> Result<HashSet<HexAddress25>, TimelineError>;

    async fn all_mosaics(&self) -> Result<Vec<Mosaic>, TimelineError>;
    async fn mosaic_by_id(&self, id: &MosaicId8) -> Result<Option<Mosaic>, TimelineError>;

    async fn active_namespaces(&self) -> Result<Vec<Namespace>, TimelineError>;
    /// Tolerates the 3 possible depth levels (spec §4.3 "Namespace id lookup
    /// must tolerate three possible depth levels") via [`Namespace::identifies`]
    /// — a level only counts when paired with the row's own `depth`, not
    /// merely present somewhere in `levels` — and only matches rows where
    /// `active` holds.
    async fn namespace_by_id(&self, id: &NamespaceId8) -> Result<Option<Namespace>, TimelineError>;
    async fn namespace_by_object_id(&self, id: &ObjectId12) -> Result<Option<Namespace>, TimelineError>;

    async fn all_accounts(&self) -> Result<Vec<Account>, TimelineError>;
    async fn account_by_address(&self, address: &HexAddress25) -> Result<Option<Account>, TimelineError>;
    async fn account_by_public_key(&self, key: &PublicKey32) -> Result<Option<Account>, TimelineError>;

    /// Resolve a well-known mosaic alias to its current mosaic id. `None`
    /// when the alias hasn't been claimed yet — the balance family
    /// surfaces that as `TimelineError::NotFound` (spec §4.3).
    async fn resolve_mosaic_alias(&self, alias: MosaicAlias) -> Result<Option<MosaicId8>, TimelineError>;
}
