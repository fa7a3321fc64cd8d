//! Module: timeline-store
//! Responsibility: the one concrete `timeline_core::Store` implementation
//! this workspace ships — an in-memory collection snapshot, enough to make
//! `timeline-core` and `timeline-api` runnable and testable end to end.
//! Does not own: persistence, indexing, or connection pooling; a production
//! deployment supplies its own `Store` (e.g. MongoDB-backed) without
//! `timeline-core` changing at all.
//! Boundary: a `Seed` of rows in, a `Store` trait implementation out.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::{collections::HashMap, collections::HashSet, sync::Arc};
use timeline_core::{
    error::TimelineError,
    model::{
        Account, Block, HexAddress25, Mosaic, MosaicAlias, MosaicId8, Namespace, NamespaceId8,
        ObjectId12, PublicKey32, Transaction,
    },
    store::{Store, TransactionCollection, TransactionFilter},
};

/// The snapshot behind one `MemoryStore` — plain data, filled in once by
/// [`Seed`] and then read through an `Arc<RwLock<..>>` per request.
#[derive(Clone, Default)]
struct Snapshot {
    blocks: Vec<Block>,
    confirmed: Vec<Transaction>,
    unconfirmed: Vec<Transaction>,
    partial: Vec<Transaction>,
    mosaics: Vec<Mosaic>,
    namespaces: Vec<Namespace>,
    accounts: Vec<Account>,
    multisig: HashSet<HexAddress25>,
    aliases: HashMap<MosaicAlias, MosaicId8>,
}

impl Snapshot {
    fn transactions(&self, collection: TransactionCollection) -> &[Transaction] {
        match collection {
            TransactionCollection::Confirmed => &self.confirmed,
            TransactionCollection::Unconfirmed => &self.unconfirmed,
            TransactionCollection::Partial => &self.partial,
        }
    }
}

/// Builder for a [`MemoryStore`]'s fixed starting data, used by the demo
/// binary and by integration tests. Rows are appended; nothing here enforces
/// the ordering invariants `timeline-core` depends on — that's the row
/// producer's job, same as a real indexer.
#[derive(Clone, Default)]
pub struct Seed {
    snapshot: Snapshot,
}

impl Seed {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_blocks(mut self, blocks: impl IntoIterator<Item = Block>) -> Self {
        self.snapshot.blocks.extend(blocks);
        self
    }

    #[must_use]
    pub fn with_transactions(mut self, collection: TransactionCollection, rows: impl IntoIterator<Item = Transaction>) -> Self {
        let target = match collection {
            TransactionCollection::Confirmed => &mut self.snapshot.confirmed,
            TransactionCollection::Unconfirmed => &mut self.snapshot.unconfirmed,
            TransactionCollection::Partial => &mut self.snapshot.partial,
        };
        target.extend(rows);
        self
    }

    #[must_use]
    pub fn with_mosaics(mut self, mosaics: impl IntoIterator<Item = Mosaic>) -> Self {
        self.snapshot.mosaics.extend(mosaics);
        self
    }

    #[must_use]
    pub fn with_namespaces(mut self, namespaces: impl IntoIterator<Item = Namespace>) -> Self {
        self.snapshot.namespaces.extend(namespaces);
        self
    }

    #[must_use]
    pub fn with_accounts(mut self, accounts: impl IntoIterator<Item = Account>) -> Self {
        self.snapshot.accounts.extend(accounts);
        self
    }

    #[must_use]
    pub fn with_multisig_addresses(mut self, addresses: impl IntoIterator<Item = HexAddress25>) -> Self {
        self.snapshot.multisig.extend(addresses);
        self
    }

    #[must_use]
    pub fn with_mosaic_alias(mut self, alias: MosaicAlias, id: MosaicId8) -> Self {
        self.snapshot.aliases.insert(alias, id);
        self
    }

    #[must_use]
    pub fn build(self) -> MemoryStore {
        MemoryStore {
            snapshot: Arc::new(RwLock::new(self.snapshot)),
        }
    }
}

/// An in-memory `Store`. Every method takes a read guard for the duration of
/// one query and releases it on return (or on drop, if the future is
/// cancelled) — the same leasing discipline a pooled-connection-backed store
/// would apply to a real connection (spec §5 "Shared resources").
#[derive(Clone)]
pub struct MemoryStore {
    snapshot: Arc<RwLock<Snapshot>>,
}

impl MemoryStore {
    #[must_use]
    pub fn seed() -> Seed {
        Seed::new()
    }

    /// Append a confirmed transaction as if freshly ingested — used by
    /// concurrency/ingestion tests that want to observe a page taken before
    /// the append stays stable (spec §9 "Partial-snapshot under ingestion").
    pub fn push_confirmed_transaction(&self, row: Transaction) {
        self.snapshot.write().confirmed.push(row);
    }

    pub fn push_block(&self, row: Block) {
        self.snapshot.write().blocks.push(row);
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn all_blocks(&self) -> Result<Vec<Block>, TimelineError> {
        Ok(self.snapshot.read().blocks.clone())
    }

    async fn block_by_hash(&self, hash: &[u8; 32]) -> Result<Option<Block>, TimelineError> {
        Ok(self.snapshot.read().blocks.iter().find(|b| &b.hash == hash).cloned())
    }

    async fn block_by_height(&self, height: u64) -> Result<Option<Block>, TimelineError> {
        Ok(self.snapshot.read().blocks.iter().find(|b| b.height == height).cloned())
    }

    async fn transactions_matching(
        &self,
        collection: TransactionCollection,
        filter: TransactionFilter,
    ) -> Result<Vec<Transaction>, TimelineError> {
        let snapshot = self.snapshot.read();
        Ok(snapshot
            .transactions(collection)
            .iter()
            .filter(|t| match filter {
                TransactionFilter::None => true,
                TransactionFilter::Type(want) => t.transaction_type == want,
            })
            .cloned()
            .collect())
    }

    async fn transaction_by_hash(
        &self,
        collection: TransactionCollection,
        hash: &[u8; 32],
    ) -> Result<Option<Transaction>, TimelineError> {
        let snapshot = self.snapshot.read();
        Ok(snapshot.transactions(collection).iter().find(|t| &t.hash == hash).cloned())
    }

    async fn transaction_by_object_id(
        &self,
        collection: TransactionCollection,
        id: &ObjectId12,
    ) -> Result<Option<Transaction>, TimelineError> {
        let snapshot = self.snapshot.read();
        Ok(snapshot.transactions(collection).iter().find(|t| &t.id == id).cloned())
    }

    async fn inner_transactions(
        &self,
        collection: TransactionCollection,
        aggregate_ids: &[ObjectId12],
    ) -> Result<Vec<Transaction>, TimelineError> {
        let snapshot = self.snapshot.read();
        Ok(snapshot
            .transactions(collection)
            .iter()
            .filter(|t| t.aggregate_id.is_some_and(|a| aggregate_ids.contains(&a)))
            .cloned()
            .collect())
    }

    async fn multisig_addresses(&self, candidates: &[HexAddress25]) -> Result<HashSet<HexAddress25>, TimelineError> {
        let snapshot = self.snapshot.read();
        Ok(candidates.iter().filter(|a| snapshot.multisig.contains(*a)).copied().collect())
    }

    async fn all_mosaics(&self) -> Result<Vec<Mosaic>, TimelineError> {
        Ok(self.snapshot.read().mosaics.clone())
    }

    async fn mosaic_by_id(&self, id: &MosaicId8) -> Result<Option<Mosaic>, TimelineError> {
        Ok(self.snapshot.read().mosaics.iter().find(|m| &m.id == id).copied())
    }

    async fn active_namespaces(&self) -> Result<Vec<Namespace>, TimelineError> {
        Ok(self.snapshot.read().namespaces.iter().filter(|n| n.active).cloned().collect())
    }

    async fn namespace_by_id(&self, id: &NamespaceId8) -> Result<Option<Namespace>, TimelineError> {
        Ok(self
            .snapshot
            .read()
            .namespaces
            .iter()
            .find(|n| n.active && n.identifies(*id))
            .cloned())
    }

    async fn namespace_by_object_id(&self, id: &ObjectId12) -> Result<Option<Namespace>, TimelineError> {
        Ok(self.snapshot.read().namespaces.iter().find(|n| &n.object_id == id).cloned())
    }

    async fn all_accounts(&self) -> Result<Vec<Account>, TimelineError> {
        Ok(self.snapshot.read().accounts.clone())
    }

    async fn account_by_address(&self, address: &HexAddress25) -> Result<Option<Account>, TimelineError> {
        Ok(self.snapshot.read().accounts.iter().find(|a| &a.address == address).cloned())
    }

    async fn account_by_public_key(&self, key: &PublicKey32) -> Result<Option<Account>, TimelineError> {
        Ok(self.snapshot.read().accounts.iter().find(|a| a.public_key == Some(*key)).cloned())
    }

    async fn resolve_mosaic_alias(&self, alias: MosaicAlias) -> Result<Option<MosaicId8>, TimelineError> {
        Ok(self.snapshot.read().aliases.get(&alias).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(height: u64) -> Block {
        Block { height, hash: [height as u8; 32] }
    }

    #[tokio::test]
    async fn seeded_blocks_are_visible_through_the_store_trait() {
        let store = MemoryStore::seed().with_blocks((1..=5).map(block)).build();
        assert_eq!(store.all_blocks().await.unwrap().len(), 5);
        assert_eq!(store.block_by_height(3).await.unwrap().unwrap().height, 3);
        assert!(store.block_by_height(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn pushed_block_is_visible_to_a_subsequent_read() {
        let store = MemoryStore::seed().with_blocks((1..=3).map(block)).build();
        store.push_block(block(4));
        assert_eq!(store.all_blocks().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn unresolved_alias_is_none_not_an_error() {
        let store = MemoryStore::seed().build();
        assert!(store.resolve_mosaic_alias(MosaicAlias::Currency).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn resolved_alias_round_trips() {
        let store = MemoryStore::seed().with_mosaic_alias(MosaicAlias::Xem, [9u8; 8]).build();
        assert_eq!(store.resolve_mosaic_alias(MosaicAlias::Xem).await.unwrap(), Some([9u8; 8]));
    }
}
