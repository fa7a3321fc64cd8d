//! Module: response
//! Responsibility: the JSON envelope shape (spec §6 "Response body") and the
//! per-family Dto conversions from `timeline-core` model rows — hex-encoding
//! the fixed-size byte arrays the wire format has no native representation
//! for.
//! Does not own: deciding which family a route dispatches to, or error/
//! redirect responses — see [`crate::error`].
//! Boundary: a `timeline-core` row (or page of rows) in, a serializable
//! envelope out.

use serde::Serialize;
use timeline_core::{
    family::transactions::TransactionPage,
    model::{Account, Block, Mosaic, MosaicAmount, Namespace, Transaction},
};

/// `{ "payload": [...], "type": "<tag>" }` (spec §6). `type` is one of the
/// family tags in the glossary, not the transaction type discriminator.
#[derive(Serialize)]
pub struct Envelope<T> {
    pub payload: Vec<T>,
    pub r#type: &'static str,
}

impl<T> Envelope<T> {
    #[must_use]
    pub const fn new(tag: &'static str, payload: Vec<T>) -> Self {
        Self { payload, r#type: tag }
    }
}

fn hex_id(id: &[u8]) -> String {
    hex::encode(id)
}

#[derive(Serialize)]
pub struct BlockDto {
    pub height: u64,
    pub hash: String,
}

impl From<&Block> for BlockDto {
    fn from(row: &Block) -> Self {
        Self { height: row.height, hash: hex_id(&row.hash) }
    }
}

#[derive(Serialize)]
pub struct MosaicAmountDto {
    #[serde(rename = "mosaicId")]
    pub mosaic_id: String,
    pub amount: u64,
}

impl From<&MosaicAmount> for MosaicAmountDto {
    fn from(row: &MosaicAmount) -> Self {
        Self { mosaic_id: hex_id(&row.mosaic_id), amount: row.amount }
    }
}

#[derive(Serialize)]
pub struct TransactionDto {
    pub id: String,
    pub height: u64,
    pub index: i32,
    pub hash: String,
    #[serde(rename = "type")]
    pub transaction_type: &'static str,
    #[serde(rename = "aggregateId", skip_serializing_if = "Option::is_none")]
    pub aggregate_id: Option<String>,
    pub mosaics: Vec<MosaicAmountDto>,
    #[serde(rename = "inner", skip_serializing_if = "Vec::is_empty")]
    pub inner: Vec<TransactionDto>,
}

impl From<&Transaction> for TransactionDto {
    fn from(row: &Transaction) -> Self {
        Self {
            id: hex_id(&row.id),
            height: row.height,
            index: row.index,
            hash: hex_id(&row.hash),
            transaction_type: row.transaction_type.as_str(),
            aggregate_id: row.aggregate_id.map(|id| hex_id(&id)),
            mosaics: row.mosaics.iter().map(MosaicAmountDto::from).collect(),
            inner: Vec::new(),
        }
    }
}

impl From<&TransactionPage> for TransactionDto {
    /// A parent with its materialized inner transactions flattened onto
    /// `inner` — the wire format never exposes [`TransactionPage`] directly
    /// (spec "Aggregate transaction" glossary entry).
    fn from(page: &TransactionPage) -> Self {
        Self {
            inner: page.inner.iter().map(TransactionDto::from).collect(),
            ..Self::from(&page.parent)
        }
    }
}

#[derive(Serialize)]
pub struct MosaicDto {
    pub id: String,
    #[serde(rename = "startHeight")]
    pub start_height: u64,
    #[serde(rename = "objectId")]
    pub object_id: String,
}

impl From<&Mosaic> for MosaicDto {
    fn from(row: &Mosaic) -> Self {
        Self {
            id: hex_id(&row.id),
            start_height: row.start_height,
            object_id: hex_id(&row.object_id),
        }
    }
}

#[derive(Serialize)]
pub struct NamespaceDto {
    pub levels: Vec<Option<String>>,
    pub depth: u8,
    pub active: bool,
    #[serde(rename = "startHeight")]
    pub start_height: u64,
    #[serde(rename = "objectId")]
    pub object_id: String,
}

impl From<&Namespace> for NamespaceDto {
    fn from(row: &Namespace) -> Self {
        Self {
            levels: row.levels.iter().map(|level| level.as_ref().map(|id| hex_id(id))).collect(),
            depth: row.depth,
            active: row.active,
            start_height: row.start_height,
            object_id: hex_id(&row.object_id),
        }
    }
}

#[derive(Serialize)]
pub struct AccountDto {
    pub address: String,
    #[serde(rename = "publicKey", skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    #[serde(rename = "publicKeyHeight")]
    pub public_key_height: u64,
    #[serde(rename = "objectId")]
    pub object_id: String,
    pub importances: Vec<u64>,
    pub mosaics: Vec<MosaicAmountDto>,
}

impl From<&Account> for AccountDto {
    fn from(row: &Account) -> Self {
        Self {
            address: hex_id(&row.address),
            public_key: row.public_key.map(|key| hex_id(&key)),
            public_key_height: row.public_key_height,
            object_id: hex_id(&row.object_id),
            importances: row.importances.clone(),
            mosaics: row.mosaics.iter().map(MosaicAmountDto::from).collect(),
        }
    }
}
