//! Module: model
//! Responsibility: the concrete row shapes for the five entity families
//! (spec §3), fixed here because the family query builders need real
//! fields to extract sort keys and apply filters from.
//! Does not own: how a store persists or fetches these rows — only their
//! shape.
//! Boundary: plain data, no behavior beyond field access.

use crate::value::ObjectId12;

pub type MosaicId8 = [u8; 8];
pub type NamespaceId8 = [u8; 8];
pub type HexAddress25 = [u8; 25];
pub type PublicKey32 = [u8; 32];
pub type Hash256 = [u8; 32];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MosaicAmount {
    pub mosaic_id: MosaicId8,
    pub amount: u64,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ActivityBucket {
    pub total_fees_paid: u64,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Block {
    pub height: u64,
    pub hash: Hash256,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Transaction {
    pub id: ObjectId12,
    pub height: u64,
    pub index: i32,
    pub hash: Hash256,
    pub transaction_type: crate::parser::keyword::TransactionType,
    /// `Some` for a transaction attached inside an aggregate; the family
    /// query builder re-attaches it to its aggregate's sort position (spec
    /// §3 "Aggregate transaction" in the glossary).
    pub aggregate_id: Option<ObjectId12>,
    pub mosaics: Vec<MosaicAmount>,
    pub participant_addresses: Vec<HexAddress25>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Mosaic {
    pub id: MosaicId8,
    pub start_height: u64,
    pub object_id: ObjectId12,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Namespace {
    pub levels: [Option<NamespaceId8>; 3],
    pub depth: u8,
    pub active: bool,
    pub start_height: u64,
    pub object_id: ObjectId12,
}

impl Namespace {
    /// Whether `id` is this row's *own* identifying level, i.e. it sits at
    /// `levels[depth - 1]` (spec §4.3 "namespace id lookup must tolerate
    /// three possible depth levels... ORs across all three with a matching
    /// `depth` condition"). A row's shallower levels carry its ancestors'
    /// ids (e.g. `foo.bar` at depth 2 has `levels[0] == foo`'s id), which
    /// must not satisfy a lookup for `foo` itself — only the row whose own
    /// depth lands on that slot.
    #[must_use]
    pub fn identifies(&self, id: NamespaceId8) -> bool {
        match self.depth {
            1 => self.levels[0] == Some(id),
            2 => self.levels[1] == Some(id),
            3 => self.levels[2] == Some(id),
            _ => false,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Account {
    pub address: HexAddress25,
    pub public_key: Option<PublicKey32>,
    pub public_key_height: u64,
    pub object_id: ObjectId12,
    /// Importance snapshots, most recent last — ranking uses the last one.
    pub importances: Vec<u64>,
    pub activity_buckets: Vec<ActivityBucket>,
    pub mosaics: Vec<MosaicAmount>,
}

/// The three well-known mosaic aliases balance-ranked account families
/// resolve through a namespace alias on every query (spec §4.3, §9).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum MosaicAlias {
    Currency,
    Harvest,
    Xem,
}

impl MosaicAlias {
    #[must_use]
    pub const fn namespace_name(self) -> &'static str {
        match self {
            Self::Currency => "currency",
            Self::Harvest => "harvest",
            Self::Xem => "xem",
        }
    }
}
