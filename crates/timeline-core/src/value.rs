use std::cmp::Ordering;

/// Fixed-width object id, the internal tie-breaker used by mosaics,
/// namespaces, and accounts (spec §3: "opaque 12-byte id whose ordering is
/// stable and monotonic enough for paging").
pub type ObjectId12 = [u8; 12];

///
/// Value
///
/// One typed slot of a family's sort-key tuple. Kept deliberately small:
/// the entity families in this layer only ever sort on 64-bit monotonic
/// counters, 32-bit tie-breaking indices, or the 12-byte internal object id,
/// so there is no need for a fully dynamic value type the way a general
/// query engine would want one.
///
/// Comparisons are only ever performed between values produced for the same
/// sort-key position of the same family, so same-variant comparison is an
/// invariant, not something this type needs to defend against at the type
/// level; [`compare_key`] asserts it in debug builds.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub enum Value {
    U64(u64),
    I32(i32),
    ObjectId(ObjectId12),
}

impl Value {
    const fn variant_tag(&self) -> u8 {
        match self {
            Self::U64(_) => 0,
            Self::I32(_) => 1,
            Self::ObjectId(_) => 2,
        }
    }
}

/// A sort-key tuple: primary field followed by tie-breakers, most
/// significant first. Every family fixes the shape (length and per-slot
/// variant) of its own sort key; see `family::*` for the concrete shapes.
pub type SortKey = Vec<Value>;

/// Sentinel minimum for a 64-bit monotonic field (spec §4.3: "for 64-bit
/// monotonic values use (0,0)").
pub const U64_MIN: Value = Value::U64(0);
/// Sentinel maximum for a 64-bit monotonic field.
pub const U64_MAX: Value = Value::U64(u64::MAX);
/// Sentinel minimum intra-block index, one below any real index.
pub const I32_MIN: Value = Value::I32(-1);
/// Sentinel maximum intra-block index, one above any real index.
pub const I32_MAX: Value = Value::I32(0);
/// Sentinel minimum object id: all-zero bytes.
pub const OBJECT_ID_MIN: Value = Value::ObjectId([0x00; 12]);
/// Sentinel maximum object id: all-`0xFF` bytes.
pub const OBJECT_ID_MAX: Value = Value::ObjectId([0xFF; 12]);

/// Lexicographically compare two sort-key tuples of identical shape.
///
/// # Panics (debug builds only)
/// Panics if the tuples differ in length or if corresponding slots hold
/// different `Value` variants — both are construction bugs in a family's
/// key-extraction code, never a property of request data.
#[must_use]
pub fn compare_key(left: &[Value], right: &[Value]) -> Ordering {
    debug_assert_eq!(
        left.len(),
        right.len(),
        "sort-key tuples compared across mismatched arity"
    );

    for (l, r) in left.iter().zip(right.iter()) {
        debug_assert_eq!(
            l.variant_tag(),
            r.variant_tag(),
            "sort-key slot compared across mismatched value kind"
        );

        let ordering = l.cmp(r);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    Ordering::Equal
}
