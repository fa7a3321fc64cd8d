use crate::value::{SortKey, compare_key};

/// Direction a store must scan in before the engine re-sorts for
/// presentation (spec §4.3, "Ascending-scan, final-descending pattern").
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScanDirection {
    /// `From`: the store sorts descending throughout; the predicate alone
    /// plus this sort already yields the nearest-to-the-anchor rows first.
    Descending,
    /// `Since`: the store must sort ascending so the *nearest*-greater rows
    /// survive the `count` limit, then the engine reverses for the
    /// user-visible descending page.
    Ascending,
}

/// Keep the `keep` rows nearest the scan boundary under `direction`, then
/// sort that kept set into final descending presentation order.
///
/// Mirrors the "bounded ordering for first-page loads" shape used by
/// typed-query executors generally: select the smallest `keep` rows under
/// the scan comparator with `select_nth_unstable_by` (avoiding a full sort
/// of rows that will be discarded), then sort only the kept prefix. The
/// final sort is always descending — for `ScanDirection::Ascending`, the
/// scan comparator is reversed before sorting so presentation order comes
/// out correct without a second pass over the data.
#[must_use]
pub fn select_and_sort<R>(
    mut rows: Vec<R>,
    keep: usize,
    direction: ScanDirection,
    key_of: impl Fn(&R) -> &SortKey,
) -> Vec<R> {
    if keep == 0 {
        return Vec::new();
    }

    let scan_cmp = |a: &R, b: &R| {
        let ordering = compare_key(key_of(a), key_of(b));
        match direction {
            ScanDirection::Ascending => ordering,
            ScanDirection::Descending => ordering.reverse(),
        }
    };

    if rows.len() > keep {
        rows.select_nth_unstable_by(keep - 1, scan_cmp);
        rows.truncate(keep);
    }

    // Present descending regardless of scan direction.
    rows.sort_by(|a, b| compare_key(key_of(b), key_of(a)));

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn key(n: u64) -> SortKey {
        vec![Value::U64(n)]
    }

    #[test]
    fn keeps_nearest_to_ascending_boundary_then_presents_descending() {
        let rows: Vec<SortKey> = vec![key(1), key(5), key(3), key(9), key(2)];
        let kept = select_and_sort(rows, 3, ScanDirection::Ascending, |r| r);
        // Ascending scan keeps the 3 smallest (1, 2, 3), presented descending.
        assert_eq!(kept, vec![key(3), key(2), key(1)]);
    }

    #[test]
    fn keeps_nearest_to_descending_boundary_then_presents_descending() {
        let rows: Vec<SortKey> = vec![key(1), key(5), key(3), key(9), key(2)];
        let kept = select_and_sort(rows, 2, ScanDirection::Descending, |r| r);
        // Descending scan keeps the 2 largest (9, 5), presented descending.
        assert_eq!(kept, vec![key(9), key(5)]);
    }

    #[test]
    fn zero_keep_short_circuits_without_touching_rows() {
        let rows: Vec<SortKey> = vec![key(1), key(2)];
        let kept = select_and_sort(rows, 0, ScanDirection::Ascending, |r| r);
        assert!(kept.is_empty());
    }
}
