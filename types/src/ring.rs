//! Square-ring sizing for the prize board.
//!
//! A board is a square ring of tiles: `side` cells per edge with shared
//! corners, so a ring holds `4 * side - 4` tiles. Catalogs that do not fill
//! their ring exactly are padded by cycling their own entries.

use crate::prize::Prize;

/// Fewest tiles a board will render (the 3x3 ring).
pub const MIN_RING: usize = 8;

/// Edge length of the smallest square ring holding `count` perimeter cells.
#[inline]
pub fn side_len(count: usize) -> usize {
    let side = count.saturating_sub(4).div_ceil(4) + 2;
    side.max(3)
}

/// Number of tiles on the ring that displays a `count`-entry catalog.
#[inline]
pub fn ring_len(count: usize) -> usize {
    4 * side_len(count) - 4
}

/// Pad (or, defensively, truncate) a catalog to exactly fill its ring.
///
/// Padding repeats the catalog from its start, so filler tiles are visual
/// duplicates; a landed draw still resolves to the first occurrence of the
/// prize id. An empty catalog is returned unchanged and must be rejected by
/// the caller.
pub fn fit_to_ring(prizes: Vec<Prize>) -> Vec<Prize> {
    let source_len = prizes.len();
    if source_len == 0 {
        return prizes;
    }

    let target = ring_len(source_len);
    let mut out = prizes;
    if out.len() > target {
        out.truncate(target);
        return out;
    }
    let mut next = 0usize;
    while out.len() < target {
        let fill = out[next % source_len].clone();
        out.push(fill);
        next += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(n: u64) -> Vec<Prize> {
        (1..=n).map(|i| Prize::award(i, &format!("p{i}"))).collect()
    }

    #[test]
    fn side_len_matches_minimum_ring() {
        // (count, side)
        let cases = [
            (1, 3),
            (4, 3),
            (8, 3),
            (9, 4),
            (12, 4),
            (13, 5),
            (16, 5),
            (17, 6),
            (20, 6),
        ];
        for (count, side) in cases {
            assert_eq!(side_len(count), side, "count={count}");
        }
    }

    #[test]
    fn ring_len_is_perimeter_of_side() {
        assert_eq!(ring_len(8), 8);
        assert_eq!(ring_len(9), 12);
        assert_eq!(ring_len(12), 12);
        assert_eq!(ring_len(13), 16);
        // Tiny catalogs still get the minimum ring.
        assert_eq!(ring_len(1), MIN_RING);
        assert_eq!(ring_len(5), MIN_RING);
    }

    #[test]
    fn ring_always_fits_catalog() {
        for count in 1..=64 {
            assert!(ring_len(count) >= count, "count={count}");
            assert!(ring_len(count) >= MIN_RING);
            // Even-edge-completable: always a full square perimeter.
            assert_eq!(ring_len(count) % 4, 0);
        }
    }

    #[test]
    fn fit_pads_by_cycling_catalog() {
        let fitted = fit_to_ring(catalog(5));
        assert_eq!(fitted.len(), 8);
        let ids: Vec<u64> = fitted.iter().map(|p| p.prize_id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 1, 2, 3]);
    }

    #[test]
    fn fit_keeps_exact_rings_untouched() {
        let fitted = fit_to_ring(catalog(12));
        assert_eq!(
            fitted.iter().map(|p| p.prize_id).collect::<Vec<_>>(),
            (1..=12).collect::<Vec<_>>()
        );
    }

    #[test]
    fn fit_single_prize_fills_minimum_ring() {
        let fitted = fit_to_ring(catalog(1));
        assert_eq!(fitted.len(), MIN_RING);
        assert!(fitted.iter().all(|p| p.prize_id == 1));
    }

    #[test]
    fn fit_leaves_empty_catalog_for_caller() {
        assert!(fit_to_ring(Vec::new()).is_empty());
    }
}
