//! Line module - the compress-and-merge rule for a single row or column
//!
//! Every directional move is reduced to this one routine: the caller extracts a
//! line in travel order (leading edge first), slides it "leftward" here, and
//! writes the result back. Nothing in here knows about rows, columns or
//! directions.

use crate::types::{Tile, EMPTY};

/// One source tile's travel within a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineShift {
    /// Index in the input line
    pub from: usize,
    /// Index in the output line
    pub to: usize,
    /// Whether this tile was consumed by a merge at `to`
    pub merged: bool,
}

/// Result of sliding one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSlide {
    /// Output values, same length as the input, zero-padded at the trailing end
    pub values: Vec<Tile>,
    /// Sum of the values produced by merges
    pub points: u64,
    /// Whether `values` differs from the input
    pub changed: bool,
    /// Travel of every non-empty input tile, in input order
    pub shifts: Vec<LineShift>,
    /// Output indices that hold a merge result
    pub merged: Vec<usize>,
}

impl LineSlide {
    /// Largest value produced by a merge in this line, if any
    pub fn max_merged(&self) -> Option<Tile> {
        self.merged.iter().map(|&i| self.values[i]).max()
    }
}

/// Returns true when two equal tiles of value `v` may combine under `cap`.
#[inline]
pub fn can_merge(v: Tile, cap: Option<Tile>) -> bool {
    match (v.checked_mul(2), cap) {
        (Some(sum), Some(cap)) => sum <= cap,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

/// Slide a line toward index 0.
///
/// Zeros are dropped, then a single forward scan combines each pair of equal
/// neighbours (subject to `cap`) into one tile of double value. A merged tile
/// is never compared again in the same call, so `[2, 2, 2, 2]` becomes
/// `[4, 4, 0, 0]` and `[2, 2, 2]` becomes `[4, 2, 0]`.
pub fn slide_line(line: &[Tile], cap: Option<Tile>) -> LineSlide {
    let dense: Vec<(usize, Tile)> = line
        .iter()
        .copied()
        .enumerate()
        .filter(|&(_, v)| v != EMPTY)
        .collect();

    let mut values = Vec::with_capacity(line.len());
    let mut shifts = Vec::with_capacity(dense.len());
    let mut merged = Vec::new();
    let mut points: u64 = 0;

    let mut i = 0usize;
    while i < dense.len() {
        let (from, v) = dense[i];
        let to = values.len();

        match dense.get(i + 1) {
            Some(&(next_from, next)) if next == v && can_merge(v, cap) => {
                let combined = v * 2;
                values.push(combined);
                points += u64::from(combined);
                merged.push(to);
                shifts.push(LineShift { from, to, merged: true });
                shifts.push(LineShift {
                    from: next_from,
                    to,
                    merged: true,
                });
                i += 2;
            }
            _ => {
                values.push(v);
                shifts.push(LineShift {
                    from,
                    to,
                    merged: false,
                });
                i += 1;
            }
        }
    }

    values.resize(line.len(), EMPTY);
    let changed = values.as_slice() != line;

    LineSlide {
        values,
        points,
        changed,
        shifts,
        merged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_merges_to_leading_edge() {
        let s = slide_line(&[2, 2, 0, 0], None);
        assert_eq!(s.values, vec![4, 0, 0, 0]);
        assert_eq!(s.points, 4);
        assert!(s.changed);
        assert_eq!(s.merged, vec![0]);
    }

    #[test]
    fn test_four_equal_tiles_merge_pairwise() {
        let s = slide_line(&[2, 2, 2, 2], None);
        assert_eq!(s.values, vec![4, 4, 0, 0]);
        assert_eq!(s.points, 8);
        assert_eq!(s.merged, vec![0, 1]);
    }

    #[test]
    fn test_three_equal_tiles_merge_first_pair_only() {
        let s = slide_line(&[2, 2, 2, 0], None);
        assert_eq!(s.values, vec![4, 2, 0, 0]);
        assert_eq!(s.points, 4);
    }

    #[test]
    fn test_merged_tile_does_not_merge_again() {
        let s = slide_line(&[2, 2, 4, 0], None);
        assert_eq!(s.values, vec![4, 4, 0, 0]);
        assert_eq!(s.points, 4);
    }

    #[test]
    fn test_translation_without_merge_counts_as_change() {
        let s = slide_line(&[0, 2, 0, 4], None);
        assert_eq!(s.values, vec![2, 4, 0, 0]);
        assert_eq!(s.points, 0);
        assert!(s.changed);
        assert!(s.merged.is_empty());
    }

    #[test]
    fn test_packed_line_without_pairs_is_unchanged() {
        let s = slide_line(&[2, 4, 8, 16], None);
        assert_eq!(s.values, vec![2, 4, 8, 16]);
        assert!(!s.changed);
        assert_eq!(s.points, 0);
    }

    #[test]
    fn test_empty_line_is_unchanged() {
        let s = slide_line(&[0, 0, 0, 0], None);
        assert!(!s.changed);
        assert!(s.shifts.is_empty());
    }

    #[test]
    fn test_gap_between_equal_tiles_still_merges() {
        let s = slide_line(&[4, 0, 0, 4], None);
        assert_eq!(s.values, vec![8, 0, 0, 0]);
        assert_eq!(s.points, 8);
    }

    #[test]
    fn test_cap_blocks_merge_above_limit() {
        let s = slide_line(&[2048, 2048, 0, 0], Some(2048));
        assert_eq!(s.values, vec![2048, 2048, 0, 0]);
        assert!(!s.changed);
        assert_eq!(s.points, 0);

        let s = slide_line(&[1024, 1024, 0, 0], Some(2048));
        assert_eq!(s.values, vec![2048, 0, 0, 0]);
        assert_eq!(s.points, 2048);
    }

    #[test]
    fn test_capped_pair_lets_scan_continue() {
        let s = slide_line(&[2048, 2048, 2, 2], Some(2048));
        assert_eq!(s.values, vec![2048, 2048, 4, 0]);
        assert_eq!(s.points, 4);
    }

    #[test]
    fn test_shifts_track_sources() {
        let s = slide_line(&[0, 2, 2, 8], None);
        assert_eq!(
            s.shifts,
            vec![
                LineShift { from: 1, to: 0, merged: true },
                LineShift { from: 2, to: 0, merged: true },
                LineShift { from: 3, to: 1, merged: false },
            ]
        );
        assert_eq!(s.max_merged(), Some(4));
    }

    #[test]
    fn test_points_of_a_long_line_exceed_tile_range() {
        let big: Tile = 1 << 30;
        let s = slide_line(&[big; 16], None);
        assert_eq!(s.merged.len(), 8);
        assert_eq!(s.points, 8 * (1u64 << 31));
        assert!(s.points > u64::from(Tile::MAX));
    }

    #[test]
    fn test_can_merge_respects_cap() {
        assert!(can_merge(1024, None));
        assert!(can_merge(1024, Some(2048)));
        assert!(!can_merge(2048, Some(2048)));
        assert!(!can_merge(u32::MAX, Some(u32::MAX)));
    }
}
