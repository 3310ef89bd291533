//! Covered-interval list for integer case-statement coverage.
//!
//! A sorted list of non-adjacent `[low, high]` pairs; overlapping inserts
//! are reported as duplicate coverage by the caller, and adjacent inserts
//! coalesce into one interval.

#[derive(Default)]
pub struct CoveredIntervalList {
    intervals: Vec<(i64, i64)>,
}

impl CoveredIntervalList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempts to add `[lo, hi]`. Returns `Some(overlap)` — the
    /// already-covered span this interval collides with — without mutating
    /// the list, or `None` after inserting (merging any now-adjacent
    /// neighbors).
    pub fn insert(&mut self, lo: i64, hi: i64) -> Option<(i64, i64)> {
        if let Some(&(elo, ehi)) = self.intervals.iter().find(|&&(elo, ehi)| lo <= ehi && elo <= hi) {
            return Some((elo.max(lo), ehi.min(hi)));
        }
        self.intervals.push((lo, hi));
        self.intervals.sort_unstable();
        let mut merged: Vec<(i64, i64)> = Vec::with_capacity(self.intervals.len());
        for (l, h) in self.intervals.drain(..) {
            match merged.last_mut() {
                Some(last) if l == last.1 + 1 => last.1 = h,
                Some(last) if l <= last.1 => last.1 = last.1.max(h),
                _ => merged.push((l, h)),
            }
        }
        self.intervals = merged;
        None
    }

    /// The gaps in `[tlow, thigh]` not covered by any inserted interval, in
    /// ascending order.
    pub fn missing(&self, tlow: i64, thigh: i64) -> Vec<(i64, i64)> {
        let mut out = Vec::new();
        let mut cursor = tlow;
        for &(lo, hi) in &self.intervals {
            if lo > cursor {
                out.push((cursor, lo - 1));
            }
            cursor = cursor.max(hi + 1);
            if cursor > thigh {
                return out;
            }
        }
        if cursor <= thigh {
            out.push((cursor, thigh));
        }
        out
    }
}

/// Formats missing intervals one per line: `"N"` for a singleton, `"N to
/// M"` otherwise.
pub fn format_missing(missing: &[(i64, i64)]) -> String {
    missing
        .iter()
        .map(|&(lo, hi)| {
            if lo == hi {
                format!("  {lo}")
            } else {
                format!("  {lo} to {hi}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coalesces_adjacent_intervals() {
        let mut list = CoveredIntervalList::new();
        assert!(list.insert(0, 2).is_none());
        assert!(list.insert(3, 5).is_none());
        assert_eq!(list.missing(0, 5), vec![]);
    }

    #[test]
    fn detects_overlap() {
        let mut list = CoveredIntervalList::new();
        list.insert(0, 5).unwrap_or(());
        assert_eq!(list.insert(3, 4), Some((3, 4)));
    }

    #[test]
    fn missing_partitions_complement() {
        let mut list = CoveredIntervalList::new();
        list.insert(0, 0).unwrap_or(());
        list.insert(2, 5).unwrap_or(());
        assert_eq!(list.missing(0, 7), vec![(1, 1), (6, 7)]);
    }

    #[test]
    fn format_missing_matches_spec_shape() {
        assert_eq!(format_missing(&[(1, 1), (6, 7)]), "  1\n  6 to 7");
    }
}
