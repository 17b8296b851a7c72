//! Per-pass bookkeeping: the partitioned histogram table and the two-level
//! exclusive prefix sum that turns it into scatter cursors.

use crate::error::SortError;
use crate::key::Key;

/// Count table for one digit pass, one `radix`-wide row per partition.
///
/// The table starts a pass as per-partition digit histograms and is rewritten
/// in place by [`sequence`](PassPlan::sequence) into the write cursors the
/// scatter stage consumes. Storage is allocated once per sort and zeroed per
/// pass.
#[derive(Debug)]
pub(crate) struct PassPlan {
    partitions: usize,
    radix: usize,
    mask: usize,
    counts: Vec<usize>,
    totals: Vec<usize>,
}

impl PassPlan {
    /// Allocates the table for `partitions` rows of `1 << radix_bits`
    /// buckets. The caller validates `radix_bits` beforehand.
    pub(crate) fn new(partitions: usize, radix_bits: u32) -> Result<Self, SortError> {
        let radix = 1usize << radix_bits;
        let table = partitions
            .checked_mul(radix)
            .ok_or(SortError::PlanTooLarge { partitions, radix })?;

        Ok(Self {
            partitions,
            radix,
            mask: radix - 1,
            counts: vec![0; table],
            totals: vec![0; radix],
        })
    }

    #[inline]
    pub(crate) fn radix(&self) -> usize {
        self.radix
    }

    #[inline]
    pub(crate) fn mask(&self) -> usize {
        self.mask
    }

    /// Zeroes the table for the next pass.
    pub(crate) fn reset(&mut self) {
        self.counts.fill(0);
    }

    /// The raw table, chunked into rows by the execution layer.
    #[inline]
    pub(crate) fn table_mut(&mut self) -> &mut [usize] {
        &mut self.counts
    }

    /// Converts per-partition digit counts into per-partition write cursors.
    ///
    /// Level one is an exclusive prefix sum over the per-digit totals: it
    /// fixes the base of every digit block, so all elements with digit `d`
    /// land in one contiguous block placed before digit `d + 1`'s. Level two
    /// is an exclusive prefix sum over partitions in index order within each
    /// digit: it gives every partition its starting cursor inside the block.
    /// Elements with equal digits therefore keep their partition order, and
    /// the ascending scatter keeps their order within a partition. That is
    /// the stability argument for one pass.
    ///
    /// Returns `false` when a single digit owns every element. The pass would
    /// be an identity permutation and the caller can skip the scatter.
    pub(crate) fn sequence(&mut self) -> bool {
        let (partitions, radix) = (self.partitions, self.radix);

        for digit in 0..radix {
            let mut total = 0;
            for part in 0..partitions {
                total += self.counts[part * radix + digit];
            }
            self.totals[digit] = total;
        }

        let len: usize = self.totals.iter().sum();
        if self.totals.iter().any(|&total| total == len) {
            return false;
        }

        let mut base = 0;
        for digit in 0..radix {
            let mut cursor = base;
            for part in 0..partitions {
                let slot = part * radix + digit;
                let count = self.counts[slot];
                self.counts[slot] = cursor;
                cursor += count;
            }
            base += self.totals[digit];
        }

        true
    }
}

/// Counts the digits of one partition's keys into that partition's row.
///
/// Rows of distinct partitions are disjoint, so the histogram stage needs no
/// synchronization, and the per-digit column sums are independent of how the
/// input was partitioned.
pub(crate) fn fill_histogram<K: Key>(chunk: &[K], shift: u32, mask: usize, row: &mut [usize]) {
    for &key in chunk {
        row[key.digit(shift, mask)] += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn histogram_counts_every_key_once() {
        let keys = [0x00u32, 0x01, 0x01, 0x03, 0xFF, 0xFF, 0xFF];
        let mut row = vec![0usize; 256];

        fill_histogram(&keys, 0, 0xFF, &mut row);

        assert_eq!(row[0x00], 1);
        assert_eq!(row[0x01], 2);
        assert_eq!(row[0x03], 1);
        assert_eq!(row[0xFF], 3);
        assert_eq!(row.iter().sum::<usize>(), keys.len());
    }

    #[test]
    fn histogram_column_sums_ignore_partitioning() {
        let keys = [3u32, 1, 2, 3, 0, 1, 3, 2, 2, 1, 0];

        let mut whole = vec![0usize; 4];
        fill_histogram(&keys, 0, 0b11, &mut whole);

        let mut split = vec![0usize; 3 * 4];
        for (chunk, row) in keys.chunks(4).zip(split.chunks_mut(4)) {
            fill_histogram(chunk, 0, 0b11, row);
        }
        let columns: Vec<usize> = (0..4)
            .map(|digit| (0..3).map(|part| split[part * 4 + digit]).sum())
            .collect();

        assert_eq!(whole, columns);
    }

    #[test]
    fn sequence_matches_hand_computed_cursors() {
        // Two partitions, radix 4. Rows are digit histograms.
        let mut plan = PassPlan::new(2, 2).unwrap();
        plan.table_mut().copy_from_slice(&[1, 0, 2, 1, 2, 1, 0, 0]);

        assert!(plan.sequence());

        // Digit bases are 0, 3, 4, 6; partition 1 starts after partition 0's
        // share of each digit block.
        assert_eq!(plan.table_mut(), &[0, 3, 4, 6, 1, 3, 6, 7]);
    }

    #[test]
    fn sequence_is_exclusive_of_the_digit_itself() {
        let mut plan = PassPlan::new(1, 2).unwrap();
        plan.table_mut().copy_from_slice(&[5, 0, 0, 2]);

        assert!(plan.sequence());

        // Digit 3's cursor skips the five digit-0 elements but none of its
        // own.
        assert_eq!(plan.table_mut(), &[0, 5, 5, 5]);
    }

    #[test]
    fn sequence_flags_single_digit_passes_as_identity() {
        let mut plan = PassPlan::new(2, 2).unwrap();
        plan.table_mut().copy_from_slice(&[0, 4, 0, 0, 0, 3, 0, 0]);

        assert!(!plan.sequence());
    }

    #[test]
    fn oversized_plan_is_rejected_not_allocated() {
        let err = PassPlan::new(usize::MAX / 2, 16).unwrap_err();

        assert_eq!(
            err,
            SortError::PlanTooLarge {
                partitions: usize::MAX / 2,
                radix: 1 << 16,
            }
        );
    }

    #[test]
    fn reset_clears_previous_pass_counts() {
        let mut plan = PassPlan::new(1, 2).unwrap();
        fill_histogram(&[1u32, 2, 3], 0, plan.mask(), plan.table_mut());

        plan.reset();

        assert!(plan.table_mut().iter().all(|&count| count == 0));
    }
}
