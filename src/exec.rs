//! Partition geometry and fork-join dispatch of the per-pass stages.
//!
//! Every stage forks across partitions and joins before the next stage
//! starts; that join is the barrier the pass pipeline relies on. A stage
//! never reads what another partition wrote in the same stage. All rayon use
//! lives in this module.

use rayon::prelude::*;

use crate::key::Key;
use crate::plan::{self, PassPlan};
use crate::scatter::{self, DestPtr};
use crate::Tuning;

/// How one sort's input is split across execution units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Geometry {
    pub(crate) partitions: usize,
    pub(crate) chunk_len: usize,
}

impl Geometry {
    /// Resolves the partition count for `len` elements.
    ///
    /// An explicit partition count in the tuning is honored as given, capped
    /// at `len`; it exists so the partition-count independence of the output
    /// can be pinned in tests. The automatic choice stays on the calling
    /// thread below the parallel threshold and otherwise takes one partition
    /// per pool thread. Partitions that would be empty are dropped.
    pub(crate) fn resolve(len: usize, tuning: &Tuning) -> Self {
        debug_assert!(len >= 2);

        let requested = if tuning.partitions != 0 {
            tuning.partitions
        } else if len < tuning.parallel_min_len {
            1
        } else {
            rayon::current_num_threads()
        };

        let chunk_len = len.div_ceil(requested.clamp(1, len));
        Geometry {
            partitions: len.div_ceil(chunk_len),
            chunk_len,
        }
    }

    #[inline]
    pub(crate) fn parallel(&self) -> bool {
        self.partitions > 1
    }
}

/// Histogram stage: every partition counts digits into its private table
/// row.
pub(crate) fn histogram_stage<K: Key>(src: &[K], shift: u32, plan: &mut PassPlan, geo: Geometry) {
    let (radix, mask) = (plan.radix(), plan.mask());

    if geo.parallel() {
        plan.table_mut()
            .par_chunks_mut(radix)
            .zip(src.par_chunks(geo.chunk_len))
            .for_each(|(row, chunk)| plan::fill_histogram(chunk, shift, mask, row));
    } else {
        plan::fill_histogram(src, shift, mask, plan.table_mut());
    }
}

/// Scatter stage: every partition writes its disjoint cursor runs of `dst`.
///
/// The plan must have been sequenced from this pass's histogram before the
/// call.
pub(crate) fn scatter_stage<K: Key>(
    src: &[K],
    dst: &mut [K],
    shift: u32,
    plan: &mut PassPlan,
    geo: Geometry,
) {
    debug_assert_eq!(src.len(), dst.len());

    let (radix, mask) = (plan.radix(), plan.mask());
    let dst = DestPtr(dst.as_mut_ptr());

    if geo.parallel() {
        plan.table_mut()
            .par_chunks_mut(radix)
            .zip(src.par_chunks(geo.chunk_len))
            .for_each(|(cursors, chunk)| {
                // SAFETY: `cursors` is the sequenced row for exactly this
                // chunk, so the runs it spans are in bounds of `dst` and
                // disjoint from every other partition's.
                unsafe { scatter::scatter_chunk(chunk, shift, mask, cursors, dst) };
            });
    } else {
        // SAFETY: single partition, the cursors span all of `dst`.
        unsafe { scatter::scatter_chunk(src, shift, mask, plan.table_mut(), dst) };
    }
}

/// Key-value variant of [`scatter_stage`].
pub(crate) fn scatter_pairs_stage<K: Key, V: Copy + Send + Sync>(
    src_keys: &[K],
    src_values: &[V],
    dst_keys: &mut [K],
    dst_values: &mut [V],
    shift: u32,
    plan: &mut PassPlan,
    geo: Geometry,
) {
    debug_assert_eq!(src_keys.len(), src_values.len());
    debug_assert_eq!(src_keys.len(), dst_keys.len());
    debug_assert_eq!(src_values.len(), dst_values.len());

    let (radix, mask) = (plan.radix(), plan.mask());
    let dst_keys = DestPtr(dst_keys.as_mut_ptr());
    let dst_values = DestPtr(dst_values.as_mut_ptr());

    if geo.parallel() {
        plan.table_mut()
            .par_chunks_mut(radix)
            .zip(src_keys.par_chunks(geo.chunk_len))
            .zip(src_values.par_chunks(geo.chunk_len))
            .for_each(|((cursors, keys), values)| {
                // SAFETY: as in `scatter_stage`, for both buffers.
                unsafe {
                    scatter::scatter_pairs_chunk(
                        keys, values, shift, mask, cursors, dst_keys, dst_values,
                    )
                };
            });
    } else {
        // SAFETY: single partition, the cursors span both buffers.
        unsafe {
            scatter::scatter_pairs_chunk(
                src_keys,
                src_values,
                shift,
                mask,
                plan.table_mut(),
                dst_keys,
                dst_values,
            )
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuning(partitions: usize, parallel_min_len: usize) -> Tuning {
        Tuning {
            radix_bits: 8,
            partitions,
            parallel_min_len,
        }
    }

    #[test]
    fn auto_geometry_stays_sequential_below_the_threshold() {
        let geo = Geometry::resolve(100, &tuning(0, 1000));

        assert_eq!(geo.partitions, 1);
        assert_eq!(geo.chunk_len, 100);
        assert!(!geo.parallel());
    }

    #[test]
    fn explicit_partitions_override_the_threshold() {
        let geo = Geometry::resolve(100, &tuning(4, 1000));

        assert_eq!(geo.partitions, 4);
        assert_eq!(geo.chunk_len, 25);
        assert!(geo.parallel());
    }

    #[test]
    fn partitions_are_capped_at_the_element_count() {
        let geo = Geometry::resolve(3, &tuning(16, 0));

        assert_eq!(geo.partitions, 3);
        assert_eq!(geo.chunk_len, 1);
    }

    #[test]
    fn ragged_tail_partitions_are_not_padded() {
        // 10 elements over 4 requested partitions chunk as 3+3+3+1.
        let geo = Geometry::resolve(10, &tuning(4, 0));
        assert_eq!(geo.partitions, 4);
        assert_eq!(geo.chunk_len, 3);

        // 6 over 4 chunk as 2+2+2; the empty fourth partition is dropped.
        let geo = Geometry::resolve(6, &tuning(4, 0));
        assert_eq!(geo.partitions, 3);
        assert_eq!(geo.chunk_len, 2);
    }

    #[test]
    fn auto_geometry_above_the_threshold_uses_the_pool() {
        let len = 100_000;
        let geo = Geometry::resolve(len, &tuning(0, 1024));

        // One partition per pool thread, minus any that would come up empty.
        assert!(geo.partitions <= rayon::current_num_threads());
        assert!(geo.parallel() || rayon::current_num_threads() == 1);

        // Chunks of `chunk_len` cover the input and leave no empty partition.
        assert!(geo.partitions * geo.chunk_len >= len);
        assert!((geo.partitions - 1) * geo.chunk_len < len);
    }
}
