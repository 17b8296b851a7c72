//! Conflict-free scatter kernels. Each partition writes its elements into
//! the destination buffer at the cursor positions fixed by the sequencer.

use crate::key::Key;

/// Shared scatter destination, handed to every partition of one pass.
///
/// All partitions write through the same base pointer. The sequencer
/// guarantees their cursor runs never overlap, so no write in a pass races
/// another. An offset table that violated that would be a bug in the plan,
/// not a recoverable error, which is why nothing here checks for it beyond
/// debug assertions upstream.
#[derive(Clone, Copy)]
pub(crate) struct DestPtr<T>(pub(crate) *mut T);

// Only used for the disjoint writes described above.
unsafe impl<T: Send> Send for DestPtr<T> {}
unsafe impl<T: Send> Sync for DestPtr<T> {}

/// Scatters one partition's keys, walking the partition in ascending index
/// order.
///
/// Ascending order within the partition, plus partition-ordered cursors from
/// the sequencer, is what keeps elements with equal digits in their input
/// order.
///
/// # Safety
///
/// `cursors` must be this partition's row of the sequenced plan for exactly
/// this pass, and `dst` must point at a live buffer of the full input length
/// that no other partition writes inside this partition's cursor runs.
pub(crate) unsafe fn scatter_chunk<K: Key>(
    chunk: &[K],
    shift: u32,
    mask: usize,
    cursors: &mut [usize],
    dst: DestPtr<K>,
) {
    for &key in chunk {
        let digit = key.digit(shift, mask);
        let at = cursors[digit];
        cursors[digit] = at + 1;
        // SAFETY: `at` lies inside this partition's run for `digit`, which
        // is in bounds of `dst` and disjoint from every other partition's
        // runs per the caller contract.
        unsafe { dst.0.add(at).write(key) };
    }
}

/// Key-value variant of [`scatter_chunk`]: the value at each index moves to
/// exactly the slot its key moves to.
///
/// # Safety
///
/// Same contract as [`scatter_chunk`], for both destination buffers.
/// `chunk` and `chunk_values` must be the same partition of the same pass.
pub(crate) unsafe fn scatter_pairs_chunk<K: Key, V: Copy>(
    chunk: &[K],
    chunk_values: &[V],
    shift: u32,
    mask: usize,
    cursors: &mut [usize],
    dst_keys: DestPtr<K>,
    dst_values: DestPtr<V>,
) {
    debug_assert_eq!(chunk.len(), chunk_values.len());

    for (&key, &value) in chunk.iter().zip(chunk_values) {
        let digit = key.digit(shift, mask);
        let at = cursors[digit];
        cursors[digit] = at + 1;
        // SAFETY: as in `scatter_chunk`, for both buffers.
        unsafe {
            dst_keys.0.add(at).write(key);
            dst_values.0.add(at).write(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{fill_histogram, PassPlan};

    #[test]
    fn scatter_orders_one_digit_and_keeps_ties_in_input_order() {
        let keys = [0x201u32, 0x103, 0x202, 0x101, 0x102];
        let mut dst = [0u32; 5];

        let mut plan = PassPlan::new(1, 8).unwrap();
        fill_histogram(&keys, 0, plan.mask(), plan.table_mut());
        assert!(plan.sequence());

        // SAFETY: single partition, cursors span all of `dst`.
        unsafe {
            scatter_chunk(&keys, 0, plan.mask(), plan.table_mut(), DestPtr(dst.as_mut_ptr()));
        }

        // Sorted by the low byte only; ties keep input order.
        assert_eq!(dst, [0x201, 0x101, 0x202, 0x102, 0x103]);
    }

    #[test]
    fn pairs_scatter_moves_values_with_their_keys() {
        let keys = [2u32, 0, 2, 1];
        let values = ["two_a", "zero", "two_b", "one"];
        let mut dst_keys = [0u32; 4];
        let mut dst_values = [""; 4];

        let mut plan = PassPlan::new(1, 8).unwrap();
        fill_histogram(&keys, 0, plan.mask(), plan.table_mut());
        assert!(plan.sequence());

        // SAFETY: single partition, cursors span both destination buffers.
        unsafe {
            scatter_pairs_chunk(
                &keys,
                &values,
                0,
                plan.mask(),
                plan.table_mut(),
                DestPtr(dst_keys.as_mut_ptr()),
                DestPtr(dst_values.as_mut_ptr()),
            );
        }

        assert_eq!(dst_keys, [0, 1, 2, 2]);
        assert_eq!(dst_values, ["zero", "one", "two_a", "two_b"]);
    }

    #[test]
    fn partitioned_scatter_interleaves_runs_stably() {
        // Two partitions over the same digit mix. Partition 0's elements of
        // each digit must land before partition 1's.
        let keys = [1u32, 0, 1, 0, 1, 0];
        let (left, right) = keys.split_at(3);
        let mut dst = [u32::MAX; 6];

        let mut plan = PassPlan::new(2, 1).unwrap();
        {
            let table = plan.table_mut();
            let (row0, row1) = table.split_at_mut(2);
            fill_histogram(left, 0, 0b1, row0);
            fill_histogram(right, 0, 0b1, row1);
        }
        assert!(plan.sequence());

        {
            let dst = DestPtr(dst.as_mut_ptr());
            let table = plan.table_mut();
            let (row0, row1) = table.split_at_mut(2);
            // SAFETY: rows were sequenced from these exact chunks, so the
            // two partitions write disjoint runs of `dst`.
            unsafe {
                scatter_chunk(left, 0, 0b1, row0, dst);
                scatter_chunk(right, 0, 0b1, row1, dst);
            }
        }

        assert_eq!(dst, [0, 0, 0, 1, 1, 1]);
    }
}
