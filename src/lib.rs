//! Stable radix sort for unsigned integer keys, with partition-parallel
//! passes.
//!
//! The implementation is a least-significant-digit counting sort: each pass
//! histograms one digit of every key, turns the counts into an offset table
//! with a two-level exclusive prefix sum, and scatters elements into an
//! auxiliary buffer in ascending index order. Passes run from the lowest
//! digit to the highest, ping-ponging between the caller's buffer and the
//! auxiliary one; a final copy-back guarantees the result ends up in the
//! caller's buffer. Runtime is `O(passes * n)` with one scratch allocation
//! of `n` elements (two for [`sort_pairs`]), and no key is ever compared
//! against another.
//!
//! Within a pass the input is split into partitions that are histogrammed
//! and scattered in parallel on the rayon pool. The offset table assigns
//! every partition disjoint destination runs in partition order, so the
//! output is identical for every partition count and every digit width, and
//! equal keys always keep their input order.
//!
//! Keys are unsigned integers, sorted in unsigned order. To sort by signed
//! or floating-point fields, encode them with the order-preserving mappings
//! in [`monotone`] and decode after sorting.
//!
//! ```
//! let mut keys = vec![0x0300u32, 0x0102, 0x0201, 0x0103];
//! parsort::sort(&mut keys);
//! assert_eq!(keys, vec![0x0102, 0x0103, 0x0201, 0x0300]);
//! ```

use log::trace;

mod error;
mod exec;
mod key;
mod plan;
mod scatter;

pub mod monotone;

pub use error::SortError;
pub use key::Key;

use plan::PassPlan;

/// Execution and digit-width knobs for the sort.
///
/// The defaults are right for virtually every caller. The explicit fields
/// exist for benchmarking and for pinning down the output-independence
/// properties in tests: any radix width and any partition count produce the
/// same output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tuning {
    /// Bits per digit, `1..=16`. A key of `B` bits takes
    /// `ceil(B / radix_bits)` passes; when the width does not divide `B`,
    /// the last pass covers only the remaining high bits.
    pub radix_bits: u32,

    /// Partition count. `0` resolves to one partition per worker thread,
    /// falling back to a single partition below `parallel_min_len`. A
    /// non-zero count is honored as given, capped at the element count.
    pub partitions: usize,

    /// Inputs shorter than this stay on the calling thread when
    /// `partitions` is `0`.
    pub parallel_min_len: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            radix_bits: 8,
            partitions: 0,
            parallel_min_len: 8 * 1024,
        }
    }
}

impl Tuning {
    fn validate(&self) -> Result<(), SortError> {
        if !(1..=16).contains(&self.radix_bits) {
            return Err(SortError::InvalidRadixBits(self.radix_bits));
        }

        Ok(())
    }
}

/// Sorts `keys` in ascending unsigned order, preserving the relative order
/// of equal keys.
///
/// Equivalent to [`sort_with_tuning`] with [`Tuning::default`], which cannot
/// fail.
///
/// ```
/// let mut keys = [5u32, 3, 5, 1, 3];
/// parsort::sort(&mut keys);
/// assert_eq!(keys, [1, 3, 3, 5, 5]);
/// ```
pub fn sort<K: Key>(keys: &mut [K]) {
    if let Err(err) = radix_sort(keys, &Tuning::default()) {
        // Only tunings can fail validation and the defaults are valid.
        unreachable!("{err}");
    }
}

/// Sorts `keys` with an explicit [`Tuning`].
///
/// On error the slice is untouched.
///
/// ```
/// use parsort::Tuning;
///
/// let mut keys = [258u32, 1, 257, 0];
/// let tuning = Tuning { radix_bits: 4, ..Tuning::default() };
/// parsort::sort_with_tuning(&mut keys, tuning)?;
/// assert_eq!(keys, [0, 1, 257, 258]);
/// # Ok::<(), parsort::SortError>(())
/// ```
pub fn sort_with_tuning<K: Key>(keys: &mut [K], tuning: Tuning) -> Result<(), SortError> {
    radix_sort(keys, &tuning)
}

/// Sorts `keys` in ascending unsigned order and applies the same
/// rearrangement to `values`, so `values[i]` travels with `keys[i]`.
///
/// Stability is observable here: values attached to equal keys come out in
/// their input order. The slices must have equal lengths; on error both are
/// untouched. Handing the same storage in as both keys and values cannot
/// compile, two `&mut` slices never overlap.
///
/// ```
/// let mut keys = [5u32, 3, 5, 1, 3];
/// let mut values = ["e", "c", "d", "a", "b"];
/// parsort::sort_pairs(&mut keys, &mut values)?;
/// assert_eq!(keys, [1, 3, 3, 5, 5]);
/// assert_eq!(values, ["a", "c", "b", "e", "d"]);
/// # Ok::<(), parsort::SortError>(())
/// ```
pub fn sort_pairs<K: Key, V: Copy + Send + Sync>(
    keys: &mut [K],
    values: &mut [V],
) -> Result<(), SortError> {
    sort_pairs_with_tuning(keys, values, Tuning::default())
}

/// Key-value variant of [`sort_with_tuning`].
pub fn sort_pairs_with_tuning<K: Key, V: Copy + Send + Sync>(
    keys: &mut [K],
    values: &mut [V],
    tuning: Tuning,
) -> Result<(), SortError> {
    if keys.len() != values.len() {
        return Err(SortError::KeyValueLenMismatch {
            keys: keys.len(),
            values: values.len(),
        });
    }

    radix_sort_pairs(keys, values, &tuning)
}

/// Pass controller for the key-only sort.
fn radix_sort<K: Key>(keys: &mut [K], tuning: &Tuning) -> Result<(), SortError> {
    tuning.validate()?;

    let len = keys.len();
    if len < 2 {
        return Ok(());
    }

    let geo = exec::Geometry::resolve(len, tuning);
    let mut plan = PassPlan::new(geo.partitions, tuning.radix_bits)?;
    let passes = K::BITS.div_ceil(tuning.radix_bits);

    trace!(
        "radix sort: len={len} passes={passes} partitions={} radix_bits={}",
        geo.partitions,
        tuning.radix_bits
    );

    let mut aux = vec![K::default(); len];
    // Which buffer currently holds the data. Passes that would be identity
    // permutations are skipped, so this is not simply the pass parity.
    let mut in_aux = false;

    for pass in 0..passes {
        let shift = pass * tuning.radix_bits;
        let (src, dst): (&[K], &mut [K]) = if in_aux {
            (&aux[..], &mut *keys)
        } else {
            (&*keys, &mut aux[..])
        };

        plan.reset();
        exec::histogram_stage(src, shift, &mut plan, geo);
        if !plan.sequence() {
            continue;
        }
        exec::scatter_stage(src, dst, shift, &mut plan, geo);
        in_aux = !in_aux;
    }

    if in_aux {
        keys.copy_from_slice(&aux);
    }

    Ok(())
}

/// Pass controller for the key-value sort. Mirrors [`radix_sort`] with the
/// value buffers riding along through every scatter and the copy-back.
fn radix_sort_pairs<K: Key, V: Copy + Send + Sync>(
    keys: &mut [K],
    values: &mut [V],
    tuning: &Tuning,
) -> Result<(), SortError> {
    debug_assert_eq!(keys.len(), values.len());
    tuning.validate()?;

    let len = keys.len();
    if len < 2 {
        return Ok(());
    }

    let geo = exec::Geometry::resolve(len, tuning);
    let mut plan = PassPlan::new(geo.partitions, tuning.radix_bits)?;
    let passes = K::BITS.div_ceil(tuning.radix_bits);

    trace!(
        "radix sort pairs: len={len} passes={passes} partitions={} radix_bits={}",
        geo.partitions,
        tuning.radix_bits
    );

    let mut aux_keys = vec![K::default(); len];
    let mut aux_values = values.to_vec();
    let mut in_aux = false;

    for pass in 0..passes {
        let shift = pass * tuning.radix_bits;
        let (src_keys, src_values, dst_keys, dst_values): (&[K], &[V], &mut [K], &mut [V]) =
            if in_aux {
                (&aux_keys[..], &aux_values[..], &mut *keys, &mut *values)
            } else {
                (&*keys, &*values, &mut aux_keys[..], &mut aux_values[..])
            };

        plan.reset();
        exec::histogram_stage(src_keys, shift, &mut plan, geo);
        if !plan.sequence() {
            continue;
        }
        exec::scatter_pairs_stage(
            src_keys, src_values, dst_keys, dst_values, shift, &mut plan, geo,
        );
        in_aux = !in_aux;
    }

    if in_aux {
        keys.copy_from_slice(&aux_keys);
        values.copy_from_slice(&aux_values);
    }

    Ok(())
}
