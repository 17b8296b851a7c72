use std::fmt::Debug;

use parsort::{Key, SortError, Tuning};

use sort_test_tools::{instantiate_sort_tests, Sort};

/// Narrow digits and a forced partition count push every input through the
/// multi-partition plan, including the tiny ones.
const TUNING: Tuning = Tuning {
    radix_bits: 4,
    partitions: 3,
    parallel_min_len: 0,
};

struct SortImpl {}

impl Sort for SortImpl {
    fn name() -> String {
        "parsort_stable_radix4_parts3".into()
    }

    fn sort<K>(keys: &mut [K])
    where
        K: Key + Ord + Debug,
    {
        parsort::sort_with_tuning(keys, TUNING).unwrap();
    }

    fn sort_pairs<K, V>(keys: &mut [K], values: &mut [V]) -> Result<(), SortError>
    where
        K: Key + Ord + Debug,
        V: Copy + Send + Sync + PartialEq + Debug,
    {
        parsort::sort_pairs_with_tuning(keys, values, TUNING)
    }
}

instantiate_sort_tests!(SortImpl);
