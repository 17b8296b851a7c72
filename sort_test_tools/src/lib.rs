use std::fmt::Debug;

use parsort::{Key, SortError};

/// Glue trait implemented by every sort configuration under test.
///
/// The engine itself never compares keys, but the test oracle does, hence
/// the extra `Ord + Debug` bounds on top of [`Key`].
pub trait Sort {
    fn name() -> String;

    fn sort<K>(keys: &mut [K])
    where
        K: Key + Ord + Debug;

    fn sort_pairs<K, V>(keys: &mut [K], values: &mut [V]) -> Result<(), SortError>
    where
        K: Key + Ord + Debug,
        V: Copy + Send + Sync + PartialEq + Debug;
}

pub mod patterns;
