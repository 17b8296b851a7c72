use thiserror::Error;

/// Errors reported by the fallible sort entry points.
///
/// Every variant is detected before the first pass runs: a call that returns
/// an error has not touched either caller buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SortError {
    /// [`sort_pairs`](crate::sort_pairs) was handed key and value slices of
    /// different lengths.
    #[error("keys and values have different lengths (keys: {keys}, values: {values})")]
    KeyValueLenMismatch { keys: usize, values: usize },

    /// The configured digit width is outside the supported `1..=16` range.
    #[error("radix width must be between 1 and 16 bits, got {0}")]
    InvalidRadixBits(u32),

    /// The per-pass count table of `partitions * radix` entries is not
    /// addressable. Only reachable with extreme tunings on narrow targets.
    #[error("pass plan of {partitions} partitions x {radix} buckets overflows usize")]
    PlanTooLarge { partitions: usize, radix: usize },
}
