/// Sort key: a fixed-width unsigned integer with cheap digit extraction.
///
/// The engine never compares keys. It only ever reads them digit by digit,
/// so the key order it realizes is plain unsigned integer order. Callers
/// that want to sort by a signed or floating-point field encode it into an
/// order-preserving unsigned key first, see [`monotone`](crate::monotone).
///
/// This trait is sealed and implemented for `u8`, `u16`, `u32`, `u64`,
/// `u128` and `usize`. The scatter loops bank on keys being plain machine
/// integers, which is why downstream implementations are not accepted.
pub trait Key: Copy + Default + Send + Sync + private::Sealed {
    /// Width of the key type in bits.
    const BITS: u32;

    /// Returns the digit at bit offset `shift`, masked to the pass width.
    ///
    /// `mask` is `radix - 1` for the current digit width. A final pass that
    /// covers fewer than `radix_bits` bits needs no special casing: the
    /// shifted key has run out of set bits and the mask keeps the remainder.
    fn digit(self, shift: u32, mask: usize) -> usize;
}

macro_rules! impl_key {
    ($($t:ident)*) => ($(
        impl Key for $t {
            const BITS: u32 = <$t>::BITS;

            #[inline(always)]
            fn digit(self, shift: u32, mask: usize) -> usize {
                // The cast truncates to the low word, which is all the mask
                // can keep anyway.
                ((self >> shift) as usize) & mask
            }
        }

        impl private::Sealed for $t {}
    )*)
}

impl_key! { u8 u16 u32 u64 u128 usize }

mod private {
    pub trait Sealed {}
}
