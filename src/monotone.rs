//! Order-preserving unsigned encodings for signed and floating-point keys.
//!
//! The engine sorts plain unsigned integers in unsigned order. Callers with
//! signed or float sort fields encode them with these helpers before sorting
//! and decode afterwards. Every mapping is a bijection whose unsigned order
//! matches the source order; for floats that is the IEEE 754 total order,
//! with negative NaNs first and positive NaNs last.
//!
//! ```
//! use parsort::monotone;
//!
//! let mut keys: Vec<u32> = [0.5f32, -1.0, 12.25, -0.25]
//!     .iter()
//!     .map(|&v| monotone::from_f32(v))
//!     .collect();
//! parsort::sort(&mut keys);
//!
//! let sorted: Vec<f32> = keys.into_iter().map(monotone::to_f32).collect();
//! assert_eq!(sorted, [-1.0, -0.25, 0.5, 12.25]);
//! ```

/// Maps `i32` to `u32` preserving order by flipping the sign bit.
#[inline]
pub fn from_i32(v: i32) -> u32 {
    (v as u32) ^ (1 << 31)
}

/// Inverse of [`from_i32`].
#[inline]
pub fn to_i32(v: u32) -> i32 {
    (v ^ (1 << 31)) as i32
}

/// Maps `i64` to `u64` preserving order by flipping the sign bit.
#[inline]
pub fn from_i64(v: i64) -> u64 {
    (v as u64) ^ (1 << 63)
}

/// Inverse of [`from_i64`].
#[inline]
pub fn to_i64(v: u64) -> i64 {
    (v ^ (1 << 63)) as i64
}

/// Maps `f32` to `u32` preserving the total order. Negative values get the
/// whole word flipped, which reverses their order; non-negative values get
/// the sign bit set, which lifts them above every negative value.
#[inline]
pub fn from_f32(v: f32) -> u32 {
    let bits = v.to_bits();
    if bits & (1 << 31) != 0 {
        !bits
    } else {
        bits ^ (1 << 31)
    }
}

/// Inverse of [`from_f32`].
#[inline]
pub fn to_f32(v: u32) -> f32 {
    f32::from_bits(if v & (1 << 31) != 0 {
        v ^ (1 << 31)
    } else {
        !v
    })
}

/// Maps `f64` to `u64` preserving the total order, as [`from_f32`] does for
/// `f32`.
#[inline]
pub fn from_f64(v: f64) -> u64 {
    let bits = v.to_bits();
    if bits & (1 << 63) != 0 {
        !bits
    } else {
        bits ^ (1 << 63)
    }
}

/// Inverse of [`from_f64`].
#[inline]
pub fn to_f64(v: u64) -> f64 {
    f64::from_bits(if v & (1 << 63) != 0 {
        v ^ (1 << 63)
    } else {
        !v
    })
}
