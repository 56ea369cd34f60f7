use core::{
    fmt,
    hash::Hash,
    ops::{Add, AddAssign, BitAnd, BitOr, Not, Shl, Shr, Sub, SubAssign},
};

use crate::id::ToU64;

/// A trait for types that wrap a primitive scalar identifier.
///
/// This is used to abstract over the raw scalar type behind an ID (e.g., `u64`,
/// `u128`).
///
/// Types implementing `Id` must define a scalar type `Ty` and provide
/// conversion to/from this raw representation.
pub trait Id: Copy + Clone + PartialOrd + Ord + PartialEq + Eq + Hash + fmt::Debug {
    /// Zero value (used for resetting the sequence)
    const ZERO: Self::Ty;

    /// One value (used for incrementing the sequence)
    const ONE: Self::Ty;

    /// Scalar type for all bit fields (typically `u64` or `u128`)
    type Ty: Copy
        + Clone
        + Default
        + fmt::Debug
        + fmt::Display
        + Ord
        + PartialOrd
        + Eq
        + PartialEq
        + Hash
        + Send
        + Sync
        // For backoff sleeps
        + ToU64
        + From<u8>
        // Arithmetic
        + Add<Output = Self::Ty>
        + AddAssign<Self::Ty>
        + Sub<Output = Self::Ty>
        + SubAssign<Self::Ty>
        // Bitwise
        + BitOr<Output = Self::Ty>
        + BitAnd<Output = Self::Ty>
        + Not<Output = Self::Ty>
        + Shl<u32, Output = Self::Ty>
        + Shr<u32, Output = Self::Ty>;

    /// Converts this type into its raw type representation
    fn to_raw(&self) -> Self::Ty;

    /// Converts a raw type into this type
    fn from_raw(raw: Self::Ty) -> Self;
}
