/// Trait for converting numeric-like values into a `u64`.
///
/// This is used to normalize backoff hints into milliseconds for
/// [`core::time::Duration::from_millis`]. Values that do not fit saturate to
/// [`u64::MAX`].
pub trait ToU64 {
    /// Converts to `u64`, saturating.
    fn to_u64(self) -> u64;
}

impl ToU64 for u8 {
    fn to_u64(self) -> u64 {
        u64::from(self)
    }
}

impl ToU64 for u16 {
    fn to_u64(self) -> u64 {
        u64::from(self)
    }
}

impl ToU64 for u32 {
    fn to_u64(self) -> u64 {
        u64::from(self)
    }
}

impl ToU64 for u64 {
    fn to_u64(self) -> u64 {
        self
    }
}

impl ToU64 for u128 {
    fn to_u64(self) -> u64 {
        u64::try_from(self).unwrap_or(u64::MAX)
    }
}
