use crate::id::Id;

/// Trait for layout-compatible ULID-style identifiers.
///
/// This trait abstracts a `timestamp` and a `random` partition over a
/// fixed-size integer (e.g., `u128`) used for high-entropy time-sortable ID
/// generation. Monotonic generators treat the random partition as a counter
/// within one millisecond.
pub trait UlidId: Id {
    /// Returns the timestamp portion of the ID.
    fn timestamp(&self) -> Self::Ty;

    /// Returns the random portion of the ID.
    fn random(&self) -> Self::Ty;

    /// Returns the maximum possible value for the timestamp field.
    fn max_timestamp() -> Self::Ty;

    /// Returns the maximum possible value for the random field.
    fn max_random() -> Self::Ty;

    /// Constructs a new ULID from its components.
    #[must_use]
    fn from_components(timestamp: Self::Ty, random: Self::Ty) -> Self;

    /// Returns true if the random portion can be incremented.
    fn has_random_room(&self) -> bool {
        self.random() < Self::max_random()
    }

    /// Returns the next random value.
    fn next_random(&self) -> Self::Ty {
        self.random() + Self::ONE
    }

    /// Returns a new ID with the random portion incremented.
    #[must_use]
    fn increment_random(&self) -> Self {
        Self::from_components(self.timestamp(), self.next_random())
    }

    /// Returns a new ID for a newer timestamp with fresh random bits.
    #[must_use]
    fn rollover_to_timestamp(&self, ts: Self::Ty, rand: Self::Ty) -> Self {
        Self::from_components(ts, rand)
    }

    /// Returns `true` if no reserved bit is set.
    fn is_valid(&self) -> bool;

    /// Returns a copy with every reserved bit cleared.
    #[must_use]
    fn into_valid(self) -> Self;
}

/// A macro for defining a bit layout for a custom Ulid using three required
/// components: `reserved`, `timestamp`, and `random`.
///
/// These components are always laid out from **most significant bit (MSB)** to
/// **least significant bit (LSB)** - in that exact order.
///
/// - The first field (`reserved`) occupies the highest bits.
/// - The last field (`random`) occupies the lowest bits.
/// - The total number of bits **must exactly equal** the size of the backing
///   integer type (`u64`, `u128`, etc.). If it doesn't, the macro will trigger
///   a compile-time assertion failure.
///
/// ```text
/// define_ulid!(
///     <TypeName>, <IntegerType>,
///     reserved: <bits>,
///     timestamp: <bits>,
///     random: <bits>
/// );
/// ```
///
/// ## Example: A non-monotonic ULID layout
/// ```rust
/// use idkit::define_ulid;
///
/// define_ulid!(
///     MyCustomId, u128,
///     reserved: 0,
///     timestamp: 48,
///     random: 80
/// );
///
/// let id = MyCustomId::from(1, 2);
/// assert_eq!(id.timestamp(), 1);
/// assert_eq!(id.random(), 2);
/// ```
#[macro_export]
macro_rules! define_ulid {
    (
        $(#[$meta:meta])*
        $name:ident, $int:ty,
        reserved: $reserved_bits:expr,
        timestamp: $timestamp_bits:expr,
        random: $random_bits:expr
    ) => {
        $(#[$meta])*
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        pub struct $name {
            id: $int,
        }

        const _: () = {
            // Compile-time check: total bit width _must_ equal the backing
            // type. This is to avoid aliasing surprises.
            assert!(
                $reserved_bits + $timestamp_bits + $random_bits == <$int>::BITS,
                "Layout must match underlying type width"
            );
        };

        impl $name {
            pub const RESERVED_BITS: $int = $reserved_bits;
            pub const TIMESTAMP_BITS: $int = $timestamp_bits;
            pub const RANDOM_BITS: $int = $random_bits;

            pub const RANDOM_SHIFT: $int = 0;
            pub const TIMESTAMP_SHIFT: $int = Self::RANDOM_SHIFT + Self::RANDOM_BITS;
            pub const RESERVED_SHIFT: $int = Self::TIMESTAMP_SHIFT + Self::TIMESTAMP_BITS;

            pub const TIMESTAMP_MASK: $int = ((1 << Self::TIMESTAMP_BITS) - 1);
            pub const RANDOM_MASK: $int = ((1 << Self::RANDOM_BITS) - 1);

            const fn valid_mask() -> $int {
                (Self::TIMESTAMP_MASK << Self::TIMESTAMP_SHIFT) |
                (Self::RANDOM_MASK << Self::RANDOM_SHIFT)
            }

            #[must_use]
            pub const fn from(timestamp: $int, random: $int) -> Self {
                let t = (timestamp & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
                let r = (random & Self::RANDOM_MASK) << Self::RANDOM_SHIFT;
                Self { id: t | r }
            }

            /// Extracts the timestamp from the packed ID.
            #[must_use]
            pub const fn timestamp(&self) -> $int {
                (self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK
            }
            /// Extracts the random number from the packed ID.
            #[must_use]
            pub const fn random(&self) -> $int {
                (self.id >> Self::RANDOM_SHIFT) & Self::RANDOM_MASK
            }

            /// Converts this type into its raw type representation
            #[must_use]
            pub const fn to_raw(&self) -> $int {
                self.id
            }

            /// Converts a raw type into this type
            #[must_use]
            pub const fn from_raw(raw: $int) -> Self {
                Self { id: raw }
            }

            /// Builds an ID from a millisecond timestamp and a custom random
            /// source implementing [`RandSource`].
            ///
            /// [`RandSource`]: crate::rand::RandSource
            #[must_use]
            pub fn from_timestamp_and_rand<R>(timestamp: $int, rng: &R) -> Self
            where
                R: $crate::RandSource<$int>,
            {
                Self::from(timestamp, rng.rand())
            }
        }

        impl $crate::Id for $name {
            type Ty = $int;
            const ZERO: $int = 0;
            const ONE: $int = 1;

            fn to_raw(&self) -> Self::Ty {
                self.to_raw()
            }

            fn from_raw(raw: Self::Ty) -> Self {
                Self::from_raw(raw)
            }
        }

        impl $crate::UlidId for $name {
            fn timestamp(&self) -> Self::Ty {
                self.timestamp()
            }

            fn random(&self) -> Self::Ty {
                self.random()
            }

            fn max_timestamp() -> Self::Ty {
                Self::TIMESTAMP_MASK
            }

            fn max_random() -> Self::Ty {
                Self::RANDOM_MASK
            }

            fn from_components(timestamp: $int, random: $int) -> Self {
                // Random bits can frequently overflow, but this is okay since
                // they're masked. The timestamp should never overflow.
                debug_assert!(timestamp <= Self::TIMESTAMP_MASK, "timestamp overflow");
                Self::from(timestamp, random)
            }

            fn is_valid(&self) -> bool {
                (self.to_raw() & !Self::valid_mask()) == 0
            }

            fn into_valid(self) -> Self {
                let raw = self.to_raw() & Self::valid_mask();
                Self::from_raw(raw)
            }
        }

        impl core::fmt::Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                let full = core::any::type_name::<Self>();
                let name = full.rsplit("::").next().unwrap_or(full);
                let mut dbg = f.debug_struct(name);
                dbg.field("id", &format_args!("{:} (0x{:x})", self.to_raw(), self.to_raw()));
                dbg.field("timestamp", &format_args!("{:} (0x{:x})", self.timestamp(), self.timestamp()));
                dbg.field("random", &format_args!("{:} (0x{:x})", self.random(), self.random()));
                dbg.finish()
            }
        }
    };
}

define_ulid!(
    /// A 128-bit ULID
    ///
    /// - 0 bits reserved
    /// - 48 bits timestamp
    /// - 80 bits random
    ///
    /// ```text
    ///  Bit Index:  127            80 79           0
    ///              +----------------+-------------+
    ///  Field:      | timestamp (48) | random (80) |
    ///              +----------------+-------------+
    ///              |<-- MSB -- 128 bits -- LSB -->|
    /// ```
    ULID, u128,
    reserved: 0,
    timestamp: 48,
    random: 80
);

impl ULID {
    /// Returns this ULID's timestamp as a [`std::time::SystemTime`].
    #[must_use]
    pub fn datetime(&self) -> std::time::SystemTime {
        let millis = u64::try_from(self.timestamp()).unwrap_or(u64::MAX);
        std::time::UNIX_EPOCH + core::time::Duration::from_millis(millis)
    }
}

impl core::fmt::Display for ULID {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&crate::codec::encode_ulid(self.id))
    }
}

impl core::str::FromStr for ULID {
    type Err = crate::codec::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::codec::decode_ulid(s).map(Self::from_raw)
    }
}

define_ulid!(
    /// Generator state behind a UUIDv7: the 48-bit Unix millisecond timestamp
    /// and the 74 bits RFC 9562 leaves for `rand_a` and `rand_b`. The version
    /// and variant bits are spliced in when the UUID is rendered, see
    /// [`UuidV7State::to_uuid_bits`].
    ///
    /// ```text
    ///  Bit Index:  127          122 121            74 73           0
    ///              +--------------+----------------+-------------+
    ///  Field:      | reserved (6) | timestamp (48) | random (74) |
    ///              +--------------+----------------+-------------+
    /// ```
    UuidV7State, u128,
    reserved: 6,
    timestamp: 48,
    random: 74
);

impl UuidV7State {
    const RAND_B_BITS: u32 = 62;
    const RAND_B_MASK: u128 = (1 << Self::RAND_B_BITS) - 1;

    /// Lays the state out as a version 7, RFC 4122 variant UUID.
    ///
    /// ```text
    ///  unix_ts_ms (48) | ver (4) | rand_a (12) | var (2) | rand_b (62)
    /// ```
    ///
    /// `rand_a` takes the top 12 random bits, so incrementing the random
    /// field keeps the rendered UUIDs ordered.
    #[must_use]
    pub const fn to_uuid_bits(&self) -> u128 {
        let random = self.random();
        let rand_a = random >> Self::RAND_B_BITS;
        let rand_b = random & Self::RAND_B_MASK;
        (self.timestamp() << 80) | (0x7 << 76) | (rand_a << 64) | (0b10 << 62) | rand_b
    }
}
