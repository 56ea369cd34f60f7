use core::fmt;

use crate::id::Id;

/// A trait representing a layout-compatible Snowflake ID.
///
/// This trait abstracts the core behavior of a Snowflake-style ID with separate
/// bit fields for timestamp, machine ID, and sequence. Field order inside the
/// integer is up to the layout; generators only go through these accessors.
///
/// # Example
///
/// ```
/// use idkit::{SnowflakeId, SnowflakeTwitterId};
///
/// let id = SnowflakeTwitterId::from(1000, 2, 1);
/// assert_eq!(id.timestamp(), 1000);
/// assert_eq!(id.machine_id(), 2);
/// assert_eq!(id.sequence(), 1);
/// ```
pub trait SnowflakeId: Id {
    /// Returns the timestamp portion of the ID.
    fn timestamp(&self) -> Self::Ty;

    /// Returns the maximum possible value for the timestamp field.
    fn max_timestamp() -> Self::Ty;

    /// Returns the machine ID portion of the ID.
    fn machine_id(&self) -> Self::Ty;

    /// Returns the maximum possible value for the `machine_id` field.
    fn max_machine_id() -> Self::Ty;

    /// Returns the sequence portion of the ID.
    fn sequence(&self) -> Self::Ty;

    /// Returns the maximum possible value for the sequence field.
    fn max_sequence() -> Self::Ty;

    /// Constructs a new Snowflake ID from its components.
    #[must_use]
    fn from_components(timestamp: Self::Ty, machine_id: Self::Ty, sequence: Self::Ty) -> Self;

    /// Returns true if the current sequence value can be incremented.
    fn has_sequence_room(&self) -> bool {
        self.sequence() < Self::max_sequence()
    }

    /// Returns the next sequence value.
    fn next_sequence(&self) -> Self::Ty {
        self.sequence() + Self::ONE
    }

    /// Returns a new ID with the sequence incremented.
    #[must_use]
    fn increment_sequence(&self) -> Self {
        Self::from_components(self.timestamp(), self.machine_id(), self.next_sequence())
    }

    /// Returns a new ID for a newer timestamp with sequence reset to zero.
    #[must_use]
    fn rollover_to_timestamp(&self, ts: Self::Ty) -> Self {
        Self::from_components(ts, self.machine_id(), Self::ZERO)
    }

    /// Returns `true` if no reserved bit is set.
    fn is_valid(&self) -> bool;

    /// Returns a copy with every reserved bit cleared.
    #[must_use]
    fn into_valid(self) -> Self;
}

/// A macro for defining a bit layout for a custom Snowflake ID using four
/// required components: `reserved`, `timestamp`, `machine_id`, and `sequence`.
///
/// These components are always laid out from **most significant bit (MSB)** to
/// **least significant bit (LSB)** - in that exact order. The total number of
/// bits **must exactly equal** the size of the backing integer type, otherwise
/// a compile-time assertion fails.
///
/// ```text
/// define_snowflake_id!(
///     <TypeName>, <IntegerType>,
///     reserved: <bits>,
///     timestamp: <bits>,
///     machine_id: <bits>,
///     sequence: <bits>
/// );
/// ```
///
/// ## Example
/// ```rust
/// use idkit::define_snowflake_id;
///
/// define_snowflake_id!(
///     MyCustomId, u64,
///     reserved: 0,
///     timestamp: 40,
///     machine_id: 14,
///     sequence: 10
/// );
///
/// let id = MyCustomId::from(7, 3, 1);
/// assert_eq!(id.machine_id(), 3);
/// ```
#[macro_export]
macro_rules! define_snowflake_id {
    (
        $(#[$meta:meta])*
        $name:ident, $int:ty,
        reserved: $reserved_bits:expr,
        timestamp: $timestamp_bits:expr,
        machine_id: $machine_bits:expr,
        sequence: $sequence_bits:expr
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
                $reserved_bits + $timestamp_bits + $machine_bits + $sequence_bits == <$int>::BITS,
                "Layout must match underlying type width"
            );
        };

        impl $name {
            pub const RESERVED_BITS: $int = $reserved_bits;
            pub const TIMESTAMP_BITS: $int = $timestamp_bits;
            pub const MACHINE_ID_BITS: $int = $machine_bits;
            pub const SEQUENCE_BITS: $int = $sequence_bits;

            pub const SEQUENCE_SHIFT: $int = 0;
            pub const MACHINE_ID_SHIFT: $int = Self::SEQUENCE_SHIFT + Self::SEQUENCE_BITS;
            pub const TIMESTAMP_SHIFT: $int = Self::MACHINE_ID_SHIFT + Self::MACHINE_ID_BITS;
            pub const RESERVED_SHIFT: $int = Self::TIMESTAMP_SHIFT + Self::TIMESTAMP_BITS;

            pub const TIMESTAMP_MASK: $int = ((1 << Self::TIMESTAMP_BITS) - 1);
            pub const MACHINE_ID_MASK: $int = ((1 << Self::MACHINE_ID_BITS) - 1);
            pub const SEQUENCE_MASK: $int = ((1 << Self::SEQUENCE_BITS) - 1);

            const fn valid_mask() -> $int {
                (Self::TIMESTAMP_MASK << Self::TIMESTAMP_SHIFT)
                    | (Self::MACHINE_ID_MASK << Self::MACHINE_ID_SHIFT)
                    | (Self::SEQUENCE_MASK << Self::SEQUENCE_SHIFT)
            }

            #[must_use]
            pub const fn from(timestamp: $int, machine_id: $int, sequence: $int) -> Self {
                let t = (timestamp & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
                let m = (machine_id & Self::MACHINE_ID_MASK) << Self::MACHINE_ID_SHIFT;
                let s = (sequence & Self::SEQUENCE_MASK) << Self::SEQUENCE_SHIFT;
                Self { id: t | m | s }
            }

            /// Extracts the timestamp from the packed ID.
            #[must_use]
            pub const fn timestamp(&self) -> $int {
                (self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK
            }

            /// Extracts the machine ID from the packed ID.
            #[must_use]
            pub const fn machine_id(&self) -> $int {
                (self.id >> Self::MACHINE_ID_SHIFT) & Self::MACHINE_ID_MASK
            }

            /// Extracts the sequence number from the packed ID.
            #[must_use]
            pub const fn sequence(&self) -> $int {
                (self.id >> Self::SEQUENCE_SHIFT) & Self::SEQUENCE_MASK
            }

            /// Returns the maximum representable machine ID.
            #[must_use]
            pub const fn max_machine_id() -> $int {
                Self::MACHINE_ID_MASK
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

        impl $crate::SnowflakeId for $name {
            fn timestamp(&self) -> Self::Ty {
                self.timestamp()
            }

            fn max_timestamp() -> Self::Ty {
                Self::TIMESTAMP_MASK
            }

            fn machine_id(&self) -> Self::Ty {
                self.machine_id()
            }

            fn max_machine_id() -> Self::Ty {
                Self::MACHINE_ID_MASK
            }

            fn sequence(&self) -> Self::Ty {
                self.sequence()
            }

            fn max_sequence() -> Self::Ty {
                Self::SEQUENCE_MASK
            }

            fn from_components(timestamp: $int, machine_id: $int, sequence: $int) -> Self {
                debug_assert!(timestamp <= Self::TIMESTAMP_MASK, "timestamp overflow");
                debug_assert!(machine_id <= Self::MACHINE_ID_MASK, "machine_id overflow");
                debug_assert!(sequence <= Self::SEQUENCE_MASK, "sequence overflow");
                Self::from(timestamp, machine_id, sequence)
            }

            fn is_valid(&self) -> bool {
                (self.to_raw() & !Self::valid_mask()) == 0
            }

            fn into_valid(self) -> Self {
                Self::from_raw(self.to_raw() & Self::valid_mask())
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.id)
            }
        }

        impl core::fmt::Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                let full = core::any::type_name::<Self>();
                let name = full.rsplit("::").next().unwrap_or(full);
                f.debug_struct(name)
                    .field("id", &format_args!("{:} (0x{:x})", self.to_raw(), self.to_raw()))
                    .field("timestamp", &self.timestamp())
                    .field("machine_id", &self.machine_id())
                    .field("sequence", &self.sequence())
                    .finish()
            }
        }
    };
}

define_snowflake_id!(
    /// A 64-bit Snowflake ID using the Twitter layout
    ///
    /// - 1 bit reserved
    /// - 41 bits timestamp (ms since [`TWITTER_EPOCH`])
    /// - 10 bits machine ID (node)
    /// - 12 bits sequence
    ///
    /// ```text
    ///  Bit Index:  63           63 62            22 21             12 11             0
    ///              +--------------+----------------+-----------------+---------------+
    ///  Field:      | reserved (1) | timestamp (41) | machine ID (10) | sequence (12) |
    ///              +--------------+----------------+-----------------+---------------+
    ///              |<----------- MSB ---------- 64 bits ----------- LSB ------------>|
    /// ```
    /// [`TWITTER_EPOCH`]: crate::time::TWITTER_EPOCH
    SnowflakeTwitterId, u64,
    reserved: 1,
    timestamp: 41,
    machine_id: 10,
    sequence: 12
);

define_snowflake_id!(
    /// Generator state behind an XID: seconds since the Unix epoch and the
    /// 24-bit counter. The machine and pid bytes are constant per process and
    /// live in the generator, not in the state.
    ///
    /// ```text
    ///  Bit Index:  63           56 55            24 23             0
    ///              +--------------+----------------+---------------+
    ///  Field:      | reserved (8) | timestamp (32) | counter (24)  |
    ///              +--------------+----------------+---------------+
    /// ```
    XidState, u64,
    reserved: 8,
    timestamp: 32,
    machine_id: 0,
    sequence: 24
);

/// A 63-bit Sonyflake ID.
///
/// - 1 bit reserved
/// - 39 bits time in 10 ms units since [`SONYFLAKE_EPOCH`]
/// - 8 bits sequence
/// - 16 bits machine ID
///
/// ```text
///  Bit Index:  63           63 62            24 23            16 15              0
///              +--------------+----------------+---------------+-----------------+
///  Field:      | reserved (1) | timestamp (39) | sequence (8)  | machine ID (16) |
///              +--------------+----------------+---------------+-----------------+
/// ```
///
/// Unlike Twitter's layout the sequence sits above the machine ID, so the type
/// is written out by hand rather than through [`define_snowflake_id!`].
///
/// [`SONYFLAKE_EPOCH`]: crate::time::SONYFLAKE_EPOCH
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct SonyflakeId {
    id: u64,
}

impl SonyflakeId {
    pub const TIMESTAMP_MASK: u64 = (1 << 39) - 1;
    pub const SEQUENCE_MASK: u64 = (1 << 8) - 1;
    pub const MACHINE_ID_MASK: u64 = (1 << 16) - 1;

    pub const TIMESTAMP_SHIFT: u64 = 24;
    pub const SEQUENCE_SHIFT: u64 = 16;
    pub const MACHINE_ID_SHIFT: u64 = 0;

    const VALID_MASK: u64 = (Self::TIMESTAMP_MASK << Self::TIMESTAMP_SHIFT)
        | (Self::SEQUENCE_MASK << Self::SEQUENCE_SHIFT)
        | Self::MACHINE_ID_MASK;

    #[must_use]
    pub const fn from(timestamp: u64, machine_id: u64, sequence: u64) -> Self {
        let t = (timestamp & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
        let s = (sequence & Self::SEQUENCE_MASK) << Self::SEQUENCE_SHIFT;
        let m = (machine_id & Self::MACHINE_ID_MASK) << Self::MACHINE_ID_SHIFT;
        Self { id: t | s | m }
    }

    /// Extracts the 10 ms tick count from the packed ID.
    #[must_use]
    pub const fn timestamp(&self) -> u64 {
        (self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK
    }

    /// Extracts the machine ID from the packed ID.
    #[must_use]
    pub const fn machine_id(&self) -> u64 {
        (self.id >> Self::MACHINE_ID_SHIFT) & Self::MACHINE_ID_MASK
    }

    /// Extracts the sequence number from the packed ID.
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        (self.id >> Self::SEQUENCE_SHIFT) & Self::SEQUENCE_MASK
    }

    #[must_use]
    pub const fn to_raw(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self { id: raw }
    }
}

impl Id for SonyflakeId {
    type Ty = u64;
    const ZERO: u64 = 0;
    const ONE: u64 = 1;

    fn to_raw(&self) -> u64 {
        self.id
    }

    fn from_raw(raw: u64) -> Self {
        Self { id: raw }
    }
}

impl SnowflakeId for SonyflakeId {
    fn timestamp(&self) -> u64 {
        self.timestamp()
    }

    fn max_timestamp() -> u64 {
        Self::TIMESTAMP_MASK
    }

    fn machine_id(&self) -> u64 {
        self.machine_id()
    }

    fn max_machine_id() -> u64 {
        Self::MACHINE_ID_MASK
    }

    fn sequence(&self) -> u64 {
        self.sequence()
    }

    fn max_sequence() -> u64 {
        Self::SEQUENCE_MASK
    }

    fn from_components(timestamp: u64, machine_id: u64, sequence: u64) -> Self {
        debug_assert!(timestamp <= Self::TIMESTAMP_MASK, "timestamp overflow");
        debug_assert!(machine_id <= Self::MACHINE_ID_MASK, "machine_id overflow");
        debug_assert!(sequence <= Self::SEQUENCE_MASK, "sequence overflow");
        Self::from(timestamp, machine_id, sequence)
    }

    fn is_valid(&self) -> bool {
        self.id & !Self::VALID_MASK == 0
    }

    fn into_valid(self) -> Self {
        Self::from_raw(self.id & Self::VALID_MASK)
    }
}

impl fmt::Display for SonyflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for SonyflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SonyflakeId")
            .field("id", &self.id)
            .field("timestamp", &self.timestamp())
            .field("sequence", &self.sequence())
            .field("machine_id", &self.machine_id())
            .finish()
    }
}

/// UUID v1/v6 generator state: milliseconds since the Gregorian reform plus a
/// sub-millisecond counter.
///
/// The counter runs from 0 to 9 999 so that `timestamp * 10_000 + sequence`
/// is the 100 ns tick count RFC 9562 stores in v1 and v6 UUIDs.
///
/// ```text
///  Bit Index:  63             14 13             0
///              +----------------+---------------+
///  Field:      | timestamp (50) | sub-tick (14) |
///              +----------------+---------------+
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(transparent)]
pub struct GregorianState {
    id: u64,
}

impl GregorianState {
    pub const TIMESTAMP_MASK: u64 = (1 << 50) - 1;
    pub const SEQUENCE_MASK: u64 = (1 << 14) - 1;
    pub const TIMESTAMP_SHIFT: u64 = 14;

    /// 100 ns ticks per millisecond.
    pub const TICKS_PER_MILLI: u64 = 10_000;

    #[must_use]
    pub const fn from(timestamp: u64, sequence: u64) -> Self {
        Self {
            id: ((timestamp & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT)
                | (sequence & Self::SEQUENCE_MASK),
        }
    }

    #[must_use]
    pub const fn timestamp(&self) -> u64 {
        (self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK
    }

    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.id & Self::SEQUENCE_MASK
    }

    /// The 60-bit count of 100 ns intervals since 1582-10-15.
    #[must_use]
    pub const fn gregorian_ticks(&self) -> u64 {
        self.timestamp() * Self::TICKS_PER_MILLI + self.sequence()
    }
}

impl Id for GregorianState {
    type Ty = u64;
    const ZERO: u64 = 0;
    const ONE: u64 = 1;

    fn to_raw(&self) -> u64 {
        self.id
    }

    fn from_raw(raw: u64) -> Self {
        Self { id: raw }
    }
}

impl SnowflakeId for GregorianState {
    fn timestamp(&self) -> u64 {
        self.timestamp()
    }

    fn max_timestamp() -> u64 {
        Self::TIMESTAMP_MASK
    }

    fn machine_id(&self) -> u64 {
        0
    }

    fn max_machine_id() -> u64 {
        0
    }

    fn sequence(&self) -> u64 {
        self.sequence()
    }

    fn max_sequence() -> u64 {
        Self::TICKS_PER_MILLI - 1
    }

    fn from_components(timestamp: u64, _machine_id: u64, sequence: u64) -> Self {
        debug_assert!(timestamp <= Self::TIMESTAMP_MASK, "timestamp overflow");
        debug_assert!(sequence < Self::TICKS_PER_MILLI, "sequence overflow");
        Self::from(timestamp, sequence)
    }

    fn is_valid(&self) -> bool {
        self.sequence() < Self::TICKS_PER_MILLI
    }

    fn into_valid(self) -> Self {
        Self::from(self.timestamp(), self.sequence().min(Self::TICKS_PER_MILLI - 1))
    }
}
