use core::{fmt, str::FromStr};

use crate::codec::{self, BASE32HEX_XID_LEN};

/// A 12-byte XID.
///
/// ```text
///  Byte:   0        3 4        6 7      8 9          11
///          +----------+----------+--------+-------------+
///  Field:  | time (4) | mach (3) | pid (2)| counter (3) |
///          +----------+----------+--------+-------------+
/// ```
///
/// The time is whole seconds since the Unix epoch, big-endian, so byte order,
/// numeric order and the order of the 20 character base32hex text all agree.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Xid([u8; 12]);

impl Xid {
    /// Largest counter value; the counter is 24 bits wide.
    pub const MAX_COUNTER: u32 = (1 << 24) - 1;

    #[must_use]
    pub const fn from_parts(timestamp: u32, machine: [u8; 3], pid: u16, counter: u32) -> Self {
        let t = timestamp.to_be_bytes();
        let p = pid.to_be_bytes();
        let c = counter.to_be_bytes();
        Self([
            t[0], t[1], t[2], t[3], machine[0], machine[1], machine[2], p[0], p[1], c[1], c[2],
            c[3],
        ])
    }

    #[must_use]
    pub const fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 12] {
        &self.0
    }

    /// Seconds since the Unix epoch.
    #[must_use]
    pub const fn timestamp(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }

    #[must_use]
    pub const fn machine(&self) -> [u8; 3] {
        [self.0[4], self.0[5], self.0[6]]
    }

    #[must_use]
    pub const fn pid(&self) -> u16 {
        u16::from_be_bytes([self.0[7], self.0[8]])
    }

    #[must_use]
    pub const fn counter(&self) -> u32 {
        u32::from_be_bytes([0, self.0[9], self.0[10], self.0[11]])
    }
}

impl fmt::Display for Xid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&codec::encode_base32hex(&self.0))
    }
}

impl fmt::Debug for Xid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Xid")
            .field("id", &format_args!("{self}"))
            .field("timestamp", &self.timestamp())
            .field("machine", &format_args!("{:02x?}", self.machine()))
            .field("pid", &self.pid())
            .field("counter", &self.counter())
            .finish()
    }
}

impl FromStr for Xid {
    type Err = codec::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0_u8; 12];
        codec::decode_base32hex(s, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl Xid {
    /// Width of the textual form.
    pub const ENCODED_LEN: usize = BASE32HEX_XID_LEN;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parts_roundtrip() {
        let id = Xid::from_parts(0x4d88_e15b, [0x60, 0xf4, 0x86], 0xe428, 0x41_2dc9);
        assert_eq!(id.timestamp(), 0x4d88_e15b);
        assert_eq!(id.machine(), [0x60, 0xf4, 0x86]);
        assert_eq!(id.pid(), 0xe428);
        assert_eq!(id.counter(), 0x41_2dc9);
        assert_eq!(id.to_string(), "9m4e2mr0ui3e8a215n4g");
        assert_eq!("9m4e2mr0ui3e8a215n4g".parse::<Xid>().unwrap(), id);
    }

    #[test]
    fn counter_is_truncated_to_three_bytes() {
        let id = Xid::from_parts(1, [0; 3], 0, Xid::MAX_COUNTER + 2);
        assert_eq!(id.counter(), 1);
    }

    #[test]
    fn text_order_follows_time() {
        let a = Xid::from_parts(100, [9, 9, 9], 9, Xid::MAX_COUNTER);
        let b = Xid::from_parts(101, [0, 0, 0], 0, 0);
        assert!(a < b);
        assert!(a.to_string() < b.to_string());
    }
}
