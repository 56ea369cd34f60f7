use core::{fmt, str::FromStr};

use crate::codec::{self, BASE62_KSUID_LEN};

/// A 160-bit K-Sortable Unique IDentifier.
///
/// Four big-endian bytes of seconds since [`KSUID_EPOCH`] followed by a
/// 16-byte payload, rendered as 27 zero-padded base62 characters.
///
/// [`KSUID_EPOCH`]: crate::time::KSUID_EPOCH
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Ksuid([u8; 20]);

impl Ksuid {
    /// Width of the textual form.
    pub const ENCODED_LEN: usize = BASE62_KSUID_LEN;

    #[must_use]
    pub fn from_parts(timestamp: u32, payload: u128) -> Self {
        let mut bytes = [0_u8; 20];
        bytes[..4].copy_from_slice(&timestamp.to_be_bytes());
        bytes[4..].copy_from_slice(&payload.to_be_bytes());
        Self(bytes)
    }

    #[must_use]
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Seconds since the KSUID epoch.
    #[must_use]
    pub const fn timestamp(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }

    #[must_use]
    pub fn payload(&self) -> u128 {
        let mut payload = [0_u8; 16];
        payload.copy_from_slice(&self.0[4..]);
        u128::from_be_bytes(payload)
    }
}

impl fmt::Display for Ksuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&codec::encode_base62(&self.0, BASE62_KSUID_LEN))
    }
}

impl fmt::Debug for Ksuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ksuid")
            .field("id", &format_args!("{self}"))
            .field("timestamp", &self.timestamp())
            .field("payload", &format_args!("0x{:032x}", self.payload()))
            .finish()
    }
}

impl FromStr for Ksuid {
    type Err = codec::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0_u8; 20];
        codec::decode_base62(s, BASE62_KSUID_LEN, &mut bytes)?;
        Ok(Self(bytes))
    }
}
