//! UUIDs in canonical hyphenated form.
//!
//! Registers `uuid-v1`, `uuid-v6`, `uuid-v7`, `uuid-v4` and finally `uuid`
//! as an alias of v4. Validation accepts any parseable UUID regardless of
//! its version.

use ::uuid::Uuid;
use rand::Rng;

use crate::{
    error::Result,
    generator::{AtomicMonoUlidGenerator, AtomicSnowflakeGenerator},
    id::{GregorianState, UuidV7State},
    provider::{IdSource, Provider, SourceFn},
    providers::{BACKOFF, bootstrap_failed},
    rand::ThreadRandom,
    registry,
    time::{GregorianClock, MonotonicClock},
};

pub const NAME: &str = "uuid";
pub const NAME_V1: &str = "uuid-v1";
pub const NAME_V4: &str = "uuid-v4";
pub const NAME_V6: &str = "uuid-v6";
pub const NAME_V7: &str = "uuid-v7";
pub const SIZE: u32 = 128;
pub const WIDTH: usize = 36;

/// Returns `true` if `id` parses as a UUID of any version.
pub fn is_uuid(id: &str) -> bool {
    Uuid::parse_str(id).is_ok()
}

fn validate(id: &String) -> bool {
    is_uuid(id)
}

/// The field order of a time-based UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimeLayout {
    /// v1: low, mid and high time fields, not sortable.
    Mac,
    /// v6: high, mid and low time fields, sortable.
    SortMac,
}

/// Shared by v1 and v6: 100 ns Gregorian ticks from a monotonic generator,
/// plus a per-process random clock sequence and node.
struct GregorianSource {
    generator: AtomicSnowflakeGenerator<GregorianState, GregorianClock>,
    layout: TimeLayout,
    clock_seq: u16,
    node: [u8; 6],
}

impl GregorianSource {
    fn new(layout: TimeLayout) -> Self {
        let mut rng = rand::rng();
        let mut node: [u8; 6] = rng.random();
        // RFC 9562 section 6.10: a random node sets the multicast bit.
        node[0] |= 0x01;
        Self {
            generator: AtomicSnowflakeGenerator::new(
                0,
                GregorianClock::new(MonotonicClock::shared()),
            ),
            layout,
            clock_seq: rng.random::<u16>() & 0x3FFF,
            node,
        }
    }

    fn uuid_from_ticks(&self, ticks: u64) -> Uuid {
        let mut bytes = [0_u8; 16];
        match self.layout {
            TimeLayout::Mac => {
                let time_low = (ticks & 0xFFFF_FFFF) as u32;
                let time_mid = ((ticks >> 32) & 0xFFFF) as u16;
                let time_hi = ((ticks >> 48) & 0x0FFF) as u16 | 0x1000;
                bytes[0..4].copy_from_slice(&time_low.to_be_bytes());
                bytes[4..6].copy_from_slice(&time_mid.to_be_bytes());
                bytes[6..8].copy_from_slice(&time_hi.to_be_bytes());
            }
            TimeLayout::SortMac => {
                let time_high = ((ticks >> 28) & 0xFFFF_FFFF) as u32;
                let time_mid = ((ticks >> 12) & 0xFFFF) as u16;
                let time_low = (ticks & 0x0FFF) as u16 | 0x6000;
                bytes[0..4].copy_from_slice(&time_high.to_be_bytes());
                bytes[4..6].copy_from_slice(&time_mid.to_be_bytes());
                bytes[6..8].copy_from_slice(&time_low.to_be_bytes());
            }
        }
        bytes[8] = ((self.clock_seq >> 8) as u8 & 0x3F) | 0x80;
        bytes[9] = (self.clock_seq & 0xFF) as u8;
        bytes[10..16].copy_from_slice(&self.node);
        Uuid::from_bytes(bytes)
    }
}

impl IdSource<String> for GregorianSource {
    fn generate(&self) -> String {
        let state = self.generator.next_id(|yield_for| BACKOFF.wait(yield_for));
        self.uuid_from_ticks(state.gregorian_ticks()).to_string()
    }

    fn validate(&self, id: &String) -> bool {
        is_uuid(id)
    }
}

struct V7Source {
    generator: AtomicMonoUlidGenerator<UuidV7State, MonotonicClock, ThreadRandom>,
}

impl IdSource<String> for V7Source {
    fn generate(&self) -> String {
        let state = self.generator.next_id(|yield_for| BACKOFF.wait(yield_for));
        Uuid::from_u128(state.to_uuid_bits()).to_string()
    }

    fn validate(&self, id: &String) -> bool {
        is_uuid(id)
    }
}

fn builder(name: &str) -> crate::provider::ProviderBuilder {
    Provider::builder(name, SIZE).width(WIDTH)
}

/// Time and MAC layout with a random node (RFC 9562 version 1).
///
/// # Errors
///
/// Never fails in practice; the signature matches the other providers.
pub fn provider_v1() -> Result<Provider> {
    builder(NAME_V1)
        .string(GregorianSource::new(TimeLayout::Mac))
        .build()
}

/// Random (RFC 9562 version 4), registered under `name`.
///
/// # Errors
///
/// Never fails in practice; the signature matches the other providers.
pub fn provider_v4(name: &str) -> Result<Provider> {
    builder(name)
        .string(SourceFn::new(|| Uuid::new_v4().to_string(), validate))
        .build()
}

/// Reordered time fields, sortable (RFC 9562 version 6).
///
/// # Errors
///
/// Never fails in practice; the signature matches the other providers.
pub fn provider_v6() -> Result<Provider> {
    builder(NAME_V6)
        .string(GregorianSource::new(TimeLayout::SortMac))
        .build()
}

/// Unix milliseconds followed by a monotonic random counter, sortable
/// (RFC 9562 version 7).
///
/// # Errors
///
/// Never fails in practice; the signature matches the other providers.
pub fn provider_v7() -> Result<Provider> {
    builder(NAME_V7)
        .string(V7Source {
            generator: AtomicMonoUlidGenerator::new(MonotonicClock::shared(), ThreadRandom),
        })
        .build()
}

/// Registers every UUID variant and the `uuid` alias, in that order.
///
/// # Errors
///
/// See the `provider_*` constructors.
pub fn try_install() -> Result<()> {
    registry::register(provider_v1()?);
    registry::register(provider_v6()?);
    registry::register(provider_v7()?);
    registry::register(provider_v4(NAME_V4)?);
    registry::register(provider_v4(NAME)?);
    Ok(())
}

/// Infallible [`try_install`].
///
/// # Panics
///
/// Panics if a provider cannot be built.
pub fn install() {
    if let Err(err) = try_install() {
        bootstrap_failed(NAME, &err);
    }
}
