//! `sonyflake`: 39 bits of 10 ms ticks since 2014-09-01, an 8-bit sequence
//! and a 16-bit machine id. Number slot only.

use core::time::Duration;

use crate::{
    error::Result,
    generator::AtomicSnowflakeGenerator,
    id::SonyflakeId,
    provider::{IdSource, Provider},
    providers::{BACKOFF, bootstrap_failed},
    registry,
    time::{MonotonicClock, SONYFLAKE_EPOCH, TickClock},
};

pub const NAME: &str = "sonyflake";
pub const SIZE: u32 = 63;

/// Length of one Sonyflake tick.
pub const TICK: Duration = Duration::from_millis(10);

/// Configuration for the `sonyflake` provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SonyflakeConfig {
    /// Machine id; drawn at random when unset.
    pub machine_id: Option<u16>,
}

struct SonyflakeSource {
    generator: AtomicSnowflakeGenerator<SonyflakeId, TickClock>,
}

impl IdSource<i64> for SonyflakeSource {
    fn generate(&self) -> i64 {
        let id = self.generator.next_id(|yield_for| BACKOFF.wait(yield_for));
        i64::try_from(id.to_raw()).unwrap_or_default()
    }

    fn validate(&self, id: &i64) -> bool {
        *id > 0
    }
}

/// Builds the `sonyflake` provider.
///
/// # Errors
///
/// Never fails in practice; every `u16` is a valid machine id.
pub fn provider(config: SonyflakeConfig) -> Result<Provider> {
    let machine_id = config.machine_id.unwrap_or_else(rand::random);
    let clock = TickClock::new(MonotonicClock::shared(), SONYFLAKE_EPOCH, TICK);
    Provider::builder(NAME, SIZE)
        .number(SonyflakeSource {
            generator: AtomicSnowflakeGenerator::new(u64::from(machine_id), clock),
        })
        .build()
}

/// Registers the `sonyflake` provider in the global registry.
///
/// # Errors
///
/// See [`provider`].
pub fn try_install(config: SonyflakeConfig) -> Result<()> {
    registry::register(provider(config)?);
    Ok(())
}

/// Infallible [`try_install`].
///
/// # Panics
///
/// Panics if the provider cannot be built.
pub fn install(config: SonyflakeConfig) {
    if let Err(err) = try_install(config) {
        bootstrap_failed(NAME, &err);
    }
}
