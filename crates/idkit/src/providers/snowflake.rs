//! `snowflake`: 41-bit milliseconds since the Twitter epoch, a 10-bit node
//! and a 12-bit sequence. Vends both `i64` and its decimal `String`.

use core::time::Duration;
use std::sync::Arc;

use rand::Rng;

use crate::{
    error::{Error, Result},
    generator::AtomicSnowflakeGenerator,
    id::SnowflakeTwitterId,
    provider::{IdSource, Provider},
    providers::{BACKOFF, bootstrap_failed},
    registry,
    time::{MonotonicClock, TWITTER_EPOCH, TickClock},
};

pub const NAME: &str = "snowflake";
pub const SIZE: u32 = 64;

/// Largest node id, `2^10 - 1`.
pub const MAX_NODE_ID: i64 = 1023;

/// Configuration for the `snowflake` provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SnowflakeConfig {
    /// Node id in `0..=1023`; drawn at random when unset. Two processes that
    /// share a node id can produce the same id.
    pub node_id: Option<i64>,
}

struct SnowflakeSource {
    generator: AtomicSnowflakeGenerator<SnowflakeTwitterId, TickClock>,
}

impl SnowflakeSource {
    fn next(&self) -> i64 {
        let id = self.generator.next_id(|yield_for| BACKOFF.wait(yield_for));
        // The sign bit is reserved, so the raw value always fits.
        i64::try_from(id.to_raw()).unwrap_or_default()
    }
}

impl IdSource<i64> for SnowflakeSource {
    fn generate(&self) -> i64 {
        self.next()
    }

    fn validate(&self, id: &i64) -> bool {
        *id > 0
    }
}

impl IdSource<String> for SnowflakeSource {
    fn generate(&self) -> String {
        self.next().to_string()
    }

    fn validate(&self, id: &String) -> bool {
        id.parse::<i64>().is_ok_and(|id| id > 0)
    }
}

fn node_id(config: &SnowflakeConfig) -> Result<u64> {
    match config.node_id {
        Some(node @ 0..=MAX_NODE_ID) => Ok(node as u64),
        Some(node) => Err(Error::invalid_config(format!(
            "snowflake node id {node} is outside 0..={MAX_NODE_ID}"
        ))),
        None => Ok(rand::rng().random_range(0..=SnowflakeTwitterId::max_machine_id())),
    }
}

/// Builds the `snowflake` provider. Both slots share one generator, so ids
/// taken through either representation never collide.
///
/// # Errors
///
/// Returns [`Error::InvalidConfig`] for a node id outside `0..=1023`.
pub fn provider(config: SnowflakeConfig) -> Result<Provider> {
    let clock = TickClock::new(MonotonicClock::shared(), TWITTER_EPOCH, Duration::from_millis(1));
    let source = Arc::new(SnowflakeSource {
        generator: AtomicSnowflakeGenerator::new(node_id(&config)?, clock),
    });
    Provider::builder(NAME, SIZE)
        .string_arc(source.clone())
        .number_arc(source)
        .build()
}

/// Registers the `snowflake` provider in the global registry.
///
/// # Errors
///
/// See [`provider`].
pub fn try_install(config: SnowflakeConfig) -> Result<()> {
    registry::register(provider(config)?);
    Ok(())
}

/// Infallible [`try_install`].
///
/// # Panics
///
/// Panics if the config is rejected.
pub fn install(config: SnowflakeConfig) {
    if let Err(err) = try_install(config) {
        bootstrap_failed(NAME, &err);
    }
}
