//! `ulid`: 48-bit millisecond time and 80 random bits as 26 Crockford
//! base32 characters.

use crate::{
    codec::{CROCKFORD_U128_LEN, decode_ulid},
    error::Result,
    generator::{AtomicMonoUlidGenerator, BasicUlidGenerator, UlidGenerator},
    id::ULID,
    provider::{IdSource, Provider},
    providers::{BACKOFF, bootstrap_failed},
    rand::ThreadRandom,
    registry,
    time::MonotonicClock,
};

pub const NAME: &str = "ulid";
pub const SIZE: u32 = 128;
pub const WIDTH: usize = CROCKFORD_U128_LEN;

/// Configuration for the `ulid` provider.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UlidConfig {
    /// Increment the random field within a millisecond instead of redrawing
    /// it, making ids strictly increasing. On by default.
    pub monotonic: bool,
}

impl Default for UlidConfig {
    fn default() -> Self {
        Self { monotonic: true }
    }
}

struct UlidSource<G> {
    generator: G,
}

impl<G> IdSource<String> for UlidSource<G>
where
    G: UlidGenerator<ULID, MonotonicClock, ThreadRandom> + Send + Sync,
{
    fn generate(&self) -> String {
        self.generator
            .next_id(|yield_for| BACKOFF.wait(yield_for))
            .to_string()
    }

    fn validate(&self, id: &String) -> bool {
        is_ulid(id)
    }
}

/// Returns `true` for a 26 character canonical Crockford string that fits
/// 128 bits. The `O`, `I`, `L` aliases are rejected.
pub fn is_ulid(id: &str) -> bool {
    id.len() == WIDTH && decode_ulid(id).is_ok()
}

/// Builds the `ulid` provider.
///
/// # Errors
///
/// Never fails in practice; the signature matches the other providers.
pub fn provider(config: UlidConfig) -> Result<Provider> {
    let builder = Provider::builder(NAME, SIZE).width(WIDTH);
    let clock = MonotonicClock::shared();
    let builder = if config.monotonic {
        builder.string(UlidSource {
            generator: AtomicMonoUlidGenerator::<ULID, _, _>::new(clock, ThreadRandom),
        })
    } else {
        builder.string(UlidSource {
            generator: BasicUlidGenerator::<ULID, _, _>::new(clock, ThreadRandom),
        })
    };
    builder.build()
}

/// Registers the `ulid` provider in the global registry.
///
/// # Errors
///
/// See [`provider`].
pub fn try_install(config: UlidConfig) -> Result<()> {
    registry::register(provider(config)?);
    Ok(())
}

/// Infallible [`try_install`].
///
/// # Panics
///
/// Panics if the provider cannot be built.
pub fn install(config: UlidConfig) {
    if let Err(err) = try_install(config) {
        bootstrap_failed(NAME, &err);
    }
}
