//! `ksuid`: 32-bit seconds since the KSUID epoch and a 128-bit payload as 27
//! base62 characters.

use core::time::Duration;

use crate::{
    codec::BASE62_KSUID_LEN,
    error::Result,
    generator::KsuidGenerator,
    id::Ksuid,
    provider::{IdSource, Provider},
    providers::bootstrap_failed,
    rand::ThreadRandom,
    registry,
    time::{KSUID_EPOCH, MonotonicClock, TickClock, TimeSource},
};

pub const NAME: &str = "ksuid";
pub const SIZE: u32 = 160;
pub const WIDTH: usize = BASE62_KSUID_LEN;

impl<T> IdSource<String> for KsuidGenerator<T, ThreadRandom>
where
    T: TimeSource<u64> + Send + Sync,
{
    fn generate(&self) -> String {
        self.next_id().to_string()
    }

    fn validate(&self, id: &String) -> bool {
        is_ksuid(id)
    }
}

/// Returns `true` for 27 base62 characters that fit 160 bits.
pub fn is_ksuid(id: &str) -> bool {
    id.len() == WIDTH && id.parse::<Ksuid>().is_ok()
}

/// Builds the `ksuid` provider.
///
/// # Errors
///
/// Never fails in practice; the signature matches the other providers.
pub fn provider() -> Result<Provider> {
    let clock = TickClock::new(MonotonicClock::shared(), KSUID_EPOCH, Duration::from_secs(1));
    Provider::builder(NAME, SIZE)
        .width(WIDTH)
        .string(KsuidGenerator::new(clock, ThreadRandom))
        .build()
}

/// Registers the `ksuid` provider in the global registry.
///
/// # Errors
///
/// See [`provider`].
pub fn try_install() -> Result<()> {
    registry::register(provider()?);
    Ok(())
}

/// Infallible [`try_install`].
///
/// # Panics
///
/// Panics if the provider cannot be built.
pub fn install() {
    if let Err(err) = try_install() {
        bootstrap_failed(NAME, &err);
    }
}
