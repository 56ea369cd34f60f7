//! `xid`: 12 bytes (Unix seconds, machine, pid, counter) as 20 base32hex
//! characters.

use core::time::Duration;

use rand::Rng;

use crate::{
    codec::BASE32HEX_XID_LEN,
    error::Result,
    generator::AtomicSnowflakeGenerator,
    id::{Xid, XidState},
    provider::{IdSource, Provider},
    providers::{BACKOFF, bootstrap_failed},
    registry,
    time::{MonotonicClock, TickClock, UNIX_EPOCH},
};

pub const NAME: &str = "xid";
pub const SIZE: u32 = 96;
pub const WIDTH: usize = BASE32HEX_XID_LEN;

/// Seconds and a 24-bit counter live in one atomic word, so ids stay ordered
/// under contention. Machine and pid are fixed per process.
struct XidSource {
    generator: AtomicSnowflakeGenerator<XidState, TickClock>,
    machine: [u8; 3],
    pid: u16,
}

impl XidSource {
    fn new() -> Self {
        Self {
            generator: AtomicSnowflakeGenerator::new(
                0,
                TickClock::new(MonotonicClock::shared(), UNIX_EPOCH, Duration::from_secs(1)),
            ),
            machine: rand::rng().random(),
            pid: std::process::id() as u16,
        }
    }
}

impl IdSource<String> for XidSource {
    fn generate(&self) -> String {
        let state = self.generator.next_id(|yield_for| BACKOFF.wait(yield_for));
        Xid::from_parts(
            state.timestamp() as u32,
            self.machine,
            self.pid,
            state.sequence() as u32,
        )
        .to_string()
    }

    fn validate(&self, id: &String) -> bool {
        is_xid(id)
    }
}

/// Returns `true` for 20 lowercase base32hex characters that decode to 12
/// bytes.
pub fn is_xid(id: &str) -> bool {
    id.len() == WIDTH && id.parse::<Xid>().is_ok()
}

/// Builds the `xid` provider.
///
/// # Errors
///
/// Never fails in practice; the signature matches the other providers.
pub fn provider() -> Result<Provider> {
    Provider::builder(NAME, SIZE)
        .width(WIDTH)
        .string(XidSource::new())
        .build()
}

/// Registers the `xid` provider in the global registry.
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
