use core::time::Duration;

use crate::time::{GREGORIAN_OFFSET_MILLIS, MonotonicClock, TimeSource};

/// Rebases a Unix-millisecond clock onto a later epoch and a coarser tick.
///
/// Snowflake counts milliseconds since [`TWITTER_EPOCH`], Sonyflake counts
/// 10 ms ticks since [`SONYFLAKE_EPOCH`], XID and KSUID count seconds. All of
/// them read the same underlying [`MonotonicClock`] through this adapter.
///
/// Readings before the epoch saturate to zero.
///
/// [`TWITTER_EPOCH`]: crate::time::TWITTER_EPOCH
/// [`SONYFLAKE_EPOCH`]: crate::time::SONYFLAKE_EPOCH
#[derive(Clone, Debug)]
pub struct TickClock<C = MonotonicClock> {
    inner: C,
    epoch_millis: u64,
    tick_millis: u64,
}

impl<C> TickClock<C>
where
    C: TimeSource<u64>,
{
    /// Wraps `inner`, which must report milliseconds since the Unix epoch.
    ///
    /// A zero `tick` is treated as one millisecond.
    pub fn new(inner: C, epoch: Duration, tick: Duration) -> Self {
        Self {
            inner,
            epoch_millis: epoch.as_millis() as u64,
            tick_millis: (tick.as_millis() as u64).max(1),
        }
    }

    /// Width of one tick in milliseconds.
    pub const fn tick_millis(&self) -> u64 {
        self.tick_millis
    }
}

impl<C> TimeSource<u64> for TickClock<C>
where
    C: TimeSource<u64>,
{
    fn current_millis(&self) -> u64 {
        self.inner.current_millis().saturating_sub(self.epoch_millis) / self.tick_millis
    }
}

/// Milliseconds since the Gregorian reform, the origin of UUID v1/v6 time.
#[derive(Clone, Debug)]
pub struct GregorianClock<C = MonotonicClock> {
    inner: C,
}

impl<C> GregorianClock<C>
where
    C: TimeSource<u64>,
{
    /// Wraps `inner`, which must report milliseconds since the Unix epoch.
    pub const fn new(inner: C) -> Self {
        Self { inner }
    }
}

impl<C> TimeSource<u64> for GregorianClock<C>
where
    C: TimeSource<u64>,
{
    fn current_millis(&self) -> u64 {
        self.inner.current_millis() + GREGORIAN_OFFSET_MILLIS
    }
}
