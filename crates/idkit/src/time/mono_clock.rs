use core::time::Duration;
use std::{
    sync::{
        Arc, LazyLock, OnceLock,
        atomic::{AtomicU64, Ordering},
    },
    thread::{self, JoinHandle},
    time::{Instant, SystemTime},
};

use crate::{
    error::{Error, Result},
    time::{TimeSource, UNIX_EPOCH},
};

/// A process-wide clock returning milliseconds since the Unix epoch. Every
/// built-in provider reads from this one ticker thread.
static SHARED_UNIX_CLOCK: LazyLock<MonotonicClock> =
    LazyLock::new(|| MonotonicClock::with_epoch(UNIX_EPOCH));

/// Shared ticker thread that updates every millisecond.
#[derive(Debug)]
struct SharedTickerInner {
    current: AtomicU64,
    _handle: OnceLock<JoinHandle<()>>,
}

/// A monotonic time source that returns elapsed time since process start,
/// offset from a user-defined epoch.
///
/// This avoids wall-clock adjustments (e.g., NTP or daylight savings changes)
/// while still aligning timestamps to a fixed origin.
///
/// Internally, the clock measures time by capturing `Instant::now()` at
/// construction and adding to it the duration elapsed since a given epoch
/// (computed from `SystemTime::now()` at startup).
#[derive(Clone, Debug)]
pub struct MonotonicClock {
    inner: Arc<SharedTickerInner>,
    epoch_offset: u64, // in milliseconds
}

impl Default for MonotonicClock {
    /// Returns a handle to the shared Unix-epoch clock.
    fn default() -> Self {
        Self::shared()
    }
}

impl MonotonicClock {
    /// Returns a handle to the process-wide clock anchored at the Unix epoch.
    ///
    /// Cloning is cheap; all clones observe the same ticker thread.
    pub fn shared() -> Self {
        SHARED_UNIX_CLOCK.clone()
    }

    /// Constructs a monotonic clock using a custom epoch as the origin (t = 0),
    /// specified as a [`Duration`] since the Unix epoch.
    ///
    /// Internally, the clock spawns a background thread that updates a shared
    /// atomic counter once per millisecond, using a monotonic timer
    /// (`Instant`) to measure elapsed time since startup. On each call to
    /// [`current_millis`], the clock returns the current tick value plus the
    /// precomputed difference between the wall-clock time at construction and
    /// the given epoch.
    ///
    /// The ticker thread exits once the last clone of the clock is dropped.
    ///
    /// # Panics
    ///
    /// Panics if the current system time is earlier than the given epoch. Use
    /// [`Self::try_with_epoch`] to handle that case.
    ///
    /// [`current_millis`]: TimeSource::current_millis
    pub fn with_epoch(epoch: Duration) -> Self {
        match Self::try_with_epoch(epoch) {
            Ok(clock) => clock,
            Err(e) => panic!("{e}"),
        }
    }

    /// Fallible version of [`Self::with_epoch`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the system clock reads earlier than
    /// `epoch`.
    pub fn try_with_epoch(epoch: Duration) -> Result<Self> {
        let start = Instant::now();
        let system_now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map_err(|_| Error::invalid_config("system clock before UNIX_EPOCH"))?;
        let offset = system_now
            .checked_sub(epoch)
            .ok_or_else(|| Error::invalid_config("system clock before custom epoch"))?
            .as_millis() as u64;

        let inner = Arc::new(SharedTickerInner {
            current: AtomicU64::new(0),
            _handle: OnceLock::new(),
        });

        let weak_inner = Arc::downgrade(&inner);
        let handle = thread::spawn(move || {
            let mut tick = 0;

            loop {
                let Some(inner_ref) = weak_inner.upgrade() else {
                    break;
                };

                // Compute the absolute target time of the next tick
                let target = start + Duration::from_millis(tick);

                // Sleep if we are early
                let now = Instant::now();
                if now < target {
                    thread::sleep(target - now);
                }

                // After waking, recompute how far we actually are from the
                // start
                let now_ms = start.elapsed().as_millis() as u64;

                // Monotonic store, aligned to elapsed milliseconds since start
                inner_ref.current.store(now_ms, Ordering::Relaxed);

                // Align to next tick after the current actual time
                tick = now_ms + 1;
            }
        });

        // Freshly created, so the cell is always empty here.
        let _ = inner._handle.set(handle);

        Ok(Self {
            inner,
            epoch_offset: offset,
        })
    }
}

impl TimeSource<u64> for MonotonicClock {
    /// Returns the number of milliseconds since the configured epoch, based on
    /// the elapsed monotonic time since construction.
    fn current_millis(&self) -> u64 {
        self.epoch_offset + self.inner.current.load(Ordering::Relaxed)
    }
}

impl TimeSource<u128> for MonotonicClock {
    fn current_millis(&self) -> u128 {
        u128::from(<Self as TimeSource<u64>>::current_millis(self))
    }
}
