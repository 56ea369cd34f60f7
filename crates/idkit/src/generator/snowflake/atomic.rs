use core::{cmp, marker::PhantomData};

use portable_atomic::{AtomicU64, Ordering};
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{generator::IdGenStatus, id::SnowflakeId, time::TimeSource};

/// A lock-free Snowflake ID generator suitable for multi-threaded environments.
///
/// This generator stores the Snowflake state in an [`AtomicU64`], allowing safe
/// shared use across threads. It drives every 64-bit compound layout in the
/// crate: [`SnowflakeTwitterId`], [`SonyflakeId`], and the counter state behind
/// XIDs and UUID v1/v6.
///
/// ## Caveats
/// This implementation uses an [`AtomicU64`] internally, so it only supports ID
/// layouts where the underlying type is [`u64`].
///
/// [`SnowflakeTwitterId`]: crate::id::SnowflakeTwitterId
/// [`SonyflakeId`]: crate::id::SonyflakeId
pub struct AtomicSnowflakeGenerator<ID, T>
where
    ID: SnowflakeId<Ty = u64>,
    T: TimeSource<ID::Ty>,
{
    #[cfg(feature = "cache-padded")]
    state: crossbeam_utils::CachePadded<AtomicU64>,
    #[cfg(not(feature = "cache-padded"))]
    state: AtomicU64,
    time: T,
    _id: PhantomData<ID>,
}

impl<ID, T> AtomicSnowflakeGenerator<ID, T>
where
    ID: SnowflakeId<Ty = u64>,
    T: TimeSource<ID::Ty>,
{
    /// Creates a new [`AtomicSnowflakeGenerator`] for a given machine ID.
    ///
    /// The initial timestamp and sequence are zero, so the first call rolls
    /// over to the current time.
    ///
    /// # Example
    /// ```
    /// use idkit::{
    ///     AtomicSnowflakeGenerator, Backoff, MonotonicClock, SnowflakeTwitterId, TWITTER_EPOCH,
    ///     TickClock,
    /// };
    /// use core::time::Duration;
    ///
    /// let clock = TickClock::new(MonotonicClock::shared(), TWITTER_EPOCH, Duration::from_millis(1));
    /// let generator = AtomicSnowflakeGenerator::<SnowflakeTwitterId, _>::new(0, clock);
    ///
    /// let id = generator.next_id(|yield_for| Backoff::Yield.wait(yield_for));
    /// assert_eq!(id.machine_id(), 0);
    /// ```
    pub fn new(machine_id: ID::Ty, time: T) -> Self {
        Self::from_components(ID::ZERO, machine_id, ID::ZERO, time)
    }

    /// Creates a new ID generator from explicit component values.
    ///
    /// This constructor is primarily useful for tests and for controlling the
    /// starting point of the generator manually. Prefer [`Self::new`].
    pub fn from_components(
        timestamp: ID::Ty,
        machine_id: ID::Ty,
        sequence: ID::Ty,
        time: T,
    ) -> Self {
        let initial = ID::from_components(timestamp, machine_id, sequence);
        Self {
            #[cfg(feature = "cache-padded")]
            state: crossbeam_utils::CachePadded::new(AtomicU64::new(initial.to_raw())),
            #[cfg(not(feature = "cache-padded"))]
            state: AtomicU64::new(initial.to_raw()),
            time,
            _id: PhantomData,
        }
    }

    /// Generates the next ID, calling `f` with the backoff hint whenever the
    /// generator is throttled.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self, f)))]
    pub fn next_id(&self, mut f: impl FnMut(ID::Ty)) -> ID {
        loop {
            match self.poll_id() {
                IdGenStatus::Ready { id } => break id,
                IdGenStatus::Pending { yield_for } => f(yield_for),
            }
        }
    }

    /// Attempts to generate the next available ID.
    ///
    /// Returns a new, time-ordered, unique ID if generation succeeds. If the
    /// generator is temporarily exhausted (the sequence is full and the time
    /// has not advanced, or a CAS race was lost), it returns
    /// [`IdGenStatus::Pending`].
    pub fn poll_id(&self) -> IdGenStatus<ID> {
        let now = self.time.current_millis();

        let current_raw = self.state.load(Ordering::Relaxed);
        let current_id = ID::from_raw(current_raw);
        let current_ts = current_id.timestamp();

        let next_id = match now.cmp(&current_ts) {
            cmp::Ordering::Equal => {
                if current_id.has_sequence_room() {
                    current_id.increment_sequence()
                } else {
                    return IdGenStatus::Pending { yield_for: ID::ONE };
                }
            }
            cmp::Ordering::Greater => current_id.rollover_to_timestamp(now),
            cmp::Ordering::Less => {
                return Self::cold_clock_behind(now, current_ts);
            }
        };

        let next_raw = next_id.to_raw();

        if self
            .state
            .compare_exchange(current_raw, next_raw, Ordering::Relaxed, Ordering::Relaxed)
            .is_ok()
        {
            IdGenStatus::Ready { id: next_id }
        } else {
            // CAS failed - another thread won the race. Yield 0 to retry
            // immediately.
            IdGenStatus::Pending {
                yield_for: ID::ZERO,
            }
        }
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(now: ID::Ty, current_ts: ID::Ty) -> IdGenStatus<ID> {
        IdGenStatus::Pending {
            yield_for: current_ts - now,
        }
    }
}
