use core::{cmp, marker::PhantomData};

use portable_atomic::{AtomicU128, Ordering};
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    generator::{IdGenStatus, UlidGenerator},
    id::UlidId,
    rand::RandSource,
    time::TimeSource,
};

/// A lock-free *monotonic* ULID-style ID generator.
///
/// This generator stores the last ID in an [`AtomicU128`], allowing safe
/// shared use across threads. Within one millisecond the random field is
/// incremented rather than redrawn, so every ID is strictly greater than the
/// one before it.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Probabilistically unique (no coordination required)
/// - ✅ Time-ordered (monotonically increasing per millisecond)
///
/// ## Caveats
/// This implementation uses an [`AtomicU128`] internally, so it only supports
/// ID layouts where the underlying type is [`u128`].
///
/// ## See Also
/// - [`BasicUlidGenerator`]
///
/// [`BasicUlidGenerator`]: crate::generator::BasicUlidGenerator
pub struct AtomicMonoUlidGenerator<ID, T, R>
where
    ID: UlidId<Ty = u128>,
    T: TimeSource<ID::Ty>,
    R: RandSource<ID::Ty>,
{
    #[cfg(feature = "cache-padded")]
    state: crossbeam_utils::CachePadded<AtomicU128>,
    #[cfg(not(feature = "cache-padded"))]
    state: AtomicU128,
    time: T,
    rng: R,
    _id: PhantomData<ID>,
}

impl<ID, T, R> AtomicMonoUlidGenerator<ID, T, R>
where
    ID: UlidId<Ty = u128>,
    T: TimeSource<ID::Ty>,
    R: RandSource<ID::Ty>,
{
    /// Creates a new [`AtomicMonoUlidGenerator`] with the provided time source
    /// and RNG.
    ///
    /// # Example
    /// ```
    /// use idkit::{AtomicMonoUlidGenerator, MonotonicClock, ThreadRandom, ULID};
    ///
    /// let generator = AtomicMonoUlidGenerator::new(MonotonicClock::shared(), ThreadRandom);
    ///
    /// let a: ULID = generator.next_id(|_| std::thread::yield_now());
    /// let b: ULID = generator.next_id(|_| std::thread::yield_now());
    /// assert!(a < b);
    /// ```
    pub fn new(time: T, rng: R) -> Self {
        Self::from_components(ID::ZERO, ID::ZERO, time, rng)
    }

    /// Creates a new ID generator from explicit component values.
    ///
    /// This constructor is primarily useful for tests and for controlling the
    /// starting point of the generator manually. Prefer [`Self::new`].
    pub fn from_components(timestamp: ID::Ty, random: ID::Ty, time: T, rng: R) -> Self {
        let id = ID::from_components(timestamp, random);
        Self {
            #[cfg(feature = "cache-padded")]
            state: crossbeam_utils::CachePadded::new(AtomicU128::new(id.to_raw())),
            #[cfg(not(feature = "cache-padded"))]
            state: AtomicU128::new(id.to_raw()),
            time,
            rng,
            _id: PhantomData,
        }
    }

    /// Generates a new ULID, calling `f` with the backoff hint whenever the
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

    /// Attempts to generate a new ULID.
    ///
    /// Returns [`IdGenStatus::Pending`] if the random field is exhausted for
    /// the current millisecond, if the clock reads behind the last ID, or if
    /// another thread won the CAS race.
    pub fn poll_id(&self) -> IdGenStatus<ID> {
        let now = self.time.current_millis();

        let current_raw = self.state.load(Ordering::Relaxed);
        let current_id = ID::from_raw(current_raw);
        let current_ts = current_id.timestamp();

        let next_id = match now.cmp(&current_ts) {
            cmp::Ordering::Equal => {
                if current_id.has_random_room() {
                    current_id.increment_random()
                } else {
                    return IdGenStatus::Pending { yield_for: ID::ONE };
                }
            }
            cmp::Ordering::Greater => current_id.rollover_to_timestamp(now, self.rng.rand()),
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

impl<ID, T, R> UlidGenerator<ID, T, R> for AtomicMonoUlidGenerator<ID, T, R>
where
    ID: UlidId<Ty = u128>,
    T: TimeSource<u128>,
    R: RandSource<u128>,
{
    fn new(time: T, rng: R) -> Self {
        Self::new(time, rng)
    }

    fn next_id(&self, f: impl FnMut(ID::Ty)) -> ID {
        self.next_id(f)
    }

    fn poll_id(&self) -> IdGenStatus<ID> {
        self.poll_id()
    }
}
