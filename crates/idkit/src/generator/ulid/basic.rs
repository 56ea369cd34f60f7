use core::marker::PhantomData;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    generator::{IdGenStatus, UlidGenerator},
    id::UlidId,
    rand::RandSource,
    time::TimeSource,
};

/// A stateless ULID generator: every ID is the current timestamp plus fresh
/// random bits.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Probabilistically unique (no coordination required)
/// - ❌ Ordered only across milliseconds, not within one
///
/// ## See Also
/// - [`AtomicMonoUlidGenerator`]
///
/// [`AtomicMonoUlidGenerator`]: crate::generator::AtomicMonoUlidGenerator
pub struct BasicUlidGenerator<ID, T, R>
where
    ID: UlidId,
    T: TimeSource<ID::Ty>,
    R: RandSource<ID::Ty>,
{
    time: T,
    rng: R,
    _id: PhantomData<ID>,
}

impl<ID, T, R> BasicUlidGenerator<ID, T, R>
where
    ID: UlidId,
    T: TimeSource<ID::Ty>,
    R: RandSource<ID::Ty>,
{
    /// Creates a new [`BasicUlidGenerator`] with the provided time source and
    /// RNG.
    ///
    /// # Example
    /// ```
    /// use idkit::{BasicUlidGenerator, MonotonicClock, ThreadRandom, ULID, UlidGenerator};
    ///
    /// let generator = BasicUlidGenerator::new(MonotonicClock::shared(), ThreadRandom);
    /// let id: ULID = generator.next_id(|_| std::thread::yield_now());
    /// assert_eq!(id.to_string().len(), 26);
    /// ```
    pub const fn new(time: T, rng: R) -> Self {
        Self {
            time,
            rng,
            _id: PhantomData,
        }
    }

    /// Generates a ULID. Never pending.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn poll_id(&self) -> IdGenStatus<ID> {
        IdGenStatus::Ready {
            id: ID::from_components(self.time.current_millis(), self.rng.rand()),
        }
    }
}

impl<ID, T, R> UlidGenerator<ID, T, R> for BasicUlidGenerator<ID, T, R>
where
    ID: UlidId,
    T: TimeSource<ID::Ty>,
    R: RandSource<ID::Ty>,
{
    fn new(time: T, rng: R) -> Self {
        Self::new(time, rng)
    }

    fn poll_id(&self) -> IdGenStatus<ID> {
        self.poll_id()
    }
}
