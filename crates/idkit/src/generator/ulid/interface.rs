use crate::{generator::IdGenStatus, id::UlidId, rand::RandSource, time::TimeSource};

/// A minimal interface for generating ULID-style IDs.
///
/// Implemented by the stateless [`BasicUlidGenerator`] and the monotonic
/// [`AtomicMonoUlidGenerator`], so callers can pick the ordering guarantee at
/// construction time and drive both the same way.
///
/// [`BasicUlidGenerator`]: crate::generator::BasicUlidGenerator
/// [`AtomicMonoUlidGenerator`]: crate::generator::AtomicMonoUlidGenerator
pub trait UlidGenerator<ID, T, R>
where
    ID: UlidId,
    T: TimeSource<ID::Ty>,
    R: RandSource<ID::Ty>,
{
    /// Creates a new generator.
    fn new(time: T, rng: R) -> Self;

    /// Generates the next available ID, calling `f` with the backoff hint
    /// while the generator is throttled.
    fn next_id(&self, mut f: impl FnMut(ID::Ty)) -> ID {
        loop {
            match self.poll_id() {
                IdGenStatus::Ready { id } => break id,
                IdGenStatus::Pending { yield_for } => f(yield_for),
            }
        }
    }

    /// Attempts to generate the next available ID without waiting.
    fn poll_id(&self) -> IdGenStatus<ID>;
}
