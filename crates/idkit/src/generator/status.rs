use core::time::Duration;

use crate::id::{Id, ToU64};

/// Represents the result of attempting to generate a new ID.
///
/// - [`IdGenStatus::Ready`] indicates a new ID was successfully generated.
/// - [`IdGenStatus::Pending`] means the generator is throttled and cannot
///   produce a new ID until the clock advances by `yield_for` ticks.
///
/// This allows non-blocking generation loops and clean backoff strategies.
///
/// # Example
///
/// ```
/// use idkit::{AtomicSnowflakeGenerator, IdGenStatus, SnowflakeId, SnowflakeTwitterId};
///
/// struct FixedTime;
/// impl idkit::TimeSource<u64> for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1
///     }
/// }
///
/// let generator = AtomicSnowflakeGenerator::<SnowflakeTwitterId, _>::from_components(
///     1,
///     0,
///     SnowflakeTwitterId::max_sequence(),
///     FixedTime,
/// );
/// match generator.poll_id() {
///     IdGenStatus::Ready { id } => println!("ID: {}", id.timestamp()),
///     IdGenStatus::Pending { yield_for } => println!("Back off for: {yield_for}"),
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdGenStatus<T: Id> {
    /// A unique ID was generated and is ready to use.
    Ready {
        /// The generated ID.
        id: T,
    },
    /// No ID could be generated because the sequence has been exhausted for the
    /// current tick, or another thread won the race for it.
    Pending {
        /// Ticks to wait before trying again. Zero means retry immediately.
        yield_for: T::Ty,
    },
}

/// Backoff strategies for a generator that reported
/// [`IdGenStatus::Pending`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Backoff {
    /// Busy-waits in a tight loop.
    ///
    /// Offers maximum throughput at the cost of high CPU usage.
    Spin,

    /// Yields to the OS scheduler to allow other threads to run.
    ///
    /// More CPU-friendly than spinning, but may still busy-wait if no other
    /// threads are ready.
    #[default]
    Yield,

    /// Sleeps for the requested retry delay in milliseconds.
    ///
    /// Lowest CPU usage, but may oversleep depending on platform-specific
    /// scheduler resolution.
    Sleep,
}

impl Backoff {
    /// Waits according to the strategy. `yield_for` is the hint carried by
    /// [`IdGenStatus::Pending`].
    pub fn wait<Ty: ToU64>(self, yield_for: Ty) {
        match self {
            Self::Spin => core::hint::spin_loop(),
            Self::Yield => std::thread::yield_now(),
            Self::Sleep => std::thread::sleep(Duration::from_millis(yield_for.to_u64())),
        }
    }
}
