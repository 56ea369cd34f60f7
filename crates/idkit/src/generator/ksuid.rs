use parking_lot::Mutex;
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{id::Ksuid, rand::RandSource, time::TimeSource};

/// A KSUID generator that stays strictly increasing within one process.
///
/// Each new second draws a fresh random payload. Within a second the payload
/// is incremented instead, so IDs from one generator sort in the order they
/// were produced. The clock `T` must report whole seconds since
/// [`KSUID_EPOCH`].
///
/// [`KSUID_EPOCH`]: crate::time::KSUID_EPOCH
pub struct KsuidGenerator<T, R>
where
    T: TimeSource<u64>,
    R: RandSource<u128>,
{
    state: Mutex<(u32, u128)>,
    time: T,
    rng: R,
}

impl<T, R> KsuidGenerator<T, R>
where
    T: TimeSource<u64>,
    R: RandSource<u128>,
{
    pub fn new(time: T, rng: R) -> Self {
        Self {
            state: Mutex::new((0, 0)),
            time,
            rng,
        }
    }

    /// Generates the next KSUID.
    ///
    /// A clock reading behind the last ID reuses the last second. If the
    /// payload is exhausted the generator moves on to the next second early.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_id(&self) -> Ksuid {
        let now = u32::try_from(self.time.current_millis()).unwrap_or(u32::MAX);

        let mut state = self.state.lock();
        let (last_ts, last_payload) = *state;
        *state = if now > last_ts {
            (now, self.rng.rand())
        } else if let Some(payload) = last_payload.checked_add(1) {
            (last_ts, payload)
        } else {
            (last_ts.saturating_add(1), self.rng.rand())
        };
        Ksuid::from_parts(state.0, state.1)
    }
}
