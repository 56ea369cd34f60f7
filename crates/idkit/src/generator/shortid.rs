use parking_lot::Mutex;
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{codec::Alphabet, time::TimeSource};

/// Minimum number of symbols used for the millisecond part of a ShortID.
pub const SHORTID_TIME_SYMBOLS: usize = 8;

/// Milliseconds past [`SHORTID_EPOCH`] the time field holds without growing,
/// about 557 years. Small alphabets get a wider time field.
///
/// [`SHORTID_EPOCH`]: crate::time::SHORTID_EPOCH
pub const SHORTID_TIME_HORIZON: u64 = 1 << 44;

/// Largest worker id a ShortID can carry.
pub const SHORTID_MAX_WORKER: u8 = 31;

/// Minimum alphabet size; the worker id is written as a single symbol.
pub const SHORTID_MIN_ALPHABET: usize = 32;

/// Produces short, variable length ids from time, a worker id and a
/// per-millisecond counter.
///
/// ```text
///  +--------------------+------------+-------------------------+
///  | millis (8+ symbols)| worker (1) | counter (0..n, if > 0)  |
///  +--------------------+------------+-------------------------+
/// ```
///
/// The time field is wide enough for [`SHORTID_TIME_HORIZON`] in the chosen
/// alphabet and is never truncated.
///
/// The clock `T` reports milliseconds since [`SHORTID_EPOCH`]. Two ids from
/// one generator differ in time, or share a time and differ in the counter.
///
/// [`SHORTID_EPOCH`]: crate::time::SHORTID_EPOCH
pub struct ShortIdGenerator<T>
where
    T: TimeSource<u64>,
{
    alphabet: Alphabet,
    time_symbols: usize,
    worker: u8,
    state: Mutex<(u64, u64)>,
    time: T,
}

impl<T> ShortIdGenerator<T>
where
    T: TimeSource<u64>,
{
    /// `alphabet` must hold at least [`SHORTID_MIN_ALPHABET`] symbols and
    /// `worker` must not exceed [`SHORTID_MAX_WORKER`]; the provider
    /// validates both before calling this.
    pub fn new(alphabet: Alphabet, worker: u8, time: T) -> Self {
        debug_assert!(alphabet.len() >= SHORTID_MIN_ALPHABET);
        debug_assert!(worker <= SHORTID_MAX_WORKER);
        let time_symbols = alphabet.width_for(SHORTID_TIME_HORIZON, SHORTID_TIME_SYMBOLS);
        Self {
            alphabet,
            time_symbols,
            worker,
            state: Mutex::new((0, 0)),
            time,
        }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Width of the time field in symbols.
    pub const fn time_symbols(&self) -> usize {
        self.time_symbols
    }

    pub const fn worker(&self) -> u8 {
        self.worker
    }

    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_id(&self) -> String {
        let now = self.time.current_millis();
        let (millis, counter) = {
            let mut state = self.state.lock();
            if now > state.0 {
                *state = (now, 0);
            } else {
                state.1 += 1;
            }
            *state
        };

        let mut out = String::with_capacity(self.time_symbols + 4);
        self.alphabet.encode_fixed(millis, self.time_symbols, &mut out);
        out.push(self.alphabet.symbols()[usize::from(self.worker)]);
        if counter > 0 {
            self.alphabet.encode(counter, &mut out);
        }
        out
    }

    /// Returns `true` if `id` is long enough and uses only alphabet symbols.
    pub fn validate(&self, id: &str) -> bool {
        id.chars().count() > self.time_symbols && id.chars().all(|c| self.alphabet.contains(c))
    }
}
