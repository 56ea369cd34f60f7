use core::{cell::Cell, time::Duration};
use std::{
    collections::HashSet,
    rc::Rc,
    sync::{Arc, Mutex},
    thread::scope,
};

use crate::{
    generator::{AtomicSnowflakeGenerator, IdGenStatus},
    id::{GregorianState, Id, SnowflakeId, SnowflakeTwitterId, SonyflakeId, XidState},
    time::{
        GregorianClock, MonotonicClock, SONYFLAKE_EPOCH, TWITTER_EPOCH, TickClock, TimeSource,
    },
};

fn millis_since(epoch: Duration) -> TickClock {
    TickClock::new(MonotonicClock::shared(), epoch, Duration::from_millis(1))
}

struct MockTime {
    millis: u64,
}

impl TimeSource<u64> for MockTime {
    fn current_millis(&self) -> u64 {
        self.millis
    }
}

#[derive(Clone)]
struct SharedMockStepTime {
    clock: Rc<MockStepTime>,
}

impl TimeSource<u64> for SharedMockStepTime {
    fn current_millis(&self) -> u64 {
        self.clock.values[self.clock.index.get()]
    }
}

struct MockStepTime {
    values: Vec<u64>,
    index: Cell<usize>,
}

struct FixedTime;
impl TimeSource<u64> for FixedTime {
    fn current_millis(&self) -> u64 {
        0
    }
}

trait IdGenStatusExt<T>
where
    T: Id,
{
    fn unwrap_ready(self) -> T;
    fn unwrap_pending(self) -> T::Ty;
}

impl<T> IdGenStatusExt<T> for IdGenStatus<T>
where
    T: Id,
{
    fn unwrap_ready(self) -> T {
        match self {
            Self::Ready { id } => id,
            Self::Pending { yield_for } => {
                panic!("unexpected pending (yield for: {yield_for})")
            }
        }
    }

    fn unwrap_pending(self) -> T::Ty {
        match self {
            Self::Ready { id } => panic!("unexpected ready ({id:?})"),
            Self::Pending { yield_for } => yield_for,
        }
    }
}

fn run_id_sequence_increments_within_same_tick<ID>()
where
    ID: SnowflakeId<Ty = u64>,
{
    let generator = AtomicSnowflakeGenerator::<ID, _>::new(0, MockTime { millis: 42 });
    let id1 = generator.poll_id().unwrap_ready();
    let id2 = generator.poll_id().unwrap_ready();
    let id3 = generator.poll_id().unwrap_ready();

    assert_eq!(id1.timestamp(), 42);
    assert_eq!(id2.timestamp(), 42);
    assert_eq!(id3.timestamp(), 42);
    assert_eq!(id1.sequence(), 0);
    assert_eq!(id2.sequence(), 1);
    assert_eq!(id3.sequence(), 2);
    assert!(id1 < id2 && id2 < id3);
}

fn run_generator_returns_pending_when_sequence_exhausted<ID>()
where
    ID: SnowflakeId<Ty = u64>,
{
    let generator = AtomicSnowflakeGenerator::<ID, _>::from_components(
        0,
        0,
        ID::max_sequence(),
        FixedTime,
    );
    let yield_for = generator.poll_id().unwrap_pending();
    assert_eq!(yield_for, ID::ONE);
}

fn run_generator_handles_rollover<ID>()
where
    ID: SnowflakeId<Ty = u64>,
{
    let shared_time = SharedMockStepTime {
        clock: Rc::new(MockStepTime {
            values: vec![42, 43],
            index: Cell::new(0),
        }),
    };
    let generator = AtomicSnowflakeGenerator::<ID, _>::new(ID::max_machine_id(), shared_time.clone());

    for i in 0..=ID::max_sequence() {
        let id = generator.poll_id().unwrap_ready();
        assert_eq!(id.sequence(), i);
        assert_eq!(id.timestamp(), 42);
        assert_eq!(id.machine_id(), ID::max_machine_id());
    }

    let yield_for = generator.poll_id().unwrap_pending();
    assert_eq!(yield_for, ID::ONE);

    shared_time.clock.index.set(1);

    let id = generator.poll_id().unwrap_ready();
    assert_eq!(id.timestamp(), 43);
    assert_eq!(id.sequence(), 0);
}

fn run_generator_reports_clock_behind<ID>()
where
    ID: SnowflakeId<Ty = u64>,
{
    let generator = AtomicSnowflakeGenerator::<ID, _>::from_components(
        50,
        0,
        0,
        MockTime { millis: 42 },
    );
    assert_eq!(generator.poll_id().unwrap_pending(), 8);
}

fn run_generator_monotonic_threaded<ID, T>(time: T, total_ids: usize)
where
    ID: SnowflakeId<Ty = u64> + Send + Sync,
    T: TimeSource<u64> + Sync,
{
    const THREADS: usize = 8;
    let ids_per_thread = total_ids / THREADS;

    let generator = AtomicSnowflakeGenerator::<ID, _>::new(0, time);
    let seen_ids = Arc::new(Mutex::new(HashSet::with_capacity(total_ids)));

    scope(|s| {
        for _ in 0..THREADS {
            let generator = &generator;
            let seen_ids = Arc::clone(&seen_ids);

            s.spawn(move || {
                let mut last = None;
                for _ in 0..ids_per_thread {
                    let id = generator.next_id(|_| std::thread::yield_now());
                    // Program order within one thread is preserved.
                    assert!(last.is_none_or(|prev| prev < id));
                    last = Some(id);
                    assert!(seen_ids.lock().unwrap().insert(id));
                }
            });
        }
    });

    let final_count = seen_ids.lock().unwrap().len();
    assert_eq!(final_count, ids_per_thread * THREADS, "Expected unique IDs");
}

#[test]
fn twitter_sequence_increments_within_same_tick() {
    run_id_sequence_increments_within_same_tick::<SnowflakeTwitterId>();
}

#[test]
fn sonyflake_sequence_increments_within_same_tick() {
    run_id_sequence_increments_within_same_tick::<SonyflakeId>();
}

#[test]
fn xid_sequence_increments_within_same_tick() {
    run_id_sequence_increments_within_same_tick::<XidState>();
}

#[test]
fn gregorian_sequence_increments_within_same_tick() {
    run_id_sequence_increments_within_same_tick::<GregorianState>();
}

#[test]
fn twitter_pending_when_sequence_exhausted() {
    run_generator_returns_pending_when_sequence_exhausted::<SnowflakeTwitterId>();
}

#[test]
fn sonyflake_pending_when_sequence_exhausted() {
    run_generator_returns_pending_when_sequence_exhausted::<SonyflakeId>();
}

#[test]
fn gregorian_pending_when_sequence_exhausted() {
    run_generator_returns_pending_when_sequence_exhausted::<GregorianState>();
}

#[test]
fn twitter_handles_rollover() {
    run_generator_handles_rollover::<SnowflakeTwitterId>();
}

#[test]
fn sonyflake_handles_rollover() {
    run_generator_handles_rollover::<SonyflakeId>();
}

#[test]
fn gregorian_handles_rollover() {
    run_generator_handles_rollover::<GregorianState>();
}

#[test]
fn twitter_reports_clock_behind() {
    run_generator_reports_clock_behind::<SnowflakeTwitterId>();
}

#[test]
fn sonyflake_reports_clock_behind() {
    run_generator_reports_clock_behind::<SonyflakeId>();
}

#[test]
fn twitter_threaded_ids_are_unique() {
    run_generator_monotonic_threaded::<SnowflakeTwitterId, _>(millis_since(TWITTER_EPOCH), 4096 * 64);
}

#[test]
fn sonyflake_threaded_ids_are_unique() {
    // Ticking every millisecond instead of every 10 ms keeps the test short.
    run_generator_monotonic_threaded::<SonyflakeId, _>(millis_since(SONYFLAKE_EPOCH), 256 * 64);
}

#[test]
fn gregorian_threaded_ids_are_unique() {
    run_generator_monotonic_threaded::<GregorianState, _>(
        GregorianClock::new(MonotonicClock::shared()),
        10_000 * 16,
    );
}

#[test]
fn yield_for_zero_means_lost_race() {
    let generator = AtomicSnowflakeGenerator::<SnowflakeTwitterId, _>::new(3, MockTime { millis: 7 });
    let id = generator.next_id(|yield_for| assert_eq!(yield_for, 0));
    assert_eq!(id.timestamp(), 7);
    assert_eq!(id.machine_id(), 3);
}
