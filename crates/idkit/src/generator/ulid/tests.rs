use core::cell::Cell;
use std::{
    collections::HashSet,
    rc::Rc,
    sync::{Arc, Mutex},
    thread::scope,
};

use crate::{
    generator::{AtomicMonoUlidGenerator, BasicUlidGenerator, IdGenStatus, UlidGenerator},
    id::{Id, ULID, UlidId, UuidV7State},
    rand::{RandSource, ThreadRandom},
    time::{MonotonicClock, TimeSource},
};

struct MockTime {
    millis: u128,
}

impl TimeSource<u128> for MockTime {
    fn current_millis(&self) -> u128 {
        self.millis
    }
}

struct MockRand {
    rand: u128,
}

impl RandSource<u128> for MockRand {
    fn rand(&self) -> u128 {
        self.rand
    }
}

#[derive(Clone)]
struct SharedMockStepTime {
    clock: Rc<MockStepTime>,
}

impl SharedMockStepTime {
    fn new(values: Vec<u128>) -> Self {
        Self {
            clock: Rc::new(MockStepTime {
                values,
                index: Cell::new(0),
            }),
        }
    }
}

impl TimeSource<u128> for SharedMockStepTime {
    fn current_millis(&self) -> u128 {
        self.clock.values[self.clock.index.get()]
    }
}

struct MockStepTime {
    values: Vec<u128>,
    index: Cell<usize>,
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

fn run_basic_uses_time_and_rand<ID>()
where
    ID: UlidId<Ty = u128>,
{
    let generator = BasicUlidGenerator::<ID, _, _>::new(MockTime { millis: 42 }, MockRand { rand: 7 });
    let id = generator.poll_id().unwrap_ready();
    assert_eq!(id.timestamp(), 42);
    assert_eq!(id.random(), 7);

    // Same inputs, same id: no monotonic state.
    assert_eq!(generator.poll_id().unwrap_ready(), id);
}

fn run_mono_increments_within_same_tick<ID>()
where
    ID: UlidId<Ty = u128>,
{
    let generator =
        AtomicMonoUlidGenerator::<ID, _, _>::new(MockTime { millis: 42 }, MockRand { rand: 7 });
    let id1 = generator.poll_id().unwrap_ready();
    let id2 = generator.poll_id().unwrap_ready();
    let id3 = generator.poll_id().unwrap_ready();

    assert_eq!(id1.timestamp(), 42);
    assert_eq!(id3.timestamp(), 42);
    assert_eq!(id1.random(), 7);
    assert_eq!(id2.random(), 8);
    assert_eq!(id3.random(), 9);
    assert!(id1 < id2 && id2 < id3);
}

fn run_mono_pending_when_random_exhausted<ID>()
where
    ID: UlidId<Ty = u128>,
{
    let time = SharedMockStepTime::new(vec![42, 43]);
    let generator = AtomicMonoUlidGenerator::<ID, _, _>::from_components(
        42,
        ID::max_random(),
        time.clone(),
        MockRand { rand: 0 },
    );
    assert_eq!(generator.poll_id().unwrap_pending(), 1);

    time.clock.index.set(1);
    let id = generator.poll_id().unwrap_ready();
    assert_eq!(id.timestamp(), 43);
    assert_eq!(id.random(), 0);
}

fn run_mono_reports_clock_behind<ID>()
where
    ID: UlidId<Ty = u128>,
{
    let generator = AtomicMonoUlidGenerator::<ID, _, _>::from_components(
        50,
        0,
        MockTime { millis: 42 },
        MockRand { rand: 0 },
    );
    assert_eq!(generator.poll_id().unwrap_pending(), 8);
}

fn run_threaded_unique_and_ordered<G, ID>(generator: G)
where
    G: UlidGenerator<ID, MonotonicClock, ThreadRandom> + Sync,
    ID: UlidId<Ty = u128> + Send,
{
    const THREADS: usize = 8;
    const IDS_PER_THREAD: usize = 8_192;

    let seen_ids = Arc::new(Mutex::new(HashSet::with_capacity(THREADS * IDS_PER_THREAD)));

    scope(|s| {
        for _ in 0..THREADS {
            let generator = &generator;
            let seen_ids = Arc::clone(&seen_ids);
            s.spawn(move || {
                let mut last: Option<ID> = None;
                for _ in 0..IDS_PER_THREAD {
                    let id = generator.next_id(|_| std::thread::yield_now());
                    assert!(last.is_none_or(|prev| prev.timestamp() <= id.timestamp()));
                    last = Some(id);
                    assert!(seen_ids.lock().unwrap().insert(id));
                }
            });
        }
    });

    assert_eq!(seen_ids.lock().unwrap().len(), THREADS * IDS_PER_THREAD);
}

#[test]
fn basic_ulid_uses_time_and_rand() {
    run_basic_uses_time_and_rand::<ULID>();
}

#[test]
fn mono_ulid_increments_within_same_tick() {
    run_mono_increments_within_same_tick::<ULID>();
}

#[test]
fn mono_uuid_v7_increments_within_same_tick() {
    run_mono_increments_within_same_tick::<UuidV7State>();
}

#[test]
fn mono_ulid_pending_when_random_exhausted() {
    run_mono_pending_when_random_exhausted::<ULID>();
}

#[test]
fn mono_uuid_v7_pending_when_random_exhausted() {
    run_mono_pending_when_random_exhausted::<UuidV7State>();
}

#[test]
fn mono_ulid_reports_clock_behind() {
    run_mono_reports_clock_behind::<ULID>();
}

#[test]
fn mono_ulid_threaded() {
    run_threaded_unique_and_ordered::<_, ULID>(AtomicMonoUlidGenerator::new(
        MonotonicClock::shared(),
        ThreadRandom,
    ));
}

#[test]
fn mono_uuid_v7_threaded() {
    run_threaded_unique_and_ordered::<_, UuidV7State>(AtomicMonoUlidGenerator::new(
        MonotonicClock::shared(),
        ThreadRandom,
    ));
}

#[test]
fn basic_ulid_threaded() {
    run_threaded_unique_and_ordered::<_, ULID>(BasicUlidGenerator::new(
        MonotonicClock::shared(),
        ThreadRandom,
    ));
}

#[test]
fn mono_ids_strictly_increase() {
    let generator =
        AtomicMonoUlidGenerator::<ULID, _, _>::new(MonotonicClock::shared(), ThreadRandom);
    let mut last = generator.next_id(|_| std::thread::yield_now());
    for _ in 0..10_000 {
        let id = generator.next_id(|_| std::thread::yield_now());
        assert!(id > last);
        assert!(id.to_string() > last.to_string());
        last = id;
    }
}
