use core::time::Duration;

/// Unix epoch: Thursday, January 1, 1970 00:00:00 UTC
pub const UNIX_EPOCH: Duration = Duration::from_millis(0);

/// Twitter epoch: Thursday, November 4, 2010 1:42:54.657 UTC
pub const TWITTER_EPOCH: Duration = Duration::from_millis(1_288_834_974_657);

/// Sonyflake epoch: Monday, September 1, 2014 00:00:00 UTC
pub const SONYFLAKE_EPOCH: Duration = Duration::from_millis(1_409_529_600_000);

/// KSUID epoch: Tuesday, May 13, 2014 16:53:20 UTC
pub const KSUID_EPOCH: Duration = Duration::from_millis(1_400_000_000_000);

/// ShortID epoch: Friday, January 1, 2016 00:00:00 UTC
pub const SHORTID_EPOCH: Duration = Duration::from_millis(1_451_606_400_000);

/// Milliseconds between the Gregorian reform (1582-10-15) and the Unix epoch.
pub const GREGORIAN_OFFSET_MILLIS: u64 = 12_219_292_800_000;

/// A trait for time sources that return a monotonic or wall-clock timestamp.
///
/// This abstraction allows you to plug in a real system clock, a monotonic
/// timer, or a mocked time source in tests.
///
/// The timestamp type `T` is generic (typically `u64` or `u128`). The unit is
/// whatever tick the consuming id layout expects: milliseconds for ULID and
/// Snowflake, 10 ms for Sonyflake, seconds for XID and KSUID.
///
/// # Example
///
/// ```
/// use idkit::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource<u64> for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_millis(), 1234);
/// ```
pub trait TimeSource<T> {
    /// Returns the current time in ticks since the configured epoch.
    fn current_millis(&self) -> T;
}
