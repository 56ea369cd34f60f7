/// A result type whose error defaults to [`Error`].
///
/// Generation itself is infallible; errors surface from construction,
/// configuration and the HashIDs codec.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors `idkit` can produce.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A provider was built without a string or a number generator.
    #[error("provider `{name}` exposes neither a string nor a number generator")]
    NoCapability {
        /// The provider name.
        name: String,
    },

    /// A provider or codec configuration was rejected.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Human readable reason.
        reason: String,
    },

    /// A negative value was passed to [`crate::HashIds::encode`].
    #[error("negative input")]
    NegativeInput,

    /// An empty slice was passed to [`crate::HashIds::encode`].
    #[error("encoding an empty list of numbers")]
    EmptyInput,

    /// A decoded HashIDs value does not fit into an `i64`.
    #[error("decoded value {value} overflows i64")]
    Overflow {
        /// The raw decoded value.
        value: u64,
    },

    /// The HashIDs alphabet, salt or separators were rejected.
    #[cfg(feature = "hashids")]
    #[error("hashids build error: {0:?}")]
    HashIdsBuild(harsh::BuildError),

    /// A hash could not be decoded.
    #[cfg(feature = "hashids")]
    #[error("hashids decode error: {0:?}")]
    HashIdsDecode(harsh::Error),
}

impl Error {
    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}
