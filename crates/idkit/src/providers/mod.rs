//! The built-in id providers.
//!
//! Each module builds a [`Provider`] from a typed config and offers
//! `try_install` (returns the error) and `install` (treats failure as fatal)
//! to add it to the global registry. [`install_all`] registers every compiled
//! provider with its default config.
//!
//! ```
//! idkit::providers::install_all();
//!
//! let ulid = idkit::registry::get::<String>("ulid").unwrap();
//! let id = ulid.generate();
//! assert_eq!(id.len(), 26);
//! assert!(ulid.validate(&id));
//! ```
//!
//! [`Provider`]: crate::provider::Provider

#[cfg(feature = "cuid2")]
#[cfg_attr(docsrs, doc(cfg(feature = "cuid2")))]
pub mod cuid2;
#[cfg(feature = "ksuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "ksuid")))]
pub mod ksuid;
#[cfg(feature = "nanoid")]
#[cfg_attr(docsrs, doc(cfg(feature = "nanoid")))]
pub mod nanoid;
pub mod number;
#[cfg(feature = "shortid")]
#[cfg_attr(docsrs, doc(cfg(feature = "shortid")))]
pub mod shortid;
#[cfg(feature = "snowflake")]
#[cfg_attr(docsrs, doc(cfg(feature = "snowflake")))]
pub mod snowflake;
#[cfg(feature = "sonyflake")]
#[cfg_attr(docsrs, doc(cfg(feature = "sonyflake")))]
pub mod sonyflake;
#[cfg(test)]
mod tests;
#[cfg(feature = "ulid")]
#[cfg_attr(docsrs, doc(cfg(feature = "ulid")))]
pub mod ulid;
#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
pub mod uuid;
#[cfg(feature = "xid")]
#[cfg_attr(docsrs, doc(cfg(feature = "xid")))]
pub mod xid;

use crate::{error::Error, generator::Backoff};

/// How the time-ordered providers wait out an exhausted tick.
pub(crate) const BACKOFF: Backoff = Backoff::Yield;

/// Logs and aborts a provider bootstrap. A program that asked for an id
/// source it cannot get has no sensible way to continue.
#[cold]
#[inline(never)]
pub(crate) fn bootstrap_failed(name: &str, err: &Error) -> ! {
    #[cfg(feature = "tracing")]
    tracing::error!(provider = name, error = %err, "id provider failed to initialize");
    panic!("id provider `{name}` failed to initialize: {err}");
}

/// Registers every compiled-in provider with its default config.
///
/// The order is fixed, so the default provider afterwards is `ulid` when
/// that feature is enabled. `number` is not reinstalled; the global registry
/// is seeded with it and reinstalling would reset its counter.
///
/// # Panics
///
/// Panics if a provider fails to initialize, after logging the error.
pub fn install_all() {
    if let Err(err) = try_install_all() {
        bootstrap_failed("all", &err);
    }
}

/// Fallible version of [`install_all`]. Stops at the first failure; the
/// providers installed before it stay registered.
///
/// # Errors
///
/// Returns the first provider construction error.
pub fn try_install_all() -> crate::Result<()> {
    #[cfg(feature = "cuid2")]
    cuid2::try_install(cuid2::Cuid2Config::default())?;
    #[cfg(feature = "nanoid")]
    nanoid::try_install(nanoid::NanoIdConfig::default())?;
    #[cfg(feature = "shortid")]
    shortid::try_install(shortid::ShortIdConfig::default())?;
    #[cfg(feature = "sonyflake")]
    sonyflake::try_install(sonyflake::SonyflakeConfig::default())?;
    #[cfg(feature = "snowflake")]
    snowflake::try_install(snowflake::SnowflakeConfig::default())?;
    #[cfg(feature = "xid")]
    xid::try_install()?;
    #[cfg(feature = "ksuid")]
    ksuid::try_install()?;
    #[cfg(feature = "uuid")]
    uuid::try_install()?;
    #[cfg(feature = "ulid")]
    ulid::try_install(ulid::UlidConfig::default())?;
    Ok(())
}
