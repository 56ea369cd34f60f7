//! `cuid2`: 24 character collision-resistant ids starting with a letter.

use crate::{
    error::{Error, Result},
    provider::{Provider, SourceFn},
    providers::bootstrap_failed,
    registry,
};

pub const NAME: &str = "cuid2";

/// Reported as variable length; the hash output carries no fixed bit count.
pub const SIZE: u32 = 0;

/// Options the underlying generator does not support. Setting either is
/// rejected rather than silently ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Cuid2Config {
    /// Custom id length.
    pub length: Option<u16>,
    /// Custom host fingerprint.
    pub fingerprint: Option<String>,
}

/// Builds the `cuid2` provider.
///
/// # Errors
///
/// Returns [`Error::InvalidConfig`] if any option is set.
pub fn provider(config: Cuid2Config) -> Result<Provider> {
    if config.length.is_some() {
        return Err(Error::invalid_config("cuid2 does not support a custom length"));
    }
    if config.fingerprint.is_some() {
        return Err(Error::invalid_config("cuid2 does not support a custom fingerprint"));
    }
    Provider::builder(NAME, SIZE)
        .string(SourceFn::new(::cuid2::create_id, |id: &String| {
            ::cuid2::is_cuid2(id)
        }))
        .build()
}

/// Registers the `cuid2` provider in the global registry.
///
/// # Errors
///
/// See [`provider`].
pub fn try_install(config: Cuid2Config) -> Result<()> {
    registry::register(provider(config)?);
    Ok(())
}

/// Infallible [`try_install`].
///
/// # Panics
///
/// Panics if the config is rejected.
pub fn install(config: Cuid2Config) {
    if let Err(err) = try_install(config) {
        bootstrap_failed(NAME, &err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_lowercase_ids_starting_with_a_letter() {
        let provider = provider(Cuid2Config::default()).unwrap();
        let source = provider.as_string().unwrap();
        let id = source.generate();
        assert!(!id.is_empty());
        assert!(id.chars().next().is_some_and(|c| c.is_ascii_lowercase()));
        assert!(id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        assert!(source.validate(&id));
        assert!(!source.validate(&String::new()));
        assert!(!source.validate(&"not-a-valid-id-of-this-family".to_owned()));
    }

    #[test]
    fn custom_options_are_rejected() {
        let length = provider(Cuid2Config {
            length: Some(10),
            fingerprint: None,
        });
        assert!(matches!(length, Err(Error::InvalidConfig { .. })));

        let fingerprint = provider(Cuid2Config {
            length: None,
            fingerprint: Some("host".to_owned()),
        });
        assert!(matches!(fingerprint, Err(Error::InvalidConfig { .. })));
    }
}
