//! `number`: a process-local counter.
//!
//! Every call atomically adds one and returns the new value, so a counter
//! configured with `start = 1` yields `2`, `3`, `4`, ... The global registry
//! is seeded with a `start = 0` counter so a default always exists.

use std::sync::Arc;

use portable_atomic::{AtomicI64, Ordering};

use crate::{
    error::Result,
    provider::{IdSource, Provider},
    providers::bootstrap_failed,
    registry,
};

pub const NAME: &str = "number";
pub const SIZE: u32 = 64;

/// Configuration for the `number` provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NumberConfig {
    /// The value before the first id.
    pub start: i64,
}

/// Shared counter behind both slots of the provider.
#[derive(Debug)]
pub struct Counter {
    value: AtomicI64,
}

impl Counter {
    pub const fn new(start: i64) -> Self {
        Self {
            value: AtomicI64::new(start),
        }
    }

    /// Increments and returns the new value. Wraps at `i64::MAX`.
    pub fn next(&self) -> i64 {
        self.value.fetch_add(1, Ordering::Relaxed).wrapping_add(1)
    }

    /// The last value handed out.
    pub fn current(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }
}

impl IdSource<i64> for Counter {
    fn generate(&self) -> i64 {
        self.next()
    }

    fn validate(&self, id: &i64) -> bool {
        *id > 0
    }
}

impl IdSource<String> for Counter {
    fn generate(&self) -> String {
        self.next().to_string()
    }

    fn validate(&self, id: &String) -> bool {
        id.parse::<i64>().is_ok_and(|n| n > 0)
    }
}

/// Builds the `number` provider with a string and an `i64` slot sharing one
/// counter.
///
/// # Errors
///
/// Never fails in practice; the signature matches the other providers.
pub fn provider(config: NumberConfig) -> Result<Provider> {
    let counter = Arc::new(Counter::new(config.start));
    Provider::builder(NAME, SIZE)
        .string_arc(counter.clone())
        .number_arc(counter)
        .build()
}

/// Registers a fresh counter, replacing the existing one.
///
/// # Errors
///
/// See [`provider`].
pub fn try_install(config: NumberConfig) -> Result<()> {
    registry::register(provider(config)?);
    Ok(())
}

/// Infallible [`try_install`].
///
/// # Panics
///
/// Panics if the provider cannot be built.
pub fn install(config: NumberConfig) {
    if let Err(err) = try_install(config) {
        bootstrap_failed(NAME, &err);
    }
}

pub(crate) fn fallback() -> Provider {
    match provider(NumberConfig::default()) {
        Ok(provider) => provider,
        Err(err) => bootstrap_failed(NAME, &err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;

    #[test]
    fn start_one_yields_two_three_four() {
        let registry = Registry::new();
        registry.register(provider(NumberConfig { start: 1 }).unwrap());
        let generator = registry.get::<String>(NAME).unwrap();
        assert_eq!(generator.generate(), "2");
        assert_eq!(generator.generate(), "3");
        assert_eq!(generator.generate(), "4");
    }

    #[test]
    fn both_slots_share_one_counter() {
        let registry = Registry::new();
        registry.register(provider(NumberConfig { start: 10 }).unwrap());
        let text = registry.get::<String>(NAME).unwrap();
        let number = registry.get::<i64>(NAME).unwrap();
        assert_eq!(number.generate(), 11);
        assert_eq!(text.generate(), "12");
        assert_eq!(number.generate(), 13);
    }

    #[test]
    fn validate_accepts_only_positive_integers() {
        let counter = Counter::new(0);
        for ok in ["1", "42", "9223372036854775807"] {
            assert!(IdSource::<String>::validate(&counter, &ok.to_owned()), "{ok}");
        }
        for bad in ["", "0", "-3", "abc", "1.5", "9223372036854775808", " 1"] {
            assert!(!IdSource::<String>::validate(&counter, &bad.to_owned()), "{bad}");
        }
        assert!(IdSource::<i64>::validate(&counter, &1));
        assert!(!IdSource::<i64>::validate(&counter, &0));
        assert!(!IdSource::<i64>::validate(&counter, &-1));
    }

    #[test]
    fn wraps_instead_of_overflowing() {
        let counter = Counter::new(i64::MAX);
        assert_eq!(counter.next(), i64::MIN);
        assert_eq!(counter.current(), i64::MIN);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_from_json() {
        let config: NumberConfig = serde_json::from_str(r#"{"start": 5}"#).unwrap();
        assert_eq!(config, NumberConfig { start: 5 });
        let config: NumberConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, NumberConfig::default());
    }
}
