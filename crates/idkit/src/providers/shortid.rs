//! `shortid`: short variable-length ids over a per-process shuffled
//! alphabet.

use core::time::Duration;

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    codec::Alphabet,
    error::{Error, Result},
    generator::{SHORTID_MAX_WORKER, SHORTID_MIN_ALPHABET, ShortIdGenerator},
    provider::{IdSource, Provider},
    providers::bootstrap_failed,
    registry,
    time::{MonotonicClock, SHORTID_EPOCH, TickClock, TimeSource},
};

pub const NAME: &str = "shortid";

/// Variable length, so no fixed bit count is reported.
pub const SIZE: u32 = 0;

/// Symbols without the easily confused `0 O 1 I l`.
pub const DEFAULT_ALPHABET: &str = "23456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Configuration for the `shortid` provider. Unset fields are drawn at
/// random.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ShortIdConfig {
    /// Worker id in `1..=31`.
    pub worker: Option<u8>,
    /// Seed for the alphabet shuffle. Processes sharing a seed share an
    /// alphabet order.
    pub seed: Option<u64>,
    /// Symbols to shuffle; at least 32 unique characters.
    pub alphabet: Option<String>,
}

impl<T> IdSource<String> for ShortIdGenerator<T>
where
    T: TimeSource<u64> + Send + Sync,
{
    fn generate(&self) -> String {
        self.next_id()
    }

    fn validate(&self, id: &String) -> bool {
        ShortIdGenerator::validate(self, id)
    }
}

fn generator(config: ShortIdConfig) -> Result<ShortIdGenerator<TickClock>> {
    let mut rng = rand::rng();
    let worker = match config.worker {
        Some(worker @ 1..=SHORTID_MAX_WORKER) => worker,
        Some(worker) => {
            return Err(Error::invalid_config(format!(
                "shortid worker {worker} is outside 1..={SHORTID_MAX_WORKER}"
            )));
        }
        None => rng.random_range(1..=SHORTID_MAX_WORKER),
    };
    let seed = config.seed.unwrap_or_else(|| rng.random());
    let alphabet = Alphabet::new(
        config.alphabet.as_deref().unwrap_or(DEFAULT_ALPHABET),
        SHORTID_MIN_ALPHABET,
    )?
    .shuffled(&mut StdRng::seed_from_u64(seed));

    let clock = TickClock::new(MonotonicClock::shared(), SHORTID_EPOCH, Duration::from_millis(1));
    Ok(ShortIdGenerator::new(alphabet, worker, clock))
}

/// Builds the `shortid` provider.
///
/// # Errors
///
/// Returns [`Error::InvalidConfig`] for a worker outside `1..=31` or an
/// alphabet with repeated symbols or fewer than 32 of them.
pub fn provider(config: ShortIdConfig) -> Result<Provider> {
    Provider::builder(NAME, SIZE)
        .string(generator(config)?)
        .build()
}

/// Registers the `shortid` provider in the global registry.
///
/// # Errors
///
/// See [`provider`].
pub fn try_install(config: ShortIdConfig) -> Result<()> {
    registry::register(provider(config)?);
    Ok(())
}

/// Infallible [`try_install`].
///
/// # Panics
///
/// Panics if the config is rejected.
pub fn install(config: ShortIdConfig) {
    if let Err(err) = try_install(config) {
        bootstrap_failed(NAME, &err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_fixes_alphabet_order() {
        let config = ShortIdConfig {
            worker: Some(3),
            seed: Some(42),
            alphabet: None,
        };
        let a = generator(config.clone()).unwrap();
        let b = generator(config).unwrap();
        assert_eq!(a.alphabet(), b.alphabet());
        assert_eq!(a.worker(), 3);
        assert_eq!(a.alphabet().len(), DEFAULT_ALPHABET.chars().count());
        assert!(a.alphabet().symbols().iter().all(|&c| DEFAULT_ALPHABET.contains(c)));
    }

    #[test]
    fn random_worker_is_in_range() {
        for _ in 0..100 {
            let worker = generator(ShortIdConfig::default()).unwrap().worker();
            assert!((1..=SHORTID_MAX_WORKER).contains(&worker));
        }
    }

    #[test]
    fn ids_validate_and_differ() {
        let provider = provider(ShortIdConfig::default()).unwrap();
        assert_eq!(provider.size(), 0);
        assert_eq!(provider.width(), None);

        let source = provider.as_string().unwrap();
        let a = source.generate();
        let b = source.generate();
        assert_ne!(a, b);
        assert!(source.validate(&a));
        assert!(source.validate(&b));
        assert!(!source.validate(&String::new()));
        assert!(!source.validate(&"not-a-valid-id-of-this-family".to_owned()));
    }

    #[test]
    fn rejects_bad_configs() {
        for worker in [0, 32, 255] {
            let result = generator(ShortIdConfig {
                worker: Some(worker),
                ..ShortIdConfig::default()
            });
            assert!(matches!(result, Err(Error::InvalidConfig { .. })), "{worker}");
        }
        let short = generator(ShortIdConfig {
            alphabet: Some("abcdefghij".to_owned()),
            ..ShortIdConfig::default()
        });
        assert!(matches!(short, Err(Error::InvalidConfig { .. })));
    }
}
