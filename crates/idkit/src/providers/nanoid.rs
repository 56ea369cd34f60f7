//! `nanoid`: random URL-safe strings, 21 symbols of a 64-symbol alphabet by
//! default.

use ::nanoid::nanoid;
use regex::Regex;

use crate::{
    codec::Alphabet,
    error::{Error, Result},
    provider::{IdSource, Provider},
    providers::bootstrap_failed,
    registry,
};

pub const NAME: &str = "nanoid";

/// Default number of symbols.
pub const DEFAULT_SIZE: usize = 21;

/// The largest alphabet the generator accepts.
pub const MAX_ALPHABET: usize = 255;

/// Configuration for the `nanoid` provider.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NanoIdConfig {
    /// Number of symbols per id.
    pub size: usize,
    /// Custom symbols; `None` selects `A-Za-z0-9_-`.
    pub alphabet: Option<String>,
}

impl Default for NanoIdConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            alphabet: None,
        }
    }
}

enum Symbols {
    UrlSafe(Regex),
    Custom(Alphabet),
}

struct NanoIdSource {
    size: usize,
    symbols: Symbols,
}

impl IdSource<String> for NanoIdSource {
    fn generate(&self) -> String {
        let size = self.size;
        match &self.symbols {
            Symbols::UrlSafe(_) => nanoid!(size),
            Symbols::Custom(alphabet) => nanoid!(size, alphabet.symbols()),
        }
    }

    fn validate(&self, id: &String) -> bool {
        match &self.symbols {
            Symbols::UrlSafe(pattern) => pattern.is_match(id),
            Symbols::Custom(alphabet) => {
                id.chars().count() == self.size && id.chars().all(|c| alphabet.contains(c))
            }
        }
    }
}

/// Entropy in bits of `size` symbols drawn from `symbols` choices.
fn entropy_bits(symbols: usize, size: usize) -> u32 {
    ((symbols as f64).log2() * size as f64).floor() as u32
}

/// Builds the `nanoid` provider.
///
/// # Errors
///
/// Returns [`Error::InvalidConfig`] for a zero size, or an alphabet with
/// repeated symbols, fewer than two or more than [`MAX_ALPHABET`] symbols.
pub fn provider(config: NanoIdConfig) -> Result<Provider> {
    let NanoIdConfig { size, alphabet } = config;
    if size == 0 {
        return Err(Error::invalid_config("nanoid size must be at least 1"));
    }

    let (symbols, choices) = match alphabet {
        None => {
            let pattern = Regex::new(&format!("^[A-Za-z0-9_-]{{{size}}}$"))
                .map_err(|err| Error::invalid_config(format!("nanoid size {size}: {err}")))?;
            (Symbols::UrlSafe(pattern), 64)
        }
        Some(alphabet) => {
            let alphabet = Alphabet::new(&alphabet, 2)?;
            if alphabet.len() > MAX_ALPHABET {
                return Err(Error::invalid_config(format!(
                    "nanoid alphabet has {} symbols, at most {MAX_ALPHABET} are allowed",
                    alphabet.len()
                )));
            }
            let choices = alphabet.len();
            (Symbols::Custom(alphabet), choices)
        }
    };

    Provider::builder(NAME, entropy_bits(choices, size))
        .width(size)
        .string(NanoIdSource { size, symbols })
        .build()
}

/// Registers the `nanoid` provider in the global registry.
///
/// # Errors
///
/// See [`provider`].
pub fn try_install(config: NanoIdConfig) -> Result<()> {
    registry::register(provider(config)?);
    Ok(())
}

/// Infallible [`try_install`].
///
/// # Panics
///
/// Panics if the config is rejected.
pub fn install(config: NanoIdConfig) {
    if let Err(err) = try_install(config) {
        bootstrap_failed(NAME, &err);
    }
}
