//! Reversible obfuscation of non-negative integers.
//!
//! [`HashIds`] is a codec rather than a generator: the same numbers and salt
//! always encode to the same string, and the string decodes back. It is not
//! registered as a provider.

use harsh::Harsh;

use crate::{
    codec::Alphabet,
    error::{Error, Result},
};

/// Minimum alphabet size the codec accepts.
pub const HASHIDS_MIN_ALPHABET: usize = 16;

/// Configuration for [`HashIds`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HashIdsConfig {
    /// Secret that permutes the alphabet. Must not be empty.
    pub salt: String,
    /// Shortest output; shorter hashes are padded with guard symbols.
    pub min_length: usize,
    /// Custom symbols, at least 16 unique ASCII characters without spaces.
    pub alphabet: Option<String>,
}

/// A salted HashIDs encoder and decoder.
///
/// ```
/// use idkit::{HashIds, HashIdsConfig};
///
/// let hashids = HashIds::new(HashIdsConfig {
///     salt: "this is my salt".into(),
///     min_length: 8,
///     alphabet: None,
/// })
/// .unwrap();
///
/// let hash = hashids.encode(&[1, 2, 3]).unwrap();
/// assert!(hash.len() >= 8);
/// assert_eq!(hashids.decode(&hash).unwrap(), [1, 2, 3]);
/// ```
pub struct HashIds {
    harsh: Harsh,
}

impl HashIds {
    /// Builds a codec from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for an empty salt or an alphabet with
    /// non-ASCII, repeated or too few symbols, and [`Error::HashIdsBuild`] if the codec
    /// rejects the alphabet for any other reason.
    pub fn new(config: HashIdsConfig) -> Result<Self> {
        if config.salt.is_empty() {
            return Err(Error::invalid_config("hashids salt must not be empty"));
        }

        let mut builder = Harsh::builder()
            .salt(config.salt.into_bytes())
            .length(config.min_length);
        if let Some(alphabet) = config.alphabet {
            if !alphabet.is_ascii() {
                return Err(Error::invalid_config("hashids alphabet must be ASCII"));
            }
            Alphabet::new(&alphabet, HASHIDS_MIN_ALPHABET)?;
            builder = builder.alphabet(alphabet.into_bytes());
        }
        let harsh = builder.build().map_err(Error::HashIdsBuild)?;
        Ok(Self { harsh })
    }

    /// Encodes `numbers` into a single hash.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyInput`] for an empty slice and
    /// [`Error::NegativeInput`] if any number is below zero.
    pub fn encode(&self, numbers: &[i64]) -> Result<String> {
        if numbers.is_empty() {
            return Err(Error::EmptyInput);
        }
        let values = numbers
            .iter()
            .map(|&n| u64::try_from(n).map_err(|_| Error::NegativeInput))
            .collect::<Result<Vec<u64>>>()?;
        Ok(self.harsh.encode(&values))
    }

    /// Decodes a hash produced with the same salt, alphabet and minimum
    /// length. The empty string decodes to no numbers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HashIdsDecode`] for a malformed hash and
    /// [`Error::Overflow`] if a value exceeds `i64::MAX`.
    pub fn decode(&self, hash: &str) -> Result<Vec<i64>> {
        if hash.is_empty() {
            return Ok(Vec::new());
        }
        self.harsh
            .decode(hash)
            .map_err(Error::HashIdsDecode)?
            .into_iter()
            .map(|value| i64::try_from(value).map_err(|_| Error::Overflow { value }))
            .collect()
    }
}

impl core::fmt::Debug for HashIds {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HashIds").finish_non_exhaustive()
    }
}
