use rand::{Rng, seq::SliceRandom};

use crate::{Error, Result};

/// An ordered set of distinct symbols for positional encodings over an
/// arbitrary base.
#[derive(Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    /// Builds an alphabet from `symbols`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if a symbol repeats or fewer than
    /// `min_len` symbols are given. Fewer than two symbols are always
    /// rejected.
    pub fn new(symbols: &str, min_len: usize) -> Result<Self> {
        // Base 1 has no positional encoding.
        let min_len = min_len.max(2);
        let mut seen = Vec::with_capacity(symbols.len());
        for c in symbols.chars() {
            if seen.contains(&c) {
                return Err(Error::invalid_config(format!(
                    "alphabet symbol {c:?} is repeated"
                )));
            }
            seen.push(c);
        }
        if seen.len() < min_len {
            return Err(Error::invalid_config(format!(
                "alphabet needs at least {min_len} unique symbols, got {}",
                seen.len()
            )));
        }
        Ok(Self { symbols: seen })
    }

    /// Number of symbols, i.e. the base.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    #[must_use]
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    #[must_use]
    pub fn contains(&self, c: char) -> bool {
        self.symbols.contains(&c)
    }

    /// Returns a copy with the symbols permuted by `rng`.
    #[must_use]
    pub fn shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let mut symbols = self.symbols.clone();
        symbols.shuffle(rng);
        Self { symbols }
    }

    /// Appends `value` to `out` left-padded to `width` symbols, most
    /// significant first. A value that needs more than `width` symbols is
    /// written in full.
    pub fn encode_fixed(&self, value: u64, width: usize, out: &mut String) {
        let start = out.len();
        self.encode(value, out);
        let written = out[start..].chars().count();
        if written < width {
            let pad: String = core::iter::repeat_n(self.symbols[0], width - written).collect();
            out.insert_str(start, &pad);
        }
    }

    /// Smallest width of at least `min_width` symbols that holds every
    /// value below `limit`.
    #[must_use]
    pub fn width_for(&self, limit: u64, min_width: usize) -> usize {
        let base = self.symbols.len() as u64;
        let mut width = min_width.max(1);
        let mut span = (0..width).fold(1_u64, |acc, _| acc.saturating_mul(base));
        while span < limit {
            width += 1;
            span = span.saturating_mul(base);
        }
        width
    }

    /// Appends `value` to `out` using the fewest symbols; zero is one symbol.
    pub fn encode(&self, mut value: u64, out: &mut String) {
        let base = self.symbols.len() as u64;
        let mut digits = Vec::new();
        loop {
            digits.push(self.symbols[(value % base) as usize]);
            value /= base;
            if value == 0 {
                break;
            }
        }
        out.extend(digits.iter().rev());
    }
}

impl core::fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let symbols: String = self.symbols.iter().collect();
        f.debug_tuple("Alphabet").field(&symbols).finish()
    }
}
