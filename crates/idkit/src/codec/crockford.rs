use super::{Error, Result};

const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";
const NO_VALUE: u8 = 255;
const BITS_PER_CHAR: usize = 5;

/// Number of characters in an encoded 128-bit value.
pub const CROCKFORD_U128_LEN: usize = 26;

/// Canonical symbols only, either case.
const STRICT_LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0_u8;
    while i < 32 {
        let c = ALPHABET[i as usize];
        lut[c as usize] = i;
        if c.is_ascii_uppercase() {
            lut[(c + 32) as usize] = i; // lowercase letter
        }
        i += 1;
    }
    lut
};

/// Lookup table for Crockford base32 decoding
const LOOKUP: [u8; 256] = {
    let mut lut = STRICT_LOOKUP;
    // Crockford-specific aliases
    lut[b'O' as usize] = 0;
    lut[b'o' as usize] = 0;
    lut[b'I' as usize] = 1;
    lut[b'i' as usize] = 1;
    lut[b'L' as usize] = 1;
    lut[b'l' as usize] = 1;
    lut
};

/// Encodes a byte slice into Crockford base32, writing output to `buf`.
///
/// The output is left-padded with zero bits, so `buf` must hold exactly
/// `ceil(input.len() * 8 / 5)` bytes.
pub fn encode_base32(input: &[u8], buf: &mut [u8]) {
    let input_bits = input.len() * 8;
    let total_bits = buf.len() * BITS_PER_CHAR;
    debug_assert!(total_bits >= input_bits && total_bits - input_bits < BITS_PER_CHAR);
    let mut bits = total_bits - input_bits;
    let mut acc = 0_u16;
    let mask = 0x1F;

    let mut out = 0;
    for &b in input {
        acc = (acc << 8) | u16::from(b);
        bits += 8;
        while bits >= BITS_PER_CHAR {
            bits -= BITS_PER_CHAR;
            buf[out] = ALPHABET[((acc >> bits) & mask) as usize];
            out += 1;
        }
    }
}

/// Decodes a Crockford base32 string into the integer type `T`.
///
/// Accepts lower case and the `O`, `I`, `L` aliases. Bits shifted past the
/// width of `T` are discarded; use [`decode_ulid`] for a checked 128-bit
/// decode.
pub fn decode_base32<T>(encoded: &str) -> Result<T>
where
    T: Default + From<u8> + core::ops::Shl<usize, Output = T> + core::ops::BitOr<Output = T>,
{
    decode_with(&LOOKUP, encoded)
}

fn decode_with<T>(lut: &[u8; 256], encoded: &str) -> Result<T>
where
    T: Default + From<u8> + core::ops::Shl<usize, Output = T> + core::ops::BitOr<Output = T>,
{
    let mut acc = T::default();
    for (index, byte) in encoded.bytes().enumerate() {
        let val = lut[byte as usize];
        if val == NO_VALUE {
            return Err(Error::InvalidAscii { byte, index });
        }
        acc = (acc << BITS_PER_CHAR) | T::from(val);
    }

    Ok(acc)
}

/// Encodes a 128-bit value as a 26 character Crockford string.
#[must_use]
pub fn encode_ulid(value: u128) -> String {
    let mut buf = [0_u8; CROCKFORD_U128_LEN];
    encode_base32(&value.to_be_bytes(), &mut buf);
    buf.iter().map(|&b| char::from(b)).collect()
}

/// Decodes a 26 character Crockford string into a 128-bit value.
///
/// Strict: lower case is accepted but the `O`, `I`, `L` aliases are not, so
/// every value has exactly one spelling up to case. 26 symbols carry 130
/// bits, so the leading symbol must be `7` or lower.
pub fn decode_ulid(encoded: &str) -> Result<u128> {
    if encoded.len() != CROCKFORD_U128_LEN {
        return Err(Error::InvalidLength {
            expected: CROCKFORD_U128_LEN,
            found: encoded.len(),
        });
    }
    let first = encoded.as_bytes()[0];
    let value = decode_with::<u128>(&STRICT_LOOKUP, encoded)?;
    if STRICT_LOOKUP[first as usize] > 7 {
        return Err(Error::Overflow);
    }
    Ok(value)
}
