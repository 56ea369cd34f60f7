use super::{Error, Result};

const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const NO_VALUE: u8 = 255;

const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0_u8;
    while i < 62 {
        lut[ALPHABET[i as usize] as usize] = i;
        i += 1;
    }
    lut
};

/// Number of characters in an encoded 20-byte KSUID.
pub const BASE62_KSUID_LEN: usize = 27;

/// Encodes a big-endian byte string in base62, left-padded with `0` to
/// `width` characters.
///
/// `width` must be large enough for the value; 27 covers 160 bits.
#[must_use]
pub fn encode_base62(input: &[u8], width: usize) -> String {
    let mut digits = Vec::with_capacity(width);
    let mut number = input.to_vec();

    while number.iter().any(|&b| b != 0) {
        // Long division of the whole number by 62, one byte at a time.
        let mut rem = 0_u32;
        for byte in &mut number {
            let acc = (rem << 8) | u32::from(*byte);
            *byte = (acc / 62) as u8;
            rem = acc % 62;
        }
        digits.push(ALPHABET[rem as usize]);
    }
    debug_assert!(digits.len() <= width, "base62 value wider than {width}");
    digits.resize(digits.len().max(width), b'0');

    digits.iter().rev().map(|&b| char::from(b)).collect()
}

/// Decodes a base62 string of exactly `out.len()`'s encoded width into `out`.
///
/// Returns [`Error::Overflow`] when the value does not fit into `out`.
pub fn decode_base62(encoded: &str, width: usize, out: &mut [u8]) -> Result<()> {
    if encoded.len() != width {
        return Err(Error::InvalidLength {
            expected: width,
            found: encoded.len(),
        });
    }

    out.fill(0);
    for (index, byte) in encoded.bytes().enumerate() {
        let val = LOOKUP[byte as usize];
        if val == NO_VALUE {
            return Err(Error::InvalidAscii { byte, index });
        }
        // out = out * 62 + val
        let mut carry = u32::from(val);
        for b in out.iter_mut().rev() {
            let acc = u32::from(*b) * 62 + carry;
            *b = (acc & 0xFF) as u8;
            carry = acc >> 8;
        }
        if carry != 0 {
            return Err(Error::Overflow);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_small_values() {
        assert_eq!(encode_base62(&[0, 0], 3), "000");
        assert_eq!(encode_base62(&[0, 61], 3), "00z");
        assert_eq!(encode_base62(&[0, 62], 3), "010");
        assert_eq!(encode_base62(&[0xFF, 0xFF], 3), "H31");
    }

    #[test]
    fn ksuid_extremes() {
        assert_eq!(encode_base62(&[0; 20], BASE62_KSUID_LEN), "000000000000000000000000000");
        assert_eq!(encode_base62(&[0xFF; 20], BASE62_KSUID_LEN), "aWgEPTl1tmebfsQzFP4bxwgy80V");

        let mut out = [0_u8; 20];
        decode_base62("aWgEPTl1tmebfsQzFP4bxwgy80V", BASE62_KSUID_LEN, &mut out).unwrap();
        assert_eq!(out, [0xFF; 20]);
    }

    #[test]
    fn decode_rejects_bad_input() {
        let mut out = [0_u8; 20];
        assert_eq!(
            decode_base62("abc", BASE62_KSUID_LEN, &mut out),
            Err(Error::InvalidLength {
                expected: 27,
                found: 3
            })
        );
        assert_eq!(
            decode_base62("0ujtsYcgvSTl8PAuAdqWYSMnLO-", BASE62_KSUID_LEN, &mut out),
            Err(Error::InvalidAscii {
                byte: b'-',
                index: 26
            })
        );
        // One past the largest 160-bit value.
        assert_eq!(
            decode_base62("aWgEPTl1tmebfsQzFP4bxwgy80W", BASE62_KSUID_LEN, &mut out),
            Err(Error::Overflow)
        );
    }

    #[test]
    fn known_ksuid_roundtrips() {
        let text = "0ujtsYcgvSTl8PAuAdqWYSMnLOv";
        let mut out = [0_u8; 20];
        decode_base62(text, BASE62_KSUID_LEN, &mut out).unwrap();
        assert_eq!(encode_base62(&out, BASE62_KSUID_LEN), text);
    }
}
