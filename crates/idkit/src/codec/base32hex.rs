use super::{Error, Result};

const ALPHABET: &[u8; 32] = b"0123456789abcdefghijklmnopqrstuv";
const NO_VALUE: u8 = 255;

const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0_u8;
    while i < 32 {
        lut[ALPHABET[i as usize] as usize] = i;
        i += 1;
    }
    lut
};

/// Number of characters in an encoded 12-byte value.
pub const BASE32HEX_XID_LEN: usize = 20;

/// Encodes bytes as unpadded lower-case base32hex (RFC 4648 section 7).
///
/// Unlike Crockford the trailing symbol is right-padded with zero bits, so
/// the first symbol always holds the top five bits of the first byte.
#[must_use]
pub fn encode_base32hex(input: &[u8]) -> String {
    let mut out = String::with_capacity((input.len() * 8).div_ceil(5));
    let mut acc = 0_u16;
    let mut bits = 0;
    for &b in input {
        acc = (acc << 8) | u16::from(b);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(char::from(ALPHABET[usize::from((acc >> bits) & 0x1F)]));
        }
    }
    if bits > 0 {
        out.push(char::from(ALPHABET[usize::from((acc << (5 - bits)) & 0x1F)]));
    }
    out
}

/// Decodes lower-case base32hex into `out`.
///
/// The input length must be exactly the encoded width of `out`, and the
/// padding bits of the last symbol must be zero so that every value has a
/// single textual form.
pub fn decode_base32hex(encoded: &str, out: &mut [u8]) -> Result<()> {
    let expected = (out.len() * 8).div_ceil(5);
    if encoded.len() != expected {
        return Err(Error::InvalidLength {
            expected,
            found: encoded.len(),
        });
    }

    let mut acc = 0_u16;
    let mut bits = 0;
    let mut pos = 0;
    for (index, byte) in encoded.bytes().enumerate() {
        let val = LOOKUP[byte as usize];
        if val == NO_VALUE {
            return Err(Error::InvalidAscii { byte, index });
        }
        acc = (acc << 5) | u16::from(val);
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            out[pos] = (acc >> bits) as u8;
            pos += 1;
        }
    }
    if acc & ((1 << bits) - 1) != 0 {
        return Err(Error::Overflow);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc4648_vectors() {
        assert_eq!(encode_base32hex(b""), "");
        assert_eq!(encode_base32hex(b"f"), "co");
        assert_eq!(encode_base32hex(b"fo"), "cpng");
        assert_eq!(encode_base32hex(b"foo"), "cpnmu");
        assert_eq!(encode_base32hex(b"foob"), "cpnmuog");
        assert_eq!(encode_base32hex(b"fooba"), "cpnmuoj1");
        assert_eq!(encode_base32hex(b"foobar"), "cpnmuoj1e8");
    }

    #[test]
    fn xid_known_vector() {
        // Reference pair from the published xid test vectors.
        let bytes = [
            0x4d, 0x88, 0xe1, 0x5b, 0x60, 0xf4, 0x86, 0xe4, 0x28, 0x41, 0x2d, 0xc9,
        ];
        let text = encode_base32hex(&bytes);
        assert_eq!(text, "9m4e2mr0ui3e8a215n4g");
        assert_eq!(text.len(), BASE32HEX_XID_LEN);

        let mut out = [0_u8; 12];
        decode_base32hex(&text, &mut out).unwrap();
        assert_eq!(out, bytes);
    }

    #[test]
    fn decode_rejects_bad_input() {
        let mut out = [0_u8; 12];
        assert_eq!(
            decode_base32hex("", &mut out),
            Err(Error::InvalidLength {
                expected: 20,
                found: 0
            })
        );
        assert_eq!(
            decode_base32hex("9m4e2mr0ui3e8a215n4w", &mut out),
            Err(Error::InvalidAscii {
                byte: b'w',
                index: 19
            })
        );
        assert!(matches!(
            decode_base32hex("9M4E2MR0UI3E8A215N4G", &mut out),
            Err(Error::InvalidAscii { .. })
        ));
        // 'h' sets a padding bit in the final symbol.
        assert_eq!(decode_base32hex("9m4e2mr0ui3e8a215n4h", &mut out), Err(Error::Overflow));
    }
}
