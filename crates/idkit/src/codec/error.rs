/// A result type whose error defaults to the codec [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors returned while decoding a textual identifier.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The input does not have the fixed width of the encoding.
    #[error("invalid length: expected {expected}, found {found}")]
    InvalidLength { expected: usize, found: usize },

    /// The input contains a byte outside the alphabet.
    #[error("invalid ascii byte {byte:#04x} at index {index}")]
    InvalidAscii { byte: u8, index: usize },

    /// The decoded value does not fit the target width.
    #[error("decoded value overflows the target width")]
    Overflow,
}
