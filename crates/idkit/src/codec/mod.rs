//! Text encodings for the fixed-width identifier families.
//!
//! Every encoder writes big-endian, most significant symbol first, so the
//! byte order of the encoded text matches the numeric order of the value.

mod alphabet;
mod base32hex;
mod base62;
mod crockford;
mod error;

pub use alphabet::*;
pub use base32hex::*;
pub use base62::*;
pub use crockford::*;
pub use error::*;
