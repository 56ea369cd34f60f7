//! A registry of unique-identifier generators behind one typed contract.
//!
//! Every algorithm is a named [`Provider`] exposing an optional `String`
//! generator and an optional `i64` generator. [`registry::get`] hands out a
//! typed [`Generator`] handle, or `None` when the name is unknown or the
//! provider does not vend that representation.
//!
//! ```
//! idkit::providers::install_all();
//!
//! let snowflake = idkit::registry::get::<i64>("snowflake").unwrap();
//! assert!(snowflake.generate() > 0);
//! assert!(idkit::registry::get::<i64>("ulid").is_none());
//! ```
//!
//! The layouts, lock-free generators and clocks the providers are built from
//! are public as well, for callers that want a concrete id type instead of a
//! registry lookup.
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod codec;
mod error;
mod generator;
#[cfg(feature = "hashids")]
#[cfg_attr(docsrs, doc(cfg(feature = "hashids")))]
mod hashids;
mod id;
mod provider;
pub mod providers;
mod rand;
pub mod registry;
mod time;

pub use crate::error::*;
pub use crate::generator::*;
#[cfg(feature = "hashids")]
pub use crate::hashids::*;
pub use crate::id::*;
pub use crate::provider::*;
pub use crate::rand::*;
pub use crate::registry::Registry;
pub use crate::time::*;
