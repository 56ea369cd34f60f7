//! The capability contract every identifier algorithm implements.
//!
//! A [`Provider`] is a named record with two optional slots, one producing
//! `String` ids and one producing `i64` ids. The registry hands out typed
//! [`Generator`] handles by looking at which slot is filled, so asking for a
//! representation a provider does not vend yields `None` instead of a runtime
//! type check at the call site.

mod handle;
mod interface;
mod vendor;

pub use handle::*;
pub use interface::*;
pub use vendor::*;
