mod interface;
mod ksuid;
mod snowflake;
mod to_u64;
mod ulid;
mod xid;

pub use interface::*;
pub use ksuid::*;
pub use snowflake::*;
pub use to_u64::*;
pub use ulid::*;
pub use xid::*;
