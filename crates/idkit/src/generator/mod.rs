mod ksuid;
mod shortid;
mod snowflake;
mod status;
mod ulid;

pub use ksuid::*;
pub use shortid::*;
pub use snowflake::*;
pub use status::*;
pub use ulid::*;
