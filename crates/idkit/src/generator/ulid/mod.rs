mod atomic_mono;
mod basic;
mod interface;
#[cfg(test)]
mod tests;

pub use atomic_mono::*;
pub use basic::*;
pub use interface::*;
