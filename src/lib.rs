pub mod engine;
pub mod logging;
pub mod shared;

pub use engine::core::*;
pub use engine::errors::MergeError;

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
pub mod test_helpers;
