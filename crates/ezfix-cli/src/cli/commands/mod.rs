//! CLI command handlers, one per file.

mod fix;
mod normalize;

pub use fix::{run_fix, FixArgs};
pub use normalize::run_normalize;
