//! Shared CLI argument types

mod common;
mod global;

pub use common::{OutputFormat, tri_state};
pub use global::GlobalOptions;
