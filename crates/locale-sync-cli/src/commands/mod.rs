//! CLI command implementations.

mod check;
mod common;
mod resolve;

pub use check::{CheckArgs, run_check};
pub use common::GlobalArgs;
pub use resolve::{ResolveArgs, resolve_plan, run_resolve};
