//! CLI-facing workflow, separated from argument parsing in `main.rs`

pub mod orchestration;

pub use orchestration::{run_guard, GuardContext, GuardOutcome, GuardReport};
