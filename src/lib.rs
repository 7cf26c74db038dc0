pub mod boundary;
pub mod cli;
pub mod config;
pub mod consolidation;
pub mod differ;
pub mod domain;
pub mod error;
pub mod git;
pub mod logging;
pub mod metadata;
pub mod ui;
pub mod validator;

pub use error::{GuardError, Result};
