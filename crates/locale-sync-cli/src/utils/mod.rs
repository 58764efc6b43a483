//! Utility functions shared across CLI commands.

mod source;
pub mod ui;

pub use source::{JsonFileSource, LocaleSource, LocaleSourceError};
