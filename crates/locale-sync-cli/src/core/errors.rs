//! CLI error types using miette for Rust-style diagnostics.

// Fields in these structs are read by miette's Diagnostic derive macro
#![allow(unused)]

use crate::utils::LocaleSourceError;
use locale_sync_core::{PatternError, TargetError};
use locale_sync_toml::TargetKind;
use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Error when no `.locale-sync.toml` could be found.
#[derive(Debug, Diagnostic, Error)]
#[error(".locale-sync.toml configuration file not found")]
#[diagnostic(
    code(locale_sync::config::not_found),
    help(
        "Create a .locale-sync.toml file in your project root, for example:\n\n  \
          project_id = \"<project id>\"\n  \
          file_format = \"yml\"\n\n  \
          [[pull.targets]]\n  \
          file = \"./locales/<locale_code>.yml\"\n"
    )
)]
pub struct ConfigNotFoundError {
    /// The path where the config was expected.
    pub expected_path: PathBuf,
}

/// Error when the configuration file cannot be read or parsed.
#[derive(Debug, Diagnostic, Error)]
#[error("failed to load {}", .path.display())]
#[diagnostic(code(locale_sync::config::invalid))]
pub struct ConfigFileError {
    pub path: PathBuf,

    /// The underlying error message.
    #[help]
    pub help: String,
}

/// Error when the remote locale listing cannot be loaded.
#[derive(Debug, Diagnostic, Error)]
#[error("failed to load remote locales of project '{project_id}' from {}", .path.display())]
#[diagnostic(
    code(locale_sync::locales::invalid),
    help("Expected a JSON array of {{\"id\", \"name\", \"code\"}} objects, or such arrays keyed by project id")
)]
pub struct LocalesError {
    pub path: PathBuf,
    pub project_id: String,

    #[source]
    pub source: LocaleSourceError,
}

/// A configured pattern that fails validation.
#[derive(Debug, Diagnostic, Error)]
#[error("invalid {kind} pattern #{index}")]
#[diagnostic(code(locale_sync::check::invalid_pattern))]
pub struct InvalidPatternIssue {
    pub kind: TargetKind,

    /// 1-based position of the entry in the configuration.
    pub index: usize,

    #[source]
    #[diagnostic_source]
    pub source: PatternError,
}

/// Aggregated result of the check command.
#[derive(Debug, Diagnostic, Error)]
#[error("check found {error_count} invalid pattern(s)")]
#[diagnostic(code(locale_sync::check::report))]
pub struct CheckReport {
    pub error_count: usize,

    #[related]
    pub issues: Vec<InvalidPatternIssue>,
}

/// A configured entry that could not be expanded into locale files.
#[derive(Debug, Diagnostic, Error)]
#[error("failed to resolve {kind} entry #{index}")]
#[diagnostic(code(locale_sync::resolve::failed))]
pub struct ResolveError {
    pub kind: TargetKind,

    /// 1-based position of the entry in the configuration.
    pub index: usize,

    #[source]
    #[diagnostic_source]
    pub source: TargetError,
}

#[derive(Debug, Diagnostic, Error)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    ConfigNotFound(#[from] ConfigNotFoundError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    ConfigFile(#[from] ConfigFileError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Locales(#[from] LocalesError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Check(#[from] CheckReport),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Resolve(#[from] ResolveError),

    #[error("IO error: {0}")]
    #[diagnostic(code(locale_sync::io))]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    #[diagnostic(code(locale_sync::json))]
    Json(#[from] serde_json::Error),
}
