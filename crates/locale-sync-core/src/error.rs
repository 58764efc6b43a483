use crate::placeholder::Placeholder;
use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// A file pattern violates one of the structural rules checked by
/// [`validate`](crate::pattern::validate).
#[derive(Clone, Debug, Diagnostic, Eq, Error, PartialEq)]
pub enum PatternError {
    #[error("file pattern is empty")]
    #[diagnostic(
        code(locale_sync::pattern::empty),
        help("Set `file` to a path such as `./locales/<locale_code>.yml`")
    )]
    Empty,

    #[error("file pattern '{pattern}' has no file extension")]
    #[diagnostic(
        code(locale_sync::pattern::missing_extension),
        help("End the pattern with a file extension, e.g. `.yml` or `.json`")
    )]
    MissingExtension { pattern: String },

    #[error("file pattern '{pattern}' uses unknown placeholder '{token}'")]
    #[diagnostic(
        code(locale_sync::pattern::unknown_placeholder),
        help("Supported placeholders are <locale_code>, <locale_name> and <tag>")
    )]
    UnknownPlaceholder { pattern: String, token: String },

    #[error("placeholder {placeholder} can only occur once in file pattern '{pattern}'")]
    #[diagnostic(code(locale_sync::pattern::duplicate_placeholder))]
    DuplicatePlaceholder {
        pattern: String,
        placeholder: Placeholder,
    },

    #[error("file pattern '{pattern}' has {count} wildcard segments, at most one is allowed")]
    #[diagnostic(
        code(locale_sync::pattern::multiple_wildcards),
        help("Replace all but one `*`/`**` segment with fixed directories or placeholders")
    )]
    MultipleWildcards { pattern: String, count: usize },

    #[error("file pattern '{pattern}' lets a wildcard stand in for the locale")]
    #[diagnostic(
        code(locale_sync::pattern::wildcard_locale),
        help(
            "Put <locale_code> or <locale_name> in a segment of its own, or use a fixed file name"
        )
    )]
    WildcardLocale { pattern: String },

    #[error("file pattern '{pattern}' uses a wildcard, downloads need a concrete file name")]
    #[diagnostic(
        code(locale_sync::pattern::wildcard_download),
        help("Wildcards are only supported for push sources")
    )]
    WildcardDownload { pattern: String },
}

/// A template requested a placeholder that has no value.
#[derive(Clone, Debug, Diagnostic, Eq, Error, PartialEq)]
pub enum SubstitutionError {
    #[error("no value for placeholder {placeholder}")]
    #[diagnostic(code(locale_sync::placeholder::missing_value))]
    MissingValue { placeholder: Placeholder },
}

/// Errors produced while expanding a target into locale files.
#[derive(Debug, Diagnostic, Error)]
pub enum TargetError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    InvalidPattern(#[from] PatternError),

    #[error("no value for placeholder {placeholder} in locale '{locale}'")]
    #[diagnostic(
        code(locale_sync::target::missing_value),
        help("Configure `tags` for patterns using <tag>, and check the remote locale's name")
    )]
    MissingValue {
        placeholder: Placeholder,
        locale: String,
    },

    #[error("locales '{first}' and '{second}' both resolve to {}", .path.display())]
    #[diagnostic(
        code(locale_sync::target::ambiguous_locale_code),
        help("Add <locale_code> to the pattern, or restrict the target with `locale_id`")
    )]
    AmbiguousLocaleCode {
        path: PathBuf,
        first: String,
        second: String,
    },

    #[error("value '{value}' of placeholder {placeholder} in locale '{locale}' is not a single path segment")]
    #[diagnostic(
        code(locale_sync::target::unsafe_value),
        help("Placeholder values must not contain `/` or `\\`, and must not be `.` or `..`")
    )]
    UnsafeValue {
        placeholder: Placeholder,
        value: String,
        locale: String,
    },

    #[error("locale id '{id}' does not match any remote locale")]
    #[diagnostic(code(locale_sync::target::unknown_locale))]
    UnknownLocale { id: String },

    #[error("failed to resolve the working directory: {0}")]
    #[diagnostic(code(locale_sync::target::working_directory))]
    WorkingDirectory(#[source] std::io::Error),
}
