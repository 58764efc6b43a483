//! Structural validation of file patterns.
//!
//! A pattern is split into path segments and every segment is classified
//! before the rules are checked in a fixed order. The first violated rule
//! is reported.

use crate::error::PatternError;
use crate::placeholder::{self, Placeholder};

/// Classification of a single path segment.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SegmentKind {
    /// `.`
    Current,
    /// `..`
    Parent,
    /// A literal directory or file name.
    Fixed,
    /// Contains `*` or `**`.
    Wildcard,
    /// Contains at least one recognized placeholder and no wildcard.
    Placeholder,
    /// A wildcard and a placeholder in the same segment.
    Mixed,
}

impl SegmentKind {
    pub fn classify(segment: &str) -> Self {
        let wildcard = segment.contains('*');
        let placeholder =
            placeholder::tokens(segment).any(|token| Placeholder::from_token(token).is_some());

        match (segment, wildcard, placeholder) {
            (".", ..) => SegmentKind::Current,
            ("..", ..) => SegmentKind::Parent,
            (_, true, true) => SegmentKind::Mixed,
            (_, true, false) => SegmentKind::Wildcard,
            (_, false, true) => SegmentKind::Placeholder,
            (_, false, false) => SegmentKind::Fixed,
        }
    }

    fn is_wildcard(self) -> bool {
        matches!(self, SegmentKind::Wildcard | SegmentKind::Mixed)
    }
}

/// Splits a pattern on both separator styles, dropping empty segments.
pub fn segments(pattern: &str) -> impl Iterator<Item = (&str, SegmentKind)> {
    pattern
        .split(['/', '\\'])
        .filter(|segment| !segment.is_empty())
        .map(|segment| (segment, SegmentKind::classify(segment)))
}

/// Checks that `pattern` can be expanded unambiguously, one file per locale.
pub fn validate(pattern: &str) -> Result<(), PatternError> {
    let trimmed = pattern.trim();
    if trimmed.is_empty() {
        return Err(PatternError::Empty);
    }

    let segments: Vec<_> = segments(trimmed).collect();

    let file_kind = match segments.last() {
        // A trailing separator names a directory.
        Some(&(file_name, kind))
            if has_extension(file_name) && !trimmed.ends_with(['/', '\\']) =>
        {
            kind
        },
        _ => {
            return Err(PatternError::MissingExtension {
                pattern: pattern.to_string(),
            });
        },
    };

    if let Some(token) =
        placeholder::tokens(trimmed).find(|token| Placeholder::from_token(token).is_none())
    {
        return Err(PatternError::UnknownPlaceholder {
            pattern: pattern.to_string(),
            token: token.to_string(),
        });
    }

    if Placeholder::LocaleCode.occurrences(trimmed) > 1 {
        return Err(PatternError::DuplicatePlaceholder {
            pattern: pattern.to_string(),
            placeholder: Placeholder::LocaleCode,
        });
    }

    let wildcards = segments.iter().filter(|(_, kind)| kind.is_wildcard()).count();
    if wildcards > 1 {
        return Err(PatternError::MultipleWildcards {
            pattern: pattern.to_string(),
            count: wildcards,
        });
    }

    let mixed = segments.iter().any(|(_, kind)| *kind == SegmentKind::Mixed);
    let anchored = segments
        .iter()
        .any(|(_, kind)| *kind == SegmentKind::Placeholder);
    if mixed || (file_kind == SegmentKind::Wildcard && !anchored) {
        return Err(PatternError::WildcardLocale {
            pattern: pattern.to_string(),
        });
    }

    Ok(())
}

/// Like [`validate`], but also rejects wildcards.
///
/// Downloaded files are written to the expanded path, so every segment has
/// to resolve to a concrete name.
pub fn validate_download(pattern: &str) -> Result<(), PatternError> {
    validate(pattern)?;

    if segments(pattern.trim()).any(|(_, kind)| kind.is_wildcard()) {
        return Err(PatternError::WildcardDownload {
            pattern: pattern.to_string(),
        });
    }

    Ok(())
}

/// A `.` followed by at least one character in the final segment.
fn has_extension(file_name: &str) -> bool {
    file_name
        .rfind('.')
        .is_some_and(|dot| dot + 1 < file_name.len())
}
