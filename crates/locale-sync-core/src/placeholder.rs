//! Placeholder tokens and template substitution.
//!
//! A template is a file path that may contain the tokens `<locale_code>`,
//! `<locale_name>` and `<tag>`. Substitution replaces every occurrence of a
//! recognized token in a single pass, so values are never re-scanned for
//! tokens of their own.

use crate::error::SubstitutionError;
use strum::IntoEnumIterator as _;
use strum::{EnumIter, IntoStaticStr};

/// A placeholder token recognized in file patterns.
#[derive(Clone, Copy, Debug, EnumIter, Eq, Hash, IntoStaticStr, PartialEq, strum::Display)]
pub enum Placeholder {
    #[strum(serialize = "<locale_code>")]
    LocaleCode,
    #[strum(serialize = "<locale_name>")]
    LocaleName,
    #[strum(serialize = "<tag>")]
    Tag,
}

impl Placeholder {
    /// The literal token, brackets included.
    pub fn token(self) -> &'static str {
        self.into()
    }

    /// Looks up the placeholder for a bracketed token such as `<tag>`.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::iter().find(|placeholder| placeholder.token() == token)
    }

    /// Number of times this token occurs in `template`.
    pub fn occurrences(self, template: &str) -> usize {
        template.matches(self.token()).count()
    }

    pub fn is_in(self, template: &str) -> bool {
        template.contains(self.token())
    }
}

/// Values available for substitution. Empty strings count as missing.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaceholderValues<'a> {
    pub locale_code: Option<&'a str>,
    pub locale_name: Option<&'a str>,
    pub tag: Option<&'a str>,
}

impl<'a> PlaceholderValues<'a> {
    pub fn get(&self, placeholder: Placeholder) -> Option<&'a str> {
        let value = match placeholder {
            Placeholder::LocaleCode => self.locale_code,
            Placeholder::LocaleName => self.locale_name,
            Placeholder::Tag => self.tag,
        };
        value.filter(|value| !value.is_empty())
    }
}

/// Iterates over every bracketed `<...>` token in `text`, recognized or not.
pub(crate) fn tokens(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        loop {
            let start = rest.find('<')?;
            let candidate = &rest[start..];
            let end = candidate.find('>')?;
            let token = &candidate[..=end];
            if token[1..].contains('<') {
                rest = &candidate[1..];
                continue;
            }
            rest = &candidate[end + 1..];
            return Some(token);
        }
    })
}

/// Replaces every recognized placeholder in `template` with its value.
///
/// Unrecognized `<...>` sequences are copied through untouched. A template
/// without any recognized token is returned unchanged.
pub fn substitute(
    template: &str,
    values: &PlaceholderValues<'_>,
) -> Result<String, SubstitutionError> {
    let mut resolved = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('<') {
        resolved.push_str(&rest[..start]);
        let candidate = &rest[start..];

        let matched = candidate.find('>').and_then(|end| {
            let token = &candidate[..=end];
            Placeholder::from_token(token).map(|placeholder| (token, placeholder))
        });

        match matched {
            Some((token, placeholder)) => {
                let value = values
                    .get(placeholder)
                    .ok_or(SubstitutionError::MissingValue { placeholder })?;
                resolved.push_str(value);
                rest = &candidate[token.len()..];
            },
            None => {
                resolved.push('<');
                rest = &candidate[1..];
            },
        }
    }

    resolved.push_str(rest);
    Ok(resolved)
}
