//! Region detection and region-prefix decoration of locale codes.
//!
//! With a region prefix configured (Android resource qualifiers use `r`),
//! local file names carry a decorated code such as `de-rDE` while the remote
//! API keeps being queried with the undecorated code.

use crate::target::RemoteLocale;
use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

/// How a code without a region subtag is decorated when a prefix is set.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionMarker {
    /// Use the upper-cased language subtag as region (`de` becomes `de-rDE`).
    #[default]
    Language,
    /// Leave codes without a region undecorated.
    Keep,
}

/// Region decoration settings of a target.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct RegionParams {
    #[serde(rename = "region_prefix", skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(rename = "region_marker")]
    pub marker: RegionMarker,
}

/// The code used to query the remote API and the code used in file names.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EffectiveCode {
    pub remote: String,
    pub local: String,
}

impl RegionParams {
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            ..Self::default()
        }
    }

    fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref().filter(|prefix| !prefix.is_empty())
    }

    /// Computes the remote and local codes for `locale`.
    pub fn effective_code(&self, locale: &RemoteLocale) -> EffectiveCode {
        let local = match self.prefix() {
            None => locale.code.to_lowercase(),
            Some(prefix) => self.decorate(&locale.code, prefix, locale.default),
        };

        EffectiveCode {
            remote: locale.code.clone(),
            local,
        }
    }

    fn decorate(&self, code: &str, prefix: &str, is_default: bool) -> String {
        let parts = split_code(code);

        if parts.language.is_empty() {
            return code.to_lowercase();
        }

        let region = match parts.region {
            Some(region) => region,
            None if is_default => return code.to_lowercase(),
            None => match self.marker {
                RegionMarker::Language => parts.language.clone(),
                RegionMarker::Keep => return code.to_lowercase(),
            },
        };

        let mut decorated = format!("{}-{}{}", parts.base, prefix, region.to_ascii_uppercase());
        for subtag in &parts.tail {
            decorated.push('-');
            decorated.push_str(subtag);
        }
        decorated
    }
}

/// Returns true if `code` carries a region subtag (`de-DE`, `pt_br`, `es-419`).
pub fn has_locale_region(code: &str) -> bool {
    split_code(code).region.is_some()
}

#[derive(Default)]
struct CodeParts {
    /// Language, plus script when present (`zh-Hant`).
    base: String,
    language: String,
    region: Option<String>,
    /// Subtags following the region, such as variants (`posix`).
    tail: Vec<String>,
}

fn split_code(code: &str) -> CodeParts {
    let mut subtags = code.split(['-', '_']).peekable();
    if subtags.peek().is_none_or(|language| language.is_empty()) {
        return CodeParts::default();
    }

    match code.parse::<LanguageIdentifier>() {
        Ok(langid) => {
            let language = langid.language.to_string();
            let base = match langid.script {
                Some(script) => format!("{}-{}", language, script),
                None => language.clone(),
            };
            CodeParts {
                base,
                language,
                region: langid.region.map(|region| region.to_string()),
                tail: langid.variants().map(|variant| variant.to_string()).collect(),
            }
        },
        Err(_) => {
            let language = subtags.next().unwrap_or_default().to_lowercase();
            let region = subtags
                .next_if(|subtag| is_region_subtag(subtag))
                .map(str::to_string);
            CodeParts {
                base: language.clone(),
                language,
                region,
                tail: subtags.map(str::to_string).collect(),
            }
        },
    }
}

fn is_region_subtag(subtag: &str) -> bool {
    match subtag.len() {
        2 => subtag.bytes().all(|b| b.is_ascii_alphabetic()),
        3 => subtag.bytes().all(|b| b.is_ascii_digit()),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("de", false)]
    #[case("de-DE", true)]
    #[case("de-de", true)]
    #[case("pt_BR", true)]
    #[case("es-419", true)]
    #[case("zh-Hant", false)]
    #[case("zh-Hant-TW", true)]
    #[case("de-rDE", false)]
    #[case("", false)]
    #[case("_DE", false)]
    #[case("en-US-POSIX", true)]
    fn test_has_locale_region(#[case] code: &str, #[case] expected: bool) {
        assert_eq!(has_locale_region(code), expected);
    }

    fn effective(code: &str, default: bool, region: &RegionParams) -> EffectiveCode {
        let mut locale = RemoteLocale::new("id", "name", code);
        locale.default = default;
        region.effective_code(&locale)
    }

    #[rstest]
    #[case("en", "en")]
    #[case("de-DE", "de-de")]
    #[case("PT_br", "pt_br")]
    fn test_without_prefix_lowercases(#[case] code: &str, #[case] local: &str) {
        let code = effective(code, false, &RegionParams::default());
        assert_eq!(code.local, local);
    }

    #[rstest]
    #[case::explicit_region("de-DE", false, "de-rDE")]
    #[case::lowercase_region("de-de", false, "de-rDE")]
    #[case::underscore("pt_BR", false, "pt-rBR")]
    #[case::script("zh-Hant-TW", false, "zh-Hant-rTW")]
    #[case::language_marker("de", false, "de-rDE")]
    #[case::default_locale("en", true, "en")]
    #[case::default_with_region("en-GB", true, "en-rGB")]
    #[case::variant("en-US-POSIX", false, "en-rUS-posix")]
    #[case::numeric_variant("de-DE-1996", false, "de-rDE-1996")]
    #[case::variant_without_region("de-1996", false, "de-rDE-1996")]
    #[case::unparsed_tail("klingonese-XX-qo", false, "klingonese-rXX-qo")]
    #[case::empty("", false, "")]
    #[case::no_language("_DE", false, "_de")]
    fn test_with_prefix(#[case] code: &str, #[case] default: bool, #[case] local: &str) {
        let effective = effective(code, default, &RegionParams::with_prefix("r"));
        assert_eq!(effective.local, local);
        assert_eq!(effective.remote, code);
    }

    #[test]
    fn test_keep_marker_leaves_plain_codes() {
        let region = RegionParams {
            prefix: Some("r".to_string()),
            marker: RegionMarker::Keep,
        };
        assert_eq!(effective("de", false, &region).local, "de");
        assert_eq!(effective("de-AT", false, &region).local, "de-rAT");
    }

    #[test]
    fn test_empty_prefix_is_ignored() {
        let effective = effective("de-DE", false, &RegionParams::with_prefix(""));
        assert_eq!(effective.local, "de-de");
    }

    #[test]
    fn test_deserialize_from_params_keys() {
        let region: RegionParams =
            serde_json::from_str(r#"{"region_prefix": "r", "region_marker": "keep"}"#).unwrap();
        assert_eq!(region.prefix.as_deref(), Some("r"));
        assert_eq!(region.marker, RegionMarker::Keep);
    }
}
