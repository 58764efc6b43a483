use crate::error::{PatternError, SubstitutionError, TargetError};
use crate::pattern;
use crate::placeholder::{Placeholder, PlaceholderValues, substitute};
use crate::region::{RegionParams, has_locale_region};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use strum::IntoEnumIterator as _;

/// A locale as listed by the remote API.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct RemoteLocale {
    pub id: String,
    pub name: String,
    pub code: String,
    /// Marks the project's base language.
    #[serde(default)]
    pub default: bool,
}

impl RemoteLocale {
    pub fn new(id: impl Into<String>, name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            code: code.into(),
            default: false,
        }
    }

    /// Marks this locale as the project's base language.
    pub fn as_default(mut self) -> Self {
        self.default = true;
        self
    }
}

/// Per-target parameters.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Params {
    /// Restricts the target to a single remote locale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale_id: Option<String>,
    /// Values for the `<tag>` placeholder. One file is produced per tag.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Overrides the file format of the configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_format: Option<String>,
    #[serde(flatten)]
    pub region: RegionParams,
}

/// One resolved file for a remote locale (and tag).
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct LocaleFile {
    pub name: String,
    /// The effective code used in the file name.
    pub code: String,
    /// The undecorated code used to query the remote API.
    pub remote_code: String,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    pub path: PathBuf,
}

/// The context of a single pull or push target.
#[derive(Clone, Default)]
pub struct Target {
    /// The file pattern.
    pub file: String,
    pub file_format: String,
    pub project_id: String,
    pub access_token: String,
    pub params: Params,
    pub remote_locales: Vec<RemoteLocale>,
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Target")
            .field("file", &self.file)
            .field("file_format", &self.file_format)
            .field("project_id", &self.project_id)
            .field("access_token", &"[REDACTED]")
            .field("params", &self.params)
            .field("remote_locales", &self.remote_locales)
            .finish()
    }
}

impl Target {
    /// The per-target file format, falling back to the configured one.
    pub fn file_format(&self) -> &str {
        self.params
            .file_format
            .as_deref()
            .unwrap_or(&self.file_format)
    }

    /// Validates the file pattern.
    pub fn check_preconditions(&self) -> Result<(), PatternError> {
        pattern::validate(&self.file)
    }

    pub fn has_locale_region(&self, code: &str) -> bool {
        has_locale_region(code)
    }

    /// Expands the pattern relative to the process working directory.
    pub fn locale_files(&self) -> Result<Vec<LocaleFile>, TargetError> {
        let base = std::env::current_dir().map_err(TargetError::WorkingDirectory)?;
        self.locale_files_in(&base)
    }

    /// Expands the pattern into one file per remote locale and tag, with
    /// relative paths resolved against `base`.
    ///
    /// Either every locale resolves or an error is returned; partial results
    /// are never handed out.
    pub fn locale_files_in(&self, base: &Path) -> Result<Vec<LocaleFile>, TargetError> {
        self.check_preconditions()?;

        let locales = self.selected_locales()?;

        let tags: Vec<Option<&str>> = if Placeholder::Tag.is_in(&self.file) {
            if self.params.tags.is_empty() {
                tracing::debug!(file = %self.file, "pattern uses <tag> but no tags are configured, skipping");
                return Ok(Vec::new());
            }
            self.params.tags.iter().map(|tag| Some(tag.as_str())).collect()
        } else {
            vec![None]
        };

        let mut files: Vec<LocaleFile> = Vec::new();
        let mut seen: HashMap<PathBuf, usize> = HashMap::new();

        for locale in locales {
            let code = self.params.region.effective_code(locale);

            for tag in &tags {
                let mut locale_file = LocaleFile {
                    name: locale.name.clone(),
                    code: code.local.clone(),
                    remote_code: code.remote.clone(),
                    id: locale.id.clone(),
                    tag: tag.map(str::to_string),
                    path: PathBuf::new(),
                };
                locale_file.path = self.replace_placeholders_in(&locale_file, base)?;

                if let Some(&index) = seen.get(&locale_file.path) {
                    let existing = &files[index];
                    if existing.id == locale_file.id && existing.tag == locale_file.tag {
                        continue;
                    }
                    tracing::warn!(
                        path = %locale_file.path.display(),
                        first = %existing.remote_code,
                        second = %locale_file.remote_code,
                        "locales collide on the same file"
                    );
                    return Err(TargetError::AmbiguousLocaleCode {
                        path: locale_file.path,
                        first: existing.remote_code.clone(),
                        second: locale_file.remote_code,
                    });
                }

                tracing::debug!(
                    locale = %locale_file.remote_code,
                    code = %locale_file.code,
                    path = %locale_file.path.display(),
                    "resolved locale file"
                );
                seen.insert(locale_file.path.clone(), files.len());
                files.push(locale_file);
            }
        }

        Ok(files)
    }

    /// Substitutes the placeholders of the pattern for a single locale file
    /// and resolves the result against the process working directory.
    pub fn replace_placeholders(&self, locale_file: &LocaleFile) -> Result<PathBuf, TargetError> {
        let base = std::env::current_dir().map_err(TargetError::WorkingDirectory)?;
        self.replace_placeholders_in(locale_file, &base)
    }

    pub fn replace_placeholders_in(
        &self,
        locale_file: &LocaleFile,
        base: &Path,
    ) -> Result<PathBuf, TargetError> {
        let values = PlaceholderValues {
            locale_code: Some(locale_file.code.as_str()),
            locale_name: Some(locale_file.name.as_str()),
            tag: locale_file.tag.as_deref(),
        };

        // Both separator styles are accepted in patterns.
        let template = self.file.replace('\\', "/");

        for placeholder in Placeholder::iter() {
            if let Some(value) = values.get(placeholder)
                && placeholder.is_in(&template)
                && !is_path_segment(value)
            {
                return Err(TargetError::UnsafeValue {
                    placeholder,
                    value: value.to_string(),
                    locale: locale_file.code.clone(),
                });
            }
        }

        let resolved = substitute(&template, &values).map_err(|err| match err {
            SubstitutionError::MissingValue { placeholder } => TargetError::MissingValue {
                placeholder,
                locale: locale_file.code.clone(),
            },
        })?;

        Ok(absolutize(base, Path::new(&resolved)))
    }

    fn selected_locales(&self) -> Result<Vec<&RemoteLocale>, TargetError> {
        match self.params.locale_id.as_deref() {
            None => Ok(self.remote_locales.iter().collect()),
            Some(id) => self
                .remote_locales
                .iter()
                .find(|locale| locale.id == id)
                .map(|locale| vec![locale])
                .ok_or_else(|| TargetError::UnknownLocale { id: id.to_string() }),
        }
    }
}

/// A substituted value must stay within the segment it replaces.
fn is_path_segment(value: &str) -> bool {
    !value.contains(['/', '\\']) && value != "." && value != ".."
}

/// Joins `path` onto `base` and folds `.` and `..` components lexically.
fn absolutize(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {},
            Component::ParentDir => {
                normalized.pop();
            },
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::RegionMarker;
    use rstest::rstest;

    fn base_locales() -> Vec<RemoteLocale> {
        vec![
            RemoteLocale::new("en-locale-id", "english", "en").as_default(),
            RemoteLocale::new("de-locale-id", "german", "de"),
        ]
    }

    fn base_target() -> Target {
        Target {
            file: "./tests/<locale_code>.yml".to_string(),
            file_format: "yml".to_string(),
            project_id: "project-id".to_string(),
            access_token: "access-token".to_string(),
            params: Params::default(),
            remote_locales: base_locales(),
        }
    }

    fn target_with_region_prefix(prefix: &str) -> Target {
        let mut target = base_target();
        target.params.region = RegionParams::with_prefix(prefix);
        target
    }

    fn cwd() -> PathBuf {
        std::env::current_dir().unwrap()
    }

    #[test]
    fn test_target_fields() {
        let target = base_target();
        assert_eq!(target.file, "./tests/<locale_code>.yml");
        assert_eq!(target.access_token, "access-token");
        assert_eq!(target.project_id, "project-id");
        assert_eq!(target.file_format(), "yml");
    }

    #[test]
    fn test_file_format_override() {
        let mut target = base_target();
        target.params.file_format = Some("json".to_string());
        assert_eq!(target.file_format(), "json");
    }

    #[test]
    fn test_debug_redacts_access_token() {
        let debug = format!("{:?}", base_target());
        assert!(!debug.contains("access-token"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_check_preconditions() {
        let mut target = base_target();
        for file in [
            "",
            "no_extension",
            "./<locale_code>/<locale_code>.yml",
            "./**/**/en.yml",
            "./**/*/*/en.yml",
            "./**/*/en.yml",
            "./**/*/<locale_name>/<locale_code>/<tag>.yml",
        ] {
            target.file = file.to_string();
            assert!(
                target.check_preconditions().is_err(),
                "pattern should be rejected: '{}'",
                file
            );
        }

        for file in [
            "./<tag>/<locale_code>.yml",
            "./en.yml",
            "./<locale_name>/<locale_code>/<tag>.yml",
        ] {
            target.file = file.to_string();
            assert_eq!(target.check_preconditions(), Ok(()));
        }
    }

    #[test]
    fn test_locale_files() {
        let files = base_target().locale_files().unwrap();

        assert_eq!(
            files,
            vec![
                LocaleFile {
                    name: "english".to_string(),
                    code: "en".to_string(),
                    remote_code: "en".to_string(),
                    id: "en-locale-id".to_string(),
                    tag: None,
                    path: cwd().join("tests").join("en.yml"),
                },
                LocaleFile {
                    name: "german".to_string(),
                    code: "de".to_string(),
                    remote_code: "de".to_string(),
                    id: "de-locale-id".to_string(),
                    tag: None,
                    path: cwd().join("tests").join("de.yml"),
                },
            ]
        );
    }

    #[test]
    fn test_locale_files_with_region_prefix() {
        let files = target_with_region_prefix("r").locale_files().unwrap();

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].code, "en");
        assert_eq!(files[0].path, cwd().join("tests").join("en.yml"));
        assert_eq!(files[1].code, "de-rDE");
        assert_eq!(files[1].remote_code, "de");
        assert_eq!(files[1].path, cwd().join("tests").join("de-rDE.yml"));
    }

    #[test]
    fn test_locale_files_is_idempotent() {
        let target = target_with_region_prefix("r");
        assert_eq!(target.locale_files().unwrap(), target.locale_files().unwrap());
    }

    #[test]
    fn test_locale_files_in_base() {
        let base = cwd().join("project");
        let mut target = base_target();
        target.file = "../locales/<locale_name>/<locale_code>.json".to_string();

        let files = target.locale_files_in(&base).unwrap();
        let paths: Vec<_> = files.into_iter().map(|file| file.path).collect();

        assert_eq!(
            paths,
            vec![
                cwd().join("locales").join("english").join("en.json"),
                cwd().join("locales").join("german").join("de.json"),
            ]
        );
    }

    #[test]
    fn test_locale_files_one_per_tag() {
        let mut target = base_target();
        target.file = "./<tag>/<locale_code>.yml".to_string();
        target.params.tags = vec!["web".to_string(), "mobile".to_string()];

        let files = target.locale_files_in(&cwd()).unwrap();
        let resolved: Vec<_> = files
            .iter()
            .map(|file| (file.code.as_str(), file.tag.as_deref().unwrap()))
            .collect();

        assert_eq!(
            resolved,
            vec![("en", "web"), ("en", "mobile"), ("de", "web"), ("de", "mobile")]
        );
        assert_eq!(files[1].path, cwd().join("mobile").join("en.yml"));
    }

    #[test]
    fn test_tag_pattern_without_tags_is_skipped() {
        let mut target = base_target();
        target.file = "./<tag>/<locale_code>.yml".to_string();

        assert!(target.locale_files_in(&cwd()).unwrap().is_empty());
    }

    #[test]
    fn test_tags_ignored_without_tag_placeholder() {
        let mut target = base_target();
        target.params.tags = vec!["web".to_string()];

        let files = target.locale_files_in(&cwd()).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|file| file.tag.is_none()));
    }

    #[test]
    fn test_locale_id_restricts_target() {
        let mut target = base_target();
        target.file = "./config/locale.yml".to_string();
        target.params.locale_id = Some("de-locale-id".to_string());

        let files = target.locale_files_in(&cwd()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].id, "de-locale-id");
        assert_eq!(files[0].path, cwd().join("config").join("locale.yml"));
    }

    #[test]
    fn test_unknown_locale_id() {
        let mut target = base_target();
        target.params.locale_id = Some("fr-locale-id".to_string());

        let err = target.locale_files_in(&cwd()).unwrap_err();
        assert!(matches!(err, TargetError::UnknownLocale { id } if id == "fr-locale-id"));
    }

    #[test]
    fn test_fixed_file_with_many_locales_is_ambiguous() {
        let mut target = base_target();
        target.file = "./en.yml".to_string();

        let err = target.locale_files_in(&cwd()).unwrap_err();
        assert!(matches!(
            err,
            TargetError::AmbiguousLocaleCode { ref first, ref second, .. }
                if first == "en" && second == "de"
        ));
    }

    #[test]
    fn test_collision_after_region_resolution() {
        let mut target = base_target();
        target.params.region = RegionParams {
            prefix: Some("r".to_string()),
            marker: RegionMarker::Language,
        };
        target.remote_locales = vec![
            RemoteLocale::new("de-id", "german", "de"),
            RemoteLocale::new("de-de-id", "german (germany)", "de-DE"),
        ];

        let err = target.locale_files_in(&cwd()).unwrap_err();
        assert!(matches!(err, TargetError::AmbiguousLocaleCode { .. }));
    }

    #[test]
    fn test_variants_keep_region_codes_apart() {
        let mut target = target_with_region_prefix("r");
        target.file = "./values-<locale_code>/strings.xml".to_string();
        target.remote_locales = vec![
            RemoteLocale::new("en-us-id", "english", "en-US"),
            RemoteLocale::new("en-posix-id", "posix", "en-US-POSIX"),
        ];

        let files = target.locale_files_in(&cwd()).unwrap();
        let codes: Vec<_> = files.iter().map(|file| file.code.as_str()).collect();
        assert_eq!(codes, vec!["en-rUS", "en-rUS-posix"]);
    }

    #[test]
    fn test_duplicate_remote_locale_is_deduplicated() {
        let mut target = base_target();
        target
            .remote_locales
            .push(RemoteLocale::new("de-locale-id", "german", "de"));

        let files = target.locale_files_in(&cwd()).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_invalid_pattern_is_propagated() {
        let mut target = base_target();
        target.file = "no_extension".to_string();

        let err = target.locale_files_in(&cwd()).unwrap_err();
        assert!(matches!(
            err,
            TargetError::InvalidPattern(PatternError::MissingExtension { .. })
        ));
    }

    #[test]
    fn test_locale_files_all_or_nothing() {
        let mut target = base_target();
        target.file = "./<locale_name>/<locale_code>.yml".to_string();
        target
            .remote_locales
            .push(RemoteLocale::new("xx-locale-id", "", "xx"));

        let result = target.locale_files_in(&cwd());
        assert!(matches!(
            result,
            Err(TargetError::MissingValue {
                placeholder: Placeholder::LocaleName,
                ..
            })
        ));
    }

    #[test]
    fn test_replace_placeholders() {
        let mut target = base_target();
        target.file = "./<locale_code>/<tag>/<locale_name>.yml".to_string();
        let locale_file = LocaleFile {
            name: "english".to_string(),
            code: "en".to_string(),
            id: "en-locale-id".to_string(),
            tag: Some("abc".to_string()),
            ..LocaleFile::default()
        };

        let path = target.replace_placeholders(&locale_file).unwrap();
        assert!(path.ends_with("en/abc/english.yml"));
        assert!(path.is_absolute());
    }

    #[test]
    fn test_replace_placeholders_missing_tag() {
        let mut target = base_target();
        target.file = "./<tag>/<locale_code>.yml".to_string();
        let locale_file = LocaleFile {
            code: "en".to_string(),
            ..LocaleFile::default()
        };

        let err = target.replace_placeholders(&locale_file).unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"no value for placeholder <tag> in locale 'en'");
    }

    #[test]
    fn test_has_locale_region() {
        let target = base_target();
        assert!(!target.has_locale_region("de"));
        assert!(target.has_locale_region("de-DE"));
    }

    #[test]
    fn test_remote_locale_from_json() {
        let locales: Vec<RemoteLocale> = serde_json::from_str(
            r#"[{"id": "1", "name": "english", "code": "en", "default": true},
                {"id": "2", "name": "german", "code": "de"}]"#,
        )
        .unwrap();

        assert_eq!(locales, base_locales_with_ids("1", "2"));
    }

    fn base_locales_with_ids(en: &str, de: &str) -> Vec<RemoteLocale> {
        vec![
            RemoteLocale::new(en, "english", "en").as_default(),
            RemoteLocale::new(de, "german", "de"),
        ]
    }

    #[test]
    fn test_absolutize_folds_components() {
        let base = cwd();
        assert_eq!(
            absolutize(&base, Path::new("./a/./b/../c.yml")),
            base.join("a").join("c.yml")
        );
    }

    #[test]
    fn test_backslash_pattern_is_expanded_like_slashes() {
        let base = cwd().join("project");
        let mut target = base_target();
        target.file = "..\\shared\\<locale_code>.properties".to_string();
        assert_eq!(target.check_preconditions(), Ok(()));

        let files = target.locale_files_in(&base).unwrap();
        assert_eq!(files[0].path, cwd().join("shared").join("en.properties"));
        assert_eq!(files[1].path, cwd().join("shared").join("de.properties"));
    }

    #[test]
    fn test_locale_name_cannot_escape_the_directory() {
        let mut target = base_target();
        target.file = "./locales/<locale_name>.yml".to_string();
        target.remote_locales = vec![RemoteLocale::new("x-id", "../../../etc/passwd", "en")];

        let err = target.locale_files_in(&cwd().join("project")).unwrap_err();
        insta::assert_snapshot!(
            err.to_string(),
            @"value '../../../etc/passwd' of placeholder <locale_name> in locale 'en' is not a single path segment"
        );
    }

    #[test]
    fn test_unsafe_tag_is_rejected() {
        let mut target = base_target();
        target.file = "./<tag>/<locale_code>.yml".to_string();
        target.params.tags = vec!["web\\..".to_string()];

        let err = target.locale_files_in(&cwd()).unwrap_err();
        assert!(matches!(
            err,
            TargetError::UnsafeValue { placeholder: Placeholder::Tag, ref value, .. } if value == "web\\.."
        ));
    }

    #[test]
    fn test_unused_placeholder_values_are_not_checked() {
        let mut target = base_target();
        target.remote_locales = vec![RemoteLocale::new("en-id", "english/us", "en")];

        let files = target.locale_files_in(&cwd()).unwrap();
        assert_eq!(files[0].path, cwd().join("tests").join("en.yml"));
    }

    #[rstest]
    #[case("..", false)]
    #[case(".", false)]
    #[case("a/b", false)]
    #[case("a\\b", false)]
    #[case("..english", true)]
    #[case("pt-BR", true)]
    fn test_is_path_segment(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_path_segment(value), expected);
    }
}
