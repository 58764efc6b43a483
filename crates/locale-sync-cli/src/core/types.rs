use locale_sync_core::LocaleFile;
use locale_sync_toml::{Config, TargetKind};
use serde::Serialize;
use std::path::PathBuf;

/// A configuration file together with where it was loaded from.
#[derive(Clone, Debug)]
pub struct LoadedConfig {
    pub path: PathBuf,
    pub config: Config,
}

/// The resolved files of one configured entry.
#[derive(Clone, Debug, Serialize)]
pub struct ResolvedTarget {
    /// 1-based position of the entry in the configuration.
    pub index: usize,
    pub file: String,
    pub file_format: String,
    pub project_id: String,
    /// Number of remote locales the entry was expanded against.
    pub locale_count: usize,
    pub files: Vec<LocaleFile>,
}

/// Everything a pull or push would touch.
#[derive(Clone, Debug, Serialize)]
pub struct ResolvePlan {
    #[serde(serialize_with = "serialize_kind")]
    pub kind: TargetKind,
    pub targets: Vec<ResolvedTarget>,
}

impl ResolvePlan {
    pub fn file_count(&self) -> usize {
        self.targets.iter().map(|target| target.files.len()).sum()
    }
}

fn serialize_kind<S: serde::Serializer>(kind: &TargetKind, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(kind)
}
