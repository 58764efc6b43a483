//! Remote locale listings.
//!
//! Fetching locales from the translation service is the job of an API
//! client. The CLI only depends on the [`LocaleSource`] seam and ships a
//! JSON file implementation of it.

use fs_err as fs;
use locale_sync_core::RemoteLocale;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocaleSourceError {
    #[error("{0}")]
    Read(#[from] std::io::Error),
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("no locales listed for project '{0}'")]
    UnknownProject(String),
}

/// Supplies the ordered remote locale listing of a project.
pub trait LocaleSource {
    fn list_locales(&self, project_id: &str) -> Result<Vec<RemoteLocale>, LocaleSourceError>;
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Listing {
    /// One listing shared by every project.
    Flat(Vec<RemoteLocale>),
    /// Listings keyed by project id.
    ByProject(BTreeMap<String, Vec<RemoteLocale>>),
}

/// Reads locale listings from a JSON file.
#[derive(Debug)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> Result<Listing, LocaleSourceError> {
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl LocaleSource for JsonFileSource {
    fn list_locales(&self, project_id: &str) -> Result<Vec<RemoteLocale>, LocaleSourceError> {
        match self.read()? {
            Listing::Flat(locales) => Ok(locales),
            Listing::ByProject(mut projects) => projects
                .remove(project_id)
                .ok_or_else(|| LocaleSourceError::UnknownProject(project_id.to_string())),
        }
    }
}
