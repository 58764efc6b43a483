//! Pull and push commands resolving configured patterns into locale files.
//!
//! Transferring the files is left to the API client. These commands stop at
//! the plan: which file every remote locale maps to.

use crate::commands::GlobalArgs;
use crate::core::{CliError, LocalesError, ResolveError, ResolvePlan, ResolvedTarget};
use crate::utils::{JsonFileSource, LocaleSource, LocaleSourceError, ui};
use clap::Parser;
use locale_sync_core::{LocaleFile, RemoteLocale, Target, TargetError, pattern};
use locale_sync_toml::{Config, TargetKind};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Arguments for the pull and push commands.
#[derive(Debug, Parser)]
pub struct ResolveArgs {
    /// JSON file with the remote locale listing.
    #[arg(short, long)]
    pub locales: PathBuf,

    /// Print the resolved files as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Expands every entry of `kind` against the listings of `source`.
///
/// Listings are fetched once per project. The first failing entry aborts the
/// whole plan. Pull targets are written to, so they may not use wildcards.
pub fn resolve_plan(
    config: &Config,
    kind: TargetKind,
    source: &dyn LocaleSource,
    base: &Path,
) -> Result<ResolvePlan, ResolveFailure> {
    let mut listings: HashMap<String, Vec<RemoteLocale>> = HashMap::new();
    let mut targets = Vec::new();

    for (position, mut target) in config.targets(kind, &[]).into_iter().enumerate() {
        let index = position + 1;

        if !listings.contains_key(&target.project_id) {
            let locales = source.list_locales(&target.project_id).map_err(|source| {
                ResolveFailure::Locales {
                    project_id: target.project_id.clone(),
                    source,
                }
            })?;
            tracing::info!(
                project = %target.project_id,
                count = locales.len(),
                "loaded remote locales"
            );
            listings.insert(target.project_id.clone(), locales);
        }
        target.remote_locales = listings[&target.project_id].clone();

        let files = expand(&target, kind, base).map_err(|source| ResolveError {
            kind,
            index,
            source,
        })?;

        targets.push(ResolvedTarget {
            index,
            file_format: target.file_format().to_string(),
            file: target.file,
            locale_count: target.remote_locales.len(),
            project_id: target.project_id,
            files,
        });
    }

    Ok(ResolvePlan { kind, targets })
}

fn expand(target: &Target, kind: TargetKind, base: &Path) -> Result<Vec<LocaleFile>, TargetError> {
    if kind == TargetKind::Pull {
        pattern::validate_download(&target.file)?;
    }
    target.locale_files_in(base)
}

/// Why a plan could not be built.
#[derive(Debug, Error)]
pub enum ResolveFailure {
    #[error("failed to list the locales of project '{project_id}'")]
    Locales {
        project_id: String,
        #[source]
        source: LocaleSourceError,
    },

    #[error(transparent)]
    Target(#[from] ResolveError),
}

/// Run the pull or push command.
pub fn run_resolve(global: &GlobalArgs, kind: TargetKind, args: ResolveArgs) -> Result<(), CliError> {
    let loaded = global.load_config()?;

    if loaded.config.entries(kind).is_empty() {
        ui::print_no_entries_of_kind(kind);
        return Ok(());
    }

    let source = JsonFileSource::new(&args.locales);
    let base = std::env::current_dir()?;

    let plan = resolve_plan(&loaded.config, kind, &source, &base).map_err(|failure| match failure {
        ResolveFailure::Locales { project_id, source } => CliError::from(LocalesError {
            path: args.locales.clone(),
            project_id,
            source,
        }),
        ResolveFailure::Target(err) => CliError::from(err),
    })?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    ui::print_config_loaded(&loaded.path);
    ui::print_resolve_header(kind);
    for target in &plan.targets {
        ui::print_resolved_target(target);
    }
    ui::print_resolve_summary(&plan);

    Ok(())
}
