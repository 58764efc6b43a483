//! Check command validating every configured file pattern.

use crate::commands::GlobalArgs;
use crate::core::{CheckReport, CliError, InvalidPatternIssue};
use crate::utils::ui;
use clap::Parser;
use locale_sync_core::pattern;
use locale_sync_toml::{Config, TargetKind};

/// Arguments for the check command.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// Only check pull targets or push sources.
    #[arg(long, value_parser = ["pull", "push"])]
    pub only: Option<String>,
}

fn kinds(only: Option<&str>) -> Vec<TargetKind> {
    match only {
        Some("pull") => vec![TargetKind::Pull],
        Some("push") => vec![TargetKind::Push],
        _ => vec![TargetKind::Pull, TargetKind::Push],
    }
}

/// Validates the patterns of `config`, collecting one issue per invalid entry.
///
/// Pull targets are download destinations and must not contain wildcards.
pub fn check_config(config: &Config, kinds: &[TargetKind]) -> Vec<InvalidPatternIssue> {
    let mut issues = Vec::new();

    for &kind in kinds {
        for (position, entry) in config.entries(kind).iter().enumerate() {
            let index = position + 1;
            let result = match kind {
                TargetKind::Pull => pattern::validate_download(&entry.file),
                TargetKind::Push => pattern::validate(&entry.file),
            };
            match result {
                Ok(()) => ui::print_pattern_ok(kind, index, &entry.file),
                Err(source) => {
                    ui::print_pattern_invalid(kind, index, &entry.file, &source.to_string());
                    issues.push(InvalidPatternIssue {
                        kind,
                        index,
                        source,
                    });
                },
            }
        }
    }

    issues
}

/// Run the check command.
pub fn run_check(global: &GlobalArgs, args: CheckArgs) -> Result<(), CliError> {
    let loaded = global.load_config()?;
    ui::print_config_loaded(&loaded.path);

    let kinds = kinds(args.only.as_deref());
    let count: usize = kinds
        .iter()
        .map(|&kind| loaded.config.entries(kind).len())
        .sum();

    if count == 0 {
        ui::print_no_entries();
        return Ok(());
    }

    ui::print_check_header(count);
    let issues = check_config(&loaded.config, &kinds);

    if issues.is_empty() {
        ui::print_check_success();
        Ok(())
    } else {
        Err(CheckReport {
            error_count: issues.len(),
            issues,
        }
        .into())
    }
}
