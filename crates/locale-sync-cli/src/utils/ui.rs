// CLI output formatting with consistent styling using colored.
// User-facing output goes through println!/eprintln!; diagnostics and
// library events go through tracing on stderr.

use crate::core::{ResolvePlan, ResolvedTarget};
use colored::Colorize as _;
use locale_sync_core::LocaleFile;
use locale_sync_toml::TargetKind;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV: &str = "LOCALE_SYNC_LOG";

static E2E_MODE: AtomicBool = AtomicBool::new(false);

/// Enable E2E mode for deterministic output (no colors, paths relative to the working directory).
pub fn set_e2e_mode(enabled: bool) {
    E2E_MODE.store(enabled, Ordering::SeqCst);
    if enabled {
        colored::control::set_override(false);
    }
}

pub fn is_e2e() -> bool {
    E2E_MODE.load(Ordering::SeqCst)
}

/// Installs the stderr tracing subscriber.
///
/// `LOCALE_SYNC_LOG` takes precedence over the `-v` count.
pub fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!is_e2e())
        .with_target(false)
        .without_time()
        .try_init()
        .ok();
}

/// Shows `path` relative to the working directory when it lies below it.
fn display_path(path: &Path) -> String {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf))
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}

fn entry_label(kind: TargetKind) -> &'static str {
    match kind {
        TargetKind::Pull => "target",
        TargetKind::Push => "source",
    }
}

pub fn print_config_loaded(path: &Path) {
    println!("{} {}", "Using config".dimmed(), display_path(path).cyan());
}

pub fn print_check_header(count: usize) {
    println!(
        "{} {}",
        "Checking".dimmed(),
        format!("{} pattern(s)", count).green()
    );
}

pub fn print_no_entries() {
    eprintln!(
        "{}",
        "No pull targets or push sources configured.".yellow()
    );
}

pub fn print_no_entries_of_kind(kind: TargetKind) {
    eprintln!(
        "{}",
        format!("No {} {}s configured.", kind, entry_label(kind)).yellow()
    );
}

pub fn print_pattern_ok(kind: TargetKind, index: usize, file: &str) {
    println!("{} {} #{} {}", "ok".green(), kind, index, file);
}

pub fn print_pattern_invalid(kind: TargetKind, index: usize, file: &str, reason: &str) {
    println!(
        "{} {} #{} {}: {}",
        "invalid".red(),
        kind,
        index,
        file.white().bold(),
        reason
    );
}

pub fn print_check_success() {
    println!("{}", "All patterns are valid!".green());
}

pub fn print_resolve_header(kind: TargetKind) {
    let title = match kind {
        TargetKind::Pull => "Pull targets",
        TargetKind::Push => "Push sources",
    };
    println!("{}", title.dimmed());
}

pub fn print_resolved_target(target: &ResolvedTarget) {
    println!(
        "{} {} ({})",
        format!("#{}", target.index).dimmed(),
        target.file.white().bold(),
        target.file_format.cyan()
    );

    if target.files.is_empty() {
        let reason = if target.locale_count == 0 {
            "no files (no remote locales listed)"
        } else {
            "no files (no tags configured)"
        };
        println!("  {}", reason.yellow());
    }

    for file in &target.files {
        print_locale_file(file);
    }
}

fn print_locale_file(file: &LocaleFile) {
    let tag = file
        .tag
        .as_deref()
        .map(|tag| format!(" [{}]", tag))
        .unwrap_or_default();
    println!(
        "  {}{} {} {}",
        file.code.green(),
        tag.cyan(),
        "->".dimmed(),
        display_path(&file.path)
    );
}

pub fn print_resolve_summary(plan: &ResolvePlan) {
    println!(
        "{} {} file(s) across {} {}(s)",
        "Done:".green(),
        plan.file_count(),
        plan.targets.len(),
        entry_label(plan.kind)
    );
}
