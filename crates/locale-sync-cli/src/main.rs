use clap::{Parser, Subcommand};
use locale_sync_cli::commands::{CheckArgs, GlobalArgs, ResolveArgs, run_check, run_resolve};
use locale_sync_cli::utils::ui;
use locale_sync_toml::TargetKind;
use miette::Result as MietteResult;

#[derive(Parser)]
#[command(name = "locale-sync")]
#[command(about = "Synchronize locale files with a translation management service")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the file patterns of all pull targets and push sources
    Check(CheckArgs),

    /// Resolve where each remote locale is downloaded to
    Pull(ResolveArgs),

    /// Resolve which local file each remote locale is uploaded from
    Push(ResolveArgs),
}

fn main() -> MietteResult<()> {
    let cli = Cli::parse();

    ui::set_e2e_mode(cli.global.e2e);
    ui::init_logging(cli.global.verbose);

    let interactive = !ui::is_e2e();
    miette::set_hook(Box::new(move |_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(interactive)
                .unicode(interactive)
                .context_lines(2)
                .tab_width(4)
                .color(interactive)
                .wrap_lines(interactive)
                .build(),
        )
    }))
    .ok();

    let result = match cli.command {
        Commands::Check(args) => run_check(&cli.global, args),
        Commands::Pull(args) => run_resolve(&cli.global, TargetKind::Pull, args),
        Commands::Push(args) => run_resolve(&cli.global, TargetKind::Push, args),
    };

    result.map_err(miette::Report::new)
}
