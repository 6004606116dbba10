use anyhow::Result;
use clap::{Parser, Subcommand};
use stockalert::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Log to stderr; repeat for more detail (-vvv includes HTTP and SMTP)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for stockalert::AppCommand {
    fn from(cmd: Commands) -> stockalert::AppCommand {
        match cmd {
            Commands::Check { dry_run } => stockalert::AppCommand::Check { dry_run },
            Commands::Quote => stockalert::AppCommand::Quote,
            Commands::News => stockalert::AppCommand::News,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Check the price change and send an alert if needed (default)
    Check {
        /// Print the alert instead of mailing it
        #[arg(long)]
        dry_run: bool,
    },
    /// Display the current quote and daily change
    Quote,
    /// Display the latest news digest
    News,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Check { dry_run: false });
    let result = match command {
        Commands::Setup => stockalert::cli::setup::setup(),
        cmd => stockalert::run_command(cmd.into(), cli.config_path.as_deref()).await,
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
