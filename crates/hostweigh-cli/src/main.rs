use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "hostweigh",
    about = "Rank candidate compute hosts by weighted score",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Weigh a host snapshot and print the ranking, best first.
    ///
    /// The snapshot is a JSON array of compute-node records. Records
    /// without a service are skipped.
    Rank {
        /// Path to the host snapshot (JSON)
        #[arg(long)]
        hosts: PathBuf,
        /// Path to weigh.toml (defaults apply when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// List available weighers
    Weighers,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn,hostweigh=info"));
    if cli.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Commands::Rank { hosts, config, format } => {
            commands::rank::rank(&hosts, config.as_deref(), &format)
        }
        Commands::Weighers => commands::weighers::list(),
    }
}
