use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use shiftdesk_core::config::ClientConfig;
use std::path::PathBuf;
use std::process;
use tracing::{debug, error, info, Level};

mod cmd;
mod console;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "Shift management from the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with client settings. Flags given on the command line win.
    #[arg(global = true, long)]
    config: Option<PathBuf>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,

    #[command(flatten)]
    client: ClientConfig,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Staff member workflows
    Staff(cmd::staff::StaffArgs),
    /// Hospital administrator workflows
    Hospital(cmd::hospital::HospitalArgs),
    /// Check a password against the reset rules
    Password(cmd::password::PasswordArgs),
    /// Inspect the stored sessions
    Session(cmd::session::SessionArgs),
}

#[tokio::main]
async fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => {
            info!("📂 Loading config: {:?}", path);
            let mut file_config = ClientConfig::load_from_file(path).unwrap_or_else(|e| {
                error!("{}", e);
                process::exit(1);
            });
            file_config.merge_from_cli(&cli.client, &matches);
            file_config
        }
        None => cli.client.clone(),
    };
    debug!("⚙️  {:?}", config);

    let ok = match cli.command {
        Commands::Staff(args) => cmd::staff::run(args, &cmd::Context::new(config)).await,
        Commands::Hospital(args) => cmd::hospital::run(args, &cmd::Context::new(config)).await,
        Commands::Password(args) => cmd::password::run(args),
        Commands::Session(args) => cmd::session::run(args, &cmd::Context::new(config)),
    };

    if !ok {
        process::exit(1);
    }
}
