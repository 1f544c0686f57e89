use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use folio_cli::commands::{self, ReplayOptions};
use folio_cli::Step;
use folio_config::DEFAULT_START_PATH;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay navigation steps against an in-memory browser host
    Replay {
        #[arg(long, default_value = DEFAULT_START_PATH, help = "Address the page is loaded at")]
        path: String,
        #[arg(long, help = "Brochure catalog JSON file (built-in demo data otherwise)")]
        catalog: Option<Utf8PathBuf>,
        #[arg(long, help = "Sub-route key already stored in the session")]
        session_tab: Option<String>,
        #[arg(long)]
        json: bool,
        /// tab:<brochures|audit>, select:<id|undefined>, menu:<key>, sub:<link>,
        /// back, forward, mount, unmount
        steps: Vec<Step>,
    },
    /// Show how a path is classified
    Resolve {
        path: String,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Replay {
            path,
            catalog,
            session_tab,
            json,
            steps,
        } => {
            let opts = ReplayOptions {
                path,
                catalog,
                session_tab,
                steps,
            };
            commands::cmd_replay(&opts, json)?;
        }
        Commands::Resolve { path, json } => commands::cmd_resolve(&path, json)?,
    }

    Ok(())
}
