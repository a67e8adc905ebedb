mod batch;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use cratedig_matcher::CancelFlag;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "cratedig")]
#[command(about = "Match a record inventory sheet against Discogs and build a Shopify product CSV")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Match every row of an inventory CSV and write product and reject CSVs
    Run {
        /// Inventory sheet (.csv)
        input: PathBuf,

        /// Product CSV to write; rejects go to `<stem>_unmatched.csv` beside it
        output: PathBuf,

        /// Stop after this many matched rows
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show which sheet header each logical field resolves to
    Columns {
        /// Inventory sheet (.csv)
        input: PathBuf,

        /// YAML column alias overrides
        #[arg(long, env = "CRATEDIG_COLUMNS_PATH")]
        columns: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Run {
            input,
            output,
            limit,
        }) => {
            let config = cratedig_core::load_app_config_from_env()?;
            init_tracing(&config.log_level)?;

            let cancel = CancelFlag::new();
            let on_interrupt = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::warn!("interrupt received; stopping before the next catalog call");
                    on_interrupt.cancel();
                }
            });

            batch::run_match(&config, &input, &output, limit, &cancel).await?;
        }
        Some(Commands::Columns { input, columns }) => {
            init_tracing("info")?;
            batch::run_columns(&input, columns.as_deref())?;
        }
        None => println!("nothing to do; see `cratedig --help`"),
    }

    Ok(())
}

fn init_tracing(fallback: &str) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(fallback))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}
