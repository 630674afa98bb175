//! Stockroom CLI - Product catalog over an embedded SQLite store

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use stockroom::commands::{self, OutputMode};
use stockroom::config::{self, StockroomConfig};
use stockroom::shell::{input, EditorReader, Shell};
use stockroom::storage::RecordStore;
use stockroom::RecordPatch;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "stockroom")]
#[command(version)]
#[command(about = "Product catalog - create, read, update and delete products in a local SQLite file")]
#[command(long_about = r#"
Stockroom keeps a catalog of products (name, price, quantity) in a SQLite file.

Without a subcommand it starts the interactive menu.

Example usage:
  stockroom
  stockroom add --name Widget --price 9.99 --qty 10
  stockroom update 1 --qty 5
  stockroom delete 1 --confirm DELETE
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Path to the database file
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive menu (default)
    Shell,

    /// Add a product
    Add {
        #[arg(short, long, value_parser = name_arg)]
        name: String,

        #[arg(short, long, value_parser = price_arg)]
        price: f64,

        #[arg(short, long, value_parser = qty_arg)]
        qty: i64,
    },

    /// Show one product
    Get {
        /// Product id
        id: i64,
    },

    /// List all products by id
    List,

    /// Change some fields of a product; omitted fields are kept
    Update {
        /// Product id
        id: i64,

        #[arg(short, long, value_parser = name_arg)]
        name: Option<String>,

        #[arg(short, long, value_parser = price_arg)]
        price: Option<f64>,

        #[arg(short, long, value_parser = qty_arg)]
        qty: Option<i64>,
    },

    /// Delete a product
    Delete {
        /// Product id
        id: i64,

        /// Must be exactly DELETE
        #[arg(long)]
        confirm: String,
    },

    /// Write a config file and create the records table
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

fn name_arg(raw: &str) -> input::ParseResult<String> {
    input::parse_name(raw.trim())
}

fn price_arg(raw: &str) -> input::ParseResult<f64> {
    input::parse_price(raw.trim())
}

fn qty_arg(raw: &str) -> input::ParseResult<i64> {
    input::parse_qty(raw.trim())
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Shell);
    let interactive = matches!(command, Commands::Shell);

    // Initialize logging
    let default_level = match (cli.verbose, interactive) {
        (true, _) => "debug",
        (false, true) => "warn",
        (false, false) => "info",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let output_mode = if cli.json { OutputMode::Json } else { OutputMode::Human };
    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let config = config::load_config(Some(&config_path))?.unwrap_or_default();
    let database = config::resolve_database(cli.database.as_deref(), &config);

    let mut out = std::io::stdout();

    if let Commands::Init { force } = command {
        let ok = commands::run_init(output_mode, &mut out, &config_path, &config, &database, force)?;
        return Ok(exit_code(ok));
    }

    let store = commands::open_store(&database)?;
    tracing::info!(database = %database.display(), "store ready");

    let ok = match command {
        Commands::Shell => return run_shell(&store, &config),
        Commands::Add { name, price, qty } => {
            commands::run_add(&store, output_mode, &mut out, &name, price, qty)?
        }
        Commands::Get { id } => commands::run_get(&store, output_mode, &mut out, id)?,
        Commands::List => commands::run_list(&store, output_mode, &mut out)?,
        Commands::Update { id, name, price, qty } => {
            let patch = RecordPatch { name, price, qty };
            commands::run_update(&store, output_mode, &mut out, id, &patch)?
        }
        Commands::Delete { id, confirm } => {
            commands::run_delete(&store, output_mode, &mut out, id, &confirm)?
        }
        Commands::Init { .. } => true,
    };
    Ok(exit_code(ok))
}

fn run_shell(store: &RecordStore, config: &StockroomConfig) -> anyhow::Result<ExitCode> {
    let history = config.history.as_ref().map(PathBuf::from);
    let reader = EditorReader::new(history)?;
    let mut shell = Shell::new(store, reader, std::io::stdout());
    shell.run()?;

    let (mut reader, _) = shell.into_parts();
    if let Err(e) = reader.save_history() {
        tracing::warn!(error = %e, "could not save history");
    }
    Ok(ExitCode::SUCCESS)
}

fn exit_code(ok: bool) -> ExitCode {
    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}
