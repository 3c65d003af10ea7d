//! Invoice Store - schema management CLI for the invoicing database.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use common::{AppResult, Settings};
use invoice_store::MigrateAction;

#[derive(Parser)]
#[command(name = "invoice-store")]
#[command(about = "Invoicing database schema and migrations")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
    /// Print the PostgreSQL DDL for the schema
    Schema,
    /// Print the loaded configuration (database URL omitted)
    Config,
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if let Err(e) = run(cli.command).await {
        tracing::error!("Command failed: {}", e);
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> AppResult<()> {
    match command {
        Commands::Migrate { action } => {
            let settings = Settings::from_env()?;
            tracing::debug!(?settings, "Configuration loaded");
            let migrate_action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            };
            invoice_store::run_migrations(migrate_action, &settings).await
        }
        Commands::Schema => {
            println!("{}", invoice_store::schema_sql());
            Ok(())
        }
        Commands::Config => {
            let settings = Settings::from_env()?;
            println!("{}", invoice_store::settings_report(&settings)?);
            Ok(())
        }
    }
}

/// Initialize tracing subscriber
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
