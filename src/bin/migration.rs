use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use geo_catalog_api::{
    config,
    db::{self, DbConfig},
    migrator::Migrator,
};
use sea_orm_migration::MigratorTrait;
use tracing::info;

/// Apply or inspect the geo catalog schema
#[derive(Parser, Debug)]
#[command(name = "geo-catalog-migrate", version, about)]
struct Cli {
    /// Database URL; defaults to the configured `database_url`
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Apply all pending migrations (default)
    Up,
    /// Roll back the most recent migration(s)
    Down {
        #[arg(long, default_value_t = 1)]
        steps: u32,
    },
    /// Show applied and pending migrations
    Status,
    /// Drop every table and re-apply all migrations
    Fresh,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config().context("failed to load configuration")?;
    config::init_tracing(cfg.log_level(), cfg.log_json);

    let mut db_cfg = DbConfig::from(&cfg);
    if let Some(url) = cli.database_url {
        db_cfg.url = url;
    }
    db_cfg.max_connections = 1;
    db_cfg.min_connections = 1;

    info!("Starting database migration");
    let pool = db::establish_connection_with_config(&db_cfg)
        .await
        .context("failed to connect to the database")?;

    match cli.command.unwrap_or(Command::Up) {
        Command::Up => {
            db::run_migrations(&pool).await?;
        }
        Command::Down { steps } => {
            info!(steps, "Rolling back migrations");
            Migrator::down(&pool, Some(steps)).await?;
        }
        Command::Status => {
            Migrator::status(&pool).await?;
            let pending = Migrator::get_pending_migrations(&pool).await?;
            println!("{} pending migration(s)", pending.len());
            for migration in pending {
                println!("  pending: {}", migration.name());
            }
        }
        Command::Fresh => {
            info!("Dropping all tables and re-applying migrations");
            Migrator::fresh(&pool).await?;
        }
    }

    db::close_pool(pool).await?;
    info!("Migration command completed successfully");
    Ok(())
}
