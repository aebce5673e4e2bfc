use clap::{Args, Parser, Subcommand};

use crate::{config, utils};

#[derive(Args, Debug, Clone)]
pub struct RunMigrationsArgs {
    /// Template name under `migrations/`, e.g. `create_tables.sql`
    #[arg(short, long)]
    file: String,
}

#[derive(Args, Debug, Clone)]
pub struct ImportRosterArgs {
    /// JSON file with `[{"access_code", "display_name", "department"}]`
    #[arg(short, long)]
    file: String,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Action {
    RunMigrations(RunMigrationsArgs),
    ImportRoster(ImportRosterArgs),
}

/// Operations tooling for the doctor roster database
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct AppArgs {
    #[command(subcommand)]
    pub action: Action,
}

impl AppArgs {
    pub async fn run(&self) -> anyhow::Result<()> {
        let db_pool = utils::setup_sqlite_db_pool(config::APP_CONFIG.is_prod()).await?;

        match &self.action {
            Action::RunMigrations(RunMigrationsArgs { file }) => {
                utils::run_migrations(&db_pool, file).await
            }
            Action::ImportRoster(ImportRosterArgs { file }) => {
                let entries = utils::read_roster_file(file)?;
                let (updated, inserted) = utils::import_roster(&db_pool, &entries).await?;
                println!("roster imported: {updated} updated, {inserted} inserted");
                Ok(())
            }
        }
    }
}
