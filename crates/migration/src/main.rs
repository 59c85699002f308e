use clap::{Parser, Subcommand};
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;

#[derive(Parser, Debug)]
#[command(name = "traty_migrate")]
#[command(about = "Apply or inspect the Traty expense schema")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./traty.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Apply every pending migration (default).
    Up,
    /// Roll back the last applied migration.
    Down,
    /// Drop every table and apply all migrations again. Deletes all expenses.
    Fresh,
    /// List applied and pending migrations.
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    let db = Database::connect(&cli.database_url).await?;

    match cli.command.unwrap_or(Command::Up) {
        Command::Up => Migrator::up(&db, None).await?,
        Command::Down => Migrator::down(&db, Some(1)).await?,
        Command::Fresh => Migrator::fresh(&db).await?,
        Command::Status => Migrator::status(&db).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_up_on_the_local_database() {
        let cli = Cli::try_parse_from(["traty_migrate"]).unwrap();
        assert_eq!(cli.command, None);
    }

    #[test]
    fn parses_subcommand_and_url() {
        let cli =
            Cli::try_parse_from(["traty_migrate", "--database-url", "sqlite::memory:", "status"])
                .unwrap();
        assert_eq!(cli.command, Some(Command::Status));
        assert_eq!(cli.database_url, "sqlite::memory:");
    }
}
