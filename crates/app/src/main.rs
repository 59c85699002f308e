use std::sync::Arc;

use engine::ExpenseStore;
use migration::{Migrator, MigratorTrait};
use settings::Database;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "traty={level},telegram_bot={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let store = open_store(&settings.database).await?;

    let telegram = settings.telegram;
    let mut builder = telegram_bot::Bot::builder()
        .token(&telegram.token)
        .store(store)
        .render_mode(telegram.render)
        .digest_chats(settings.schedule.chats);
    if let Some(timezone) = telegram.timezone.as_deref() {
        builder = builder.timezone(timezone);
    }
    if let Some(currency) = telegram.currency.as_deref() {
        builder = builder.currency(currency);
    }

    let bot = builder.build()?;
    bot.run().await;

    Ok(())
}

async fn open_store(
    config: &Database,
) -> Result<Arc<dyn ExpenseStore>, Box<dyn std::error::Error + Send + Sync>> {
    let path = match config {
        Database::Memory => {
            tracing::warn!("Using in-memory expense store, records are lost on exit");
            return Ok(Arc::new(engine::MemoryStore::new()));
        }
        Database::Sqlite(path) => path,
    };

    tracing::info!("Opening database {path}...");
    let database = sea_orm::Database::connect(format!("sqlite:{path}?mode=rwc")).await?;
    Migrator::up(&database, None).await?;

    let engine = engine::Engine::builder().database(database).build();
    Ok(Arc::new(engine))
}
