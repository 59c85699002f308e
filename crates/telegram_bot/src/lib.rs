//! Telegram bot.
//!
//! Records expenses typed as `category amount` and answers report commands.
//! The store is injected by the caller; the bot never opens a database itself.

use std::sync::Arc;

use chrono_tz::Tz;
use engine::ExpenseStore;
use teloxide::{prelude::*, utils::command::BotCommands};

pub use commands::Command;
pub use ui::{DEFAULT_CURRENCY, RenderMode, RenderOptions};

mod clock;
mod commands;
mod handlers;
mod parsing;
mod router;
mod schedule;
mod state;
mod ui;

const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Almaty;

#[derive(Clone)]
pub struct ConfigParameters {
    router: router::Router,
    clock: clock::Clock,
}

pub struct Bot {
    token: String,
    store: Arc<dyn ExpenseStore>,
    clock: clock::Clock,
    render: RenderOptions,
    digest_chats: Vec<ChatId>,
}

impl Bot {
    pub fn builder() -> BotBuilder {
        BotBuilder::default()
    }

    pub async fn run(&self) {
        tracing::info!("Starting telegram bot...");

        let bot = teloxide::Bot::new(&self.token);

        let username = match bot.get_me().await {
            Ok(me) => me.username().to_string(),
            Err(err) => {
                tracing::error!("failed to fetch bot identity: {err}");
                return;
            }
        };
        if let Err(err) = bot.set_my_commands(Command::bot_commands()).await {
            tracing::warn!("failed to register command list: {err}");
        }

        let router = router::Router::new(self.store.clone(), self.render.clone(), &username);
        let parameters = ConfigParameters {
            router: router.clone(),
            clock: self.clock,
        };

        if self.digest_chats.is_empty() {
            tracing::info!("No digest chats configured, scheduled reports disabled");
        } else {
            tokio::spawn(schedule::run(
                bot.clone(),
                router,
                self.clock,
                self.digest_chats.clone(),
            ));
        }

        let handler = dptree::entry()
            .branch(Update::filter_message().endpoint(handlers::handle_message))
            .branch(Update::filter_callback_query().endpoint(handlers::handle_callback));

        Dispatcher::builder(bot, handler)
            .dependencies(dptree::deps![parameters])
            .default_handler(|upd| async move {
                tracing::warn!("Unhandled update: {:?}", upd);
            })
            .error_handler(LoggingErrorHandler::with_custom_text(
                "An error has occurred in the dispatcher",
            ))
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    }
}

#[derive(Default)]
pub struct BotBuilder {
    token: String,
    store: Option<Arc<dyn ExpenseStore>>,
    timezone: Option<String>,
    currency: Option<String>,
    render_mode: RenderMode,
    digest_chats: Vec<i64>,
}

impl BotBuilder {
    pub fn token(mut self, token: &str) -> BotBuilder {
        self.token = token.to_string();
        self
    }

    pub fn store(mut self, store: Arc<dyn ExpenseStore>) -> BotBuilder {
        self.store = Some(store);
        self
    }

    /// IANA name, e.g. `Asia/Almaty`.
    pub fn timezone(mut self, timezone: &str) -> BotBuilder {
        self.timezone = Some(timezone.to_string());
        self
    }

    pub fn currency(mut self, currency: &str) -> BotBuilder {
        self.currency = Some(currency.to_string());
        self
    }

    pub fn render_mode(mut self, mode: RenderMode) -> BotBuilder {
        self.render_mode = mode;
        self
    }

    /// Chats receiving the weekly and monthly digests.
    pub fn digest_chats(mut self, chats: Vec<i64>) -> BotBuilder {
        self.digest_chats = chats;
        self
    }

    pub fn build(self) -> Result<Bot, String> {
        tracing::info!("Initializing telegram bot...");

        if self.token.is_empty() {
            return Err("telegram token is missing".to_string());
        }
        let store = self
            .store
            .ok_or_else(|| "expense store is missing".to_string())?;
        let tz = match self.timezone.as_deref() {
            Some(name) => name
                .parse::<Tz>()
                .map_err(|err| format!("invalid timezone {name:?}: {err}"))?,
            None => DEFAULT_TIMEZONE,
        };

        Ok(Bot {
            token: self.token,
            store,
            clock: clock::Clock::new(tz),
            render: RenderOptions {
                mode: self.render_mode,
                currency: self
                    .currency
                    .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            },
            digest_chats: self.digest_chats.into_iter().map(ChatId).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use engine::MemoryStore;

    use super::*;

    #[test]
    fn build_requires_token_and_store() {
        assert!(Bot::builder().build().is_err());
        assert!(Bot::builder().token("t").build().is_err());
        assert!(
            Bot::builder()
                .store(Arc::new(MemoryStore::new()))
                .build()
                .is_err()
        );
    }

    #[test]
    fn build_rejects_unknown_timezone() {
        let result = Bot::builder()
            .token("t")
            .store(Arc::new(MemoryStore::new()))
            .timezone("Mars/Olympus")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn build_applies_defaults() {
        let bot = Bot::builder()
            .token("t")
            .store(Arc::new(MemoryStore::new()))
            .digest_chats(vec![1, 2])
            .build()
            .unwrap();
        assert_eq!(bot.render, RenderOptions::default());
        assert_eq!(bot.digest_chats, vec![ChatId(1), ChatId(2)]);
    }
}
