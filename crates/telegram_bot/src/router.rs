//! Transport independent routing of chat input.
//!
//! The router decides what a message or menu press means and produces the
//! replies; `handlers` only moves them to and from Telegram.

use std::sync::Arc;

use chrono::NaiveDate;
use engine::{EngineError, ExpenseStore, Report};
use teloxide::{types::ChatId, utils::command::BotCommands};

use crate::{
    commands::{CALLBACK_MONTH, CALLBACK_PERIOD, CALLBACK_WEEK, Command},
    parsing::parse_entry,
    schedule::Trigger,
    state::{DialogState, PeriodDialogs},
    ui::{self, RenderOptions, Reply},
};

#[derive(Clone)]
pub(crate) struct Router {
    store: Arc<dyn ExpenseStore>,
    dialogs: PeriodDialogs,
    render: RenderOptions,
    bot_name: String,
}

impl Router {
    pub(crate) fn new(store: Arc<dyn ExpenseStore>, render: RenderOptions, bot_name: &str) -> Self {
        Self {
            store,
            dialogs: PeriodDialogs::default(),
            render,
            bot_name: bot_name.to_string(),
        }
    }

    /// Routes one incoming message.
    ///
    /// A chat waiting for a period gets its message consumed by the dialog,
    /// commands included. Otherwise `/...` is a command and anything else is
    /// an expense entry.
    pub(crate) async fn handle_message(
        &self,
        chat_id: ChatId,
        text: Option<&str>,
        today: NaiveDate,
    ) -> Result<Vec<Reply>, EngineError> {
        if self.dialogs.state(chat_id).await == DialogState::AwaitingPeriod {
            return self.continue_period(chat_id, text).await;
        }

        let Some(text) = text else {
            return Ok(Vec::new());
        };

        if text.starts_with('/') {
            return match Command::parse(text, &self.bot_name) {
                Ok(cmd) => self.handle_command(chat_id, cmd, today).await,
                Err(err) => {
                    tracing::debug!("unrecognized command {text:?}: {err}");
                    Ok(vec![ui::help_reply()])
                }
            };
        }

        match parse_entry(text, today) {
            Ok(entry) => {
                let id = self
                    .store
                    .insert(entry.date, &entry.category, entry.amount)
                    .await?;
                tracing::debug!("chat {chat_id}: stored expense {id}");
                Ok(vec![ui::added_reply(
                    &entry.category,
                    entry.amount,
                    &self.render,
                )])
            }
            Err(err) => Ok(vec![Reply::plain(err.to_string())]),
        }
    }

    /// Routes a menu button press. Unknown data produces no reply.
    pub(crate) async fn handle_callback(
        &self,
        chat_id: ChatId,
        data: &str,
        today: NaiveDate,
    ) -> Result<Vec<Reply>, EngineError> {
        let cmd = match data {
            CALLBACK_WEEK => Command::Week,
            CALLBACK_MONTH => Command::Month,
            CALLBACK_PERIOD => Command::Period,
            other => {
                tracing::warn!("chat {chat_id}: unknown callback data {other:?}");
                return Ok(Vec::new());
            }
        };
        self.handle_command(chat_id, cmd, today).await
    }

    async fn handle_command(
        &self,
        chat_id: ChatId,
        cmd: Command,
        today: NaiveDate,
    ) -> Result<Vec<Reply>, EngineError> {
        let reply = match cmd {
            Command::Start => ui::start_menu(),
            Command::Help => ui::help_reply(),
            Command::Week => self.render_report(&self.store.week_report(today).await?),
            Command::Month => self.render_report(&self.store.month_report(today).await?),
            Command::Period => {
                self.dialogs.begin(chat_id).await;
                ui::period_prompt()
            }
        };
        Ok(vec![reply])
    }

    async fn continue_period(
        &self,
        chat_id: ChatId,
        text: Option<&str>,
    ) -> Result<Vec<Reply>, EngineError> {
        let range = match self.dialogs.submit(chat_id, text).await {
            Ok(range) => range,
            Err(err) => return Ok(vec![Reply::plain(err.to_string())]),
        };

        match self.store.custom_report(range.start, range.end).await {
            Ok(report) => Ok(vec![self.render_report(&report)]),
            Err(err) => {
                // Let the user retry the same dialog.
                self.dialogs.begin(chat_id).await;
                Err(err)
            }
        }
    }

    /// Report pushed by a scheduled trigger.
    pub(crate) async fn digest(&self, trigger: Trigger, today: NaiveDate) -> Result<Reply, EngineError> {
        let report = match trigger {
            Trigger::WeeklyDigest => self.store.week_report(today).await?,
            Trigger::MonthlyDigest => self.store.previous_month_report(today).await?,
        };
        Ok(self.render_report(&report))
    }

    fn render_report(&self, report: &Report) -> Reply {
        ui::render_report(report, &self.render)
    }
}
