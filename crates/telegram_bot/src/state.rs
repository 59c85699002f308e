use std::{collections::HashMap, sync::Arc};

use engine::DateRange;
use teloxide::types::ChatId;
use tokio::sync::Mutex;

use crate::parsing::{PeriodError, parse_period};

/// Where a chat stands in the custom period dialog.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum DialogState {
    #[default]
    Idle,
    AwaitingPeriod,
}

/// Per-chat period dialog state.
///
/// Only chats waiting for input have an entry. Nothing expires: a chat stays
/// in `AwaitingPeriod` until it sends a valid pair of dates.
#[derive(Clone, Default)]
pub(crate) struct PeriodDialogs {
    inner: Arc<Mutex<HashMap<ChatId, DialogState>>>,
}

impl PeriodDialogs {
    pub(crate) async fn state(&self, chat_id: ChatId) -> DialogState {
        let guard = self.inner.lock().await;
        guard.get(&chat_id).copied().unwrap_or_default()
    }

    /// Arms the dialog. Calling it again while armed is a no-op.
    pub(crate) async fn begin(&self, chat_id: ChatId) {
        let mut guard = self.inner.lock().await;
        guard.insert(chat_id, DialogState::AwaitingPeriod);
    }

    /// Feeds the next message of an armed chat into the dialog.
    ///
    /// On success the chat goes back to `Idle`; on any error it stays armed.
    /// A message without text counts as a malformed period.
    pub(crate) async fn submit(
        &self,
        chat_id: ChatId,
        text: Option<&str>,
    ) -> Result<DateRange, PeriodError> {
        let mut guard = self.inner.lock().await;
        let range = parse_period(text.unwrap_or_default())?;
        guard.remove(&chat_id);
        Ok(range)
    }
}
