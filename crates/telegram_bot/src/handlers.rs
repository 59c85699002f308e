use teloxide::{
    prelude::*,
    types::{CallbackQuery, ChatId},
};

use crate::{
    ConfigParameters,
    ui::{self, Reply},
};

pub(crate) async fn handle_message(
    bot: Bot,
    msg: Message,
    cfg: ConfigParameters,
) -> ResponseResult<()> {
    let chat_id = msg.chat.id;
    let today = cfg.clock.today();

    let replies = match cfg.router.handle_message(chat_id, msg.text(), today).await {
        Ok(replies) => replies,
        Err(err) => {
            tracing::error!("chat {chat_id}: failed to handle message: {err}");
            vec![ui::failure_reply()]
        }
    };

    deliver(&bot, chat_id, replies).await
}

pub(crate) async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    cfg: ConfigParameters,
) -> ResponseResult<()> {
    let _ = bot.answer_callback_query(q.id.clone()).await;

    let Some(message) = q.message.as_ref() else {
        return Ok(());
    };
    let chat_id = message.chat().id;

    let Some(data) = q.data.as_deref() else {
        return Ok(());
    };

    let today = cfg.clock.today();
    let replies = match cfg.router.handle_callback(chat_id, data, today).await {
        Ok(replies) => replies,
        Err(err) => {
            tracing::error!("chat {chat_id}: failed to handle callback {data:?}: {err}");
            vec![ui::failure_reply()]
        }
    };

    deliver(&bot, chat_id, replies).await
}

/// Sends replies in order.
pub(crate) async fn deliver(bot: &Bot, chat_id: ChatId, replies: Vec<Reply>) -> ResponseResult<()> {
    for reply in replies {
        let mut request = bot.send_message(chat_id, reply.text);
        if let Some(mode) = reply.parse_mode {
            request = request.parse_mode(mode);
        }
        if let Some(keyboard) = reply.keyboard {
            request = request.reply_markup(keyboard);
        }
        request.await?;
    }
    Ok(())
}
