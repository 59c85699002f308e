use engine::Report;
use serde::Deserialize;
use teloxide::{
    types::{InlineKeyboardButton, InlineKeyboardMarkup, ParseMode},
    utils::{command::BotCommands, html},
};
use unicode_width::UnicodeWidthStr;

use crate::commands::{CALLBACK_MONTH, CALLBACK_PERIOD, CALLBACK_WEEK, Command};

pub const DEFAULT_CURRENCY: &str = "тг";

/// How reports are laid out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// One `category: amount` line per category.
    #[default]
    Plain,
    /// Column-aligned monospace block.
    Table,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    pub mode: RenderMode,
    pub currency: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            mode: RenderMode::Plain,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

/// A message ready to be delivered to a chat.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Reply {
    pub text: String,
    pub parse_mode: Option<ParseMode>,
    pub keyboard: Option<InlineKeyboardMarkup>,
}

impl Reply {
    pub(crate) fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            parse_mode: None,
            keyboard: None,
        }
    }
}

pub(crate) fn render_report(report: &Report, options: &RenderOptions) -> Reply {
    if report.is_empty() {
        return Reply::plain(format!("Нет трат за период {}", report.range));
    }

    let header = format!("📊 Траты за период {}:", report.range);
    match options.mode {
        RenderMode::Plain => {
            let lines: Vec<String> = report
                .iter()
                .map(|t| format!("{}: {} {}", t.category, t.total, options.currency))
                .collect();
            Reply::plain(format!("{header}\n\n{}", lines.join("\n")))
        }
        RenderMode::Table => Reply {
            text: format!(
                "{}\n\n<pre>{}</pre>",
                html::escape(&header),
                html::escape(&report_table(report, &options.currency))
            ),
            parse_mode: Some(ParseMode::Html),
            keyboard: None,
        },
    }
}

fn report_table(report: &Report, currency: &str) -> String {
    const TOTAL_LABEL: &str = "Итого";

    let mut rows: Vec<(String, String)> = report
        .iter()
        .map(|t| (t.category.clone(), t.total.to_string()))
        .collect();
    rows.push((TOTAL_LABEL.to_string(), report.grand_total().to_string()));

    // Terminal cell widths, so wide characters (emoji, CJK) count as two.
    let name_width = rows.iter().map(|(c, _)| c.width()).max().unwrap_or(0);
    let amount_width = rows.iter().map(|(_, a)| a.len()).max().unwrap_or(0);
    let line_width = name_width + 2 + amount_width + 1 + currency.width();

    let mut out: Vec<String> = Vec::with_capacity(rows.len() + 1);
    let last = rows.len() - 1;
    for (idx, (category, amount)) in rows.iter().enumerate() {
        if idx == last {
            out.push("─".repeat(line_width));
        }
        let pad = " ".repeat(name_width - category.width());
        out.push(format!(
            "{category}{pad}  {amount:>amount_width$} {currency}"
        ));
    }
    out.join("\n")
}

pub(crate) fn start_menu() -> Reply {
    let kb = InlineKeyboardMarkup::new(vec![
        vec![
            InlineKeyboardButton::callback("Траты за неделю", CALLBACK_WEEK),
            InlineKeyboardButton::callback("Траты за месяц", CALLBACK_MONTH),
        ],
        vec![InlineKeyboardButton::callback(
            "Траты за период",
            CALLBACK_PERIOD,
        )],
    ]);

    Reply {
        text: "Выберите команду:".to_string(),
        parse_mode: None,
        keyboard: Some(kb),
    }
}

pub(crate) fn help_reply() -> Reply {
    Reply::plain(format!(
        "Чтобы записать трату, отправьте: категория сумма (пример: еда 1500)\n\n{}",
        Command::descriptions()
    ))
}

pub(crate) fn added_reply(category: &str, amount: i64, options: &RenderOptions) -> Reply {
    Reply::plain(format!(
        "Добавлено: {category} — {amount} {}",
        options.currency
    ))
}

pub(crate) fn period_prompt() -> Reply {
    Reply::plain("Введите период в формате: YYYY-MM-DD YYYY-MM-DD")
}

pub(crate) fn failure_reply() -> Reply {
    Reply::plain("Не удалось выполнить запрос, попробуйте позже.")
}
