//! Command structs

use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Команды для учёта трат:")]
pub enum Command {
    #[command(description = "Показать меню.")]
    Start,
    #[command(description = "Показать эту справку.")]
    Help,
    #[command(description = "Траты за последние 7 дней.")]
    Week,
    #[command(description = "Траты за последние 30 дней.")]
    Month,
    #[command(description = "Траты за произвольный период.")]
    Period,
}

/// Callback data carried by the inline menu buttons.
pub(crate) const CALLBACK_WEEK: &str = "week";
pub(crate) const CALLBACK_MONTH: &str = "month";
pub(crate) const CALLBACK_PERIOD: &str = "period";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_addressed_commands() {
        assert_eq!(Command::parse("/week", "traty_bot").unwrap(), Command::Week);
        assert_eq!(
            Command::parse("/month@traty_bot", "traty_bot").unwrap(),
            Command::Month
        );
        assert_eq!(Command::parse("/period", "traty_bot").unwrap(), Command::Period);
    }

    #[test]
    fn rejects_unknown_commands() {
        assert!(Command::parse("/delete", "traty_bot").is_err());
    }
}
