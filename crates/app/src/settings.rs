//! Process settings, read from `config/settings.toml` (or `--config`) and
//! overridden by `TRATY_*` environment variables, e.g.
//! `TRATY_TELEGRAM__TOKEN` or `TRATY_SCHEDULE__CHATS=1,-100200`.

use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use telegram_bot::RenderMode;

const DEFAULT_CONFIG_PATH: &str = "config/settings.toml";

#[derive(Debug, Deserialize)]
pub struct App {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct Telegram {
    pub token: String,
    pub timezone: Option<String>,
    pub currency: Option<String>,
    #[serde(default)]
    pub render: RenderMode,
}

#[derive(Debug, Default, Deserialize)]
pub struct Schedule {
    /// Chat ids receiving the weekly and monthly digests.
    #[serde(default)]
    pub chats: Vec<i64>,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    pub database: Database,
    pub telegram: Telegram,
    #[serde(default)]
    pub schedule: Schedule,
}

#[derive(Debug, Parser)]
#[command(name = "traty", version)]
struct Args {
    /// Config file path (TOML).
    #[arg(long, env = "TRATY_CONFIG")]
    config: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let args = Args::parse();
        Self::load(
            args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH),
            environment(),
        )
    }

    fn load(path: &str, env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(env)
            .build()?
            .try_deserialize()
    }
}

/// No `try_parsing`: it would turn a single chat id into a scalar instead of
/// a one-element list. List items are parsed by the deserializer.
fn environment() -> Environment {
    Environment::with_prefix("TRATY")
        .prefix_separator("_")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("schedule.chats")
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use config::Map;

    use super::*;

    fn env_of(vars: &[(&str, &str)]) -> Environment {
        let vars: Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        environment().source(Some(vars))
    }

    fn write_config(name: &str, body: &str) -> String {
        let path = std::env::temp_dir().join(format!("traty-{}-{name}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn full_file_is_parsed() {
        let path = write_config(
            "full",
            r#"
            [app]
            level = "debug"

            [database]
            sqlite = "traty.db"

            [telegram]
            token = "123:abc"
            timezone = "Asia/Almaty"
            currency = "₸"
            render = "table"

            [schedule]
            chats = [1, -100200]
            "#,
        );

        let settings = Settings::load(&path, env_of(&[])).unwrap();
        assert_eq!(settings.app.level, "debug");
        assert!(matches!(settings.database, Database::Sqlite(ref p) if p == "traty.db"));
        assert_eq!(settings.telegram.token, "123:abc");
        assert_eq!(settings.telegram.currency.as_deref(), Some("₸"));
        assert_eq!(settings.telegram.render, RenderMode::Table);
        assert_eq!(settings.schedule.chats, vec![1, -100200]);
    }

    #[test]
    fn optional_sections_default() {
        let path = write_config(
            "minimal",
            r#"
            database = "memory"

            [telegram]
            token = "123:abc"
            "#,
        );

        let settings = Settings::load(&path, env_of(&[])).unwrap();
        assert_eq!(settings.app.level, "info");
        assert!(matches!(settings.database, Database::Memory));
        assert_eq!(settings.telegram.render, RenderMode::Plain);
        assert!(settings.telegram.timezone.is_none());
        assert!(settings.schedule.chats.is_empty());
    }

    #[test]
    fn environment_alone_is_enough() {
        let env = env_of(&[
            ("TRATY_DATABASE", "memory"),
            ("TRATY_TELEGRAM__TOKEN", "1:a"),
            ("TRATY_TELEGRAM__RENDER", "table"),
            ("TRATY_SCHEDULE__CHATS", "123,-100200"),
        ]);

        let settings = Settings::load("does/not/exist.toml", env).unwrap();
        assert!(matches!(settings.database, Database::Memory));
        assert_eq!(settings.telegram.token, "1:a");
        assert_eq!(settings.telegram.render, RenderMode::Table);
        assert_eq!(settings.schedule.chats, vec![123, -100200]);
    }

    #[test]
    fn environment_overrides_file() {
        let path = write_config(
            "override",
            r#"
            database = "memory"

            [telegram]
            token = "from-file"

            [schedule]
            chats = [1]
            "#,
        );
        let env = env_of(&[
            ("TRATY_TELEGRAM__TOKEN", "2:b"),
            ("TRATY_SCHEDULE__CHATS", "7"),
        ]);

        let settings = Settings::load(&path, env).unwrap();
        assert_eq!(settings.telegram.token, "2:b");
        assert_eq!(settings.schedule.chats, vec![7]);
    }
}
