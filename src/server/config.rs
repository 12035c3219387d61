use std::{path::PathBuf, str::FromStr, time::Duration};

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_DATABASE_URL: &str = "sqlite://tickets.db?mode=rwc";
const DEFAULT_GUILD_CONFIG_PATH: &str = "guild_config.json";
const DEFAULT_TRANSCRIPT_DIR: &str = "transcripts";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TICKET_COOLDOWN_SECS: u64 = 60;
const DEFAULT_TICKET_DELETE_DELAY_SECS: u64 = 5;

/// Process configuration loaded from the environment.
///
/// Guild-level settings (roles, log channel) live in the guild config file instead,
/// since they are changed at runtime through `/setup`.
pub struct Config {
    pub discord_bot_token: String,
    pub database_url: String,
    pub guild_config_path: PathBuf,
    pub transcript_dir: PathBuf,
    pub port: u16,

    /// Minimum time between two ticket openings by the same user.
    pub ticket_cooldown: Duration,
    /// Grace delay between closing a ticket and deleting its channel.
    pub ticket_delete_delay: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            discord_bot_token: std::env::var("DISCORD_BOT_TOKEN")
                .map_err(|_| ConfigError::MissingEnvVar("DISCORD_BOT_TOKEN".to_string()))?,
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            guild_config_path: std::env::var("GUILD_CONFIG_PATH")
                .unwrap_or_else(|_| DEFAULT_GUILD_CONFIG_PATH.to_string())
                .into(),
            transcript_dir: std::env::var("TRANSCRIPT_DIR")
                .unwrap_or_else(|_| DEFAULT_TRANSCRIPT_DIR.to_string())
                .into(),
            port: parse_var("PORT", std::env::var("PORT").ok(), DEFAULT_PORT)?,
            ticket_cooldown: Duration::from_secs(parse_var(
                "TICKET_COOLDOWN_SECS",
                std::env::var("TICKET_COOLDOWN_SECS").ok(),
                DEFAULT_TICKET_COOLDOWN_SECS,
            )?),
            ticket_delete_delay: Duration::from_secs(parse_var(
                "TICKET_DELETE_DELAY_SECS",
                std::env::var("TICKET_DELETE_DELAY_SECS").ok(),
                DEFAULT_TICKET_DELETE_DELAY_SECS,
            )?),
        })
    }
}

/// Parses an optional raw environment value, falling back to `default` when unset.
fn parse_var<T: FromStr>(name: &str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidEnvVar {
                name: name.to_string(),
                value,
            }),
    }
}
