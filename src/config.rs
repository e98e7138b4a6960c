use anyhow::{bail, Result};

pub const BOT_TOKEN_VAR: &str = "BOT_TOKEN";
pub const TARGET_CHANNEL_VAR: &str = "TARGET_CHANNEL_ID";

/// Where transferred videos are posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Numeric chat id, e.g. `-1001234567890` for a private channel
    ChatId(i64),
    /// Public `@handle`, always stored with the leading `@`
    Handle(String),
}

impl Destination {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(id) = raw.parse::<i64>() {
            return Some(Destination::ChatId(id));
        }
        if raw.starts_with('@') {
            Some(Destination::Handle(raw.to_string()))
        } else {
            Some(Destination::Handle(format!("@{}", raw)))
        }
    }
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Destination::ChatId(id) => write!(f, "{}", id),
            Destination::Handle(handle) => write!(f, "{}", handle),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    /// `TARGET_CHANNEL_ID` as configured (trimmed), echoed back to users
    pub target_channel: String,
    pub destination: Destination,
}

impl Config {
    /// Load from the process environment. A `.env` file in the working
    /// directory is applied first when present.
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment overrides from {}", path.display());
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let bot_token = read(BOT_TOKEN_VAR);
        let target = read(TARGET_CHANNEL_VAR)
            .and_then(|raw| Destination::parse(&raw).map(|destination| (raw, destination)));

        match (bot_token, target) {
            (Some(bot_token), Some((target_channel, destination))) => Ok(Config {
                bot_token,
                target_channel,
                destination,
            }),
            (token, dest) => {
                let mut missing = Vec::new();
                if token.is_none() {
                    missing.push(BOT_TOKEN_VAR);
                }
                if dest.is_none() {
                    missing.push(TARGET_CHANNEL_VAR);
                }
                bail!(
                    "{} environment variable(s) not set",
                    missing.join(" and ")
                )
            }
        }
    }
}
