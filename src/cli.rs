use std::{
    fmt::{self, Display},
    path::PathBuf,
    str::FromStr,
};

use clap::Parser;

use crate::errors::BotError;

/// The default model to chat with.
pub const DEFAULT_MODEL: Model = Model::Gemini15FlashLatest;
/// Host of the generative language API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Directory the log file is written to, relative to the working directory.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Gemini models supported by Sadok Bot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Model {
    Gemini15FlashLatest,
    Gemini15ProLatest,
    Gemini20Flash,
    Gemini25Flash,
}

impl Model {
    pub fn all_models() -> Vec<String> {
        [
            Model::Gemini15FlashLatest,
            Model::Gemini15ProLatest,
            Model::Gemini20Flash,
            Model::Gemini25Flash,
        ]
        .iter()
        .map(|m| m.to_string())
        .collect()
    }
}

impl FromStr for Model {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini-1.5-flash-latest" => Ok(Model::Gemini15FlashLatest),
            "gemini-1.5-flash" => Ok(Model::Gemini15FlashLatest),
            "gemini-1.5-pro-latest" => Ok(Model::Gemini15ProLatest),
            "gemini-1.5-pro" => Ok(Model::Gemini15ProLatest),
            "gemini-2.0-flash" => Ok(Model::Gemini20Flash),
            "gemini-2.5-flash" => Ok(Model::Gemini25Flash),
            _ => Err(format!(
                "Invalid model: {}. Choose from: {}.",
                s,
                Model::all_models().join(", ")
            )),
        }
    }
}

impl Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Model::Gemini15FlashLatest => write!(f, "gemini-1.5-flash-latest"),
            Model::Gemini15ProLatest => write!(f, "gemini-1.5-pro-latest"),
            Model::Gemini20Flash => write!(f, "gemini-2.0-flash"),
            Model::Gemini25Flash => write!(f, "gemini-2.5-flash"),
        }
    }
}

/// CLI for `sadok-bot`
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Your API key for the generative language API.
    #[arg(long, alias = "api_key", env = "API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
    /// Model to chat with.
    #[arg(short, long, env = "SADOK_MODEL", default_value_t = DEFAULT_MODEL)]
    pub model: Model,
    /// Directory for `chatbot.log`. Created if missing.
    #[arg(long, env = "SADOK_LOG_DIR", default_value = DEFAULT_LOG_DIR)]
    pub log_dir: PathBuf,
    // Points the client at a local server instead of the real API host.
    #[arg(long, env = "SADOK_BASE_URL", default_value = DEFAULT_BASE_URL, hide = true)]
    pub base_url: String,
}

/// Take the API key from the flag (or its env fallback), rejecting missing and blank keys.
pub fn require_api_key(api_key: Option<String>) -> Result<String, BotError> {
    api_key
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .ok_or(BotError::MissingApiKey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_model_aliases() {
        assert_eq!(
            Model::from_str("gemini-1.5-flash").unwrap(),
            Model::Gemini15FlashLatest
        );
        assert_eq!(
            Model::from_str("Gemini-2.0-Flash").unwrap(),
            Model::Gemini20Flash
        );
        let err = Model::from_str("gpt-4o").unwrap_err();
        assert!(err.contains("gemini-1.5-flash-latest"));
    }

    #[test]
    fn model_display_round_trips_through_from_str() {
        for name in Model::all_models() {
            assert_eq!(Model::from_str(&name).unwrap().to_string(), name);
        }
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "sadok-bot",
            "--api_key",
            "abc123",
            "--model",
            "gemini-2.5-flash",
            "--log-dir",
            "/tmp/sadok",
        ])
        .unwrap();
        assert_eq!(args.api_key.as_deref(), Some("abc123"));
        assert_eq!(args.model, Model::Gemini25Flash);
        assert_eq!(args.log_dir, PathBuf::from("/tmp/sadok"));
    }

    #[test]
    fn rejects_unknown_model_flag() {
        let res = Args::try_parse_from(["sadok-bot", "--api-key", "k", "--model", "llama"]);
        assert!(res.is_err());
    }

    #[test]
    fn missing_or_blank_api_key_is_an_error() {
        assert!(matches!(require_api_key(None), Err(BotError::MissingApiKey)));
        assert!(matches!(
            require_api_key(Some("   ".to_string())),
            Err(BotError::MissingApiKey)
        ));
        let message = BotError::MissingApiKey.to_string();
        assert!(message.contains("--api_key"));
        assert!(message.contains(".env"));
    }

    #[test]
    fn api_key_is_trimmed() {
        assert_eq!(require_api_key(Some(" key \n".to_string())).unwrap(), "key");
    }
}
