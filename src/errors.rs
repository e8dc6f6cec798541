use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop the bot before or outside of a chat turn
#[derive(Debug, Error)]
pub enum BotError {
    #[error("API key is required. Please set it using --api_key or in the .env file.")]
    MissingApiKey,
    #[error("Failed to create log directory: {dir}. {source}")]
    LogDirError {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to open log file in {dir}. {source}")]
    LogFileOpenError {
        dir: PathBuf,
        #[source]
        source: tracing_appender::rolling::InitError,
    },
    #[error("Failed to install logger: {0}")]
    LoggerInitError(#[from] tracing::subscriber::SetGlobalDefaultError),
    #[error(transparent)]
    StdioError(#[from] std::io::Error),
}

/// Failure of a single `generateContent` call. Never fatal, the chat loop prints it and moves on.
#[derive(Debug, Error)]
pub enum CallError {
    #[error("{0}")]
    Network(#[from] reqwest::Error),
    #[error("{status} {reason}: {message}")]
    Status {
        status: u16,
        reason: String,
        message: String,
    },
    #[error("Invalid JSON in API response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Why a reply could not be pulled out of a decoded response
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("response has unexpected shape: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("response has no candidates")]
    NoCandidates,
    #[error("first candidate has no content")]
    NoContent,
    #[error("first candidate has no parts")]
    NoParts,
    #[error("first part has no text")]
    NoText,
}
