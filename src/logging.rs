//! Append-only file logging for API calls.
//!
//! Every line is `<timestamp> <LEVEL> <message>` with no colour codes, written to
//! `<log dir>/chatbot.log`. The file is never rotated or truncated.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::Subscriber;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use crate::errors::BotError;

/// Name of the log file inside the log directory.
pub const LOG_FILE_NAME: &str = "chatbot.log";
/// Level filter used when `RUST_LOG` is not set.
pub const DEFAULT_LEVEL: &str = "info";

/// `RUST_LOG` if set and valid, otherwise [`DEFAULT_LEVEL`]
pub fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

/// Build the plain-text subscriber used for the log file, writing to `writer`.
pub fn file_subscriber<W>(writer: W, filter: EnvFilter) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .finish()
}

/// Open `<log_dir>/chatbot.log` for appending, creating the directory and file if needed.
pub fn open_log_file(log_dir: &Path) -> Result<RollingFileAppender, BotError> {
    fs::create_dir_all(log_dir).map_err(|source| BotError::LogDirError {
        dir: log_dir.to_path_buf(),
        source,
    })?;
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_NAME)
        .build(log_dir)
        .map_err(|source| BotError::LogFileOpenError {
            dir: log_dir.to_path_buf(),
            source,
        })
}

/// Install the file subscriber as the process-wide default. Returns the log file path.
pub fn init_logging(log_dir: &Path) -> Result<PathBuf, BotError> {
    let appender = open_log_file(log_dir)?;
    tracing::subscriber::set_global_default(file_subscriber(appender, default_filter()))?;
    let path = log_dir.join(LOG_FILE_NAME);
    tracing::debug!("Logging to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::io::Write;
    use std::sync::Mutex;

    use super::*;

    #[test]
    fn creates_missing_directory_and_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("logs");
        let mut appender = open_log_file(&dir).unwrap();
        appender.write_all(b"first line\n").unwrap();
        appender.flush().unwrap();

        let content = fs::read_to_string(dir.join(LOG_FILE_NAME)).unwrap();
        assert_eq!(content, "first line\n");
    }

    #[test]
    fn reopening_appends() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(LOG_FILE_NAME), "earlier run\n").unwrap();

        let mut appender = open_log_file(tmp.path()).unwrap();
        appender.write_all(b"this run\n").unwrap();
        appender.flush().unwrap();

        let content = fs::read_to_string(tmp.path().join(LOG_FILE_NAME)).unwrap();
        assert_eq!(content, "earlier run\nthis run\n");
    }

    #[test]
    fn log_dir_that_is_a_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("not-a-dir");
        File::create(&blocker).unwrap();
        assert!(matches!(
            open_log_file(&blocker),
            Err(BotError::LogDirError { .. })
        ));
    }

    #[test]
    fn lines_have_level_and_message_without_ansi() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(LOG_FILE_NAME);
        let file = File::create(&path).unwrap();
        let subscriber = file_subscriber(Mutex::new(file), EnvFilter::new("info"));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("API Request: {{}}");
            tracing::debug!("filtered out");
            tracing::error!("API Error: boom");
        });

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("INFO"));
        assert!(lines[0].ends_with("API Request: {}"));
        assert!(lines[1].contains("ERROR"));
        assert!(lines[1].ends_with("API Error: boom"));
        assert!(!content.contains('\u{1b}'));
    }
}
