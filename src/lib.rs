//! # Sadok Bot (`sadok-bot`)
//! Chat with Gemini from your terminal!
//!
//! A small interactive command line chatbot. Every line typed is sent as a single, independent
//! `generateContent` request to the Google generative language API and the first candidate's text
//! is printed back. No conversation history is kept between turns.
//!
//! ## Usage
//! These are the library crate docs for `sadok-bot`. For usage of the binary see
//! ```shell
//! $ sadok-bot --help
//! ```
//!
//! ## Environment Variables:
//! - `API_KEY`: Required unless `--api-key` is given. The API key for the generative language API.
//! - `SADOK_MODEL`: Optional. The model to chat with (default: gemini-1.5-flash-latest).
//! - `SADOK_LOG_DIR`: Optional. Directory holding `chatbot.log` (default: `logs`).
//! - `RUST_LOG`: Optional. Log level filter for the log file (default: info).
//!
//! A `.env` file in the working directory is read at startup, so any of the above can live there.
//!
//! ## Notes:
//! - The log file is append only and is never rotated or cleaned up. Remove it manually when it is
//!   no longer needed.
//! - The API key is sent as a query parameter, as the API expects, but is never written to the log.
//!
pub mod cli;
pub mod errors;
pub mod gemini;
pub mod logging;
pub mod session;
