use std::io;

use clap::Parser;
use sadok_bot::{
    cli::{require_api_key, Args},
    errors::BotError,
    gemini::{GeminiClient, ReqwestTransport},
    logging::init_logging,
    session::run_chat,
};

fn main() {
    // a missing .env file is fine, real env vars and flags still apply
    let _ = dotenvy::dotenv();
    let args = Args::parse();
    run(args).unwrap_or_else(|e| {
        eprintln!("{}", e);
        std::process::exit(1);
    });
}

fn run(args: Args) -> Result<(), BotError> {
    let api_key = require_api_key(args.api_key)?;
    init_logging(&args.log_dir)?;
    let client =
        GeminiClient::new(ReqwestTransport::new(), api_key, args.model).with_base_url(args.base_url);

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_chat(&client, stdin.lock(), stdout.lock())
}
