//! The interactive read-eval-print loop.

use std::io::{BufRead, ErrorKind, Write};

use tracing::{info, warn};

use crate::errors::BotError;
use crate::gemini::{extract_text, GeminiClient, Transport};

/// Printed once before the first prompt.
pub const BANNER: &str = "Interactive Chatbot (Type 'exit' to quit)";
/// Case-insensitive keyword that ends the chat.
pub const EXIT_KEYWORD: &str = "exit";
/// Printed when the chat ends.
pub const FAREWELL: &str = "Goodbye!";

/// Whether the user asked to leave the chat
pub fn is_exit(input: &str) -> bool {
    input.eq_ignore_ascii_case(EXIT_KEYWORD)
}

/// Run the chat until the user types `exit` or input ends.
///
/// Each line is sent as its own request. The turn finishes, reply or error printed, before the
/// next prompt is shown.
pub fn run_chat<T, R, W>(client: &GeminiClient<T>, mut input: R, mut output: W) -> Result<(), BotError>
where
    T: Transport,
    R: BufRead,
    W: Write,
{
    writeln!(output, "{}\n", BANNER)?;
    loop {
        write!(output, "You: ")?;
        output.flush()?;

        let mut line = String::new();
        let read = match input.read_line(&mut line) {
            Ok(read) => read,
            // the bad line is already consumed, so the next read moves on
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                warn!("Unreadable input line: {}", e);
                writeln!(output, "Error: input is not valid UTF-8, please try again.")?;
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        if read == 0 {
            // stdin closed, finish the prompt line before saying goodbye
            writeln!(output)?;
            writeln!(output, "{}", FAREWELL)?;
            info!("Input closed, ending chat");
            break;
        }
        let user_input = line.trim_end_matches(['\n', '\r']);
        if is_exit(user_input) {
            writeln!(output, "{}", FAREWELL)?;
            break;
        }

        match client.generate(user_input) {
            Ok(response) => writeln!(output, "Sadok Bot: {}", extract_text(&response))?,
            Err(e) => writeln!(output, "Error: {}", e)?,
        }
    }
    output.flush()?;
    Ok(())
}
