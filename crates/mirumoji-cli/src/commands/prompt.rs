use mirumoji_core::{Confirm, Error};
use std::io::{BufRead, IsTerminal, Write};

/// Yes/no prompts on the controlling terminal.
pub struct StdinPrompter;

impl Confirm for StdinPrompter {
    fn confirm(&mut self, question: &str, default: bool) -> mirumoji_core::Result<bool> {
        let stdin = std::io::stdin();
        if !stdin.is_terminal() {
            return Err(Error::Configuration {
                detail: format!(
                    "cannot ask \"{question}\": stdin is not an interactive terminal; pass the corresponding flag instead"
                ),
            });
        }

        let hint = if default { "[Y/n]" } else { "[y/N]" };
        let mut input = String::new();
        loop {
            print!("{question} {hint} ");
            std::io::stdout().flush().map_err(prompt_failed)?;

            input.clear();
            if stdin.lock().read_line(&mut input).map_err(prompt_failed)? == 0 {
                return Err(Error::Configuration {
                    detail: format!("no answer to \"{question}\" (end of input)"),
                });
            }
            match parse_answer(&input, default) {
                Some(answer) => return Ok(answer),
                None => println!("Error: invalid input, answer y or n"),
            }
        }
    }
}

fn prompt_failed(e: std::io::Error) -> Error {
    Error::Configuration {
        detail: format!("prompt failed: {e}"),
    }
}

/// `y`/`yes`/`n`/`no` in any case; an empty answer takes the default.
fn parse_answer(input: &str, default: bool) -> Option<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "" => Some(default),
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}
