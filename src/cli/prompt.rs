use std::io::{self, BufRead, IsTerminal, Write};

use crate::cli::output;
use crate::workspace::acquire::Confirm;

/// Asks on stderr and reads the answer from stdin.
///
/// Without a terminal on stdin nobody can answer, so the question is
/// declined without reading.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, question: &str) -> io::Result<bool> {
        if !io::stdin().is_terminal() {
            output::warning("stdin is not a terminal -- cannot prompt for confirmation.");
            return Ok(false);
        }

        eprint!("{} [y/n]: ", question);
        io::stderr().flush()?;

        let mut input = String::new();
        io::stdin().lock().read_line(&mut input)?;
        Ok(is_yes(&input))
    }
}

fn is_yes(input: &str) -> bool {
    let answer = input.trim().to_lowercase();
    answer == "y" || answer == "yes"
}
