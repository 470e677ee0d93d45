//! Interactive confirmation.

use std::io::{self, BufRead, Write};

use colored::Colorize;
use limbswitch_rig::{AlwaysConfirm, Confirm};

/// Asks yes/no questions on a writer and reads answers from a reader.
///
/// Anything other than `y` or `yes` (case-insensitive) is a no, including
/// end of input and read errors.
pub struct PromptConfirm<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> PromptConfirm<R, W> {
    /// Creates a prompt over the given streams.
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

impl PromptConfirm<io::StdinLock<'static>, io::Stderr> {
    /// Prompt on stderr, answers from stdin.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<R, W> {
    fn confirm(&mut self, prompt: &str) -> bool {
        if write!(self.writer, "{} {} {} ", "?".yellow().bold(), prompt, "[y/N]".dimmed())
            .and_then(|_| self.writer.flush())
            .is_err()
        {
            return false;
        }
        let mut answer = String::new();
        match self.reader.read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}

/// `--yes` answers everything; otherwise the terminal is asked.
pub fn confirmer(yes: bool) -> Box<dyn Confirm> {
    if yes {
        Box::new(AlwaysConfirm)
    } else {
        Box::new(PromptConfirm::stdio())
    }
}
