//! Overwrite confirmation strategies.

use std::io::{self, BufRead, Write};

/// Token accepted by the interactive prompt unless configured otherwise.
pub const DEFAULT_CONFIRM_TOKEN: &str = "yes";

/// Decides whether an existing output file may be overwritten.
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> io::Result<bool>;
}

/// Always confirms (`--yes`).
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _question: &str) -> io::Result<bool> {
        Ok(true)
    }
}

/// Asks on `output` and reads one line from `input`.
///
/// Only the configured token (case-insensitive) counts as confirmation.
/// End of input counts as a refusal.
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
    token: String,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W, token: impl Into<String>) -> Self {
        Self {
            input,
            output,
            token: token.into(),
        }
    }
}

impl LinePrompt<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio(token: impl Into<String>) -> Self {
        Self::new(io::stdin().lock(), io::stdout(), token)
    }
}

impl<R: BufRead, W: Write> Confirm for LinePrompt<R, W> {
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        write!(self.output, "{question} (type {} to confirm): ", self.token)?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            writeln!(self.output)?;
            return Ok(false);
        }
        Ok(is_confirmation(&answer, &self.token))
    }
}

/// Compare one answer line with the token. Only the line terminator is
/// stripped; `" yes"` is not `"yes"`.
pub fn is_confirmation(answer: &str, token: &str) -> bool {
    let answer = answer
        .strip_suffix('\n')
        .map(|a| a.strip_suffix('\r').unwrap_or(a))
        .unwrap_or(answer);
    answer.to_lowercase() == token.to_lowercase()
}
