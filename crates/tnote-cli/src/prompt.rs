//! Interactive yes/no confirmation.

use std::io::{self, BufRead, StdinLock, Stdout, Write};

/// Asks the user a yes/no question.
pub trait Confirm {
    /// Show `prompt` and return whether the user agreed.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the prompt cannot be written or the answer
    /// cannot be read.
    fn confirm(&mut self, prompt: &str) -> io::Result<bool>;
}

/// Prompts on a writer and reads one answer line from a reader.
pub struct LineConfirm<R, W> {
    input: R,
    output: W,
}

impl LineConfirm<StdinLock<'static>, Stdout> {
    /// Prompt on stdout, read from stdin.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> LineConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Confirm for LineConfirm<R, W> {
    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut answer = String::new();
        // EOF reads zero bytes and leaves the answer empty, which declines.
        self.input.read_line(&mut answer)?;
        Ok(is_yes(&answer))
    }
}

/// `y`, `Y`, `yes`, ... count as agreement; anything else declines.
pub fn is_yes(answer: &str) -> bool {
    answer
        .trim_start()
        .chars()
        .next()
        .is_some_and(|c| c.eq_ignore_ascii_case(&'y'))
}
