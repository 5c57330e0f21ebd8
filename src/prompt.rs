//! Yes/no confirmation.
//!
//! The pipeline only sees the [`Confirm`] trait. [`ConsolePrompt`] is the
//! interactive implementation; it keeps asking until the answer can be read
//! as yes or no.

use crate::output::OutputFormatter;
use std::io::{self, BufRead, StdinLock};

/// Asks the user questions.
pub trait Confirm {
    /// Asks a yes/no question.
    fn confirm(&mut self, question: &str) -> io::Result<bool>;

    /// Shows `message` and waits until the user acknowledges it.
    fn acknowledge(&mut self, message: &str) -> io::Result<()>;
}

/// Interprets free-text input as yes or no.
///
/// The input is lowercased and split into words. A word starting with `y`
/// or containing `true` means yes; failing that, a word starting with `n`
/// or containing `false` means no. Yes wins when both appear. Returns
/// `None` when neither applies, so the caller asks again.
///
/// ```
/// use cardsweep::prompt::parse_yes_no;
///
/// assert_eq!(parse_yes_no("yes"), Some(true));
/// assert_eq!(parse_yes_no("N"), Some(false));
/// assert_eq!(parse_yes_no("maybe"), None);
/// ```
pub fn parse_yes_no(input: &str) -> Option<bool> {
    let answer = input.to_lowercase();
    let words: Vec<&str> = answer
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    if words.iter().any(|w| w.starts_with('y') || w.contains("true")) {
        Some(true)
    } else if words.iter().any(|w| w.starts_with('n') || w.contains("false")) {
        Some(false)
    } else {
        None
    }
}

/// Reads answers line by line from any buffered reader.
pub struct ConsolePrompt<R> {
    input: R,
}

impl<R: BufRead> ConsolePrompt<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    /// Reads one line. Bytes that are not UTF-8 are replaced, so garbled
    /// input reads as an unrecognised answer; only end of input is an error.
    fn read_answer(&mut self) -> io::Result<String> {
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for an answer",
            ));
        }
        Ok(String::from_utf8_lossy(&line).into_owned())
    }
}

impl ConsolePrompt<StdinLock<'static>> {
    /// A prompt reading from the process's standard input.
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> Confirm for ConsolePrompt<R> {
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        OutputFormatter::prompt(question);
        loop {
            OutputFormatter::prompt("Please enter y/n or true/false");
            let line = self.read_answer()?;
            if let Some(answer) = parse_yes_no(&line) {
                return Ok(answer);
            }
        }
    }

    fn acknowledge(&mut self, message: &str) -> io::Result<()> {
        OutputFormatter::prompt(message);
        self.read_answer().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_yes_tokens() {
        for input in ["y", "Y", "yes", "true", "TRUE\n", "  yep  "] {
            assert_eq!(parse_yes_no(input), Some(true), "{:?}", input);
        }
    }

    #[test]
    fn test_no_tokens() {
        for input in ["n", "no", "false", "nope\r\n", "N"] {
            assert_eq!(parse_yes_no(input), Some(false), "{:?}", input);
        }
    }

    #[test]
    fn test_yes_is_checked_before_no() {
        assert_eq!(parse_yes_no("no, yes"), Some(true));
    }

    #[test]
    fn test_unrecognised_input() {
        for input in ["", "   ", "ok", "1", "?", "maybe", "any"] {
            assert_eq!(parse_yes_no(input), None, "{:?}", input);
        }
    }

    #[test]
    fn test_confirm_reprompts_until_valid() {
        let mut prompt = ConsolePrompt::new(Cursor::new("\nok\n?\nno\n"));
        assert!(!prompt.confirm("Delete?").expect("prompt failed"));
    }

    #[test]
    fn test_maybe_reprompts() {
        let mut prompt = ConsolePrompt::new(Cursor::new("maybe\ny\n"));
        assert!(prompt.confirm("Move?").expect("prompt failed"));

        let mut closed = ConsolePrompt::new(Cursor::new("maybe\n"));
        assert!(closed.confirm("Move?").is_err());
    }

    #[test]
    fn test_invalid_utf8_reprompts() {
        let mut prompt = ConsolePrompt::new(Cursor::new(&b"\xff\xfe\ny\n"[..]));
        assert!(prompt.confirm("Move?").expect("prompt failed"));
    }

    #[test]
    fn test_closed_input_is_an_error() {
        let mut prompt = ConsolePrompt::new(Cursor::new("ok\n"));
        let err = prompt.confirm("Move?").expect_err("should fail on EOF");
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_acknowledge_consumes_one_line() {
        let mut prompt = ConsolePrompt::new(Cursor::new("\ny\n"));
        prompt.acknowledge("Press Enter").expect("ack failed");
        assert!(prompt.confirm("Again?").expect("prompt failed"));
    }
}
