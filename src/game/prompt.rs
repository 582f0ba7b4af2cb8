//! Blocking text prompts over generic reader/writer pairs.
//!
//! Every suspension point in the game is a synchronous read through this
//! console; an unresponsive input source blocks indefinitely by design.
//! Tests drive full sessions by supplying scripted input bytes.

use crate::game::errors::GameError;
use std::io::{BufRead, Write};

pub struct Console<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, text: &str) -> Result<(), GameError> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    pub fn say_lines(&mut self, lines: &[String]) -> Result<(), GameError> {
        for line in lines {
            writeln!(self.output, "{}", line)?;
        }
        Ok(())
    }

    /// Read one trimmed line, prompting first. EOF on the input stream is
    /// an [`GameError::InputClosed`], not an empty answer.
    pub fn read_line(&mut self, prompt: &str) -> Result<String, GameError> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        let mut buf = String::new();
        let read = self.input.read_line(&mut buf)?;
        if read == 0 {
            return Err(GameError::InputClosed);
        }
        Ok(buf.trim().to_string())
    }

    /// Read an integer; a non-numeric answer yields `None` so the caller
    /// can re-prompt without treating it as an error.
    pub fn read_int(&mut self, prompt: &str) -> Result<Option<i32>, GameError> {
        let line = self.read_line(prompt)?;
        Ok(line.parse::<i32>().ok())
    }

    /// Re-prompt until the answer is -1 or an integer in `lo..=hi`.
    pub fn read_menu_choice(
        &mut self,
        prompt: &str,
        lo: i32,
        hi: i32,
    ) -> Result<i32, GameError> {
        loop {
            match self.read_int(prompt)? {
                Some(-1) => return Ok(-1),
                Some(n) if (lo..=hi).contains(&n) => return Ok(n),
                _ => self.say("Invalid input: please enter a valid number.")?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn read_line_trims() {
        let mut c = console("  Alice  \n");
        assert_eq!(c.read_line("> ").unwrap(), "Alice");
    }

    #[test]
    fn read_int_reports_garbage_as_none() {
        let mut c = console("potato\n7\n");
        assert_eq!(c.read_int("> ").unwrap(), None);
        assert_eq!(c.read_int("> ").unwrap(), Some(7));
    }

    #[test]
    fn menu_choice_reprompts_until_valid() {
        let mut c = console("99\nabc\n3\n");
        assert_eq!(c.read_menu_choice("> ", 0, 8).unwrap(), 3);
    }

    #[test]
    fn menu_choice_accepts_quit_sentinel() {
        let mut c = console("-1\n");
        assert_eq!(c.read_menu_choice("> ", 0, 8).unwrap(), -1);
    }

    #[test]
    fn eof_is_input_closed() {
        let mut c = console("");
        assert!(matches!(
            c.read_line("> "),
            Err(GameError::InputClosed)
        ));
    }
}
