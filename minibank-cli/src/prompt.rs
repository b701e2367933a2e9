//! Input sources for the interactive shell

use std::io::BufRead;

use anyhow::Result;
use dialoguer::Input;

/// Something that can answer shell prompts
pub trait Prompter {
    /// Ask for one line of input; `None` means the input is exhausted
    fn ask(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Prompts on an interactive terminal
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        let answer: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(Some(answer))
    }
}

/// Reads answers line by line, for piped stdin and tests
pub struct LinePrompter<R> {
    reader: R,
}

impl<R: BufRead> LinePrompter<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> Prompter for LinePrompter<R> {
    fn ask(&mut self, _prompt: &str) -> Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
