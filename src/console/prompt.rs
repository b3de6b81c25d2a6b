//! Prompt/response port

use std::collections::VecDeque;
use std::io::{self, BufRead, StdinLock, Stdout, Write};

use crate::error::{OrganizeError, OrganizeResult};

/// Something that can ask a question and block until it gets one line back
pub trait Prompt {
    /// Show `prompt` and return the response without its line terminator
    fn ask(&mut self, prompt: &str) -> OrganizeResult<String>;
}

/// Prompt backed by a line reader and a writer, normally stdin/stdout
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompt<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Prompt for TerminalPrompt<R, W> {
    fn ask(&mut self, prompt: &str) -> OrganizeResult<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(OrganizeError::Input(
                "input closed before categorization finished".into(),
            ));
        }

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Prompt that replays canned responses and records what it was asked
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompt {
    responses: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: responses.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Prompts shown so far, in order
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    pub fn remaining(&self) -> usize {
        self.responses.len()
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&mut self, prompt: &str) -> OrganizeResult<String> {
        self.asked.push(prompt.to_string());
        self.responses
            .pop_front()
            .ok_or_else(|| OrganizeError::Input(format!("no scripted response for '{}'", prompt)))
    }
}
