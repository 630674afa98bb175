//! Line sources for the command loop
//!
//! The shell only needs "give me the next line for this prompt". The
//! interactive binary reads through rustyline; tests feed a fixed script.

use std::collections::VecDeque;
use std::path::PathBuf;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::{Error, Result};

/// What a single read produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    /// Ctrl-C while waiting for input
    Interrupted,
    /// Ctrl-D or closed input
    Eof,
}

/// Source of operator input
pub trait LineReader {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome>;
}

/// Terminal reader with line editing and history
pub struct EditorReader {
    editor: DefaultEditor,
    history: Option<PathBuf>,
}

impl EditorReader {
    /// Create a reader, loading `history` if the file exists.
    pub fn new(history: Option<PathBuf>) -> Result<Self> {
        let mut editor = DefaultEditor::new().map_err(readline_error)?;
        if let Some(path) = &history {
            if path.exists() {
                if let Err(e) = editor.load_history(path) {
                    tracing::warn!(path = %path.display(), error = %e, "could not load history");
                }
            }
        }
        Ok(Self { editor, history })
    }

    /// Persist history to the configured file, if any
    pub fn save_history(&mut self) -> Result<()> {
        if let Some(path) = &self.history {
            self.editor.save_history(path).map_err(readline_error)?;
            tracing::debug!(path = %path.display(), "saved history");
        }
        Ok(())
    }

    /// Add a non-blank line to the session history
    pub fn remember(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        if let Err(e) = self.editor.add_history_entry(line) {
            tracing::debug!(error = %e, "could not add history entry");
        }
    }
}

impl LineReader for EditorReader {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                self.remember(&line);
                Ok(ReadOutcome::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(e) => Err(readline_error(e)),
        }
    }
}

fn readline_error(e: ReadlineError) -> Error {
    Error::Readline(e.to_string())
}

/// Replays a fixed sequence of reads; yields `Eof` once exhausted.
#[derive(Debug, Default)]
pub struct ScriptedReader {
    script: VecDeque<ReadOutcome>,
    prompts: Vec<String>,
}

impl ScriptedReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script made only of typed lines
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut reader = Self::new();
        for line in lines {
            reader = reader.line(line);
        }
        reader
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.script.push_back(ReadOutcome::Line(line.into()));
        self
    }

    pub fn interrupt(mut self) -> Self {
        self.script.push_back(ReadOutcome::Interrupted);
        self
    }

    /// Prompts shown so far, in order
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl LineReader for ScriptedReader {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome> {
        self.prompts.push(prompt.to_string());
        Ok(self.script.pop_front().unwrap_or(ReadOutcome::Eof))
    }
}
