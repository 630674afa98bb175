//! Typed prompts
//!
//! Every field is read as text, trimmed, then handed to a parser. A parser
//! failure prints the reason and asks for the same field again.

use std::io::Write;

use super::ShellError;
use super::reader::{LineReader, ReadOutcome};

/// Parser result; the error is shown to the operator verbatim
pub type ParseResult<T> = std::result::Result<T, String>;

/// Menu selector
pub fn parse_selector(raw: &str) -> ParseResult<i64> {
    raw.parse::<i64>()
        .map_err(|_| format!("'{}' is not a menu number", raw))
}

/// Record id
pub fn parse_id(raw: &str) -> ParseResult<i64> {
    raw.parse::<i64>()
        .map_err(|_| format!("'{}' is not a valid id", raw))
}

/// Product name: any non-empty text
pub fn parse_name(raw: &str) -> ParseResult<String> {
    if raw.is_empty() {
        return Err("name must not be empty".to_string());
    }
    Ok(raw.to_string())
}

/// Price: finite and not negative
pub fn parse_price(raw: &str) -> ParseResult<f64> {
    let price = raw
        .parse::<f64>()
        .map_err(|_| format!("'{}' is not a number", raw))?;
    if !price.is_finite() {
        return Err("price must be a finite number".to_string());
    }
    if price < 0.0 {
        return Err("price must not be negative".to_string());
    }
    Ok(price)
}

/// Quantity: a whole number, not negative
pub fn parse_qty(raw: &str) -> ParseResult<i64> {
    let qty = raw
        .parse::<i64>()
        .map_err(|_| format!("'{}' is not a whole number", raw))?;
    if qty < 0 {
        return Err("quantity must not be negative".to_string());
    }
    Ok(qty)
}

/// Pass-through
pub fn parse_text(raw: &str) -> ParseResult<String> {
    Ok(raw.to_string())
}

/// Prompt-and-parse over a borrowed reader and output sink.
pub struct Prompter<'a, R: LineReader, W: Write> {
    reader: &'a mut R,
    out: &'a mut W,
}

impl<'a, R: LineReader, W: Write> Prompter<'a, R, W> {
    pub fn new(reader: &'a mut R, out: &'a mut W) -> Self {
        Self { reader, out }
    }

    /// Ask until `parse` accepts the input.
    pub fn ask<T, F>(&mut self, prompt: &str, parse: F) -> Result<T, ShellError>
    where
        F: Fn(&str) -> ParseResult<T>,
    {
        loop {
            self.out.flush()?;
            let raw = match self.reader.read_line(prompt).map_err(ShellError::Reader)? {
                ReadOutcome::Line(line) => line,
                ReadOutcome::Interrupted => return Err(ShellError::Interrupted),
                ReadOutcome::Eof => return Err(ShellError::EndOfInput),
            };

            match parse(raw.trim()) {
                Ok(value) => return Ok(value),
                Err(reason) => {
                    tracing::debug!(prompt, reason = %reason, "rejected input");
                    writeln!(self.out, "Input error: {}", reason)?;
                    writeln!(self.out, "Please try again.")?;
                }
            }
        }
    }

    /// Like [`Prompter::ask`], but a blank line yields `None` ("keep current").
    pub fn ask_optional<T, F>(&mut self, prompt: &str, parse: F) -> Result<Option<T>, ShellError>
    where
        F: Fn(&str) -> ParseResult<T>,
    {
        self.ask(prompt, |raw| {
            if raw.is_empty() {
                Ok(None)
            } else {
                parse(raw).map(Some)
            }
        })
    }
}
