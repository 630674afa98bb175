//! Styled one-line messages written to any sink

use crate::ui::theme::{paint, Tone};
use crate::ui::Icons;
use std::io::{self, Write};

pub fn header(out: &mut impl Write, text: &str) -> io::Result<()> {
    writeln!(out, "{} {}", Icons::PACKAGE, paint(text, Tone::Header))
}

pub fn success(out: &mut impl Write, label: &str) -> io::Result<()> {
    writeln!(out, "{} {}", Icons::CHECK, paint(label, Tone::Success))
}

pub fn error(out: &mut impl Write, label: &str) -> io::Result<()> {
    writeln!(out, "{} {}", Icons::CROSS, paint(label, Tone::Failure))
}

pub fn warn(out: &mut impl Write, label: &str) -> io::Result<()> {
    writeln!(out, "{} {}", Icons::WARN, paint(label, Tone::Warning))
}

pub fn info(out: &mut impl Write, label: &str, value: &str) -> io::Result<()> {
    writeln!(
        out,
        "{} {}: {}",
        paint(Icons::INFO, Tone::Detail),
        paint(label, Tone::Muted),
        value
    )
}

pub fn deleted(out: &mut impl Write, label: &str) -> io::Result<()> {
    writeln!(out, "{} {}", paint(Icons::DEL, Tone::Failure), label)
}

pub fn menu_item(out: &mut impl Write, selector: i64, label: &str) -> io::Result<()> {
    writeln!(out, "{}) {}", paint(selector, Tone::Selector), label)
}

pub fn dim(text: &str) -> String {
    paint(text, Tone::Muted)
}
