//! Destination for operator-facing status output

use std::fmt::Display;
use std::io::{self, Write};

/// Where prompts and progress lines are printed.
///
/// Status goes to stderr when stdout carries machine-readable output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputStream {
    #[default]
    Stdout,
    Stderr,
}

impl OutputStream {
    /// Write `text` without a newline and flush.
    pub fn print(&self, text: impl Display) {
        match self {
            OutputStream::Stdout => {
                let mut out = io::stdout().lock();
                let _ = write!(out, "{}", text);
                let _ = out.flush();
            }
            OutputStream::Stderr => {
                let mut out = io::stderr().lock();
                let _ = write!(out, "{}", text);
                let _ = out.flush();
            }
        }
    }

    pub fn println(&self, text: impl Display) {
        self.print(format_args!("{}\n", text));
    }
}
