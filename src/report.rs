//! Where status lines go.
//!
//! The batch pipeline never prints directly; it hands one line per step to a
//! [`StatusSink`]. The CLI uses [`ConsoleSink`], tests and embedders can use
//! [`MemorySink`] or a plain closure.

use crate::constants::{INFO_PREFIX, SUCCESS_PREFIX};
use crate::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Error,
}

pub trait StatusSink {
    fn status(&mut self, level: StatusLevel, message: &str);
}

impl<F> StatusSink for F
where
    F: FnMut(StatusLevel, &str),
{
    fn status(&mut self, level: StatusLevel, message: &str) {
        self(level, message)
    }
}

/// Prints status lines through the crate logger.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl StatusSink for ConsoleSink {
    fn status(&mut self, level: StatusLevel, message: &str) {
        match level {
            StatusLevel::Info => {
                info!("{} {}", INFO_PREFIX, message);
            }
            StatusLevel::Success => {
                info!("{} {}", SUCCESS_PREFIX, message);
            }
            StatusLevel::Error => {
                error!("{}", message);
            }
        }
    }
}

/// Keeps every status line in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    lines: Vec<(StatusLevel, String)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[(StatusLevel, String)] {
        &self.lines
    }

    /// The most recent line, i.e. what a single-line status label would show.
    pub fn last(&self) -> Option<&str> {
        self.lines.last().map(|(_, line)| line.as_str())
    }

    pub fn count(&self, level: StatusLevel) -> usize {
        self.lines.iter().filter(|(l, _)| *l == level).count()
    }
}

impl StatusSink for MemorySink {
    fn status(&mut self, level: StatusLevel, message: &str) {
        self.lines.push((level, message.to_string()));
    }
}
