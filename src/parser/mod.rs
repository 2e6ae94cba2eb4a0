pub mod block;
pub mod csv_lines;
pub mod normalize;
pub mod render;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::event::EventRecord;

pub use block::parse_block;
pub use csv_lines::parse_csv_lines;
pub use normalize::normalize_field;
pub use render::render_events;

/// Which textual shape the completion reply was asked to use.
///
/// Chosen by the caller together with the prompt; never guessed from the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// `Date:`/`Time:`/`Title:`/`Location:` blocks separated by blank lines.
    #[default]
    Block,
    /// `time,title,location` lines, optionally under a header row.
    Csv,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Block => write!(f, "block"),
            Dialect::Csv => write!(f, "csv"),
        }
    }
}

impl FromStr for Dialect {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "block" => Ok(Dialect::Block),
            "csv" => Ok(Dialect::Csv),
            other => Err(AppError::Config(format!("unknown dialect '{other}'"))),
        }
    }
}

/// Records in source order plus the number of non-blank lines that were dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    pub events: Vec<EventRecord>,
    pub skipped_lines: usize,
}

pub fn parse_events(text: &str, dialect: Dialect) -> Vec<EventRecord> {
    parse_events_with_report(text, dialect).events
}

pub fn parse_events_with_report(text: &str, dialect: Dialect) -> ParseOutcome {
    match dialect {
        Dialect::Block => parse_block(text),
        Dialect::Csv => parse_csv_lines(text),
    }
}
