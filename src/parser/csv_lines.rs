use crate::models::event::EventRecord;
use crate::parser::normalize::{normalize_field, trim_text};
use crate::parser::ParseOutcome;

pub const CSV_HEADER: &str = "time,title,location";

/// Splits `time,title,location` lines into undated records.
///
/// A leading header row is skipped. Rows with fewer than three cells or with any
/// of the three cells blank are dropped and counted; cells past the third are
/// ignored.
pub fn parse_csv_lines(text: &str) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();
    let mut lines = trim_text(text).lines().peekable();

    let has_header = lines
        .peek()
        .is_some_and(|first| first.to_lowercase().contains(CSV_HEADER));
    if has_header {
        lines.next();
    }

    for line in lines {
        let trimmed = trim_text(line);
        if trimmed.is_empty() {
            continue;
        }
        match split_row(trimmed) {
            Some(record) => outcome.events.push(record),
            None => outcome.skipped_lines += 1,
        }
    }

    outcome
}

fn split_row(line: &str) -> Option<EventRecord> {
    let mut cells = line.split(',').map(normalize_field);
    let (Some(time), Some(title), Some(location)) = (cells.next(), cells.next(), cells.next())
    else {
        return None;
    };
    if time.is_empty() || title.is_empty() || location.is_empty() {
        return None;
    }
    Some(EventRecord {
        date: None,
        time: Some(time),
        title: Some(title),
        location: Some(location),
    })
}
