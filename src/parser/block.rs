use crate::models::event::EventRecord;
use crate::parser::normalize::{normalize_field, trim_text};
use crate::parser::ParseOutcome;

const DATE_LABEL: &str = "Date:";
const TIME_LABEL: &str = "Time:";
const TITLE_LABEL: &str = "Title:";
const LOCATION_LABEL: &str = "Location:";

/// Scans `Key: value` blocks into records.
///
/// A blank line or a new `Date:` line closes the current block. Labels match
/// case-sensitively, colon included. Unrecognized lines are skipped and counted.
pub fn parse_block(text: &str) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();
    let mut current = EventRecord::default();

    for line in text.lines() {
        let trimmed = trim_text(line);
        if trimmed.is_empty() {
            flush(&mut current, &mut outcome.events);
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix(DATE_LABEL) {
            flush(&mut current, &mut outcome.events);
            current.date = Some(normalize_field(rest));
        } else if let Some(rest) = trimmed.strip_prefix(TIME_LABEL) {
            current.time = Some(normalize_field(rest));
        } else if let Some(rest) = trimmed.strip_prefix(TITLE_LABEL) {
            current.title = Some(normalize_field(rest));
        } else if let Some(rest) = trimmed.strip_prefix(LOCATION_LABEL) {
            current.location = Some(normalize_field(rest));
        } else {
            outcome.skipped_lines += 1;
        }
    }

    flush(&mut current, &mut outcome.events);
    outcome
}

fn flush(current: &mut EventRecord, events: &mut Vec<EventRecord>) {
    if !current.is_empty() {
        events.push(std::mem::take(current));
    }
}
