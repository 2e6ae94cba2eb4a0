use serde::Deserialize;

use crate::error::AppError;
use crate::models::event::EventRecord;

pub const CSV_ATTACHMENT_NAME: &str = "calendar-events.csv";
const ATTACHMENT_COLUMNS: [&str; 4] = ["Date", "Time", "Title", "Location"];

pub fn to_json(events: &[EventRecord]) -> Result<String, AppError> {
    Ok(serde_json::to_string(events)?)
}

/// Spreadsheet-friendly export with a `Date,Time,Title,Location` header.
pub fn to_csv_attachment(events: &[EventRecord]) -> Result<String, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(ATTACHMENT_COLUMNS)?;
    for event in events {
        writer.write_record([
            event.date.as_deref().unwrap_or_default(),
            event.time.as_deref().unwrap_or_default(),
            event.title.as_deref().unwrap_or_default(),
            event.location.as_deref().unwrap_or_default(),
        ])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Io(e.into_error()))?;
    into_utf8(bytes)
}

fn into_utf8(bytes: Vec<u8>) -> Result<String, AppError> {
    String::from_utf8(bytes)
        .map_err(|e| AppError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

#[derive(Debug, Deserialize)]
struct AttachmentRow {
    #[serde(rename = "Date", default)]
    date: String,
    #[serde(rename = "Time", default)]
    time: String,
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Location", default)]
    location: String,
}

/// Reads an exported (or hand-made) attachment back; rows without a date are dropped.
pub fn from_csv_attachment(text: &str) -> Result<Vec<EventRecord>, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut events = Vec::new();
    for row in reader.deserialize::<AttachmentRow>() {
        let row = row?;
        if row.date.is_empty() {
            continue;
        }
        events.push(EventRecord::new(&row.date, &row.time, &row.title, &row.location));
    }
    Ok(events)
}
