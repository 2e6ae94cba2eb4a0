use crate::models::event::EventRecord;
use crate::parser::csv_lines::CSV_HEADER;
use crate::parser::Dialect;

/// Writes records back out in the canonical text of `dialect`.
///
/// Block output lists only present fields. CSV output has no date column and
/// writes absent fields as empty cells, so such rows do not survive a re-parse.
pub fn render_events(events: &[EventRecord], dialect: Dialect) -> String {
    match dialect {
        Dialect::Block => render_block(events),
        Dialect::Csv => render_csv(events),
    }
}

fn render_block(events: &[EventRecord]) -> String {
    let blocks: Vec<String> = events
        .iter()
        .map(|event| {
            let fields = [
                ("Date", &event.date),
                ("Time", &event.time),
                ("Title", &event.title),
                ("Location", &event.location),
            ];
            fields
                .into_iter()
                .filter_map(|(label, value)| value.as_ref().map(|v| format!("{label}: {v}")))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect();

    if blocks.is_empty() {
        return String::new();
    }
    format!("{}\n", blocks.join("\n\n"))
}

fn render_csv(events: &[EventRecord]) -> String {
    let mut out = format!("{CSV_HEADER}\n");
    for event in events {
        out.push_str(&format!(
            "{},{},{}\n",
            event.time.as_deref().unwrap_or_default(),
            event.title.as_deref().unwrap_or_default(),
            event.location.as_deref().unwrap_or_default(),
        ));
    }
    out
}
