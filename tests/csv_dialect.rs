use calendarStories::models::event::EventRecord;
use calendarStories::parser::{parse_events, parse_events_with_report, render_events, Dialect};

#[test]
fn header_row_is_skipped() {
    let events = parse_events("time,title,location\n3pm,Gala,Metzger\n", Dialect::Csv);
    assert_eq!(events, vec![EventRecord::undated("3pm", "Gala", "Metzger")]);
}

#[test]
fn input_without_header_gives_same_record() {
    let events = parse_events("3pm,Gala,Metzger\n", Dialect::Csv);
    assert_eq!(events, vec![EventRecord::undated("3pm", "Gala", "Metzger")]);
}

#[test]
fn malformed_rows_are_dropped() {
    let outcome = parse_events_with_report("3pm,Gala,Metzger\n,MissingTime,\n", Dialect::Csv);
    assert_eq!(outcome.events, vec![EventRecord::undated("3pm", "Gala", "Metzger")]);
    assert_eq!(outcome.skipped_lines, 1);
}

#[test]
fn records_never_carry_a_date() {
    let events = parse_events("3pm,Gala,Metzger\n4pm,Fair,Business\n", Dialect::Csv);
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| e.date.is_none()));
}

#[test]
fn empty_and_whitespace_input_yield_nothing() {
    assert!(parse_events("", Dialect::Csv).is_empty());
    assert!(parse_events("  \n \n", Dialect::Csv).is_empty());
}

#[test]
fn rendering_then_parsing_is_stable() {
    let events = vec![
        EventRecord::undated("3pm", "Spring Gala", "Metzger Lawn"),
        EventRecord::undated("4pm", "Career Fair", "Business Building"),
    ];
    let text = render_events(&events, Dialect::Csv);
    assert_eq!(parse_events(&text, Dialect::Csv), events);
}
