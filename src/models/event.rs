use serde::{Deserialize, Serialize};

/// One calendar event as restated by the completion API.
///
/// Every field is display text. `None` means the field never appeared in the
/// source, `Some("")` means it appeared with a blank value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(rename = "Date", default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(rename = "Time", default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(rename = "Title", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "Location", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl EventRecord {
    pub fn new(date: &str, time: &str, title: &str, location: &str) -> Self {
        Self {
            date: Some(date.to_string()),
            time: Some(time.to_string()),
            title: Some(title.to_string()),
            location: Some(location.to_string()),
        }
    }

    /// A record from the CSV dialect, which carries no date column.
    pub fn undated(time: &str, title: &str, location: &str) -> Self {
        Self {
            date: None,
            time: Some(time.to_string()),
            title: Some(title.to_string()),
            location: Some(location.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.time.is_none() && self.title.is_none() && self.location.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_is_empty() {
        assert!(EventRecord::default().is_empty());
    }

    #[test]
    fn blank_field_counts_as_present() {
        let record = EventRecord {
            date: Some(String::new()),
            ..Default::default()
        };
        assert!(!record.is_empty());
    }

    #[test]
    fn serializes_with_capitalized_keys_and_skips_absent_fields() {
        let record = EventRecord::undated("3pm", "Gala", "Metzger");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"Time":"3pm","Title":"Gala","Location":"Metzger"}"#);
    }

    #[test]
    fn deserializes_partial_objects() {
        let record: EventRecord = serde_json::from_str(r#"{"Date":"5/1","Title":"Gala"}"#).unwrap();
        assert_eq!(record.date.as_deref(), Some("5/1"));
        assert_eq!(record.title.as_deref(), Some("Gala"));
        assert!(record.time.is_none());
        assert!(record.location.is_none());
    }
}
