use std::sync::Arc;

use tracing::{info, warn};

use crate::error::AppError;
use crate::parser::{self, Dialect, ParseOutcome};
use crate::service::openai_service::CompletionClient;

/// Prompt-and-parse round trip: calendar text in, ordered records out.
#[derive(Clone)]
pub struct EventExtractor {
    client: Arc<dyn CompletionClient>,
    dialect: Dialect,
}

impl EventExtractor {
    pub fn new(client: Arc<dyn CompletionClient>, dialect: Dialect) -> Self {
        Self { client, dialect }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub async fn extract(&self, text: &str) -> Result<ParseOutcome, AppError> {
        if text.trim().is_empty() {
            return Err(AppError::EmptyInput);
        }

        let reply = self.client.generate_events_reply(text, self.dialect).await?;
        let outcome = parser::parse_events_with_report(&reply, self.dialect);

        info!(
            dialect = %self.dialect,
            events = outcome.events.len(),
            skipped_lines = outcome.skipped_lines,
            "parsed completion reply"
        );
        if outcome.events.is_empty() {
            // Either no events in the text or a reply in some other format; both look the same here.
            warn!(dialect = %self.dialect, "completion reply produced no events");
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FakeCompletion {
        response: Result<String, String>,
        seen: Mutex<Vec<(String, Dialect)>>,
    }

    impl FakeCompletion {
        fn replying(body: &str) -> Self {
            Self {
                response: Ok(body.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CompletionClient for FakeCompletion {
        async fn generate_events_reply(&self, text: &str, dialect: Dialect) -> Result<String, AppError> {
            self.seen.lock().unwrap().push((text.to_string(), dialect));
            match &self.response {
                Ok(body) => Ok(body.clone()),
                Err(err) => Err(AppError::Completion(err.clone())),
            }
        }
    }

    #[tokio::test]
    async fn extract_parses_reply_with_configured_dialect() {
        let fake = Arc::new(FakeCompletion::replying("time,title,location\n3pm,Gala,Metzger\n"));
        let extractor = EventExtractor::new(fake.clone(), Dialect::Csv);

        let outcome = extractor.extract("GALA 3PM METZGR").await.unwrap();
        assert_eq!(outcome.events.len(), 1);
        assert_eq!(outcome.events[0].location.as_deref(), Some("Metzger"));

        let seen = fake.seen.lock().unwrap();
        assert_eq!(seen.as_slice(), &[("GALA 3PM METZGR".to_string(), Dialect::Csv)]);
    }

    #[tokio::test]
    async fn blank_text_never_reaches_the_client() {
        let fake = Arc::new(FakeCompletion::replying("Date: 5/1"));
        let extractor = EventExtractor::new(fake.clone(), Dialect::Block);

        let err = extractor.extract("   \n").await.unwrap_err();
        assert!(matches!(err, AppError::EmptyInput));
        assert!(fake.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn client_errors_propagate() {
        let fake = Arc::new(FakeCompletion {
            response: Err("status 429".to_string()),
            seen: Mutex::new(Vec::new()),
        });
        let extractor = EventExtractor::new(fake, Dialect::Block);

        let err = extractor.extract("Gala tomorrow").await.unwrap_err();
        assert!(format!("{err}").contains("status 429"));
    }

    #[tokio::test]
    async fn unrecognized_reply_is_an_empty_success() {
        let fake = Arc::new(FakeCompletion::replying("I could not find any events."));
        let extractor = EventExtractor::new(fake, Dialect::Block);

        let outcome = extractor.extract("nothing here").await.unwrap();
        assert!(outcome.events.is_empty());
        assert_eq!(outcome.skipped_lines, 1);
    }
}
