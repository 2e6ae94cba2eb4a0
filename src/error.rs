use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("no text provided")]
    EmptyInput,

    /// The completion API answered, but not with something we can use.
    #[error("completion error: {0}")]
    Completion(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("prompt error: {0}")]
    Prompt(#[from] inquire::InquireError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = AppError::Config("bad port".into());
        assert_eq!(format!("{err}"), "config error: bad port");
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "reply.txt missing");
        let err = AppError::from(io_err);
        let display = format!("{err}");
        assert!(display.contains("io error"), "got: {display}");
        assert!(display.contains("reply.txt missing"), "got: {display}");
    }
}
