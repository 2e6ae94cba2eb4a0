use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};

use crate::config::Settings;
use crate::error::AppError;
use crate::handlers::http::{self, ApiState};
use crate::service::extraction_service::EventExtractor;
use crate::service::openai_service::OpenAIService;

/// Builds the shared handler state. The completion client is created once here.
pub fn build_state(settings: &Settings) -> Result<ApiState, AppError> {
    let extractor = match OpenAIService::from_settings(settings)? {
        Some(service) => Some(EventExtractor::new(Arc::new(service), settings.dialect)),
        None => {
            warn!("OPENAI_API_KEY is not set; process-text requests will fail with 500");
            None
        }
    };
    Ok(ApiState::new(extractor))
}

pub fn bind_address(settings: &Settings) -> Result<SocketAddr, AppError> {
    format!("{}:{}", settings.bind_addr, settings.port)
        .parse::<SocketAddr>()
        .map_err(|e| AppError::Config(format!("invalid bind address: {e}")))
}

pub async fn run_api(settings: Settings) -> Result<(), AppError> {
    let addr = bind_address(&settings)?;
    let state = build_state(&settings)?;

    info!(%addr, dialect = %settings.dialect, model = %settings.model, "starting http server");
    warp::serve(http::routes(state)).run(addr).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_without_key_has_no_extractor() {
        let state = build_state(&Settings::default()).unwrap();
        assert!(state.extractor.is_none());
    }

    #[test]
    fn state_with_key_uses_configured_dialect() {
        let settings = Settings {
            openai_api_key: Some("sk-test".to_string()),
            dialect: crate::parser::Dialect::Csv,
            ..Settings::default()
        };
        let state = build_state(&settings).unwrap();
        assert_eq!(
            state.extractor.map(|e| e.dialect()),
            Some(crate::parser::Dialect::Csv)
        );
    }

    #[test]
    fn bind_address_combines_host_and_port() {
        let addr = bind_address(&Settings::default()).unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:3001");

        let bad = Settings {
            bind_addr: "not a host".to_string(),
            ..Settings::default()
        };
        assert!(bind_address(&bad).is_err());
    }
}
