use std::convert::Infallible;

use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

use crate::error::AppError;
use crate::models::event::EventRecord;
use crate::service::export_service;
use crate::service::extraction_service::EventExtractor;

const MAX_BODY_BYTES: u64 = 256 * 1024;

#[derive(Debug, Deserialize)]
pub struct ProcessTextRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProcessTextQuery {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    fn new(status: StatusCode, error: &str, details: Option<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: error.to_string(),
                details,
            },
        }
    }
}

impl Reply for ApiError {
    fn into_response(self) -> Response {
        warp::reply::with_status(warp::reply::json(&self.body), self.status).into_response()
    }
}

/// What the handler shares across requests. `extractor` is `None` when no API key is set.
#[derive(Clone)]
pub struct ApiState {
    pub extractor: Option<EventExtractor>,
}

impl ApiState {
    pub fn new(extractor: Option<EventExtractor>) -> Self {
        Self { extractor }
    }
}

/// Core of `POST /api/process-text`, independent of warp's filter plumbing.
pub async fn process_text(
    state: &ApiState,
    request: ProcessTextRequest,
) -> Result<Vec<EventRecord>, ApiError> {
    let text = match request.text {
        Some(text) if !text.trim().is_empty() => text,
        _ => return Err(ApiError::new(StatusCode::BAD_REQUEST, "No text provided", None)),
    };

    let Some(extractor) = &state.extractor else {
        return Err(ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "OpenAI API key not configured",
            None,
        ));
    };

    extractor
        .extract(&text)
        .await
        .map(|outcome| outcome.events)
        .map_err(|e| {
            error!(error = %e, "processing failed");
            ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to process text",
                Some(e.to_string()),
            )
        })
}

/// Turns parsed records into the response body for the requested format.
pub fn render_success(events: &[EventRecord], format: OutputFormat) -> Result<Response, AppError> {
    match format {
        OutputFormat::Json => Ok(warp::reply::json(&events).into_response()),
        OutputFormat::Csv => {
            let body = export_service::to_csv_attachment(events)?;
            let reply = warp::reply::with_header(body, "Content-Type", "text/csv");
            let reply = warp::reply::with_header(
                reply,
                "Content-Disposition",
                format!("attachment; filename={}", export_service::CSV_ATTACHMENT_NAME),
            );
            Ok(reply.into_response())
        }
    }
}

async fn handle_process_text(
    query: ProcessTextQuery,
    request: ProcessTextRequest,
    state: ApiState,
) -> Result<Response, Infallible> {
    let request_id = Uuid::new_v4();
    info!(%request_id, format = ?query.format, "process-text request");

    let events = match process_text(&state, request).await {
        Ok(events) => events,
        Err(api_error) => {
            info!(%request_id, status = %api_error.status, error = %api_error.body.error, "request rejected");
            return Ok(api_error.into_response());
        }
    };

    info!(%request_id, events = events.len(), "request completed");
    match render_success(&events, query.format) {
        Ok(response) => Ok(response),
        Err(e) => Ok(ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to process text",
            Some(e.to_string()),
        )
        .into_response()),
    }
}

pub fn routes(state: ApiState) -> impl Filter<Extract = (Response,), Error = Infallible> + Clone {
    let with_state = warp::any().map(move || state.clone());

    warp::path!("api" / "process-text")
        .and(warp::post())
        .and(warp::query::<ProcessTextQuery>())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json::<ProcessTextRequest>())
        .and(with_state)
        .and_then(handle_process_text)
        .recover(handle_rejection)
        .unify()
}

/// Maps warp rejections onto the same `{ error, details }` body the handler uses.
pub async fn handle_rejection(err: Rejection) -> Result<Response, Infallible> {
    let api_error = if err.is_not_found() {
        ApiError::new(StatusCode::NOT_FOUND, "Not found", None)
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        ApiError::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed", None)
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        ApiError::new(StatusCode::BAD_REQUEST, "Invalid request body", Some(e.to_string()))
    } else if let Some(e) = err.find::<warp::reject::InvalidQuery>() {
        ApiError::new(StatusCode::BAD_REQUEST, "Invalid query", Some(e.to_string()))
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        ApiError::new(StatusCode::LENGTH_REQUIRED, "Content-Length required", None)
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        ApiError::new(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large", None)
    } else {
        error!(rejection = ?err, "unhandled rejection");
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", None)
    };
    Ok(api_error.into_response())
}
