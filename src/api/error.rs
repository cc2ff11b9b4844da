use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::SearchResponse;
use crate::constants::messages;
use crate::services::SearchError;

#[derive(Debug)]
pub enum ApiError {
    ValidationError(String),

    RateLimited { caller: String },

    ConfigurationError(String),

    ParseError(String),

    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Detail stays in the logs; callers only get the fixed messages.
        let (status, body) = match &self {
            ApiError::ValidationError(msg) => {
                tracing::debug!("Rejected search request: {}", msg);
                (StatusCode::BAD_REQUEST, SearchResponse::empty())
            }
            ApiError::RateLimited { caller } => {
                tracing::warn!(caller = %caller, "Rate limit exceeded");
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    SearchResponse::error(messages::RATE_LIMITED),
                )
            }
            ApiError::ConfigurationError(msg) => {
                tracing::error!("Configuration error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    SearchResponse::error(messages::CONFIGURATION),
                )
            }
            ApiError::ParseError(msg) => {
                tracing::error!("Failed to parse search results: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    SearchResponse::error(messages::PARSE_FAILED),
                )
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Search API error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    SearchResponse::error(messages::PROCESSING_FAILED),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::EmptyQuery => ApiError::ValidationError(err.to_string()),
            SearchError::MissingCredentials => ApiError::ConfigurationError(err.to_string()),
            SearchError::MalformedResponse(e) => ApiError::ParseError(e.to_string()),
            SearchError::Upstream(e) => ApiError::InternalError(format!("{e:#}")),
        }
    }
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::ValidationError(msg.into())
    }

    pub fn rate_limited(caller: impl Into<String>) -> Self {
        ApiError::RateLimited {
            caller: caller.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        ApiError::InternalError(msg.into())
    }
}
