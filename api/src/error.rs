use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::error::Category;
use std::path::PathBuf;
use thiserror::Error;

pub type DecodeError = serde_path_to_error::Error<serde_json::Error>;

/// Errors surfaced to HTTP clients. All of them are schema validation
/// failures and answer 422.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Field required")]
    MissingBody,

    #[error("Input should be a valid dictionary or object to extract fields from")]
    NotJson,

    #[error("{}", .0.inner())]
    InvalidPayload(#[from] DecodeError),

    #[error("{0}")]
    InvalidJson(serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        StatusCode::UNPROCESSABLE_ENTITY
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::MissingBody => "missing",
            ApiError::NotJson => "model_attributes_type",
            ApiError::InvalidPayload(err) => decode_kind(err),
            ApiError::InvalidJson(_) => "json_invalid",
        }
    }

    /// `["body", <field path>...]`
    pub fn loc(&self) -> Vec<String> {
        let mut loc = vec!["body".to_string()];
        if let ApiError::InvalidPayload(err) = self {
            loc.extend(err.path().iter().map(|segment| segment.to_string()));
            if let Some(field) = missing_field(err) {
                loc.push(field.to_string());
            }
        }
        loc
    }
}

fn decode_kind(err: &DecodeError) -> &'static str {
    match err.inner().classify() {
        Category::Syntax | Category::Eof | Category::Io => "json_invalid",
        Category::Data => {
            let message = err.inner().to_string();
            if missing_field(err).is_some() {
                "missing"
            } else if err.path().iter().next().is_none() {
                "model_attributes_type"
            } else if message.contains("expected a string") {
                "string_type"
            } else if message.contains("expected an integer") {
                "int_parsing"
            } else if message.contains("expected a number") {
                "float_parsing"
            } else {
                "value_error"
            }
        }
    }
}

fn missing_field(err: &DecodeError) -> Option<String> {
    let message = err.inner().to_string();
    let rest = message.strip_prefix("missing field `")?;
    rest.split_once('`').map(|(field, _)| field.to_string())
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(status = status.as_u16(), kind = self.kind(), "rejected request: {}", self);

        let body = serde_json::json!({
            "detail": [{
                "loc": self.loc(),
                "msg": self.to_string(),
                "type": self.kind(),
            }]
        });
        (status, Json(body)).into_response()
    }
}

/// Errors that stop the server from starting or keep it from serving.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

pub type Result<T> = std::result::Result<T, ServerError>;
