use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::{header, HeaderMap};

use crate::app::AppState;
use crate::error::ApiError;
use crate::schema::{Greeting, PredictRequest, PredictResponse};

pub const GREETING: &str = "🌾 Crop Supply-Demand Balance API running!";

pub async fn root() -> Json<Greeting> {
    Json(Greeting {
        message: GREETING.to_string(),
    })
}

pub async fn predict(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<PredictResponse>, ApiError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .map(|value| value.to_str().unwrap_or_default());
    let request = PredictRequest::from_body(content_type, &body)?;
    tracing::debug!(
        crop = %request.crop,
        season = %request.season,
        year = request.year,
        "predict request"
    );

    Ok(Json(state.outlook.assess(&request)))
}
