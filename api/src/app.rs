use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handler::{predict, root};
use crate::model::MarketOutlook;

#[derive(Clone, Default)]
pub struct AppState {
    pub outlook: MarketOutlook,
}

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/predict", post(predict))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Any origin, method and header, with credentials. A literal `*` is not
/// allowed alongside credentials, so the request's values are echoed back.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
