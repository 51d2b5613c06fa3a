use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use crop_balance_api::{create_router, AppState, MarketOutlook};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    create_router(AppState::default())
}

fn sample_payload() -> Value {
    json!({
        "year": 2024,
        "area": 10.0,
        "production": 1000.0,
        "yield_per_ha": 5.0,
        "fertilizer": 50.0,
        "irrigation": 20.0,
        "crop": "Rice",
        "season": "kharif"
    })
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn test_predict_reference_example() {
    let (status, body) = send(app(), post_json("/predict", &sample_payload())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "prediction": "Based on your Rice crop with 10.0 acres, the predicted market outlook is positive!",
            "probability": 0.85
        })
    );
}

#[tokio::test]
async fn test_prediction_embeds_crop_and_area() {
    let cases = [("Wheat", 2.5, "2.5"), ("Sugarcane", 42.0, "42.0"), ("ragi", 0.75, "0.75")];

    for (crop, area, area_text) in cases {
        let mut payload = sample_payload();
        payload["crop"] = json!(crop);
        payload["area"] = json!(area);

        let (status, body) = send(app(), post_json("/predict", &payload)).await;
        assert_eq!(status, StatusCode::OK);

        let prediction = body["prediction"].as_str().unwrap();
        assert!(prediction.contains(crop), "{prediction}");
        assert!(prediction.contains(&format!("with {area_text} acres")), "{prediction}");
        assert_eq!(body["probability"], json!(0.85));
    }
}

#[tokio::test]
async fn test_integer_area_is_printed_as_float() {
    let mut payload = sample_payload();
    payload["area"] = json!(7);

    let (status, body) = send(app(), post_json("/predict", &payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["prediction"].as_str().unwrap().contains("with 7.0 acres"));
}

#[tokio::test]
async fn test_predict_without_probability() {
    let app = create_router(AppState {
        outlook: MarketOutlook::new(None),
    });

    let (status, body) = send(app, post_json("/predict", &sample_payload())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["probability"], Value::Null);
}

#[tokio::test]
async fn test_root_is_static() {
    for uri in ["/", "/?crop=Rice", "/?verbose=true&x=1"] {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let (status, body) = send(app(), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"message": "🌾 Crop Supply-Demand Balance API running!"})
        );
    }
}

#[tokio::test]
async fn test_boolean_area_coerces_to_one() {
    let mut payload = sample_payload();
    payload["area"] = json!(true);

    let (status, body) = send(app(), post_json("/predict", &payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["prediction"].as_str().unwrap().contains("with 1.0 acres"));
}

#[tokio::test]
async fn test_non_numeric_area_is_a_validation_error() {
    let mut payload = sample_payload();
    payload["area"] = json!("ten");

    let (status, body) = send(app(), post_json("/predict", &payload)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let detail = &body["detail"][0];
    assert_eq!(detail["loc"], json!(["body", "area"]));
    assert_eq!(detail["type"], "float_parsing");
    assert!(detail["msg"].as_str().unwrap().contains("ten"));
}

#[tokio::test]
async fn test_missing_field_is_a_validation_error() {
    let mut payload = sample_payload();
    payload.as_object_mut().unwrap().remove("crop");

    let (status, body) = send(app(), post_json("/predict", &payload)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let detail = &body["detail"][0];
    assert_eq!(detail["loc"], json!(["body", "crop"]));
    assert_eq!(detail["type"], "missing");
}

#[tokio::test]
async fn test_malformed_json_is_a_validation_error() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"year\": 2024,"))
        .unwrap();

    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "json_invalid");
}

#[tokio::test]
async fn test_body_without_content_type_is_read_as_json() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/predict")
        .body(Body::from(sample_payload().to_string()))
        .unwrap();

    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["prediction"],
        "Based on your Rice crop with 10.0 acres, the predicted market outlook is positive!"
    );
}

#[tokio::test]
async fn test_non_json_content_type_is_a_validation_error() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/predict")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(sample_payload().to_string()))
        .unwrap();

    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["loc"], json!(["body"]));
    assert_eq!(body["detail"][0]["type"], "model_attributes_type");
}

#[tokio::test]
async fn test_empty_body_is_missing() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "missing");
}

#[tokio::test]
async fn test_wrong_method_on_predict() {
    let request = Request::builder().uri("/predict").body(Body::empty()).unwrap();
    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
