//! API router.
//!
//! Returns a composable `Router`. The Extension layer is outermost so
//! the identity middleware can read `ApiContext` (and downstream
//! handlers get `AuthContext` injected by the middleware).

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the API router with all routes under `/api/`.
pub fn api_router(core: Arc<CoreState>) -> Router {
    let ctx = ApiContext::new(core);

    Router::new()
        .route("/api/health", get(endpoints::health::check))
        .route("/api/request", post(endpoints::request::submit))
        .with_state(ctx.clone())
        .layer(axum::middleware::from_fn(
            middleware::identity::resolve_identity,
        ))
        .layer(axum::Extension(ctx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::geocode::MockGeocoder;
    use crate::models::{BloodType, DonorProfile};
    use crate::push::MockPushSender;
    use crate::store::MemoryStore;

    fn donor(id: &str, blood_type: BloodType) -> DonorProfile {
        DonorProfile {
            id: id.to_string(),
            blood_type,
            is_donor: true,
            fcm_token: Some(format!("token-{id}")),
            location: Some("12.9716,77.5946".to_string()),
            platform: None,
            device_type: None,
        }
    }

    fn test_state(donors: Vec<DonorProfile>, geocoder: MockGeocoder) -> Arc<CoreState> {
        Arc::new(CoreState::with_collaborators(
            Config::default(),
            Arc::new(MemoryStore::with_donors(donors)),
            Arc::new(geocoder),
            Arc::new(MockPushSender::new()),
        ))
    }

    fn post_request(uri: &str, user_id: Option<&str>, body: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json");
        if let Some(id) = user_id {
            builder = builder.header("x-user-id", id);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn response_json(response: axum::http::Response<Body>) -> serde_json::Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    const VALID_BODY: &str = r#"{
        "bloodGroup": "A+",
        "units": 2,
        "hospital": "City Hospital",
        "location": "12.9716,77.5946"
    }"#;

    #[tokio::test]
    async fn health_response_shape() {
        let app = api_router(test_state(vec![], MockGeocoder::unreachable()));
        let req = Request::builder()
            .method("GET")
            .uri("/api/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["status"], "ok");
        assert!(json["version"].is_string());
        // Wire fields are camelCase across the whole surface.
        assert_eq!(json["radiusKm"], 50.0);
    }

    #[tokio::test]
    async fn submit_success_shape() {
        let state = test_state(
            vec![donor("d1", BloodType::ONeg)],
            MockGeocoder::unreachable(),
        );
        let app = api_router(state);

        let response = app
            .oneshot(post_request("/api/request", Some("requester"), VALID_BODY))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["notificationsSent"], 1);
        assert!(!json["requestId"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn submit_without_identity_returns_412() {
        let app = api_router(test_state(vec![], MockGeocoder::unreachable()));

        let response = app
            .oneshot(post_request("/api/request", None, VALID_BODY))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PRECONDITION_FAILED);

        let json = response_json(response).await;
        assert_eq!(json["error"]["code"], "FAILED_PRECONDITION");
    }

    #[tokio::test]
    async fn payload_user_id_satisfies_identity() {
        let app = api_router(test_state(vec![], MockGeocoder::unreachable()));

        let body = r#"{
            "bloodGroup": "A+",
            "hospital": "City Hospital",
            "location": "12.9716,77.5946",
            "userId": "payload-user"
        }"#;
        let response = app
            .oneshot(post_request("/api/request", None, body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["notificationsSent"], 0);
    }

    #[tokio::test]
    async fn missing_fields_listed_together() {
        let app = api_router(test_state(vec![], MockGeocoder::unreachable()));

        let response = app
            .oneshot(post_request(
                "/api/request",
                Some("u"),
                r#"{"bloodGroup": "A+"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = response_json(response).await;
        assert_eq!(json["error"]["code"], "INVALID_ARGUMENT");
        let message = json["error"]["message"].as_str().unwrap();
        assert!(message.contains("location"), "{message}");
        assert!(message.contains("hospital"), "{message}");
    }

    #[tokio::test]
    async fn unresolvable_address_returns_422() {
        let app = api_router(test_state(vec![], MockGeocoder::empty()));

        let body = r#"{
            "bloodGroup": "A+",
            "hospital": "City Hospital",
            "location": "Nowhere In Particular"
        }"#;
        let response = app
            .oneshot(post_request("/api/request", Some("u"), body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let json = response_json(response).await;
        assert_eq!(json["error"]["code"], "GEOCODING_FAILED");
    }

    #[tokio::test]
    async fn unknown_blood_group_returns_400() {
        let app = api_router(test_state(vec![], MockGeocoder::unreachable()));

        let body = r#"{
            "bloodGroup": "Z+",
            "hospital": "City Hospital",
            "location": "12.9716,77.5946"
        }"#;
        let response = app
            .oneshot(post_request("/api/request", Some("u"), body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_json_is_client_error() {
        let app = api_router(test_state(vec![], MockGeocoder::unreachable()));

        let response = app
            .oneshot(post_request("/api/request", Some("u"), "{not json"))
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let app = api_router(test_state(vec![], MockGeocoder::unreachable()));

        let req = Request::builder()
            .method("GET")
            .uri("/api/nonexistent")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn blank_identity_header_is_ignored() {
        let app = api_router(test_state(vec![], MockGeocoder::unreachable()));

        let response = app
            .oneshot(post_request("/api/request", Some("   "), VALID_BODY))
            .await
            .unwrap();
        // Whitespace-only header is treated as unauthenticated.
        assert_eq!(response.status(), StatusCode::PRECONDITION_FAILED);
    }
}
