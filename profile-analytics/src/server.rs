//! HTTP server for the engagement analytics service.

use axum::{
    routing::{get, post},
    Json, Router,
};
use std::net::SocketAddr;
use tracing::info;

use crate::engagement::engagement_rate;
use crate::types::{EngagementRequest, EngagementResponse};

/// Create the Axum application router with all routes.
pub fn create_app() -> Router {
    Router::new()
        .route("/engagement", post(compute_engagement))
        .route("/health", get(health_check))
}

/// Run the server on the specified address.
pub async fn run_server(app: Router, addr: SocketAddr) -> std::io::Result<()> {
    info!("Analytics service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "Analytics service is running"
}

/// Compute an engagement rate for the posted profile summary.
async fn compute_engagement(Json(request): Json<EngagementRequest>) -> Json<EngagementResponse> {
    let rate = engagement_rate(&request.platform, request.followers);

    info!(
        username = %request.username,
        platform = %request.platform,
        followers = request.followers,
        engagement_rate = format!("{:.2}", rate),
        "Computed engagement rate"
    );

    Json(EngagementResponse {
        engagement_rate: rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_engagement_endpoint_returns_rate() {
        let app = create_app();

        let request = Request::builder()
            .method("POST")
            .uri("/engagement")
            .header("content-type", "application/json")
            .body(Body::from(
                r#"{"platform":"TikTok","username":"dancer","followers":500}"#,
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let parsed: EngagementResponse = serde_json::from_slice(&body).unwrap();
        assert!(parsed.engagement_rate >= 0.0);
    }

    #[tokio::test]
    async fn test_engagement_endpoint_rejects_malformed_body() {
        let app = create_app();

        let request = Request::builder()
            .method("POST")
            .uri("/engagement")
            .header("content-type", "application/json")
            .body(Body::from("not-json"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert!(response.status().is_client_error());
    }
}
