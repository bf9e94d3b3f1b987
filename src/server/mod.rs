use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use crate::core::TripPlanner;
use crate::error::PlannerError;
use crate::types::{PlanResponse, TripRequest};

impl IntoResponse for PlannerError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_error_payload())).into_response()
    }
}

pub fn build_router(planner: Arc<TripPlanner>) -> Router {
    Router::new()
        .route("/generate", post(generate))
        .layer(CorsLayer::permissive())
        .with_state(planner)
}

pub async fn run_serve(planner: Arc<TripPlanner>, bind: &str, port: u16) -> Result<()> {
    if !planner.has_api_key() {
        error!("GOOGLE_API_KEY missing; /generate will answer 500 until it is set");
    }

    let app = build_router(planner);
    let addr: SocketAddr = format!("{bind}:{port}").parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("trip planner listening on http://{addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("trip planner shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}

async fn generate(
    State(planner): State<Arc<TripPlanner>>,
    payload: std::result::Result<Json<TripRequest>, JsonRejection>,
) -> std::result::Result<Json<PlanResponse>, PlannerError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(error = %rejection, "rejected /generate body");
        PlannerError::MalformedRequest(rejection.body_text())
    })?;

    match planner.plan(&request).await {
        Ok(plan) => Ok(Json(PlanResponse { plan })),
        Err(err) => {
            info!(code = err.error_code(), status = %err.status_code(), "/generate failed");
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RetryPolicy;
    use crate::error::Result as PlanResult;
    use crate::services::{GenerationClient, GenerationReply};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tower::ServiceExt;

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    #[derive(Debug)]
    struct FixedClient {
        outcome: PlanResult<GenerationReply>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl GenerationClient for FixedClient {
        async fn generate(&self, _api_key: &str, _prompt: &str) -> PlanResult<GenerationReply> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    fn fixed(outcome: PlanResult<GenerationReply>) -> Arc<FixedClient> {
        Arc::new(FixedClient {
            outcome,
            calls: AtomicUsize::new(0),
        })
    }

    fn planner_with(client: &Arc<FixedClient>, api_key: Option<&str>) -> Arc<TripPlanner> {
        Arc::new(
            TripPlanner::new(api_key.map(String::from), client.clone())
                .with_retry_policy(RetryPolicy::new(3, Duration::ZERO)),
        )
    }

    async fn post_generate(planner: Arc<TripPlanner>, body: &str) -> (StatusCode, Value) {
        let response = build_router(planner)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/generate")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 1_048_576)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn goa_trip() -> String {
        json!({
            "fromCity": "Delhi",
            "destination": "Goa",
            "budget": 15000,
            "days": 3,
            "groupType": "friends",
            "transport": "train"
        })
        .to_string()
    }

    // -----------------------------------------------------------------------
    // Tests
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn test_generate_returns_clean_plan() {
        let client = fixed(Ok(GenerationReply::text("# Goa\n**Day 1**: beach\n\n\n\nDay 2")));

        let (status, body) = post_generate(planner_with(&client, Some("key")), &goa_trip()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["plan"], "Goa\nDay 1: beach\n\nDay 2");
    }

    #[tokio::test]
    async fn test_missing_fields_is_400() {
        let client = fixed(Ok(GenerationReply::text("unused")));
        let body = json!({ "fromCity": "Delhi", "destination": "Goa", "budget": 100 }).to_string();

        let (status, body) = post_generate(planner_with(&client, Some("key")), &body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing required fields.");
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_key_is_500() {
        let client = fixed(Ok(GenerationReply::text("unused")));

        let (status, body) = post_generate(planner_with(&client, None), &goa_trip()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "API key missing on server.");
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_safety_block_is_400() {
        let client = fixed(Ok(GenerationReply::blocked()));

        let (status, body) = post_generate(planner_with(&client, Some("key")), &goa_trip()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Blocked by safety filter.");
    }

    #[tokio::test]
    async fn test_empty_reply_is_500() {
        let client = fixed(Ok(GenerationReply::default()));

        let (status, body) = post_generate(planner_with(&client, Some("key")), &goa_trip()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Model returned empty response.");
    }

    #[tokio::test]
    async fn test_provider_errors_are_500() {
        let client = fixed(Err(PlannerError::Service(Some("quota exceeded".into()))));
        let (status, body) = post_generate(planner_with(&client, Some("key")), &goa_trip()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "quota exceeded");

        let client = fixed(Err(PlannerError::TransientProvider { message: None }));
        let (status, body) = post_generate(planner_with(&client, Some("key")), &goa_trip()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Server error.");
        assert_eq!(client.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_malformed_body_is_400() {
        let client = fixed(Ok(GenerationReply::text("unused")));

        let (status, body) = post_generate(planner_with(&client, Some("key")), "{not json").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid request body.");
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }
}
