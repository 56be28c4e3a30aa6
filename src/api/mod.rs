//! Metrics REST API
//!
//! HTTP backend serving deterministic synthetic series, built with Axum.
//!
//! # Endpoints
//!
//! ## Series
//! - `GET /api/total-revenue?from=YYYY-MM-DD&to=YYYY-MM-DD` - Daily revenue
//! - `GET /api/total-pax?from=YYYY-MM-DD&to=YYYY-MM-DD` - Daily passengers
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,no_run
//! use paxboard::api::{serve, AppState};
//! use paxboard::config::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::default();
//!     serve(AppState::new(config.clone()), &config).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod generator;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ServerConfig;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new().route("/:metric", get(routes::series::get_series));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the API server on the configured address
pub async fn serve(state: AppState, config: &ServerConfig) -> Result<(), ApiError> {
    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;
    serve_on(listener, state).await
}

/// Run the API on an already-bound listener until a shutdown signal
pub async fn serve_on(listener: TcpListener, state: AppState) -> Result<(), ApiError> {
    let router = build_router(state);

    tracing::info!("Metrics API listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Metrics API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricPoint;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        build_router(AppState::new(ServerConfig::default()))
    }

    async fn get(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let response = get(create_test_app(), "/health/live").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let response = get(create_test_app(), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_series_one_point_per_day() {
        let response = get(
            create_test_app(),
            "/api/total-revenue?from=2024-06-01&to=2024-06-07",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let points: Vec<MetricPoint> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(points.len(), 7);
        assert_eq!(points[0].timestamp.to_string(), "2024-06-01");
        assert_eq!(points[6].timestamp.to_string(), "2024-06-07");
        assert!(points.iter().all(|p| (20_000.0..25_000.0).contains(&p.value)));
    }

    #[tokio::test]
    async fn test_series_is_deterministic() {
        let uri = "/api/total-pax?from=2024-01-01&to=2024-01-31";
        let first = json_body(get(create_test_app(), uri).await).await;
        let second = json_body(get(create_test_app(), uri).await).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_timestamps_are_plain_dates() {
        let body = json_body(get(create_test_app(), "/api/total-pax?from=2024-03-10&to=2024-03-10").await).await;
        assert_eq!(body[0]["timestamp"], "2024-03-10");
        assert!(body[0]["value"].is_f64());
    }

    #[tokio::test]
    async fn test_bad_requests() {
        let cases = [
            ("/api/total-fuel?from=2024-01-01&to=2024-01-02", "UNKNOWN_METRIC"),
            ("/api/total-pax?to=2024-01-02", "VALIDATION_ERROR"),
            ("/api/total-pax?from=2024-01-01", "VALIDATION_ERROR"),
            ("/api/total-pax?from=01/01/2024&to=2024-01-02", "VALIDATION_ERROR"),
            ("/api/total-pax?from=2024-01-01&to=2024-02-30", "VALIDATION_ERROR"),
            ("/api/total-pax?from=2024-01-03&to=2024-01-02", "ORDER_ERROR"),
            ("/api/total-pax?from=2000-01-01&to=2024-01-01", "RANGE_TOO_LONG"),
        ];

        for (uri, code) in cases {
            let response = get(create_test_app(), uri).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");

            let body = json_body(response).await;
            assert_eq!(body["error"]["code"], code, "{uri}");
            assert!(body["request_id"].is_string());
        }
    }

    #[tokio::test]
    async fn test_unrouted_path_is_404() {
        let response = get(create_test_app(), "/api/total-pax/daily?from=2024-01-01&to=2024-01-02").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = get(create_test_app(), "/metrics").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_max_points_boundary() {
        let config = ServerConfig {
            max_points: 7,
            ..Default::default()
        };

        let ok = get(
            build_router(AppState::new(config.clone())),
            "/api/total-pax?from=2024-06-01&to=2024-06-07",
        )
        .await;
        assert_eq!(ok.status(), StatusCode::OK);

        let too_long = get(
            build_router(AppState::new(config)),
            "/api/total-pax?from=2024-06-01&to=2024-06-08",
        )
        .await;
        assert_eq!(too_long.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/total-pax?from=2024-06-01&to=2024-06-01")
                    .header(header::ORIGIN, "http://dashboard.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }
}
