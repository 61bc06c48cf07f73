//! API Gateway service - JSON-RPC over HTTP.
//!
//! `POST /` takes a single request or a batch; `GET /health` reports
//! liveness and request counters.

use crate::domain::config::GatewayConfig;
use crate::domain::error::{ApiError, GatewayError};
use crate::domain::methods::{get_method_info, MethodInfo};
use crate::domain::types::{JsonRpcRequest, JsonRpcResponse};
use crate::middleware::{caller_from_headers, create_cors_layer, GatewayMetrics};
use crate::ports::RegistryBackend;
use crate::router::{route_method, AppState};
use axum::{
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use shared_types::Address;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

/// API Gateway service
pub struct ApiGatewayService {
    config: GatewayConfig,
    state: AppState,
}

impl ApiGatewayService {
    /// Create a gateway over `registry`.
    pub fn new(
        config: GatewayConfig,
        registry: Arc<dyn RegistryBackend>,
    ) -> Result<Self, GatewayError> {
        config
            .validate()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        let state = AppState::new(registry, config.limits.max_batch_size);
        Ok(Self { config, state })
    }

    /// Gateway configuration.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Request counters.
    pub fn metrics(&self) -> Arc<GatewayMetrics> {
        Arc::clone(&self.state.metrics)
    }

    /// The HTTP router with its middleware stack.
    pub fn router(&self) -> Router {
        let middleware = ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(create_cors_layer(&self.config.cors))
            .layer(TimeoutLayer::new(self.config.request_timeout()));

        Router::new()
            .route("/", post(handle_json_rpc))
            .route("/health", get(health_check))
            .layer(DefaultBodyLimit::max(self.config.limits.max_request_size))
            .layer(middleware)
            .with_state(self.state.clone())
    }

    /// Bind the configured address and serve until `shutdown` resolves.
    pub async fn serve(
        self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), GatewayError> {
        let listener = TcpListener::bind(self.config.http_addr)
            .await
            .map_err(GatewayError::Bind)?;
        self.serve_on(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve_on(
        self,
        listener: TcpListener,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), GatewayError> {
        let addr = listener.local_addr().map_err(GatewayError::Bind)?;
        info!(addr = %addr, "Starting HTTP server");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(GatewayError::Serve)?;

        info!("API Gateway stopped");
        Ok(())
    }
}

/// Handle JSON-RPC request
async fn handle_json_rpc(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let request: Value = match serde_json::from_str(&body) {
        Ok(v) => v,
        Err(e) => {
            let error = ApiError::parse_error(e.to_string());
            return (
                StatusCode::BAD_REQUEST,
                Json(JsonRpcResponse::failure(None, error)),
            )
                .into_response();
        }
    };

    let caller = caller_from_headers(&headers);

    match request {
        Value::Array(batch) => {
            state.metrics.record_batch();
            if batch.is_empty() {
                let error = ApiError::invalid_request("empty batch");
                return Json(JsonRpcResponse::failure(None, error)).into_response();
            }
            if batch.len() > state.max_batch_size {
                let error = ApiError::limit_exceeded(format!(
                    "batch of {} exceeds maximum of {}",
                    batch.len(),
                    state.max_batch_size
                ));
                return Json(JsonRpcResponse::failure(None, error)).into_response();
            }

            let mut responses = Vec::with_capacity(batch.len());
            for raw in &batch {
                responses.push(process_single_request(&state, &caller, raw).await);
            }
            Json(responses).into_response()
        }
        single => Json(process_single_request(&state, &caller, &single).await).into_response(),
    }
}

/// Process a single JSON-RPC request
async fn process_single_request(
    state: &AppState,
    caller: &Result<Option<Address>, ApiError>,
    raw: &Value,
) -> JsonRpcResponse {
    let request = match JsonRpcRequest::from_value(raw) {
        Ok(request) => request,
        Err((id, error)) => {
            state.metrics.record_request(false, false);
            return JsonRpcResponse::failure(id, error);
        }
    };

    let info = get_method_info(&request.method);
    let is_mutation = info.is_some_and(MethodInfo::requires_caller);

    let caller = match caller {
        Ok(caller) => *caller,
        Err(error) if is_mutation => {
            state.metrics.record_request(false, true);
            return JsonRpcResponse::failure(Some(request.id), error.clone());
        }
        Err(_) => None,
    };

    let result = route_method(state, caller, &request.method, request.params.as_ref()).await;
    state.metrics.record_request(result.is_ok(), is_mutation);

    match result {
        Ok(value) => {
            debug!(method = %request.method, id = %request.id, "JSON-RPC call succeeded");
            JsonRpcResponse::success(request.id, value)
        }
        Err(error) => {
            debug!(
                method = %request.method,
                id = %request.id,
                code = error.code,
                "JSON-RPC call failed"
            );
            JsonRpcResponse::failure(Some(request.id), error)
        }
    }
}

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "api-gateway",
        "version": env!("CARGO_PKG_VERSION"),
        "totalProjects": state.registry.get_total_projects().await,
        "requests": state.metrics.snapshot(),
    }))
}
