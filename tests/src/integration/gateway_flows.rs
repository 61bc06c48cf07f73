//! # Gateway Flows
//!
//! JSON-RPC requests against a registry the test also holds directly, so
//! side effects can be checked on the bus and through the Rust API.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use sc_01_project_registry::adapters::ManualClock;
    use sc_01_project_registry::ports::ProjectRegistryApi;
    use sc_01_project_registry::service::{create_test_service, RegistryService};
    use sc_03_api_gateway::domain::error::codes;
    use sc_03_api_gateway::{ApiGatewayService, GatewayConfig, RegistryBackend, CALLER_HEADER};
    use serde_json::{json, Value};
    use shared_bus::{EventFilter, InMemoryEventBus, RegistryEvent};
    use shared_types::{keccak256, Address};
    use tower::ServiceExt;

    type Registry = RegistryService<ManualClock, InMemoryEventBus>;

    const ALICE: &str = "0xa1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1";
    const BOB: &str = "0xb0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0";
    const ADMIN: &str = "0xadadadadadadadadadadadadadadadadadadadad";

    async fn setup() -> (Router, Arc<Registry>) {
        let registry = Arc::new(create_test_service().await.unwrap());
        let backend: Arc<dyn RegistryBackend> = registry.clone();
        let gateway = ApiGatewayService::new(GatewayConfig::default(), backend).unwrap();
        (gateway.router(), registry)
    }

    async fn rpc(router: &Router, caller: Option<&str>, body: Value) -> Value {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json");
        if let Some(caller) = caller {
            builder = builder.header(CALLER_HEADER, caller);
        }
        let response = router
            .clone()
            .oneshot(builder.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn call(id: i64, method: &str, params: Value) -> Value {
        json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params})
    }

    fn address(hex: &str) -> Address {
        hex.parse().unwrap()
    }

    // =============================================================================
    // TESTS
    // =============================================================================

    #[tokio::test]
    async fn test_rpc_mutations_reach_registry_and_bus() {
        let (router, registry) = setup().await;
        let mut events = registry.publisher().subscribe(EventFilter::all());

        let resp = rpc(
            &router,
            Some(ALICE),
            call(1, "submitProject", json!(["Resume AI", "https://github.com/a/b", ["AI"]])),
        )
        .await;
        assert_eq!(resp["result"], 1);

        let hash = keccak256(b"cv.pdf");
        let resp = rpc(&router, Some(ALICE), call(2, "storeFileHash", json!([1, hash]))).await;
        assert_eq!(resp["result"], Value::Null);
        assert!(resp.get("error").is_none());

        assert_eq!(registry.get_projects_of(address(ALICE)).await, vec![1]);
        assert_eq!(registry.get_file_hash(1).await.unwrap(), hash);

        let seen = events.drain().unwrap();
        assert_eq!(seen.len(), 3);
        assert!(matches!(seen[2], RegistryEvent::FileHashStored { token_id: 1, .. }));
    }

    #[tokio::test]
    async fn test_rust_side_writes_visible_over_rpc() {
        let (router, registry) = setup().await;
        registry
            .submit_project(
                address(BOB),
                sc_01_project_registry::domain::NewProject::new("Speedrun", "", ["gaming"]),
            )
            .await
            .unwrap();

        let resp = rpc(&router, None, call(1, "catalog_project", json!([1]))).await;
        assert_eq!(resp["result"]["name"], "Speedrun");
        assert_eq!(resp["result"]["domain"], "gaming");
        assert_eq!(resp["result"]["tags"], json!([]));
        assert_eq!(resp["result"]["votes"], 0);
    }

    #[tokio::test]
    async fn test_batch_runs_in_order_with_mixed_outcomes() {
        let (router, _) = setup().await;

        let resp = rpc(
            &router,
            Some(BOB),
            json!([
                call(1, "submitProject", json!(["p", "", []])),
                call(2, "upvoteProject", json!([1])),
                call(3, "upvoteProject", json!([1])),
                call(4, "getVoteCount", json!([1])),
                call(5, "catalog_dashboard", json!([BOB])),
            ]),
        )
        .await;

        let responses = resp.as_array().unwrap();
        assert_eq!(responses.len(), 5);
        assert_eq!(responses[0]["result"], 1);
        assert_eq!(responses[1]["result"], Value::Null);
        assert_eq!(responses[2]["error"]["code"], codes::EXECUTION_ERROR);
        assert_eq!(responses[2]["error"]["data"]["reason"], "AlreadyVoted");
        assert_eq!(responses[3]["result"], 1);
        assert_eq!(
            responses[4]["result"],
            json!({"totalProjects": 1, "myProjects": 1, "totalVotes": 1})
        );
    }

    #[tokio::test]
    async fn test_issuer_admin_over_rpc() {
        let (router, registry) = setup().await;

        let resp = rpc(&router, Some(BOB), call(1, "setVerifiedIssuer", json!([BOB, true]))).await;
        assert_eq!(resp["error"]["data"]["reason"], "NotAdmin");
        assert!(!registry.is_verified_issuer(address(BOB)).await);

        let grant = call(2, "setVerifiedIssuer", json!([BOB, true]));
        let resp = rpc(&router, Some(ADMIN), grant).await;
        assert!(resp.get("error").is_none());

        let resp = rpc(&router, None, call(3, "isVerifiedIssuer", json!([BOB]))).await;
        assert_eq!(resp["result"], true);
    }

    #[tokio::test]
    async fn test_health_tracks_registry() {
        let (router, registry) = setup().await;
        registry
            .submit_project(
                address(ALICE),
                sc_01_project_registry::domain::NewProject::new("x", "", ["y"]),
            )
            .await
            .unwrap();

        let response = router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let health: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(health["totalProjects"], 1);
    }
}
