//! Streamable HTTP transport.
//!
//! Serves the rmcp `ServerHandler` over the MCP Streamable HTTP protocol in
//! stateless mode: each POST gets a fresh handler and no session id. rmcp
//! attaches the request's `http::request::Parts` to the tool call context,
//! which is where the search tool reads `x-api-key` from.

use std::sync::Arc;

use axum::{Json, Router, response::IntoResponse, routing::get};
use rmcp::transport::streamable_http_server::session::never::NeverSessionManager;
use rmcp::transport::{StreamableHttpServerConfig, StreamableHttpService};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;

/// Streamable HTTP transport handler.
pub struct StreamableHttpTransport {
    config: HttpConfig,
}

impl StreamableHttpTransport {
    /// Create a new transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Build the axum router: the MCP endpoint plus a health check.
    pub fn router(&self, server: McpServer) -> Router {
        let mut service_config = StreamableHttpServerConfig::default();
        service_config.stateful_mode = false;
        service_config.sse_keep_alive = None;

        let service = StreamableHttpService::new(
            move || Ok(server.clone()),
            Arc::new(NeverSessionManager::default()),
            service_config,
        );

        let mut app = Router::new()
            .route_service(&self.config.rpc_path, service)
            .route("/health", get(health_check));

        if self.config.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            app = app.layer(cors);
        }

        app
    }

    /// Run the transport until the listener fails.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.config.address();
        let app = self.router(server);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!("Ready - listening on {} (MCP Streamable HTTP, stateless)", addr);
        info!("  → MCP:    POST {}", self.config.rpc_path);
        info!("  → Health: GET /health");

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "transport": "streamable-http",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::domains::tools::definitions::melo::{
        ApiKey, PropertySource, SearchError, UpstreamQuery,
    };
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use futures::StreamExt;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    struct CountingSource {
        calls: AtomicUsize,
        last_key: Mutex<Option<String>>,
    }

    #[async_trait]
    impl PropertySource for CountingSource {
        async fn fetch(
            &self,
            credential: &ApiKey,
            _query: &UpstreamQuery,
        ) -> Result<serde_json::Value, SearchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_key.lock().unwrap() = Some(credential.expose().to_string());
            Ok(serde_json::json!({"hydra:totalItems": 1, "hydra:member": [{"uuid": "z"}]}))
        }
    }

    fn test_app() -> (Router, Arc<CountingSource>) {
        let source = Arc::new(CountingSource {
            calls: AtomicUsize::new(0),
            last_key: Mutex::new(None),
        });
        let server = McpServer::with_source(Config::default(), source.clone());
        let app = StreamableHttpTransport::new(HttpConfig::default()).router(server);
        (app, source)
    }

    fn mcp_post(body: serde_json::Value, api_key: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/mcp")
            .header("content-type", "application/json")
            .header("accept", "application/json, text/event-stream");
        if let Some(key) = api_key {
            builder = builder.header("x-api-key", key);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn search_call(arguments: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/call",
            "params": {"name": "search_properties", "arguments": arguments}
        })
    }

    /// Read the SSE body until the first `data:` event and decode it.
    async fn first_event(app: Router, request: Request<Body>) -> serde_json::Value {
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let mut stream = response.into_body().into_data_stream();
        let mut buffer = String::new();
        while let Some(chunk) = stream.next().await {
            buffer.push_str(&String::from_utf8_lossy(&chunk.unwrap()));
            if let Some(data) = buffer
                .lines()
                .find_map(|line| line.strip_prefix("data:"))
                .filter(|_| buffer.contains("\n\n"))
            {
                return serde_json::from_str(data.trim()).unwrap();
            }
        }
        panic!("no SSE event in body: {buffer}");
    }

    #[tokio::test]
    async fn test_tools_call_reads_key_from_request_headers() {
        let (app, source) = test_app();

        let message = first_event(
            app,
            mcp_post(search_call(serde_json::json!({"property_type": "house"})), Some("good-key")),
        )
        .await;

        assert_eq!(message["id"], 1);
        assert_eq!(message["result"]["isError"], false);
        assert_eq!(message["result"]["structuredContent"]["hydra:totalItems"], 1);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(source.last_key.lock().unwrap().as_deref(), Some("good-key"));
    }

    #[tokio::test]
    async fn test_tools_call_without_key_skips_upstream() {
        let (app, source) = test_app();

        let message = first_event(app, mcp_post(search_call(serde_json::json!({})), None)).await;

        assert_eq!(message["result"]["isError"], true);
        let text = message["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("Missing X-API-KEY header"));
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_tools_call_unknown_label_is_invalid_params() {
        let (app, source) = test_app();

        let message = first_event(
            app,
            mcp_post(
                search_call(serde_json::json!({"order_by": "rating"})),
                Some("good-key"),
            ),
        )
        .await;

        assert_eq!(message["error"]["code"], -32602);
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_tools_list() {
        let (app, _) = test_app();

        let message = first_event(
            app,
            mcp_post(
                serde_json::json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
                None,
            ),
        )
        .await;

        let tools = message["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0]["name"], "search_properties");
    }

    #[tokio::test]
    async fn test_notification_is_accepted() {
        let (app, _) = test_app();

        let response = app
            .oneshot(mcp_post(
                serde_json::json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }

    #[tokio::test]
    async fn test_get_not_allowed_without_sessions() {
        let (app, _) = test_app();

        let response = app
            .oneshot(Request::builder().uri("/mcp").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
