//! Tool Router - builds the rmcp ToolRouter from registry.
//!
//! This module builds the ToolRouter behind the rmcp `ServerHandler` (served
//! over Streamable HTTP) by delegating to the tool definitions themselves.
//! Each tool knows how to create its own route.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::{PropertySource, SearchPropertiesTool};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(source: Arc<dyn PropertySource>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new().with_route(SearchPropertiesTool::create_route(source))
}

#[cfg(test)]
mod tests {
    use super::super::definitions::melo::{ApiKey, SearchError, UpstreamQuery};
    use super::super::registry::ToolRegistry;
    use super::*;
    use async_trait::async_trait;

    struct TestServer {}

    struct NoopSource;

    #[async_trait]
    impl PropertySource for NoopSource {
        async fn fetch(
            &self,
            _credential: &ApiKey,
            _query: &UpstreamQuery,
        ) -> Result<serde_json::Value, SearchError> {
            Ok(serde_json::Value::Null)
        }
    }

    fn test_source() -> Arc<dyn PropertySource> {
        Arc::new(NoopSource)
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(test_source());
        let tools = router.list_all();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "search_properties");
        assert_eq!(tools[0].title.as_deref(), Some("Search Properties"));
    }

    #[test]
    fn test_registry_matches_router() {
        // Ensure registry and router have the same tools
        let registry = ToolRegistry::new(test_source());
        let registry_names = registry.tool_names();

        let router: ToolRouter<TestServer> = build_tool_router(test_source());
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }
}
