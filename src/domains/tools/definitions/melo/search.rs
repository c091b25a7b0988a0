//! Property search tool backed by the Melo API.
//!
//! The caller's API key is read from the `x-api-key` header of each
//! invocation and handed straight to the upstream client. Nothing about the
//! call outlives it.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use serde_json::Value;
use tracing::{error, info, instrument, warn};

use super::client::PropertySource;
use super::common::{error_result, payload_result};
use super::credential::ApiKey;
use super::criteria::SearchCriteria;
use super::error::SearchError;
use super::query::translate;

#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

/// Property search tool.
pub struct SearchPropertiesTool;

impl SearchPropertiesTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "search_properties";

    /// Human-readable title.
    pub const TITLE: &'static str = "Search Properties";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Search for real estate properties in France using the Melo API with comprehensive filtering options. \
         Requires an X-API-KEY header with a valid Melo API key.\n\
         \n\
         Returns the raw Melo collection of matching properties (`hydra:totalItems`, `hydra:member`), \
         including location, price, surface area, features and available pictures.\n\
         \n\
         Example usage:\n\
         - Apartments to buy in Paris with 2+ bedrooms: \
         property_type=\"apartment\", transaction_type=\"sell\", bedroom_min=2, zip_codes=[\"75001\", \"75002\"]\n\
         - Houses for rent under 2000€: property_type=\"house\", transaction_type=\"rent\", budget_max=2000";

    /// Run a search.
    ///
    /// Validation and the credential check both happen before the source is
    /// touched.
    #[instrument(skip_all, fields(
        property_type = ?params.property_type,
        transaction_type = ?params.transaction_type,
        page = params.page,
    ))]
    pub async fn execute(
        source: &dyn PropertySource,
        credential: Option<ApiKey>,
        params: &SearchCriteria,
    ) -> Result<Value, SearchError> {
        if let Err(e) = params.validate() {
            warn!("Rejected search parameters: {}", e);
            return Err(e);
        }

        let Some(credential) = credential else {
            error!("Missing X-API-KEY header");
            return Err(SearchError::MissingCredential);
        };
        info!("Using API key from request headers");

        let query = translate(params);
        source.fetch(&credential, &query).await
    }

    /// Run a search and wrap the outcome as an MCP tool result.
    pub async fn call(
        source: &dyn PropertySource,
        credential: Option<ApiKey>,
        params: &SearchCriteria,
    ) -> CallToolResult {
        match Self::execute(source, credential, params).await {
            Ok(payload) => payload_result(payload),
            Err(e) => error_result(&e.to_string()),
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    ///
    /// Malformed arguments are returned as `Err`; search failures are
    /// reported inside the tool result with `isError` set.
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: Value,
        credential: Option<ApiKey>,
        source: Arc<dyn PropertySource>,
    ) -> Result<Value, ToolError> {
        let params: SearchCriteria = serde_json::from_value(arguments)
            .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;

        let result = Self::call(source.as_ref(), credential, &params).await;

        serde_json::to_value(result).map_err(|e| ToolError::internal(e.to_string()))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SearchCriteria>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: Some(Self::TITLE.into()),
        }
    }

    /// Create a ToolRoute for the rmcp `ServerHandler`.
    ///
    /// The key is taken from the `http::request::Parts` that the Streamable
    /// HTTP transport attaches to every request.
    pub fn create_route<S>(source: Arc<dyn PropertySource>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let credential = ctx
                .request_context
                .extensions
                .get::<http::request::Parts>()
                .and_then(|parts| ApiKey::from_headers(&parts.headers));
            let source = source.clone();
            async move {
                let params: SearchCriteria = serde_json::from_value(Value::Object(args))
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

                Ok(Self::call(source.as_ref(), credential, &params).await)
            }
            .boxed()
        })
    }
}
