//! MCP server using the official rmcp SDK
//!
//! Serves the catalog tools over stdio.

use std::sync::Arc;

use rmcp::{
    model::{
        CallToolRequestParams, CallToolResult, ErrorData, Implementation, ListToolsResult,
        PaginatedRequestParams, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    RoleServer, ServerHandler, ServiceExt,
};
use thiserror::Error;

use crate::catalog::Catalog;
use crate::logging::Logger;
use crate::tools::CatalogTools;

/// MCP server errors
#[derive(Error, Debug)]
pub enum McpError {
    #[error("Initialization failed: {0}")]
    InitializationFailed(String),

    #[error("Protocol error: {0}")]
    Protocol(String),
}

pub type McpResult<T> = Result<T, McpError>;

const INSTRUCTIONS: &str = "Catalog of vendor integration snippets. Call listVendors to see \
what is available (optionally with a query), then getSnippet with a slug such as \
`acme/python` to fetch the markdown.";

/// MCP server exposing `listVendors` and `getSnippet`
#[derive(Clone)]
pub struct CatalogServer {
    tools: Arc<CatalogTools>,
    logger: Arc<dyn Logger>,
}

impl CatalogServer {
    pub fn new(catalog: Arc<Catalog>, logger: Arc<dyn Logger>) -> Self {
        Self {
            tools: Arc::new(CatalogTools::new(catalog)),
            logger,
        }
    }

    pub fn tools(&self) -> &CatalogTools {
        &self.tools
    }

    /// Serve on stdin/stdout until the client disconnects
    pub async fn serve_stdio(self) -> McpResult<()> {
        let logger = Arc::clone(&self.logger);
        logger.info("[CatalogServer] Starting MCP server on stdio");

        let service = self
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| McpError::InitializationFailed(e.to_string()))?;

        let reason = service
            .waiting()
            .await
            .map_err(|e| McpError::Protocol(e.to_string()))?;

        logger.info(&format!("[CatalogServer] Stopped: {:?}", reason));
        Ok(())
    }
}

impl ServerHandler for CatalogServer {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo::default();
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.server_info = Implementation {
            name: "inti".to_string(),
            title: Some("Inti Integration Snippets".to_string()),
            version: env!("CARGO_PKG_VERSION").to_string(),
            website_url: None,
            icons: None,
        };
        info.instructions = Some(INSTRUCTIONS.to_string());
        info
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(self.tools.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let name: &str = &request.name;
        self.logger.debug(&format!("[CatalogServer] Calling tool: {}", name));

        let result = self.tools.call(name, request.arguments).await;
        if let Ok(ref r) = result {
            if r.is_error == Some(true) {
                self.logger.warn(&format!("[CatalogServer] Tool {} returned an error", name));
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use crate::storage::MemoryStorage;

    fn server() -> CatalogServer {
        let logger: Arc<dyn Logger> = Arc::new(NoOpLogger::new());
        let catalog = Catalog::new(Arc::new(MemoryStorage::new()), Arc::clone(&logger));
        CatalogServer::new(Arc::new(catalog), logger)
    }

    #[test]
    fn test_server_info() {
        let info = server().get_info();
        assert_eq!(info.server_info.name, "inti");
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.unwrap().contains("getSnippet"));
    }

    #[test]
    fn test_server_tools() {
        let server = server();
        assert_eq!(server.tools().tools().len(), 2);
    }
}
