//! MCP server exposing the pattern repository
//!
//! Resources mirror the catalog (`<scheme>://<category>/<filename>`); tools
//! cover listing, lookup, search and template sections. Repository calls touch
//! the filesystem, so they run on tokio's blocking pool.

use std::sync::Arc;

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        Annotated, CallToolResult, Content, Implementation, ListResourcesResult,
        PaginatedRequestParams, RawResource, ReadResourceRequestParams, ReadResourceResult,
        ResourceContents, ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{debug, warn};

use devcontext_core::{DevContextError, PatternRepository, Resource};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListPatternsRequest {
    #[schemars(description = "Category to list (e.g. architecture, components)")]
    pub category: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetPatternRequest {
    #[schemars(description = "Category of the pattern")]
    pub category: String,
    #[schemars(description = "Pattern name; exact name first, then any file containing it")]
    pub pattern: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchPatternsRequest {
    #[schemars(description = "Text to look for (case-insensitive)")]
    pub query: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct TemplateSectionRequest {
    #[schemars(description = "Template topic, e.g. react-app or rust-cli")]
    pub topic: String,
}

/// MCP Server state
#[derive(Clone)]
pub struct DevContextServer {
    repo: Arc<PatternRepository>,
    tool_router: ToolRouter<Self>,
}

impl DevContextServer {
    pub fn new(repo: PatternRepository) -> Self {
        Self {
            repo: Arc::new(repo),
            tool_router: Self::tool_router(),
        }
    }

    /// Run a repository call on the blocking pool.
    async fn with_repo<T, F>(&self, f: F) -> Result<T, McpError>
    where
        F: FnOnce(&PatternRepository) -> T + Send + 'static,
        T: Send + 'static,
    {
        let repo = Arc::clone(&self.repo);
        tokio::task::spawn_blocking(move || f(&repo))
            .await
            .map_err(|e| McpError::internal_error(format!("Repository task failed: {e}"), None))
    }

    /// Catalog as MCP resources; skipped categories are logged.
    pub async fn resource_list(&self) -> Result<Vec<Annotated<RawResource>>, McpError> {
        let listing = self.with_repo(|repo| repo.list_resources()).await?;
        for skipped in &listing.skipped {
            warn!(location = %skipped.location, reason = %skipped.reason, "resource listing skipped entry");
        }
        Ok(listing.resources.into_iter().map(to_raw_resource).collect())
    }

    pub async fn read(&self, uri: String) -> Result<ReadResourceResult, McpError> {
        debug!(uri = %uri, "reading resource");
        let content = self
            .with_repo(move |repo| repo.read_resource(&uri))
            .await?
            .map_err(|e| match e {
                e if e.is_invalid_input() => McpError::invalid_params(e.to_string(), None),
                e if e.is_not_found() => McpError::resource_not_found(e.to_string(), None),
                e => McpError::internal_error(e.to_string(), None),
            })?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::TextResourceContents {
                uri: content.uri,
                mime_type: Some(content.content_type),
                text: content.text,
                meta: None,
            }],
        })
    }
}

fn to_raw_resource(resource: Resource) -> Annotated<RawResource> {
    Annotated::new(
        RawResource {
            uri: resource.uri,
            name: resource.display_name,
            title: None,
            description: Some(resource.description),
            mime_type: Some(resource.content_type),
            size: None,
            icons: None,
            meta: None,
        },
        None,
    )
}

fn bullet_list(header: String, items: impl IntoIterator<Item = String>) -> String {
    let mut text = header;
    for item in items {
        text.push_str("\n- ");
        text.push_str(&item);
    }
    text
}

/// Domain errors become tool errors the model can read.
fn error_result(err: DevContextError) -> CallToolResult {
    let text = match err {
        DevContextError::NotFoundInCategory {
            category,
            pattern,
            available,
        } => bullet_list(
            format!(
                "Pattern '{}' not found in category '{}'.\n\nAvailable patterns:",
                pattern, category
            ),
            available,
        ),
        other => other.to_string(),
    };
    CallToolResult::error(vec![Content::text(text)])
}

fn text_result(text: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text)])
}

#[tool_router]
impl DevContextServer {
    #[tool(description = "List the pattern categories.")]
    async fn list_categories(&self) -> Result<CallToolResult, McpError> {
        let result = self.with_repo(|repo| repo.list_categories()).await?;
        Ok(match result {
            Ok(categories) => text_result(bullet_list(
                "Available categories:".to_string(),
                categories,
            )),
            Err(e) => error_result(e),
        })
    }

    #[tool(description = "List the patterns available in a category.")]
    async fn list_patterns(
        &self,
        Parameters(req): Parameters<ListPatternsRequest>,
    ) -> Result<CallToolResult, McpError> {
        let category = req.category;
        let header = format!("Patterns in '{}':", category);
        let result = self
            .with_repo(move |repo| repo.list_patterns(&category))
            .await?;
        Ok(match result {
            Ok(names) => text_result(bullet_list(header, names)),
            Err(e) => error_result(e),
        })
    }

    #[tool(description = "Get a pattern by category and name. Falls back to the first pattern whose file name contains the given name.")]
    async fn get_pattern(
        &self,
        Parameters(req): Parameters<GetPatternRequest>,
    ) -> Result<CallToolResult, McpError> {
        let result = self
            .with_repo(move |repo| repo.resolve_pattern(&req.category, &req.pattern))
            .await?;
        Ok(match result {
            Ok(resolved) => {
                debug!(
                    category = %resolved.category,
                    file = %resolved.item.filename,
                    match_kind = ?resolved.match_kind,
                    "resolved pattern"
                );
                text_result(resolved.content)
            }
            Err(e) => error_result(e),
        })
    }

    #[tool(description = "Search all patterns for text (case-insensitive substring match).")]
    async fn search_patterns(
        &self,
        Parameters(req): Parameters<SearchPatternsRequest>,
    ) -> Result<CallToolResult, McpError> {
        let result = self.with_repo(move |repo| repo.search(&req.query)).await?;
        let report = match result {
            Ok(report) => report,
            Err(e) => return Ok(error_result(e)),
        };

        for skipped in &report.skipped {
            warn!(location = %skipped.location, reason = %skipped.reason, "search skipped entry");
        }

        if report.hits.is_empty() {
            return Ok(text_result(format!(
                "No patterns found matching '{}'",
                report.query
            )));
        }

        Ok(text_result(bullet_list(
            format!(
                "Found {} pattern(s) matching '{}':",
                report.hits.len(),
                report.query
            ),
            report
                .hits
                .into_iter()
                .map(|hit| format!("{}/{}", hit.category, hit.pattern)),
        )))
    }

    #[tool(description = "Get the section of the project templates document for a topic. Returns the whole document when the topic has no section.")]
    async fn get_template_section(
        &self,
        Parameters(req): Parameters<TemplateSectionRequest>,
    ) -> Result<CallToolResult, McpError> {
        let result = self
            .with_repo(move |repo| repo.template_section(&req.topic))
            .await?;
        Ok(match result {
            Ok(section) => {
                if !section.matched {
                    debug!(topic = %section.topic, source = %section.source, "no section for topic, returning whole document");
                }
                text_result(section.text)
            }
            Err(e) => error_result(e),
        })
    }
}

#[tool_handler]
impl ServerHandler for DevContextServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: "devcontext".into(),
                title: Some("devcontext - context patterns".into()),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                website_url: None,
            },
            instructions: Some(format!(
                "Categorized development patterns. Resources use the {}:// scheme; use the tools to list, fetch, search and pull template sections.",
                self.repo.scheme()
            )),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult {
            resources: self.resource_list().await?,
            next_cursor: None,
            meta: None,
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        self.read(request.uri).await
    }
}
