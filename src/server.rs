use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::classify::ClassifiedDocument;
use crate::config::DisplayConfig;
use crate::engine::state::{DebounceDecision, ViewState};
use crate::engine::{self, ScopeLabel, SpanOracle};
use crate::error::ScopeStatusError;

/// One open editor view: its classified document (None when the syntax
/// is unsupported — resolution degrades to an empty label) and its
/// resolution state.
struct ViewEntry {
    document: Option<ClassifiedDocument>,
    widget: bool,
    state: ViewState,
    syntax: String,
    path: Option<PathBuf>,
}

#[derive(Clone)]
pub struct ScopeStatusServer {
    views: Arc<RwLock<HashMap<String, ViewEntry>>>,
    config: Arc<RwLock<Arc<DisplayConfig>>>,
    config_path: Option<PathBuf>,
    tool_router: ToolRouter<Self>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct OpenViewParams {
    #[schemars(description = "Stable identifier for the editor view, e.g. a URI")]
    pub uri: String,
    #[schemars(description = "Full source text of the view")]
    pub source: String,
    #[schemars(description = "Human-readable syntax name, e.g. 'TypeScript', 'TSX', 'JavaScript', 'C++'")]
    pub syntax: String,
    #[schemars(description = "Optional file path backing the view, used for the file prefix")]
    pub path: Option<String>,
    #[schemars(description = "True for non-document views such as input widgets; these are never resolved")]
    pub widget: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateViewParams {
    #[schemars(description = "Identifier of an open view")]
    pub uri: String,
    #[schemars(description = "New full source text after the edit")]
    pub source: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ActivateViewParams {
    #[schemars(description = "Identifier of an open view")]
    pub uri: String,
    #[schemars(description = "Optional zero-based cursor row to resolve immediately")]
    pub row: Option<usize>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SelectionParams {
    #[schemars(description = "Identifier of an open view")]
    pub uri: String,
    #[schemars(description = "Zero-based cursor row; preferred over offset when both are given")]
    pub row: Option<usize>,
    #[schemars(description = "Byte offset of the selection start, mapped to a row internally")]
    pub offset: Option<usize>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CloseViewParams {
    #[schemars(description = "Identifier of the view to drop")]
    pub uri: String,
}

#[tool_router]
impl ScopeStatusServer {
    pub fn new(config: DisplayConfig, config_path: Option<PathBuf>) -> Self {
        Self {
            views: Arc::new(RwLock::new(HashMap::new())),
            config: Arc::new(RwLock::new(Arc::new(config))),
            config_path,
            tool_router: Self::tool_router(),
        }
    }

    fn config_snapshot(&self) -> Arc<DisplayConfig> {
        self.config.read().clone()
    }

    /// Resolve through the per-view cache: a repeated row returns the
    /// stored label without touching the span pool.
    fn resolve_for_row(&self, uri: &str, row: usize) -> Result<ScopeLabel, ScopeStatusError> {
        let config = self.config_snapshot();
        let mut views = self.views.write();
        let entry = views
            .get_mut(uri)
            .ok_or_else(|| ScopeStatusError::ViewNotFound(uri.to_string()))?;

        if entry.widget {
            return Ok(ScopeLabel::default());
        }
        if !entry.state.note_row(row) {
            return Ok(entry.state.last_label().clone());
        }

        let label = match &entry.document {
            Some(doc) => engine::resolve_scope(doc, row, &config),
            None => ScopeLabel::default(),
        };
        entry.state.record_label(label.clone());
        Ok(label)
    }

    #[tool(description = "Register an editor view with its full source text and syntax name. Re-opening an existing uri replaces the view and resets its resolution state. Widget views are registered but never resolved.")]
    async fn open_view(
        &self,
        Parameters(params): Parameters<OpenViewParams>,
    ) -> Result<CallToolResult, McpError> {
        let path = params.path.map(PathBuf::from);
        let widget = params.widget.unwrap_or(false);

        let document = if widget {
            None
        } else {
            match ClassifiedDocument::parse(&params.source, &params.syntax, path.clone()) {
                Ok(doc) => Some(doc),
                Err(e) => {
                    // Unsupported or unparsable: keep the view open and
                    // degrade every resolution to "no scope found".
                    warn!("Classification unavailable for {}: {}", params.uri, e);
                    None
                }
            }
        };

        info!("Opened view {} ({})", params.uri, params.syntax);
        self.views.write().insert(
            params.uri,
            ViewEntry {
                document,
                widget,
                state: ViewState::new(),
                syntax: params.syntax,
                path,
            },
        );
        Ok(CallToolResult::success(vec![Content::text("ok")]))
    }

    #[tool(description = "Replace the source text of an open view after a buffer edit. Counts as debounce activity; does not resolve a scope.")]
    async fn update_view(
        &self,
        Parameters(params): Parameters<UpdateViewParams>,
    ) -> Result<CallToolResult, McpError> {
        let now = Instant::now();
        let mut views = self.views.write();
        let Some(entry) = views.get_mut(&params.uri) else {
            return Ok(domain_error(&ScopeStatusError::ViewNotFound(params.uri)));
        };

        if !entry.widget {
            entry.document =
                match ClassifiedDocument::parse(&params.source, &entry.syntax, entry.path.clone()) {
                    Ok(doc) => Some(doc),
                    Err(e) => {
                        warn!("Classification unavailable for {}: {}", params.uri, e);
                        None
                    }
                };
        }
        entry.state.debounce_mut().note_activity(now);
        Ok(CallToolResult::success(vec![Content::text("ok")]))
    }

    #[tool(description = "Mark a view as (re)activated: forgets the last-resolved row so the next cursor event recomputes. With a row, resolves immediately and returns the label.")]
    async fn activate_view(
        &self,
        Parameters(params): Parameters<ActivateViewParams>,
    ) -> Result<CallToolResult, McpError> {
        let now = Instant::now();
        {
            let mut views = self.views.write();
            let Some(entry) = views.get_mut(&params.uri) else {
                return Ok(domain_error(&ScopeStatusError::ViewNotFound(params.uri)));
            };
            entry.state.activate();
            entry.state.debounce_mut().note_activity(now);
        }

        match params.row {
            Some(row) => match self.resolve_for_row(&params.uri, row) {
                Ok(label) => Ok(label_result(&label)),
                Err(e) => Ok(domain_error(&e)),
            },
            None => Ok(CallToolResult::success(vec![Content::text("ok")])),
        }
    }

    #[tool(description = "Report a cursor/selection change and get the scope label for the status line. Applies the same-row fast path and the debounce policy; a superseded burst event returns the last label unchanged.")]
    async fn selection_changed(
        &self,
        Parameters(params): Parameters<SelectionParams>,
    ) -> Result<CallToolResult, McpError> {
        let now = Instant::now();

        let (decision, row) = {
            let mut views = self.views.write();
            let Some(entry) = views.get_mut(&params.uri) else {
                return Ok(domain_error(&ScopeStatusError::ViewNotFound(params.uri)));
            };
            if entry.widget {
                return Ok(label_result(&ScopeLabel::default()));
            }
            let row = match target_row(entry, params.row, params.offset) {
                Ok(row) => row,
                Err(e) => return Ok(domain_error(&e)),
            };
            (entry.state.debounce_mut().on_event(now), row)
        };

        if let DebounceDecision::Deferred(wait) = decision {
            tokio::time::sleep(wait).await;

            let superseded = {
                let views = self.views.read();
                let Some(entry) = views.get(&params.uri) else {
                    return Ok(domain_error(&ScopeStatusError::ViewNotFound(params.uri)));
                };
                if entry.state.debounce().is_quiescent(Instant::now()) {
                    None
                } else {
                    // A newer event owns the resolution; report the
                    // current label without recomputing.
                    Some(entry.state.last_label().clone())
                }
            };
            if let Some(label) = superseded {
                return Ok(label_result(&label));
            }
        }

        match self.resolve_for_row(&params.uri, row) {
            Ok(label) => Ok(label_result(&label)),
            Err(e) => Ok(domain_error(&e)),
        }
    }

    #[tool(description = "Build a scoped log statement for insertion at the cursor, e.g. console.log(`Klass # method :: `);. Returns the statement and a cursor_back count placing the caret inside the backticks. Resolves fresh, ignoring the row cache.")]
    async fn insert_log(
        &self,
        Parameters(params): Parameters<SelectionParams>,
    ) -> Result<CallToolResult, McpError> {
        let config = self.config_snapshot();

        let label = {
            let views = self.views.read();
            let Some(entry) = views.get(&params.uri) else {
                return Ok(domain_error(&ScopeStatusError::ViewNotFound(params.uri)));
            };
            if entry.widget {
                return Ok(domain_error(&ScopeStatusError::WidgetView(params.uri)));
            }
            let row = match target_row(entry, params.row, params.offset) {
                Ok(row) => row,
                Err(e) => return Ok(domain_error(&e)),
            };
            match &entry.document {
                Some(doc) => engine::resolve_scope(doc, row, &config),
                None => ScopeLabel::default(),
            }
        };

        let statement =
            engine::build_log_statement(&config.log_function, &label, &config.func_data_div);
        let body = json!({
            "statement": statement,
            "cursor_back": engine::LOG_CURSOR_BACK,
            "resolved": label.resolved,
        });
        Ok(CallToolResult::success(vec![Content::text(body.to_string())]))
    }

    #[tool(description = "Drop the per-view resolution state for a closed view.")]
    async fn close_view(
        &self,
        Parameters(params): Parameters<CloseViewParams>,
    ) -> Result<CallToolResult, McpError> {
        let removed = self.views.write().remove(&params.uri).is_some();
        if removed {
            info!("Closed view {}", params.uri);
            Ok(CallToolResult::success(vec![Content::text("ok")]))
        } else {
            Ok(domain_error(&ScopeStatusError::ViewNotFound(params.uri)))
        }
    }

    #[tool(description = "Re-read the display configuration file and swap in the new snapshot for all open and future views.")]
    async fn reload_config(&self) -> Result<CallToolResult, McpError> {
        let Some(path) = &self.config_path else {
            return Ok(CallToolResult::success(vec![Content::text(
                "No config file configured; defaults remain in effect",
            )]));
        };

        match DisplayConfig::load(path) {
            Ok(config) => {
                info!("Reloaded config from {}", path.display());
                *self.config.write() = Arc::new(config);
                Ok(CallToolResult::success(vec![Content::text(
                    "Config reloaded",
                )]))
            }
            Err(e) => Ok(CallToolResult::error(vec![Content::text(format!(
                "Config reload failed: {}",
                e
            ))])),
        }
    }
}

/// Pick the target row from the request: explicit row first, else a byte
/// offset mapped through the document's line index.
fn target_row(
    entry: &ViewEntry,
    row: Option<usize>,
    offset: Option<usize>,
) -> Result<usize, ScopeStatusError> {
    if let Some(row) = row {
        return Ok(row);
    }
    if let Some(offset) = offset {
        // Without a classified document the row is irrelevant anyway;
        // resolution degrades to an empty label.
        return Ok(entry.document.as_ref().map_or(0, |doc| doc.row_of(offset)));
    }
    Err(ScopeStatusError::MissingPosition)
}

fn label_result(label: &ScopeLabel) -> CallToolResult {
    let body = json!({
        "label": label.text,
        "resolved": label.resolved,
    });
    CallToolResult::success(vec![Content::text(body.to_string())])
}

fn domain_error(e: &ScopeStatusError) -> CallToolResult {
    CallToolResult::error(vec![Content::text(format!("{}", e))])
}

#[tool_handler]
impl ServerHandler for ScopeStatusServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "scope-status-mcp".to_string(),
                title: None,
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Scope status server for editor hosts. Classifies TypeScript, TSX, JavaScript \
                 and C++ views with tree-sitter and resolves the enclosing class/function for a \
                 cursor position via open_view, update_view, activate_view, selection_changed, \
                 insert_log, close_view, and reload_config tools."
                    .to_string(),
            ),
        }
    }
}
