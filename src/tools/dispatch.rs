//! Tool dispatch
//!
//! Maps a tool call to its owning gateway by exact catalog lookup, invokes
//! it, and normalizes the result into plain text.

use std::sync::Arc;

use serde_json::Value;

use crate::error::{RefdeskError, Result};
use crate::gateway::{Gateway, GatewayKind};
use crate::tools::ToolCall;
use crate::tools::catalog::ToolCatalog;

/// Routes tool calls to the directory or catalog gateway.
pub struct Dispatcher {
    catalog: ToolCatalog,
    directory: Arc<dyn Gateway>,
    publications: Arc<dyn Gateway>,
}

impl Dispatcher {
    /// Create a dispatcher over the two backend gateways.
    pub fn new(
        catalog: ToolCatalog,
        directory: Arc<dyn Gateway>,
        publications: Arc<dyn Gateway>,
    ) -> Self {
        Self {
            catalog,
            directory,
            publications,
        }
    }

    /// The static tool catalog.
    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    fn gateway_for(&self, kind: GatewayKind) -> &Arc<dyn Gateway> {
        match kind {
            GatewayKind::Directory => &self.directory,
            GatewayKind::Catalog => &self.publications,
        }
    }

    /// Execute a tool call and return the concatenated text output.
    ///
    /// Unknown names fail before any gateway is touched. A present-but-blank
    /// search term degrades to a user-facing message; any other schema
    /// violation is an InvalidArguments error.
    pub async fn dispatch(&self, call: &ToolCall) -> Result<String> {
        let spec = self
            .catalog
            .get(&call.name)
            .ok_or_else(|| RefdeskError::UnknownTool(call.name.clone()))?;

        if let Some(field) = spec.search_field() {
            if let Some(Value::String(term)) = call.arguments.get(field) {
                if term.trim().is_empty() {
                    return Ok(format!(
                        "Please provide a non-empty {} to search for.",
                        field
                    ));
                }
            }
        }

        spec.validate_arguments(&call.arguments)?;

        log::debug!("Dispatching tool '{}' to {} gateway", call.name, spec.gateway);

        let result = self
            .gateway_for(spec.gateway)
            .call(&call.name, call.params())
            .await
            .map_err(|e| match e {
                e @ RefdeskError::Gateway { .. } => e,
                RefdeskError::Transport(msg) => {
                    RefdeskError::Transport(format!("tool '{}': {}", call.name, msg))
                }
                other => other,
            })?;

        Ok(result.joined_text())
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("tools", &self.catalog.len())
            .finish()
    }
}
