//! Follow-up control
//!
//! When a search result carries an embedded `ID:` token, automatically
//! issues the paired detail call and merges both results.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::tools::{Dispatcher, ToolCall};

/// First `ID:` token followed by a digit run.
static ID_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"ID:\s*(\d+)").unwrap());

/// Scan text for the first embedded identifier.
pub fn find_identifier(text: &str) -> Option<u64> {
    ID_TOKEN
        .captures(text)
        .and_then(|captures| captures[1].parse().ok())
}

/// Chains a detail lookup onto a search result.
pub struct FollowUpController<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> FollowUpController<'a> {
    /// Create a controller that re-invokes the given dispatcher.
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Inspect a search tool's text output and, when an identifier is
    /// present, fetch the paired detail record and merge both texts.
    ///
    /// A missing identifier is a normal reportable outcome containing the
    /// original text verbatim. Errors from the detail dispatch propagate;
    /// there is no partial-success fallback.
    pub async fn maybe_follow_up(&self, tool_name: &str, search_text: &str) -> Result<String> {
        let detail_tool = self
            .dispatcher
            .catalog()
            .get(tool_name)
            .and_then(|spec| spec.detail_tool());

        let Some(detail_tool) = detail_tool else {
            // Not a search tool; nothing to chain.
            return Ok(search_text.to_string());
        };

        let Some(id) = find_identifier(search_text) else {
            return Ok(format!(
                "Search succeeded but no valid ID found in the result.\n{}",
                search_text
            ));
        };

        log::debug!("Following up '{}' with {} (id {})", tool_name, detail_tool, id);

        let mut arguments = Map::new();
        arguments.insert("id".to_string(), Value::from(id));
        let detail_call = ToolCall::new(detail_tool, arguments);

        let detail_text = self.dispatcher.dispatch(&detail_call).await?;

        Ok(format!(
            "Search Result:\n{}\n\nDetailed Info:\n{}",
            search_text, detail_text
        ))
    }
}
