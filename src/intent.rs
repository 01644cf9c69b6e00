//! Intent resolution
//!
//! Turns a free-form user query into (at most) one candidate tool directive
//! by asking the LLM with a constrained system prompt.

use std::sync::Arc;

use crate::error::Result;
use crate::llm::{CompletionRequest, LlmClient};
use crate::tools::ToolCatalog;

const PROMPT_HEADER: &str =
    "You route user queries to backend tools. You may call exactly one of these tools:";

const PROMPT_RULES: &str = "\
If one of these tools answers the query, respond with exactly one line in the \
form TOOL:<name> <json arguments> and no other text. The arguments must be a \
single flat JSON object. If no tool applies, answer the query directly in \
plain text without any TOOL: marker.";

/// Build the fixed instruction from the catalog: every tool signature with
/// its description, plus the strict output-format rule.
fn build_system_prompt(catalog: &ToolCatalog) -> String {
    let mut names = catalog.list();
    names.sort_unstable();

    let tool_lines: Vec<String> = names
        .iter()
        .filter_map(|name| catalog.get(name))
        .map(|spec| format!("{} - {}", spec.prompt_signature(), spec.description))
        .collect();

    format!("{}\n\n{}\n\n{}", PROMPT_HEADER, tool_lines.join("\n"), PROMPT_RULES)
}

/// Resolves a query into raw LLM text that may contain a tool directive.
pub struct IntentResolver {
    client: Arc<dyn LlmClient>,
    system_prompt: String,
}

impl IntentResolver {
    /// Create a resolver over the given LLM client, enumerating the
    /// catalog's tools in the system prompt.
    pub fn new(client: Arc<dyn LlmClient>, catalog: &ToolCatalog) -> Self {
        Self {
            system_prompt: build_system_prompt(catalog),
            client,
        }
    }

    /// Ask the LLM to route the query. Returns the first completion's raw
    /// text; an endpoint response missing expected fields arrives here as an
    /// empty string, which downstream stages treat as "no tool detected".
    /// Sampling parameters (temperature, token budget) are left to the
    /// client's configuration.
    pub async fn resolve(&self, query: &str) -> Result<String> {
        let request =
            CompletionRequest::new(self.system_prompt.as_str()).with_user_message(query);

        let response = self.client.complete(request).await?;
        log::debug!("Intent for query {:?}: {:?}", query, response.content);
        Ok(response.content)
    }
}

impl std::fmt::Debug for IntentResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntentResolver")
            .field("model", &self.client.model())
            .finish()
    }
}
