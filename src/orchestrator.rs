//! Per-query orchestration
//!
//! Sequences intent resolution, extraction, dispatch, and follow-up into a
//! single response string. Holds no state across queries.

use crate::error::Result;
use crate::extract::extract_tool_call;
use crate::followup::FollowUpController;
use crate::intent::IntentResolver;
use crate::tools::Dispatcher;

/// Orchestrates one query end to end over injected collaborators.
pub struct Orchestrator {
    resolver: IntentResolver,
    dispatcher: Dispatcher,
}

impl Orchestrator {
    /// Create an orchestrator over a resolver and dispatcher.
    pub fn new(resolver: IntentResolver, dispatcher: Dispatcher) -> Self {
        Self {
            resolver,
            dispatcher,
        }
    }

    /// Process one query into a final response.
    ///
    /// Errors from any stage abort the query and propagate to the caller;
    /// recoverable conditions (no tool detected, blank search term, no ID in
    /// a search result) come back as informative text.
    pub async fn process_query(&self, query: &str) -> Result<String> {
        let raw = self.resolver.resolve(query).await?;

        let Some(call) = extract_tool_call(&raw)? else {
            log::info!("No tool directive in LLM output for query {:?}", query);
            return Ok(format!("No tool call detected.\n{}", raw));
        };

        let is_search = self
            .dispatcher
            .catalog()
            .get(&call.name)
            .is_some_and(|spec| spec.is_search());

        let output = self.dispatcher.dispatch(&call).await?;

        if is_search {
            FollowUpController::new(&self.dispatcher)
                .maybe_follow_up(&call.name, &output)
                .await
        } else {
            Ok(format!("Tool Output: {}", output))
        }
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("resolver", &self.resolver)
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RefdeskError;
    use crate::gateway::GatewayKind;
    use crate::llm::MockLlmClient;
    use crate::tools::ToolCatalog;
    use crate::tools::dispatch::tests::MockGateway;
    use std::sync::Arc;

    fn orchestrator(
        llm: MockLlmClient,
        directory: MockGateway,
        publications: MockGateway,
    ) -> (Orchestrator, Arc<MockGateway>, Arc<MockGateway>) {
        let directory = Arc::new(directory);
        let publications = Arc::new(publications);
        let tools = ToolCatalog::standard();
        let orchestrator = Orchestrator::new(
            IntentResolver::new(Arc::new(llm), &tools),
            Dispatcher::new(tools, directory.clone(), publications.clone()),
        );
        (orchestrator, directory, publications)
    }

    #[tokio::test]
    async fn test_search_query_with_follow_up() {
        let llm = MockLlmClient::new().with_response("TOOL:searchPeopleByName {\"name\": \"Jane Doe\"}");
        let directory = MockGateway::new(GatewayKind::Directory)
            .with_text("Found: Jane Doe, ID: 42")
            .with_text("Jane Doe, Research Lead");
        let (orchestrator, directory, _) =
            orchestrator(llm, directory, MockGateway::new(GatewayKind::Catalog));

        let response = orchestrator.process_query("find Jane Doe").await.unwrap();

        assert!(response.contains("Search Result:"));
        assert!(response.contains("Detailed Info:"));
        assert_eq!(directory.call_count(), 2);
    }

    #[tokio::test]
    async fn test_no_tool_detected_surfaces_raw_text() {
        let llm = MockLlmClient::new().with_response("I cannot help with that.");
        let (orchestrator, directory, publications) = orchestrator(
            llm,
            MockGateway::new(GatewayKind::Directory),
            MockGateway::new(GatewayKind::Catalog),
        );

        let response = orchestrator.process_query("tell me a joke").await.unwrap();

        assert!(response.starts_with("No tool call detected."));
        assert!(response.contains("I cannot help with that."));
        assert_eq!(directory.call_count(), 0);
        assert_eq!(publications.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_completion_is_no_tool_detected() {
        let (orchestrator, directory, _) = orchestrator(
            MockLlmClient::new(),
            MockGateway::new(GatewayKind::Directory),
            MockGateway::new(GatewayKind::Catalog),
        );

        let response = orchestrator.process_query("anything").await.unwrap();
        assert!(response.starts_with("No tool call detected."));
        assert_eq!(directory.call_count(), 0);
    }

    #[tokio::test]
    async fn test_detail_query_labeled_tool_output() {
        let llm = MockLlmClient::new().with_response("TOOL:getPersonById {\"id\": 42}");
        let directory = MockGateway::new(GatewayKind::Directory).with_text("Jane Doe, Research Lead");
        let (orchestrator, directory, _) =
            orchestrator(llm, directory, MockGateway::new(GatewayKind::Catalog));

        let response = orchestrator.process_query("person 42").await.unwrap();

        assert_eq!(response, "Tool Output: Jane Doe, Research Lead");
        assert_eq!(directory.call_count(), 1);
    }

    #[tokio::test]
    async fn test_malformed_arguments_abort_without_gateway_calls() {
        let llm = MockLlmClient::new().with_response("TOOL:searchPeopleByName {name: Jane}");
        let (orchestrator, directory, publications) = orchestrator(
            llm,
            MockGateway::new(GatewayKind::Directory),
            MockGateway::new(GatewayKind::Catalog),
        );

        let err = orchestrator.process_query("find Jane").await.unwrap_err();

        assert!(matches!(err, RefdeskError::MalformedIntent(_)));
        assert_eq!(directory.call_count(), 0);
        assert_eq!(publications.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_tool_aborts_without_gateway_calls() {
        let llm = MockLlmClient::new().with_response("TOOL:deletePerson {\"id\": 1}");
        let (orchestrator, directory, publications) = orchestrator(
            llm,
            MockGateway::new(GatewayKind::Directory),
            MockGateway::new(GatewayKind::Catalog),
        );

        let err = orchestrator.process_query("remove person 1").await.unwrap_err();

        assert!(matches!(err, RefdeskError::UnknownTool(_)));
        assert_eq!(directory.call_count(), 0);
        assert_eq!(publications.call_count(), 0);
    }

    #[tokio::test]
    async fn test_search_without_id_reports_no_valid_id() {
        let llm = MockLlmClient::new()
            .with_response("TOOL:searchPublicationsByAuthor {\"author\": \"Nobody\"}");
        let publications = MockGateway::new(GatewayKind::Catalog).with_text("No publications found.");
        let (orchestrator, _, publications) =
            orchestrator(llm, MockGateway::new(GatewayKind::Directory), publications);

        let response = orchestrator.process_query("papers by Nobody").await.unwrap();

        assert!(response.contains("no valid ID found"));
        assert!(response.contains("No publications found."));
        assert_eq!(publications.call_count(), 1);
    }
}
