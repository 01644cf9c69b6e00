//! Tool layer - the static tool catalog and the dispatcher that routes tool
//! calls to their owning gateway.

pub mod catalog;
pub mod dispatch;

use serde_json::{Map, Value};

pub use catalog::{
    GET_PERSON_BY_ID, GET_PUBLICATION_BY_ID, SEARCH_PEOPLE_BY_NAME, SEARCH_PUBLICATIONS_BY_AUTHOR,
    ToolCatalog, ToolSpec,
};
pub use dispatch::Dispatcher;

/// A structured tool invocation directive.
///
/// Produced by the extractor from raw LLM text; consumed once per query.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCall {
    pub name: String,
    pub arguments: Map<String, Value>,
}

impl ToolCall {
    /// Create a new tool call.
    pub fn new(name: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// The arguments as a JSON value, for the gateway wire format.
    pub fn params(&self) -> Value {
        Value::Object(self.arguments.clone())
    }
}
