//! Static tool catalog
//!
//! Four fixed tools, two per backend. Built once at startup and never
//! mutated afterwards; shared read-only across queries.

use std::collections::HashMap;

use serde_json::{Map, Value, json};

use crate::error::{RefdeskError, Result};
use crate::gateway::GatewayKind;

pub const SEARCH_PEOPLE_BY_NAME: &str = "searchPeopleByName";
pub const GET_PERSON_BY_ID: &str = "getPersonById";
pub const SEARCH_PUBLICATIONS_BY_AUTHOR: &str = "searchPublicationsByAuthor";
pub const GET_PUBLICATION_BY_ID: &str = "getPublicationById";

/// One entry in the static tool catalog.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    pub name: String,
    pub gateway: GatewayKind,
    pub description: String,
    pub input_schema: Value,
    /// For search tools, the argument holding the search term.
    search_field: Option<String>,
    /// For search tools, the paired detail tool invoked on a found ID.
    detail_tool: Option<String>,
}

impl ToolSpec {
    fn new(
        name: &str,
        gateway: GatewayKind,
        description: &str,
        input_schema: Value,
    ) -> Self {
        Self {
            name: name.to_string(),
            gateway,
            description: description.to_string(),
            input_schema,
            search_field: None,
            detail_tool: None,
        }
    }

    fn searching(mut self, field: &str, detail_tool: &str) -> Self {
        self.search_field = Some(field.to_string());
        self.detail_tool = Some(detail_tool.to_string());
        self
    }

    /// The argument holding the search term, if this is a search tool.
    pub fn search_field(&self) -> Option<&str> {
        self.search_field.as_deref()
    }

    /// The paired detail tool, if this is a search tool.
    pub fn detail_tool(&self) -> Option<&str> {
        self.detail_tool.as_deref()
    }

    /// Whether this tool is a search over its backend.
    pub fn is_search(&self) -> bool {
        self.search_field.is_some()
    }

    /// Render this tool as a one-line directive signature for the routing
    /// prompt, e.g. `TOOL:getPersonById {"id": <id>}`.
    pub fn prompt_signature(&self) -> String {
        let mut fields = Vec::new();
        if let Some(properties) = self.input_schema["properties"].as_object() {
            for (field, prop) in properties {
                let placeholder = match prop["type"].as_str() {
                    Some("string") => format!("\"<{}>\"", field),
                    _ => format!("<{}>", field),
                };
                fields.push(format!("\"{}\": {}", field, placeholder));
            }
        }
        format!("TOOL:{} {{{}}}", self.name, fields.join(", "))
    }

    /// Validate arguments against this tool's schema.
    ///
    /// Checks that every required field is present and that declared property
    /// types (string/number) match.
    pub fn validate_arguments(&self, arguments: &Map<String, Value>) -> Result<()> {
        if let Some(required) = self.input_schema["required"].as_array() {
            for field in required.iter().filter_map(|f| f.as_str()) {
                if !arguments.contains_key(field) {
                    return Err(RefdeskError::InvalidArguments(format!(
                        "tool '{}' missing required field: {}",
                        self.name, field
                    )));
                }
            }
        }

        if let Some(properties) = self.input_schema["properties"].as_object() {
            for (field, prop) in properties {
                let Some(value) = arguments.get(field) else {
                    continue;
                };
                let ok = match prop["type"].as_str() {
                    Some("string") => value.is_string(),
                    Some("number") => value.is_number(),
                    _ => true,
                };
                if !ok {
                    return Err(RefdeskError::InvalidArguments(format!(
                        "tool '{}' field '{}' must be a {}",
                        self.name,
                        field,
                        prop["type"].as_str().unwrap_or("value")
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Catalog of the four tool definitions.
#[derive(Debug, Clone)]
pub struct ToolCatalog {
    tools: HashMap<String, ToolSpec>,
}

impl ToolCatalog {
    /// Build the standard four-entry catalog.
    pub fn standard() -> Self {
        let mut tools = HashMap::new();

        let entries = [
            ToolSpec::new(
                SEARCH_PEOPLE_BY_NAME,
                GatewayKind::Directory,
                "Search the people directory by name",
                json!({
                    "type": "object",
                    "properties": { "name": { "type": "string" } },
                    "required": ["name"]
                }),
            )
            .searching("name", GET_PERSON_BY_ID),
            ToolSpec::new(
                GET_PERSON_BY_ID,
                GatewayKind::Directory,
                "Fetch full details for a person by numeric ID",
                json!({
                    "type": "object",
                    "properties": { "id": { "type": "number" } },
                    "required": ["id"]
                }),
            ),
            ToolSpec::new(
                SEARCH_PUBLICATIONS_BY_AUTHOR,
                GatewayKind::Catalog,
                "Search the publications catalog by author name",
                json!({
                    "type": "object",
                    "properties": { "author": { "type": "string" } },
                    "required": ["author"]
                }),
            )
            .searching("author", GET_PUBLICATION_BY_ID),
            ToolSpec::new(
                GET_PUBLICATION_BY_ID,
                GatewayKind::Catalog,
                "Fetch full details for a publication by numeric ID",
                json!({
                    "type": "object",
                    "properties": { "id": { "type": "number" } },
                    "required": ["id"]
                }),
            ),
        ];

        for spec in entries {
            tools.insert(spec.name.clone(), spec);
        }

        Self { tools }
    }

    /// Get a tool by exact name.
    pub fn get(&self, name: &str) -> Option<&ToolSpec> {
        self.tools.get(name)
    }

    /// Check if a tool exists.
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// List all tool names.
    pub fn list(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    /// Get all tools.
    pub fn all(&self) -> impl Iterator<Item = &ToolSpec> {
        self.tools.values()
    }

    /// Get number of tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
