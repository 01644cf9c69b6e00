//! Tool-call extraction from free-form LLM text
//!
//! The model is instructed to emit at most one `TOOL:<name> {json}` line,
//! but the reply is still free text; scanning it is inherently best-effort
//! and isolated here as a single well-tested function.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::{RefdeskError, Result};
use crate::tools::ToolCall;

/// First `TOOL:` directive: a bare identifier, whitespace, then one
/// brace-delimited object whose contents exclude closing braces.
static TOOL_DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"TOOL:(\w+)\s*(\{[^}]*\})").unwrap());

/// Extract the first tool-call directive from raw LLM text.
///
/// Returns `Ok(None)` when no directive is present; that is a normal
/// outcome, not an error. A directive whose argument object is not valid
/// JSON (or not an object) is a hard error for the query, logged with the
/// offending text.
///
/// Limitations, accepted from the original design: the scanner takes the
/// first match only and cannot capture an argument object containing a
/// nested object or a literal `}` inside a string value. The catalog tools
/// all take flat string/number arguments, so such objects are out of
/// contract anyway.
pub fn extract_tool_call(raw: &str) -> Result<Option<ToolCall>> {
    let Some(captures) = TOOL_DIRECTIVE.captures(raw) else {
        return Ok(None);
    };

    let name = captures[1].trim().to_string();
    let args_text = captures[2].trim();

    let arguments: Value = serde_json::from_str(args_text).map_err(|e| {
        log::error!("Tool directive with unparseable arguments: {} ({})", args_text, e);
        RefdeskError::MalformedIntent(args_text.to_string())
    })?;

    let Value::Object(arguments) = arguments else {
        log::error!("Tool directive arguments are not an object: {}", args_text);
        return Err(RefdeskError::MalformedIntent(args_text.to_string()));
    };

    Ok(Some(ToolCall::new(name, arguments)))
}
