//! refdesk - LLM-routed query orchestration
//!
//! refdesk turns a natural-language query into a single structured tool
//! call via an LLM, dispatches it to the owning backend gateway (people
//! directory or publications catalog), chains an automatic detail lookup
//! when the search result carries an identifier, and assembles one textual
//! response.

pub mod config;
pub mod error;
pub mod extract;
pub mod followup;
pub mod gateway;
pub mod intent;
pub mod llm;
pub mod orchestrator;
pub mod tools;

pub use error::{RefdeskError, Result};
