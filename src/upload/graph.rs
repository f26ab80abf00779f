//! Parsing of the Brain's embedded concept graph.

use serde_json::Value;

/// Outcome of parsing the `graph_json` string from the Brain.
#[derive(Debug)]
pub enum GraphPayload {
    /// The Brain sent no graph.
    Absent,
    /// A JSON array of opaque concept values, in order.
    Parsed(Vec<Value>),
    /// The string was not a JSON array.
    Malformed(serde_json::Error),
}

impl GraphPayload {
    pub fn parse(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return GraphPayload::Absent;
        }
        match serde_json::from_str::<Vec<Value>>(raw) {
            Ok(values) => GraphPayload::Parsed(values),
            Err(e) => GraphPayload::Malformed(e),
        }
    }
}
