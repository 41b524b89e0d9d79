//! Common types used throughout repo-search
//!
//! This module contains shared type definitions and type aliases
//! used across multiple modules.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[allow(clippy::upper_case_acronyms)]
pub enum Method {
    #[default]
    GET,
}

impl Method {
    /// Wire name of the method
    pub fn as_str(self) -> &'static str {
        match self {
            Method::GET => "GET",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_default() {
        assert_eq!(Method::default(), Method::GET);
        assert_eq!(reqwest::Method::from(Method::GET), reqwest::Method::GET);
        assert_eq!(Method::GET.to_string(), "GET");
    }

    #[test]
    fn test_method_serde() {
        let json = serde_json::to_string(&Method::GET).unwrap();
        assert_eq!(json, "\"GET\"");
        let parsed: Method = serde_json::from_str("\"GET\"").unwrap();
        assert_eq!(parsed, Method::GET);
    }
}
