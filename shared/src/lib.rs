use serde::{Deserialize, Serialize};
use std::fmt;

// ===== NODE TYPES =====

/// Opaque node identifier as emitted by the tree backend.
///
/// The server is free to use integer primary keys or string keys (the
/// synthetic "Root" option arrives with an empty string id). The client never
/// interprets keys beyond equality and display.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum NodeKey {
    Int(i64),
    Text(String),
}

impl NodeKey {
    /// Empty string keys mark synthetic placeholder rows, not real nodes.
    pub fn is_empty(&self) -> bool {
        matches!(self, NodeKey::Text(text) if text.is_empty())
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKey::Int(key) => write!(f, "{key}"),
            NodeKey::Text(key) => write!(f, "{key}"),
        }
    }
}

impl From<i64> for NodeKey {
    fn from(key: i64) -> Self {
        NodeKey::Int(key)
    }
}

impl From<&str> for NodeKey {
    fn from(key: &str) -> Self {
        NodeKey::Text(key.to_string())
    }
}

impl From<String> for NodeKey {
    fn from(key: String) -> Self {
        NodeKey::Text(key)
    }
}

/// One node of the hierarchical dataset, as rendered by the server.
///
/// Produced per request; the client only renders it and never mutates it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TreeNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NodeKey>,
    pub text: String,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub is_leaf: bool,
}

impl TreeNode {
    /// Real key of this node, if any. Placeholder rows (missing or empty id)
    /// have none and are rendered as plain text.
    pub fn key(&self) -> Option<&NodeKey> {
        self.id.as_ref().filter(|key| !key.is_empty())
    }
}

// ===== REQUEST TYPES =====

/// Load direction relative to the anchor node.
///
/// `Center` is a fresh anchor-relative load (dropdown open, search change),
/// `Down` a continuation page beyond the last visible row. The server also
/// understands `up`; the widget never issues it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Center,
    Down,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Center => "center",
            Direction::Down => "down",
        }
    }
}

/// Query parameters of one autocomplete page request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TreePageRequest {
    pub q: String,
    pub model: Option<String>,
    pub selected_id: Option<NodeKey>,
    pub direction: Direction,
    pub limit: u32,
}

impl TreePageRequest {
    /// Deterministic key/value pairs for URL encoding. Absent optional
    /// parameters are omitted entirely, matching what the backend expects.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("q", self.q.clone())];
        if let Some(model) = &self.model {
            pairs.push(("model", model.clone()));
        }
        if let Some(selected_id) = &self.selected_id {
            pairs.push(("selected_id", selected_id.to_string()));
        }
        pairs.push(("direction", self.direction.as_str().to_string()));
        pairs.push(("limit", self.limit.to_string()));
        pairs
    }
}

// ===== RESPONSE TYPES =====

/// One page of nodes returned by the backend.
///
/// `reference_id` is a server-suggested anchor, sent when the client has no
/// current selection. The page itself is transient; only the `reference_id`
/// side effect outlives rendering.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TreePage {
    #[serde(default)]
    pub results: Vec<TreeNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<NodeKey>,
}

impl TreePage {
    pub fn empty() -> Self {
        Self {
            results: Vec::new(),
            reference_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_defaults_for_optional_fields() {
        let node: TreeNode = serde_json::from_str(r#"{"id": 7, "text": "Leaf"}"#).unwrap();
        assert_eq!(node.id, Some(NodeKey::Int(7)));
        assert_eq!(node.text, "Leaf");
        assert_eq!(node.level, 0);
        assert!(!node.is_leaf);
    }

    #[test]
    fn node_keys_accept_ints_and_strings() {
        let page: TreePage = serde_json::from_str(
            r#"{
                "results": [
                    {"id": "", "text": "Root", "level": 0, "is_leaf": true},
                    {"id": 1, "text": "Electronics", "level": 0, "is_leaf": false},
                    {"id": "a3f", "text": "Phones", "level": 1, "is_leaf": true}
                ],
                "reference_id": 1
            }"#,
        )
        .unwrap();

        assert_eq!(page.results.len(), 3);
        assert_eq!(page.results[0].id, Some(NodeKey::Text(String::new())));
        assert_eq!(page.results[1].id, Some(NodeKey::Int(1)));
        assert_eq!(page.results[2].id, Some(NodeKey::Text("a3f".to_string())));
        assert_eq!(page.reference_id, Some(NodeKey::Int(1)));
    }

    #[test]
    fn empty_string_key_is_placeholder() {
        let root: TreeNode =
            serde_json::from_str(r#"{"id": "", "text": "Root", "is_leaf": true}"#).unwrap();
        assert!(root.key().is_none());

        let real: TreeNode = serde_json::from_str(r#"{"id": "x", "text": "X"}"#).unwrap();
        assert_eq!(real.key(), Some(&NodeKey::Text("x".to_string())));
    }

    #[test]
    fn page_without_reference_id() {
        let page: TreePage = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert!(page.results.is_empty());
        assert_eq!(page.reference_id, None);
    }

    #[test]
    fn request_query_pairs_full() {
        let request = TreePageRequest {
            q: "cat".to_string(),
            model: Some("shop.Category".to_string()),
            selected_id: Some(NodeKey::Int(42)),
            direction: Direction::Down,
            limit: 10,
        };
        assert_eq!(
            request.query_pairs(),
            vec![
                ("q", "cat".to_string()),
                ("model", "shop.Category".to_string()),
                ("selected_id", "42".to_string()),
                ("direction", "down".to_string()),
                ("limit", "10".to_string()),
            ]
        );
    }

    #[test]
    fn request_query_pairs_omit_absent_parameters() {
        let request = TreePageRequest {
            q: String::new(),
            model: None,
            selected_id: None,
            direction: Direction::Center,
            limit: 10,
        };
        assert_eq!(
            request.query_pairs(),
            vec![
                ("q", String::new()),
                ("direction", "center".to_string()),
                ("limit", "10".to_string()),
            ]
        );
    }

    #[test]
    fn direction_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Direction::Center).unwrap(), r#""center""#);
        assert_eq!(serde_json::to_string(&Direction::Down).unwrap(), r#""down""#);
    }
}
