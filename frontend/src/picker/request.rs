//! Request/parameter builder
//!
//! Turns the picker's current query state plus a page signal into the query
//! parameters the autocomplete endpoint expects. No page caching: every
//! settled search term produces a fresh request.

use crate::picker::anchor::Anchor;
use shared::{Direction, NodeKey, TreePageRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBuilder {
    model: Option<String>,
    initial_selected: Option<NodeKey>,
    limit: u32,
}

impl RequestBuilder {
    pub fn new(model: Option<String>, initial_selected: Option<NodeKey>, limit: u32) -> Self {
        Self {
            model,
            initial_selected,
            limit,
        }
    }

    /// Build one page request. The search term passes through unmodified,
    /// the server performs the matching. `selected_id` prefers the latched
    /// anchor and falls back to the host-configured initial selection; both
    /// absent means "no anchor, load top-level".
    pub fn build(&self, anchor: &Anchor, search_term: &str, direction: Direction) -> TreePageRequest {
        let selected_id = anchor
            .key()
            .or(self.initial_selected.as_ref())
            .cloned();
        TreePageRequest {
            q: search_term.to_string(),
            model: self.model.clone(),
            selected_id,
            direction,
            limit: self.limit,
        }
    }
}
