//! Changelist row state
//!
//! Rows are a flat list; nesting lives in each row's ancestor path, so
//! collapsing a branch is one retain pass over the list. The initial rows
//! are kept as a snapshot and restored verbatim when the search clears.

use indexmap::{IndexMap, IndexSet};
use shared::{NodeKey, TreeNode};

/// Monotonic token identifying one issued changelist request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListToken(u64);

/// One visible changelist row. `path` holds the keys of all ancestors that
/// were expanded to reveal it; initial and search rows have an empty path.
#[derive(Debug, Clone, PartialEq)]
pub struct ListRow {
    pub node: TreeNode,
    pub path: Vec<NodeKey>,
}

/// Row plus presentation flags, ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry {
    pub node: TreeNode,
    pub depth: usize,
    pub expandable: bool,
    pub expanded: bool,
}

/// A children request the actor glue should put on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildrenPlan {
    pub token: ListToken,
    pub parent: NodeKey,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchPlan {
    pub token: ListToken,
    pub term: String,
}

/// What a settled search term asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchAction {
    /// Term cleared; the original rows were restored locally.
    Restore,
    /// Term present; fetch matching nodes.
    Fetch(SearchPlan),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListState {
    rows: Vec<ListRow>,
    snapshot: Vec<ListRow>,
    expanded: IndexSet<NodeKey>,
    search_active: bool,
    // Expansions of different rows are independent; each parent tracks its
    // own latest token
    pending_children: IndexMap<NodeKey, ListToken>,
    pending_search: Option<ListToken>,
    next_token: u64,
}

impl ListState {
    /// `initial` is the server-rendered top slice of the changelist.
    pub fn new(initial: Vec<TreeNode>) -> Self {
        let rows: Vec<ListRow> = initial
            .into_iter()
            .map(|node| ListRow {
                node,
                path: Vec::new(),
            })
            .collect();
        Self {
            snapshot: rows.clone(),
            rows,
            expanded: IndexSet::new(),
            search_active: false,
            pending_children: IndexMap::new(),
            pending_search: None,
            next_token: 0,
        }
    }

    pub fn entries(&self) -> Vec<ListEntry> {
        self.rows
            .iter()
            .map(|row| {
                let expanded = row
                    .node
                    .key()
                    .is_some_and(|key| self.expanded.contains(key));
                ListEntry {
                    node: row.node.clone(),
                    depth: row.path.len(),
                    expandable: !row.node.is_leaf,
                    expanded,
                }
            })
            .collect()
    }

    /// An active search with no matches shows a "nothing found" row.
    pub fn nothing_found(&self) -> bool {
        self.search_active && self.rows.is_empty()
    }

    /// Expand/collapse click on one row. Collapse is resolved locally;
    /// expansion asks for a children fetch, every time, nothing is cached.
    /// A re-click while that row's fetch is in flight supersedes it; other
    /// rows' fetches are unaffected.
    pub fn toggle_clicked(&mut self, key: NodeKey) -> Option<ChildrenPlan> {
        if self.expanded.contains(&key) {
            self.collapse(&key);
            self.pending_children.shift_remove(&key);
            return None;
        }
        let token = self.issue_token();
        self.pending_children.insert(key.clone(), token);
        Some(ChildrenPlan { token, parent: key })
    }

    /// Children arrived for one pending expansion. Applied only when the
    /// token is still that parent's latest. An empty child list leaves the
    /// row collapsed, so a later click asks again.
    pub fn children_loaded(&mut self, token: ListToken, children: Vec<TreeNode>) -> bool {
        let Some(parent_key) = self
            .pending_children
            .iter()
            .find(|(_, pending)| **pending == token)
            .map(|(key, _)| key.clone())
        else {
            return false;
        };
        self.pending_children.shift_remove(&parent_key);
        if children.is_empty() {
            return true;
        }
        let Some(position) = self
            .rows
            .iter()
            .position(|row| row.node.key() == Some(&parent_key))
        else {
            return true;
        };

        let mut child_path = self.rows[position].path.clone();
        child_path.push(parent_key.clone());
        let new_rows: Vec<ListRow> = children
            .into_iter()
            .map(|node| ListRow {
                node,
                path: child_path.clone(),
            })
            .collect();
        self.rows.splice(position + 1..position + 1, new_rows);
        self.expanded.insert(parent_key);
        true
    }

    /// Debounced search term settled. An empty term restores the snapshot
    /// locally; anything else becomes a fetch plan. Either way the row set
    /// is about to change wholesale, so in-flight expansions are dropped.
    pub fn search_settled(&mut self, term: String) -> SearchAction {
        self.pending_children.clear();
        if term.is_empty() {
            self.pending_search = None;
            self.rows = self.snapshot.clone();
            self.expanded.clear();
            self.search_active = false;
            return SearchAction::Restore;
        }
        let token = self.issue_token();
        self.pending_search = Some(token);
        SearchAction::Fetch(SearchPlan { token, term })
    }

    /// Matches arrived: they replace the whole list, rendered root-level
    /// and collapsed. Expanding a match works like any other row.
    pub fn search_loaded(&mut self, token: ListToken, results: Vec<TreeNode>) -> bool {
        if self.pending_search != Some(token) {
            return false;
        }
        self.pending_search = None;
        self.expanded.clear();
        self.search_active = true;
        self.rows = results
            .into_iter()
            .map(|node| ListRow {
                node,
                path: Vec::new(),
            })
            .collect();
        true
    }

    /// A request failed; the list keeps its current rows.
    pub fn load_failed(&mut self, token: ListToken) {
        if self.pending_search == Some(token) {
            self.pending_search = None;
            return;
        }
        self.pending_children.retain(|_, pending| *pending != token);
    }

    fn collapse(&mut self, key: &NodeKey) {
        self.expanded.shift_remove(key);
        let expanded = &mut self.expanded;
        self.rows.retain(|row| {
            if row.path.contains(key) {
                if let Some(row_key) = row.node.key() {
                    expanded.shift_remove(row_key);
                }
                false
            } else {
                true
            }
        });
    }

    fn issue_token(&mut self) -> ListToken {
        let token = ListToken(self.next_token);
        self.next_token += 1;
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: i64, text: &str, is_leaf: bool) -> TreeNode {
        TreeNode {
            id: Some(NodeKey::Int(id)),
            text: text.to_string(),
            level: 0,
            is_leaf,
        }
    }

    fn texts(state: &ListState) -> Vec<String> {
        state.entries().into_iter().map(|entry| entry.node.text).collect()
    }

    fn initial() -> Vec<TreeNode> {
        vec![node(1, "Electronics", false), node(2, "Food", false)]
    }

    #[test]
    fn expansion_inserts_children_below_the_parent() {
        let mut state = ListState::new(initial());

        let plan = state.toggle_clicked(NodeKey::Int(1)).unwrap();
        assert_eq!(plan.parent, NodeKey::Int(1));

        assert!(state.children_loaded(plan.token, vec![node(10, "Phones", true)]));
        assert_eq!(texts(&state), vec!["Electronics", "Phones", "Food"]);

        let entries = state.entries();
        assert_eq!(entries[1].depth, 1);
        assert!(entries[0].expanded);
    }

    #[test]
    fn concurrent_expansions_of_different_rows_both_apply() {
        let mut state = ListState::new(initial());

        // Second expander clicked before the first fetch returns
        let first = state.toggle_clicked(NodeKey::Int(1)).unwrap();
        let second = state.toggle_clicked(NodeKey::Int(2)).unwrap();

        assert!(state.children_loaded(first.token, vec![node(10, "Phones", true)]));
        assert!(state.children_loaded(second.token, vec![node(20, "Fruit", true)]));

        assert_eq!(texts(&state), vec!["Electronics", "Phones", "Food", "Fruit"]);
        assert!(state.entries()[0].expanded);
        assert!(state.entries()[2].expanded);
    }

    #[test]
    fn reclicking_a_pending_row_supersedes_its_fetch() {
        let mut state = ListState::new(initial());

        let slow = state.toggle_clicked(NodeKey::Int(1)).unwrap();
        let fast = state.toggle_clicked(NodeKey::Int(1)).unwrap();

        // Only the latest token for that parent is applied
        assert!(!state.children_loaded(slow.token, vec![node(10, "Old", true)]));
        assert!(state.children_loaded(fast.token, vec![node(10, "Phones", true)]));
        assert_eq!(texts(&state), vec!["Electronics", "Phones", "Food"]);
    }

    #[test]
    fn collapse_removes_nested_descendants() {
        let mut state = ListState::new(initial());

        let plan = state.toggle_clicked(NodeKey::Int(1)).unwrap();
        state.children_loaded(plan.token, vec![node(10, "Phones", false)]);
        let plan = state.toggle_clicked(NodeKey::Int(10)).unwrap();
        state.children_loaded(plan.token, vec![node(100, "Smartphones", true)]);
        assert_eq!(
            texts(&state),
            vec!["Electronics", "Phones", "Smartphones", "Food"]
        );

        // Collapsing the top row takes the whole branch with it
        assert_eq!(state.toggle_clicked(NodeKey::Int(1)), None);
        assert_eq!(texts(&state), vec!["Electronics", "Food"]);

        // The grandchild's expanded mark is gone too: re-expanding shows
        // only direct children again
        let plan = state.toggle_clicked(NodeKey::Int(1)).unwrap();
        state.children_loaded(plan.token, vec![node(10, "Phones", false)]);
        assert!(!state.entries()[1].expanded);
    }

    #[test]
    fn empty_children_leave_the_row_collapsed() {
        let mut state = ListState::new(initial());

        let plan = state.toggle_clicked(NodeKey::Int(1)).unwrap();
        assert!(state.children_loaded(plan.token, vec![]));
        assert!(!state.entries()[0].expanded);

        // The next click asks again instead of collapsing
        assert!(state.toggle_clicked(NodeKey::Int(1)).is_some());
    }

    #[test]
    fn stale_children_are_discarded_after_a_newer_request() {
        let mut state = ListState::new(initial());

        let slow = state.toggle_clicked(NodeKey::Int(1)).unwrap();
        let SearchAction::Fetch(search) = state.search_settled("pho".to_string()) else {
            panic!("expected a fetch");
        };

        assert!(!state.children_loaded(slow.token, vec![node(10, "Phones", true)]));
        assert!(state.search_loaded(search.token, vec![node(10, "Phones", true)]));
        assert_eq!(texts(&state), vec!["Phones"]);
    }

    #[test]
    fn search_results_render_root_level_and_collapsed() {
        let mut state = ListState::new(initial());

        let plan = state.toggle_clicked(NodeKey::Int(1)).unwrap();
        state.children_loaded(plan.token, vec![node(10, "Phones", false)]);

        let SearchAction::Fetch(search) = state.search_settled("pho".to_string()) else {
            panic!("expected a fetch");
        };
        state.search_loaded(search.token, vec![node(10, "Phones", false)]);

        let entries = state.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].depth, 0);
        assert!(!entries[0].expanded);

        // A search-revealed row expands in place
        let plan = state.toggle_clicked(NodeKey::Int(10)).unwrap();
        state.children_loaded(plan.token, vec![node(100, "Smartphones", true)]);
        assert_eq!(texts(&state), vec!["Phones", "Smartphones"]);
    }

    #[test]
    fn clearing_the_search_restores_the_initial_rows() {
        let mut state = ListState::new(initial());
        let before = state.entries();

        let SearchAction::Fetch(search) = state.search_settled("x".to_string()) else {
            panic!("expected a fetch");
        };
        state.search_loaded(search.token, vec![]);
        assert!(state.nothing_found());

        assert_eq!(state.search_settled(String::new()), SearchAction::Restore);
        assert!(!state.nothing_found());
        assert_eq!(state.entries(), before);
    }

    #[test]
    fn failed_load_keeps_current_rows_and_unblocks_the_list() {
        let mut state = ListState::new(initial());

        let plan = state.toggle_clicked(NodeKey::Int(1)).unwrap();
        state.load_failed(plan.token);
        assert_eq!(texts(&state), vec!["Electronics", "Food"]);

        // A fresh toggle issues a new request
        assert!(state.toggle_clicked(NodeKey::Int(1)).is_some());
    }
}
