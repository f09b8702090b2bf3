//! Picker query state
//!
//! One value owned by the picker's state actor. Every widget event maps to
//! one method here; methods that need the network return a [`PagePlan`] the
//! actor glue turns into a fetch. All logic is synchronous and free of DOM
//! or task types, so the whole protocol is unit-testable.

use crate::picker::anchor::Anchor;
use crate::picker::config::PickerConfig;
use crate::picker::pager::{Pager, RequestToken};
use crate::picker::request::RequestBuilder;
use shared::{Direction, TreeNode, TreePage, TreePageRequest};

/// A page request the actor glue should put on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct PagePlan {
    pub token: RequestToken,
    pub request: TreePageRequest,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PickerState {
    builder: RequestBuilder,
    pager: Pager,
    anchor: Anchor,
    search_term: String,
    options: Vec<TreeNode>,
    selected: Option<TreeNode>,
}

impl PickerState {
    pub fn new(config: &PickerConfig) -> Self {
        Self {
            builder: RequestBuilder::new(
                config.model.clone(),
                config.initial_selected.clone(),
                config.limit,
            ),
            pager: Pager::new(),
            anchor: Anchor::Unset,
            search_term: String::new(),
            options: Vec::new(),
            selected: None,
        }
    }

    pub fn options(&self) -> &[TreeNode] {
        &self.options
    }

    pub fn selected(&self) -> Option<&TreeNode> {
        self.selected.as_ref()
    }

    pub fn anchor(&self) -> &Anchor {
        &self.anchor
    }

    /// Dropdown opened: fresh center load around the current anchor. The
    /// previous session's search term is discarded; the panel opens with an
    /// empty search box and the request has to match it.
    pub fn dropdown_opened(&mut self) -> PagePlan {
        self.search_term.clear();
        self.center_plan()
    }

    /// Debounced search term settled: fresh center load for the new term.
    pub fn search_settled(&mut self, term: String) -> PagePlan {
        self.search_term = term;
        self.center_plan()
    }

    /// Scroll trigger neared the list end: continuation load, preserving the
    /// current search term. Refused while a load is in flight or before the
    /// first center load completed.
    pub fn list_end_neared(&mut self) -> Option<PagePlan> {
        let token = self.pager.begin_down()?;
        let request = self
            .builder
            .build(&self.anchor, &self.search_term, Direction::Down);
        Some(PagePlan { token, request })
    }

    /// A page arrived. Applies it only when `token` is the latest issued
    /// one: center pages replace the option list, down pages append. Either
    /// way the server-suggested reference id may latch the anchor.
    ///
    /// Returns `false` for stale responses, which are discarded entirely.
    pub fn page_loaded(&mut self, token: RequestToken, page: TreePage) -> bool {
        let Some(direction) = self.pager.finish(token) else {
            return false;
        };
        if let Some(reference_id) = page.reference_id {
            self.anchor.latch(reference_id);
        }
        match direction {
            Direction::Center => self.options = page.results,
            Direction::Down => self.options.extend(page.results),
        }
        true
    }

    /// A request failed. The widget returns to idle with no new rows; there
    /// is no error state and no retry.
    pub fn load_failed(&mut self, token: RequestToken) {
        self.pager.finish(token);
    }

    /// User picked an option. Placeholder rows update the displayed
    /// selection only; real nodes re-anchor future center loads.
    pub fn node_chosen(&mut self, node: TreeNode) {
        if let Some(key) = node.key() {
            self.anchor.select(key.clone());
        }
        self.selected = Some(node);
    }

    /// Explicit clear from the host UI: the only transition back to an
    /// unset anchor.
    pub fn selection_cleared(&mut self) {
        self.selected = None;
        self.anchor.clear();
        self.search_term.clear();
    }

    fn center_plan(&mut self) -> PagePlan {
        let token = self.pager.begin_center();
        let request = self
            .builder
            .build(&self.anchor, &self.search_term, Direction::Center);
        PagePlan { token, request }
    }
}
