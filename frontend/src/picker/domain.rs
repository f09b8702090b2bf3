//! Picker domain with Actor+Relay architecture
//!
//! One Actor owns the whole [`PickerState`]; UI events arrive through
//! relays and are processed sequentially, so there is a single point of
//! mutation. Network pages come back through an internal relay, which keeps
//! the fetch tasks out of the state actor itself.

use crate::dataflow::{Actor, Relay, relay};
use crate::fetch::{FetchError, TreeFetch};
use crate::picker::config::PickerConfig;
use crate::picker::pager::RequestToken;
use crate::picker::state::{PagePlan, PickerState};
use futures::{FutureExt, StreamExt};
use shared::{TreeNode, TreePage};
use std::sync::Arc;
use zoon::{Signal, Task, Timer};

/// Keystrokes within this window collapse into one search request.
pub const SEARCH_DEBOUNCE_MS: u32 = 250;

#[derive(Clone)]
pub struct TreePickerDomain {
    state_actor: Actor<PickerState>,

    // Event-source relays for UI interactions
    pub dropdown_opened_relay: Relay,
    pub search_input_changed_relay: Relay<String>,
    pub list_end_neared_relay: Relay,
    pub node_chosen_relay: Relay<TreeNode>,
    pub selection_cleared_relay: Relay,
}

impl TreePickerDomain {
    pub fn new(config: &PickerConfig, fetcher: Arc<dyn TreeFetch>) -> Self {
        let (dropdown_opened_relay, dropdown_opened_stream) = relay();
        let (search_input_changed_relay, search_input_changed_stream) = relay::<String>();
        let (list_end_neared_relay, list_end_neared_stream) = relay();
        let (node_chosen_relay, node_chosen_stream) = relay::<TreeNode>();
        let (selection_cleared_relay, selection_cleared_stream) = relay();

        // Internal relay for async page arrivals
        let (page_loaded_relay, page_loaded_stream) =
            relay::<(RequestToken, Result<TreePage, FetchError>)>();

        let state_actor = Actor::new(PickerState::new(config), {
            let page_loaded_relay = page_loaded_relay.clone();
            async move |state| {
                let mut opened_stream = dropdown_opened_stream.fuse();
                let mut search_stream = search_input_changed_stream.fuse();
                let mut end_neared_stream = list_end_neared_stream.fuse();
                let mut chosen_stream = node_chosen_stream.fuse();
                let mut cleared_stream = selection_cleared_stream.fuse();
                let mut loaded_stream = page_loaded_stream.fuse();

                loop {
                    futures::select! {
                        event = opened_stream.next() => {
                            if event.is_some() {
                                let mut current = state.get_cloned();
                                let plan = current.dropdown_opened();
                                state.set_neq(current);
                                start_page_load(&fetcher, &page_loaded_relay, plan);
                            }
                        }
                        term = search_stream.next() => {
                            if let Some(mut term) = term {
                                // Debounce loop: each keystroke restarts the
                                // timer, only the settled term hits the server
                                loop {
                                    futures::select! {
                                        next_term = search_stream.next() => {
                                            match next_term {
                                                Some(next_term) => term = next_term,
                                                None => break,
                                            }
                                        }
                                        _ = Timer::sleep(SEARCH_DEBOUNCE_MS).fuse() => {
                                            let mut current = state.get_cloned();
                                            let plan = current.search_settled(term);
                                            state.set_neq(current);
                                            start_page_load(&fetcher, &page_loaded_relay, plan);
                                            break;
                                        }
                                    }
                                }
                            }
                        }
                        event = end_neared_stream.next() => {
                            if event.is_some() {
                                let mut current = state.get_cloned();
                                let plan = current.list_end_neared();
                                state.set_neq(current);
                                if let Some(plan) = plan {
                                    start_page_load(&fetcher, &page_loaded_relay, plan);
                                }
                            }
                        }
                        node = chosen_stream.next() => {
                            if let Some(node) = node {
                                let mut current = state.get_cloned();
                                current.node_chosen(node);
                                state.set_neq(current);
                            }
                        }
                        event = cleared_stream.next() => {
                            if event.is_some() {
                                let mut current = state.get_cloned();
                                current.selection_cleared();
                                state.set_neq(current);
                            }
                        }
                        loaded = loaded_stream.next() => {
                            if let Some((token, result)) = loaded {
                                let mut current = state.get_cloned();
                                match result {
                                    Ok(page) => {
                                        current.page_loaded(token, page);
                                    }
                                    Err(error) => {
                                        zoon::eprintln!("tree page load failed: {error}");
                                        current.load_failed(token);
                                    }
                                }
                                state.set_neq(current);
                            }
                        }
                        complete => break,
                    }
                }
            }
        });

        Self {
            state_actor,
            dropdown_opened_relay,
            search_input_changed_relay,
            list_end_neared_relay,
            node_chosen_relay,
            selection_cleared_relay,
        }
    }

    /// Rows currently shown in the dropdown, in server order.
    pub fn options_signal(&self) -> impl Signal<Item = Vec<TreeNode>> + use<> {
        self.state_actor.signal_ref(|state| state.options().to_vec())
    }

    /// The node currently shown in the closed widget, if any.
    pub fn selected_signal(&self) -> impl Signal<Item = Option<TreeNode>> + use<> {
        self.state_actor.signal_ref(|state| state.selected().cloned())
    }
}

fn start_page_load(
    fetcher: &Arc<dyn TreeFetch>,
    page_loaded_relay: &Relay<(RequestToken, Result<TreePage, FetchError>)>,
    plan: PagePlan,
) {
    let page_future = fetcher.fetch_page(plan.request);
    let page_loaded_relay = page_loaded_relay.clone();
    Task::start(async move {
        let result = page_future.await;
        page_loaded_relay.send((plan.token, result));
    });
}
