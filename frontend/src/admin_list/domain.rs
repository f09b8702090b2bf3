//! Changelist domain actor
//!
//! Same shape as the picker domain: one Actor owns the [`ListState`],
//! relays feed it UI events, fetch tasks report back through internal
//! relays so stale responses can be token-checked in one place.

use crate::admin_list::state::{ChildrenPlan, ListEntry, ListState, ListToken, SearchAction, SearchPlan};
use crate::dataflow::{Actor, Relay, relay};
use crate::fetch::{AdminListFetch, FetchError};
use futures::{FutureExt, StreamExt};
use shared::{NodeKey, TreeNode};
use std::sync::Arc;
use zoon::{Signal, Task, Timer};

/// The admin search debounces longer than the picker; changelist queries
/// hit the whole subtree.
pub const SEARCH_DEBOUNCE_MS: u32 = 500;

#[derive(Clone)]
pub struct AdminListDomain {
    state_actor: Actor<ListState>,

    // Event-source relays for UI interactions
    pub toggle_clicked_relay: Relay<NodeKey>,
    pub search_input_changed_relay: Relay<String>,
}

impl AdminListDomain {
    pub fn new(initial: Vec<TreeNode>, fetcher: Arc<dyn AdminListFetch>) -> Self {
        let (toggle_clicked_relay, toggle_clicked_stream) = relay::<NodeKey>();
        let (search_input_changed_relay, search_input_changed_stream) = relay::<String>();

        // Internal relays for async arrivals
        let (children_loaded_relay, children_loaded_stream) =
            relay::<(ListToken, Result<Vec<TreeNode>, FetchError>)>();
        let (search_loaded_relay, search_loaded_stream) =
            relay::<(ListToken, Result<Vec<TreeNode>, FetchError>)>();

        let state_actor = Actor::new(ListState::new(initial), {
            async move |state| {
                let mut toggle_stream = toggle_clicked_stream.fuse();
                let mut search_stream = search_input_changed_stream.fuse();
                let mut children_stream = children_loaded_stream.fuse();
                let mut matches_stream = search_loaded_stream.fuse();

                loop {
                    futures::select! {
                        key = toggle_stream.next() => {
                            if let Some(key) = key {
                                let mut current = state.get_cloned();
                                let plan = current.toggle_clicked(key);
                                state.set_neq(current);
                                if let Some(plan) = plan {
                                    start_children_load(&fetcher, &children_loaded_relay, plan);
                                }
                            }
                        }
                        term = search_stream.next() => {
                            if let Some(mut term) = term {
                                // Debounce loop: each keystroke restarts the timer
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
                                            let action = current.search_settled(term);
                                            state.set_neq(current);
                                            if let SearchAction::Fetch(plan) = action {
                                                start_search(&fetcher, &search_loaded_relay, plan);
                                            }
                                            break;
                                        }
                                    }
                                }
                            }
                        }
                        loaded = children_stream.next() => {
                            if let Some((token, result)) = loaded {
                                let mut current = state.get_cloned();
                                match result {
                                    Ok(children) => {
                                        current.children_loaded(token, children);
                                    }
                                    Err(error) => {
                                        zoon::eprintln!("children load failed: {error}");
                                        current.load_failed(token);
                                    }
                                }
                                state.set_neq(current);
                            }
                        }
                        loaded = matches_stream.next() => {
                            if let Some((token, result)) = loaded {
                                let mut current = state.get_cloned();
                                match result {
                                    Ok(results) => {
                                        current.search_loaded(token, results);
                                    }
                                    Err(error) => {
                                        zoon::eprintln!("changelist search failed: {error}");
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
            toggle_clicked_relay,
            search_input_changed_relay,
        }
    }

    /// Visible rows, in display order, with depth and toggle flags.
    pub fn entries_signal(&self) -> impl Signal<Item = Vec<ListEntry>> + use<> {
        self.state_actor.signal_ref(|state| state.entries())
    }

    pub fn nothing_found_signal(&self) -> impl Signal<Item = bool> + use<> {
        self.state_actor.signal_ref(|state| state.nothing_found())
    }
}

fn start_children_load(
    fetcher: &Arc<dyn AdminListFetch>,
    children_loaded_relay: &Relay<(ListToken, Result<Vec<TreeNode>, FetchError>)>,
    plan: ChildrenPlan,
) {
    let children_future = fetcher.children(plan.parent);
    let children_loaded_relay = children_loaded_relay.clone();
    Task::start(async move {
        let result = children_future.await;
        children_loaded_relay.send((plan.token, result));
    });
}

fn start_search(
    fetcher: &Arc<dyn AdminListFetch>,
    search_loaded_relay: &Relay<(ListToken, Result<Vec<TreeNode>, FetchError>)>,
    plan: SearchPlan,
) {
    let matches_future = fetcher.search(plan.term);
    let search_loaded_relay = search_loaded_relay.clone();
    Task::start(async move {
        let result = matches_future.await;
        search_loaded_relay.send((plan.token, result));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::BoxFuture;
    use std::sync::Mutex;
    use std::time::Duration;
    use zoon::SignalExt;

    struct MockAdminFetch {
        children_calls: Mutex<Vec<NodeKey>>,
        search_calls: Mutex<Vec<String>>,
        children: Vec<TreeNode>,
        matches: Vec<TreeNode>,
    }

    impl MockAdminFetch {
        fn new(children: Vec<TreeNode>, matches: Vec<TreeNode>) -> Arc<Self> {
            Arc::new(Self {
                children_calls: Mutex::new(Vec::new()),
                search_calls: Mutex::new(Vec::new()),
                children,
                matches,
            })
        }
    }

    impl AdminListFetch for MockAdminFetch {
        fn children(
            &self,
            parent: NodeKey,
        ) -> BoxFuture<'static, Result<Vec<TreeNode>, FetchError>> {
            self.children_calls.lock().unwrap().push(parent);
            let children = self.children.clone();
            Box::pin(async move { Ok(children) })
        }

        fn search(&self, term: String) -> BoxFuture<'static, Result<Vec<TreeNode>, FetchError>> {
            self.search_calls.lock().unwrap().push(term);
            let matches = self.matches.clone();
            Box::pin(async move { Ok(matches) })
        }
    }

    fn type_term(domain: &AdminListDomain, term: &str) {
        domain.search_input_changed_relay.send(term.to_string());
    }

    fn node(id: i64, text: &str, is_leaf: bool) -> TreeNode {
        TreeNode {
            id: Some(NodeKey::Int(id)),
            text: text.to_string(),
            level: 0,
            is_leaf,
        }
    }

    #[tokio::test]
    async fn toggle_fetches_children_and_inserts_them() {
        let fetcher = MockAdminFetch::new(vec![node(10, "Phones", true)], vec![]);
        let domain = AdminListDomain::new(vec![node(1, "Electronics", false)], fetcher.clone());

        domain.toggle_clicked_relay.send(NodeKey::Int(1));
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(fetcher.children_calls.lock().unwrap().len(), 1);

        let entries = domain.entries_signal().to_stream().next().await.unwrap();
        let texts: Vec<&str> = entries.iter().map(|entry| entry.node.text.as_str()).collect();
        assert_eq!(texts, vec!["Electronics", "Phones"]);
    }

    #[tokio::test]
    async fn search_keystrokes_collapse_into_one_query() {
        let fetcher = MockAdminFetch::new(vec![], vec![node(10, "Phones", true)]);
        let domain = AdminListDomain::new(vec![node(1, "Electronics", false)], fetcher.clone());

        for term in ["p", "ph", "pho"] {
            type_term(&domain, term);
        }

        tokio::time::sleep(Duration::from_millis(SEARCH_DEBOUNCE_MS as u64 + 200)).await;

        let calls = fetcher.search_calls.lock().unwrap().clone();
        assert_eq!(calls, vec!["pho".to_string()]);

        let entries = domain.entries_signal().to_stream().next().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].node.text, "Phones");
    }

    #[tokio::test]
    async fn clearing_the_search_restores_without_a_request() {
        let fetcher = MockAdminFetch::new(vec![], vec![]);
        let domain = AdminListDomain::new(vec![node(1, "Electronics", false)], fetcher.clone());

        type_term(&domain, "zzz");
        tokio::time::sleep(Duration::from_millis(SEARCH_DEBOUNCE_MS as u64 + 200)).await;

        let nothing = domain.nothing_found_signal().to_stream().next().await.unwrap();
        assert!(nothing);

        type_term(&domain, "");
        tokio::time::sleep(Duration::from_millis(SEARCH_DEBOUNCE_MS as u64 + 200)).await;

        // Restore is local: still only the one search request
        assert_eq!(fetcher.search_calls.lock().unwrap().len(), 1);
        let entries = domain.entries_signal().to_stream().next().await.unwrap();
        assert_eq!(entries[0].node.text, "Electronics");
    }
}
