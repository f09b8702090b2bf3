//! Single-value Actor implementation for reactive state management
//!
//! Actor owns a `Mutable<T>` and processes events from Relays sequentially,
//! so every state change has a single point of mutation and full traceability.

use std::future::Future;
use std::sync::Arc;
use zoon::{Mutable, Signal, Task, TaskHandle};

/// Single-value reactive state container.
///
/// Only the Actor's processor mutates its state; the UI binds to state
/// changes through signals. Events are processed one at a time, in order.
///
/// # Examples
///
/// ```rust
/// use crate::dataflow::{Actor, relay};
/// use futures::StreamExt;
///
/// let (search_input_changed_relay, mut search_stream) = relay::<String>();
///
/// let search_term = Actor::new(String::new(), async move |state| {
///     while let Some(term) = search_stream.next().await {
///         state.set_neq(term);
///     }
/// });
///
/// search_input_changed_relay.send("ca".to_string());
/// search_term.signal() // always reflects the current term reactively
/// ```
#[derive(Clone, Debug)]
pub struct Actor<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub(super) state: Mutable<T>,
    #[allow(dead_code)]
    task_handle: Arc<TaskHandle>,
    #[cfg(debug_assertions)]
    #[allow(dead_code)]
    creation_location: &'static std::panic::Location<'static>,
}

impl<T> Actor<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a new Actor with initial state and event processing loop.
    ///
    /// The processor usually contains a loop that uses `select!` to handle
    /// multiple event streams sequentially.
    #[track_caller]
    pub fn new<F, Fut>(initial_state: T, processor: F) -> Self
    where
        F: FnOnce(Mutable<T>) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let state = Mutable::new(initial_state);

        // Droppable handle: the processor stops when the last Actor clone drops
        let task_handle = Arc::new(Task::start_droppable(processor(state.clone())));

        Self {
            state,
            task_handle,
            #[cfg(debug_assertions)]
            creation_location: std::panic::Location::caller(),
        }
    }

    /// Get a reactive signal for this Actor's state.
    ///
    /// This is the only way UI code reads Actor state.
    pub fn signal(&self) -> impl Signal<Item = T> + use<T> {
        self.state.signal_cloned()
    }

    /// Get a reactive signal computed from a reference, avoiding a clone of
    /// the whole state on every emission.
    pub fn signal_ref<U, F>(&self, f: F) -> impl Signal<Item = U> + use<T, U, F>
    where
        U: PartialEq + Send + Sync + 'static,
        F: Fn(&T) -> U + Send + Sync + 'static,
    {
        self.state.signal_ref(f)
    }
}
