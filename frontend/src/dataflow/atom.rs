//! Local UI state Atom helper
//!
//! Atom wraps Actor+Relay for simple local component state (dropdown
//! open/closed, hover, focus) so even throwaway UI flags follow the same
//! architecture as domain state.

use crate::dataflow::{Actor, Relay, relay};
use futures::StreamExt;
use zoon::Signal;

/// Internal update type for Atom operations
#[derive(Clone, Debug)]
enum AtomUpdate<T> {
    Set(T),
    SetNeq(T),
}

/// Convenient wrapper for local UI state using Actor+Relay internally.
///
/// Use Atom for truly local UI state like dropdown visibility or input
/// focus; domain state belongs in domain Actors.
#[derive(Clone, Debug)]
pub struct Atom<T>
where
    T: Clone + Send + Sync + 'static,
{
    actor: Actor<T>,
    setter: Relay<AtomUpdate<T>>,
}

impl<T> Atom<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(initial: T) -> Self
    where
        T: PartialEq,
    {
        let (setter, mut setter_stream) = relay();

        let actor = Actor::new(initial, async move |state| {
            while let Some(update) = setter_stream.next().await {
                match update {
                    AtomUpdate::Set(new_value) => {
                        state.set(new_value);
                    }
                    AtomUpdate::SetNeq(new_value) => {
                        state.set_neq(new_value);
                    }
                }
            }
        });

        Self { actor, setter }
    }

    pub fn set(&self, value: T) {
        self.setter.send(AtomUpdate::Set(value));
    }

    #[allow(dead_code)]
    pub fn set_neq(&self, value: T)
    where
        T: PartialEq,
    {
        self.setter.send(AtomUpdate::SetNeq(value));
    }

    pub fn signal(&self) -> impl Signal<Item = T> + use<T> {
        self.actor.signal()
    }

    /// Get current value (for event handlers only)
    ///
    /// **Use sparingly** - prefer signal-based access when possible.
    pub fn get_cloned(&self) -> T {
        self.actor.state.lock_ref().clone()
    }
}

impl<T> Default for Atom<T>
where
    T: Clone + Send + Sync + Default + PartialEq + 'static,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}
