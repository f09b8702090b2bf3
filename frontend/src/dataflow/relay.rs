//! Type-safe event streaming for the Actor+Relay architecture
//!
//! A Relay is the sending half of an unbounded channel. UI event handlers
//! send through it; the owning Actor consumes the paired receiver stream.

use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};
use std::sync::{Arc, OnceLock};

/// Event sender used by UI components to feed events into Actors.
///
/// Relays follow the `{source}_{event}_relay` naming pattern:
/// - `dropdown_opened_relay` - user opened the picker dropdown
/// - `search_input_changed_relay` - user typed into the search box
/// - `toggle_clicked_relay` - user clicked a row's expand/collapse button
///
/// # Examples
///
/// ```rust
/// use crate::dataflow::relay;
///
/// let (node_chosen_relay, mut node_chosen_stream) = relay::<shared::TreeNode>();
///
/// // Emit from UI
/// node_chosen_relay.send(node);
///
/// // Process in an Actor
/// while let Some(node) = node_chosen_stream.next().await {
///     // update selection state
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Relay<T = ()>
where
    T: Clone + Send + Sync + 'static,
{
    sender: UnboundedSender<T>,
    #[cfg(debug_assertions)]
    emit_location: Arc<OnceLock<&'static std::panic::Location<'static>>>,
}

/// Error type for Relay operations
#[derive(Debug, Clone)]
pub enum RelayError {
    /// The channel has been closed (receiver dropped)
    ChannelClosed,
    /// Relay send called from multiple locations (debug builds only)
    #[cfg(debug_assertions)]
    MultipleEmitters {
        previous: &'static std::panic::Location<'static>,
        current: &'static std::panic::Location<'static>,
    },
}

impl<T> Relay<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a new Relay with an associated receiver stream.
    ///
    /// Prefer the [`relay()`] function for the usual tuple-binding style.
    pub fn new() -> (Self, UnboundedReceiver<T>) {
        let (sender, receiver) = unbounded();
        (
            Relay {
                sender,
                #[cfg(debug_assertions)]
                emit_location: Arc::new(OnceLock::new()),
            },
            receiver,
        )
    }

    /// Check that this relay is only being sent from a single source location.
    ///
    /// In debug builds, enforces the single-source constraint so every event
    /// stays traceable to one place in the code.
    #[cfg(debug_assertions)]
    #[track_caller]
    fn check_single_source(&self) -> Result<(), RelayError> {
        let caller = std::panic::Location::caller();
        match self.emit_location.set(caller) {
            Ok(()) => Ok(()),
            Err(previous) if previous == caller => Ok(()),
            Err(previous) => Err(RelayError::MultipleEmitters {
                previous,
                current: caller,
            }),
        }
    }

    /// Send an event through the relay.
    ///
    /// If the receiver has been dropped, the event is silently discarded.
    /// In debug builds, panics if this relay has been sent from a different
    /// location in the code (enforces the single-source constraint).
    #[track_caller]
    pub fn send(&self, value: T) {
        #[cfg(debug_assertions)]
        if let Err(e) = self.check_single_source() {
            panic!("{:?}", e);
        }

        // Dropped events are fine: no subscriber means nobody cares anymore
        let _ = self.sender.unbounded_send(value);
    }

    /// Try to send an event through the relay with explicit error handling.
    ///
    /// Returns an error if the channel has been closed (receiver dropped).
    #[track_caller]
    pub fn try_send(&self, value: T) -> Result<(), RelayError> {
        #[cfg(debug_assertions)]
        self.check_single_source()?;

        self.sender
            .unbounded_send(value)
            .map_err(|_| RelayError::ChannelClosed)
    }
}

impl<T> Default for Relay<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a "disconnected" relay whose events are silently discarded.
    ///
    /// Useful as placeholder initialization before wiring actual relays and
    /// in tests that don't care about a particular event stream.
    fn default() -> Self {
        let (relay, _receiver) = Self::new();
        relay
    }
}

/// Creates a new Relay with an associated receiver stream.
///
/// This is the idiomatic way to create a Relay for use with Actors,
/// following Rust's channel pattern conventions.
pub fn relay<T>() -> (Relay<T>, UnboundedReceiver<T>)
where
    T: Clone + Send + Sync + 'static,
{
    Relay::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn relay_delivers_events_in_order() {
        let (relay, mut receiver) = Relay::new();

        for event in ["first", "second"] {
            relay.send(event.to_string());
        }

        assert_eq!(receiver.next().await, Some("first".to_string()));
        assert_eq!(receiver.next().await, Some("second".to_string()));
    }

    #[tokio::test]
    async fn try_send_fails_after_receiver_dropped() {
        let (relay, receiver) = Relay::new();
        drop(receiver);

        assert!(relay.try_send("lost".to_string()).is_err());
    }

    #[tokio::test]
    async fn relay_function_returns_connected_pair() {
        let (relay, mut stream) = relay::<u32>();

        relay.send(7);

        assert_eq!(stream.next().await, Some(7));
    }
}
