//! Selection-anchor latch
//!
//! The anchor is the node that "center" loads are computed around. It starts
//! unset and latches onto the first server-suggested reference id; after that
//! only an explicit user selection moves it and only an explicit clear resets
//! it.

use shared::NodeKey;

/// Anchor state of one picker instance.
///
/// Allowed transitions:
/// - `Unset -> Anchored` via [`Anchor::latch`] (server reference id, at most
///   once per latch) or [`Anchor::select`] (user selection)
/// - `Anchored -> Anchored` via [`Anchor::select`] only
/// - `Anchored -> Unset` via [`Anchor::clear`] only
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Anchor {
    #[default]
    Unset,
    Anchored(NodeKey),
}

impl Anchor {
    /// Latch a server-suggested reference id. One-way: returns `true` only
    /// when the anchor was unset, later reference ids are ignored.
    pub fn latch(&mut self, reference_id: NodeKey) -> bool {
        match self {
            Anchor::Unset => {
                *self = Anchor::Anchored(reference_id);
                true
            }
            Anchor::Anchored(_) => false,
        }
    }

    /// Re-anchor on an explicit user selection.
    pub fn select(&mut self, key: NodeKey) {
        *self = Anchor::Anchored(key);
    }

    /// Reset via an explicit clear action from the host UI.
    pub fn clear(&mut self) {
        *self = Anchor::Unset;
    }

    pub fn key(&self) -> Option<&NodeKey> {
        match self {
            Anchor::Unset => None,
            Anchor::Anchored(key) => Some(key),
        }
    }
}
