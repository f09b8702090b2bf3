//! Lazily paginated tree picker
//!
//! A searchable dropdown over a large hierarchical dataset. Pages of nodes
//! are fetched around an anchor node and appended as the user scrolls; the
//! server owns the tree, the client only remembers its anchor, search term
//! and the rows currently on screen.

pub mod anchor;
pub mod config;
pub mod domain;
pub mod pager;
pub mod render;
pub mod request;
pub mod state;
pub mod view;

pub use config::{ConfigError, PickerConfig};
pub use domain::TreePickerDomain;
