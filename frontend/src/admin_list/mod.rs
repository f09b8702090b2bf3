//! Admin changelist tree
//!
//! Expand/collapse for the hierarchical changelist plus a debounced
//! whole-subtree search. Children are fetched lazily per row; clearing the
//! search restores the rows the page started with.

pub mod domain;
pub mod state;
pub mod view;

pub use domain::AdminListDomain;
