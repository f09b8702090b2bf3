//! Result renderer
//!
//! Formats one tree node into its dropdown display string: indentation
//! proportional to depth, a leaf/branch glyph, then the server-rendered
//! text. Placeholder rows (no real id) pass their text through unchanged.

use shared::TreeNode;

/// Two non-breaking spaces per tree level.
const INDENT: &str = "\u{a0}\u{a0}";
const LEAF_GLYPH: &str = "📄 ";
const BRANCH_GLYPH: &str = "📂 ";

/// Display string for one result row. Order-preserving and 1:1 with the
/// input when mapped over a page.
pub fn option_label(node: &TreeNode) -> String {
    if node.key().is_none() {
        return node.text.clone();
    }
    let glyph = if node.is_leaf { LEAF_GLYPH } else { BRANCH_GLYPH };
    let mut label = INDENT.repeat(node.level as usize);
    label.push_str(glyph);
    label.push_str(&node.text);
    label
}

/// Display string for the current selection: text only, tree metadata is
/// discarded.
pub fn selection_label(node: &TreeNode) -> String {
    node.text.clone()
}
