//! Changelist rendering
//!
//! Flat rows with a drag cell, an expand/collapse cell and the node text
//! indented by depth. The drag cell is presentation only; ordering is the
//! host page's concern.

use crate::admin_list::domain::AdminListDomain;
use crate::admin_list::state::ListEntry;
use zoon::*;

const INDENT_PX: usize = 24;

pub fn admin_tree_list(domain: AdminListDomain) -> impl Element {
    Column::new()
        .s(Width::fill())
        .s(Gap::new().y(8))
        .item(search_input(domain.clone()))
        .item(row_list(domain))
}

fn search_input(domain: AdminListDomain) -> impl Element {
    TextInput::new()
        .s(Width::exact(280))
        .s(Padding::new().x(8).y(4))
        .label_hidden("search all nodes")
        .placeholder(Placeholder::new("Search"))
        .on_change({
            let search_input_changed_relay = domain.search_input_changed_relay.clone();
            move |term| search_input_changed_relay.send(term)
        })
}

fn row_list(domain: AdminListDomain) -> impl Element {
    Column::new()
        .s(Width::fill())
        .items_signal_vec(
            domain
                .entries_signal()
                .map({
                    let domain = domain.clone();
                    move |entries| {
                        entries
                            .into_iter()
                            .map(|entry| row(entry, domain.clone()))
                            .collect::<Vec<_>>()
                    }
                })
                .to_signal_vec(),
        )
        .item_signal(
            domain
                .nothing_found_signal()
                .map(|nothing| nothing.then(nothing_found_row)),
        )
}

fn row(entry: ListEntry, domain: AdminListDomain) -> impl Element {
    let indent = entry.depth * INDENT_PX;
    Row::new()
        .s(Gap::new().x(8))
        .s(Padding::new().y(2))
        .update_raw_el(|raw_el| raw_el.style("border-bottom", "1px solid #eee"))
        .item(
            El::new()
                .update_raw_el(|raw_el| raw_el.style("cursor", "grab"))
                .child("↕"),
        )
        .item(toggle_cell(&entry, domain))
        .item(
            El::new()
                .s(Font::new().no_wrap())
                .update_raw_el(move |raw_el| raw_el.style("padding-left", &format!("{indent}px")))
                .child(entry.node.text.clone()),
        )
}

fn toggle_cell(entry: &ListEntry, domain: AdminListDomain) -> impl Element {
    let glyph = if entry.expanded { "▼" } else { "▶" };
    match entry.node.key().cloned() {
        Some(key) if entry.expandable => Button::new()
            .s(Width::exact(24))
            .label(glyph)
            .on_press({
                let toggle_clicked_relay = domain.toggle_clicked_relay.clone();
                move || toggle_clicked_relay.send(key.clone())
            })
            .unify(),
        // Leaves and placeholder rows keep the column aligned
        _ => El::new().s(Width::exact(24)).child("\u{a0}").unify(),
    }
}

fn nothing_found_row() -> impl Element {
    El::new()
        .s(Padding::new().x(8).y(4))
        .update_raw_el(|raw_el| raw_el.style("color", "#888"))
        .child("Nothing found")
}
