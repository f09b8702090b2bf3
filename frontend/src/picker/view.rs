//! Dropdown rendering
//!
//! The view layer only emits relay events and binds signals; every decision
//! lives in the domain actor. The scroll trigger is a raw DOM listener
//! because the option list needs pixel distances, not element events.

use crate::dataflow::Atom;
use crate::picker::domain::TreePickerDomain;
use crate::picker::render::{option_label, selection_label};
use shared::TreeNode;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use zoon::*;

/// A continuation load fires when the list bottom is closer than this.
const SCROLL_TRIGGER_PX: i32 = 50;

const EMPTY_SELECTION_LABEL: &str = "--- Select value ---";

pub fn tree_picker(domain: TreePickerDomain) -> impl Element {
    let open = Atom::new(false);
    Column::new()
        .s(Width::exact(320))
        .s(Gap::new().y(4))
        .item(selection_row(domain.clone(), open.clone()))
        .item_signal({
            let domain = domain.clone();
            open.signal().map(move |is_open| {
                is_open.then(|| dropdown_panel(domain.clone(), open.clone()))
            })
        })
}

fn selection_row(domain: TreePickerDomain, open: Atom<bool>) -> impl Element {
    Row::new()
        .s(Gap::new().x(4))
        .item(toggle_button(domain.clone(), open))
        .item_signal({
            let domain = domain.clone();
            domain
                .selected_signal()
                .map(move |selected| selected.is_some().then(|| clear_button(domain.clone())))
        })
}

fn toggle_button(domain: TreePickerDomain, open: Atom<bool>) -> impl Element {
    Button::new()
        .s(Width::fill())
        .s(Padding::new().x(10).y(6))
        .update_raw_el(|raw_el| {
            raw_el
                .style("border", "1px solid #aaa")
                .style("border-radius", "4px")
                .style("background-color", "#fff")
                .style("text-align", "left")
        })
        .label(El::new().child_signal(domain.selected_signal().map(|selected| {
            match selected {
                Some(node) => selection_label(&node),
                None => EMPTY_SELECTION_LABEL.to_string(),
            }
        })))
        .on_press({
            let dropdown_opened_relay = domain.dropdown_opened_relay.clone();
            move || {
                let now_open = !open.get_cloned();
                open.set(now_open);
                if now_open {
                    dropdown_opened_relay.send(());
                }
            }
        })
}

fn clear_button(domain: TreePickerDomain) -> impl Element {
    Button::new()
        .s(Padding::new().x(8).y(6))
        .update_raw_el(|raw_el| {
            raw_el
                .style("border", "1px solid #aaa")
                .style("border-radius", "4px")
                .style("background-color", "#fff")
        })
        .label("✕")
        .on_press(move || domain.selection_cleared_relay.send(()))
}

fn dropdown_panel(domain: TreePickerDomain, open: Atom<bool>) -> impl Element {
    Column::new()
        .s(Width::fill())
        .s(Gap::new().y(4))
        .update_raw_el(|raw_el| {
            raw_el
                .style("border", "1px solid #aaa")
                .style("border-radius", "4px")
                .style("background-color", "#fff")
                .style("padding", "4px")
        })
        .item(search_input(domain.clone()))
        .item(options_list(domain, open))
}

fn search_input(domain: TreePickerDomain) -> impl Element {
    TextInput::new()
        .s(Width::fill())
        .s(Padding::new().x(8).y(4))
        .label_hidden("search the tree")
        .placeholder(Placeholder::new("Search"))
        .focus(true)
        .on_change({
            let search_input_changed_relay = domain.search_input_changed_relay.clone();
            move |term| search_input_changed_relay.send(term)
        })
}

fn options_list(domain: TreePickerDomain, open: Atom<bool>) -> impl Element {
    El::new()
        .s(Width::fill())
        .s(Height::exact(240))
        .update_raw_el({
            let list_end_neared_relay = domain.list_end_neared_relay.clone();
            move |raw_el| {
                if let Some(html_el) = raw_el.dom_element().dyn_ref::<web_sys::HtmlElement>() {
                    attach_scroll_trigger(html_el, list_end_neared_relay);
                }
                raw_el.style("overflow-y", "auto")
            }
        })
        .child(
            Column::new().s(Width::fill()).items_signal_vec(
                domain
                    .options_signal()
                    .map({
                        let domain = domain.clone();
                        move |options| {
                            options
                                .into_iter()
                                .map(|node| option_row(node, domain.clone(), open.clone()))
                                .collect::<Vec<_>>()
                        }
                    })
                    .to_signal_vec(),
            ),
        )
}

fn option_row(node: TreeNode, domain: TreePickerDomain, open: Atom<bool>) -> impl Element {
    let label = option_label(&node);
    Button::new()
        .s(Width::fill())
        .s(Padding::new().x(8).y(4))
        .update_raw_el(|raw_el| raw_el.style("text-align", "left"))
        .label(El::new().s(Font::new().no_wrap()).child(label))
        .on_press({
            let node_chosen_relay = domain.node_chosen_relay.clone();
            move || {
                node_chosen_relay.send(node.clone());
                open.set(false);
            }
        })
}

fn attach_scroll_trigger(html_el: &web_sys::HtmlElement, list_end_neared_relay: crate::dataflow::Relay) {
    let scroll_closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
        if let Some(target) = event
            .current_target()
            .and_then(|target| target.dyn_into::<web_sys::HtmlElement>().ok())
        {
            let distance_to_bottom =
                target.scroll_height() - target.scroll_top() - target.client_height();
            if distance_to_bottom < SCROLL_TRIGGER_PX {
                list_end_neared_relay.send(());
            }
        }
    }) as Box<dyn FnMut(web_sys::Event)>);

    if html_el
        .add_event_listener_with_callback("scroll", scroll_closure.as_ref().unchecked_ref())
        .is_ok()
    {
        scroll_closure.forget();
    }
}
