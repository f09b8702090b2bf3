//! Application assembly
//!
//! Reads the mount element's data attributes, builds the domains and hands
//! their views to zoon. A broken configuration disables the affected widget
//! instead of rendering something half-wired.

use crate::admin_list::AdminListDomain;
use crate::admin_list::view::admin_tree_list;
use crate::fetch::{HttpAdminListFetch, HttpTreeFetch};
use crate::picker::view::tree_picker;
use crate::picker::{PickerConfig, TreePickerDomain};
use shared::TreeNode;
use std::sync::Arc;
use zoon::*;

pub struct TreePickApp {
    picker: Option<TreePickerDomain>,
    admin_list: Option<AdminListDomain>,
}

impl TreePickApp {
    pub fn new() -> Self {
        let mount = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id("app"));

        let Some(mount) = mount else {
            zoon::eprintln!("no #app mount element found");
            return Self {
                picker: None,
                admin_list: None,
            };
        };

        let picker = match PickerConfig::from_element(&mount) {
            Ok(config) => {
                let fetcher = Arc::new(HttpTreeFetch::new(config.url.clone()));
                Some(TreePickerDomain::new(&config, fetcher))
            }
            Err(error) => {
                // Logged once; the widget stays inert instead of half-wired
                zoon::eprintln!("tree picker disabled: {error}");
                None
            }
        };

        Self {
            picker,
            admin_list: admin_domain(&mount),
        }
    }

    pub fn root(&self) -> impl Element {
        Column::new()
            .s(Width::fill())
            .s(Gap::new().y(16))
            .s(Padding::all(16))
            .item(self.picker.clone().map(tree_picker))
            .item(self.admin_list.clone().map(admin_tree_list))
    }
}

/// The changelist only exists on admin pages, marked by a `data-roots`
/// attribute holding the server-rendered top slice.
fn admin_domain(mount: &web_sys::Element) -> Option<AdminListDomain> {
    let raw = mount.get_attribute("data-roots")?;
    let initial: Vec<TreeNode> = match serde_json::from_str(&raw) {
        Ok(initial) => initial,
        Err(error) => {
            zoon::eprintln!("changelist disabled, unparsable data-roots: {error}");
            return None;
        }
    };
    Some(AdminListDomain::new(initial, Arc::new(HttpAdminListFetch)))
}
