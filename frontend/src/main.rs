//! TreePick Main Entry Point

use std::sync::OnceLock;
use zoon::*;

/// Stores the main application task handle to prevent it from being dropped.
static MAIN_TASK: OnceLock<TaskHandle> = OnceLock::new();

// Core modules
mod admin_list;
mod app;
mod dataflow;
mod fetch;
mod picker;

pub fn main() {
    let handle = Task::start_droppable(async {
        let app = crate::app::TreePickApp::new();
        let root_element = app.root();
        start_app("app", move || root_element);
    });
    let _ = MAIN_TASK.set(handle);
}
