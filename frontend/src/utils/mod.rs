pub mod device;
pub mod storage;
pub mod track;
pub mod whatsapp;

use web_sys::{window, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

/// Smooth-scrolls the element with `id` to the top of the viewport.
pub fn scroll_to_id(id: &str) {
    let Some(element) = window()
        .and_then(|w| w.document())
        .and_then(|doc| doc.get_element_by_id(id))
    else {
        log::warn!("No element #{} to scroll to", id);
        return;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}
