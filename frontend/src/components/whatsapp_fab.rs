use serde_json::json;
use yew::prelude::*;

use crate::state::store::use_lead_draft;
use crate::utils::track::track;
use crate::utils::whatsapp::{whatsapp_link, FAB_MESSAGE};

/// Floating WhatsApp button. The link follows the draft phone live.
#[function_component(WhatsAppFab)]
pub fn whatsapp_fab() -> Html {
    let store = use_lead_draft();
    let draft = store.draft();
    let href = whatsapp_link(&draft.phone, FAB_MESSAGE);
    let has_phone = draft.has_valid_phone();

    let onclick = Callback::from(move |_: MouseEvent| {
        track(
            "whatsapp_click_fab",
            json!({ "phone10": if has_phone { "entered" } else { "none" } }),
        );
    });

    html! {
        <>
            <style>{r#"
                .wa-fab {
                    position: fixed;
                    right: 1.25rem;
                    bottom: 5.5rem;
                    z-index: 40;
                    display: inline-flex;
                    align-items: center;
                    gap: 0.5rem;
                    padding: 0.8rem 1.1rem;
                    border-radius: 999px;
                    background: #25d366;
                    color: #fff;
                    font-weight: 600;
                    text-decoration: none;
                    box-shadow: 0 12px 30px rgba(0, 0, 0, 0.18);
                }
                @media (min-width: 768px) {
                    .wa-fab { bottom: 1.5rem; }
                }
            "#}</style>
            <a class="wa-fab" {href} target="_blank" rel="noreferrer" {onclick} aria-label="Chat on WhatsApp">
                <span>{"💬"}</span>
                <span>{"WhatsApp"}</span>
            </a>
        </>
    }
}
