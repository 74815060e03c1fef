use serde_json::json;
use yew::prelude::*;

use crate::lead::receipt::read_last_lead;
use crate::utils::storage::BrowserStorage;
use crate::utils::track::track;

/// Greets a visitor whose previous lead was accepted. Read-only with respect
/// to the draft.
#[function_component(LeadResume)]
pub fn lead_resume() -> Html {
    let receipt = use_state(|| None);
    let dismissed = use_state(|| false);

    {
        let receipt = receipt.clone();
        use_effect_with_deps(
            move |_| {
                let found = BrowserStorage::local().and_then(|store| read_last_lead(&store));
                if let Some(found) = &found {
                    track("lead_resume_shown", json!({ "leadId": found.lead_id }));
                }
                receipt.set(found);
                || ()
            },
            (),
        );
    }

    let on_dismiss = {
        let dismissed = dismissed.clone();
        Callback::from(move |_: MouseEvent| dismissed.set(true))
    };

    match (*receipt).clone() {
        Some(receipt) if !*dismissed => {
            let first_name = receipt.name.split_whitespace().next().unwrap_or_default().to_string();
            html! {
                <div class="lead-resume">
                    <style>{r#"
                        .lead-resume {
                            display: flex;
                            justify-content: space-between;
                            align-items: center;
                            gap: 1rem;
                            max-width: 1100px;
                            margin: 1rem auto 0;
                            padding: 0.75rem 1rem;
                            border: 1px solid #a7f3d0;
                            border-radius: 1rem;
                            background: #ecfdf5;
                            color: #065f46;
                            font-size: 0.9rem;
                        }
                        .lead-resume button { background: none; border: none; color: inherit; font-weight: 600; cursor: pointer; }
                    "#}</style>
                    <div>
                        <strong>{format!("Welcome back{}! ", if first_name.is_empty() { String::new() } else { format!(", {}", first_name) })}</strong>
                        {format!("Your request {} for {} ({}) is with our team.", receipt.lead_id, receipt.area, receipt.budget_range)}
                    </div>
                    <button type="button" onclick={on_dismiss} aria-label="Dismiss">{"✕"}</button>
                </div>
            }
        }
        _ => html! {},
    }
}
