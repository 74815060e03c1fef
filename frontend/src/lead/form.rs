use serde_json::json;
use std::str::FromStr;
use uuid::Uuid;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::config;
use crate::lead::client::BrowserTransport;
use crate::lead::error::LeadError;
use crate::lead::form_state::{validate_step, FormAction, LeadFormState, Step, SubmitGate, STEP_COUNT};
use crate::lead::payload::SubmissionContext;
use crate::lead::submit::run_submission;
use crate::lead::validation::Field;
use crate::state::draft::{
    Area, Bhk, ChoiceField, Draft, DraftPatch, Furnishing, MoveIn, Profile, BUDGET_CEIL_K,
    BUDGET_FLOOR_K, BUDGET_STEP_K,
};
use crate::state::locality::localities;
use crate::state::store::{use_lead_draft, DraftStore};
use crate::utils::storage::BrowserStorage;
use crate::utils::track::track;
use crate::utils::whatsapp::{whatsapp_link, FORM_MESSAGE};

const BUDGET_PRESETS: [(u32, u32); 4] = [(40, 60), (60, 90), (25, 40), (90, 120)];

type FormHandle = UseReducerHandle<LeadFormState>;

fn fmt_inr(k: u32) -> String {
    format!("₹{}k", k)
}

fn field_error(form: &LeadFormState, field: Field) -> Html {
    match form.field_errors.get(field) {
        Some(message) => html! { <p class="lead-field-error">{message}</p> },
        None => html! {},
    }
}

fn text_input(
    store: &DraftStore,
    form: &FormHandle,
    field: Option<Field>,
    to_patch: fn(String) -> DraftPatch,
) -> Callback<InputEvent> {
    let store = store.clone();
    let form = form.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        store.set(to_patch(input.value()));
        if let Some(field) = field {
            form.dispatch(FormAction::FieldEdited(field));
        }
    })
}

/// Select handler: a known code is written through, anything else (the
/// placeholder) clears the field.
fn choice<T: FromStr + 'static>(
    store: &DraftStore,
    form: &FormHandle,
    field: Field,
    clear: ChoiceField,
    to_patch: fn(T) -> DraftPatch,
) -> Callback<Event> {
    let store = store.clone();
    let form = form.clone();
    Callback::from(move |e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        match select.value().parse::<T>() {
            Ok(value) => store.set(to_patch(value)),
            Err(_) => store.clear(clear),
        }
        form.dispatch(FormAction::FieldEdited(field));
    })
}

fn options<T: Copy + PartialEq>(
    all: &[T],
    current: Option<T>,
    code: fn(T) -> &'static str,
    label: fn(T) -> &'static str,
) -> Html {
    html! {
        <>
            <option value="" selected={current.is_none()}>{"Select..."}</option>
            { for all.iter().map(|v| html! {
                <option value={code(*v)} selected={current == Some(*v)}>{label(*v)}</option>
            }) }
        </>
    }
}

fn review_row(label: &str, value: String) -> Html {
    html! {
        <div class="lead-review-row">
            <span class="lead-review-label">{label}</span>
            <span class="lead-review-value">{value}</span>
        </div>
    }
}

fn or_dash<T>(value: Option<T>, f: fn(T) -> &'static str) -> String {
    value.map(f).unwrap_or("-").to_string()
}

#[function_component(LeadForm)]
pub fn lead_form() -> Html {
    let store = use_lead_draft();
    let draft: Draft = store.get();
    let form = use_reducer(LeadFormState::default);
    // Set synchronously on press so a double click cannot start two requests
    // before the disabled button re-renders.
    let in_flight = use_mut_ref(|| false);
    let copied = use_state(|| false);

    let on_name = text_input(&store, &form, Some(Field::Name), |v| DraftPatch {
        name: Some(v),
        ..Default::default()
    });
    let on_locality = text_input(&store, &form, None, |v| DraftPatch {
        locality: Some(v),
        ..Default::default()
    });
    let on_phone = {
        let store = store.clone();
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let digits = crate::state::draft::normalize_phone(&input.value());
            input.set_value(&digits);
            store.set(DraftPatch {
                phone: Some(digits),
                ..Default::default()
            });
            form.dispatch(FormAction::FieldEdited(Field::Phone));
        })
    };
    let on_notes = {
        let store = store.clone();
        Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            store.set(DraftPatch {
                notes: Some(area.value()),
                ..Default::default()
            });
        })
    };

    let on_area = choice::<Area>(&store, &form, Field::Area, ChoiceField::Area, |v| DraftPatch {
        area: Some(v),
        ..Default::default()
    });
    let on_bhk = choice::<Bhk>(&store, &form, Field::Bhk, ChoiceField::Bhk, |v| DraftPatch {
        bhk: Some(v),
        ..Default::default()
    });
    let on_furnishing = choice::<Furnishing>(
        &store,
        &form,
        Field::Furnishing,
        ChoiceField::Furnishing,
        |v| DraftPatch {
            furnishing: Some(v),
            ..Default::default()
        },
    );
    let on_move_in = choice::<MoveIn>(&store, &form, Field::MoveIn, ChoiceField::MoveIn, |v| DraftPatch {
        move_in: Some(v),
        ..Default::default()
    });
    let on_profile = choice::<Profile>(&store, &form, Field::Profile, ChoiceField::Profile, |v| DraftPatch {
        profile: Some(v),
        ..Default::default()
    });

    let on_budget_min = {
        let store = store.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Ok(k) = input.value().parse::<u32>() {
                store.set(DraftPatch {
                    budget_min_k: Some(k),
                    ..Default::default()
                });
            }
        })
    };
    let on_budget_max = {
        let store = store.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Ok(k) = input.value().parse::<u32>() {
                store.set(DraftPatch {
                    budget_max_k: Some(k),
                    ..Default::default()
                });
            }
        })
    };

    let on_next = {
        let store = store.clone();
        let form = form.clone();
        Callback::from(move |_: MouseEvent| {
            let draft = store.get();
            let step = form.step;
            let errors = validate_step(step, &draft);
            if errors.is_empty() {
                track("lead_step_next", json!({ "step": step.number() + 1 }));
            } else {
                let fields: Vec<&str> = errors.fields().into_iter().map(Field::key).collect();
                track("lead_step_blocked", json!({ "step": step.number(), "fields": fields }));
            }
            form.dispatch(FormAction::Next {
                draft,
                key: Uuid::new_v4().to_string(),
            });
        })
    };

    let on_back = {
        let form = form.clone();
        Callback::from(move |_: MouseEvent| {
            track("lead_step_back", json!({ "from": form.step.number() }));
            form.dispatch(FormAction::Back);
        })
    };

    let on_submit = {
        let store = store.clone();
        let form = form.clone();
        let in_flight = in_flight.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *in_flight.borrow() {
                return;
            }
            let draft = store.get();
            let endpoint = config::get_lead_api_url();
            match form.submit_gate(&draft, endpoint.as_deref()) {
                SubmitGate::Ready => {}
                SubmitGate::Busy | SubmitGate::NotOnReview => return,
                SubmitGate::Rejected(err) => {
                    let event = if matches!(err, LeadError::Validation(_)) {
                        "lead_error_validation"
                    } else {
                        "lead_submit_failed"
                    };
                    track(
                        event,
                        json!({ "status": err.telemetry_status(), "message": err.to_string() }),
                    );
                    form.dispatch(FormAction::Rejected(err));
                    return;
                }
            }

            *in_flight.borrow_mut() = true;
            form.dispatch(FormAction::SubmitStarted);
            track(
                "lead_submit_attempt",
                json!({
                    "area": draft.area.map(Area::label),
                    "budgetRange": draft.budget_range(),
                    "bhk": draft.bhk.map(Bhk::code),
                    "profile": draft.profile.map(Profile::code),
                }),
            );

            let ctx = SubmissionContext::capture(form.idempotency_key.clone());
            let form = form.clone();
            let in_flight = in_flight.clone();
            spawn_local(async move {
                let receipts = BrowserStorage::local();
                let result = run_submission(
                    &BrowserTransport,
                    receipts.as_ref(),
                    endpoint.as_deref(),
                    &draft,
                    ctx,
                )
                .await;
                match &result {
                    Ok(accepted) => {
                        track("lead_submit_success", json!({ "leadId": accepted.lead_id }))
                    }
                    Err(err) => track(
                        "lead_submit_failed",
                        json!({ "status": err.telemetry_status(), "message": err.to_string() }),
                    ),
                }
                *in_flight.borrow_mut() = false;
                form.dispatch(FormAction::Finished(result));
            });
        })
    };

    let on_copy = {
        let copied = copied.clone();
        let lead_id = form.success_lead_id.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(lead_id) = lead_id.clone() else {
                return;
            };
            if let Some(window) = web_sys::window() {
                let clipboard = window.navigator().clipboard();
                let copied = copied.clone();
                spawn_local(async move {
                    match wasm_bindgen_futures::JsFuture::from(clipboard.write_text(&lead_id)).await {
                        Ok(_) => {
                            track("lead_id_copied", json!({}));
                            copied.set(true);
                        }
                        Err(e) => log::warn!("Clipboard write failed: {:?}", e),
                    }
                });
            }
        })
    };

    let on_start_over = {
        let form = form.clone();
        let copied = copied.clone();
        Callback::from(move |_: MouseEvent| {
            copied.set(false);
            form.dispatch(FormAction::StartOver);
        })
    };

    let on_whatsapp = {
        let has_phone = draft.has_valid_phone();
        Callback::from(move |_: MouseEvent| {
            track(
                "whatsapp_click_form",
                json!({ "phone10": if has_phone { "entered" } else { "none" } }),
            );
        })
    };

    let presets = BUDGET_PRESETS.iter().map(|&(min, max)| {
        let store = store.clone();
        let onclick = Callback::from(move |_: MouseEvent| {
            store.set(DraftPatch::budget(min, max));
            track("budget_preset", json!({ "preset": format!("{}-{}", min, max) }));
        });
        html! {
            <button type="button" class="lead-preset" {onclick}>
                {format!("{}–{}", fmt_inr(min), fmt_inr(max))}
            </button>
        }
    });

    let step = form.step;
    let step_dots = [Step::Contact, Step::Preferences, Step::Review].map(|s| {
        html! { <span class={classes!("lead-dot", (s == step).then_some("active"))}></span> }
    });

    let body = match step {
        Step::Contact => {
            let area_localities = draft.area.map(localities).unwrap_or(&[]);
            html! {
                <>
                    if draft.was_prefilled() {
                        <p class="lead-prefilled">{"We've filled in what your link told us. Check it and continue."}</p>
                    }
                    <label class="lead-field">
                        <span>{"Full Name *"}</span>
                        <input
                            type="text"
                            value={draft.name.clone()}
                            oninput={on_name}
                            placeholder="Your name"
                            autocomplete="name"
                        />
                        { field_error(&form, Field::Name) }
                    </label>
                    <label class="lead-field">
                        <span>{"WhatsApp Number *"}</span>
                        <input
                            type="tel"
                            inputmode="numeric"
                            value={draft.phone.clone()}
                            oninput={on_phone}
                            placeholder="10-digit number"
                            autocomplete="tel"
                        />
                        <small>{"We'll send the shortlist here."}</small>
                        { field_error(&form, Field::Phone) }
                    </label>
                    <label class="lead-field">
                        <span>{"Area Preference *"}</span>
                        <select onchange={on_area}>
                            { options(&Area::ALL, draft.area, Area::label, Area::label) }
                        </select>
                        { field_error(&form, Field::Area) }
                    </label>
                    <label class="lead-field">
                        <span>{"Locality (Optional)"}</span>
                        <input
                            type="text"
                            list="lead-localities"
                            value={draft.locality.clone()}
                            oninput={on_locality}
                            placeholder="Society, road or landmark"
                        />
                        <datalist id="lead-localities">
                            { for area_localities.iter().map(|l| html! { <option value={*l} /> }) }
                        </datalist>
                    </label>
                    <div class="lead-field">
                        <span>{"Budget Range *"}</span>
                        <div class="lead-budget">
                            <div class="lead-budget-head">
                                <strong>{format!("{} – {}", fmt_inr(draft.budget_min_k), fmt_inr(draft.budget_max_k))}</strong>
                                <small>{draft.budget_range()}</small>
                            </div>
                            <input
                                type="range"
                                min={BUDGET_FLOOR_K.to_string()}
                                max={(BUDGET_CEIL_K - BUDGET_STEP_K).to_string()}
                                step={BUDGET_STEP_K.to_string()}
                                value={draft.budget_min_k.to_string()}
                                oninput={on_budget_min}
                            />
                            <input
                                type="range"
                                min={(BUDGET_FLOOR_K + BUDGET_STEP_K).to_string()}
                                max={BUDGET_CEIL_K.to_string()}
                                step={BUDGET_STEP_K.to_string()}
                                value={draft.budget_max_k.to_string()}
                                oninput={on_budget_max}
                            />
                            <div class="lead-presets">{ for presets }</div>
                        </div>
                    </div>
                    <div class="lead-actions">
                        <a
                            class="lead-btn lead-btn-ghost"
                            href={whatsapp_link(&draft.phone, FORM_MESSAGE)}
                            target="_blank"
                            rel="noreferrer"
                            onclick={on_whatsapp}
                        >
                            {"WhatsApp us"}
                        </a>
                        <button type="button" class="lead-btn" onclick={on_next}>{"Continue"}</button>
                    </div>
                </>
            }
        }
        Step::Preferences => html! {
            <>
                <div class="lead-grid">
                    <label class="lead-field">
                        <span>{"BHK *"}</span>
                        <select onchange={on_bhk}>
                            { options(&Bhk::ALL, draft.bhk, Bhk::code, Bhk::label) }
                        </select>
                        { field_error(&form, Field::Bhk) }
                    </label>
                    <label class="lead-field">
                        <span>{"Furnishing *"}</span>
                        <select onchange={on_furnishing}>
                            { options(&Furnishing::ALL, draft.furnishing, Furnishing::code, Furnishing::label) }
                        </select>
                        { field_error(&form, Field::Furnishing) }
                    </label>
                    <label class="lead-field">
                        <span>{"Move In *"}</span>
                        <select onchange={on_move_in}>
                            { options(&MoveIn::ALL, draft.move_in, MoveIn::code, MoveIn::label) }
                        </select>
                        { field_error(&form, Field::MoveIn) }
                    </label>
                    <label class="lead-field">
                        <span>{"Profile *"}</span>
                        <select onchange={on_profile}>
                            { options(&Profile::ALL, draft.profile, Profile::code, Profile::code) }
                        </select>
                        { field_error(&form, Field::Profile) }
                    </label>
                </div>
                <label class="lead-field">
                    <span>{"Additional Notes (Optional)"}</span>
                    <textarea
                        rows="4"
                        value={draft.notes.clone()}
                        oninput={on_notes}
                        placeholder="Society preference, floor, pets, parking, etc."
                    />
                </label>
                <div class="lead-actions">
                    <button type="button" class="lead-btn lead-btn-ghost" onclick={on_back}>{"Back"}</button>
                    <button type="button" class="lead-btn" onclick={on_next}>{"Review"}</button>
                </div>
            </>
        },
        Step::Review => html! {
            <>
                <div class="lead-review">
                    { review_row("Name", draft.name.trim().to_string()) }
                    { review_row("WhatsApp", draft.phone.clone()) }
                    { review_row("Area", or_dash(draft.area, Area::label)) }
                    if !draft.locality.trim().is_empty() {
                        { review_row("Locality", draft.locality.trim().to_string()) }
                    }
                    { review_row("Budget", format!("{} – {}", fmt_inr(draft.budget_min_k), fmt_inr(draft.budget_max_k))) }
                    { review_row("BHK", or_dash(draft.bhk, Bhk::label)) }
                    { review_row("Furnishing", or_dash(draft.furnishing, Furnishing::label)) }
                    { review_row("Move in", or_dash(draft.move_in, MoveIn::label)) }
                    { review_row("Profile", or_dash(draft.profile, Profile::code)) }
                    if !draft.notes.trim().is_empty() {
                        { review_row("Notes", draft.notes.trim().to_string()) }
                    }
                </div>

                if let Some(error) = form.error.clone() {
                    <div class="lead-alert lead-alert-error">{error}</div>
                }

                if let Some(lead_id) = form.success_lead_id.clone() {
                    <div class="lead-alert lead-alert-success">
                        <div class="lead-alert-title">{"Request submitted ✅"}</div>
                        <div>
                            {"Lead ID: "}
                            <span class="lead-mono">{lead_id}</span>
                            <button type="button" class="lead-copy" onclick={on_copy}>
                                { if *copied { "Copied" } else { "Copy" } }
                            </button>
                        </div>
                        <button type="button" class="lead-link" onclick={on_start_over}>
                            {"Send another request"}
                        </button>
                    </div>
                } else {
                    <div class="lead-actions">
                        <button
                            type="button"
                            class="lead-btn lead-btn-ghost"
                            onclick={on_back}
                        >
                            {"Back"}
                        </button>
                        <button type="submit" class="lead-btn" disabled={!form.can_submit()}>
                            { if form.submitting { "Submitting..." } else { "Submit Request" } }
                        </button>
                    </div>
                }
                <p class="lead-fineprint">{"By submitting, you agree we may contact you on WhatsApp."}</p>
            </>
        },
    };

    html! {
        <div class="lead-wrap">
            <style>{LEAD_FORM_CSS}</style>
            <div class="lead-intro">
                <h2>{"Find Your Next Home"}</h2>
                <p>{"Tell us your preferences. We'll send a verified shortlist on WhatsApp and help schedule visits."}</p>
                <ul>
                    <li>{"✓ Shortlist within 30–90 minutes"}</li>
                    <li>{"✓ Verified photos & key details"}</li>
                    <li>{"✓ Visit coordination with minimum back-and-forth"}</li>
                </ul>
            </div>
            <div class="lead-card">
                <div class="lead-card-head">
                    <div>
                        <div class="lead-card-title">{"Request a shortlist"}</div>
                        <div class="lead-card-sub">
                            {format!("Step {} of {}: {}", step.number(), STEP_COUNT, step.title())}
                        </div>
                    </div>
                    <div class="lead-dots">{ for step_dots }</div>
                </div>
                <form onsubmit={on_submit} class="lead-form">
                    { body }
                </form>
            </div>
        </div>
    }
}

const LEAD_FORM_CSS: &str = r#"
    .lead-wrap {
        display: grid;
        gap: 2.5rem;
        max-width: 1100px;
        margin: 0 auto;
        padding: 4rem 1.5rem;
        background: #fff;
        color: #0f172a;
    }
    @media (min-width: 1024px) {
        .lead-wrap { grid-template-columns: 1fr 1fr; align-items: start; }
    }
    .lead-intro h2 { font-size: 2.25rem; font-weight: 600; margin: 0 0 0.5rem; }
    .lead-intro p { color: #475569; }
    .lead-intro ul { list-style: none; padding: 1.25rem; border: 1px solid #e2e8f0; border-radius: 1.5rem; background: #f8fafc; }
    .lead-intro li { margin: 0.4rem 0; font-size: 0.9rem; }
    .lead-card { border: 1px solid #e2e8f0; border-radius: 28px; padding: 1.5rem; box-shadow: 0 20px 70px rgba(0, 0, 0, 0.08); }
    .lead-card-head { display: flex; justify-content: space-between; align-items: center; gap: 0.75rem; }
    .lead-card-title { font-size: 1.1rem; font-weight: 600; }
    .lead-card-sub { font-size: 0.85rem; color: #475569; }
    .lead-dots { display: flex; gap: 0.5rem; }
    .lead-dot { width: 2.5rem; height: 0.5rem; border-radius: 999px; background: #e2e8f0; }
    .lead-dot.active { background: #10b981; }
    .lead-form { margin-top: 1.25rem; display: flex; flex-direction: column; gap: 1rem; }
    .lead-field { display: flex; flex-direction: column; gap: 0.25rem; font-size: 0.9rem; font-weight: 600; }
    .lead-field input, .lead-field select, .lead-field textarea {
        font: inherit;
        font-weight: 400;
        border: 1px solid #e2e8f0;
        border-radius: 1rem;
        padding: 0.75rem 1rem;
    }
    .lead-field small { font-weight: 400; color: #64748b; }
    .lead-field-error { margin: 0; font-weight: 400; color: #b91c1c; font-size: 0.8rem; }
    .lead-prefilled { margin: 0; padding: 0.5rem 0.75rem; border-radius: 0.75rem; background: #f0fdf4; color: #166534; font-size: 0.8rem; }
    .lead-grid { display: grid; grid-template-columns: 1fr 1fr; gap: 0.75rem; }
    .lead-budget { border: 1px solid #e2e8f0; border-radius: 1rem; background: #f8fafc; padding: 1rem; display: flex; flex-direction: column; gap: 0.75rem; }
    .lead-budget-head { display: flex; justify-content: space-between; }
    .lead-presets { display: flex; flex-wrap: wrap; gap: 0.5rem; }
    .lead-preset { border: 1px solid #e2e8f0; border-radius: 0.75rem; background: #fff; padding: 0.35rem 0.75rem; font-size: 0.75rem; font-weight: 600; cursor: pointer; }
    .lead-actions { display: flex; gap: 0.75rem; padding-top: 0.5rem; }
    .lead-btn {
        flex: 1;
        display: inline-flex;
        justify-content: center;
        border: none;
        border-radius: 1rem;
        padding: 0.8rem 1rem;
        background: #020617;
        color: #fff;
        font-weight: 600;
        text-decoration: none;
        cursor: pointer;
    }
    .lead-btn:disabled { opacity: 0.6; cursor: not-allowed; }
    .lead-btn-ghost { background: #fff; color: #1e293b; border: 1px solid #e2e8f0; }
    .lead-review { border: 1px solid #e2e8f0; border-radius: 1rem; padding: 0.5rem 1rem; }
    .lead-review-row { display: flex; justify-content: space-between; padding: 0.4rem 0; border-bottom: 1px solid #f1f5f9; font-size: 0.9rem; }
    .lead-review-row:last-child { border-bottom: none; }
    .lead-review-label { color: #64748b; }
    .lead-alert { border-radius: 1rem; padding: 0.75rem 1rem; font-size: 0.9rem; }
    .lead-alert-error { border: 1px solid #fecaca; background: #fef2f2; color: #b91c1c; }
    .lead-alert-success { border: 1px solid #a7f3d0; background: #ecfdf5; color: #065f46; }
    .lead-alert-title { font-weight: 600; margin-bottom: 0.25rem; }
    .lead-mono { font-family: ui-monospace, monospace; }
    .lead-copy, .lead-link { margin-left: 0.5rem; background: none; border: none; color: #047857; font-weight: 600; cursor: pointer; }
    .lead-link { margin: 0.5rem 0 0; padding: 0; text-decoration: underline; }
    .lead-fineprint { font-size: 0.75rem; color: #64748b; text-align: center; }
"#;
