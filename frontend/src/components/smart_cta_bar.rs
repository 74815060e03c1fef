use serde_json::json;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use yew::prelude::*;

use crate::config::{AREAS_SECTION_ID, LEAD_SECTION_ID};
use crate::state::store::use_lead_draft;
use crate::utils::scroll_to_id;
use crate::utils::track::track;
use crate::utils::whatsapp::{whatsapp_link, FAB_MESSAGE};

const AT_TOP_MAX_SCROLL_Y: f64 = 80.0;
/// The lead section counts as near once its top enters the lower tenth of
/// the viewport.
const NEAR_LEAD_VIEWPORT_FRACTION: f64 = 0.9;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrimaryCta {
    SubmitPreferences,
    WhatsAppShortlist,
    CheckAvailability,
}

impl PrimaryCta {
    /// Near the form wins over being at the top.
    pub fn for_scroll(at_top: bool, near_lead: bool) -> Self {
        if near_lead {
            PrimaryCta::SubmitPreferences
        } else if at_top {
            PrimaryCta::WhatsAppShortlist
        } else {
            PrimaryCta::CheckAvailability
        }
    }

    /// Section the primary button scrolls to.
    pub fn target(self) -> &'static str {
        match self {
            PrimaryCta::SubmitPreferences | PrimaryCta::WhatsAppShortlist => LEAD_SECTION_ID,
            PrimaryCta::CheckAvailability => AREAS_SECTION_ID,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PrimaryCta::SubmitPreferences => "Submit preferences",
            PrimaryCta::WhatsAppShortlist => "Get WhatsApp shortlist",
            PrimaryCta::CheckAvailability => "Check availability",
        }
    }
}

fn is_near(section_top: f64, section_bottom: f64, viewport_height: f64) -> bool {
    section_top < viewport_height * NEAR_LEAD_VIEWPORT_FRACTION && section_bottom > 0.0
}

fn measure() -> PrimaryCta {
    let Some(window) = web_sys::window() else {
        return PrimaryCta::WhatsAppShortlist;
    };
    let at_top = window.scroll_y().unwrap_or(0.0) < AT_TOP_MAX_SCROLL_Y;
    let viewport_height = window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0);
    let near_lead = window
        .document()
        .and_then(|doc| doc.get_element_by_id(LEAD_SECTION_ID))
        .map(|el| {
            let rect = el.get_bounding_client_rect();
            is_near(rect.top(), rect.bottom(), viewport_height)
        })
        .unwrap_or(false);
    PrimaryCta::for_scroll(at_top, near_lead)
}

/// Sticky bottom bar for small screens whose primary action follows the
/// scroll position.
#[function_component(SmartCtaBar)]
pub fn smart_cta_bar() -> Html {
    let store = use_lead_draft();
    let primary = use_state(|| PrimaryCta::WhatsAppShortlist);

    {
        let primary = primary.clone();
        use_effect_with_deps(
            move |_| {
                let destructor: Box<dyn FnOnce()> = if let Some(window) = web_sys::window() {
                    let callback = Closure::<dyn Fn()>::new({
                        let primary = primary.clone();
                        move || primary.set(measure())
                    });
                    if let Err(e) = window
                        .add_event_listener_with_callback("scroll", callback.as_ref().unchecked_ref())
                    {
                        log::warn!("Could not attach scroll listener: {:?}", e);
                    }
                    primary.set(measure());
                    Box::new(move || {
                        if let Some(win) = web_sys::window() {
                            let _ = win.remove_event_listener_with_callback(
                                "scroll",
                                callback.as_ref().unchecked_ref(),
                            );
                        }
                    })
                } else {
                    Box::new(|| ())
                };
                move || destructor()
            },
            (),
        );
    }

    let cta = *primary;
    let draft = store.draft();
    let wa_href = whatsapp_link(&draft.phone, FAB_MESSAGE);
    let has_phone = draft.has_valid_phone();

    let on_primary = Callback::from(move |_: MouseEvent| {
        track("smart_cta_primary_click", json!({ "label": cta.label() }));
        scroll_to_id(cta.target());
    });
    let on_whatsapp = Callback::from(move |_: MouseEvent| {
        track("smart_cta_whatsapp_click", json!({ "hasPhone": has_phone }));
    });

    html! {
        <div class="cta-bar">
            <style>{r#"
                .cta-bar {
                    position: fixed;
                    left: 0;
                    right: 0;
                    bottom: 0;
                    z-index: 30;
                    padding: 0.75rem 1rem;
                    background: rgba(255, 255, 255, 0.95);
                    border-top: 1px solid #e2e8f0;
                    backdrop-filter: blur(8px);
                }
                .cta-bar-row { display: flex; gap: 0.75rem; align-items: center; }
                .cta-bar-wa {
                    padding: 0.8rem 1rem;
                    border-radius: 1rem;
                    background: #25d366;
                    color: #fff;
                    font-weight: 600;
                    text-decoration: none;
                }
                .cta-bar-primary {
                    flex: 1;
                    padding: 0.8rem 1rem;
                    border: none;
                    border-radius: 1rem;
                    background: #020617;
                    color: #fff;
                    font: inherit;
                    font-weight: 600;
                    text-align: center;
                    text-decoration: none;
                }
                @media (min-width: 768px) {
                    .cta-bar { display: none; }
                }
            "#}</style>
            <div class="cta-bar-row">
                <button type="button" class="cta-bar-primary" onclick={on_primary}>{cta.label()}</button>
                <a class="cta-bar-wa" href={wa_href} target="_blank" rel="noreferrer" onclick={on_whatsapp}>
                    {"WhatsApp"}
                </a>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_lead_takes_priority() {
        assert_eq!(PrimaryCta::for_scroll(true, true), PrimaryCta::SubmitPreferences);
        assert_eq!(PrimaryCta::for_scroll(false, true), PrimaryCta::SubmitPreferences);
        assert_eq!(PrimaryCta::for_scroll(true, false), PrimaryCta::WhatsAppShortlist);
        assert_eq!(PrimaryCta::for_scroll(false, false), PrimaryCta::CheckAvailability);
    }

    #[test]
    fn labels() {
        assert_eq!(PrimaryCta::SubmitPreferences.label(), "Submit preferences");
        assert_eq!(PrimaryCta::WhatsAppShortlist.label(), "Get WhatsApp shortlist");
        assert_eq!(PrimaryCta::CheckAvailability.label(), "Check availability");
    }

    #[test]
    fn only_check_availability_heads_to_areas() {
        assert_eq!(PrimaryCta::SubmitPreferences.target(), LEAD_SECTION_ID);
        assert_eq!(PrimaryCta::WhatsAppShortlist.target(), LEAD_SECTION_ID);
        assert_eq!(PrimaryCta::CheckAvailability.target(), AREAS_SECTION_ID);
    }

    #[test]
    fn section_is_near_only_while_on_screen() {
        assert!(is_near(500.0, 1400.0, 800.0));
        assert!(!is_near(760.0, 1600.0, 800.0));
        assert!(!is_near(-900.0, -10.0, 800.0));
    }
}
