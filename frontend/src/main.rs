use chrono::Utc;
use gloo_timers::callback::Timeout;
use serde_json::json;
use yew::prelude::*;
use yew_router::history::Location;
use yew_router::prelude::*;

mod components;
mod config;
mod lead;
mod pages;
mod prefill;
mod state;
mod utils;

use config::{LEAD_SECTION_ID, PREFILL_SCROLL_DELAY_MS};
use pages::area_landing::AreaLanding;
use pages::home::Home;
use prefill::parse_prefill_from_url;
use state::draft::{Area, DraftPatch};
use state::store::{use_lead_draft, DraftProvider};
use utils::scroll_to_id;
use utils::track::{current_path, track};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/malad")]
    Malad,
    #[at("/kandivali")]
    Kandivali,
    #[at("/borivali")]
    Borivali,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <Home /> },
        Route::Malad => html! {
            <AreaLanding
                area={Area::MaladWest}
                title="Rentals in Malad"
                description="1 and 2 BHK homes near Mindspace, Link Road and Malad station, shortlisted on WhatsApp."
            />
        },
        Route::Kandivali => html! {
            <AreaLanding
                area={Area::KandivaliWest}
                title="Rentals in Kandivali"
                description="Family-friendly societies around Mahavir Nagar, Charkop and Thakur Village."
            />
        },
        Route::Borivali => html! {
            <AreaLanding
                area={Area::BorivaliWest}
                title="Rentals in Borivali"
                description="Homes near IC Colony, Gorai and the national park, with visits scheduled for you."
            />
        },
        Route::NotFound => html! { <Redirect<Route> to={Route::Home} /> },
    }
}

fn location_key(location: Option<Location>) -> (String, String) {
    location
        .map(|l| (l.path().to_string(), l.query_str().to_string()))
        .unwrap_or_default()
}

/// Seeds the draft from the query string on every route or query change.
#[function_component(QueryPrefill)]
fn query_prefill() -> Html {
    let store = use_lead_draft();
    let key = location_key(use_location());

    use_effect_with_deps(
        move |_| {
            let href = web_sys::window()
                .and_then(|w| w.location().href().ok())
                .unwrap_or_default();
            let prefill = parse_prefill_from_url(&href);
            if !prefill.patch.is_empty() {
                log::info!("Prefilling lead draft from URL");
                store.set(DraftPatch {
                    prefill_ts: Some(Utc::now().timestamp_millis()),
                    ..prefill.patch
                });
            }
            if prefill.auto_scroll {
                // Give the form a frame to mount before scrolling to it.
                Timeout::new(PREFILL_SCROLL_DELAY_MS, || scroll_to_id(LEAD_SECTION_ID)).forget();
            }
            || ()
        },
        key,
    );

    html! {}
}

#[function_component(PageViewTracker)]
fn page_view_tracker() -> Html {
    let key = location_key(use_location());

    use_effect_with_deps(
        |_| {
            track("page_view", json!({ "path": current_path() }));
            || ()
        },
        key,
    );

    html! {}
}

#[function_component(App)]
fn app() -> Html {
    html! {
        <DraftProvider>
            <BrowserRouter>
                <QueryPrefill />
                <PageViewTracker />
                <Switch<Route> render={switch} />
            </BrowserRouter>
        </DraftProvider>
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Starting rental landing page");
    yew::Renderer::<App>::new().render();
}
