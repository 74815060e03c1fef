use yew::prelude::*;

use crate::config::AREAS_SECTION_ID;
use crate::pages::home::PageShell;
use crate::prefill::query_pairs;
use crate::state::draft::{Area, DraftPatch};
use crate::state::locality::localities;
use crate::state::store::use_lead_draft;

/// True when the URL carries its own `area`, which then beats the page's.
fn url_names_area(href: &str) -> bool {
    query_pairs(href)
        .iter()
        .any(|(key, _)| key.eq_ignore_ascii_case("area"))
}

#[derive(Properties, PartialEq)]
pub struct AreaLandingProps {
    pub area: Area,
    pub title: AttrValue,
    pub description: AttrValue,
}

#[function_component(AreaLanding)]
pub fn area_landing(props: &AreaLandingProps) -> Html {
    let store = use_lead_draft();

    {
        let store = store.clone();
        use_effect_with_deps(
            move |area| {
                let href = web_sys::window()
                    .and_then(|w| w.location().href().ok())
                    .unwrap_or_default();
                if !url_names_area(&href) {
                    log::debug!("Preselecting {} for area page", area);
                    store.set(DraftPatch {
                        area: Some(*area),
                        ..Default::default()
                    });
                }
                || ()
            },
            props.area,
        );
    }

    html! {
        <PageShell>
            <section class="page-hero">
                <h1>{props.title.clone()}</h1>
                <p>{props.description.clone()}</p>
            </section>
            <section id={AREAS_SECTION_ID} class="page-areas">
                <h2>{format!("Localities in {}", props.area)}</h2>
                <ul class="page-chips">
                    { for localities(props.area).iter().map(|l| html! { <li>{*l}</li> }) }
                </ul>
            </section>
        </PageShell>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_area_param_is_detected() {
        assert!(url_names_area("https://rent.example/malad?area=Malad%20East"));
        assert!(url_names_area("/kandivali?AREA=kandivali-east"));
        assert!(!url_names_area("https://rent.example/borivali?bhk=2"));
        assert!(!url_names_area("/borivali"));
    }
}
