use yew::prelude::*;
use yew_router::components::Link;

use crate::components::lead_resume::LeadResume;
use crate::components::smart_cta_bar::SmartCtaBar;
use crate::components::whatsapp_fab::WhatsAppFab;
use crate::config::{AREAS_SECTION_ID, LEAD_SECTION_ID};
use crate::lead::form::LeadForm;
use crate::utils::scroll_to_id;
use crate::Route;

const AREA_CARDS: [(Route, &str, &str); 3] = [
    (Route::Malad, "Malad", "Mindspace, Evershine Nagar, Malvani"),
    (Route::Kandivali, "Kandivali", "Thakur Village, Mahavir Nagar, Charkop"),
    (Route::Borivali, "Borivali", "IC Colony, Gorai, Shimpoli"),
];

#[derive(Properties, PartialEq)]
pub struct PageShellProps {
    pub children: Children,
}

/// Widgets shared by every landing page wrapped around its content, with the
/// lead form at the bottom.
#[function_component(PageShell)]
pub fn page_shell(props: &PageShellProps) -> Html {
    html! {
        <main class="page">
            <style>{PAGE_CSS}</style>
            <header class="page-nav">
                <Link<Route> to={Route::Home} classes="page-logo">{"RentMatch Mumbai"}</Link<Route>>
            </header>
            <LeadResume />
            { for props.children.iter() }
            <section id={LEAD_SECTION_ID}>
                <LeadForm />
            </section>
            <footer class="page-footer">
                {"Verified rentals across Malad, Kandivali and Borivali."}
            </footer>
            <WhatsAppFab />
            <SmartCtaBar />
        </main>
    }
}

#[function_component(Home)]
pub fn home() -> Html {
    let to_lead = Callback::from(|_: MouseEvent| scroll_to_id(LEAD_SECTION_ID));
    let to_areas = Callback::from(|_: MouseEvent| scroll_to_id(AREAS_SECTION_ID));

    html! {
        <PageShell>
            <section class="page-hero">
                <h1>{"Rental homes in Mumbai's western suburbs, shortlisted for you"}</h1>
                <p>{"Share your budget and move-in date. We send verified options on WhatsApp and line up visits."}</p>
                <div class="page-hero-actions">
                    <button class="page-btn" onclick={to_lead}>{"Get my shortlist"}</button>
                    <button class="page-btn page-btn-ghost" onclick={to_areas}>{"Browse areas"}</button>
                </div>
            </section>
            <section id={AREAS_SECTION_ID} class="page-areas">
                <h2>{"Areas we cover"}</h2>
                <div class="page-area-grid">
                    { for AREA_CARDS.iter().map(|(route, name, highlights)| html! {
                        <Link<Route> to={route.clone()} classes="page-area-card">
                            <strong>{*name}</strong>
                            <span>{*highlights}</span>
                        </Link<Route>>
                    }) }
                </div>
            </section>
        </PageShell>
    }
}

const PAGE_CSS: &str = r#"
    body { margin: 0; font-family: system-ui, -apple-system, "Segoe UI", sans-serif; color: #0f172a; }
    .page { padding-bottom: 5rem; }
    .page-nav { display: flex; align-items: center; max-width: 1100px; margin: 0 auto; padding: 1rem 1.5rem; }
    .page-logo { font-weight: 700; color: #020617; text-decoration: none; }
    .page-hero { max-width: 1100px; margin: 0 auto; padding: 3rem 1.5rem 2rem; }
    .page-hero h1 { font-size: 2.5rem; line-height: 1.15; margin: 0 0 1rem; }
    .page-hero p { color: #475569; max-width: 40rem; }
    .page-hero-actions { display: flex; flex-wrap: wrap; gap: 0.75rem; margin-top: 1.5rem; }
    .page-btn { border: none; border-radius: 1rem; padding: 0.8rem 1.25rem; background: #020617; color: #fff; font: inherit; font-weight: 600; cursor: pointer; }
    .page-btn-ghost { background: #fff; color: #1e293b; border: 1px solid #e2e8f0; }
    .page-areas { max-width: 1100px; margin: 0 auto; padding: 2rem 1.5rem; }
    .page-area-grid { display: grid; gap: 1rem; }
    @media (min-width: 768px) {
        .page-area-grid { grid-template-columns: repeat(3, 1fr); }
    }
    .page-area-card { display: flex; flex-direction: column; gap: 0.25rem; padding: 1.25rem; border: 1px solid #e2e8f0; border-radius: 1.25rem; color: inherit; text-decoration: none; }
    .page-area-card span { color: #64748b; font-size: 0.9rem; }
    .page-chips { display: flex; flex-wrap: wrap; gap: 0.5rem; margin-top: 1rem; padding: 0; list-style: none; }
    .page-chips li { padding: 0.3rem 0.75rem; border-radius: 999px; background: #f1f5f9; font-size: 0.8rem; }
    .page-footer { text-align: center; color: #64748b; font-size: 0.8rem; padding: 2rem 1rem; }
"#;
