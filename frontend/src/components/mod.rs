pub mod lead_resume;
pub mod smart_cta_bar;
pub mod whatsapp_fab;
