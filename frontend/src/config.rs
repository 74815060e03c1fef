pub const DEFAULT_BUSINESS_WHATSAPP: &str = "917498369191";
pub const COUNTRY_CODE: &str = "91";
pub const LAST_LEAD_STORAGE_KEY: &str = "rr_last_lead";
pub const AB_VARIANT_STORAGE_KEY: &str = "rr_ab_variant";
pub const LEAD_SECTION_ID: &str = "lead";
pub const AREAS_SECTION_ID: &str = "areas";
pub const PREFILL_SCROLL_DELAY_MS: u32 = 50;

/// Lead capture endpoint, baked in at build time from `LEAD_API_URL`.
pub fn get_lead_api_url() -> Option<String> {
    normalize_endpoint(option_env!("LEAD_API_URL"))
}

pub fn business_whatsapp_number() -> &'static str {
    match option_env!("BUSINESS_WHATSAPP_NUMBER") {
        Some(number) if !number.trim().is_empty() => number.trim(),
        _ => DEFAULT_BUSINESS_WHATSAPP,
    }
}

pub(crate) fn normalize_endpoint(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
}
