use crate::config::{business_whatsapp_number, COUNTRY_CODE};
use crate::state::draft::{normalize_phone, PHONE_DIGITS};

pub const FORM_MESSAGE: &str =
    "Hi! I want to find a rental home in Malad/Kandivali/Borivali. Please share verified options.";
pub const FAB_MESSAGE: &str = "Hi! I'm looking for a rental home in Mumbai. Please share options.";

/// `91` + the visitor's number once it has ten digits, otherwise the
/// business number.
pub fn whatsapp_target(phone: &str, business_number: &str) -> String {
    let digits = normalize_phone(phone);
    if digits.len() == PHONE_DIGITS {
        format!("{}{}", COUNTRY_CODE, digits)
    } else {
        business_number.to_string()
    }
}

pub fn whatsapp_link_to(target: &str, message: &str) -> String {
    format!("https://wa.me/{}?text={}", target, urlencoding::encode(message))
}

pub fn whatsapp_link(phone: &str, message: &str) -> String {
    whatsapp_link_to(&whatsapp_target(phone, business_whatsapp_number()), message)
}
