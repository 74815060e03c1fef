use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use web_sys::window;

use crate::lead::error::LeadError;
use crate::lead::validation::validate_all;
use crate::prefill::query_pairs;
use crate::state::ab::{get_ab_variant, Variant};
use crate::state::draft::{Area, Bhk, Draft, Furnishing, MoveIn, Profile};
use crate::utils::device::DeviceClass;

pub const LEAD_SOURCE: &str = "landing";

#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct Utm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Utm {
    /// The five `utm_*` parameters of `href`, or `None` when none is set.
    pub fn from_url(href: &str) -> Option<Utm> {
        let mut utm = Utm::default();
        for (key, value) in query_pairs(href) {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            let slot = match key.as_str() {
                "utm_source" => &mut utm.source,
                "utm_medium" => &mut utm.medium,
                "utm_campaign" => &mut utm.campaign,
                "utm_term" => &mut utm.term,
                "utm_content" => &mut utm.content,
                _ => continue,
            };
            *slot = Some(value.to_string());
        }
        if utm == Utm::default() {
            None
        } else {
            Some(utm)
        }
    }
}

/// Everything about a submission that does not come from the draft.
#[derive(Clone, Debug)]
pub struct SubmissionContext {
    pub ab_variant: Option<Variant>,
    pub created_at: DateTime<Utc>,
    pub landing_url: Option<String>,
    pub device: Option<DeviceClass>,
    pub idempotency_key: Option<String>,
}

impl SubmissionContext {
    /// Snapshot of the browser at the moment the user pressed submit.
    pub fn capture(idempotency_key: Option<String>) -> Self {
        Self {
            ab_variant: Some(get_ab_variant()),
            created_at: Utc::now(),
            landing_url: window().and_then(|w| w.location().href().ok()),
            device: DeviceClass::current(),
            idempotency_key,
        }
    }
}

/// Wire body posted to the lead endpoint.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeadPayload {
    pub name: String,
    pub phone: String,
    pub area: Area,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    pub budget_range: String,
    pub bhk: Bhk,
    pub furnishing: Furnishing,
    pub move_in: MoveIn,
    pub profile: Profile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub source: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ab_variant: Option<Variant>,
    pub created_at_iso: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landing_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<DeviceClass>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm: Option<Utm>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl LeadPayload {
    pub fn build(draft: &Draft, ctx: &SubmissionContext) -> Result<Self, LeadError> {
        let errors = validate_all(draft);
        let (Some(area), Some(bhk), Some(furnishing), Some(move_in), Some(profile)) = (
            draft.area,
            draft.bhk,
            draft.furnishing,
            draft.move_in,
            draft.profile,
        ) else {
            return Err(LeadError::Validation(errors));
        };
        if !errors.is_empty() {
            return Err(LeadError::Validation(errors));
        }

        Ok(Self {
            name: draft.name.trim().to_string(),
            phone: draft.phone.clone(),
            area,
            locality: non_empty(&draft.locality),
            budget_range: draft.budget_range(),
            bhk,
            furnishing,
            move_in,
            profile,
            notes: non_empty(&draft.notes),
            source: LEAD_SOURCE,
            ab_variant: ctx.ab_variant,
            created_at_iso: ctx.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            landing_url: ctx.landing_url.clone(),
            device: ctx.device,
            utm: ctx.landing_url.as_deref().and_then(Utm::from_url),
            idempotency_key: ctx.idempotency_key.clone(),
        })
    }

    pub fn to_body(&self) -> Result<String, LeadError> {
        Ok(serde_json::to_string(self)?)
    }
}
