use serde::{Deserialize, Serialize};

use crate::config::LAST_LEAD_STORAGE_KEY;
use crate::lead::error::LeadError;
use crate::lead::payload::LeadPayload;
use crate::utils::storage::KeyValueStore;

/// Summary of the most recent accepted lead, kept for returning visitors.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LastLeadReceipt {
    pub lead_id: String,
    pub name: String,
    pub phone: String,
    pub area: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    pub budget_range: String,
    pub bhk: String,
    pub submitted_at_iso: String,
}

impl LastLeadReceipt {
    pub fn from_payload(lead_id: &str, payload: &LeadPayload) -> Self {
        Self {
            lead_id: lead_id.to_string(),
            name: payload.name.clone(),
            phone: payload.phone.clone(),
            area: payload.area.label().to_string(),
            locality: payload.locality.clone(),
            budget_range: payload.budget_range.clone(),
            bhk: payload.bhk.code().to_string(),
            submitted_at_iso: payload.created_at_iso.clone(),
        }
    }
}

/// Replaces whatever receipt was stored before.
pub fn persist_last_lead(store: &impl KeyValueStore, receipt: &LastLeadReceipt) -> Result<(), LeadError> {
    let encoded = serde_json::to_string(receipt)?;
    store
        .set_item(LAST_LEAD_STORAGE_KEY, &encoded)
        .map_err(LeadError::Storage)
}

pub fn read_last_lead(store: &impl KeyValueStore) -> Option<LastLeadReceipt> {
    let raw = store.get_item(LAST_LEAD_STORAGE_KEY)?;
    match serde_json::from_str(&raw) {
        Ok(receipt) => Some(receipt),
        Err(e) => {
            log::warn!("Ignoring unreadable last-lead receipt: {}", e);
            None
        }
    }
}
