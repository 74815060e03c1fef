use crate::config::normalize_endpoint;
use crate::lead::client::{send_lead, LeadAccepted, LeadTransport};
use crate::lead::error::LeadError;
use crate::lead::payload::{LeadPayload, SubmissionContext};
use crate::lead::receipt::{persist_last_lead, LastLeadReceipt};
use crate::state::draft::Draft;
use crate::utils::storage::KeyValueStore;

/// One user-triggered submission: config check, payload, a single POST,
/// then the receipt. A receipt that cannot be written does not fail the
/// submission, the lead is already recorded remotely.
pub async fn run_submission<T, S>(
    transport: &T,
    receipts: Option<&S>,
    endpoint: Option<&str>,
    draft: &Draft,
    ctx: SubmissionContext,
) -> Result<LeadAccepted, LeadError>
where
    T: LeadTransport,
    S: KeyValueStore,
{
    let endpoint = normalize_endpoint(endpoint).ok_or(LeadError::Configuration)?;
    let payload = LeadPayload::build(draft, &ctx)?;
    let accepted = send_lead(transport, &endpoint, &payload).await?;
    log::info!("Lead accepted with id {}", accepted.lead_id);

    match receipts {
        Some(store) => {
            let receipt = LastLeadReceipt::from_payload(&accepted.lead_id, &payload);
            if let Err(e) = persist_last_lead(store, &receipt) {
                log::warn!("{}", e);
            }
        }
        None => log::warn!("No local storage, last-lead receipt not saved"),
    }
    Ok(accepted)
}
