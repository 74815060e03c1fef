use thiserror::Error;

use crate::lead::validation::FieldErrors;

#[derive(Error, Debug)]
pub enum LeadError {
    #[error("{}", .0.summary())]
    Validation(FieldErrors),
    #[error("Missing lead API URL. Set LEAD_API_URL at build time and rebuild.")]
    Configuration,
    #[error("{message}")]
    RemoteRejection { status: u16, message: String },
    #[error("Network error. Please try again.")]
    Network(String),
    #[error("Could not save the lead receipt: {0}")]
    Storage(String),
    #[error("Could not encode the request: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl LeadError {
    /// Value for the `status` field of the failure telemetry event.
    pub fn telemetry_status(&self) -> String {
        match self {
            LeadError::Validation(_) => "validation".to_string(),
            LeadError::Configuration => "config".to_string(),
            LeadError::RemoteRejection { status, .. } => status.to_string(),
            LeadError::Network(_) => "network".to_string(),
            LeadError::Storage(_) => "storage".to_string(),
            LeadError::Serialize(_) => "encode".to_string(),
        }
    }
}
