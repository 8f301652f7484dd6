use reqwest::StatusCode;
use thiserror::Error;

use super::validation::ValidationReport;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} responded with {status}")]
    Status { url: String, status: StatusCode },
    #[error("invalid input data:\n{0}")]
    Validation(ValidationReport),
    #[error("term {id} dated {date} has already been conducted")]
    ConductedTerm { id: u32, date: String },
    #[error("cannot read date {0:?}")]
    InvalidDate(String),
    #[error("popup needs at least one button")]
    NoPopupButtons,
    #[error("configuration error: {0}")]
    Config(#[from] figment::Error),
}

impl PlannerError {
    /// Transport errors, timeouts and non-success statuses.
    pub fn is_network_failure(&self) -> bool {
        matches!(
            self,
            PlannerError::Transport { .. } | PlannerError::Status { .. }
        )
    }
}
