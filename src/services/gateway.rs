use crate::domain::outcome::OutcomeMessage;
use crate::domain::score::ScoreValue;
use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("request aborted")]
    Aborted,
    #[error("transport failure: {0}")]
    Transport(#[from] anyhow::Error),
}

/// Outbound REST surface of the outcomes backend.
#[async_trait]
pub trait OutcomesGateway: Send + Sync + std::fmt::Debug {
    /// POSTs an outcome message and returns the HTTP status code; callers
    /// decide what counts as success.
    ///
    /// # Errors
    /// `GatewayError::Aborted` if `abort` fires before the response lands,
    /// `GatewayError::Transport` when the request cannot complete.
    async fn send_sms(&self, payload: &OutcomeMessage, abort: &CancellationToken) -> Result<u16, GatewayError>;

    /// Fetches the precomputed DASH score for a patient.
    ///
    /// # Errors
    /// `GatewayError::Transport` for non-success responses and I/O
    /// failures, `GatewayError::Aborted` if `abort` fires first.
    async fn dash_score(&self, patient_uuid: &str, abort: &CancellationToken) -> Result<ScoreValue, GatewayError>;
}
