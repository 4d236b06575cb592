use crate::domain::score::FetchState;
use crate::services::gateway::{GatewayError, OutcomesGateway};
use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Fetches the precomputed DASH score shown beside the patient banner.
#[derive(Clone, Debug)]
pub struct ScoreService {
    gateway: Arc<dyn OutcomesGateway>,
}

impl ScoreService {
    #[must_use]
    pub fn new(gateway: Arc<dyn OutcomesGateway>) -> Self {
        Self { gateway }
    }

    /// Resolves the score for a patient. An absent or empty identifier
    /// means no request at all: not loading, no score.
    #[tracing::instrument(skip(self, abort))]
    pub async fn fetch(&self, patient_uuid: Option<&str>, abort: &CancellationToken) -> FetchState {
        let Some(patient_uuid) = patient_uuid.filter(|id| !id.is_empty()) else {
            return FetchState::Unloaded;
        };

        match self.gateway.dash_score(patient_uuid, abort).await {
            Ok(value) => FetchState::Loaded(value),
            Err(GatewayError::Aborted) => FetchState::Unloaded,
            Err(GatewayError::Transport(error)) => {
                // No explicit error surface; the banner shows a placeholder.
                tracing::debug!(error = %error, "dash score fetch failed");
                FetchState::Errored
            }
        }
    }

    /// Fetches in the background, publishing `Loading` and the terminal
    /// state through a watch channel. Dropping the token aborts the fetch
    /// without further updates.
    #[must_use]
    pub fn spawn_fetch(
        &self,
        patient_uuid: Option<String>,
        abort: CancellationToken,
    ) -> watch::Receiver<FetchState> {
        let (tx, rx) = watch::channel(FetchState::Unloaded);

        let Some(patient_uuid) = patient_uuid.filter(|id| !id.is_empty()) else {
            return rx;
        };

        let service = self.clone();
        tokio::spawn(async move {
            let _ = tx.send(FetchState::Loading);
            let state = service.fetch(Some(&patient_uuid), &abort).await;
            let _ = tx.send(state);
        });

        rx
    }
}
