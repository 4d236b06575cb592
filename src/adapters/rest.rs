use crate::config::RestConfig;
use crate::domain::outcome::OutcomeMessage;
use crate::domain::score::ScoreValue;
use crate::error::AppError;
use crate::services::gateway::{GatewayError, OutcomesGateway};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Production gateway: talks JSON to the outcomes REST backend.
#[derive(Clone, Debug)]
pub struct RestGateway {
    client: Client,
    base_url: Url,
}

impl RestGateway {
    /// # Errors
    /// `AppError::Config` when the base URL cannot serve as a base or the
    /// HTTP client cannot be built.
    pub fn new(config: &RestConfig) -> crate::error::Result<Self> {
        if config.base_url.cannot_be_a_base() {
            return Err(AppError::Config(format!("REST base URL {} cannot be a base", config.base_url)));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|error| AppError::Config(format!("failed to build HTTP client: {error}")))?;

        Ok(Self { client, base_url: config.base_url.clone() })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`; a base URL always has splittable segments.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[async_trait]
impl OutcomesGateway for RestGateway {
    #[tracing::instrument(skip_all, fields(guid = %payload.guid))]
    async fn send_sms(&self, payload: &OutcomeMessage, abort: &CancellationToken) -> Result<u16, GatewayError> {
        let url = self.endpoint(&["outcomes", "sms"]);
        let request = self.client.post(url).json(payload).send();

        tokio::select! {
            () = abort.cancelled() => Err(GatewayError::Aborted),
            response = request => {
                let response = response.context("posting outcome message")?;
                Ok(response.status().as_u16())
            }
        }
    }

    #[tracing::instrument(skip(self, abort))]
    async fn dash_score(&self, patient_uuid: &str, abort: &CancellationToken) -> Result<ScoreValue, GatewayError> {
        let url = self.endpoint(&["outcomes", "score", patient_uuid]);
        let request = async {
            let response = self.client.get(url).send().await.context("requesting dash score")?;
            let response = response.error_for_status().context("dash score request rejected")?;
            response.json::<ScoreValue>().await.context("decoding dash score")
        };

        tokio::select! {
            () = abort.cancelled() => Err(GatewayError::Aborted),
            result = request => Ok(result?),
        }
    }
}
