use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

/// Route on the chart origin that receives questionnaire visits.
pub const OUTCOMES_ROUTE: &str = "/outcomes";

/// The unit submitted to the SMS backend. Built fresh on every submission
/// attempt and discarded once the POST resolves; retries never reuse an
/// instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeMessage {
    pub to: String,
    pub guid: String,
    pub body: String,
    pub source: String,
    pub patient_uuid: String,
    pub locale: String,
}

/// Builds the tracking link the patient will receive: the chart origin with
/// the outcomes route and `pid`/`locale` query parameters.
#[must_use]
pub fn tracking_link(origin: &Url, guid: &str, locale: &str) -> Url {
    let mut link = origin.clone();
    link.set_path(OUTCOMES_ROUTE);
    link.query_pairs_mut()
        .clear()
        .append_pair("pid", guid)
        .append_pair("locale", locale);
    link
}

impl OutcomeMessage {
    /// Composes a message for one submission attempt, minting a fresh
    /// token. The token doubles as the `pid` query parameter of the
    /// embedded link so the backend can correlate a questionnaire visit
    /// back to this send.
    ///
    /// Callers must not invoke this without a patient in context;
    /// `patient_uuid` is taken as given.
    #[must_use]
    pub fn compose(to: &str, locale: &str, patient_uuid: &str, origin: &Url) -> Self {
        let guid = Uuid::new_v4().to_string();
        let body = tracking_link(origin, &guid, locale).to_string();

        Self {
            to: to.to_owned(),
            guid,
            body,
            source: origin.host_str().unwrap_or_default().to_owned(),
            patient_uuid: patient_uuid.to_owned(),
            locale: locale.to_owned(),
        }
    }
}
