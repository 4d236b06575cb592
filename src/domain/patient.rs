use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Contact point attached to a patient record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactPoint {
    pub value: String,
}

/// Patient data surfaced by the host's patient directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(default)]
    pub telecom: Vec<ContactPoint>,
    #[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub deceased_date_time: Option<OffsetDateTime>,
}

impl PatientRecord {
    /// Deceased patients are never offered the send action.
    #[must_use]
    pub const fn is_deceased(&self) -> bool {
        self.deceased_date_time.is_some()
    }

    /// First telecom value, used to prefill the recipient field.
    #[must_use]
    pub fn primary_phone(&self) -> Option<&str> {
        self.telecom.first().map(|contact| contact.value.as_str())
    }
}
