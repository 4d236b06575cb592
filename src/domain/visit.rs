use serde::{Deserialize, Serialize};

/// Minimal view of the current visit, as reported by the host shell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visit_type: Option<String>,
}
