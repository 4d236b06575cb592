use serde_json::Value;

/// Opaque score value returned by the backend, consumed as-is.
pub type ScoreValue = Value;

/// Placeholder rendered when no score is available.
pub const SCORE_PLACEHOLDER: &str = "--";

/// Observable states of a remote score fetch. Errors are not modeled
/// separately for display; `Errored` projects the same view as `Unloaded`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchState {
    #[default]
    Unloaded,
    Loading,
    Loaded(ScoreValue),
    Errored,
}

/// Projection of a fetch state for display next to the patient banner.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreView {
    pub score: Option<ScoreValue>,
    pub is_loading: bool,
}

impl FetchState {
    #[must_use]
    pub fn view(&self) -> ScoreView {
        match self {
            Self::Loading => ScoreView { score: None, is_loading: true },
            Self::Loaded(value) => ScoreView { score: Some(value.clone()), is_loading: false },
            Self::Unloaded | Self::Errored => ScoreView { score: None, is_loading: false },
        }
    }
}

impl ScoreView {
    /// Text shown in the banner: the raw score, or `--` when absent.
    #[must_use]
    pub fn display(&self) -> String {
        match &self.score {
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
            None => SCORE_PLACEHOLDER.to_owned(),
        }
    }
}
