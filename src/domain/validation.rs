use regex::Regex;
use std::sync::LazyLock;

/// Permissive international phone pattern: optional leading `+`, optional
/// parens around the first group, 3-3-4..6 digits with `-`, `.` or space
/// separators. Intentionally loose.
static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?\(?[0-9]{3}\)?[-\s.]?[0-9]{3}[-\s.]?[0-9]{4,6}$").expect("phone pattern compiles")
});

/// Raw form input prior to validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SmsDraft {
    pub to: String,
    pub locale: String,
}

/// Per-field validation messages. Empty means the draft is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub to: Option<String>,
    pub locale: Option<String>,
}

impl FieldErrors {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.to.is_none() && self.locale.is_none()
    }
}

/// A draft that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSms {
    pub to: String,
    pub locale: String,
}

/// Validates a draft against the phone pattern and the session's allowed
/// locales. Runs on every field change so the submit control can stay
/// disabled until the draft is sound.
///
/// # Errors
/// `FieldErrors` with a message per offending field.
pub fn validate(draft: &SmsDraft, allowed_locales: &[String]) -> Result<ValidSms, FieldErrors> {
    let mut errors = FieldErrors::default();

    if !PHONE_PATTERN.is_match(&draft.to) {
        errors.to = Some("Invalid phone number".to_owned());
    }

    if draft.locale.is_empty() {
        errors.locale = Some("Language selection is required".to_owned());
    } else if !allowed_locales.contains(&draft.locale) {
        errors.locale = Some("Selected language is not available in this session".to_owned());
    }

    if errors.is_empty() {
        Ok(ValidSms { to: draft.to.clone(), locale: draft.locale.clone() })
    } else {
        Err(errors)
    }
}
