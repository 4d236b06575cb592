//! Capabilities owned by the hosting shell.
//!
//! The module never manages patient lookup, session state, connectivity
//! probing, workspace lifecycle, or user-visible notifications itself; it
//! consumes them through these ports. Production hosts adapt their own
//! registries; tests inject mocks.

use crate::domain::patient::PatientRecord;
use crate::domain::session::UserSession;
use crate::domain::visit::Visit;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostError {
    #[error("patient lookup failed: {0}")]
    PatientLookup(String),
    #[error("visit lookup failed: {0}")]
    VisitLookup(String),
}

#[async_trait]
pub trait PatientDirectory: Send + Sync + std::fmt::Debug {
    /// Resolves a patient by chart identifier. `Ok(None)` means the host
    /// has no record for it.
    ///
    /// # Errors
    /// `HostError::PatientLookup` when the host cannot answer.
    async fn find_patient(&self, patient_uuid: &str) -> Result<Option<PatientRecord>, HostError>;
}

#[async_trait]
pub trait VisitDirectory: Send + Sync + std::fmt::Debug {
    /// The visit currently open for the patient, if any.
    ///
    /// # Errors
    /// `HostError::VisitLookup` when the host cannot answer.
    async fn current_visit(&self, patient_uuid: &str) -> Result<Option<Visit>, HostError>;
}

pub trait SessionProvider: Send + Sync + std::fmt::Debug {
    fn session(&self) -> UserSession;
}

pub trait Connectivity: Send + Sync + std::fmt::Debug {
    fn is_online(&self) -> bool;
}

/// Severity of a user-visible notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnackbarKind {
    Success,
    Error,
}

/// User-visible notification, rendered by the host shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snackbar {
    pub kind: SnackbarKind,
    pub title: String,
    pub subtitle: String,
    pub low_contrast: bool,
}

impl Snackbar {
    #[must_use]
    pub fn success(title: &str, subtitle: &str) -> Self {
        Self {
            kind: SnackbarKind::Success,
            title: title.to_owned(),
            subtitle: subtitle.to_owned(),
            low_contrast: true,
        }
    }

    #[must_use]
    pub fn error(title: &str, subtitle: &str) -> Self {
        Self {
            kind: SnackbarKind::Error,
            title: title.to_owned(),
            subtitle: subtitle.to_owned(),
            low_contrast: false,
        }
    }
}

pub trait Notifier: Send + Sync + std::fmt::Debug {
    fn show(&self, snackbar: Snackbar);
}

/// Workspace lifecycle operations owned by the host shell.
pub trait Workspace: Send + Sync + std::fmt::Debug {
    /// Opens the workspace registered under `feature_name`.
    fn launch(&self, feature_name: &str);

    /// Asks the hosting workspace to close. `ignore_changes` discards an
    /// edited draft without prompting.
    fn request_close(&self, ignore_changes: bool);
}
