use crate::domain::outcome::OutcomeMessage;
use crate::domain::patient::PatientRecord;
use crate::domain::validation::{self, FieldErrors, SmsDraft};
use crate::error::{AppError, Result};
use crate::host::{Connectivity, Notifier, SessionProvider, Snackbar, Workspace};
use crate::services::gateway::{GatewayError, OutcomesGateway};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Submission lifecycle of a single form instance. `Success` and `Failed`
/// are terminal per attempt; a new attempt restarts from `Idle` and mints
/// a new token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Success,
    Failed,
}

/// Dependencies shared by every send-SMS form instance.
#[derive(Clone, Debug)]
pub struct SmsService {
    gateway: Arc<dyn OutcomesGateway>,
    connectivity: Arc<dyn Connectivity>,
    sessions: Arc<dyn SessionProvider>,
    notifier: Arc<dyn Notifier>,
    origin: Url,
}

impl SmsService {
    #[must_use]
    pub fn new(
        gateway: Arc<dyn OutcomesGateway>,
        connectivity: Arc<dyn Connectivity>,
        sessions: Arc<dyn SessionProvider>,
        notifier: Arc<dyn Notifier>,
        origin: Url,
    ) -> Self {
        Self { gateway, connectivity, sessions, notifier, origin }
    }

    /// Opens a workflow for one patient chart. The draft starts from the
    /// session locale and, when a record is on hand, the patient's primary
    /// phone number.
    #[must_use]
    pub fn workflow(
        &self,
        patient_uuid: Option<String>,
        patient: Option<&PatientRecord>,
        workspace: Arc<dyn Workspace>,
    ) -> SendSmsWorkflow {
        SendSmsWorkflow::new(self.clone(), patient_uuid, patient, workspace)
    }
}

/// One send-SMS form: the draft under edit, its validation state, and the
/// submission state machine. Owns its draft exclusively; the host only
/// observes it.
#[derive(Debug)]
pub struct SendSmsWorkflow {
    service: SmsService,
    workspace: Arc<dyn Workspace>,
    patient_uuid: Option<String>,
    allowed_locales: Vec<String>,
    draft: SmsDraft,
    errors: FieldErrors,
    state: SubmissionState,
    dirty: bool,
}

impl SendSmsWorkflow {
    fn new(
        service: SmsService,
        patient_uuid: Option<String>,
        patient: Option<&PatientRecord>,
        workspace: Arc<dyn Workspace>,
    ) -> Self {
        let session = service.sessions.session();
        let mut draft = SmsDraft { to: String::new(), locale: session.locale };
        if let Some(phone) = patient.and_then(PatientRecord::primary_phone) {
            draft.to = phone.to_owned();
        }
        let errors = validation::validate(&draft, &session.allowed_locales)
            .err()
            .unwrap_or_default();

        Self {
            service,
            workspace,
            patient_uuid: patient_uuid.filter(|id| !id.is_empty()),
            allowed_locales: session.allowed_locales,
            draft,
            errors,
            state: SubmissionState::Idle,
            dirty: false,
        }
    }

    pub fn set_phone(&mut self, value: &str) {
        self.draft.to = value.to_owned();
        self.dirty = true;
        self.revalidate();
    }

    pub fn set_locale(&mut self, value: &str) {
        self.draft.locale = value.to_owned();
        self.dirty = true;
        self.revalidate();
    }

    fn revalidate(&mut self) {
        self.errors = validation::validate(&self.draft, &self.allowed_locales)
            .err()
            .unwrap_or_default();
    }

    #[must_use]
    pub fn draft(&self) -> &SmsDraft {
        &self.draft
    }

    #[must_use]
    pub fn field_errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Locales offered in the language select.
    #[must_use]
    pub fn locale_options(&self) -> &[String] {
        &self.allowed_locales
    }

    #[must_use]
    pub const fn state(&self) -> SubmissionState {
        self.state
    }

    /// Whether the host should prompt before closing an edited form.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Drives the submit control: valid draft and nothing in flight.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.errors.is_empty() && self.state != SubmissionState::Submitting
    }

    /// Drives one submission attempt through the state machine.
    ///
    /// Offline and rejected submissions surface as notifications and the
    /// resulting state, not as `Err`; an aborted request reverts to `Idle`
    /// without side effects.
    ///
    /// # Errors
    /// `AppError::Validation` when invoked with an invalid draft.
    #[tracing::instrument(skip_all)]
    pub async fn submit(&mut self, abort: &CancellationToken) -> Result<SubmissionState> {
        if self.state == SubmissionState::Submitting {
            tracing::debug!("submission already in flight");
            return Ok(self.state);
        }

        let Some(patient_uuid) = self.patient_uuid.clone() else {
            // Contract violation upstream; refused without user-facing noise.
            tracing::warn!("submit refused: no patient in context");
            return Ok(self.state);
        };

        let valid = match validation::validate(&self.draft, &self.allowed_locales) {
            Ok(valid) => valid,
            Err(errors) => {
                self.errors = errors.clone();
                return Err(AppError::Validation(errors));
            }
        };

        self.state = SubmissionState::Idle;

        if !self.service.connectivity.is_online() {
            self.service.notifier.show(Snackbar::error(
                "Sending SMS failed",
                "Cannot send SMS without an internet connection",
            ));
            return Ok(self.state);
        }

        self.state = SubmissionState::Submitting;
        let payload = OutcomeMessage::compose(&valid.to, &valid.locale, &patient_uuid, &self.service.origin);
        tracing::debug!(guid = %payload.guid, "submitting outcome message");

        match self.service.gateway.send_sms(&payload, abort).await {
            Ok(200) => {
                self.state = SubmissionState::Success;
                self.service.notifier.show(Snackbar::success(
                    "SMS sent",
                    "PRO questionnaire link sent to the patient",
                ));
            }
            Ok(status) => {
                tracing::warn!(status, "outcomes backend rejected the submission");
                self.fail_attempt();
            }
            Err(GatewayError::Aborted) => {
                // The form went away mid-request; nothing else may happen.
                self.state = SubmissionState::Idle;
            }
            Err(GatewayError::Transport(error)) => {
                tracing::warn!(error = %error, "outcome submission failed in transport");
                self.fail_attempt();
            }
        }

        Ok(self.state)
    }

    fn fail_attempt(&mut self) {
        self.state = SubmissionState::Failed;
        self.workspace.request_close(true);
        self.service.notifier.show(Snackbar::error(
            "Sending SMS failed",
            "Error sending the PRO questionnaire link",
        ));
    }
}
