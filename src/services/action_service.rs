use crate::domain::patient::PatientRecord;
use crate::error::Result;
use crate::extension::SEND_OUTCOMES_FORM;
use crate::host::{PatientDirectory, VisitDirectory, Workspace};
use std::sync::Arc;

/// Menu entry offered from the patient chart's overflow menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedAction {
    pub label: String,
    pub feature_name: &'static str,
}

/// Decides whether the send action exists for a patient and performs the
/// workspace launch on activation.
#[derive(Clone, Debug)]
pub struct SendSmsAction {
    patients: Arc<dyn PatientDirectory>,
    visits: Arc<dyn VisitDirectory>,
    workspace: Arc<dyn Workspace>,
}

impl SendSmsAction {
    #[must_use]
    pub fn new(
        patients: Arc<dyn PatientDirectory>,
        visits: Arc<dyn VisitDirectory>,
        workspace: Arc<dyn Workspace>,
    ) -> Self {
        Self { patients, visits, workspace }
    }

    /// Resolves the menu item for a patient. Deceased patients get no item
    /// at all, not a disabled one.
    ///
    /// # Errors
    /// Propagates `HostError` from the patient lookup.
    #[tracing::instrument(skip(self))]
    pub async fn resolve(&self, patient_uuid: &str) -> Result<Option<RenderedAction>> {
        let patient = self.patients.find_patient(patient_uuid).await?;

        if patient.as_ref().is_some_and(PatientRecord::is_deceased) {
            tracing::debug!("send action suppressed for deceased patient");
            return Ok(None);
        }

        if let Ok(Some(visit)) = self.visits.current_visit(patient_uuid).await {
            tracing::trace!(visit_uuid = %visit.uuid, "current visit in progress");
        }

        Ok(Some(RenderedAction {
            label: "Send PRO SMS".to_owned(),
            feature_name: SEND_OUTCOMES_FORM,
        }))
    }

    /// Launches the send-outcomes workspace. One launch per activation.
    pub fn activate(&self) {
        self.workspace.launch(SEND_OUTCOMES_FORM);
    }
}
