//! Registrable UI surface of the module.
//!
//! The host shell mounts features into named slots; this module owns the
//! stable feature names, the slot they attach to, and the wiring that
//! turns configuration plus host capabilities into live services.

use crate::adapters::rest::RestGateway;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::host::{Connectivity, Notifier, PatientDirectory, SessionProvider, VisitDirectory, Workspace};
use crate::services::action_service::SendSmsAction;
use crate::services::gateway::OutcomesGateway;
use crate::services::score_service::ScoreService;
use crate::services::sms_service::SmsService;
use dashmap::DashMap;
use std::sync::Arc;

/// Feature name of the send-outcomes form workspace.
pub const SEND_OUTCOMES_FORM: &str = "send-outcomes-form";
/// Feature name of the overflow-menu action button.
pub const SEND_OUTCOMES_BUTTON: &str = "send-outcomes-button";
/// Slot the extensions attach to in the patient chart.
pub const PATIENT_REPORTED_OUTCOMES_SLOT: &str = "patient-reported-outcomes-slot";

/// Kind of UI fragment an extension mounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionKind {
    Workspace,
    MenuAction,
}

/// A mountable extension, as announced to the host shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionDefinition {
    pub feature_name: &'static str,
    pub slot: &'static str,
    pub kind: ExtensionKind,
}

/// Extensions registered by feature name, resolvable from any host task.
#[derive(Debug, Default)]
pub struct ExtensionRegistry {
    entries: DashMap<&'static str, ExtensionDefinition>,
}

impl ExtensionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, definition: ExtensionDefinition) {
        self.entries.insert(definition.feature_name, definition);
    }

    #[must_use]
    pub fn get(&self, feature_name: &str) -> Option<ExtensionDefinition> {
        self.entries.get(feature_name).map(|entry| entry.value().clone())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The wired module: services ready for the host shell to mount.
#[derive(Debug)]
pub struct OutcomesModule {
    pub sms: SmsService,
    pub scores: ScoreService,
    pub send_action: SendSmsAction,
    pub registry: ExtensionRegistry,
}

impl OutcomesModule {
    #[must_use]
    pub fn builder(config: Config) -> ModuleBuilder {
        ModuleBuilder {
            config,
            gateway: None,
            patients: None,
            visits: None,
            sessions: None,
            connectivity: None,
            notifier: None,
            workspace: None,
        }
    }
}

/// Collects the host capabilities before wiring. Every port is required;
/// the gateway defaults to the REST adapter built from config.
#[derive(Debug)]
pub struct ModuleBuilder {
    config: Config,
    gateway: Option<Arc<dyn OutcomesGateway>>,
    patients: Option<Arc<dyn PatientDirectory>>,
    visits: Option<Arc<dyn VisitDirectory>>,
    sessions: Option<Arc<dyn SessionProvider>>,
    connectivity: Option<Arc<dyn Connectivity>>,
    notifier: Option<Arc<dyn Notifier>>,
    workspace: Option<Arc<dyn Workspace>>,
}

impl ModuleBuilder {
    #[must_use]
    pub fn with_gateway(mut self, gateway: Arc<dyn OutcomesGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    #[must_use]
    pub fn with_patients(mut self, patients: Arc<dyn PatientDirectory>) -> Self {
        self.patients = Some(patients);
        self
    }

    #[must_use]
    pub fn with_visits(mut self, visits: Arc<dyn VisitDirectory>) -> Self {
        self.visits = Some(visits);
        self
    }

    #[must_use]
    pub fn with_sessions(mut self, sessions: Arc<dyn SessionProvider>) -> Self {
        self.sessions = Some(sessions);
        self
    }

    #[must_use]
    pub fn with_connectivity(mut self, connectivity: Arc<dyn Connectivity>) -> Self {
        self.connectivity = Some(connectivity);
        self
    }

    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    #[must_use]
    pub fn with_workspace(mut self, workspace: Arc<dyn Workspace>) -> Self {
        self.workspace = Some(workspace);
        self
    }

    /// Wires services and registers both extensions.
    ///
    /// # Errors
    /// `AppError::Config` when a required capability is missing or the
    /// REST gateway cannot be built.
    pub fn build(self) -> Result<OutcomesModule> {
        let gateway = match self.gateway {
            Some(gateway) => gateway,
            None => Arc::new(RestGateway::new(&self.config.rest)?),
        };
        let patients = require(self.patients, "patient directory")?;
        let visits = require(self.visits, "visit directory")?;
        let sessions = require(self.sessions, "session provider")?;
        let connectivity = require(self.connectivity, "connectivity probe")?;
        let notifier = require(self.notifier, "notifier")?;
        let workspace = require(self.workspace, "workspace controller")?;

        let sms = SmsService::new(
            Arc::clone(&gateway),
            connectivity,
            sessions,
            notifier,
            self.config.origin.spa_origin.clone(),
        );
        let scores = ScoreService::new(Arc::clone(&gateway));
        let send_action = SendSmsAction::new(patients, visits, workspace);

        let registry = ExtensionRegistry::new();
        registry.register(ExtensionDefinition {
            feature_name: SEND_OUTCOMES_FORM,
            slot: PATIENT_REPORTED_OUTCOMES_SLOT,
            kind: ExtensionKind::Workspace,
        });
        registry.register(ExtensionDefinition {
            feature_name: SEND_OUTCOMES_BUTTON,
            slot: PATIENT_REPORTED_OUTCOMES_SLOT,
            kind: ExtensionKind::MenuAction,
        });

        tracing::info!(extensions = registry.len(), "outcomes module wired");

        Ok(OutcomesModule { sms, scores, send_action, registry })
    }
}

fn require<T>(port: Option<T>, name: &str) -> Result<T> {
    port.ok_or_else(|| AppError::Config(format!("{name} capability not provided")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_resolves_both_feature_names() {
        let registry = ExtensionRegistry::new();
        registry.register(ExtensionDefinition {
            feature_name: SEND_OUTCOMES_FORM,
            slot: PATIENT_REPORTED_OUTCOMES_SLOT,
            kind: ExtensionKind::Workspace,
        });
        registry.register(ExtensionDefinition {
            feature_name: SEND_OUTCOMES_BUTTON,
            slot: PATIENT_REPORTED_OUTCOMES_SLOT,
            kind: ExtensionKind::MenuAction,
        });

        assert_eq!(registry.len(), 2);
        let form = registry.get(SEND_OUTCOMES_FORM).expect("form registered");
        assert_eq!(form.kind, ExtensionKind::Workspace);
        assert_eq!(form.slot, PATIENT_REPORTED_OUTCOMES_SLOT);
        assert!(registry.get("unknown-feature").is_none());
    }

    #[test]
    fn reregistration_replaces_the_entry() {
        let registry = ExtensionRegistry::new();
        let definition = ExtensionDefinition {
            feature_name: SEND_OUTCOMES_BUTTON,
            slot: PATIENT_REPORTED_OUTCOMES_SLOT,
            kind: ExtensionKind::MenuAction,
        };
        registry.register(definition.clone());
        registry.register(definition);

        assert_eq!(registry.len(), 1);
    }
}
