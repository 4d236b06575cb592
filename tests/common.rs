#![allow(
    clippy::unwrap_used,
    clippy::panic,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    missing_debug_implementations,
    unreachable_pub,
    dead_code
)]

use async_trait::async_trait;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use outcomes_sms::config::{Config, LogFormat, OriginConfig, RestConfig, TelemetryConfig};
use outcomes_sms::domain::patient::PatientRecord;
use outcomes_sms::domain::session::UserSession;
use outcomes_sms::domain::visit::Visit;
use outcomes_sms::extension::OutcomesModule;
use outcomes_sms::host::{
    Connectivity, HostError, Notifier, PatientDirectory, SessionProvider, Snackbar, VisitDirectory,
    Workspace,
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

pub fn setup_tracing() {
    outcomes_sms::telemetry::init_test_telemetry();
}

/// Shared state of the stubbed outcomes backend.
#[derive(Debug)]
pub struct BackendState {
    pub sms_requests: Mutex<Vec<serde_json::Value>>,
    pub sms_status: Mutex<u16>,
    pub sms_delay: Mutex<Duration>,
    pub score_requests: Mutex<Vec<String>>,
    pub score_status: Mutex<u16>,
    pub score: Mutex<serde_json::Value>,
}

impl Default for BackendState {
    fn default() -> Self {
        Self {
            sms_requests: Mutex::new(Vec::new()),
            sms_status: Mutex::new(200),
            sms_delay: Mutex::new(Duration::ZERO),
            score_requests: Mutex::new(Vec::new()),
            score_status: Mutex::new(200),
            score: Mutex::new(json!("42")),
        }
    }
}

pub struct StubBackend {
    pub addr: SocketAddr,
    pub state: Arc<BackendState>,
}

/// Binds the stub backend on an ephemeral port and serves it for the rest
/// of the test.
pub async fn spawn_backend() -> StubBackend {
    setup_tracing();
    let state = Arc::new(BackendState::default());

    let app = Router::new()
        .route("/outcomes/sms", post(post_sms))
        .route("/outcomes/score/{patient_uuid}", get(get_score))
        .with_state(Arc::clone(&state));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubBackend { addr, state }
}

async fn post_sms(State(state): State<Arc<BackendState>>, Json(body): Json<serde_json::Value>) -> StatusCode {
    let delay = *state.sms_delay.lock().unwrap();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    state.sms_requests.lock().unwrap().push(body);
    StatusCode::from_u16(*state.sms_status.lock().unwrap()).unwrap()
}

async fn get_score(
    State(state): State<Arc<BackendState>>,
    Path(patient_uuid): Path<String>,
) -> (StatusCode, Json<serde_json::Value>) {
    state.score_requests.lock().unwrap().push(patient_uuid);
    let status = StatusCode::from_u16(*state.score_status.lock().unwrap()).unwrap();
    (status, Json(state.score.lock().unwrap().clone()))
}

pub fn test_config(addr: SocketAddr) -> Config {
    Config {
        rest: RestConfig {
            base_url: Url::parse(&format!("http://{addr}")).unwrap(),
            request_timeout_secs: 5,
        },
        origin: OriginConfig {
            spa_origin: Url::parse("https://chart.example.org").unwrap(),
        },
        telemetry: TelemetryConfig { log_format: LogFormat::Text },
    }
}

#[derive(Debug, Default)]
pub struct FixedPatients {
    pub patient: Mutex<Option<PatientRecord>>,
}

#[async_trait]
impl PatientDirectory for FixedPatients {
    async fn find_patient(&self, _patient_uuid: &str) -> Result<Option<PatientRecord>, HostError> {
        Ok(self.patient.lock().unwrap().clone())
    }
}

#[derive(Debug, Default)]
pub struct NoVisits;

#[async_trait]
impl VisitDirectory for NoVisits {
    async fn current_visit(&self, _patient_uuid: &str) -> Result<Option<Visit>, HostError> {
        Ok(None)
    }
}

#[derive(Debug, Default)]
pub struct FixedSession;

impl SessionProvider for FixedSession {
    fn session(&self) -> UserSession {
        UserSession {
            locale: "en".to_owned(),
            allowed_locales: vec!["en".to_owned(), "sw".to_owned(), "pt-BR".to_owned()],
        }
    }
}

#[derive(Debug)]
pub struct ToggleConnectivity(AtomicBool);

impl ToggleConnectivity {
    pub fn new(online: bool) -> Self {
        Self(AtomicBool::new(online))
    }

    pub fn set_online(&self, online: bool) {
        self.0.store(online, Ordering::SeqCst);
    }
}

impl Connectivity for ToggleConnectivity {
    fn is_online(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub shown: Mutex<Vec<Snackbar>>,
}

impl Notifier for RecordingNotifier {
    fn show(&self, snackbar: Snackbar) {
        self.shown.lock().unwrap().push(snackbar);
    }
}

#[derive(Debug, Default)]
pub struct RecordingWorkspace {
    pub launched: Mutex<Vec<String>>,
    pub closed: Mutex<Vec<bool>>,
}

impl Workspace for RecordingWorkspace {
    fn launch(&self, feature_name: &str) {
        self.launched.lock().unwrap().push(feature_name.to_owned());
    }

    fn request_close(&self, ignore_changes: bool) {
        self.closed.lock().unwrap().push(ignore_changes);
    }
}

/// Mocked host shell: every capability the module consumes, recording what
/// it is asked to do.
pub struct TestHost {
    pub patients: Arc<FixedPatients>,
    pub visits: Arc<NoVisits>,
    pub sessions: Arc<FixedSession>,
    pub connectivity: Arc<ToggleConnectivity>,
    pub notifier: Arc<RecordingNotifier>,
    pub workspace: Arc<RecordingWorkspace>,
}

impl TestHost {
    pub fn new() -> Self {
        Self {
            patients: Arc::new(FixedPatients::default()),
            visits: Arc::new(NoVisits),
            sessions: Arc::new(FixedSession),
            connectivity: Arc::new(ToggleConnectivity::new(true)),
            notifier: Arc::new(RecordingNotifier::default()),
            workspace: Arc::new(RecordingWorkspace::default()),
        }
    }

    pub fn wire(&self, backend: &StubBackend) -> OutcomesModule {
        OutcomesModule::builder(test_config(backend.addr))
            .with_patients(Arc::clone(&self.patients) as Arc<dyn PatientDirectory>)
            .with_visits(Arc::clone(&self.visits) as Arc<dyn VisitDirectory>)
            .with_sessions(Arc::clone(&self.sessions) as Arc<dyn SessionProvider>)
            .with_connectivity(Arc::clone(&self.connectivity) as Arc<dyn Connectivity>)
            .with_notifier(Arc::clone(&self.notifier) as Arc<dyn Notifier>)
            .with_workspace(Arc::clone(&self.workspace) as Arc<dyn Workspace>)
            .build()
            .unwrap()
    }
}
