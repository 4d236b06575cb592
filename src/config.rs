use clap::{Args, Parser, ValueEnum};
use url::Url;

#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    #[command(flatten)]
    pub rest: RestConfig,

    #[command(flatten)]
    pub origin: OriginConfig,

    #[command(flatten)]
    pub telemetry: TelemetryConfig,
}

#[derive(Clone, Debug, Args)]
pub struct RestConfig {
    /// Base URL of the outcomes REST backend
    #[arg(long, env = "OUTCOMES_REST_BASE_URL", default_value = "http://localhost:8080/ws/rest/v1")]
    pub base_url: Url,

    /// Timeout for outbound REST calls in seconds
    #[arg(long, env = "OUTCOMES_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,
}

#[derive(Clone, Debug, Args)]
pub struct OriginConfig {
    /// Origin of the hosting chart application, embedded in tracking links
    /// and recorded as the source of every submission
    #[arg(long, env = "OUTCOMES_SPA_ORIGIN", default_value = "http://localhost")]
    pub spa_origin: Url,
}

#[derive(Clone, Debug, Args)]
pub struct TelemetryConfig {
    /// Log output format
    #[arg(long, env = "OUTCOMES_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

impl Config {
    #[must_use]
    pub fn load() -> Self {
        Self::parse()
    }
}
