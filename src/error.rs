use crate::domain::validation::FieldErrors;
use crate::host::HostError;
use crate::services::gateway::GatewayError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("invalid submission draft")]
    Validation(FieldErrors),
    #[error("host capability failure: {0}")]
    Host(#[from] HostError),
    #[error("outcomes gateway failure: {0}")]
    Gateway(#[from] GatewayError),
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
