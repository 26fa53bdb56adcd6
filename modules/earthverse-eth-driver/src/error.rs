use std::{fmt, time::Duration};
use thiserror::Error;
use web3::types::{Address, H256};

pub type Result<T> = std::result::Result<T, DeployError>;

#[derive(Error, Debug)]
pub enum DeployError {
    #[error("Error: {0}")]
    Error(#[from] anyhow::Error),
    #[error("Unknown contract: {0}")]
    UnknownContract(String),
    #[error("Constructor arguments do not match {contract}: {reason}")]
    ArgumentMismatch { contract: String, reason: String },
    #[error("Network failure: {0}")]
    NetworkFailure(String),
    #[error("Timed out after {after:?} waiting for {stage}")]
    Timeout { stage: WaitStage, after: Duration },
    #[error("Deployment transaction {0:?} was reverted")]
    TransactionReverted(H256),
    #[error("Contract deployed to {address:?} but verification failed: {reason}")]
    VerificationFailure { address: Address, reason: String },
    #[error("Deployment was cancelled")]
    Cancelled,
    #[error("Invalid artifact for {contract}: {reason}")]
    InvalidArtifact { contract: String, reason: String },
    #[error("Configuration error: {0}")]
    Config(#[from] frame_config::EnvError),
    #[error("Failed unlock the account")]
    UnlockError,
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<web3::Error> for DeployError {
    fn from(err: web3::Error) -> Self {
        DeployError::NetworkFailure(err.to_string())
    }
}

/// Chain waits bounded by a timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitStage {
    Mined,
    Confirmations,
}

impl fmt::Display for WaitStage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WaitStage::Mined => write!(f, "the deployment transaction to be mined"),
            WaitStage::Confirmations => write!(f, "block confirmations"),
        }
    }
}

/// Coarse classification callers can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployErrorKind {
    UnknownContract,
    ArgumentMismatch,
    NetworkFailure,
    VerificationFailure,
    Timeout,
    Reverted,
    Cancelled,
    Configuration,
    Other,
}

impl DeployError {
    pub fn kind(&self) -> DeployErrorKind {
        match self {
            DeployError::UnknownContract(_) => DeployErrorKind::UnknownContract,
            DeployError::ArgumentMismatch { .. } => DeployErrorKind::ArgumentMismatch,
            DeployError::NetworkFailure(_) => DeployErrorKind::NetworkFailure,
            DeployError::VerificationFailure { .. } => DeployErrorKind::VerificationFailure,
            DeployError::Timeout { .. } => DeployErrorKind::Timeout,
            DeployError::TransactionReverted(_) => DeployErrorKind::Reverted,
            DeployError::Cancelled => DeployErrorKind::Cancelled,
            DeployError::Config(_) | DeployError::InvalidArtifact { .. } => {
                DeployErrorKind::Configuration
            }
            DeployError::UnlockError | DeployError::IoError(_) | DeployError::Error(_) => {
                DeployErrorKind::Other
            }
        }
    }

    /// The address of a contract that made it on-chain before the failure, if any.
    pub fn deployed_address(&self) -> Option<Address> {
        match self {
            DeployError::VerificationFailure { address, .. } => Some(*address),
            _ => None,
        }
    }
}
