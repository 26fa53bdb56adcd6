#![crate_type = "lib"]

pub mod config;
pub mod error;
pub mod eth;
pub mod traits;
pub mod utils;
pub mod workflow;

pub use config::DeployConfig;
pub use error::{DeployError, DeployErrorKind, Result};
pub use eth::{ConfirmationWatcher, EtherscanVerifier, Web3Http};
pub use utils::{ArtifactStore, ContractFactory};
pub use workflow::{DeploymentRequest, DeploymentResult, PendingDeployment, VerificationRequest};
