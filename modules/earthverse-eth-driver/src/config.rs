use crate::error::Result;
use frame_config::*;
use std::{path::PathBuf, time::Duration};

/// Everything a deployment run needs from its surroundings.
/// Built once by the caller and handed to the deployer; nothing is read from the
/// environment after construction.
#[derive(Debug, Clone)]
pub struct DeployConfig {
    pub eth_url: String,
    pub account_index: usize,
    pub password: Option<String>,
    pub gas: u64,
    pub confirmations: u64,
    pub confirmation_timeout: Duration,
    pub poll_interval: Duration,
    pub artifacts_dir: PathBuf,
    pub etherscan_api_url: String,
    pub etherscan_api_key: String,
    pub verification_timeout: Duration,
    pub request_retries: usize,
    pub retry_delay_mills: u64,
}

impl DeployConfig {
    pub fn from_env() -> Result<Self> {
        Ok(DeployConfig {
            eth_url: ETH_URL.clone(),
            account_index: parse_env("ACCOUNT_INDEX", 0usize)?,
            password: optional_env("PASSWORD"),
            gas: parse_env("GAS", DEFAULT_GAS)?,
            confirmations: parse_env("CONFIRMATIONS", DEFAULT_CONFIRMATIONS)?,
            confirmation_timeout: Duration::from_secs(parse_env(
                "CONFIRMATION_TIMEOUT_SECS",
                DEFAULT_CONFIRMATION_TIMEOUT_SECS,
            )?),
            poll_interval: Duration::from_millis(parse_env(
                "POLL_INTERVAL_MILLS",
                DEFAULT_POLL_INTERVAL_MILLS,
            )?),
            artifacts_dir: ARTIFACTS_DIR.clone(),
            etherscan_api_url: ETHERSCAN_API_URL.clone(),
            etherscan_api_key: require_env("ETHERSCAN_API_KEY")?,
            verification_timeout: Duration::from_secs(parse_env(
                "VERIFICATION_TIMEOUT_SECS",
                DEFAULT_VERIFICATION_TIMEOUT_SECS,
            )?),
            request_retries: parse_env("REQUEST_RETRIES", DEFAULT_REQUEST_RETRIES)?,
            retry_delay_mills: parse_env("RETRY_DELAY_MILLS", DEFAULT_RETRY_DELAY_MILLS)?,
        })
    }
}

impl Default for DeployConfig {
    fn default() -> Self {
        DeployConfig {
            eth_url: DEFAULT_ETH_URL.to_string(),
            account_index: 0,
            password: None,
            gas: DEFAULT_GAS,
            confirmations: DEFAULT_CONFIRMATIONS,
            confirmation_timeout: Duration::from_secs(DEFAULT_CONFIRMATION_TIMEOUT_SECS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MILLS),
            artifacts_dir: PathBuf::from(DEFAULT_ARTIFACTS_DIR),
            etherscan_api_url: DEFAULT_ETHERSCAN_API_URL.to_string(),
            etherscan_api_key: String::new(),
            verification_timeout: Duration::from_secs(DEFAULT_VERIFICATION_TIMEOUT_SECS),
            request_retries: DEFAULT_REQUEST_RETRIES,
            retry_delay_mills: DEFAULT_RETRY_DELAY_MILLS,
        }
    }
}
