use crate::{
    config::DeployConfig,
    error::{DeployError, Result},
    traits::Verifier,
    utils::{ArtifactStore, VerificationSource},
    workflow::VerificationRequest,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{debug, info};

const HTTP_TIMEOUT_SECS: u64 = 30;
const CODE_FORMAT: &str = "solidity-standard-json-input";
const PENDING: &str = "pending in queue";
const ALREADY_VERIFIED: &str = "already verified";
const PASS: &str = "pass - verified";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct EtherscanResponse {
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub result: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Queued { guid: String },
    AlreadyVerified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationStatus {
    Pending,
    Verified,
}

impl EtherscanResponse {
    fn is_ok(&self) -> bool {
        self.status == "1"
    }

    fn result_contains(&self, needle: &str) -> bool {
        self.result.to_lowercase().contains(needle)
    }

    fn failure_reason(&self) -> String {
        if self.result.is_empty() {
            self.message.clone()
        } else {
            format!("{}: {}", self.message, self.result)
        }
    }

    pub fn into_submission(self) -> std::result::Result<Submission, String> {
        if self.result_contains(ALREADY_VERIFIED) {
            return Ok(Submission::AlreadyVerified);
        }
        if self.is_ok() && !self.result.is_empty() {
            return Ok(Submission::Queued { guid: self.result });
        }
        Err(self.failure_reason())
    }

    pub fn into_status(self) -> std::result::Result<VerificationStatus, String> {
        if self.result_contains(PENDING) {
            return Ok(VerificationStatus::Pending);
        }
        if self.result_contains(ALREADY_VERIFIED) || (self.is_ok() && self.result_contains(PASS)) {
            return Ok(VerificationStatus::Verified);
        }
        Err(self.failure_reason())
    }
}

/// Source verification against an Etherscan-compatible explorer API (BscScan by default).
#[derive(Debug, Clone)]
pub struct EtherscanVerifier {
    client: Client,
    api_url: String,
    api_key: String,
    artifacts: ArtifactStore,
    poll_interval: Duration,
    timeout: Duration,
}

impl EtherscanVerifier {
    pub fn new(config: &DeployConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(anyhow::Error::from)?;

        Ok(EtherscanVerifier {
            client,
            api_url: config.etherscan_api_url.clone(),
            api_key: config.etherscan_api_key.clone(),
            artifacts: ArtifactStore::new(config.artifacts_dir.clone()),
            poll_interval: config.poll_interval,
            timeout: config.verification_timeout,
        })
    }

    async fn submit(
        &self,
        source: &VerificationSource,
        request: &VerificationRequest,
    ) -> std::result::Result<Submission, String> {
        let form = vec![
            ("apikey", self.api_key.clone()),
            ("module", "contract".to_string()),
            ("action", "verifysourcecode".to_string()),
            ("contractaddress", format!("{:?}", request.address)),
            ("sourceCode", source.source_code_string()),
            ("codeformat", CODE_FORMAT.to_string()),
            ("contractname", source.contract_name.clone()),
            ("compilerversion", source.compiler_version.clone()),
            // sic, the explorer API spells it this way
            (
                "constructorArguements",
                hex::encode(&request.encoded_constructor_arguments),
            ),
        ];

        let response = self
            .client
            .post(&self.api_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| e.to_string())?
            .json::<EtherscanResponse>()
            .await
            .map_err(|e| e.to_string())?;
        debug!("Verification submission response: {:?}", response);

        response.into_submission()
    }

    async fn check_status(&self, guid: &str) -> std::result::Result<VerificationStatus, String> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("apikey", self.api_key.as_str()),
                ("module", "contract"),
                ("action", "checkverifystatus"),
                ("guid", guid),
            ])
            .send()
            .await
            .map_err(|e| e.to_string())?
            .json::<EtherscanResponse>()
            .await
            .map_err(|e| e.to_string())?;
        debug!("Verification status response: {:?}", response);

        response.into_status()
    }

    async fn poll_status(&self, guid: &str) -> std::result::Result<(), String> {
        loop {
            match self.check_status(guid).await? {
                VerificationStatus::Verified => return Ok(()),
                VerificationStatus::Pending => sleep(self.poll_interval).await,
            }
        }
    }
}

#[async_trait]
impl Verifier for EtherscanVerifier {
    fn check_source(&self, contract_identifier: &str) -> Result<()> {
        self.artifacts
            .verification_source(contract_identifier)
            .map(|_| ())
    }

    async fn verify(&self, request: &VerificationRequest) -> Result<()> {
        let address = request.address;
        let fail = |reason: String| DeployError::VerificationFailure { address, reason };

        let source = self
            .artifacts
            .verification_source(&request.contract_identifier)
            .map_err(|e| fail(e.to_string()))?;

        info!(
            "Submitting {} at {:?} for verification",
            request.contract_identifier, address
        );
        let guid = match self.submit(&source, request).await.map_err(fail)? {
            Submission::AlreadyVerified => {
                info!("Contract {:?} is already verified", address);
                return Ok(());
            }
            Submission::Queued { guid } => guid,
        };

        timeout(self.timeout, self.poll_status(&guid))
            .await
            .map_err(|_| fail(format!("still pending after {:?}", self.timeout)))?
            .map_err(fail)?;
        info!("Successfully verified contract {:?}", address);

        Ok(())
    }
}
