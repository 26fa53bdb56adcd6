use earthverse_eth_driver::{
    traits::{Chain, Verifier},
    ArtifactStore, ConfirmationWatcher, DeployConfig, DeployError, DeploymentRequest,
    DeploymentResult, EtherscanVerifier, PendingDeployment, Result, VerificationRequest,
    Web3Http,
};
use frame_retrier::{strategy, Retry};
use std::{future::Future, io};
use tracing::{info, warn};
use web3::types::Address;

pub mod presets;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

/// Define a retry condition of resolving the deploying account.
/// If it returns true, retry resolving the account.
const fn signer_retry_condition(res: &Result<Address>) -> bool {
    match res {
        Ok(_) => false,
        Err(err) => match err {
            DeployError::NetworkFailure(_) => true,
            _ => false,
        },
    }
}

/// Process exit status for the outcome of a run. Every failure maps to the same status.
pub fn exit_code(res: &Result<DeploymentResult>) -> i32 {
    match res {
        Ok(_) => EXIT_SUCCESS,
        Err(_) => EXIT_FAILURE,
    }
}

/// Drive `run` to completion unless `signal` fires first, in which case the run is
/// dropped and `Cancelled` is returned. A signal that fails to install leaves the
/// run uninterruptible.
pub async fn until_interrupted<T, R, S>(run: R, signal: S) -> Result<T>
where
    R: Future<Output = Result<T>>,
    S: Future<Output = io::Result<()>>,
{
    tokio::pin!(run);
    let signal_err = tokio::select! {
        res = &mut run => return res,
        sig = signal => match sig {
            Ok(()) => return Err(DeployError::Cancelled),
            Err(e) => e,
        },
    };
    warn!(
        "Failed to listen for the interrupt signal, the run cannot be cancelled: {}",
        signal_err
    );

    run.await
}

/// Components needed to deploy and verify a contract
#[derive(Debug)]
pub struct EthDeployer<C: Chain, V: Verifier> {
    config: DeployConfig,
    chain: C,
    verifier: V,
    artifacts: ArtifactStore,
}

impl EthDeployer<Web3Http, EtherscanVerifier> {
    pub fn from_config(config: DeployConfig) -> Result<Self> {
        let chain = Web3Http::new(&config.eth_url)?;
        let verifier = EtherscanVerifier::new(&config)?;

        Ok(EthDeployer::new(config, chain, verifier))
    }
}

impl<C: Chain, V: Verifier> EthDeployer<C, V> {
    pub fn new(config: DeployConfig, chain: C, verifier: V) -> Self {
        let artifacts = ArtifactStore::new(config.artifacts_dir.clone());

        EthDeployer {
            config,
            chain,
            verifier,
            artifacts,
        }
    }

    pub fn config(&self) -> &DeployConfig {
        &self.config
    }

    pub async fn get_account(&self) -> Result<Address> {
        let index = self.config.account_index;
        let password = self.config.password.as_deref();

        Retry::new(
            "get_account",
            self.config.request_retries,
            strategy::FixedDelay::new(self.config.retry_delay_mills),
        )
        .set_condition(signer_retry_condition)
        .spawn_async(move || async move { self.chain.get_account(index, password).await })
        .await
    }

    /// Deploy with the configured confirmation depth.
    pub async fn run(&self, request: &DeploymentRequest) -> Result<DeploymentResult> {
        self.deploy(request, self.config.confirmations).await
    }

    /// Deploy `request`, wait until it is `confirmation_depth` blocks deep and verify it.
    ///
    /// Contract, argument and verification source problems are reported before
    /// anything is submitted.
    /// A verification failure still leaves the contract on-chain; the returned
    /// `VerificationFailure` carries its address.
    pub async fn deploy(
        &self,
        request: &DeploymentRequest,
        confirmation_depth: u64,
    ) -> Result<DeploymentResult> {
        let identifier = request.contract_identifier();
        let factory = self.artifacts.get_factory(identifier)?;
        let encoded = factory.encode_deployment(request.constructor_arguments())?;
        self.verifier.check_source(identifier)?;

        let signer = self.get_account().await?;
        let tx_hash = self
            .chain
            .send_deployment(signer, encoded.data, self.config.gas)
            .await?;
        let pending = PendingDeployment {
            contract_identifier: identifier.to_string(),
            transaction_hash: tx_hash,
        };
        info!(
            "Contract {} deployment submitted from {:?}: {:?}",
            pending.contract_identifier, signer, pending.transaction_hash
        );

        let watcher = ConfirmationWatcher::new(
            &self.chain,
            self.config.poll_interval,
            self.config.confirmation_timeout,
        );
        let mined = watcher.wait_mined(pending.transaction_hash).await?;
        info!(
            "Contract {} deployed to: {:?} (block {})",
            identifier, mined.contract_address, mined.block_number
        );

        let confirmed_block = watcher
            .wait_confirmations(mined.block_number, confirmation_depth)
            .await?;
        let result = DeploymentResult {
            deployed_address: mined.contract_address,
            confirmed: true,
            transaction_hash: mined.transaction_hash,
            mined_block: mined.block_number,
            confirmed_block,
        };
        info!(
            "Contract {} at {:?} confirmed by {} block(s)",
            identifier,
            result.deployed_address,
            result.depth()
        );

        let verification = VerificationRequest::new(request, &result, encoded.encoded_arguments);
        self.verifier
            .verify(&verification)
            .await
            .map_err(|err| match err {
                unverified @ DeployError::VerificationFailure { .. } => unverified,
                other => DeployError::VerificationFailure {
                    address: result.deployed_address,
                    reason: other.to_string(),
                },
            })?;

        Ok(result)
    }
}
