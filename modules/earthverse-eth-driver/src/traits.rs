use crate::{error::Result, workflow::VerificationRequest};
use async_trait::async_trait;
use web3::types::{Address, TransactionReceipt, H256};

/// A trait for talking to the blockchain node a contract is deployed through
#[async_trait]
pub trait Chain: Send + Sync {
    /// Resolve the account at `index` of the node's accounts, unlocking it when a password is given.
    async fn get_account(&self, index: usize, password: Option<&str>) -> Result<Address>;

    /// Submit a contract creation transaction and return its hash without waiting for it to be mined.
    async fn send_deployment(&self, from: Address, data: Vec<u8>, gas: u64) -> Result<H256>;

    async fn transaction_receipt(&self, hash: H256) -> Result<Option<TransactionReceipt>>;

    async fn block_number(&self) -> Result<u64>;
}

/// A trait for publishing the source of a deployed contract to an explorer
#[async_trait]
pub trait Verifier: Send + Sync {
    /// Check that `contract_identifier` can be verified once deployed.
    /// Runs before anything is submitted to the chain.
    fn check_source(&self, _contract_identifier: &str) -> Result<()> {
        Ok(())
    }

    async fn verify(&self, request: &VerificationRequest) -> Result<()>;
}
