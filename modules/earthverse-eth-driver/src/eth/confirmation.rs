use crate::{
    error::{DeployError, Result, WaitStage},
    traits::Chain,
};
use anyhow::anyhow;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::debug;
use web3::types::{Address, H256, U64};

/// A mined contract creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mined {
    pub transaction_hash: H256,
    pub contract_address: Address,
    pub block_number: u64,
}

/// Polls the chain until a deployment is mined and buried under enough blocks.
/// Every wait is bounded by `timeout`; dropping the returned future stops polling.
#[derive(Debug)]
pub struct ConfirmationWatcher<'a, C: Chain> {
    chain: &'a C,
    poll_interval: Duration,
    timeout: Duration,
}

impl<'a, C: Chain> ConfirmationWatcher<'a, C> {
    pub fn new(chain: &'a C, poll_interval: Duration, timeout: Duration) -> Self {
        ConfirmationWatcher {
            chain,
            poll_interval,
            timeout,
        }
    }

    pub async fn wait_mined(&self, hash: H256) -> Result<Mined> {
        timeout(self.timeout, self.poll_receipt(hash))
            .await
            .map_err(|_| DeployError::Timeout {
                stage: WaitStage::Mined,
                after: self.timeout,
            })?
    }

    /// Wait until the chain head is at least `depth` blocks past `mined_block`
    /// and return the head observed.
    pub async fn wait_confirmations(&self, mined_block: u64, depth: u64) -> Result<u64> {
        timeout(self.timeout, self.poll_block_number(mined_block.saturating_add(depth)))
            .await
            .map_err(|_| DeployError::Timeout {
                stage: WaitStage::Confirmations,
                after: self.timeout,
            })?
    }

    async fn poll_receipt(&self, hash: H256) -> Result<Mined> {
        loop {
            if let Some(receipt) = self.chain.transaction_receipt(hash).await? {
                if receipt.status == Some(U64::zero()) {
                    return Err(DeployError::TransactionReverted(hash));
                }
                match (receipt.block_number, receipt.contract_address) {
                    (Some(block_number), Some(contract_address)) => {
                        return Ok(Mined {
                            transaction_hash: hash,
                            contract_address,
                            block_number: block_number.as_u64(),
                        })
                    }
                    (Some(_), None) => {
                        return Err(anyhow!(
                            "Transaction {:?} was mined without creating a contract",
                            hash
                        )
                        .into())
                    }
                    (None, _) => {}
                }
            }
            debug!("Transaction {:?} is not mined yet", hash);
            sleep(self.poll_interval).await;
        }
    }

    async fn poll_block_number(&self, target: u64) -> Result<u64> {
        loop {
            let current = self.chain.block_number().await?;
            if current >= target {
                return Ok(current);
            }
            debug!("Current block {}, waiting for block {}", current, target);
            sleep(self.poll_interval).await;
        }
    }
}
