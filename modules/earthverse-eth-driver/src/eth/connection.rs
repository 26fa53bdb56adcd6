use crate::{
    error::{DeployError, Result},
    traits::Chain,
};
use async_trait::async_trait;
use tracing::debug;
use web3::{
    transports::Http,
    types::{Address, Bytes, TransactionReceipt, TransactionRequest, H256},
    Web3,
};

const UNLOCK_DURATION: u16 = 60;

/// Basic web3 connection components via HTTP.
#[derive(Debug, Clone)]
pub struct Web3Http {
    web3: Web3<Http>,
}

impl Web3Http {
    pub fn new(eth_url: &str) -> Result<Self> {
        let transport = Http::new(eth_url)?;
        let web3 = Web3::new(transport);

        Ok(Web3Http { web3 })
    }
}

#[async_trait]
impl Chain for Web3Http {
    async fn get_account(&self, index: usize, password: Option<&str>) -> Result<Address> {
        let accounts = self.web3.eth().accounts().await?;
        let account = *accounts.get(index).ok_or_else(|| {
            DeployError::NetworkFailure(format!(
                "account index {} is out of range: node manages {} account(s)",
                index,
                accounts.len()
            ))
        })?;

        if let Some(pw) = password {
            if !self
                .web3
                .personal()
                .unlock_account(account, pw, Some(UNLOCK_DURATION))
                .await?
            {
                return Err(DeployError::UnlockError);
            }
        }

        Ok(account)
    }

    async fn send_deployment(&self, from: Address, data: Vec<u8>, gas: u64) -> Result<H256> {
        let tx = TransactionRequest {
            from,
            to: None,
            gas: Some(gas.into()),
            data: Some(Bytes(data)),
            ..Default::default()
        };
        let hash = self.web3.eth().send_transaction(tx).await?;
        debug!("Deployment transaction submitted: {:?}", hash);

        Ok(hash)
    }

    async fn transaction_receipt(&self, hash: H256) -> Result<Option<TransactionReceipt>> {
        self.web3
            .eth()
            .transaction_receipt(hash)
            .await
            .map_err(Into::into)
    }

    async fn block_number(&self) -> Result<u64> {
        let number = self.web3.eth().block_number().await?;
        Ok(number.as_u64())
    }
}
