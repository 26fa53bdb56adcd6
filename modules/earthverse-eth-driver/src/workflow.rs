use web3::types::{Address, H256};

/// A contract to deploy and the constructor arguments to deploy it with.
/// Arguments are kept as given and only interpreted against the contract ABI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRequest {
    contract_identifier: String,
    constructor_arguments: Vec<String>,
}

impl DeploymentRequest {
    pub fn new<S: Into<String>>(contract_identifier: S, constructor_arguments: Vec<String>) -> Self {
        DeploymentRequest {
            contract_identifier: contract_identifier.into(),
            constructor_arguments,
        }
    }

    pub fn contract_identifier(&self) -> &str {
        &self.contract_identifier
    }

    pub fn constructor_arguments(&self) -> &[String] {
        &self.constructor_arguments
    }
}

/// Handle for a submitted, not yet mined, deployment transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDeployment {
    pub contract_identifier: String,
    pub transaction_hash: H256,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentResult {
    pub deployed_address: Address,
    pub confirmed: bool,
    pub transaction_hash: H256,
    pub mined_block: u64,
    pub confirmed_block: u64,
}

impl DeploymentResult {
    /// Number of blocks mined on top of the deployment block when the run stopped waiting.
    pub fn depth(&self) -> u64 {
        self.confirmed_block.saturating_sub(self.mined_block)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRequest {
    pub address: Address,
    pub contract_identifier: String,
    pub constructor_arguments: Vec<String>,
    /// ABI encoding of `constructor_arguments` exactly as appended to the creation code.
    pub encoded_constructor_arguments: Vec<u8>,
}

impl VerificationRequest {
    pub fn new(
        request: &DeploymentRequest,
        result: &DeploymentResult,
        encoded_constructor_arguments: Vec<u8>,
    ) -> Self {
        VerificationRequest {
            address: result.deployed_address,
            contract_identifier: request.contract_identifier.clone(),
            constructor_arguments: request.constructor_arguments.clone(),
            encoded_constructor_arguments,
        }
    }
}
