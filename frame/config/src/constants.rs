// endpoints
pub const DEFAULT_ETH_URL: &str = "http://localhost:8545";
pub const DEFAULT_ETHERSCAN_API_URL: &str = "https://api.bscscan.com/api";

// filepath
pub const DEFAULT_ARTIFACTS_DIR: &str = "contract-build";

// deployment
pub const DEFAULT_GAS: u64 = 5_000_000;
pub const DEFAULT_CONFIRMATIONS: u64 = 10;
pub const DEFAULT_CONFIRMATION_TIMEOUT_SECS: u64 = 600;
pub const DEFAULT_VERIFICATION_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_POLL_INTERVAL_MILLS: u64 = 1_000;

// retries
pub const DEFAULT_REQUEST_RETRIES: usize = 10;
pub const DEFAULT_RETRY_DELAY_MILLS: u64 = 100;
