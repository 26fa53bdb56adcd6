pub mod confirmation;
pub mod connection;
pub mod etherscan;

pub use self::confirmation::{ConfirmationWatcher, Mined};
pub use self::connection::Web3Http;
pub use self::etherscan::EtherscanVerifier;
