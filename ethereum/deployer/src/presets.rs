use earthverse_eth_driver::DeploymentRequest;

pub const BFT_DOLLAR: &str = "bft_dollar";
pub const EARTHVERSE_DEPOSIT: &str = "earthverse_deposit";
pub const PRESET_NAMES: [&str; 2] = [BFT_DOLLAR, EARTHVERSE_DEPOSIT];

const EARTHVERSE_DEPOSIT_TOKEN: &str = "0xaa2d297654134830a3E053C0996A96c7d91FaDf3";
const EARTHVERSE_DEPOSIT_TREASURY: &str = "0xE900fe902760013eF826a1E2d7899eD677c73570";

pub fn bft_dollar() -> DeploymentRequest {
    DeploymentRequest::new("BFTDollar", vec![])
}

pub fn earthverse_deposit() -> DeploymentRequest {
    DeploymentRequest::new(
        "EarthverseDeposit",
        vec![
            EARTHVERSE_DEPOSIT_TOKEN.to_string(),
            EARTHVERSE_DEPOSIT_TREASURY.to_string(),
        ],
    )
}

pub fn preset(name: &str) -> Option<DeploymentRequest> {
    match name {
        BFT_DOLLAR => Some(bft_dollar()),
        EARTHVERSE_DEPOSIT => Some(earthverse_deposit()),
        _ => None,
    }
}
