use earthverse_eth_driver::{DeployConfig, DeploymentRequest, DeploymentResult, Result};
use eth_deployer::{exit_code, presets, until_interrupted, EthDeployer};
use std::{env, process};
use tracing::error;
use tracing_subscriber::EnvFilter;

const EXIT_USAGE: i32 = 2;

#[tokio::main]
async fn main() {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let request = match args.get(1).and_then(|name| presets::preset(name)) {
        Some(request) if args.len() == 2 => request,
        _ => {
            eprintln!("Usage: eth-deployer <{}>", presets::PRESET_NAMES.join("|"));
            process::exit(EXIT_USAGE);
        }
    };

    let result = until_interrupted(run(&request), tokio::signal::ctrl_c()).await;

    match &result {
        Ok(deployed) => println!("{:?}", deployed.deployed_address),
        Err(err) => {
            if let Some(address) = err.deployed_address() {
                error!("Contract is deployed to {:?} but the run failed", address);
            }
            error!("{}", err);
            eprintln!("{}", err);
        }
    }
    process::exit(exit_code(&result));
}

async fn run(request: &DeploymentRequest) -> Result<DeploymentResult> {
    let config = DeployConfig::from_env()?;
    let deployer = EthDeployer::from_config(config)?;
    deployer.run(request).await
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
