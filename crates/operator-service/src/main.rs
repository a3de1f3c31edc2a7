use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use operator_account::LocalWallet;
use operator_config::{ConfigLoader, OperatorConfig};
use operator_core::OperatorEngine;
use operator_discovery::{RequisitionEventSource, RequisitionLoader};
use operator_executor::Executor;
use operator_ledger::{AlloyLedger, ConfiguredPriceOracle, Ledger};
use operator_order::Simulator;

#[derive(Parser)]
#[command(name = "tractor-operator")]
#[command(about = "Requisition operator for the tractor order marketplace", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	#[arg(short, long, value_name = "FILE", default_value = "config/operator.toml")]
	config: PathBuf,

	#[arg(long, env = "OPERATOR_LOG_LEVEL", default_value = "info")]
	log_level: String,
}

#[derive(Subcommand)]
enum Commands {
	/// Start the polling loop
	Start,
	/// Validate the configuration file
	Validate,
}

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();

	setup_tracing(&cli.log_level)?;

	match cli.command {
		Some(Commands::Start) | None => start(cli).await,
		Some(Commands::Validate) => validate(cli).await,
	}
}

async fn start(cli: Cli) -> Result<()> {
	info!("Starting tractor operator");
	let config = load_config(&cli).await?;

	let wallet =
		LocalWallet::new(&config.operator.private_key).context("Failed to load operator key")?;
	let operator = wallet.address();
	info!(%operator, mode = %config.operator.mode, "Operator identity loaded");

	let ledger: Arc<dyn Ledger> = Arc::new(
		AlloyLedger::new(&config.operator.rpc_url, wallet.signer())
			.context("Failed to connect to ledger")?,
	);
	let oracle = Arc::new(ConfiguredPriceOracle::new(
		config.pricing.base_asset_rate,
		config.pricing.order_asset_rate,
	));

	let engine = OperatorEngine::new(
		RequisitionEventSource::new(ledger.clone(), config.contracts.diamond),
		RequisitionLoader::new(config.contracts.sow_blueprint),
		Simulator::new(ledger.clone(), oracle, config.contracts.diamond),
		Executor::new(
			ledger,
			config.contracts.diamond,
			config.operator.mode,
			config.operator.confirmations,
		),
		operator,
		config.filters.publisher,
		Duration::from_millis(config.operator.poll_interval_ms),
	);

	engine.run().await;

	info!("Tractor operator stopped");
	Ok(())
}

async fn validate(cli: Cli) -> Result<()> {
	let config = load_config(&cli).await?;

	info!("Configuration is valid");
	info!("Mode: {}", config.operator.mode);
	info!("Poll interval: {} ms", config.operator.poll_interval_ms);
	info!("Confirmations: {}", config.operator.confirmations);
	info!("Diamond: {}", config.contracts.diamond);
	info!("Sow blueprint: {}", config.contracts.sow_blueprint);
	if let Some(publisher) = config.filters.publisher {
		info!("Publisher filter: {}", publisher);
	}

	Ok(())
}

async fn load_config(cli: &Cli) -> Result<OperatorConfig> {
	info!("Loading configuration from: {:?}", cli.config);

	ConfigLoader::new()
		.with_file(&cli.config)
		.load()
		.await
		.context("Failed to load configuration")
}

fn setup_tracing(log_level: &str) -> Result<()> {
	let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

	tracing_subscriber::registry()
		.with(env_filter)
		.with(tracing_subscriber::fmt::layer())
		.init();

	Ok(())
}
