//! Configuration loading with environment variable substitution.

use std::env;
use std::path::Path;
use thiserror::Error;

use operator_types::ExecutionMode;
use rust_decimal::Decimal;

use crate::types::OperatorConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("File not found: {0}")]
	FileNotFound(String),

	#[error("Parse error: {0}")]
	ParseError(String),

	#[error("Validation error: {0}")]
	ValidationError(String),

	#[error("Environment variable not found: {0}")]
	EnvVarNotFound(String),

	#[error("IO error: {0}")]
	IoError(#[from] std::io::Error),
}

/// Configuration loader with environment variable substitution.
#[derive(Default)]
pub struct ConfigLoader {
	file_path: Option<String>,
	env_prefix: String,
}

impl ConfigLoader {
	pub fn new() -> Self {
		Self {
			file_path: None,
			env_prefix: "OPERATOR_".to_string(),
		}
	}

	pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
		self.file_path = Some(path.as_ref().to_string_lossy().to_string());
		self
	}

	pub async fn load(&self) -> Result<OperatorConfig, ConfigError> {
		let mut config = if let Some(file_path) = &self.file_path {
			self.load_from_file(file_path).await?
		} else {
			return Err(ConfigError::FileNotFound(
				"No configuration file specified".to_string(),
			));
		};

		self.apply_env_overrides(&mut config)?;
		self.validate_config(&config)?;

		Ok(config)
	}

	async fn load_from_file(&self, file_path: &str) -> Result<OperatorConfig, ConfigError> {
		let content = tokio::fs::read_to_string(file_path).await?;

		let substituted_content = self.substitute_env_vars(&content)?;

		let config: OperatorConfig = toml::from_str(&substituted_content)
			.map_err(|e| ConfigError::ParseError(e.to_string()))?;

		Ok(config)
	}

	/// Replaces `${VAR_NAME}` patterns with the named environment variable.
	fn substitute_env_vars(&self, content: &str) -> Result<String, ConfigError> {
		let mut result = content.to_string();

		let re = regex::Regex::new(r"\$\{([^}]+)\}").expect("static pattern");

		for cap in re.captures_iter(content) {
			let full_match = &cap[0];
			let var_name = &cap[1];

			let env_value = env::var(var_name)
				.map_err(|_| ConfigError::EnvVarNotFound(var_name.to_string()))?;

			result = result.replace(full_match, &env_value);
		}

		Ok(result)
	}

	fn apply_env_overrides(&self, config: &mut OperatorConfig) -> Result<(), ConfigError> {
		if let Ok(rpc_url) = env::var(format!("{}RPC_URL", self.env_prefix)) {
			config.operator.rpc_url = rpc_url;
		}

		if let Ok(private_key) = env::var(format!("{}PRIVATE_KEY", self.env_prefix)) {
			config.operator.private_key = private_key;
		}

		if let Ok(interval) = env::var(format!("{}POLL_INTERVAL_MS", self.env_prefix)) {
			config.operator.poll_interval_ms = interval.parse().map_err(|e| {
				ConfigError::ValidationError(format!("Invalid poll interval: {}", e))
			})?;
		}

		if let Ok(mode) = env::var(format!("{}MODE", self.env_prefix)) {
			config.operator.mode = match mode.to_lowercase().as_str() {
				"preview" => ExecutionMode::Preview,
				"execute" => ExecutionMode::Execute,
				other => {
					return Err(ConfigError::ValidationError(format!(
						"Invalid execution mode: {}",
						other
					)))
				}
			};
		}

		Ok(())
	}

	fn validate_config(&self, config: &OperatorConfig) -> Result<(), ConfigError> {
		let url = &config.operator.rpc_url;
		if !url.starts_with("http://") && !url.starts_with("https://") {
			return Err(ConfigError::ValidationError(
				"RPC URL must start with http:// or https://".to_string(),
			));
		}

		let key = config
			.operator
			.private_key
			.strip_prefix("0x")
			.unwrap_or(&config.operator.private_key);
		if key.len() != 64 || hex::decode(key).is_err() {
			return Err(ConfigError::ValidationError(
				"Private key must be 64 hex characters (32 bytes)".to_string(),
			));
		}

		if config.operator.poll_interval_ms == 0 {
			return Err(ConfigError::ValidationError(
				"Poll interval must be at least 1 ms".to_string(),
			));
		}

		if config.pricing.base_asset_rate <= Decimal::ZERO
			|| config.pricing.order_asset_rate <= Decimal::ZERO
		{
			return Err(ConfigError::ValidationError(
				"Pricing rates must be positive".to_string(),
			));
		}

		Ok(())
	}
}
