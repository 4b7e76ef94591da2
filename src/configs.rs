use std::path::PathBuf;

use hyperswitch_masking::Secret;

use crate::{connectors::paymentxp::constants, errors::ConfigurationError, logger::config::Log};

pub const ENV_PREFIX: &str = "PAYMENTXP";

#[derive(Clone, serde::Deserialize, Debug)]
pub struct Config {
    pub connector: ConnectorParams,
    #[serde(default)]
    pub proxy: Proxy,
    #[serde(default)]
    pub log: Log,
}

#[derive(Clone, serde::Deserialize, Debug)]
pub struct ConnectorParams {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub merchant_id: String,
    pub merchant_key: Secret<String>,
}

fn default_base_url() -> String {
    constants::BASE_URL.to_string()
}

#[derive(Clone, serde::Deserialize, Debug, Default)]
#[serde(default)]
pub struct Proxy {
    pub http_url: Option<String>,
    pub https_url: Option<String>,
    /// Seconds an idle pooled connection is kept around
    pub idle_pool_connection_timeout: Option<u64>,
    /// Seconds before an outgoing request is abandoned
    pub request_timeout: Option<u64>,
    pub bypass_proxy_urls: Vec<String>,
}

impl Config {
    /// Function to build the configuration from environment variables only
    pub fn new() -> Result<Self, ConfigurationError> {
        Self::new_with_config_path(None)
    }

    /// Layers an optional TOML file under `PAYMENTXP__`-prefixed environment variables
    pub fn new_with_config_path(
        explicit_config_path: Option<PathBuf>,
    ) -> Result<Self, ConfigurationError> {
        let mut builder = config::Config::builder();
        if let Some(config_path) = explicit_config_path {
            builder = builder.add_source(config::File::from(config_path).required(false));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("proxy.bypass_proxy_urls"),
            )
            .build()?;

        #[allow(clippy::print_stderr)]
        let config: Self = serde_path_to_error::deserialize(config).map_err(|error| {
            eprintln!("Unable to deserialize application configuration: {error}");
            error.into_inner()
        })?;

        Ok(config)
    }
}
