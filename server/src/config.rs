use std::net::{Ipv4Addr, SocketAddr};

use axum::BoxError;

#[derive(Debug, thiserror::Error)]
pub enum ConfigBuildError {
    #[error("Failed to collect config items: {0}")]
    FailedToCollect(::config::ConfigError),
    #[error("Failed to deserialize config file: {0}")]
    FailedToDeserialize(::config::ConfigError),
}

#[derive(Debug, serde::Deserialize)]
pub struct AppConfig {
    /// Address the HTTP listener binds to.
    #[serde(default = "AppConfig::default_bind_address")]
    pub bind_address: SocketAddr,
}

impl AppConfig {
    fn default_bind_address() -> SocketAddr {
        SocketAddr::from((Ipv4Addr::LOCALHOST, 8679))
    }

    /// Creates a testing AppConfig.
    pub fn build_for_test() -> Result<AppConfig, BoxError> {
        Ok(AppConfig {
            // Garbage value, the test server binds its own listener
            bind_address: Self::default_bind_address(),
        })
    }

    pub fn build() -> Result<AppConfig, ConfigBuildError> {
        let config_unparsed = ::config::Config::builder()
            .add_source(::config::File::new("sipd.toml", ::config::FileFormat::Toml).required(false))
            // e.g. SIPD_BIND_ADDRESS
            .add_source(::config::Environment::with_prefix("SIPD"))
            .build()
            .map_err(ConfigBuildError::FailedToCollect)?;

        config_unparsed
            .try_deserialize()
            .map_err(ConfigBuildError::FailedToDeserialize)
    }
}
