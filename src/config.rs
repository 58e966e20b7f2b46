use std::time::Duration;

use serde::Deserialize;

#[derive(Clone, Deserialize)]
pub struct Config {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub refresh_interval_secs: Option<u64>,
    pub seed_topology: Option<bool>,
}

impl Config {
    pub fn load() -> eyre::Result<Self> {
        Ok(envy::prefixed("SCOPEMQ_").from_env::<Self>()?)
    }

    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or("127.0.0.1")
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(8080)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.unwrap_or(5))
    }

    pub fn seed_topology(&self) -> bool {
        self.seed_topology.unwrap_or(true)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: None,
            port: None,
            refresh_interval_secs: None,
            seed_topology: None,
        }
    }
}
