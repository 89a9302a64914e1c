use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

use crate::Config;

/// Application state and lifecycle manager
pub struct App {
    config: Arc<Config>,
}

impl App {
    /// Create a new application instance from the user's validated config
    pub fn new() -> Result<Self> {
        let (config, _) = Config::load_validated()?;
        Ok(Self::with_config(config))
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn initialize(&mut self) -> Result<()> {
        tracing::info!(
            api = %self.config.weather.api_base_url,
            refresh_seconds = self.config.weather.refresh_seconds,
            "Initializing application"
        );
        Ok(())
    }

    pub fn shutdown(&mut self) -> Result<()> {
        tracing::info!("Shutting down application");
        Ok(())
    }

    /// Get reference to application config
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Interval between forecast refreshes while a zone is shown
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.config.weather.refresh_seconds)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.config.weather.request_timeout_secs)
    }
}
