use anyhow::Context;
use planview_core::config::Config;
use planview_core::ClickUpClient;
use std::path::PathBuf;

/// Flags shared by every command.
pub struct GlobalArgs {
    pub config: PathBuf,
    pub api_url: Option<String>,
    pub token: Option<String>,
}

impl GlobalArgs {
    /// Load the config file, with `--api-url` taking precedence over it.
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = Config::load(&self.config)
            .with_context(|| format!("failed to load config from {}", self.config.display()))?;
        if let Some(url) = &self.api_url {
            config.api_url = Some(url.clone());
        }
        Ok(config)
    }

    /// Config plus a client authenticated with the token.
    pub fn connect(&self) -> anyhow::Result<(Config, ClickUpClient)> {
        let config = self.load_config()?;
        let client_config = config.client_config(self.token.clone())?;
        tracing::debug!(?client_config, "connecting");
        let client = ClickUpClient::new(&client_config).context("failed to build HTTP client")?;
        Ok((config, client))
    }
}
