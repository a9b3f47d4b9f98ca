use anyhow::Result;
use clap::Parser;
use tracing::debug;

use crate::server::{Config, Server};
use crate::vision::ENV_API_KEY;

#[derive(Debug, Clone, Parser)]
pub struct ServeCommand {
    /// Server settings as a JSON object
    #[arg(long)]
    pub settings: Option<Config>,
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,
    #[arg(long, env = ENV_API_KEY, hide_env_values = true)]
    pub vision_api_key: Option<String>,
}

impl ServeCommand {
    pub async fn run(self) -> Result<()> {
        let mut config = self.settings.unwrap_or_default();
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(key) = self.vision_api_key.filter(|k| !k.is_empty()) {
            config.vision_api_key.replace(key);
        }

        debug!(
            "Parsed arguments\n\taddr: {}\n\tcatalog: {}",
            config.socket_addr(),
            config.catalog_file.display()
        );

        Server::new(config).serve().await
    }
}
