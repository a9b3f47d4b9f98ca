use std::sync::Arc;

use crate::catalog::Catalog;
use crate::vision::VisionClient;

use super::config::Config;

/**
    Shared state handed to every request handler.

    The catalog is a read-only snapshot, requests never modify it.
*/
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<Catalog>,
    pub vision: Option<VisionClient>,
}

impl AppState {
    pub fn new(config: Config, catalog: Catalog) -> Self {
        let vision = config.vision_api_key.as_deref().map(|key| {
            let client = VisionClient::new(key);
            match config.vision_endpoint.as_deref() {
                Some(endpoint) => client.with_endpoint(endpoint),
                None => client,
            }
        });
        Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
            vision,
        }
    }
}
