use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
    str::FromStr,
};

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::util::path::make_absolute_and_clean;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/**
    Configuration for the search server.

    Note that all fields are optional for deserializing or parsing
    from a string, but have some defaults that may be surprising:

    - `host` defaults to `0.0.0.0`, listening on all interfaces
    - `port` defaults to `3000`
    - `catalog_file` defaults to `products.csv` in the current directory
    - `max_upload_bytes` defaults to 5 MiB
    - `catalog_seed` defaults to none, meaning a fresh random catalog per start
    - `vision_api_key` defaults to none, meaning fallback colors for every search
    - `vision_endpoint` defaults to the public Google Cloud Vision annotate endpoint
*/
#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub catalog_file: PathBuf,
    pub max_upload_bytes: usize,
    pub catalog_seed: Option<u64>,
    pub vision_api_key: Option<String>,
    pub vision_endpoint: Option<String>,
}

impl Config {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /**
        The upload limit in whole megabytes, rounded up so
        that small limits are never reported as zero.
    */
    pub fn max_upload_megabytes(&self) -> usize {
        self.max_upload_bytes.div_ceil(1024 * 1024)
    }
}

impl Default for Config {
    fn default() -> Self {
        ConfigDeserializable::default().into()
    }
}

impl From<ConfigDeserializable> for Config {
    fn from(value: ConfigDeserializable) -> Self {
        Self {
            host: value.host,
            port: value.port,
            catalog_file: value
                .catalog_file
                .map(make_absolute_and_clean)
                .unwrap_or_else(|| DEFAULT_CATALOG_PATH.clone()),
            max_upload_bytes: value.max_upload_bytes,
            catalog_seed: value.catalog_seed,
            vision_api_key: value.vision_api_key.filter(|k| !k.is_empty()),
            vision_endpoint: value.vision_endpoint.filter(|e| !e.is_empty()),
        }
    }
}

impl FromStr for Config {
    type Err = serde_json::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let trimmed = if (trimmed.starts_with('\'') && trimmed.ends_with('\''))
            || (trimmed.starts_with('\"') && trimmed.ends_with('\"'))
        {
            &trimmed[1..trimmed.len() - 1]
        } else {
            trimmed
        };
        if trimmed.is_empty() || trimmed == "null" {
            Ok(Self::default())
        } else {
            let this = serde_json::from_str::<ConfigDeserializable>(trimmed)?;
            Ok(this.into())
        }
    }
}

#[test]
fn parse_config() {
    let full_conf = r#"
    {
        "host": "127.0.0.1",
        "port": 8080,
        "catalogFile": "data/../products.csv",
        "maxUploadBytes": 1048576,
        "catalogSeed": 42,
        "visionEndpoint": "http://127.0.0.1:8085/v1/images:annotate"
    }
    "#;
    assert!("".parse::<Config>().is_ok());
    assert!("''".parse::<Config>().is_ok());
    assert!("null".parse::<Config>().is_ok());
    assert!("{}".parse::<Config>().is_ok());
    assert!("'{}'".parse::<Config>().is_ok());
    assert!("{\"port\": \"nope\"}".parse::<Config>().is_err());

    let conf = full_conf.parse::<Config>().unwrap();
    assert_eq!(conf.socket_addr(), "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
    assert_eq!(conf.catalog_file, *DEFAULT_CATALOG_PATH);
    assert_eq!(conf.max_upload_megabytes(), 1);
    assert_eq!(conf.catalog_seed, Some(42));
    assert_eq!(conf.vision_api_key, None);
    assert!(conf.vision_endpoint.is_some());

    let defaults = Config::default();
    assert_eq!(defaults.port, DEFAULT_PORT);
    assert_eq!(defaults.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
    assert_eq!(defaults.max_upload_megabytes(), 5);
}

#[test]
fn upload_limit_megabytes_round_up() {
    let limit = |max_upload_bytes| Config {
        max_upload_bytes,
        ..Config::default()
    };
    assert_eq!(limit(1024).max_upload_megabytes(), 1);
    assert_eq!(limit(1024 * 1024).max_upload_megabytes(), 1);
    assert_eq!(limit(3 * 512 * 1024).max_upload_megabytes(), 2);
}

/**
    Proxy struct for parsing and/or deserializing a `Config` struct.

    All fields are optional and have defaults, check [`Config`] for additional details.
*/
#[derive(Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ConfigDeserializable {
    host: IpAddr,
    port: u16,
    catalog_file: Option<PathBuf>,
    max_upload_bytes: usize,
    catalog_seed: Option<u64>,
    vision_api_key: Option<String>,
    vision_endpoint: Option<String>,
}

impl Default for ConfigDeserializable {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            catalog_file: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            catalog_seed: None,
            vision_api_key: None,
            vision_endpoint: None,
        }
    }
}

static DEFAULT_CATALOG_PATH: Lazy<PathBuf> =
    Lazy::new(|| make_absolute_and_clean("products.csv"));
