use std::{path::PathBuf, time::Duration};

use clap::Parser;
use reqwest::Url;

use crate::{error::ConfigError, model::Catalog, random::generate_menu};


#[derive(Parser, Debug)]
#[command(name = "mcdo-menu", about = "Browse the menu, fill a cart and send the order")]
pub struct Args {
    /// JSON catalog: { "categories": [{ "name", "dishes": [...] }] }
    #[arg(short, long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// URL the order is POSTed to
    #[arg(long, env = "MENU_ORDER_ENDPOINT", default_value = "http://127.0.0.1:8080/api/orders")]
    pub endpoint: String,

    /// Order request timeout in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 10_000)]
    pub timeout_ms: u64,

    /// Seed for the demo menu used when no catalog file is given
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// tracing filter, e.g. "info" or "mcdo_menu=debug"; RUST_LOG wins when set
    #[arg(long, default_value = "info")]
    pub log: String,
}

// Validated runtime settings
#[derive(Debug, Clone)]
pub struct Config {
    pub catalog: Option<PathBuf>,
    pub endpoint: Url,
    pub timeout: Duration,
    pub seed: u64,
    pub log: String,
}

impl TryFrom<Args> for Config {
    type Error = ConfigError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let endpoint = Url::parse(&args.endpoint).map_err(|e| ConfigError::Endpoint {
            url: args.endpoint.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ConfigError::Endpoint {
                url: args.endpoint,
                reason: "scheme must be http or https".into(),
            });
        }
        if args.timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(Config {
            catalog: args.catalog,
            endpoint,
            timeout: Duration::from_millis(args.timeout_ms),
            seed: args.seed,
            log: args.log,
        })
    }
}

impl Config {
    // Catalog file if one was given, demo menu otherwise
    pub fn load_catalog(&self) -> Result<Catalog, ConfigError> {
        match &self.catalog {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Catalog {
                    path: path.display().to_string(),
                    source,
                })?;
                Ok(Catalog::from_json(&raw))
            }
            None => Ok(crate::catalog::normalize(Some(&generate_menu(self.seed)))),
        }
    }
}
