//! Configuration for the webstore

use core_config::{app_info, env_or_default, env_parse_or, server::ServerConfig, AppInfo, FromEnv};
use std::path::PathBuf;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Root directory for uploaded product images and manuals
    pub upload_dir: PathBuf,
    /// Load the demo products and customers at startup
    pub seed_catalog: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let upload_dir = PathBuf::from(env_or_default("UPLOAD_DIR", "./resources"));
        let seed_catalog = env_parse_or("SEED_CATALOG", true)?;

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            upload_dir,
            seed_catalog,
        })
    }
}
