use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use config::{Config as HierarchicalConfig, Environment};
use serde::{Deserialize, Serialize};
use shop_catalog::{CatalogClientConfig, DEFAULT_CATALOG_URL};
use tracing::debug;
use xdg::BaseDirectories;

/// Name of shopctl's directory below the XDG config directories
const SHOPCTL_DIR_NAME: &str = "shopctl";
const SHOPCTL_CONFIG_DIR_VAR: &str = "SHOPCTL_CONFIG_DIR";
const SHOPCTL_ENV_PREFIX: &str = "SHOPCTL";
pub const SHOPCTL_CONFIG_FILE: &str = "shopctl.toml";

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Config {
    /// Base URL of the products API
    pub catalog_url: String,

    /// Headers sent with every request
    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    /// Overrides the `User-Agent` header
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Config {
    /// Read the configuration.
    ///
    /// Later sources override earlier ones:
    ///
    /// 1. built in defaults
    /// 2. `shopctl/shopctl.toml` in `$XDG_CONFIG_DIRS`, then `$XDG_CONFIG_HOME`
    /// 3. `shopctl.toml` in `$SHOPCTL_CONFIG_DIR`, if set
    /// 4. `SHOPCTL_*` environment variables, e.g. `SHOPCTL_CATALOG_URL`
    /// 5. `catalog_url`, as passed on the command line
    pub fn parse(catalog_url: Option<String>) -> Result<Config> {
        let config = Self::raw_config(catalog_url)?
            .try_deserialize()
            .context("Could not parse config")?;
        debug!(?config, "read config");
        Ok(config)
    }

    fn raw_config(catalog_url: Option<String>) -> Result<HierarchicalConfig> {
        let shopctl_dirs = BaseDirectories::with_prefix(SHOPCTL_DIR_NAME);

        let mut builder =
            HierarchicalConfig::builder().set_default("catalog_url", DEFAULT_CATALOG_URL)?;

        // yielded least important first, so `$XDG_CONFIG_HOME` is added last
        for file in shopctl_dirs.find_config_files(SHOPCTL_CONFIG_FILE) {
            debug!(?file, "adding config file");
            builder = builder.add_source(config::File::from(file).format(config::FileFormat::Toml));
        }

        if let Ok(config_dir) = env::var(SHOPCTL_CONFIG_DIR_VAR) {
            debug!("`${SHOPCTL_CONFIG_DIR_VAR}` set: {config_dir}");
            builder = builder.add_source(
                config::File::from(PathBuf::from(config_dir).join(SHOPCTL_CONFIG_FILE))
                    .format(config::FileFormat::Toml)
                    .required(false),
            );
        }

        let final_config = builder
            .add_source(Environment::with_prefix(SHOPCTL_ENV_PREFIX))
            .set_override_option("catalog_url", catalog_url)?
            .build()?;
        Ok(final_config)
    }

    /// The configuration of the catalog client.
    pub fn client_config(&self) -> CatalogClientConfig {
        CatalogClientConfig {
            catalog_url: self.catalog_url.clone(),
            extra_headers: self.headers.clone(),
            user_agent: self.user_agent.clone(),
        }
    }
}
