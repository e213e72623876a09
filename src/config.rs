use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use serde::{Deserialize, de::DeserializeOwned};

pub const BOM_ROOT: &str = "https://reg.bom.gov.au";
/// Mt Stapylton (Brisbane) 128 km radar loop.
pub const RADAR_LISTING_PATH: &str = "/products/IDR663.loop.shtml";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The env vars that can override where the radar loop is scraped from.
#[derive(Debug, Default, Deserialize)]
pub struct RadarEnv {
    bom_root: Option<String>,
    radar_listing_path: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub site_root: String,
    pub listing_path: String,
    pub output_dir: PathBuf,
    pub limit: Option<usize>,
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            site_root: BOM_ROOT.to_string(),
            listing_path: RADAR_LISTING_PATH.to_string(),
            output_dir: PathBuf::from("."),
            limit: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl FetchConfig {
    pub fn new() -> anyhow::Result<Self> {
        let radar_env = RadarEnv::load_from_env()?;
        Ok(Self::from_env(radar_env))
    }

    pub fn from_env(radar_env: RadarEnv) -> Self {
        let defaults = Self::default();
        Self {
            site_root: radar_env
                .bom_root
                .map(|root| root.trim_end_matches('/').to_string())
                .unwrap_or(defaults.site_root),
            listing_path: radar_env.radar_listing_path.unwrap_or(defaults.listing_path),
            ..defaults
        }
    }

    pub fn listing_url(&self) -> String {
        format!("{}{}", self.site_root, self.listing_path)
    }

    pub fn frame_url(&self, image_path: &str) -> String {
        format!("{}{}", self.site_root, image_path)
    }
}

// Extension trait.
pub trait LoadFromEnv: DeserializeOwned {
    fn load_from_env() -> anyhow::Result<Self> {
        // Don't throw an error if .env file doesn't exist.
        let _ = dotenv::dotenv();
        let config =
            envy::from_env::<Self>().context("failed to load env variables into config struct")?;
        Ok(config)
    }
}

impl<T: DeserializeOwned> LoadFromEnv for T {}
