use std::{fs, io, path::Path};

use serde::Deserialize;
use thiserror::Error;

use crate::services::sampler::settings::SamplerSettings;

pub type Result<T> = std::result::Result<T, SettingsError>;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Could not read settings file: {0}")]
    Io(#[from] io::Error),
    #[error("Could not parse settings file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid CORS setting `{0}`")]
    InvalidCors(String),
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ModelingSettings {
    pub address: String,
    pub api_path: String,
    pub cors: CorsSettings,
    pub sampler: SamplerSettings,
}

impl Default for ModelingSettings {
    fn default() -> Self {
        Self {
            address: "0.0.0.0:8000".to_string(),
            api_path: "/modeling".to_string(),
            cors: CorsSettings::default(),
            sampler: SamplerSettings::default(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct CorsSettings {
    pub allow_origins: Vec<String>,
    pub allow_methods: Vec<String>,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allow_origins: vec![
                "http://localhost:8080".to_string(),
                "http://localhost".to_string(),
                "http://sci.logiq.one".to_string(),
            ],
            allow_methods: vec!["GET".to_string()],
        }
    }
}

impl ModelingSettings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
