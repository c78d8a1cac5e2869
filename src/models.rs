//! Data models and configuration
//!
//! Defines the analysis result handed back to callers and the typed
//! configuration the client is built from.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_JPEG_QUALITY: u8 = 85;

/// The model's best single-item guess for a photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub food_name: String,
    pub calories: u32,
}

impl AnalysisResult {
    /// Builds a result, rejecting names that are blank after trimming.
    pub fn new(food_name: &str, calories: u32) -> Result<Self> {
        let food_name = food_name.trim();
        if food_name.is_empty() {
            return Err(Error::malformed("food_name is empty"));
        }

        Ok(Self {
            food_name: food_name.to_string(),
            calories,
        })
    }
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub jpeg_quality: u8,
    pub max_dimension: Option<u32>,
    pub request_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key =
            var("OPENAI_API_KEY").ok_or_else(|| Error::Config("OPENAI_API_KEY not set".into()))?;

        let temperature = match var("ANALYSIS_TEMPERATURE") {
            Some(raw) => parse_var::<f32>("ANALYSIS_TEMPERATURE", &raw)?,
            None => DEFAULT_TEMPERATURE,
        };
        if !(0.0..=2.0).contains(&temperature) {
            return Err(Error::Config(format!(
                "ANALYSIS_TEMPERATURE must be within 0.0..=2.0, got {}",
                temperature
            )));
        }

        let jpeg_quality = match var("JPEG_QUALITY") {
            Some(raw) => parse_var::<u8>("JPEG_QUALITY", &raw)?,
            None => DEFAULT_JPEG_QUALITY,
        };
        if !(1..=100).contains(&jpeg_quality) {
            return Err(Error::Config(format!(
                "JPEG_QUALITY must be within 1..=100, got {}",
                jpeg_quality
            )));
        }

        let max_dimension = var("IMAGE_MAX_DIMENSION")
            .map(|raw| parse_var::<u32>("IMAGE_MAX_DIMENSION", &raw))
            .transpose()?;
        if max_dimension == Some(0) {
            return Err(Error::Config(
                "IMAGE_MAX_DIMENSION must be greater than zero".to_string(),
            ));
        }

        let timeout_secs = var("ANALYSIS_TIMEOUT_SECS")
            .map(|raw| parse_var::<u64>("ANALYSIS_TIMEOUT_SECS", &raw))
            .transpose()?;
        if timeout_secs == Some(0) {
            return Err(Error::Config(
                "ANALYSIS_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }
        let request_timeout = timeout_secs.map(Duration::from_secs);

        Ok(Self {
            api_key,
            model: var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: var("OPENAI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            temperature,
            jpeg_quality,
            max_dimension,
            request_timeout,
        })
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| Error::Config(format!("Invalid value for {}: '{}'", key, raw)))
}
