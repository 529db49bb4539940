use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::celestrak::{DatasetFormat, QueryKind, DEFAULT_BASE_URL};
use crate::render::EarthStyle;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub web: WebConfig,
    pub data: DataConfig,
    pub render: RenderConfig,
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
        }
    }
}

pub const MAX_AGE_DAYS_LIMIT: f64 = 3650.0;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub folder: PathBuf,
    pub max_age_days: f64,
    pub local_only: bool,
    pub base_url: String,
    pub format: DatasetFormat,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            folder: PathBuf::from("data"),
            max_age_days: 7.0,
            local_only: false,
            base_url: DEFAULT_BASE_URL.to_string(),
            format: DatasetFormat::Csv,
        }
    }
}

impl DataConfig {
    pub fn max_age(&self) -> Duration {
        Duration::from_secs_f64(self.max_age_days * 24.0 * 60.0 * 60.0)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub earth: EarthStyle,
    pub texture: Option<PathBuf>,
    pub lat_steps: usize,
    pub lon_steps: usize,
    pub refresh_seconds: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            earth: EarthStyle::Sphere,
            texture: None,
            lat_steps: 91,
            lon_steps: 181,
            refresh_seconds: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub query: QueryKind,
    pub value: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            query: QueryKind::Group,
            value: QueryKind::Group.default_value().to_string(),
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Config::default()),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=MAX_AGE_DAYS_LIMIT).contains(&self.data.max_age_days) {
            return Err(ConfigError::Invalid(format!(
                "data.max_age_days must be between 0 and {}",
                MAX_AGE_DAYS_LIMIT
            )));
        }
        if self.render.earth == EarthStyle::Textured && self.render.texture.is_none() {
            return Err(ConfigError::Invalid(
                "render.texture is required when render.earth is textured".into(),
            ));
        }
        if self.render.refresh_seconds == 0 {
            return Err(ConfigError::Invalid(
                "render.refresh_seconds must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = Config::from_str("{}").unwrap();
        assert_eq!(config.web.bind, "0.0.0.0:8080");
        assert_eq!(config.data.folder, PathBuf::from("data"));
        assert_eq!(config.data.max_age(), Duration::from_secs(7 * 24 * 3600));
        assert_eq!(config.defaults.query, QueryKind::Group);
        assert_eq!(config.defaults.value, "gnss");
    }

    #[test]
    fn test_partial_config() {
        let config = Config::from_str(
            "data:\n  folder: /tmp/tle\n  local_only: true\n  format: tle\n\
             defaults:\n  query: CATNR\n  value: \"25544\"\n",
        )
        .unwrap();
        assert!(config.data.local_only);
        assert_eq!(config.data.format, DatasetFormat::Tle);
        assert_eq!(config.data.max_age_days, 7.0);
        assert_eq!(config.defaults.query, QueryKind::Catnr);
    }

    #[test]
    fn test_example_config_parses() {
        let config = Config::from_str(include_str!("../../config.example.yaml")).unwrap();
        assert_eq!(config.render.lat_steps, 91);
        assert_eq!(config.data.format, DatasetFormat::Csv);
    }

    #[test]
    fn test_textured_needs_texture() {
        assert!(Config::from_str("render:\n  earth: textured\n").is_err());
        assert!(Config::from_str("render:\n  earth: textured\n  texture: earth.jpg\n").is_ok());
        assert!(Config::from_str("render:\n  refresh_seconds: 0\n").is_err());
    }

    #[test]
    fn test_max_age_days_is_bounded() {
        for bad in ["-1", "1e20", ".nan", ".inf"] {
            let yaml = format!("data:\n  max_age_days: {}\n", bad);
            assert!(Config::from_str(&yaml).is_err(), "{}", bad);
        }
        let config = Config::from_str("data:\n  max_age_days: 3650\n").unwrap();
        assert_eq!(config.data.max_age(), Duration::from_secs(3650 * 24 * 3600));
        assert_eq!(
            Config::from_str("data:\n  max_age_days: 0\n").unwrap().data.max_age(),
            Duration::ZERO
        );
    }
}
