use crate::error::{Result, TripCastError};
use dialoguer::Input;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub forecast: ForecastConfig,
    #[serde(default)]
    pub recommend: RecommendConfig,
    #[serde(default)]
    pub geocoding: GeocodingConfig,
}

/// Forecast horizon, training thresholds and forest sizes.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ForecastConfig {
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,
    #[serde(default = "default_min_rows_city")]
    pub min_rows_city: usize,
    #[serde(default = "default_min_rows_place")]
    pub min_rows_place: usize,
    #[serde(default = "default_temperature_trees")]
    pub temperature_trees: usize,
    #[serde(default = "default_rain_trees")]
    pub rain_trees: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_horizon_days() -> u32 {
    60
}

fn default_min_rows_city() -> usize {
    120
}

fn default_min_rows_place() -> usize {
    90
}

fn default_temperature_trees() -> usize {
    300
}

fn default_rain_trees() -> usize {
    200
}

fn default_seed() -> u64 {
    42
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon_days: default_horizon_days(),
            min_rows_city: default_min_rows_city(),
            min_rows_place: default_min_rows_place(),
            temperature_trees: default_temperature_trees(),
            rain_trees: default_rain_trees(),
            seed: default_seed(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecommendConfig {
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_festival_weight")]
    pub festival_weight: i32,
}

fn default_max_results() -> usize {
    15
}

fn default_festival_weight() -> i32 {
    15
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            festival_weight: default_festival_weight(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeocodingConfig {
    #[serde(default = "default_geocoding_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Pause after every uncached lookup; Nominatim allows roughly one request per second.
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
    #[serde(default)]
    pub cache_path: Option<PathBuf>,
}

fn default_geocoding_url() -> String {
    "https://nominatim.openstreetmap.org/search".into()
}

fn default_user_agent() -> String {
    format!("tripcast/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_request_delay_ms() -> u64 {
    200
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            request_delay_ms: default_request_delay_ms(),
            cache_path: None,
        }
    }
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(TripCastError::Config(format!(
                "Config file not found at {:?}. Run `tripcast init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| TripCastError::Config(format!("Failed to read config: {}", e)))?;

        Self::parse(&config_str)
    }

    /// Load the config if one can be found, otherwise fall back to built-in defaults.
    /// An explicit override that does not exist is still an error.
    pub fn load_or_default(config_override: Option<PathBuf>) -> Result<Self> {
        if config_override.is_none() && !Self::exists(None) {
            tracing::info!("No config file found, using defaults");
            return Ok(Self::default());
        }
        Self::load(config_override)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content);
        serde_yaml::from_str(&content)
            .map_err(|e| TripCastError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("tripcast").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        Self::default_config_path()
    }

    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/tripcast/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| TripCastError::Config("Cannot determine config directory".into()))?
            .join("tripcast");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up tripcast!");
        println!();

        println!("Forecasting");
        let horizon_days: u32 = Input::new()
            .with_prompt("  Forecast horizon (days)")
            .default(default_horizon_days())
            .interact_text()
            .map_err(|e| TripCastError::Config(format!("Input error: {}", e)))?;

        let min_rows_city: usize = Input::new()
            .with_prompt("  Minimum history rows for cities")
            .default(default_min_rows_city())
            .interact_text()
            .map_err(|e| TripCastError::Config(format!("Input error: {}", e)))?;

        let min_rows_place: usize = Input::new()
            .with_prompt("  Minimum history rows for tourist places")
            .default(default_min_rows_place())
            .interact_text()
            .map_err(|e| TripCastError::Config(format!("Input error: {}", e)))?;

        println!();

        // Nominatim's usage policy asks for an identifying user agent
        println!("Geocoding (OpenStreetMap Nominatim)");
        let user_agent: String = Input::new()
            .with_prompt("  User agent (include a contact address)")
            .default(default_user_agent())
            .interact_text()
            .map_err(|e| TripCastError::Config(format!("Input error: {}", e)))?;

        let request_delay_ms: u64 = Input::new()
            .with_prompt("  Delay after each lookup (ms)")
            .default(default_request_delay_ms())
            .interact_text()
            .map_err(|e| TripCastError::Config(format!("Input error: {}", e)))?;

        println!();

        let config = Config {
            forecast: ForecastConfig {
                horizon_days,
                min_rows_city,
                min_rows_place,
                ..ForecastConfig::default()
            },
            recommend: RecommendConfig::default(),
            geocoding: GeocodingConfig {
                user_agent,
                request_delay_ms,
                ..GeocodingConfig::default()
            },
        };

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| TripCastError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# tripcast configuration\n# Generated by `tripcast init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        let re = match regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") {
            Ok(re) => re,
            Err(_) => return result,
        };

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }

    pub fn data_dir(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        if let Some(dir) = data_dir_override {
            std::fs::create_dir_all(dir)?;
            return Ok(dir.clone());
        }

        if let Ok(dir) = std::env::var("TRIPCAST_DATA_DIR") {
            let p = PathBuf::from(dir);
            std::fs::create_dir_all(&p)?;
            return Ok(p);
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| TripCastError::Config("Cannot determine data directory".into()))?
            .join("tripcast");

        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    pub fn db_path(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        Ok(Self::data_dir(data_dir_override)?.join("tripcast.db"))
    }

    pub fn geo_cache_path(&self, data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        match &self.geocoding.cache_path {
            Some(p) => Ok(p.clone()),
            None => Ok(Self::data_dir(data_dir_override)?.join("geo_cache.json")),
        }
    }
}
