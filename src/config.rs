use std::path::PathBuf;

/// Production search endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";

/// Application configuration
///
/// The API key is never embedded in code: it comes from the environment
/// (a `.env` file works via dotenvy), with the USDA `DEMO_KEY` as the
/// fallback for light use.
#[derive(Debug, Clone)]
pub struct Config {
    /// FoodData Central API key
    pub api_key: String,
    /// Search endpoint base URL
    pub base_url: String,
    /// Directory the persisted log lives in
    pub data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("macrolog");
        Self {
            api_key: "DEMO_KEY".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            data_dir,
        }
    }
}

impl Config {
    /// Load configuration with priority: env vars > defaults
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Ok(api_key) = std::env::var("MACROLOG_API_KEY") {
            config.api_key = api_key;
        }
        if let Ok(base_url) = std::env::var("MACROLOG_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(data_dir) = std::env::var("MACROLOG_DATA_DIR") {
            config.data_dir = PathBuf::from(data_dir);
        }

        config
    }
}
