use crate::error::FinSummaryError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// FinSummary application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Ollama API base URL
    pub ollama_base_url: String,

    /// LLM model name used for summarization and translation
    pub llm_model: String,

    /// HTTP timeout for a single model call, in seconds
    pub llm_timeout_secs: u64,

    /// Sampling temperature passed to the model
    pub llm_temperature: f32,

    /// Maximum chunk size in characters
    pub chunk_size: usize,

    /// Overlap between consecutive chunks in characters
    pub chunk_overlap: usize,

    /// Map calls allowed in flight during map-reduce
    pub map_concurrency: usize,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,

    /// Also write logs to `log_dir`
    pub log_to_file: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ollama_base_url: "http://localhost:11434".to_string(),
            llm_model: "llama3.2:latest".to_string(),
            llm_timeout_secs: 300,
            llm_temperature: 0.0,
            chunk_size: 4000,
            chunk_overlap: 200,
            map_concurrency: 1,
            log_dir: PathBuf::from("./log"),
            log_level: "info".to_string(),
            log_to_file: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self, FinSummaryError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        let defaults = Self::default();
        let config = Self {
            ollama_base_url: std::env::var("OLLAMA_BASE_URL")
                .unwrap_or(defaults.ollama_base_url),
            llm_model: std::env::var("LLM_MODEL").unwrap_or(defaults.llm_model),
            llm_timeout_secs: Self::get_env_parsed("LLM_TIMEOUT_SECS")?
                .unwrap_or(defaults.llm_timeout_secs),
            llm_temperature: Self::get_env_parsed("LLM_TEMPERATURE")?
                .unwrap_or(defaults.llm_temperature),
            chunk_size: Self::get_env_parsed("CHUNK_SIZE")?.unwrap_or(defaults.chunk_size),
            chunk_overlap: Self::get_env_parsed("CHUNK_OVERLAP")?
                .unwrap_or(defaults.chunk_overlap),
            map_concurrency: Self::get_env_parsed("MAP_CONCURRENCY")?
                .unwrap_or(defaults.map_concurrency),
            log_dir: std::env::var("LOG_DIR")
                .ok()
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_to_file: Self::get_env_parsed("LOG_TO_FILE")?.unwrap_or(defaults.log_to_file),
        };

        config.validate()?;

        Ok(config)
    }

    /// Parse an environment variable, failing on values that do not parse
    fn get_env_parsed<T: FromStr>(key: &str) -> Result<Option<T>, FinSummaryError> {
        match std::env::var(key) {
            Ok(raw) => raw.trim().parse().map(Some).map_err(|_| {
                FinSummaryError::config(format!("Invalid value for {}: '{}'", key, raw))
            }),
            Err(_) => Ok(None),
        }
    }

    /// Get log file path
    pub fn get_log_path(&self, filename: &str) -> PathBuf {
        self.log_dir.join(filename)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), FinSummaryError> {
        if !self.ollama_base_url.starts_with("http://")
            && !self.ollama_base_url.starts_with("https://")
        {
            return Err(FinSummaryError::config(
                "Ollama base URL must start with http:// or https://",
            ));
        }

        if self.llm_model.trim().is_empty() {
            return Err(FinSummaryError::config("LLM model name cannot be empty"));
        }

        if self.llm_timeout_secs == 0 {
            return Err(FinSummaryError::config("LLM timeout cannot be 0"));
        }

        if self.chunk_size == 0 {
            return Err(FinSummaryError::config("Chunk size cannot be 0"));
        }

        if self.chunk_overlap >= self.chunk_size {
            return Err(FinSummaryError::config(format!(
                "Chunk overlap ({}) must be smaller than chunk size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.ollama_base_url, "http://localhost:11434");
        assert_eq!(config.chunk_size, 4000);
        assert_eq!(config.map_concurrency, 1);
        assert!(!config.log_to_file);
    }

    #[test]
    fn test_get_log_path() {
        let config = AppConfig::default();
        assert_eq!(
            config.get_log_path("finsummary.log"),
            PathBuf::from("./log/finsummary.log")
        );
    }

    #[test]
    fn test_validate() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());

        let mut invalid_config = AppConfig::default();
        invalid_config.llm_model = String::new();
        assert!(invalid_config.validate().is_err());

        let mut invalid_config = AppConfig::default();
        invalid_config.ollama_base_url = "localhost:11434".to_string();
        assert!(invalid_config.validate().is_err());

        let mut invalid_config = AppConfig::default();
        invalid_config.chunk_overlap = invalid_config.chunk_size;
        assert!(invalid_config.validate().is_err());

        let mut invalid_config = AppConfig::default();
        invalid_config.llm_timeout_secs = 0;
        assert!(invalid_config.validate().is_err());
    }
}
