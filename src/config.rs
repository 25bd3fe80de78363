use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{FactsError, Result};

/// Environment variable holding the Perplexity API key.
pub const PERPLEXITY_KEY_VAR: &str = "PERPLEXITY_API_KEY";
/// Environment variable holding the Gemini API key.
pub const GEMINI_KEY_VAR: &str = "GEMINI_API_KEY";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub perplexity: PerplexityConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PerplexityConfig {
    #[serde(default = "default_perplexity_model")]
    pub model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for PerplexityConfig {
    fn default() -> Self {
        Self {
            model: default_perplexity_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeminiConfig {
    #[serde(default = "default_gemini_model")]
    pub model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: default_gemini_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PipelineConfig {
    #[serde(default = "default_question_count")]
    pub question_count: usize,
    #[serde(default = "default_extract_attempts")]
    pub extract_attempts: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            question_count: default_question_count(),
            extract_attempts: default_extract_attempts(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

fn default_perplexity_model() -> String {
    "sonar".to_string()
}
fn default_gemini_model() -> String {
    "gemini-2.0-flash".to_string()
}
fn default_timeout_secs() -> u64 {
    60
}
fn default_question_count() -> usize {
    15
}
fn default_extract_attempts() -> u32 {
    3
}
fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

/// API credentials for the two providers, read from the environment.
///
/// Both keys are checked before any network call is made; a missing or
/// empty key is a fatal configuration error.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub perplexity_api_key: String,
    pub gemini_api_key: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            perplexity_api_key: require_env(PERPLEXITY_KEY_VAR)?,
            gemini_api_key: require_env(GEMINI_KEY_VAR)?,
        })
    }
}

fn require_env(var: &str) -> Result<String> {
    match std::env::var(var) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(FactsError::Config(format!("{} not set", var))),
    }
}

/// Load configuration from a TOML file.
///
/// A missing file is not an error: the built-in defaults are used, so the
/// binary works without any config at all. A file that exists but cannot
/// be read or parsed is a configuration error.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        FactsError::Config(format!(
            "Failed to read config file {}: {}",
            path.display(),
            e
        ))
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| {
        FactsError::Config(format!(
            "Failed to parse config file {}: {}",
            path.display(),
            e
        ))
    })?;

    if config.pipeline.question_count == 0 {
        return Err(FactsError::Config(
            "pipeline.question_count must be > 0".to_string(),
        ));
    }

    if config.pipeline.extract_attempts == 0 {
        return Err(FactsError::Config(
            "pipeline.extract_attempts must be > 0".to_string(),
        ));
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = load_config(Path::new("/nonexistent/facts.toml")).unwrap();
        assert_eq!(config.perplexity.model, "sonar");
        assert_eq!(config.gemini.model, "gemini-2.0-flash");
        assert_eq!(config.pipeline.question_count, 15);
        assert_eq!(config.output.dir, PathBuf::from("."));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("facts.toml");
        std::fs::write(&path, "[gemini]\nmodel = \"gemini-1.5-pro\"\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.gemini.model, "gemini-1.5-pro");
        assert_eq!(config.gemini.timeout_secs, 60);
        assert_eq!(config.perplexity.model, "sonar");
    }

    #[test]
    fn test_zero_question_count_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("facts.toml");
        std::fs::write(&path, "[pipeline]\nquestion_count = 0\n").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("question_count"));
    }
}
