use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Environment variable holding the generation-API credential.
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";
/// Environment variable holding the vector-store endpoint URL.
pub const SUPABASE_URL_VAR: &str = "SUPABASE_URL";
/// Environment variable holding the vector-store credential.
pub const SUPABASE_KEY_VAR: &str = "SUPABASE_KEY";

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub user_data_dir: PathBuf,
    pub log_dir: PathBuf,
    pub secrets_path: PathBuf,
}

impl AppPaths {
    pub fn new() -> Self {
        let user_data_dir = discover_user_data_dir();
        let log_dir = user_data_dir.join("logs");
        let secrets_path = user_data_dir.join("secrets.yaml");

        for dir in [&user_data_dir, &log_dir] {
            let _ = fs::create_dir_all(dir);
        }

        AppPaths {
            user_data_dir,
            log_dir,
            secrets_path,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}

fn discover_user_data_dir() -> PathBuf {
    if let Ok(dir) = env::var("FOCUS_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if cfg!(debug_assertions) {
        return env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    }

    if cfg!(target_os = "windows") {
        let base = env::var("LOCALAPPDATA")
            .unwrap_or_else(|_| env::var("USERPROFILE").unwrap_or_else(|_| ".".to_string()));
        return PathBuf::from(base).join("FocusAssist");
    }

    if cfg!(target_os = "macos") {
        return home_dir()
            .join("Library")
            .join("Application Support")
            .join("FocusAssist");
    }

    home_dir().join(".local").join("share").join("focus-assist")
}

fn home_dir() -> PathBuf {
    env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

#[derive(Debug, Error)]
pub enum SecretsError {
    #[error("{0} is not set; export it or add it to {1}")]
    Missing(&'static str, String),
    #[error("failed to read secrets file {0}: {1}")]
    Unreadable(String, String),
}

/// Credentials for the external collaborators.
///
/// Environment variables win; `secrets.yaml` under the data dir is the
/// fallback. All three are required at startup.
#[derive(Debug, Clone)]
pub struct Secrets {
    pub gemini_api_key: String,
    pub supabase_url: String,
    pub supabase_key: String,
}

#[derive(Debug, Default, Deserialize)]
struct SecretsFile {
    #[serde(default)]
    gemini_api_key: Option<String>,
    #[serde(default)]
    supabase_url: Option<String>,
    #[serde(default)]
    supabase_key: Option<String>,
}

impl Secrets {
    pub fn load(paths: &AppPaths) -> Result<Self, SecretsError> {
        let file = read_secrets_file(&paths.secrets_path)?;
        let secrets_path = paths.secrets_path.display().to_string();

        let resolve = |var: &'static str, fallback: Option<String>| {
            resolve_secret(env::var(var).ok(), fallback)
                .ok_or_else(|| SecretsError::Missing(var, secrets_path.clone()))
        };

        Ok(Secrets {
            gemini_api_key: resolve(GEMINI_API_KEY_VAR, file.gemini_api_key)?,
            supabase_url: resolve(SUPABASE_URL_VAR, file.supabase_url)?,
            supabase_key: resolve(SUPABASE_KEY_VAR, file.supabase_key)?,
        })
    }
}

fn resolve_secret(env_value: Option<String>, file_value: Option<String>) -> Option<String> {
    env_value
        .filter(|v| !v.trim().is_empty())
        .or_else(|| file_value.filter(|v| !v.trim().is_empty()))
}

fn read_secrets_file(path: &Path) -> Result<SecretsFile, SecretsError> {
    if !path.exists() {
        return Ok(SecretsFile::default());
    }

    let raw = fs::read_to_string(path)
        .map_err(|e| SecretsError::Unreadable(path.display().to_string(), e.to_string()))?;
    serde_yaml::from_str(&raw)
        .map_err(|e| SecretsError::Unreadable(path.display().to_string(), e.to_string()))
}

/// Tunables for the response pipeline.
///
/// The retrieval constants carry no documented derivation, so they are
/// treated as configuration with defaults rather than invariants.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Full resource name of the embedding model.
    pub embedding_model: String,
    /// Minimum similarity score a product row must reach.
    pub match_threshold: f64,
    /// Maximum number of product rows per search.
    pub match_count: u32,
    /// Number of most recent conversation turns rendered into the prompt.
    pub history_window: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            embedding_model: "models/text-embedding-004".to_string(),
            match_threshold: 0.35,
            match_count: 5,
            history_window: 4,
        }
    }
}

impl PipelineConfig {
    /// Environment overrides on top of the defaults.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Some(v) = env_parse::<f64>("FOCUS_MATCH_THRESHOLD") {
            cfg.match_threshold = v;
        }
        if let Some(v) = env_parse::<u32>("FOCUS_MATCH_COUNT") {
            cfg.match_count = v;
        }
        if let Some(v) = env_parse::<usize>("FOCUS_HISTORY_WINDOW") {
            cfg.history_window = v;
        }
        if let Ok(v) = env::var("FOCUS_EMBEDDING_MODEL") {
            if !v.trim().is_empty() {
                cfg.embedding_model = v;
            }
        }
        cfg
    }
}

fn env_parse<T: std::str::FromStr>(var: &str) -> Option<T> {
    env::var(var).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn env_value_wins_over_file_value() {
        let resolved = resolve_secret(Some("from-env".to_string()), Some("from-file".to_string()));
        assert_eq!(resolved.as_deref(), Some("from-env"));
    }

    #[test]
    fn blank_env_value_falls_back_to_file() {
        let resolved = resolve_secret(Some("   ".to_string()), Some("from-file".to_string()));
        assert_eq!(resolved.as_deref(), Some("from-file"));
        assert_eq!(resolve_secret(None, None), None);
    }

    #[test]
    fn reads_partial_secrets_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "gemini_api_key: abc123").unwrap();
        writeln!(file, "supabase_url: https://example.supabase.co").unwrap();

        let parsed = read_secrets_file(file.path()).unwrap();
        assert_eq!(parsed.gemini_api_key.as_deref(), Some("abc123"));
        assert_eq!(
            parsed.supabase_url.as_deref(),
            Some("https://example.supabase.co")
        );
        assert!(parsed.supabase_key.is_none());
    }

    #[test]
    fn missing_secrets_file_is_empty_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let parsed = read_secrets_file(&dir.path().join("secrets.yaml")).unwrap();
        assert!(parsed.gemini_api_key.is_none());
    }

    #[test]
    fn pipeline_defaults_match_documented_constants() {
        let cfg = PipelineConfig::default();
        assert_eq!(cfg.match_threshold, 0.35);
        assert_eq!(cfg.match_count, 5);
        assert_eq!(cfg.history_window, 4);
        assert_eq!(cfg.embedding_model, "models/text-embedding-004");
    }
}
