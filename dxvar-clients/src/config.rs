//! Layered configuration: built-in defaults, then an optional TOML file, then
//! environment variables.
//!
//! ```toml
//! gene_disease_table = "~/data/clingen.csv"
//!
//! [endpoints]
//! genebe = "https://api.genebe.net"
//! intervar_enabled = false
//!
//! [assistant]
//! model = "llama-3.3-70b-versatile"
//!
//! [http]
//! timeout_secs = 10
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};
use serde::Deserialize;

use super::consts::*;
use super::utils::{expand_path, get_default_config_path};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub genebe: String,
    pub intervar: String,
    pub ensembl: String,
    pub groq: String,
    /// Query InterVar next to GeneBe.
    pub intervar_enabled: bool,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        EndpointConfig {
            genebe: DEFAULT_GENEBE_API.to_string(),
            intervar: DEFAULT_INTERVAR_API.to_string(),
            ensembl: DEFAULT_ENSEMBL_API.to_string(),
            groq: DEFAULT_GROQ_API.to_string(),
            intervar_enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub model: String,
    pub temperature: f32,
    pub max_completion_tokens: u32,
    pub top_p: f32,
    /// Usually left out of the file and supplied through `GROQ_API_KEY`.
    pub api_key: Option<String>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        AssistantConfig {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_completion_tokens: DEFAULT_MAX_COMPLETION_TOKENS,
            top_p: DEFAULT_TOP_P,
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        HttpConfig {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff_ms: DEFAULT_RETRY_BACKOFF_MS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DxvarConfig {
    pub endpoints: EndpointConfig,
    pub assistant: AssistantConfig,
    pub http: HttpConfig,
    pub gene_disease_table: Option<PathBuf>,
}

impl DxvarConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: DxvarConfig =
            toml::from_str(content).context("Failed to parse configuration")?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid configuration file {}", path.display()))?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    ///
    /// Resolve the full configuration.
    ///
    /// An explicit path must exist. Without one, the file from `$DXVAR_CONFIG`
    /// or `~/.dxvar/config.toml` is read when present and skipped otherwise.
    /// Environment variables are applied last.
    ///
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_path(&expand_path(path))?,
            None => {
                let path = get_default_config_path();
                if path.exists() {
                    Self::from_path(&path)?
                } else {
                    debug!("No configuration file at {}, using defaults", path.display());
                    Self::default()
                }
            }
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Override values with whatever `lookup` finds for the known variable names.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get(GENEBE_API_ENV) {
            self.endpoints.genebe = v;
        }
        if let Some(v) = get(INTERVAR_API_ENV) {
            self.endpoints.intervar = v;
        }
        if let Some(v) = get(ENSEMBL_API_ENV) {
            self.endpoints.ensembl = v;
        }
        if let Some(v) = get(GROQ_API_ENV) {
            self.endpoints.groq = v;
        }
        if let Some(v) = get(GROQ_API_KEY_ENV) {
            self.assistant.api_key = Some(v);
        }
        if let Some(v) = get(GENE_DISEASE_TABLE_ENV) {
            self.gene_disease_table = Some(PathBuf::from(v));
        }

        if let Some(path) = &self.gene_disease_table {
            self.gene_disease_table = Some(expand_path(path));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::io::Write;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_defaults() {
        let config = DxvarConfig::default();
        assert_eq!(config.endpoints.genebe, "https://api.genebe.net");
        assert!(config.endpoints.intervar_enabled);
        assert_eq!(config.assistant.model, "llama-3.3-70b-versatile");
        assert_eq!(config.assistant.max_completion_tokens, 1024);
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.gene_disease_table, None);
    }

    #[rstest]
    fn test_partial_file_keeps_defaults() {
        let config = DxvarConfig::from_toml_str(
            r#"
            gene_disease_table = "/data/clingen.csv"

            [endpoints]
            intervar_enabled = false

            [http]
            max_retries = 0
            "#,
        )
        .unwrap();

        assert!(!config.endpoints.intervar_enabled);
        assert_eq!(config.endpoints.ensembl, "https://rest.ensembl.org");
        assert_eq!(config.http.max_retries, 0);
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(
            config.gene_disease_table,
            Some(PathBuf::from("/data/clingen.csv"))
        );
    }

    #[rstest]
    fn test_invalid_file_is_an_error() {
        assert!(DxvarConfig::from_toml_str("[http]\ntimeout_secs = \"soon\"").is_err());
    }

    #[rstest]
    fn test_env_overrides_file() {
        let mut config =
            DxvarConfig::from_toml_str("[endpoints]\ngenebe = \"http://file.local\"").unwrap();
        let env: HashMap<&str, &str> = HashMap::from([
            ("GENEBE_API", "http://env.local"),
            ("GROQ_API_KEY", "secret"),
            ("ENSEMBL_API", "  "),
        ]);

        config.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.endpoints.genebe, "http://env.local");
        assert_eq!(config.endpoints.ensembl, "https://rest.ensembl.org");
        assert_eq!(config.assistant.api_key.as_deref(), Some("secret"));
    }

    #[rstest]
    fn test_explicit_path_is_read() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[assistant]\nmodel = \"small-model\"").unwrap();

        let config = DxvarConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.assistant.model, "small-model");
    }

    #[rstest]
    fn test_missing_explicit_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(DxvarConfig::load(Some(&dir.path().join("absent.toml"))).is_err());
    }
}
