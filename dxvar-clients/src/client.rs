//! Wiring of the HTTP clients behind the dxvar service traits.
//!
//! This module provides [`ServiceClients`] and its builder, which turn a
//! [`DxvarConfig`] into ready-to-use clients and hand them to a session as
//! [`Services`].

use anyhow::{Context, Result};
use log::{info, warn};

use dxvar_core::gene_disease::GeneDiseaseTable;
use dxvar_core::services::{Assistant, VariantClassifier};
use dxvar_core::session::Services;

use super::config::DxvarConfig;
use super::ensembl::EnsemblClient;
use super::genebe::GeneBeClient;
use super::groq::GroqAssistant;
use super::http::HttpClient;
use super::intervar::InterVarClient;

/// Builder for constructing [`ServiceClients`] with custom configuration.
///
/// # Examples
///
/// ```rust,no_run
/// use dxvar_clients::client::ServicesBuilder;
///
/// # fn main() -> anyhow::Result<()> {
/// let clients = ServicesBuilder::new()
///     .without_alternative()
///     .finish()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct ServicesBuilder {
    config: Option<DxvarConfig>,
    without_alternative: bool,
    without_assistant: bool,
}

impl ServicesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already layered configuration instead of the defaults.
    pub fn with_config(mut self, config: DxvarConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Skip the alternative classifier regardless of configuration.
    pub fn without_alternative(mut self) -> Self {
        self.without_alternative = true;
        self
    }

    /// Skip the assistant; reports then carry no explanation.
    pub fn without_assistant(mut self) -> Self {
        self.without_assistant = true;
        self
    }

    /// Consumes the builder and creates the clients.
    pub fn finish(self) -> Result<ServiceClients> {
        let config = self.config.unwrap_or_default();

        let http = HttpClient::new(&config.http).context("Failed to create HTTP client")?;

        let genebe = GeneBeClient::new(http.clone(), config.endpoints.genebe.clone());
        let ensembl = EnsemblClient::new(http.clone(), config.endpoints.ensembl.clone());

        let intervar = (config.endpoints.intervar_enabled && !self.without_alternative)
            .then(|| InterVarClient::new(http.clone(), config.endpoints.intervar.clone()));

        let groq = if self.without_assistant {
            None
        } else {
            match config.assistant.api_key.clone() {
                Some(key) => Some(GroqAssistant::new(
                    http,
                    config.endpoints.groq.clone(),
                    key,
                    config.assistant.clone(),
                )),
                None => {
                    warn!("No Groq API key configured, explanations are disabled");
                    None
                }
            }
        };

        info!(
            "Services ready: GeneBe at {}, InterVar {}, assistant {}",
            config.endpoints.genebe,
            if intervar.is_some() { "on" } else { "off" },
            if groq.is_some() { "on" } else { "off" },
        );

        Ok(ServiceClients {
            genebe,
            intervar,
            ensembl,
            groq,
        })
    }
}

/// The HTTP clients for every external service.
#[derive(Debug, Clone)]
pub struct ServiceClients {
    genebe: GeneBeClient,
    intervar: Option<InterVarClient>,
    ensembl: EnsemblClient,
    groq: Option<GroqAssistant>,
}

impl ServiceClients {
    pub fn builder() -> ServicesBuilder {
        ServicesBuilder::new()
    }

    pub fn has_alternative(&self) -> bool {
        self.intervar.is_some()
    }

    pub fn has_assistant(&self) -> bool {
        self.groq.is_some()
    }

    /// Borrow the clients as the collaborators of a session turn.
    pub fn services<'a>(&'a self, diseases: &'a GeneDiseaseTable) -> Services<'a> {
        Services {
            primary: &self.genebe,
            alternative: self.intervar.as_ref().map(|c| c as &dyn VariantClassifier),
            rsids: &self.ensembl,
            assistant: self.groq.as_ref().map(|a| a as &dyn Assistant),
            diseases,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_defaults_without_key() {
        let clients = ServicesBuilder::new().finish().unwrap();
        assert!(clients.has_alternative());
        assert!(!clients.has_assistant());
    }

    #[rstest]
    fn test_config_switches() {
        let mut config = DxvarConfig::default();
        config.endpoints.intervar_enabled = false;
        config.assistant.api_key = Some("key".to_string());

        let clients = ServiceClients::builder()
            .with_config(config)
            .finish()
            .unwrap();
        assert!(!clients.has_alternative());
        assert!(clients.has_assistant());

        let table = GeneDiseaseTable::empty();
        let services = clients.services(&table);
        assert_eq!(services.primary.name(), "GeneBe");
        assert!(services.alternative.is_none());
    }

    #[rstest]
    fn test_builder_overrides() {
        let mut config = DxvarConfig::default();
        config.assistant.api_key = Some("key".to_string());

        let clients = ServicesBuilder::new()
            .with_config(config)
            .without_alternative()
            .without_assistant()
            .finish()
            .unwrap();
        assert!(!clients.has_alternative());
        assert!(!clients.has_assistant());
    }
}
