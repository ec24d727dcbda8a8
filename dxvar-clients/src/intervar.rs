use std::collections::HashMap;

use log::debug;
use serde::Deserialize;
use serde_json::Value;

use dxvar_core::errors::UpstreamError;
use dxvar_core::models::{Classification, VariantRecord};
use dxvar_core::services::VariantClassifier;

use super::consts::INTERVAR_SERVICE;
use super::http::HttpClient;
use super::utils::join_url;

const QUERY_PATH: &str = "api_new.php";

/// ACMG evidence codes in the order they are reported.
const EVIDENCE_CODES: [&str; 28] = [
    "PVS1", "PS1", "PS2", "PS3", "PS4", "PM1", "PM2", "PM3", "PM4", "PM5", "PM6", "PP1", "PP2",
    "PP3", "PP4", "PP5", "BA1", "BS1", "BS2", "BS3", "BS4", "BP1", "BP2", "BP3", "BP4", "BP5",
    "BP6", "BP7",
];

#[derive(Debug, Deserialize)]
struct InterVarResponse {
    #[serde(rename = "Intervar")]
    intervar: Option<String>,
    #[serde(rename = "Gene")]
    gene: Option<String>,
    #[serde(flatten)]
    evidence: HashMap<String, Value>,
}

fn is_set(flag: &Value) -> bool {
    match flag {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => s.trim().parse::<f64>().is_ok_and(|v| v != 0.0),
        Value::Array(items) => items.iter().any(is_set),
        _ => false,
    }
}

///
/// Decode an InterVar position query into a classification.
///
/// Criteria are the evidence codes whose flag is set, comma separated. A
/// response without a label or any evidence is treated as malformed.
///
pub fn decode_classification(body: &str) -> Result<Classification, UpstreamError> {
    let response: InterVarResponse = serde_json::from_str(body)
        .map_err(|e| UpstreamError::malformed(INTERVAR_SERVICE, e.to_string()))?;

    let has_evidence = EVIDENCE_CODES
        .iter()
        .any(|code| response.evidence.contains_key(*code));
    let label = response.intervar.filter(|l| !l.trim().is_empty());
    if label.is_none() && !has_evidence {
        return Err(UpstreamError::malformed(
            INTERVAR_SERVICE,
            "no classification in response",
        ));
    }

    let criteria: Vec<&str> = EVIDENCE_CODES
        .iter()
        .copied()
        .filter(|code| response.evidence.get(*code).is_some_and(is_set))
        .collect();

    Ok(Classification {
        acmg_classification: label.map(|l| l.trim().to_string()),
        gene_symbol: response.gene.filter(|g| !g.trim().is_empty() && g != "."),
        acmg_criteria: (!criteria.is_empty()).then(|| criteria.join(",")),
        ..Default::default()
    })
}

/// Alternative ACMG classification from the InterVar web API.
#[derive(Debug, Clone)]
pub struct InterVarClient {
    http: HttpClient,
    api: String,
}

impl InterVarClient {
    pub fn new(http: HttpClient, api: impl Into<String>) -> Self {
        InterVarClient {
            http,
            api: api.into(),
        }
    }
}

impl VariantClassifier for InterVarClient {
    fn name(&self) -> &str {
        INTERVAR_SERVICE
    }

    fn classify(&self, variant: &VariantRecord) -> Result<Classification, UpstreamError> {
        let url = join_url(&self.api, QUERY_PATH);
        debug!("InterVar lookup for {}", variant.to_csv());

        let allele = |a: &str| if a.is_empty() { "-".to_string() } else { a.to_string() };
        let query = [
            ("queryType", "position".to_string()),
            ("chr", variant.chromosome.clone()),
            ("pos", variant.position.to_string()),
            ("ref", allele(&variant.ref_allele)),
            ("alt", allele(&variant.alt_allele)),
            ("build", variant.genome_build.as_str().to_string()),
        ];
        let response = self
            .http
            .get(INTERVAR_SERVICE, &url, &query)?
            .error_for_status(INTERVAR_SERVICE)?;

        decode_classification(&response.body)
    }
}
