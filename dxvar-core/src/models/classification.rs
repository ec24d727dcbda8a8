use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::severity::{Category, classify_severity};

/// Placeholder shown for any field an upstream service did not report.
pub const NOT_AVAILABLE: &str = "Not Available";

///
/// ACMG score as reported upstream; some services send points, some send text.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassificationScore {
    Numeric(f64),
    Text(String),
}

impl Display for ClassificationScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassificationScore::Numeric(value) => write!(f, "{}", value),
            ClassificationScore::Text(value) => write!(f, "{}", value),
        }
    }
}

///
/// Result of one variant classification service. Every field is optional;
/// a failed lookup degrades to [`Classification::default`].
///
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub acmg_classification: Option<String>,
    pub effect: Option<String>,
    pub gene_symbol: Option<String>,
    pub hgnc_id: Option<String>,
    pub dbsnp: Option<String>,
    pub population_frequency: Option<f64>,
    pub acmg_score: Option<ClassificationScore>,
    pub acmg_criteria: Option<String>,
}

impl Classification {
    pub fn category(&self) -> Category {
        classify_severity(self.acmg_classification.as_deref().unwrap_or_default())
    }

    pub fn label(&self) -> &str {
        self.acmg_classification.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    /// Display rows in a fixed order, missing values replaced by [`NOT_AVAILABLE`].
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        fn or_placeholder<T: ToString>(value: Option<&T>) -> String {
            value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string())
        }

        vec![
            ("ACMG Classification", self.label().to_string()),
            ("Effect", or_placeholder(self.effect.as_ref())),
            ("Gene Symbol", or_placeholder(self.gene_symbol.as_ref())),
            ("HGNC ID", or_placeholder(self.hgnc_id.as_ref())),
            ("dbSNP", or_placeholder(self.dbsnp.as_ref())),
            (
                "Frequency in Population",
                or_placeholder(self.population_frequency.as_ref()),
            ),
            ("ACMG Score", or_placeholder(self.acmg_score.as_ref())),
            ("ACMG Criteria", or_placeholder(self.acmg_criteria.as_ref())),
        ]
    }
}

///
/// One row of the gene-disease association table.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiseaseAssociation {
    pub gene_symbol: String,
    pub hgnc_id: String,
    pub disease_label: String,
    pub inheritance: String,
    pub classification: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_default_classification_is_placeholder() {
        let classification = Classification::default();
        assert_eq!(classification.category(), Category::Unknown);
        assert!(
            classification
                .fields()
                .iter()
                .all(|(_, value)| value == NOT_AVAILABLE)
        );
    }

    #[rstest]
    fn test_fields_render_present_values() {
        let classification = Classification {
            acmg_classification: Some("Likely_pathogenic".to_string()),
            population_frequency: Some(0.0012),
            acmg_score: Some(ClassificationScore::Numeric(8.0)),
            ..Default::default()
        };
        let fields = classification.fields();

        assert_eq!(fields[0], ("ACMG Classification", "Likely_pathogenic".to_string()));
        assert_eq!(fields[5], ("Frequency in Population", "0.0012".to_string()));
        assert_eq!(fields[6], ("ACMG Score", "8".to_string()));
        assert_eq!(classification.category(), Category::Severe);
    }

    #[rstest]
    fn test_score_deserializes_number_or_text() {
        let numeric: ClassificationScore = serde_json::from_str("5").unwrap();
        let text: ClassificationScore = serde_json::from_str("\"PM2,PP3\"").unwrap();
        assert_eq!(numeric, ClassificationScore::Numeric(5.0));
        assert_eq!(text, ClassificationScore::Text("PM2,PP3".to_string()));
    }
}
