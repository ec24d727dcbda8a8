//! Mapping from ACMG classification labels to display categories.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// Display treatment for a classification label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Severe,
    Uncertain,
    Mild,
    Benign,
    Unknown,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Severe => "severe",
            Category::Uncertain => "uncertain",
            Category::Mild => "mild",
            Category::Benign => "benign",
            Category::Unknown => "unknown",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

///
/// Map a classification label to its display [`Category`].
///
/// Total over every input. Labels compare case-insensitively with spaces read
/// as underscores, so `Likely pathogenic` and `Likely_pathogenic` agree.
///
pub fn classify_severity(label: &str) -> Category {
    let normalized = label.trim().replace(' ', "_").to_ascii_lowercase();
    match normalized.as_str() {
        "pathogenic" | "likely_pathogenic" => Category::Severe,
        "uncertain_significance" => Category::Uncertain,
        "likely_benign" => Category::Mild,
        "benign" => Category::Benign,
        _ => Category::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("Pathogenic", Category::Severe)]
    #[case("Likely_pathogenic", Category::Severe)]
    #[case("Uncertain_significance", Category::Uncertain)]
    #[case("Likely_benign", Category::Mild)]
    #[case("Benign", Category::Benign)]
    #[case("Likely pathogenic", Category::Severe)]
    #[case("uncertain significance", Category::Uncertain)]
    #[case(" Benign ", Category::Benign)]
    fn test_known_labels(#[case] label: &str, #[case] expected: Category) {
        assert_eq!(classify_severity(label), expected);
    }

    #[rstest]
    #[case("")]
    #[case("Not Available")]
    #[case("Conflicting_interpretations")]
    #[case("Pathogenic/Likely_pathogenic")]
    #[case("ÄÖÜ")]
    fn test_unrecognized_labels_are_unknown(#[case] label: &str) {
        assert_eq!(classify_severity(label), Category::Unknown);
    }
}
