pub mod classification;
pub mod variant;

// re-export for cleaner imports
pub use self::classification::{
    Classification, ClassificationScore, DiseaseAssociation, NOT_AVAILABLE,
};
pub use self::variant::{AlleleCandidate, GenomeBuild, RsId, VariantRecord};
