
use serde::{Deserialize, Serialize};

/// Metabolizer phenotype derived from a diplotype
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, strum_macros::Display, strum_macros::EnumString)]
pub enum Phenotype {
    /// Poor metabolizer
    PM,
    /// Intermediate metabolizer
    IM,
    /// Normal metabolizer
    NM,
    /// Rapid metabolizer
    RM,
    /// Ultrarapid metabolizer
    URM,
    #[default]
    Unknown
}

/// Functional classification of a single star allele.
/// Variants are declared in the lexicographic order of their labels; phenotype lookups
/// sort each allele pair on this order before matching.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, strum_macros::Display)]
pub enum AlleleFunction {
    #[strum(to_string = "decreased")]
    Decreased,
    #[strum(to_string = "increased")]
    Increased,
    #[strum(to_string = "no_function")]
    NoFunction,
    #[strum(to_string = "normal")]
    Normal
}

/// Predicted risk category for a (drug, phenotype) pair
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, strum_macros::Display)]
pub enum RiskLabel {
    Safe,
    #[serde(rename = "Adjust Dosage")]
    #[strum(to_string = "Adjust Dosage")]
    AdjustDosage,
    Toxic,
    Ineffective,
    #[default]
    Unknown
}

/// Clinical severity of the predicted drug response
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    #[default]
    None,
    Low,
    Moderate,
    High,
    Critical
}

/// The drugs with an entry in the decision table
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, strum_macros::Display, strum_macros::EnumIter, strum_macros::EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(ascii_case_insensitive, serialize_all = "UPPERCASE")]
pub enum SupportedDrug {
    Codeine,
    Warfarin,
    Clopidogrel,
    Simvastatin,
    Azathioprine,
    Fluorouracil
}

/// The pharmacogenes recognized in VCF annotations.
/// Parsing is exact-case: GENE tags must use the canonical uppercase symbol.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, strum_macros::Display, strum_macros::EnumIter, strum_macros::EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum SupportedGene {
    Cyp2d6,
    Cyp2c19,
    Cyp2c9,
    Slco1b1,
    Tpmt,
    Dpyd
}
