
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::data_types::classifications::SupportedDrug;

/// Output of the keyword scan over free text
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DrugDetection {
    /// supported drug names found in the text, in catalog order
    pub supported_drugs: Vec<String>,
    /// reserved for drugs recognized but not analyzable; always empty for the keyword scan
    pub other_drugs: Vec<String>,
    /// crude confidence in the detection
    pub confidence: f64,
    pub notes: String
}

/// Scans free text for the supported drug names, case-insensitively.
/// This is the deterministic local fallback for medication detection; it does not try
/// to recognize brand names or misspellings.
/// # Arguments
/// * `input` - arbitrary text, e.g. a prescription note
pub fn detect_drugs(input: &str) -> DrugDetection {
    let text = input.to_uppercase();
    let supported_drugs: Vec<String> = SupportedDrug::iter()
        .map(|d| d.to_string())
        .filter(|name| text.contains(name.as_str()))
        .collect();

    let confidence = if supported_drugs.is_empty() { 0.2 } else { 0.6 };
    DrugDetection {
        supported_drugs,
        other_drugs: vec![],
        confidence,
        notes: "Keyword match fallback".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_case_insensitively() {
        let detection = detect_drugs("Patient is on codeine and Warfarin daily.");
        assert_eq!(detection.supported_drugs, vec!["CODEINE", "WARFARIN"]);
        assert_eq!(detection.confidence, 0.6);
        assert_eq!(detection.notes, "Keyword match fallback");
    }

    #[test]
    fn test_no_hits_lowers_confidence() {
        let detection = detect_drugs("Patient takes ibuprofen as needed.");
        assert!(detection.supported_drugs.is_empty());
        assert!(detection.other_drugs.is_empty());
        assert_eq!(detection.confidence, 0.2);
    }

    #[test]
    fn test_results_follow_catalog_order() {
        let detection = detect_drugs("fluorouracil before CLOPIDOGREL");
        assert_eq!(detection.supported_drugs, vec!["CLOPIDOGREL", "FLUOROURACIL"]);
    }
}
