
use crate::data_types::pharma_result::PharmaResult;
use crate::database::guidelines::GUIDELINE_SOURCE;
use crate::evidence::UNKNOWN_DIPLOTYPE;

/// Violations that fail the final output check.
/// Any of these is fatal for the run: results that do not pass must not be persisted
/// or displayed.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SchemaError {
    #[error("result {index} is missing required field {field}")]
    MissingField { index: usize, field: &'static str },
    #[error("result {index} has confidence score {score} outside [0, 1]")]
    ConfidenceOutOfRange { index: usize, score: f64 },
    #[error("result {index} has confidence score {score} with more than two decimal places")]
    ConfidencePrecision { index: usize, score: f64 },
    #[error("result {index} has malformed diplotype {diplotype:?}")]
    MalformedDiplotype { index: usize, diplotype: String },
    #[error("result {index} has guideline source {actual_source:?}, expected \"CPIC\"")]
    GuidelineSourceMismatch { index: usize, actual_source: String }
}

/// Checks the constraints the type system cannot enforce on a result array.
/// The enum-valued fields (risk label, severity, phenotype) are correct by construction;
/// this validates the remaining string and numeric invariants.
/// # Arguments
/// * `results` - the full result array of one analysis run
/// # Errors
/// * on the first violated constraint, identifying the offending result
pub fn validate_results(results: &[PharmaResult]) -> Result<(), SchemaError> {
    for (index, result) in results.iter().enumerate() {
        if result.patient_id.is_empty() {
            return Err(SchemaError::MissingField { index, field: "patient_id" });
        }
        if result.drug.is_empty() {
            return Err(SchemaError::MissingField { index, field: "drug" });
        }
        if result.timestamp.is_empty() {
            return Err(SchemaError::MissingField { index, field: "timestamp" });
        }

        let score = result.risk_assessment.confidence_score;
        if !(0.0..=1.0).contains(&score) {
            return Err(SchemaError::ConfidenceOutOfRange { index, score });
        }
        if (score * 100.0 - (score * 100.0).round()).abs() > 1e-6 {
            return Err(SchemaError::ConfidencePrecision { index, score });
        }

        let diplotype = &result.pharmacogenomic_profile.diplotype;
        if diplotype != UNKNOWN_DIPLOTYPE {
            let alleles: Vec<&str> = diplotype.split('/').collect();
            if alleles.len() != 2 || alleles.iter().any(|a| a.is_empty()) {
                return Err(SchemaError::MalformedDiplotype { index, diplotype: diplotype.clone() });
            }
        }

        if result.clinical_recommendation.guideline_source != GUIDELINE_SOURCE {
            return Err(SchemaError::GuidelineSourceMismatch {
                index,
                actual_source: result.clinical_recommendation.guideline_source.clone()
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze_variants;
    use crate::data_types::classifications::SupportedDrug;
    use crate::parser::parse_vcf;

    fn analyzed_results() -> Vec<PharmaResult> {
        let content = [
            "##fileformat=VCFv4.2",
            "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tPATIENT_001",
            "chr22\t42128945\trs3892097\tC\tT\t100\tPASS\tGENE=CYP2D6;STAR=*4;RS=rs3892097\tGT\t0/1",
            "chr1\t1000\t.\tA\tG\t100\tPASS\t.\tGT\t0/1"
        ].join("\n");
        let parsed = parse_vcf(&content, "test.vcf", content.len() as u64);
        analyze_variants(
            &parsed.variants,
            &[SupportedDrug::Codeine, SupportedDrug::Fluorouracil],
            &parsed.validation.patient_id,
            parsed.file_size_mb
        )
    }

    #[test]
    fn test_orchestrator_output_passes() {
        let results = analyzed_results();
        assert!(validate_results(&results).is_ok());
        // an empty run is trivially valid
        assert!(validate_results(&[]).is_ok());
    }

    #[test]
    fn test_out_of_range_confidence_rejected() {
        let mut results = analyzed_results();
        results[1].risk_assessment.confidence_score = 1.5;
        assert_eq!(
            validate_results(&results),
            Err(SchemaError::ConfidenceOutOfRange { index: 1, score: 1.5 })
        );
    }

    #[test]
    fn test_unrounded_confidence_rejected() {
        let mut results = analyzed_results();
        results[0].risk_assessment.confidence_score = 0.8512;
        assert!(matches!(
            validate_results(&results),
            Err(SchemaError::ConfidencePrecision { index: 0, .. })
        ));
    }

    #[test]
    fn test_malformed_diplotype_rejected() {
        let mut results = analyzed_results();
        results[0].pharmacogenomic_profile.diplotype = "*1/*2/*3".to_string();
        assert!(matches!(
            validate_results(&results),
            Err(SchemaError::MalformedDiplotype { index: 0, .. })
        ));

        results[0].pharmacogenomic_profile.diplotype = "*4/".to_string();
        assert!(matches!(
            validate_results(&results),
            Err(SchemaError::MalformedDiplotype { index: 0, .. })
        ));
    }

    #[test]
    fn test_guideline_source_must_be_cpic() {
        let mut results = analyzed_results();
        results[0].clinical_recommendation.guideline_source = "FDA".to_string();
        assert!(matches!(
            validate_results(&results),
            Err(SchemaError::GuidelineSourceMismatch { index: 0, .. })
        ));
    }

    #[test]
    fn test_missing_fields_rejected() {
        let mut results = analyzed_results();
        results[0].patient_id = String::new();
        assert_eq!(
            validate_results(&results),
            Err(SchemaError::MissingField { index: 0, field: "patient_id" })
        );
    }
}
