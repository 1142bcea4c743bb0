
use chrono::{SecondsFormat, Utc};

use crate::data_types::classifications::{Phenotype, SupportedDrug, SupportedGene};
use crate::data_types::pharma_result::{
    ClinicalRecommendation, DetectedVariant, PharmaResult, PharmacogenomicProfile, QualityMetrics,
    RiskAssessment
};
use crate::data_types::variant::ParsedVariant;
use crate::database::drug_rules::drug_decision;
use crate::database::guidelines::{guideline_links, primary_gene, GUIDELINE_SOURCE};
use crate::evidence::{build_gene_evidence, GeneEvidence, UNKNOWN_DIPLOTYPE};
use crate::explain::generate_explanation;

/// Confidence when the drug's primary gene was not observed at all
const NO_EVIDENCE_CONFIDENCE: f64 = 0.15;
/// Confidence cap when a gene was observed but no diplotype could be resolved
const UNKNOWN_DIPLOTYPE_CONFIDENCE_CAP: f64 = 0.35;
/// Confidence cap when a diplotype resolved but the phenotype did not
const UNKNOWN_PHENOTYPE_CONFIDENCE_CAP: f64 = 0.30;
/// At most this many per-variant annotation descriptions land in the quality metrics
const MAX_MISSING_TAG_METRICS: usize = 10;

/// Runs the per-drug analysis pipeline over a parsed variant set.
/// This never fails on malformed domain input: every unresolvable branch degrades to
/// Unknown values with reduced confidence. All results of one call share one timestamp.
/// # Arguments
/// * `variants` - the full ordered list of parsed variants
/// * `drugs` - the drugs to assess
/// * `patient_id` - the patient identifier carried into every result
/// * `file_size_mb` - input size reported in the quality metrics
pub fn analyze_variants(
    variants: &[ParsedVariant], drugs: &[SupportedDrug], patient_id: &str, file_size_mb: f64
) -> Vec<PharmaResult> {
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let gene_evidence = build_gene_evidence(variants);

    // quality metrics are computed once and shared by every per-drug result
    let variants_with_required_tags = variants.iter().filter(|v| v.has_required_tags()).count();
    let genes_covered: Vec<String> = gene_evidence.keys().map(|g| g.to_string()).collect();
    let missing_required_tags: Vec<String> = variants.iter().enumerate()
        .filter_map(|(i, v)| {
            let missing = v.missing_tags();
            if missing.is_empty() {
                None
            } else {
                Some(format!("Line {}: missing {}", i + 1, missing.join(", ")))
            }
        })
        .take(MAX_MISSING_TAG_METRICS)
        .collect();
    let any_star_missing = variants.iter().any(|v| v.star.is_none());

    drugs.iter()
        .map(|&drug| {
            let gene = primary_gene(drug);
            let evidence = gene_evidence.get(&gene);
            analyze_drug(
                drug, gene, evidence, variants, patient_id, &timestamp, file_size_mb,
                variants_with_required_tags, &genes_covered, &missing_required_tags, any_star_missing
            )
        })
        .collect()
}

/// Assembles the result for a single drug
#[allow(clippy::too_many_arguments)]
fn analyze_drug(
    drug: SupportedDrug, gene: SupportedGene, evidence: Option<&GeneEvidence>,
    variants: &[ParsedVariant], patient_id: &str, timestamp: &str, file_size_mb: f64,
    variants_with_required_tags: usize, genes_covered: &[String], missing_required_tags: &[String],
    any_star_missing: bool
) -> PharmaResult {
    let phenotype = evidence.map(|e| e.phenotype()).unwrap_or(Phenotype::Unknown);
    let decision = drug_decision(drug, phenotype);

    let detected_variants: Vec<DetectedVariant> = evidence
        .map(|e| e.variants())
        .unwrap_or(&[])
        .iter()
        .map(|v| DetectedVariant {
            rsid: v.rsid.clone().unwrap_or_else(|| format!("pos:{}:{}", v.chrom, v.pos)),
            gene: v.gene.clone().unwrap_or_else(|| "Unknown".to_string()),
            star: v.star.clone().unwrap_or_else(|| "unknown".to_string()),
            genotype: v.genotype.clone(),
            chrom: v.chrom.clone(),
            pos: v.pos,
            ref_allele: v.ref_allele.clone(),
            alt_allele: v.alt_allele.clone()
        })
        .collect();

    // weak evidence clamps the decision's base confidence downward
    let confidence = match evidence {
        None => NO_EVIDENCE_CONFIDENCE,
        Some(e) if e.diplotype() == UNKNOWN_DIPLOTYPE => {
            decision.confidence_base.min(UNKNOWN_DIPLOTYPE_CONFIDENCE_CAP)
        },
        Some(e) if e.phenotype() == Phenotype::Unknown => {
            decision.confidence_base.min(UNKNOWN_PHENOTYPE_CONFIDENCE_CAP)
        },
        Some(_) => decision.confidence_base
    };
    let confidence_score = (confidence * 100.0).round() / 100.0;

    let explanation = generate_explanation(drug, evidence, decision, &detected_variants);

    let mut notes = String::new();
    if any_star_missing {
        notes.push_str("Some variants missing STAR; phenotype confidence reduced. ");
    }
    match evidence {
        Some(e) => notes.push_str(&format!(
            "Primary gene {} detected with {} variant(s). Diplotype: {}, Phenotype: {}.",
            gene, e.variants().len(), e.diplotype(), e.phenotype()
        )),
        None => notes.push_str(&format!(
            "Primary gene {gene} not detected in VCF data. Risk assessment based on insufficient data."
        ))
    }

    PharmaResult {
        patient_id: patient_id.to_string(),
        drug: drug.to_string(),
        timestamp: timestamp.to_string(),
        risk_assessment: RiskAssessment {
            risk_label: decision.risk_label,
            confidence_score,
            severity: decision.severity
        },
        pharmacogenomic_profile: PharmacogenomicProfile {
            primary_gene: gene.to_string(),
            diplotype: evidence.map(|e| e.diplotype().to_string())
                .unwrap_or_else(|| UNKNOWN_DIPLOTYPE.to_string()),
            phenotype,
            detected_variants
        },
        clinical_recommendation: ClinicalRecommendation {
            recommendation: decision.recommendation.to_string(),
            dose_guidance: decision.dose_guidance.to_string(),
            alternative_drugs: decision.alternative_drugs.iter().map(|d| d.to_string()).collect(),
            guideline_source: GUIDELINE_SOURCE.to_string(),
            guideline_links: guideline_links(drug).iter().map(|l| l.to_string()).collect()
        },
        llm_generated_explanation: explanation,
        quality_metrics: QualityMetrics {
            vcf_parsing_success: true,
            file_size_mb,
            variants_total: variants.len(),
            variants_with_required_tags,
            genes_covered: genes_covered.to_vec(),
            missing_required_tags: missing_required_tags.to_vec(),
            notes
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::classifications::{RiskLabel, Severity};
    use crate::parser::parse_vcf;
    use assert_approx_eq::assert_approx_eq;

    fn vcf_with_lines(data_lines: &[&str]) -> String {
        let mut lines = vec![
            "##fileformat=VCFv4.2".to_string(),
            "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tPATIENT_001".to_string()
        ];
        lines.extend(data_lines.iter().map(|l| l.to_string()));
        lines.join("\n")
    }

    fn analyze_lines(data_lines: &[&str], drugs: &[SupportedDrug]) -> Vec<PharmaResult> {
        let content = vcf_with_lines(data_lines);
        let parsed = parse_vcf(&content, "test.vcf", content.len() as u64);
        assert!(parsed.validation.valid);
        analyze_variants(&parsed.variants, drugs, &parsed.validation.patient_id, parsed.file_size_mb)
    }

    #[test]
    fn test_heterozygous_no_function_codeine() {
        // a single heterozygous *4 resolves to *1/*4, an intermediate metabolizer
        let results = analyze_lines(
            &["chr22\t42128945\trs3892097\tC\tT\t100\tPASS\tGENE=CYP2D6;STAR=*4;RS=rs3892097\tGT\t0/1"],
            &[SupportedDrug::Codeine]
        );
        assert_eq!(results.len(), 1);
        let result = &results[0];

        assert_eq!(result.patient_id, "PATIENT_001");
        assert_eq!(result.drug, "CODEINE");
        assert_eq!(result.pharmacogenomic_profile.primary_gene, "CYP2D6");
        assert_eq!(result.pharmacogenomic_profile.diplotype, "*1/*4");
        assert_eq!(result.pharmacogenomic_profile.phenotype, Phenotype::IM);
        assert_eq!(result.risk_assessment.risk_label, RiskLabel::Ineffective);
        assert_eq!(result.risk_assessment.severity, Severity::Moderate);
        assert_approx_eq!(result.risk_assessment.confidence_score, 0.85, 1e-9);

        let detected = &result.pharmacogenomic_profile.detected_variants;
        assert_eq!(detected.len(), 1);
        assert_eq!(detected[0].rsid, "rs3892097");
        assert_eq!(detected[0].star, "*4");
    }

    #[test]
    fn test_homozygous_no_function_codeine() {
        let results = analyze_lines(
            &["chr22\t42128945\trs3892097\tC\tT\t100\tPASS\tGENE=CYP2D6;STAR=*4;RS=rs3892097\tGT\t1/1"],
            &[SupportedDrug::Codeine]
        );
        let result = &results[0];
        assert_eq!(result.pharmacogenomic_profile.diplotype, "*4/*4");
        assert_eq!(result.pharmacogenomic_profile.phenotype, Phenotype::PM);
        assert_eq!(result.risk_assessment.risk_label, RiskLabel::Ineffective);
        assert_eq!(result.risk_assessment.severity, Severity::High);
    }

    #[test]
    fn test_duplication_override_codeine_toxicity() {
        let results = analyze_lines(
            &["chr22\t42126611\trs16947\tG\tA\t100\tPASS\tGENE=CYP2D6;STAR=*1/*2;RS=rs16947;DUP=yes\tGT\t0/1"],
            &[SupportedDrug::Codeine]
        );
        let result = &results[0];
        assert_eq!(result.pharmacogenomic_profile.phenotype, Phenotype::URM);
        assert_eq!(result.risk_assessment.risk_label, RiskLabel::Toxic);
        assert_eq!(result.risk_assessment.severity, Severity::Critical);
    }

    #[test]
    fn test_absent_gene_fluorouracil() {
        let results = analyze_lines(
            &["chr22\t42128945\trs3892097\tC\tT\t100\tPASS\tGENE=CYP2D6;STAR=*4;RS=rs3892097\tGT\t0/1"],
            &[SupportedDrug::Fluorouracil]
        );
        let result = &results[0];
        assert_eq!(result.pharmacogenomic_profile.diplotype, "Unknown");
        assert_eq!(result.pharmacogenomic_profile.phenotype, Phenotype::Unknown);
        assert_eq!(result.risk_assessment.risk_label, RiskLabel::Unknown);
        assert_approx_eq!(result.risk_assessment.confidence_score, 0.15, 1e-9);
        assert!(result.pharmacogenomic_profile.detected_variants.is_empty());
        assert!(result.quality_metrics.notes.contains("Primary gene DPYD not detected"));
    }

    #[test]
    fn test_unknown_diplotype_confidence_cap() {
        // gene observed without any STAR annotation
        let results = analyze_lines(
            &["chr22\t42128945\trs3892097\tC\tT\t100\tPASS\tGENE=CYP2D6;RS=rs3892097\tGT\t0/1"],
            &[SupportedDrug::Codeine]
        );
        let result = &results[0];
        assert_eq!(result.pharmacogenomic_profile.diplotype, "Unknown");
        assert!(result.risk_assessment.confidence_score <= 0.35);
        assert!(result.quality_metrics.notes.starts_with("Some variants missing STAR"));
    }

    #[test]
    fn test_confidence_always_in_range() {
        let lines = [
            "chr22\t42128945\trs3892097\tC\tT\t100\tPASS\tGENE=CYP2D6;STAR=*4;RS=rs3892097\tGT\t1/1",
            "chr10\t96541616\trs4244285\tG\tA\t100\tPASS\tGENE=CYP2C19;STAR=*2;RS=rs4244285\tGT\t0/1",
            "chr1\t97915614\trs3918290\tC\tT\t100\tPASS\tGENE=DPYD;STAR=*2A;RS=rs3918290\tGT\t1/1"
        ];
        let all_drugs = [
            SupportedDrug::Codeine, SupportedDrug::Warfarin, SupportedDrug::Clopidogrel,
            SupportedDrug::Simvastatin, SupportedDrug::Azathioprine, SupportedDrug::Fluorouracil
        ];
        let results = analyze_lines(&lines, &all_drugs);
        assert_eq!(results.len(), 6);
        for result in results.iter() {
            let score = result.risk_assessment.confidence_score;
            assert!((0.0..=1.0).contains(&score), "confidence {score} out of range");
            // two-decimal rounding
            assert_approx_eq!(score * 100.0, (score * 100.0).round(), 1e-9);
        }
    }

    #[test]
    fn test_results_are_deterministic_apart_from_timestamp() {
        let lines = [
            "chr22\t42128945\trs3892097\tC\tT\t100\tPASS\tGENE=CYP2D6;STAR=*4;RS=rs3892097\tGT\t0/1",
            "chr1\t1000\t.\tA\tG\t100\tPASS\t.\tGT\t0/1"
        ];
        let drugs = [SupportedDrug::Codeine, SupportedDrug::Warfarin];
        let mut first = analyze_lines(&lines, &drugs);
        let mut second = analyze_lines(&lines, &drugs);
        for result in first.iter_mut().chain(second.iter_mut()) {
            result.timestamp = String::new();
        }
        assert_eq!(first, second);

        // the timestamp is shared across all results of one run
        let results = analyze_lines(&lines, &drugs);
        assert_eq!(results[0].timestamp, results[1].timestamp);
    }

    #[test]
    fn test_quality_metrics() {
        let lines = [
            "chr22\t42128945\trs3892097\tC\tT\t100\tPASS\tGENE=CYP2D6;STAR=*4;RS=rs3892097\tGT\t0/1",
            "chr10\t96541616\trs4244285\tG\tA\t100\tPASS\tGENE=CYP2C19;STAR=*2;RS=rs4244285\tGT\t0/1",
            "chr1\t1000\t.\tA\tG\t100\tPASS\t.\tGT\t0/1"
        ];
        let results = analyze_lines(&lines, &[SupportedDrug::Codeine]);
        let metrics = &results[0].quality_metrics;

        assert!(metrics.vcf_parsing_success);
        assert_eq!(metrics.variants_total, 3);
        assert_eq!(metrics.variants_with_required_tags, 2);
        assert_eq!(metrics.genes_covered, vec!["CYP2D6", "CYP2C19"]);
        assert_eq!(metrics.missing_required_tags, vec!["Line 3: missing GENE, STAR, RS"]);
        assert!(metrics.notes.contains("Primary gene CYP2D6 detected with 1 variant(s)"));
        assert!(metrics.notes.contains("Diplotype: *1/*4, Phenotype: IM"));
    }

    #[test]
    fn test_missing_tag_metrics_are_capped_at_ten() {
        let mut lines: Vec<String> = vec![];
        for i in 0..12 {
            lines.push(format!("chr1\t{}\t.\tA\tG\t100\tPASS\t.\tGT\t0/1", 1000 + i));
        }
        let line_refs: Vec<&str> = lines.iter().map(|s| s.as_str()).collect();
        let results = analyze_lines(&line_refs, &[SupportedDrug::Codeine]);
        assert_eq!(results[0].quality_metrics.missing_required_tags.len(), 10);
    }

    #[test]
    fn test_rsid_placeholder_for_unannotated_variants() {
        let results = analyze_lines(
            &["chr22\t42128945\t.\tC\tT\t100\tPASS\tGENE=CYP2D6;STAR=*4\tGT\t0/1"],
            &[SupportedDrug::Codeine]
        );
        let detected = &results[0].pharmacogenomic_profile.detected_variants;
        assert_eq!(detected[0].rsid, "pos:chr22:42128945");
    }

    #[test]
    fn test_timestamp_format() {
        let results = analyze_lines(
            &["chr22\t42128945\trs3892097\tC\tT\t100\tPASS\tGENE=CYP2D6;STAR=*4;RS=rs3892097\tGT\t0/1"],
            &[SupportedDrug::Codeine]
        );
        let timestamp = &results[0].timestamp;
        assert!(timestamp.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    }
}
