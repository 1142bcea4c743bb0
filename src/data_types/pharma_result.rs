
use serde::{Deserialize, Serialize};

use crate::data_types::classifications::{Phenotype, RiskLabel, Severity};

/// A variant that contributed evidence toward a drug's primary gene
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct DetectedVariant {
    /// dbSNP identifier, or a "pos:{chrom}:{pos}" placeholder when none resolved
    pub rsid: String,
    /// gene symbol, "Unknown" when the annotation was absent
    pub gene: String,
    /// star allele designation, "unknown" when the annotation was absent
    pub star: String,
    /// genotype string from the sample column
    pub genotype: String,
    /// chromosome of the variant
    pub chrom: String,
    /// 1-based position of the variant
    pub pos: u64,
    /// ref allele
    #[serde(rename = "ref")]
    pub ref_allele: String,
    /// alt allele
    #[serde(rename = "alt")]
    pub alt_allele: String
}

/// Risk classification block of a result
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub risk_label: RiskLabel,
    /// in [0, 1], rounded to 2 decimals
    pub confidence_score: f64,
    pub severity: Severity
}

/// Genotype evidence block of a result
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct PharmacogenomicProfile {
    /// the gene the drug's metabolism primarily depends on
    pub primary_gene: String,
    /// two "/"-joined star alleles, or "Unknown"
    pub diplotype: String,
    pub phenotype: Phenotype,
    pub detected_variants: Vec<DetectedVariant>
}

/// Guidance block of a result, sourced from the decision table
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ClinicalRecommendation {
    pub recommendation: String,
    pub dose_guidance: String,
    pub alternative_drugs: Vec<String>,
    /// always the literal "CPIC"
    pub guideline_source: String,
    pub guideline_links: Vec<String>
}

/// Templated narrative block of a result
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct GeneratedExplanation {
    pub summary: String,
    pub mechanism: String,
    /// "rsid (gene star)" strings, one per detected variant
    pub variant_citations: Vec<String>,
    pub what_this_means_for_patient: String,
    pub limitations: String
}

/// Parse quality block, shared by every result of one analysis run
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct QualityMetrics {
    pub vcf_parsing_success: bool,
    pub file_size_mb: f64,
    pub variants_total: usize,
    pub variants_with_required_tags: usize,
    pub genes_covered: Vec<String>,
    /// first 10 per-variant missing annotation descriptions
    pub missing_required_tags: Vec<String>,
    pub notes: String
}

/// Intended to be serialized to JSON as the final result, one per (patient run, drug)
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct PharmaResult {
    pub patient_id: String,
    pub drug: String,
    /// RFC 3339 UTC timestamp, shared across all results of one run
    pub timestamp: String,
    pub risk_assessment: RiskAssessment,
    pub pharmacogenomic_profile: PharmacogenomicProfile,
    pub clinical_recommendation: ClinicalRecommendation,
    pub llm_generated_explanation: GeneratedExplanation,
    pub quality_metrics: QualityMetrics
}
