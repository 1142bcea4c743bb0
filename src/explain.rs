
use crate::data_types::classifications::{Phenotype, RiskLabel, SupportedDrug};
use crate::data_types::pharma_result::{DetectedVariant, GeneratedExplanation};
use crate::database::drug_rules::DrugDecision;
use crate::evidence::GeneEvidence;

/// Fills the narrative block of a result from fixed per-drug templates.
/// When no usable evidence exists, a generic insufficient-data narrative is produced
/// instead of the drug-specific mechanism text.
/// # Arguments
/// * `drug` - the drug under analysis
/// * `evidence` - the resolved evidence for the drug's primary gene, if any
/// * `decision` - the decision record selected for this drug
/// * `detected_variants` - the variants backing the evidence, already formatted for output
pub fn generate_explanation(
    drug: SupportedDrug, evidence: Option<&GeneEvidence>, decision: &DrugDecision,
    detected_variants: &[DetectedVariant]
) -> GeneratedExplanation {
    let variant_citations: Vec<String> = detected_variants.iter()
        .map(|v| format!("{} ({} {})", v.rsid, v.gene, v.star))
        .collect();

    let usable = evidence.filter(|e| e.phenotype() != Phenotype::Unknown);
    let evidence = match usable {
        Some(e) => e,
        None => {
            return GeneratedExplanation {
                summary: format!("Analysis for {drug}: Insufficient pharmacogenomic data available for the primary metabolizing gene. The risk assessment is based on limited variant information."),
                mechanism: format!("{drug} metabolism depends on enzymatic activity that could not be fully characterized from the provided genetic data."),
                variant_citations,
                what_this_means_for_patient: "Without clear genetic variant data for the relevant gene, standard prescribing guidelines should be followed. Consider comprehensive pharmacogenomic testing.".to_string(),
                limitations: "Limited variant data available. This analysis may not capture all relevant genetic variations. VKORC1, HLA, and other modifier genes are not assessed.".to_string()
            };
        }
    };

    let gene = evidence.gene();
    let phenotype = evidence.phenotype();
    let diplotype = evidence.diplotype();

    let summary = format!(
        "Based on {gene} {diplotype} ({phenotype} metabolizer), the patient's predicted response to {drug} is: {}. {}",
        decision.risk_label, decision.recommendation
    );

    let mechanism = mechanism_text(drug, diplotype, phenotype);

    let drug_lower = drug.to_string().to_lowercase();
    let what_this_means_for_patient = match decision.risk_label {
        RiskLabel::Safe => format!("Your genetic profile suggests normal {gene} function. Standard {drug_lower} dosing is expected to be appropriate for you."),
        RiskLabel::AdjustDosage => format!("Your genetic profile indicates altered {gene} function that may affect how your body processes {drug_lower}. A dose adjustment may be needed to optimize safety and effectiveness."),
        RiskLabel::Toxic => format!("Your genetic profile indicates significantly altered {gene} function that increases the risk of serious adverse effects with {drug_lower}. Alternative medications or substantial dose modifications should be strongly considered."),
        RiskLabel::Ineffective => format!("Your genetic profile suggests that {drug_lower} may not work effectively for you due to altered {gene} function. Alternative medications should be considered."),
        RiskLabel::Unknown => "Insufficient data to determine how your body processes this medication. Standard guidelines should be followed.".to_string()
    };

    let warfarin_caveat = if drug == SupportedDrug::Warfarin {
        "VKORC1 genotype, which significantly affects warfarin sensitivity, is not included in this analysis. "
    } else {
        ""
    };
    let limitations = format!(
        "This analysis is based on {gene} genotype only. Other genes, environmental factors, drug interactions, organ function, and clinical context are not assessed. {warfarin_caveat}This is for educational purposes and should not replace clinical judgment."
    );

    GeneratedExplanation {
        summary,
        mechanism,
        variant_citations,
        what_this_means_for_patient,
        limitations
    }
}

/// The fixed per-drug mechanism paragraph, with phenotype-conditional phrasing
fn mechanism_text(drug: SupportedDrug, diplotype: &str, phenotype: Phenotype) -> String {
    let impaired = phenotype == Phenotype::PM || phenotype == Phenotype::IM;
    match drug {
        SupportedDrug::Codeine => {
            let consequence = if phenotype == Phenotype::URM {
                "causes excessive and rapid morphine formation"
            } else if impaired {
                "results in insufficient morphine production"
            } else {
                "provides normal morphine conversion"
            };
            format!("Codeine is a prodrug that requires CYP2D6-mediated O-demethylation to morphine for analgesic effect. The {diplotype} diplotype results in {phenotype} metabolizer status, which {consequence}.")
        },
        SupportedDrug::Clopidogrel => {
            let consequence = if impaired {
                "leading to reduced formation of the active metabolite and diminished antiplatelet effect"
            } else {
                "supporting adequate prodrug activation"
            };
            format!("Clopidogrel is a prodrug requiring CYP2C19-mediated bioactivation to its active thiol metabolite. The {diplotype} diplotype produces {phenotype} metabolizer status, {consequence}.")
        },
        SupportedDrug::Warfarin => {
            let consequence = if impaired {
                "reducing warfarin clearance and increasing sensitivity, requiring lower doses to achieve therapeutic INR"
            } else {
                "supporting standard warfarin metabolism"
            };
            format!("Warfarin's S-enantiomer (the more potent form) is primarily metabolized by CYP2C9. The {diplotype} diplotype yields {phenotype} metabolizer status, {consequence}. Note: VKORC1 pharmacodynamic effects are not assessed here.")
        },
        SupportedDrug::Simvastatin => {
            let consequence = if impaired {
                "decreased transporter function, increasing systemic simvastatin exposure and myopathy risk"
            } else {
                "normal hepatic uptake of simvastatin"
            };
            format!("SLCO1B1 encodes the hepatic uptake transporter OATP1B1, which mediates simvastatin acid uptake into hepatocytes. The {diplotype} diplotype results in {consequence}.")
        },
        SupportedDrug::Azathioprine => {
            let consequence = if phenotype == Phenotype::PM {
                "causing dangerous accumulation of cytotoxic metabolites leading to severe myelosuppression"
            } else if phenotype == Phenotype::IM {
                "resulting in elevated thioguanine nucleotide levels with increased toxicity risk"
            } else {
                "providing adequate drug inactivation"
            };
            format!("TPMT catalyzes the S-methylation of thiopurine drugs, diverting metabolism away from cytotoxic thioguanine nucleotides. The {diplotype} diplotype indicates {phenotype} activity, {consequence}.")
        },
        SupportedDrug::Fluorouracil => {
            let consequence = if impaired {
                "severely impairing fluorouracil degradation and leading to prolonged drug exposure with high toxicity risk"
            } else {
                "supporting normal fluorouracil catabolism"
            };
            format!("DPYD encodes dihydropyrimidine dehydrogenase, responsible for catabolizing >80% of administered fluorouracil. The {diplotype} diplotype indicates {phenotype} enzyme activity, {consequence}.")
        }
    }
}
