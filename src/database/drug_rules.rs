
use lazy_static::lazy_static;
use std::collections::BTreeMap;

use crate::data_types::classifications::{Phenotype, RiskLabel, Severity, SupportedDrug};

/// A static decision record for a (drug, phenotype) pair
#[derive(Clone, Debug, PartialEq)]
pub struct DrugDecision {
    /// predicted risk category
    pub risk_label: RiskLabel,
    /// clinical severity of the predicted response
    pub severity: Severity,
    /// base confidence before evidence-quality clamping
    pub confidence_base: f64,
    /// prescriber-facing recommendation text
    pub recommendation: &'static str,
    /// dosing guidance text
    pub dose_guidance: &'static str,
    /// alternative drugs worth considering
    pub alternative_drugs: &'static [&'static str]
}

/// Shared default for unknown phenotypes and combinations absent from the table
pub const UNKNOWN_DECISION: DrugDecision = DrugDecision {
    risk_label: RiskLabel::Unknown,
    severity: Severity::Low,
    confidence_base: 0.25,
    recommendation: "Insufficient pharmacogenomic data available. Standard prescribing applies pending further genetic testing.",
    dose_guidance: "Follow standard dosing guidelines. Consider pharmacogenomic testing for personalized dosing.",
    alternative_drugs: &[]
};

lazy_static! {
    /// The full decision table. Entries are illustrative approximations of CPIC guidance
    /// and are looked up verbatim; combinations without an entry fall back to the default.
    pub static ref DRUG_DECISION_RULES: BTreeMap<(SupportedDrug, Phenotype), DrugDecision> = {
        use Phenotype::{PM, IM, NM, RM, URM};
        use RiskLabel::{Safe, AdjustDosage, Toxic, Ineffective};
        use Severity::{None, Low, Moderate, High, Critical};
        use SupportedDrug::{Codeine, Warfarin, Clopidogrel, Simvastatin, Azathioprine, Fluorouracil};

        type Rule = (SupportedDrug, Phenotype, RiskLabel, Severity, f64, &'static str, &'static str, &'static [&'static str]);
        let rules: [Rule; 30] = [
            (Codeine, PM, Ineffective, High, 0.90,
                "Avoid codeine. CYP2D6 poor metabolizer status results in insufficient conversion to morphine, leading to inadequate pain relief.",
                "Do not prescribe codeine. Consider alternative analgesics not dependent on CYP2D6 metabolism.",
                &["morphine", "oxycodone", "non-opioid analgesics"]),
            (Codeine, IM, Ineffective, Moderate, 0.85,
                "Codeine may provide reduced analgesia. CYP2D6 intermediate metabolizer status leads to decreased morphine formation.",
                "Consider alternative analgesics. If codeine is used, monitor closely for efficacy.",
                &["tramadol", "morphine", "non-opioid analgesics"]),
            (Codeine, NM, Safe, None, 0.90,
                "Standard codeine metabolism expected. Normal CYP2D6 activity provides adequate morphine conversion.",
                "Use standard dosing per clinical guidelines.",
                &[]),
            (Codeine, RM, Safe, Low, 0.85,
                "Rapid metabolism may lead to slightly higher morphine levels. Monitor for enhanced response.",
                "Use standard or slightly reduced dosing. Monitor for increased opioid effects.",
                &[]),
            (Codeine, URM, Toxic, Critical, 0.92,
                "AVOID codeine. Ultrarapid CYP2D6 metabolism causes excessive morphine formation, risking life-threatening respiratory depression.",
                "Do NOT prescribe codeine. This is a critical safety concern.",
                &["morphine (at reduced dose with monitoring)", "non-opioid analgesics", "acetaminophen"]),

            (Clopidogrel, PM, Ineffective, Critical, 0.90,
                "Clopidogrel is a prodrug requiring CYP2C19 activation. Poor metabolizer status results in significantly reduced antiplatelet effect and increased cardiovascular risk.",
                "Avoid clopidogrel. Use alternative antiplatelet agents.",
                &["prasugrel", "ticagrelor"]),
            (Clopidogrel, IM, Ineffective, High, 0.85,
                "Reduced clopidogrel activation expected. Intermediate metabolizer status may lead to suboptimal antiplatelet response.",
                "Consider alternative antiplatelet therapy or increased monitoring.",
                &["prasugrel", "ticagrelor"]),
            (Clopidogrel, NM, Safe, None, 0.90,
                "Normal CYP2C19 metabolism supports standard clopidogrel activation and antiplatelet efficacy.",
                "Use standard dosing per clinical guidelines.",
                &[]),
            (Clopidogrel, RM, Safe, None, 0.88,
                "Enhanced clopidogrel activation. Standard efficacy expected.",
                "Use standard dosing.",
                &[]),
            (Clopidogrel, URM, Safe, None, 0.85,
                "Ultrarapid metabolism may enhance clopidogrel activation. Standard efficacy expected.",
                "Use standard dosing.",
                &[]),

            (Warfarin, PM, AdjustDosage, High, 0.85,
                "CYP2C9 poor metabolizer status results in significantly reduced warfarin clearance, increasing bleeding risk at standard doses.",
                "Consider 50-80% dose reduction. Initiate at lower dose with frequent INR monitoring.",
                &["direct oral anticoagulants (DOACs)", "apixaban", "rivaroxaban"]),
            (Warfarin, IM, AdjustDosage, Moderate, 0.82,
                "CYP2C9 intermediate metabolizer status leads to decreased warfarin clearance. Dose adjustment recommended.",
                "Consider 20-50% dose reduction. Monitor INR closely during initiation.",
                &["apixaban", "rivaroxaban"]),
            (Warfarin, NM, Safe, None, 0.80,
                "Normal CYP2C9 metabolism. Note: VKORC1 genotype (not tested here) also significantly affects warfarin sensitivity.",
                "Use standard dosing algorithm. Consider VKORC1 testing for comprehensive dosing.",
                &[]),
            (Warfarin, RM, Safe, Low, 0.75,
                "Normal to rapid warfarin metabolism. Standard dosing likely appropriate.",
                "Use standard dosing. May require higher maintenance dose.",
                &[]),
            (Warfarin, URM, Safe, Low, 0.70,
                "Rapid warfarin clearance possible. May need higher doses.",
                "Monitor INR and adjust dose upward if needed.",
                &[]),

            (Simvastatin, PM, AdjustDosage, High, 0.88,
                "SLCO1B1 poor function leads to significantly increased simvastatin plasma levels, greatly elevating myopathy/rhabdomyolysis risk.",
                "Prescribe a lower dose of simvastatin (≤20mg) or use an alternative statin with lower SLCO1B1 dependence.",
                &["pravastatin", "rosuvastatin", "fluvastatin"]),
            (Simvastatin, IM, AdjustDosage, Moderate, 0.85,
                "SLCO1B1 decreased function increases simvastatin exposure and myopathy risk.",
                "Avoid simvastatin doses >20mg. Consider alternative statin. Monitor for muscle symptoms.",
                &["pravastatin", "rosuvastatin"]),
            (Simvastatin, NM, Safe, None, 0.88,
                "Normal SLCO1B1 transporter function. Standard simvastatin metabolism expected.",
                "Use standard dosing per clinical guidelines.",
                &[]),
            (Simvastatin, RM, Safe, None, 0.85,
                "Normal statin transport function.",
                "Use standard dosing.",
                &[]),
            (Simvastatin, URM, Safe, None, 0.82,
                "Enhanced transporter function may reduce drug exposure.",
                "Use standard dosing. May need dose verification.",
                &[]),

            (Azathioprine, PM, Toxic, Critical, 0.92,
                "TPMT deficiency causes dangerous accumulation of thioguanine nucleotides, leading to severe, potentially fatal myelosuppression.",
                "Drastically reduce dose (use ≤10% of standard dose) or avoid azathioprine entirely. If used, requires very close hematologic monitoring.",
                &["mycophenolate mofetil", "alternative immunosuppressants"]),
            (Azathioprine, IM, Toxic, High, 0.88,
                "Reduced TPMT activity increases risk of myelosuppression with standard azathioprine doses.",
                "Reduce dose by 30-70% of standard dose. Monitor CBC frequently.",
                &["mycophenolate mofetil"]),
            (Azathioprine, NM, Safe, None, 0.90,
                "Normal TPMT activity. Standard azathioprine metabolism expected.",
                "Use standard dosing with routine monitoring.",
                &[]),
            (Azathioprine, RM, Safe, None, 0.85,
                "Normal to high TPMT activity.",
                "Use standard dosing.",
                &[]),
            (Azathioprine, URM, Safe, Low, 0.78,
                "High TPMT activity may reduce drug efficacy.",
                "Standard dosing. Monitor therapeutic response; may need dose increase.",
                &[]),

            (Fluorouracil, PM, Toxic, Critical, 0.93,
                "DPYD deficiency causes severely impaired fluorouracil catabolism, leading to life-threatening toxicity including severe mucositis, myelosuppression, and neurotoxicity.",
                "AVOID fluorouracil and capecitabine entirely. If essential, use ≤25% of standard dose with intensive monitoring.",
                &["raltitrexed", "alternative non-fluoropyrimidine regimens"]),
            (Fluorouracil, IM, Toxic, High, 0.88,
                "Partial DPYD deficiency increases risk of severe fluorouracil toxicity.",
                "Reduce initial dose by ≥50%. Closely monitor for toxicity signs and titrate cautiously.",
                &["raltitrexed"]),
            (Fluorouracil, NM, Safe, None, 0.88,
                "Normal DPYD activity. Standard fluorouracil catabolism expected.",
                "Use standard dosing per oncology protocol.",
                &[]),
            (Fluorouracil, RM, Safe, None, 0.85,
                "Normal DPYD function.",
                "Use standard dosing.",
                &[]),
            (Fluorouracil, URM, Safe, None, 0.80,
                "Enhanced DPYD activity. May have reduced fluorouracil efficacy.",
                "Standard dosing; monitor therapeutic response.",
                &[])
        ];

        rules.into_iter()
            .map(|(drug, phenotype, risk_label, severity, confidence_base, recommendation, dose_guidance, alternative_drugs)| {
                let decision = DrugDecision {
                    risk_label,
                    severity,
                    confidence_base,
                    recommendation,
                    dose_guidance,
                    alternative_drugs
                };
                ((drug, phenotype), decision)
            })
            .collect()
    };
}

/// Looks up the decision record for a (drug, phenotype) pair.
/// An unknown phenotype, or a combination without an explicit entry, resolves to the
/// shared low-confidence default rather than an error.
/// # Arguments
/// * `drug` - the drug under analysis
/// * `phenotype` - the resolved metabolizer phenotype for the drug's primary gene
pub fn drug_decision(drug: SupportedDrug, phenotype: Phenotype) -> &'static DrugDecision {
    if phenotype == Phenotype::Unknown {
        return &UNKNOWN_DECISION;
    }
    DRUG_DECISION_RULES.get(&(drug, phenotype)).unwrap_or(&UNKNOWN_DECISION)
}
