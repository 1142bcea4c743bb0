
use crate::data_types::classifications::{SupportedDrug, SupportedGene};

/// The guideline consortium every recommendation in the decision table approximates
pub const GUIDELINE_SOURCE: &str = "CPIC";

/// Maps a drug to the gene its metabolism primarily depends on
pub fn primary_gene(drug: SupportedDrug) -> SupportedGene {
    match drug {
        SupportedDrug::Codeine => SupportedGene::Cyp2d6,
        SupportedDrug::Warfarin => SupportedGene::Cyp2c9,
        SupportedDrug::Clopidogrel => SupportedGene::Cyp2c19,
        SupportedDrug::Simvastatin => SupportedGene::Slco1b1,
        SupportedDrug::Azathioprine => SupportedGene::Tpmt,
        SupportedDrug::Fluorouracil => SupportedGene::Dpyd
    }
}

/// Reference guideline links for a drug
pub fn guideline_links(drug: SupportedDrug) -> &'static [&'static str] {
    match drug {
        SupportedDrug::Codeine => &["https://cpicpgx.org/guidelines/guideline-for-codeine-and-cyp2d6/"],
        SupportedDrug::Warfarin => &["https://cpicpgx.org/guidelines/guideline-for-warfarin-and-cyp2c9/"],
        SupportedDrug::Clopidogrel => &["https://cpicpgx.org/guidelines/guideline-for-clopidogrel-and-cyp2c19/"],
        SupportedDrug::Simvastatin => &["https://cpicpgx.org/guidelines/cpic-guideline-for-statins/"],
        SupportedDrug::Azathioprine => &["https://cpicpgx.org/guidelines/guideline-for-thiopurines-and-tpmt/"],
        SupportedDrug::Fluorouracil => &["https://cpicpgx.org/guidelines/guideline-for-fluoropyrimidines-and-dpyd/"]
    }
}
