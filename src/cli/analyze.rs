
use clap::Args;
use itertools::Itertools;
use log::info;
use simple_error::bail;
use std::path::PathBuf;
use std::str::FromStr;
use strum::IntoEnumIterator;

use crate::cli::core::{check_required_filename, AFTER_HELP};
use crate::data_types::classifications::SupportedDrug;

#[derive(Args, Clone, Default)]
#[clap(author, about,
    after_help = &**AFTER_HELP)]
pub struct AnalyzeSettings {
    /// Input variant file in VCF format, optionally gzipped
    #[clap(required = true)]
    #[clap(short = 'i')]
    #[clap(long = "vcf")]
    #[clap(value_name = "VCF")]
    #[clap(help_heading = Some("Input/Output"))]
    pub vcf_filename: PathBuf,

    /// Output analysis result file (JSON)
    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "output-results")]
    #[clap(value_name = "JSON")]
    #[clap(help_heading = Some("Input/Output"))]
    pub results_filename: PathBuf,

    /// Drug to analyze, can be specified multiple times; defaults to all supported drugs
    #[clap(short = 'd')]
    #[clap(long = "drug")]
    #[clap(value_name = "DRUG")]
    #[clap(help_heading = Some("Analysis"))]
    pub drugs: Vec<String>,

    /// Patient identifier override; defaults to the sample column or the file name
    #[clap(long = "patient-id")]
    #[clap(value_name = "ID")]
    #[clap(help_heading = Some("Analysis"))]
    pub patient_id: Option<String>,

    /// Optional per-drug summary output file (TSV)
    #[clap(long = "summary-tsv")]
    #[clap(value_name = "TSV")]
    #[clap(help_heading = Some("Input/Output"))]
    pub summary_tsv: Option<PathBuf>,

    /// Enable verbose output.
    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

/// Resolves the requested drug names, falling back to the full supported set.
/// # Arguments
/// * `drug_names` - the raw names from the command line
/// # Errors
/// * if any name is not a supported drug
pub fn parse_drug_list(drug_names: &[String]) -> Result<Vec<SupportedDrug>, Box<dyn std::error::Error>> {
    if drug_names.is_empty() {
        return Ok(SupportedDrug::iter().collect());
    }

    let mut drugs: Vec<SupportedDrug> = vec![];
    for name in drug_names.iter() {
        match SupportedDrug::from_str(name) {
            Ok(drug) => drugs.push(drug),
            Err(_) => {
                let supported = SupportedDrug::iter().map(|d| d.to_string()).join(", ");
                bail!("Unsupported drug {name:?}; supported drugs are: {supported}");
            }
        }
    }
    Ok(drugs.into_iter().unique().collect())
}

pub fn check_analyze_settings(settings: AnalyzeSettings) -> Result<AnalyzeSettings, Box<dyn std::error::Error>> {
    info!("Inputs:");
    check_required_filename(&settings.vcf_filename, "VCF file");
    info!("\tVCF: {:?}", settings.vcf_filename);

    let drugs = parse_drug_list(&settings.drugs)?;
    if settings.drugs.is_empty() {
        info!("\tDrugs: all supported ({})", drugs.iter().join(", "));
    } else {
        info!("\tDrugs: {}", drugs.iter().join(", "));
    }
    if let Some(pid) = settings.patient_id.as_ref() {
        if pid.is_empty() {
            bail!("--patient-id cannot be empty");
        }
        info!("\tPatient ID override: {pid:?}");
    }

    info!("Outputs:");
    info!("\tResults: {:?}", settings.results_filename);
    if let Some(tsv_fn) = settings.summary_tsv.as_ref() {
        info!("\tSummary TSV: {tsv_fn:?}");
    }

    Ok(settings)
}
