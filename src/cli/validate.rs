
use clap::Args;
use log::info;
use std::path::PathBuf;

use crate::cli::core::{check_required_filename, AFTER_HELP};

#[derive(Args, Clone, Default)]
#[clap(author, about,
    after_help = &**AFTER_HELP)]
pub struct ValidateSettings {
    /// Input variant file in VCF format, optionally gzipped
    #[clap(required = true)]
    #[clap(short = 'i')]
    #[clap(long = "vcf")]
    #[clap(value_name = "VCF")]
    #[clap(help_heading = Some("Input/Output"))]
    pub vcf_filename: PathBuf,

    /// Optional output pre-check report file (JSON); defaults to stdout
    #[clap(short = 'o')]
    #[clap(long = "output-report")]
    #[clap(value_name = "JSON")]
    #[clap(help_heading = Some("Input/Output"))]
    pub report_filename: Option<PathBuf>,

    /// Enable verbose output.
    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

pub fn check_validate_settings(settings: ValidateSettings) -> ValidateSettings {
    info!("Inputs:");
    check_required_filename(&settings.vcf_filename, "VCF file");
    info!("\tVCF: {:?}", settings.vcf_filename);

    info!("Outputs:");
    match settings.report_filename.as_ref() {
        Some(report_fn) => info!("\tPre-check report: {report_fn:?}"),
        None => info!("\tPre-check report: stdout")
    }

    settings
}
