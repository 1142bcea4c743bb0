
use clap::{Parser, Subcommand};
use lazy_static::lazy_static;
use log::error;
use std::path::Path;

use crate::cli::analyze::AnalyzeSettings;
use crate::cli::build_vcf::BuildVcfSettings;
use crate::cli::detect::DetectSettings;
use crate::cli::validate::ValidateSettings;

lazy_static! {
    /// Stores the full version string we plan to use, which is generated in build.rs
    /// # Examples
    /// * `0.2.0-6bb9635-dirty` - while on a dirty branch
    /// * `0.2.0-6bb9635` - with a fresh commit
    pub static ref FULL_VERSION: String = format!("{}-{}", env!("CARGO_PKG_VERSION"), env!("VERGEN_GIT_DESCRIBE"));

    /// Shared after help string containing the usage disclaimer.
    pub static ref AFTER_HELP: String = "PharmaGuard is a pharmacogenomics education demo.
Its outputs are illustrative only and are not intended for use in diagnostic
or clinical decision making.".to_string();
}

#[derive(Parser)]
#[clap(author,
    version = &**FULL_VERSION,
    about,
    after_help = &**AFTER_HELP)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands
}

/// PharmaGuard, a drug-risk analyzer for annotated pharmacogenomic VCFs.
/// Select a subcommand to see more usage information:
#[derive(Subcommand)]
pub enum Commands {
    /// Run the full risk analysis for a VCF file
    Analyze(Box<AnalyzeSettings>),
    /// Generate a synthetic annotated VCF from the demo catalog
    BuildVcf(Box<BuildVcfSettings>),
    /// Scan free text for supported drug names
    DetectDrugs(Box<DetectSettings>),
    /// Run the structural pre-check on a VCF file
    Validate(Box<ValidateSettings>),
}

pub fn get_cli() -> Cli {
    Cli::parse()
}

/// Checks if a file exists and will otherwise exit
/// # Arguments
/// * `filename` - the file path to check for
/// * `label` - the label to use for error messages
pub fn check_required_filename(filename: &Path, label: &str) {
    if !filename.exists() {
        error!("{} does not exist: \"{}\"", label, filename.display());
        std::process::exit(exitcode::NOINPUT);
    } else {
        // file exists, we're good
    }
}
