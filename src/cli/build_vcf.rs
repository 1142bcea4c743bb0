
use clap::Args;
use itertools::Itertools;
use log::info;
use simple_error::bail;
use std::path::PathBuf;
use std::str::FromStr;
use strum::IntoEnumIterator;

use crate::cli::core::AFTER_HELP;
use crate::data_types::classifications::SupportedGene;
use crate::vcf_builder::{find_profile, BuilderVariant, AVAILABLE_VARIANTS, SAMPLE_PROFILES};

/// Patient identifier used when the caller does not provide one
const DEFAULT_PATIENT_ID: &str = "PATIENT_DEMO";

#[derive(Args, Clone, Default)]
#[clap(author, about,
    after_help = &**AFTER_HELP)]
pub struct BuildVcfSettings {
    /// Output variant file in VCF format
    #[clap(short = 'o')]
    #[clap(long = "output-vcf")]
    #[clap(value_name = "VCF")]
    #[clap(help_heading = Some("Input/Output"))]
    pub output_filename: Option<PathBuf>,

    /// Name of a pre-assembled sample profile; see --list-profiles
    #[clap(short = 'p')]
    #[clap(long = "profile")]
    #[clap(value_name = "NAME")]
    #[clap(help_heading = Some("Content"))]
    pub profile: Option<String>,

    /// Gene to include all catalog variants for, can be specified multiple times
    #[clap(short = 'g')]
    #[clap(long = "gene")]
    #[clap(value_name = "GENE")]
    #[clap(help_heading = Some("Content"))]
    pub genes: Vec<String>,

    /// Patient identifier written as the sample column name
    #[clap(long = "patient-id")]
    #[clap(value_name = "ID")]
    #[clap(help_heading = Some("Content"))]
    pub patient_id: Option<String>,

    /// List the available sample profiles and exit
    #[clap(long = "list-profiles")]
    #[clap(help_heading = Some("Content"))]
    pub list_profiles: bool,

    /// Enable verbose output.
    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

/// The fully resolved inputs for one build-vcf invocation
pub struct BuildVcfPlan {
    pub output_filename: PathBuf,
    pub patient_id: String,
    pub variants: Vec<BuilderVariant>
}

/// Resolves the settings into the patient identifier and variant list to emit.
/// # Arguments
/// * `settings` - the raw CLI settings; `list_profiles` must be handled by the caller first
/// # Errors
/// * if neither a profile nor genes were requested, or both were
/// * if the profile name or a gene symbol is unrecognized
pub fn check_build_vcf_settings(settings: &BuildVcfSettings) -> Result<BuildVcfPlan, Box<dyn std::error::Error>> {
    let output_filename = match settings.output_filename.as_ref() {
        Some(f) => f.clone(),
        None => bail!("--output-vcf is required unless --list-profiles is given")
    };
    if settings.profile.is_some() && !settings.genes.is_empty() {
        bail!("Only one of --profile and --gene can be specified.");
    }

    let plan = if let Some(profile_name) = settings.profile.as_ref() {
        let profile = match find_profile(profile_name) {
            Some(p) => p,
            None => {
                let known = SAMPLE_PROFILES.iter().map(|p| format!("{:?}", p.name)).join(", ");
                bail!("Unknown profile {profile_name:?}; available profiles are: {known}");
            }
        };
        info!("Profile: {:?} ({})", profile.name, profile.description);
        BuildVcfPlan {
            output_filename,
            patient_id: settings.patient_id.clone().unwrap_or_else(|| profile.patient_id.clone()),
            variants: profile.variants.clone()
        }
    } else if !settings.genes.is_empty() {
        let mut variants: Vec<BuilderVariant> = vec![];
        for name in settings.genes.iter().unique() {
            match SupportedGene::from_str(name) {
                Ok(gene) => variants.extend(AVAILABLE_VARIANTS[&gene].iter().cloned()),
                Err(_) => {
                    let supported = SupportedGene::iter().map(|g| g.to_string()).join(", ");
                    bail!("Unsupported gene {name:?}; supported genes are: {supported}");
                }
            }
        }
        info!("Genes: {}", settings.genes.iter().unique().join(", "));
        BuildVcfPlan {
            output_filename,
            patient_id: settings.patient_id.clone().unwrap_or_else(|| DEFAULT_PATIENT_ID.to_string()),
            variants
        }
    } else {
        bail!("One of --profile or --gene must be specified; see --list-profiles for presets.");
    };

    info!("Patient ID: {:?}", plan.patient_id);
    info!("Variant count: {}", plan.variants.len());
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_settings() -> BuildVcfSettings {
        BuildVcfSettings {
            output_filename: Some(PathBuf::from("out.vcf")),
            ..Default::default()
        }
    }

    #[test]
    fn test_profile_plan() {
        let mut settings = base_settings();
        settings.profile = Some("Codeine URM Risk".to_string());
        let plan = check_build_vcf_settings(&settings).unwrap();
        assert_eq!(plan.patient_id, "PATIENT_CYP2D6_URM");
        assert_eq!(plan.variants.len(), 2);
    }

    #[test]
    fn test_gene_plan_with_default_patient() {
        let mut settings = base_settings();
        settings.genes = vec!["CYP2D6".to_string(), "TPMT".to_string()];
        let plan = check_build_vcf_settings(&settings).unwrap();
        assert_eq!(plan.patient_id, DEFAULT_PATIENT_ID);
        assert_eq!(plan.variants.len(), 9);
    }

    #[test]
    fn test_invalid_combinations_rejected() {
        let settings = base_settings();
        assert!(check_build_vcf_settings(&settings).is_err());

        let mut settings = base_settings();
        settings.profile = Some("Codeine URM Risk".to_string());
        settings.genes = vec!["TPMT".to_string()];
        assert!(check_build_vcf_settings(&settings).is_err());

        let mut settings = base_settings();
        settings.profile = Some("nope".to_string());
        assert!(check_build_vcf_settings(&settings).is_err());

        let mut settings = base_settings();
        settings.genes = vec!["BRCA1".to_string()];
        assert!(check_build_vcf_settings(&settings).is_err());

        let mut settings = base_settings();
        settings.output_filename = None;
        settings.profile = Some("Codeine URM Risk".to_string());
        assert!(check_build_vcf_settings(&settings).is_err());
    }
}
