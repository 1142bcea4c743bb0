
use log::{error, info, warn, LevelFilter};
use serde::Serialize;
use std::fs::File;
use std::path::Path;

use pharmaguard::analyzer::analyze_variants;
use pharmaguard::cli::analyze::{check_analyze_settings, parse_drug_list, AnalyzeSettings};
use pharmaguard::cli::build_vcf::{check_build_vcf_settings, BuildVcfSettings};
use pharmaguard::cli::core::{get_cli, Commands};
use pharmaguard::cli::detect::{check_detect_settings, DetectSettings};
use pharmaguard::cli::validate::{check_validate_settings, ValidateSettings};
use pharmaguard::data_types::classifications::SupportedDrug;
use pharmaguard::data_types::pharma_result::PharmaResult;
use pharmaguard::drug_detect::detect_drugs;
use pharmaguard::parser::parse_vcf;
use pharmaguard::schema::validate_results;
use pharmaguard::util::file_io::{load_text, save_json, save_text};
use pharmaguard::validator::validate_vcf;
use pharmaguard::vcf_builder::{generate_vcf_content, SAMPLE_PROFILES};

/// Sets up the logger for the given verbosity count
fn setup_logging(verbosity: u8) {
    let filter_level: LevelFilter = match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace
    };

    env_logger::builder()
        .format_timestamp_millis()
        .filter_level(filter_level)
        .init();
}

/// This will run the "analyze" mode of the tool
/// # Arguments
/// * `settings` - the AnalyzeSettings object
fn run_analyze(settings: AnalyzeSettings) {
    // immediately setup logging first
    setup_logging(settings.verbosity);

    // okay, now we can check all the other settings
    let cli_settings: AnalyzeSettings = match check_analyze_settings(settings) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while processing CLI settings: {e}");
            std::process::exit(exitcode::USAGE);
        }
    };

    // this was verified during the settings check, re-parsing cannot fail now
    let drugs: Vec<SupportedDrug> = match parse_drug_list(&cli_settings.drugs) {
        Ok(d) => d,
        Err(e) => {
            error!("Error while resolving drug list: {e}");
            std::process::exit(exitcode::USAGE);
        }
    };

    info!("Loading VCF from {:?}...", cli_settings.vcf_filename);
    let content: String = match load_text(&cli_settings.vcf_filename) {
        Ok(c) => c,
        Err(e) => {
            error!("Error while loading VCF file: {e}");
            std::process::exit(exitcode::IOERR);
        }
    };
    let file_size_bytes: u64 = match std::fs::metadata(&cli_settings.vcf_filename) {
        Ok(m) => m.len(),
        Err(e) => {
            error!("Error while reading VCF file metadata: {e}");
            std::process::exit(exitcode::IOERR);
        }
    };

    // the structural pre-check gates the full analysis
    let precheck = validate_vcf(&content);
    for warning in precheck.warnings.iter() {
        warn!("Pre-check: {warning}");
    }
    if !precheck.ok {
        for pre_error in precheck.errors.iter() {
            error!("Pre-check: {pre_error}");
        }
        error!("The VCF file failed the structural pre-check, cannot analyze.");
        std::process::exit(exitcode::DATAERR);
    }

    let file_name: String = cli_settings.vcf_filename.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let parse_result = parse_vcf(&content, &file_name, file_size_bytes);
    for warning in parse_result.validation.warnings.iter() {
        warn!("Parser: {warning}");
    }
    if !parse_result.validation.valid {
        for parse_error in parse_result.validation.errors.iter() {
            error!("Parser: {parse_error}");
        }
        error!("The VCF file failed parse validation, cannot analyze.");
        std::process::exit(exitcode::DATAERR);
    }

    let patient_id: String = cli_settings.patient_id.clone()
        .unwrap_or_else(|| parse_result.validation.patient_id.clone());

    info!(
        "Analyzing {} variant(s) across {} drug(s) for {:?}...",
        parse_result.variants.len(), drugs.len(), patient_id
    );
    let results: Vec<PharmaResult> = analyze_variants(
        &parse_result.variants, &drugs, &patient_id, parse_result.file_size_mb
    );

    // results that fail the output schema check must never be persisted
    if let Err(e) = validate_results(&results) {
        error!("Error while validating analysis results: {e}");
        error!("The results failed the output schema check, nothing was written; re-check the input file.");
        std::process::exit(exitcode::SOFTWARE);
    }

    info!("Saving results to {:?}", cli_settings.results_filename);
    match save_json(&results, &cli_settings.results_filename) {
        Ok(()) => {},
        Err(e) => {
            error!("Error while writing results to file: {e}");
            std::process::exit(exitcode::IOERR);
        }
    };

    if let Some(filename) = cli_settings.summary_tsv.as_ref() {
        info!("Saving summary to {:?}", filename);
        match save_summary_tsv(&results, filename) {
            Ok(()) => {},
            Err(e) => {
                error!("Error while writing summary to file: {e}");
                std::process::exit(exitcode::IOERR);
            }
        };
    }
}

/// Wrapper for one row of the summary output
#[derive(Serialize)]
struct SummaryRow {
    #[serde(rename = "#drug")]
    drug: String,
    gene: String,
    diplotype: String,
    phenotype: String,
    risk_label: String,
    severity: String,
    confidence: f64
}

/// Helper function to save the per-drug TSV summary of an analysis run
/// # Arguments
/// * `results` - the validated analysis results
/// * `filename` - the output filename, TSV
/// # Errors
/// * if we have any errors opening or writing to the file
fn save_summary_tsv(results: &[PharmaResult], filename: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let delimiter: u8 = b'\t';
    let mut csv_writer: csv::Writer<File> = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(filename)?;

    for result in results.iter() {
        let row = SummaryRow {
            drug: result.drug.clone(),
            gene: result.pharmacogenomic_profile.primary_gene.clone(),
            diplotype: result.pharmacogenomic_profile.diplotype.clone(),
            phenotype: result.pharmacogenomic_profile.phenotype.to_string(),
            risk_label: result.risk_assessment.risk_label.to_string(),
            severity: result.risk_assessment.severity.to_string(),
            confidence: result.risk_assessment.confidence_score
        };
        csv_writer.serialize(&row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// This will run the "validate" mode of the tool
/// # Arguments
/// * `settings` - the ValidateSettings object
fn run_validate(settings: ValidateSettings) {
    // immediately setup logging first
    setup_logging(settings.verbosity);

    // okay, now we can check all the other settings
    let cli_settings: ValidateSettings = check_validate_settings(settings);

    info!("Loading VCF from {:?}...", cli_settings.vcf_filename);
    let content: String = match load_text(&cli_settings.vcf_filename) {
        Ok(c) => c,
        Err(e) => {
            error!("Error while loading VCF file: {e}");
            std::process::exit(exitcode::IOERR);
        }
    };

    let precheck = validate_vcf(&content);
    match cli_settings.report_filename.as_ref() {
        Some(report_fn) => {
            info!("Saving pre-check report to {report_fn:?}");
            match save_json(&precheck, report_fn) {
                Ok(()) => {},
                Err(e) => {
                    error!("Error while writing pre-check report to file: {e}");
                    std::process::exit(exitcode::IOERR);
                }
            };
        },
        None => {
            match serde_json::to_string_pretty(&precheck) {
                Ok(report) => println!("{report}"),
                Err(e) => {
                    error!("Error while serializing pre-check report: {e}");
                    std::process::exit(exitcode::SOFTWARE);
                }
            };
        }
    }

    if !precheck.ok {
        for pre_error in precheck.errors.iter() {
            error!("Pre-check: {pre_error}");
        }
        std::process::exit(exitcode::DATAERR);
    }
    info!("Structural pre-check passed with {} variant line(s).", precheck.stats.variant_lines);
}

/// This will run the "build-vcf" mode of the tool
/// # Arguments
/// * `settings` - the BuildVcfSettings object
fn run_build_vcf(settings: BuildVcfSettings) {
    // immediately setup logging first
    setup_logging(settings.verbosity);

    if settings.list_profiles {
        for profile in SAMPLE_PROFILES.iter() {
            println!("{}\t{}", profile.name, profile.description);
        }
        return;
    }

    // okay, now we can check all the other settings
    let plan = match check_build_vcf_settings(&settings) {
        Ok(p) => p,
        Err(e) => {
            error!("Error while processing CLI settings: {e}");
            std::process::exit(exitcode::USAGE);
        }
    };

    let content = generate_vcf_content(&plan.patient_id, &plan.variants);

    info!("Saving synthetic VCF to {:?}", plan.output_filename);
    match save_text(&content, &plan.output_filename) {
        Ok(()) => {},
        Err(e) => {
            error!("Error while writing VCF to file: {e}");
            std::process::exit(exitcode::IOERR);
        }
    };
}

/// This will run the "detect-drugs" mode of the tool
/// # Arguments
/// * `settings` - the DetectSettings object
fn run_detect_drugs(settings: DetectSettings) {
    // immediately setup logging first
    setup_logging(settings.verbosity);

    // okay, now we can check all the other settings
    let cli_settings: DetectSettings = match check_detect_settings(settings) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while processing CLI settings: {e}");
            std::process::exit(exitcode::USAGE);
        }
    };

    let detection = detect_drugs(&cli_settings.text);
    match serde_json::to_string_pretty(&detection) {
        Ok(report) => println!("{report}"),
        Err(e) => {
            error!("Error while serializing detection output: {e}");
            std::process::exit(exitcode::SOFTWARE);
        }
    };
}

fn main() {
    let cli = get_cli();
    match cli.command {
        Commands::Analyze(settings) => {
            run_analyze(*settings);
        },
        Commands::BuildVcf(settings) => {
            run_build_vcf(*settings);
        },
        Commands::DetectDrugs(settings) => {
            run_detect_drugs(*settings);
        },
        Commands::Validate(settings) => {
            run_validate(*settings);
        }
    }

    info!("Process finished successfully.");
}
