
/// the main CLI module
pub mod core;
/// the analyze CLI subcommand for running the full risk pipeline
pub mod analyze;
/// the build-vcf CLI subcommand for generating synthetic annotated VCFs
pub mod build_vcf;
/// the detect-drugs CLI subcommand for scanning free text for drug names
pub mod detect;
/// the validate CLI subcommand for the structural pre-check
pub mod validate;
