
/// Contains the per-drug analysis orchestrator that assembles the final results
pub mod analyzer;
/// Contains all the CLI related functionality
pub mod cli;
/// Contains the static configuration tables: allele functions, decision rules, guidelines
pub mod database;
/// Contains any specialized data types that are shared across the tooling
pub mod data_types;
/// Contains the keyword-based drug name detection fallback
pub mod drug_detect;
/// Contains the functionality for resolving per-gene variant evidence into diplotypes
pub mod evidence;
/// Contains the narrative text generation for analysis results
pub mod explain;
/// Contains the VCF parser that produces structured variant records
pub mod parser;
/// Contains the phenotype derivation rules
pub mod phenotyper;
/// Contains the output schema checks applied before results are persisted
pub mod schema;
/// Contains generic utilities that are handy wrappers
pub mod util;
/// Contains the structural pre-check for VCF files
pub mod validator;
/// Contains the synthetic VCF generator and its demo variant catalog
pub mod vcf_builder;
