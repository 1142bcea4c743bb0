
use lazy_static::lazy_static;
use regex::Regex;
use rustc_hash::FxHashMap as HashMap;
use serde::Serialize;
use std::str::FromStr;

use crate::data_types::classifications::SupportedGene;
use crate::data_types::variant::{ParsedVariant, INFO_GENE, INFO_RS, INFO_STAR};

/// 0-based index of the first sample column in a full VCF line
const SAMPLE_INDEX: usize = 9;
/// At most this many per-line annotation warnings are surfaced in the validation block
const MAX_MISSING_TAG_WARNINGS: usize = 5;

lazy_static! {
    /// Matches standard-looking VCF version declarations, e.g. "VCFv4.2"
    static ref VCF_VERSION_REGEX: Regex = Regex::new(r"VCFv4\.\d").unwrap();
    /// Matches a trailing .vcf or .txt extension on a file name
    static ref VCF_SUFFIX_REGEX: Regex = Regex::new(r"(?i)\.(vcf|txt)$").unwrap();
    /// Matches every character that is not allowed in a derived patient identifier
    static ref NON_ALPHANUMERIC_REGEX: Regex = Regex::new(r"[^a-zA-Z0-9]").unwrap();
}

/// Validation summary attached to every parse
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VcfValidation {
    /// true only if no structural errors occurred and a header (real or inferred) was found
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// from the sample column when present, otherwise derived from the file name
    pub patient_id: String,
    pub variant_count: usize,
    /// gene symbols observed in GENE tags, restricted to the supported set
    pub genes_detected: Vec<String>
}

/// Full output of a parse call
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VcfParseResult {
    pub validation: VcfValidation,
    pub variants: Vec<ParsedVariant>,
    /// input size in MB, rounded to 3 decimals
    pub file_size_mb: f64
}

/// Parses the INFO field into a key to value mapping.
/// A bare key without "=" is recorded with the value "true"; a "." field yields an empty map.
pub fn parse_info_field(info_str: &str) -> HashMap<String, String> {
    let mut info: HashMap<String, String> = Default::default();
    if info_str.is_empty() || info_str == "." {
        return info;
    }
    for token in info_str.split(';') {
        match token.find('=') {
            Some(idx) if idx > 0 => {
                info.insert(token[..idx].to_string(), token[idx + 1..].to_string());
            },
            _ => {
                info.insert(token.to_string(), "true".to_string());
            }
        }
    }
    info
}

/// Pulls the genotype out of a sample column using the FORMAT column's GT position.
/// Falls back to the first sub-field, and to "0/0" when nothing usable is present.
fn extract_genotype(sample_field: &str, format_field: &str) -> String {
    if sample_field.is_empty() || sample_field == "." {
        return "0/0".to_string();
    }
    let sample_parts: Vec<&str> = sample_field.split(':').collect();
    if !format_field.is_empty() {
        let gt_index = format_field.split(':').position(|p| p == "GT");
        if let Some(idx) = gt_index {
            if idx < sample_parts.len() {
                return sample_parts[idx].to_string();
            }
        }
    }
    if sample_parts[0].is_empty() {
        "0/0".to_string()
    } else {
        sample_parts[0].to_string()
    }
}

/// Derives a patient identifier from the input file name
fn patient_id_from_file_name(file_name: &str) -> String {
    let base = VCF_SUFFIX_REGEX.replace(file_name, "");
    let sanitized = NON_ALPHANUMERIC_REGEX.replace_all(&base, "_").to_uppercase();
    let truncated: String = sanitized.chars().take(20).collect();
    format!("PATIENT_{truncated}")
}

/// Parses VCF text into structured variant records.
/// This is tolerant by design: structural problems surface as errors/warnings in the
/// validation block and parsing continues on a best-effort basis, so the caller always
/// receives every variant that could be read.
/// # Arguments
/// * `content` - the raw file text
/// * `file_name` - the name of the input file, used as a patient identifier fallback
/// * `file_size_bytes` - the input size in bytes, reported back in MB
pub fn parse_vcf(content: &str, file_name: &str, file_size_bytes: u64) -> VcfParseResult {
    let lines: Vec<&str> = content.split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .collect();

    let mut errors: Vec<String> = vec![];
    let mut warnings: Vec<String> = vec![];
    let mut variants: Vec<ParsedVariant> = vec![];
    let mut patient_id = String::new();
    let mut header_found = false;

    // fileformat line is recommended, its absence does not block parsing
    match lines.iter().find(|l| l.starts_with("##fileformat=")) {
        None => {
            warnings.push("Missing ##fileformat= header line — assuming VCF format".to_string());
        },
        Some(format_line) => {
            if !VCF_VERSION_REGEX.is_match(format_line) {
                warnings.push(format!("Non-standard VCF version: {format_line}"));
            }
        }
    }

    // find the column header, best-effort parse without one
    let header_idx: Option<usize> = lines.iter().position(|l| l.starts_with("#CHROM"));
    match header_idx {
        None => {
            warnings.push("Missing #CHROM column header line — attempting to parse data lines".to_string());
            header_found = true;
        },
        Some(idx) => {
            let cols: Vec<&str> = lines[idx].split('\t').collect();
            if cols.len() < 5 {
                errors.push("Column header must have at least CHROM, POS, ID, REF, ALT columns".to_string());
            } else {
                header_found = true;
            }
            if !cols.contains(&"INFO") {
                warnings.push("INFO column not found in header — annotation-based analysis will be limited".to_string());
            }
            if cols.len() >= 10 {
                patient_id = cols[SAMPLE_INDEX].to_string();
            } else {
                warnings.push("No sample column found in header".to_string());
            }
        }
    }

    if patient_id.is_empty() {
        patient_id = patient_id_from_file_name(file_name);
    }

    // data lines start right after the header, or at the first non-comment line without one
    let data_start_idx: usize = match header_idx {
        Some(idx) => idx + 1,
        None => lines.iter()
            .position(|l| !l.starts_with('#') && !l.trim().is_empty())
            .unwrap_or(0)
    };

    let mut genes_detected: Vec<String> = vec![];
    let mut missing_tags: Vec<String> = vec![];

    for (i, raw_line) in lines.iter().enumerate().skip(data_start_idx) {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let cols: Vec<&str> = line.split('\t').collect();
        if cols.len() < 8 {
            warnings.push(format!("Line {}: insufficient columns ({}), skipping", i + 1, cols.len()));
            continue;
        }

        let chrom = cols[0].to_string();
        let pos: u64 = cols[1].parse().unwrap_or(0);
        let id = if cols[2].is_empty() { "." } else { cols[2] }.to_string();
        let ref_allele = cols[3].to_string();
        let alt_allele = cols[4].to_string();
        let qual = if cols[5].is_empty() { "." } else { cols[5] }.to_string();
        let filter = if cols[6].is_empty() { "." } else { cols[6] }.to_string();
        let info = parse_info_field(cols[7]);
        let genotype = if cols.len() > SAMPLE_INDEX {
            extract_genotype(cols[SAMPLE_INDEX], cols[8])
        } else {
            "0/0".to_string()
        };

        let gene = info.get(INFO_GENE).filter(|v| !v.is_empty()).cloned();
        let star = info.get(INFO_STAR).filter(|v| !v.is_empty()).cloned();
        let mut rsid = info.get(INFO_RS).filter(|v| !v.is_empty()).cloned();

        // fallback: use the ID column if it carries an rsID
        if rsid.is_none() && id.starts_with("rs") {
            rsid = Some(id.clone());
        }

        if let Some(g) = gene.as_ref() {
            if !genes_detected.contains(g) {
                genes_detected.push(g.clone());
            }
        }

        let variant = ParsedVariant {
            chrom, pos, id, ref_allele, alt_allele, qual, filter, info, genotype,
            gene, star, rsid
        };

        let missing = variant.missing_tags();
        if !missing.is_empty() {
            missing_tags.push(format!("Line {}: missing {}", i + 1, missing.join(", ")));
        }

        variants.push(variant);
    }

    let mut all_warnings = warnings;
    all_warnings.extend(missing_tags.into_iter().take(MAX_MISSING_TAG_WARNINGS));

    let validation = VcfValidation {
        valid: errors.is_empty() && header_found,
        errors,
        warnings: all_warnings,
        patient_id,
        variant_count: variants.len(),
        genes_detected: genes_detected.into_iter()
            .filter(|g| SupportedGene::from_str(g).is_ok())
            .collect()
    };

    VcfParseResult {
        validation,
        variants,
        file_size_mb: (file_size_bytes as f64 / (1024.0 * 1024.0) * 1000.0).round() / 1000.0
    }
}
