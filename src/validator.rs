
use serde::Serialize;

use crate::data_types::variant::{INFO_GENE, INFO_RS, INFO_STAR};
use crate::parser::parse_info_field;

/// The column names every VCF header must start with, in order
const REQUIRED_HEADER_PREFIX: [&str; 8] = ["#CHROM", "POS", "ID", "REF", "ALT", "QUAL", "FILTER", "INFO"];

/// Aggregate counts collected during the structural pre-check
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PrecheckStats {
    pub has_fileformat: bool,
    pub has_header: bool,
    pub columns_ok: bool,
    /// the last header column, i.e. the sample/patient identifier
    pub sample_name: Option<String>,
    pub variant_lines: usize,
    pub missing_gene_count: usize,
    pub missing_rsid_count: usize,
    pub missing_star_count: usize
}

/// Result of the structural pre-check.
/// Errors are corrective, human-readable strings; the orchestrating caller treats any
/// non-empty error list as "cannot analyze".
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VcfPrecheck {
    pub ok: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub stats: PrecheckStats
}

/// Runs the cheap structural pre-check on raw VCF text.
/// This is a pure function of the text: it never mutates input and never fails, it only
/// reports what it found.
/// # Arguments
/// * `content` - the raw file text
pub fn validate_vcf(content: &str) -> VcfPrecheck {
    let lines: Vec<&str> = content.split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .collect();

    let mut errors: Vec<String> = vec![];
    let mut warnings: Vec<String> = vec![];
    let mut stats = PrecheckStats::default();

    // the exact fileformat declaration must come first
    let first_non_empty = lines.iter().find(|l| !l.trim().is_empty()).unwrap_or(&"");
    if first_non_empty.starts_with("##fileformat=VCFv4.2") {
        stats.has_fileformat = true;
    } else {
        errors.push("Missing VCFv4.2 header → add \"##fileformat=VCFv4.2\" as the first line".to_string());
    }

    // column header line
    match lines.iter().find(|l| l.starts_with("#CHROM")) {
        Some(header) => {
            stats.has_header = true;
            let cols: Vec<&str> = header.split('\t').collect();
            let prefix_ok = REQUIRED_HEADER_PREFIX.iter().enumerate()
                .all(|(i, expected)| cols.get(i) == Some(expected));
            if !prefix_ok {
                errors.push("Header row must be TAB-separated → ensure columns are separated by tabs, not spaces".to_string());
            }

            let format_idx = cols.iter().position(|c| *c == "FORMAT");
            let sample_cols = format_idx.map(|idx| cols.len() - idx - 1).unwrap_or(0);
            if format_idx.is_none() || sample_cols < 1 {
                errors.push("No sample column found → include FORMAT and a sample genotype column".to_string());
            } else if let Some(sample) = cols.last() {
                stats.sample_name = Some(sample.to_string());
            }
            stats.columns_ok = prefix_ok && format_idx.is_some() && sample_cols >= 1;
        },
        None => {
            errors.push("Missing header line → add a line starting with \"#CHROM\\tPOS\\tID\\tREF\\tALT\\tQUAL\\tFILTER\\tINFO\\tFORMAT\\t<SAMPLE>\"".to_string());
        }
    }

    // data line structure and annotation completeness
    for (i, line) in lines.iter().enumerate() {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let parts: Vec<&str> = line.split('\t').collect();
        if parts.len() < 10 {
            errors.push(format!("Data line {} has fewer than 10 TAB-separated columns → export a full VCF with FORMAT and sample genotype", i + 1));
            continue;
        }
        stats.variant_lines += 1;

        let info = parse_info_field(parts[7]);
        if !info.get(INFO_GENE).is_some_and(|v| !v.is_empty()) {
            stats.missing_gene_count += 1;
        }
        if !info.get(INFO_RS).is_some_and(|v| !v.is_empty()) && !parts[2].starts_with("rs") {
            stats.missing_rsid_count += 1;
        }
        if !info.get(INFO_STAR).is_some_and(|v| !v.is_empty()) {
            stats.missing_star_count += 1;
        }
    }

    if stats.missing_gene_count > 0 || stats.missing_rsid_count > 0 || stats.missing_star_count > 0 {
        let mut pieces: Vec<String> = vec![];
        if stats.missing_gene_count > 0 {
            pieces.push(format!("{} without GENE", stats.missing_gene_count));
        }
        if stats.missing_rsid_count > 0 {
            pieces.push(format!("{} without RSID", stats.missing_rsid_count));
        }
        if stats.missing_star_count > 0 {
            pieces.push(format!("{} without STAR", stats.missing_star_count));
        }
        warnings.push(format!("Some annotations are missing ({}) — results may be Unknown", pieces.join(", ")));
    }

    VcfPrecheck {
        ok: errors.is_empty(),
        errors,
        warnings,
        stats
    }
}
