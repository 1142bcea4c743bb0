
use rustc_hash::FxHashMap as HashMap;
use serde::Serialize;

/// INFO key carrying the gene symbol
pub const INFO_GENE: &str = "GENE";
/// INFO key carrying the star allele designation
pub const INFO_STAR: &str = "STAR";
/// INFO key carrying the dbSNP identifier
pub const INFO_RS: &str = "RS";
/// INFO key flagging a gene duplication event
pub const INFO_DUP: &str = "DUP";

/// One VCF data row plus the annotations derived from it during parsing.
/// The raw columns are kept verbatim; `gene`, `star` and `rsid` are extracted from the
/// INFO field (with the ID column as an rsID fallback) and may be absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ParsedVariant {
    /// chromosome of the variant
    pub chrom: String,
    /// 1-based position of the variant
    pub pos: u64,
    /// ID column, "." when absent
    pub id: String,
    /// ref allele
    #[serde(rename = "ref")]
    pub ref_allele: String,
    /// alt allele
    #[serde(rename = "alt")]
    pub alt_allele: String,
    /// QUAL column, "." when absent
    pub qual: String,
    /// FILTER column, "." when absent
    pub filter: String,
    /// full INFO field as a key to value mapping; bare keys carry the value "true"
    pub info: HashMap<String, String>,
    /// genotype string from the sample column, e.g. "0/1"
    pub genotype: String,
    /// gene symbol from the GENE tag; absent tags and empty values are both None
    pub gene: Option<String>,
    /// star allele designation from the STAR tag; may be a full diplotype or pipe-delimited list
    pub star: Option<String>,
    /// dbSNP identifier from the RS tag or the ID column
    pub rsid: Option<String>
}

impl ParsedVariant {
    /// Returns the value of an INFO tag if present
    pub fn info_value(&self, key: &str) -> Option<&str> {
        self.info.get(key).map(|v| v.as_str())
    }

    /// True if the DUP tag marks this variant as part of a gene duplication
    pub fn has_duplication_tag(&self) -> bool {
        matches!(self.info_value(INFO_DUP), Some("yes") | Some("true"))
    }

    /// True if the genotype indicates both chromosome copies carry the alternate allele
    pub fn is_homozygous_alt(&self) -> bool {
        self.genotype == "1/1" || self.genotype == "1|1"
    }

    /// True if all three annotation tags resolved (GENE, STAR and an rsID)
    pub fn has_required_tags(&self) -> bool {
        self.gene.is_some() && self.star.is_some() && self.rsid.is_some()
    }

    /// Lists the annotation tags that did not resolve for this variant
    pub fn missing_tags(&self) -> Vec<&'static str> {
        let mut missing = vec![];
        if self.gene.is_none() {
            missing.push(INFO_GENE);
        }
        if self.star.is_none() {
            missing.push(INFO_STAR);
        }
        if self.rsid.is_none() {
            missing.push(INFO_RS);
        }
        missing
    }
}
