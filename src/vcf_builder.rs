
use chrono::Utc;
use lazy_static::lazy_static;
use std::collections::BTreeMap;

use crate::data_types::classifications::SupportedGene;

/// One synthesized VCF row from the demo catalog
#[derive(Clone, Debug, PartialEq)]
pub struct BuilderVariant {
    pub chrom: String,
    pub pos: u64,
    pub id: String,
    pub ref_allele: String,
    pub alt_allele: String,
    pub gene: SupportedGene,
    pub star: String,
    pub rs: String,
    pub genotype: String
}

impl BuilderVariant {
    fn new(chrom: &str, pos: u64, id: &str, ref_allele: &str, alt_allele: &str, gene: SupportedGene, star: &str, rs: &str, genotype: &str) -> BuilderVariant {
        BuilderVariant {
            chrom: chrom.to_string(),
            pos,
            id: id.to_string(),
            ref_allele: ref_allele.to_string(),
            alt_allele: alt_allele.to_string(),
            gene,
            star: star.to_string(),
            rs: rs.to_string(),
            genotype: genotype.to_string()
        }
    }

    /// Same variant with a different genotype, used by the sample profiles
    fn with_genotype(&self, genotype: &str) -> BuilderVariant {
        let mut variant = self.clone();
        variant.genotype = genotype.to_string();
        variant
    }
}

/// A named, pre-assembled set of builder variants
#[derive(Clone, Debug)]
pub struct SampleProfile {
    pub name: String,
    pub description: String,
    pub patient_id: String,
    pub variants: Vec<BuilderVariant>
}

lazy_static! {
    /// The per-gene catalog of known demo variants available to the builder
    pub static ref AVAILABLE_VARIANTS: BTreeMap<SupportedGene, Vec<BuilderVariant>> = {
        use SupportedGene::{Cyp2d6, Cyp2c19, Cyp2c9, Slco1b1, Tpmt, Dpyd};
        let mut catalog: BTreeMap<SupportedGene, Vec<BuilderVariant>> = BTreeMap::new();
        catalog.insert(Cyp2d6, vec![
            BuilderVariant::new("chr22", 42128945, "rs3892097", "C", "T", Cyp2d6, "*4", "rs3892097", "0/1"),
            BuilderVariant::new("chr22", 42126611, "rs16947", "G", "A", Cyp2d6, "*2", "rs16947", "0/1"),
            BuilderVariant::new("chr22", 42127941, "rs1135840", "C", "G", Cyp2d6, "*1", "rs1135840", "0/1"),
            BuilderVariant::new("chr22", 42130692, "rs5030655", "T", ".", Cyp2d6, "*6", "rs5030655", "0/1"),
            BuilderVariant::new("chr22", 42127803, "rs1065852", "C", "T", Cyp2d6, "*10", "rs1065852", "0/1"),
            BuilderVariant::new("chr22", 42126938, "rs28371706", "C", "T", Cyp2d6, "*17", "rs28371706", "0/1")
        ]);
        catalog.insert(Cyp2c19, vec![
            BuilderVariant::new("chr10", 96541616, "rs4244285", "G", "A", Cyp2c19, "*2", "rs4244285", "0/1"),
            BuilderVariant::new("chr10", 96540410, "rs4986893", "G", "A", Cyp2c19, "*3", "rs4986893", "0/1"),
            BuilderVariant::new("chr10", 96522463, "rs12248560", "C", "T", Cyp2c19, "*17", "rs12248560", "0/1")
        ]);
        catalog.insert(Cyp2c9, vec![
            BuilderVariant::new("chr10", 96702047, "rs1799853", "C", "T", Cyp2c9, "*2", "rs1799853", "0/1"),
            BuilderVariant::new("chr10", 96741053, "rs1057910", "A", "C", Cyp2c9, "*3", "rs1057910", "0/1")
        ]);
        catalog.insert(Slco1b1, vec![
            BuilderVariant::new("chr12", 21331549, "rs4149056", "T", "C", Slco1b1, "*5", "rs4149056", "0/1"),
            BuilderVariant::new("chr12", 21329738, "rs2306283", "A", "G", Slco1b1, "*1b", "rs2306283", "0/1")
        ]);
        catalog.insert(Tpmt, vec![
            BuilderVariant::new("chr6", 18130918, "rs1800462", "C", "G", Tpmt, "*2", "rs1800462", "0/1"),
            BuilderVariant::new("chr6", 18143724, "rs1800460", "T", "C", Tpmt, "*3B", "rs1800460", "0/1"),
            BuilderVariant::new("chr6", 18139228, "rs1142345", "A", "G", Tpmt, "*3C", "rs1142345", "0/1")
        ]);
        catalog.insert(Dpyd, vec![
            BuilderVariant::new("chr1", 97915614, "rs3918290", "C", "T", Dpyd, "*2A", "rs3918290", "0/1"),
            BuilderVariant::new("chr1", 97981395, "rs55886062", "A", "C", Dpyd, "*13", "rs55886062", "0/1"),
            BuilderVariant::new("chr1", 97547947, "rs75017182", "G", "C", Dpyd, "HapB3", "rs75017182", "0/1")
        ]);
        catalog
    };

    /// Pre-assembled demo patients
    pub static ref SAMPLE_PROFILES: Vec<SampleProfile> = {
        let cyp2d6 = &AVAILABLE_VARIANTS[&SupportedGene::Cyp2d6];
        let dpyd = &AVAILABLE_VARIANTS[&SupportedGene::Dpyd];
        vec![
            SampleProfile {
                name: "Codeine URM Risk".to_string(),
                description: "CYP2D6 ultrarapid metabolizer — high morphine conversion risk with codeine".to_string(),
                patient_id: "PATIENT_CYP2D6_URM".to_string(),
                variants: vec![
                    cyp2d6[1].with_genotype("1/1"),
                    cyp2d6[2].with_genotype("1/1")
                ]
            },
            SampleProfile {
                name: "Fluorouracil DPYD Risk".to_string(),
                description: "DPYD deficiency — severe fluorouracil toxicity risk".to_string(),
                patient_id: "PATIENT_DPYD_RISK".to_string(),
                variants: vec![
                    dpyd[0].clone(),
                    dpyd[2].clone()
                ]
            }
        ]
    };
}

/// Looks up a sample profile by its display name
pub fn find_profile(name: &str) -> Option<&'static SampleProfile> {
    SAMPLE_PROFILES.iter().find(|p| p.name == name)
}

/// Renders a complete annotated VCF for the given variants.
/// The output parses back into records whose gene/star/rsid match the input variants,
/// which is what makes the builder usable for demo round trips.
/// # Arguments
/// * `patient_id` - written as the sample column name
/// * `variants` - the data rows to emit
pub fn generate_vcf_content(patient_id: &str, variants: &[BuilderVariant]) -> String {
    let file_date = Utc::now().format("%Y%m%d");
    let mut lines: Vec<String> = vec![
        "##fileformat=VCFv4.2".to_string(),
        format!("##fileDate={file_date}"),
        "##source=PharmaGuard_VCFBuilder".to_string(),
        "##INFO=<ID=GENE,Number=1,Type=String,Description=\"Gene symbol\">".to_string(),
        "##INFO=<ID=STAR,Number=.,Type=String,Description=\"Star allele designation\">".to_string(),
        "##INFO=<ID=RS,Number=1,Type=String,Description=\"dbSNP ID\">".to_string(),
        "##FORMAT=<ID=GT,Number=1,Type=String,Description=\"Genotype\">".to_string(),
        format!("#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\t{patient_id}")
    ];

    for v in variants.iter() {
        let info = format!("GENE={};STAR={};RS={}", v.gene, v.star, v.rs);
        lines.push(format!(
            "{}\t{}\t{}\t{}\t{}\t100\tPASS\t{}\tGT\t{}",
            v.chrom, v.pos, v.id, v.ref_allele, v.alt_allele, info, v.genotype
        ));
    }

    lines.join("\n") + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_vcf;
    use crate::validator::validate_vcf;

    #[test]
    fn test_generated_content_passes_precheck() {
        let variants = &AVAILABLE_VARIANTS[&SupportedGene::Cyp2d6];
        let content = generate_vcf_content("PATIENT_DEMO", variants);
        let precheck = validate_vcf(&content);
        assert!(precheck.ok, "errors: {:?}", precheck.errors);
        assert!(precheck.warnings.is_empty());
        assert_eq!(precheck.stats.sample_name.as_deref(), Some("PATIENT_DEMO"));
        assert_eq!(precheck.stats.variant_lines, variants.len());
    }

    #[test]
    fn test_round_trip_through_parser() {
        // every catalog variant must survive generation and re-parsing unchanged
        let variants: Vec<BuilderVariant> = AVAILABLE_VARIANTS.values().flatten().cloned().collect();
        let content = generate_vcf_content("PATIENT_ROUNDTRIP", &variants);
        let parsed = parse_vcf(&content, "roundtrip.vcf", content.len() as u64);

        assert!(parsed.validation.valid);
        assert_eq!(parsed.validation.patient_id, "PATIENT_ROUNDTRIP");
        assert_eq!(parsed.variants.len(), variants.len());
        for (input, output) in variants.iter().zip(parsed.variants.iter()) {
            assert_eq!(output.gene.as_deref(), Some(input.gene.to_string().as_str()));
            assert_eq!(output.star.as_deref(), Some(input.star.as_str()));
            assert_eq!(output.rsid.as_deref(), Some(input.rs.as_str()));
            assert_eq!(output.genotype, input.genotype);
            assert_eq!(output.chrom, input.chrom);
            assert_eq!(output.pos, input.pos);
        }
    }

    #[test]
    fn test_sample_profiles_resolve() {
        assert!(find_profile("Codeine URM Risk").is_some());
        assert!(find_profile("no such profile").is_none());

        let profile = find_profile("Fluorouracil DPYD Risk").unwrap();
        assert_eq!(profile.patient_id, "PATIENT_DPYD_RISK");
        assert_eq!(profile.variants.len(), 2);
        assert!(profile.variants.iter().all(|v| v.gene == SupportedGene::Dpyd));
    }

    #[test]
    fn test_profile_genotype_overrides() {
        let profile = find_profile("Codeine URM Risk").unwrap();
        assert!(profile.variants.iter().all(|v| v.genotype == "1/1"));
        // the catalog entries themselves stay heterozygous
        assert!(AVAILABLE_VARIANTS[&SupportedGene::Cyp2d6].iter().all(|v| v.genotype == "0/1"));
    }
}
