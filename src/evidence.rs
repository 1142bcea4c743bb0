
use itertools::Itertools;
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::data_types::classifications::{Phenotype, SupportedGene};
use crate::data_types::variant::ParsedVariant;
use crate::database::star_function::allele_function;
use crate::phenotyper::derive_phenotype;

/// Diplotype placeholder when no resolution was possible
pub const UNKNOWN_DIPLOTYPE: &str = "Unknown";

/// Everything observed for one gene after the resolution pass.
/// Instances are produced by `build_gene_evidence` and never mutated afterward.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneEvidence {
    /// the gene this evidence belongs to
    gene: SupportedGene,
    /// the variants that contributed to this gene, in input order
    variants: Vec<ParsedVariant>,
    /// star allele tokens accumulated from the STAR tags
    star_alleles: Vec<String>,
    /// two "/"-joined allele designations, or "Unknown"
    diplotype: String,
    /// metabolizer phenotype derived from the diplotype
    phenotype: Phenotype,
    /// true if any contributing variant carried a duplication tag
    has_duplication: bool
}

impl GeneEvidence {
    pub fn gene(&self) -> SupportedGene {
        self.gene
    }

    pub fn variants(&self) -> &[ParsedVariant] {
        &self.variants
    }

    pub fn star_alleles(&self) -> &[String] {
        &self.star_alleles
    }

    pub fn diplotype(&self) -> &str {
        &self.diplotype
    }

    pub fn phenotype(&self) -> Phenotype {
        self.phenotype
    }

    pub fn has_duplication(&self) -> bool {
        self.has_duplication
    }
}

/// Mutable accumulator used while walking the variant list; `resolve` consumes it and
/// produces the immutable evidence record.
#[derive(Debug, Default)]
struct EvidenceBuilder {
    variants: Vec<ParsedVariant>,
    star_alleles: Vec<String>,
    direct_diplotype: Option<String>,
    has_duplication: bool
}

impl EvidenceBuilder {
    /// Folds one variant into the accumulator
    fn observe(&mut self, variant: &ParsedVariant) {
        if variant.has_duplication_tag() {
            self.has_duplication = true;
        }

        if let Some(star) = variant.star.as_deref() {
            if star.contains('/') {
                // a complete diplotype takes precedence over single-allele accumulation;
                // with multiple direct diplotypes for one gene, the last one processed wins
                self.direct_diplotype = Some(star.to_string());
            } else if star.contains('|') {
                self.star_alleles.extend(star.split('|').map(String::from));
            } else {
                self.star_alleles.push(star.to_string());
            }
        }

        self.variants.push(variant.clone());
    }

    /// Resolves the accumulated tokens into a diplotype and phenotype
    fn resolve(self, gene: SupportedGene) -> GeneEvidence {
        let diplotype: String = if let Some(direct) = self.direct_diplotype {
            direct
        } else {
            let unique: Vec<&String> = self.star_alleles.iter().unique().collect();
            match unique.len() {
                0 => UNKNOWN_DIPLOTYPE.to_string(),
                1 => {
                    // a single observed allele is ambiguous: homozygous-alt genotypes put it
                    // on both chromosomes, otherwise wild-type is assumed for the other copy
                    if self.variants.iter().any(|v| v.is_homozygous_alt()) {
                        format!("{}/{}", unique[0], unique[0])
                    } else {
                        format!("*1/{}", unique[0])
                    }
                },
                _ => format!("{}/{}", unique[0], unique[1])
            }
        };

        let mut phenotype = Phenotype::Unknown;
        if diplotype != UNKNOWN_DIPLOTYPE {
            let alleles: Vec<&str> = diplotype.split('/').collect();
            if alleles.len() == 2 {
                let func1 = allele_function(gene, alleles[0]);
                let func2 = allele_function(gene, alleles[1]);
                phenotype = derive_phenotype(func1, func2);

                // duplication of a normally-functioning CYP2D6 pushes into ultrarapid territory
                if gene == SupportedGene::Cyp2d6 && self.has_duplication && phenotype == Phenotype::NM {
                    phenotype = Phenotype::URM;
                }
            }
        }

        GeneEvidence {
            gene,
            variants: self.variants,
            star_alleles: self.star_alleles,
            diplotype,
            phenotype,
            has_duplication: self.has_duplication
        }
    }
}

/// Groups variants by supported gene and resolves each group into a GeneEvidence.
/// Variants without a GENE tag, or annotated with an unsupported gene, are skipped.
/// # Arguments
/// * `variants` - the full ordered list of parsed variants
pub fn build_gene_evidence(variants: &[ParsedVariant]) -> BTreeMap<SupportedGene, GeneEvidence> {
    let mut builders: BTreeMap<SupportedGene, EvidenceBuilder> = BTreeMap::new();

    for variant in variants.iter() {
        let gene = match variant.gene.as_deref().map(SupportedGene::from_str) {
            Some(Ok(g)) => g,
            _ => continue
        };
        builders.entry(gene).or_default().observe(variant);
    }

    builders.into_iter()
        .map(|(gene, builder)| (gene, builder.resolve(gene)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::variant::{INFO_DUP, INFO_GENE, INFO_STAR};
    use rustc_hash::FxHashMap as HashMap;

    fn variant(gene: &str, star: Option<&str>, genotype: &str) -> ParsedVariant {
        let mut info: HashMap<String, String> = Default::default();
        info.insert(INFO_GENE.to_string(), gene.to_string());
        if let Some(s) = star {
            info.insert(INFO_STAR.to_string(), s.to_string());
        }
        ParsedVariant {
            chrom: "chr22".to_string(),
            pos: 42128945,
            id: ".".to_string(),
            ref_allele: "C".to_string(),
            alt_allele: "T".to_string(),
            qual: "100".to_string(),
            filter: "PASS".to_string(),
            info,
            genotype: genotype.to_string(),
            gene: Some(gene.to_string()),
            star: star.map(|s| s.to_string()),
            rsid: None
        }
    }

    fn dup_variant(gene: &str, star: &str, genotype: &str) -> ParsedVariant {
        let mut v = variant(gene, Some(star), genotype);
        v.info.insert(INFO_DUP.to_string(), "yes".to_string());
        v
    }

    #[test]
    fn test_heterozygous_single_allele_assumes_wild_type() {
        let evidence = build_gene_evidence(&[variant("CYP2D6", Some("*4"), "0/1")]);
        let d6 = evidence.get(&SupportedGene::Cyp2d6).unwrap();
        assert_eq!(d6.diplotype(), "*1/*4");
        assert_eq!(d6.phenotype(), Phenotype::IM);
    }

    #[test]
    fn test_homozygous_single_allele() {
        let evidence = build_gene_evidence(&[variant("CYP2D6", Some("*4"), "1/1")]);
        let d6 = evidence.get(&SupportedGene::Cyp2d6).unwrap();
        assert_eq!(d6.diplotype(), "*4/*4");
        assert_eq!(d6.phenotype(), Phenotype::PM);

        // phased homozygous genotypes count too
        let evidence = build_gene_evidence(&[variant("CYP2D6", Some("*4"), "1|1")]);
        assert_eq!(evidence.get(&SupportedGene::Cyp2d6).unwrap().diplotype(), "*4/*4");
    }

    #[test]
    fn test_two_observed_alleles() {
        let evidence = build_gene_evidence(&[
            variant("CYP2D6", Some("*4"), "0/1"),
            variant("CYP2D6", Some("*10"), "0/1")
        ]);
        let d6 = evidence.get(&SupportedGene::Cyp2d6).unwrap();
        assert_eq!(d6.diplotype(), "*4/*10");
        // no_function + decreased
        assert_eq!(d6.phenotype(), Phenotype::PM);
    }

    #[test]
    fn test_duplicate_tokens_deduplicated() {
        let evidence = build_gene_evidence(&[
            variant("CYP2D6", Some("*4"), "0/1"),
            variant("CYP2D6", Some("*4"), "0/1"),
            variant("CYP2D6", Some("*2"), "0/1")
        ]);
        let d6 = evidence.get(&SupportedGene::Cyp2d6).unwrap();
        assert_eq!(d6.diplotype(), "*4/*2");
        assert_eq!(d6.star_alleles().len(), 3);
    }

    #[test]
    fn test_pipe_delimited_tokens() {
        let evidence = build_gene_evidence(&[variant("CYP2C19", Some("*2|*17"), "0/1")]);
        let c19 = evidence.get(&SupportedGene::Cyp2c19).unwrap();
        assert_eq!(c19.diplotype(), "*2/*17");
        // no_function + increased
        assert_eq!(c19.phenotype(), Phenotype::IM);
    }

    #[test]
    fn test_direct_diplotype_takes_precedence() {
        let evidence = build_gene_evidence(&[
            variant("CYP2D6", Some("*10"), "0/1"),
            variant("CYP2D6", Some("*1/*2"), "0/1")
        ]);
        let d6 = evidence.get(&SupportedGene::Cyp2d6).unwrap();
        assert_eq!(d6.diplotype(), "*1/*2");
        assert_eq!(d6.phenotype(), Phenotype::NM);

        // the last direct diplotype processed wins
        let evidence = build_gene_evidence(&[
            variant("CYP2D6", Some("*1/*2"), "0/1"),
            variant("CYP2D6", Some("*4/*4"), "0/1")
        ]);
        assert_eq!(evidence.get(&SupportedGene::Cyp2d6).unwrap().diplotype(), "*4/*4");
    }

    #[test]
    fn test_malformed_direct_diplotype_keeps_unknown_phenotype() {
        let evidence = build_gene_evidence(&[variant("CYP2D6", Some("*1/*2/*3"), "0/1")]);
        let d6 = evidence.get(&SupportedGene::Cyp2d6).unwrap();
        assert_eq!(d6.diplotype(), "*1/*2/*3");
        assert_eq!(d6.phenotype(), Phenotype::Unknown);
    }

    #[test]
    fn test_no_star_tokens_leaves_unknown() {
        let evidence = build_gene_evidence(&[variant("CYP2D6", None, "0/1")]);
        let d6 = evidence.get(&SupportedGene::Cyp2d6).unwrap();
        assert_eq!(d6.diplotype(), UNKNOWN_DIPLOTYPE);
        assert_eq!(d6.phenotype(), Phenotype::Unknown);
        assert_eq!(d6.variants().len(), 1);
    }

    #[test]
    fn test_cyp2d6_duplication_override() {
        let evidence = build_gene_evidence(&[dup_variant("CYP2D6", "*1/*2", "0/1")]);
        let d6 = evidence.get(&SupportedGene::Cyp2d6).unwrap();
        assert!(d6.has_duplication());
        assert_eq!(d6.phenotype(), Phenotype::URM);

        // the override only lifts NM; impaired phenotypes are left alone
        let evidence = build_gene_evidence(&[dup_variant("CYP2D6", "*4/*4", "1/1")]);
        assert_eq!(evidence.get(&SupportedGene::Cyp2d6).unwrap().phenotype(), Phenotype::PM);
    }

    #[test]
    fn test_duplication_does_not_apply_to_other_genes() {
        let evidence = build_gene_evidence(&[dup_variant("CYP2C19", "*1/*1", "0/1")]);
        let c19 = evidence.get(&SupportedGene::Cyp2c19).unwrap();
        assert!(c19.has_duplication());
        assert_eq!(c19.phenotype(), Phenotype::NM);
    }

    #[test]
    fn test_unsupported_and_missing_genes_are_skipped() {
        let mut no_gene = variant("CYP2D6", Some("*4"), "0/1");
        no_gene.gene = None;
        let evidence = build_gene_evidence(&[
            no_gene,
            variant("BRCA1", Some("*1"), "0/1"),
            variant("TPMT", Some("*3A"), "0/1")
        ]);
        assert_eq!(evidence.len(), 1);
        assert!(evidence.contains_key(&SupportedGene::Tpmt));
    }

    #[test]
    fn test_unrecognized_alleles_default_to_normal_function() {
        let evidence = build_gene_evidence(&[variant("CYP2C9", Some("*99"), "0/1")]);
        let c9 = evidence.get(&SupportedGene::Cyp2c9).unwrap();
        assert_eq!(c9.diplotype(), "*1/*99");
        assert_eq!(c9.phenotype(), Phenotype::NM);
    }

    #[test]
    fn test_groups_are_independent() {
        let evidence = build_gene_evidence(&[
            variant("CYP2D6", Some("*4"), "0/1"),
            variant("DPYD", Some("*2A"), "1/1"),
            variant("CYP2D6", Some("*10"), "0/1")
        ]);
        assert_eq!(evidence.len(), 2);
        assert_eq!(evidence.get(&SupportedGene::Cyp2d6).unwrap().diplotype(), "*4/*10");
        assert_eq!(evidence.get(&SupportedGene::Dpyd).unwrap().diplotype(), "*2A/*2A");
        assert_eq!(evidence.get(&SupportedGene::Dpyd).unwrap().phenotype(), Phenotype::PM);
    }
}
