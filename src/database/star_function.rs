
use lazy_static::lazy_static;
use rustc_hash::FxHashMap as HashMap;
use std::collections::BTreeMap;

use crate::data_types::classifications::{AlleleFunction, SupportedGene};

lazy_static! {
    /// Star allele function classifications, keyed by gene and then allele designation.
    /// This is demo-scale content approximating CPIC allele function assignments; alleles
    /// absent from the table are treated as normal function at lookup time.
    pub static ref STAR_ALLELE_FUNCTION: BTreeMap<SupportedGene, HashMap<&'static str, AlleleFunction>> = {
        use AlleleFunction::{Decreased, Increased, NoFunction, Normal};
        let table: [(SupportedGene, Vec<(&'static str, AlleleFunction)>); 6] = [
            (SupportedGene::Cyp2d6, vec![
                ("*1", Normal), ("*2", Normal), ("*33", Normal), ("*35", Normal),
                ("*3", NoFunction), ("*4", NoFunction), ("*5", NoFunction), ("*6", NoFunction),
                ("*4x2", NoFunction),
                ("*9", Decreased), ("*10", Decreased), ("*17", Decreased), ("*29", Decreased), ("*41", Decreased)
            ]),
            (SupportedGene::Cyp2c19, vec![
                ("*1", Normal),
                ("*2", NoFunction), ("*3", NoFunction), ("*4", NoFunction),
                ("*17", Increased)
            ]),
            (SupportedGene::Cyp2c9, vec![
                ("*1", Normal),
                ("*2", Decreased), ("*3", Decreased), ("*5", Decreased), ("*6", Decreased),
                ("*8", Decreased), ("*11", Decreased)
            ]),
            (SupportedGene::Slco1b1, vec![
                ("*1", Normal), ("*1a", Normal), ("*1b", Normal),
                ("*5", Decreased), ("*15", Decreased), ("*17", Decreased)
            ]),
            (SupportedGene::Tpmt, vec![
                ("*1", Normal),
                ("*2", NoFunction), ("*3A", NoFunction), ("*3B", NoFunction), ("*3C", NoFunction)
            ]),
            (SupportedGene::Dpyd, vec![
                ("*1", Normal),
                ("*2A", NoFunction), ("*13", NoFunction),
                ("HapB3", Decreased), ("c.1129-5923C>G", Decreased)
            ])
        ];
        table.into_iter()
            .map(|(gene, alleles)| (gene, alleles.into_iter().collect()))
            .collect()
    };
}

/// Looks up the functional classification for a star allele.
/// Alleles that are not in the table default to normal function.
/// # Arguments
/// * `gene` - the gene the allele belongs to
/// * `star_allele` - the allele designation, e.g. "*4"
pub fn allele_function(gene: SupportedGene, star_allele: &str) -> AlleleFunction {
    STAR_ALLELE_FUNCTION.get(&gene)
        .and_then(|alleles| alleles.get(star_allele))
        .copied()
        .unwrap_or(AlleleFunction::Normal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_alleles() {
        assert_eq!(allele_function(SupportedGene::Cyp2d6, "*4"), AlleleFunction::NoFunction);
        assert_eq!(allele_function(SupportedGene::Cyp2d6, "*10"), AlleleFunction::Decreased);
        assert_eq!(allele_function(SupportedGene::Cyp2c19, "*17"), AlleleFunction::Increased);
        assert_eq!(allele_function(SupportedGene::Tpmt, "*3A"), AlleleFunction::NoFunction);
        assert_eq!(allele_function(SupportedGene::Dpyd, "c.1129-5923C>G"), AlleleFunction::Decreased);
        assert_eq!(allele_function(SupportedGene::Slco1b1, "*1b"), AlleleFunction::Normal);
    }

    #[test]
    fn test_unrecognized_allele_defaults_to_normal() {
        assert_eq!(allele_function(SupportedGene::Cyp2d6, "*999"), AlleleFunction::Normal);
        assert_eq!(allele_function(SupportedGene::Dpyd, "HapZ9"), AlleleFunction::Normal);
    }

    #[test]
    fn test_every_gene_has_a_reference_allele() {
        for (gene, alleles) in STAR_ALLELE_FUNCTION.iter() {
            assert_eq!(alleles.get("*1"), Some(&AlleleFunction::Normal), "missing *1 for {gene}");
        }
        assert_eq!(STAR_ALLELE_FUNCTION.len(), 6);
    }
}
