
use crate::data_types::classifications::{AlleleFunction, Phenotype};

/// Maps a pair of allele functions to the metabolizer phenotype.
/// The pair is unordered; inputs are sorted by label before matching, so each unordered
/// combination has exactly one entry below. The table is an intentional approximation
/// of CPIC activity-score phenotyping and is not monotonic: (decreased, increased) maps
/// to NM while (no_function, increased) maps to IM.
/// # Arguments
/// * `func1` - function of the first allele in the diplotype
/// * `func2` - function of the second allele in the diplotype
pub fn derive_phenotype(func1: AlleleFunction, func2: AlleleFunction) -> Phenotype {
    use AlleleFunction::{Decreased, Increased, NoFunction, Normal};

    let (first, second) = if func1 <= func2 {
        (func1, func2)
    } else {
        (func2, func1)
    };

    match (first, second) {
        (NoFunction, NoFunction) => Phenotype::PM,
        (Decreased, NoFunction) => Phenotype::PM,
        (NoFunction, Normal) => Phenotype::IM,
        (Increased, NoFunction) => Phenotype::IM,
        (Decreased, Decreased) => Phenotype::IM,
        (Decreased, Normal) => Phenotype::IM,
        (Decreased, Increased) => Phenotype::NM,
        (Normal, Normal) => Phenotype::NM,
        (Increased, Normal) => Phenotype::RM,
        (Increased, Increased) => Phenotype::URM,
        _ => Phenotype::Unknown
    }
}
