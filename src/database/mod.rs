
/// Contains the static drug decision rules keyed by drug and phenotype
pub mod drug_rules;
/// Contains the drug to primary gene mapping and the CPIC guideline links
pub mod guidelines;
/// Contains the star allele function classifications per gene
pub mod star_function;
