
/// Contains the shared classification enums: phenotypes, allele functions, risk labels, drugs and genes
pub mod classifications;
/// Contains the final per-drug result structure that is serialized to JSON
pub mod pharma_result;
/// Contains the variant records produced by VCF parsing
pub mod variant;
