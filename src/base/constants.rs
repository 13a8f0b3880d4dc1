//! Language-wide constants.

/// File extension of BioSyntax source files (without the dot).
pub const BIOSYNTAX_EXT: &str = "biosyntax";

/// Default marker that turns a string literal into a literal reference.
pub const REFERENCE_PREFIX: &str = "biosyntax:";

/// Default minimum ORF length in nucleotides.
pub const MIN_ORF_LENGTH: usize = 90;

/// Default width for fixed-width sequence output.
pub const LINE_WIDTH: usize = 60;

/// Sequence type keywords, in declaration order.
pub const TYPE_KEYWORDS: &[&str] = &["NtSeq", "RNASeq", "DNASeq", "AASeq"];

/// The gene definition keyword.
pub const GENE_KEYWORD: &str = "Gene";

/// Gene property names, in declaration order.
pub const GENE_PROPERTY_NAMES: &[&str] = &[
    "Promoter",
    "Start_Codon",
    "Stop_Codon",
    "Coding_Sequence",
    "Terminator",
];

/// Valid start codons offered by completion.
pub const START_CODONS: &[&str] = &["ATG"];

/// Valid stop codons offered by completion.
pub const STOP_CODONS: &[&str] = &["TAA", "TAG", "TGA"];
