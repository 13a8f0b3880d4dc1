//! Sequence kinds and their alphabets.
//!
//! Alphabets are uppercase; input is uppercased before checking.

use std::fmt;

/// The declared kind of a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceKind {
    /// `NtSeq`: DNA or RNA
    Nucleotide,
    /// `RNASeq`
    Rna,
    /// `DNASeq`
    Dna,
    /// `AASeq`
    AminoAcid,
}

const NUCLEOTIDE: &[u8] = b"ATUCG";
const RNA: &[u8] = b"AUGC";
const DNA: &[u8] = b"ATGC";
const AMINO_ACID: &[u8] = b"ACDEFGHIKLMNPQRSTVWY";

impl SequenceKind {
    pub const ALL: [SequenceKind; 4] = [
        SequenceKind::Nucleotide,
        SequenceKind::Rna,
        SequenceKind::Dna,
        SequenceKind::AminoAcid,
    ];

    /// Parse the source keyword (`NtSeq`, `RNASeq`, `DNASeq`, `AASeq`).
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "NtSeq" => Some(Self::Nucleotide),
            "RNASeq" => Some(Self::Rna),
            "DNASeq" => Some(Self::Dna),
            "AASeq" => Some(Self::AminoAcid),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Nucleotide => "NtSeq",
            Self::Rna => "RNASeq",
            Self::Dna => "DNASeq",
            Self::AminoAcid => "AASeq",
        }
    }

    /// The valid uppercase bytes for this kind.
    pub fn alphabet(self) -> &'static [u8] {
        match self {
            Self::Nucleotide => NUCLEOTIDE,
            Self::Rna => RNA,
            Self::Dna => DNA,
            Self::AminoAcid => AMINO_ACID,
        }
    }

    /// Check one character, case-insensitively.
    pub fn accepts(self, c: char) -> bool {
        c.is_ascii() && self.alphabet().contains(&(c.to_ascii_uppercase() as u8))
    }

    /// Human-readable name, e.g. "DNA Sequence".
    pub fn full_name(self) -> &'static str {
        match self {
            Self::Nucleotide => "Nucleotide Sequence",
            Self::Rna => "RNA Sequence",
            Self::Dna => "DNA Sequence",
            Self::AminoAcid => "Amino Acid Sequence",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Nucleotide => "Generic nucleotide sequence that can represent DNA or RNA.",
            Self::Rna => "Ribonucleic acid sequence that represents RNA molecules.",
            Self::Dna => "Deoxyribonucleic acid sequence that represents DNA molecules.",
            Self::AminoAcid => "Amino acid sequence that represents a protein or peptide.",
        }
    }

    pub fn is_nucleotide(self) -> bool {
        !matches!(self, Self::AminoAcid)
    }
}

impl fmt::Display for SequenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Whether every character of `value` is a nucleotide (`A`, `T`, `U`, `C`, `G`).
pub fn is_nucleotide_sequence(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| SequenceKind::Nucleotide.accepts(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_roundtrip() {
        for kind in SequenceKind::ALL {
            assert_eq!(SequenceKind::from_keyword(kind.keyword()), Some(kind));
        }
        assert_eq!(SequenceKind::from_keyword("Gene"), None);
    }

    #[test]
    fn dna_rejects_u() {
        assert!(!SequenceKind::Dna.accepts('U'));
        assert!(SequenceKind::Nucleotide.accepts('U'));
    }

    #[test]
    fn rna_rejects_t() {
        assert!(!SequenceKind::Rna.accepts('T'));
    }

    #[test]
    fn case_insensitive() {
        assert!(SequenceKind::Dna.accepts('g'));
        assert!(SequenceKind::AminoAcid.accepts('w'));
    }

    #[test]
    fn amino_acids_exclude_stop_and_b() {
        assert!(!SequenceKind::AminoAcid.accepts('*'));
        assert!(!SequenceKind::AminoAcid.accepts('B'));
        assert!(!SequenceKind::AminoAcid.accepts('é'));
    }

    #[test]
    fn nucleotide_sequence_check() {
        assert!(is_nucleotide_sequence("ATGU"));
        assert!(!is_nucleotide_sequence("XYZ"));
        assert!(!is_nucleotide_sequence(""));
    }
}
