//! Codon translation with the standard genetic code.
//!
//! The forward table covers all 64 codons. The reverse table lists the
//! codons of each residue in a fixed order; reverse translation always
//! takes the first one, so it is a lossy inverse that yields *a* coding
//! sequence for a protein, not the one it was transcribed from.

use super::error::{Result, TranslationError};
use std::fmt;

/// Translation of the three stop codons.
pub const STOP: char = '*';

/// Translation of a triplet that is not a codon (ambiguous or invalid bases).
pub const UNKNOWN: char = 'X';

// ---------------------------------------------------------------------------
// Base encoding: A=0, C=1, G=2, T/U=3
// ---------------------------------------------------------------------------

fn base_index(b: u8) -> Option<usize> {
    match b.to_ascii_uppercase() {
        b'A' => Some(0),
        b'C' => Some(1),
        b'G' => Some(2),
        b'T' | b'U' => Some(3),
        _ => None,
    }
}

/// Convert a 3-base codon to an index in [0, 64).
pub(crate) fn codon_index(codon: &[u8]) -> Option<usize> {
    match codon {
        &[b1, b2, b3] => Some(base_index(b1)? * 16 + base_index(b2)? * 4 + base_index(b3)?),
        _ => None,
    }
}

// Codon order: AAA, AAC, AAG, AAT, ACA, ACC, ACG, ACT, AGA, AGC, AGG, AGT,
//              ATA, ATC, ATG, ATT, CAA, CAC, CAG, CAT, CCA, CCC, CCG, CCT,
//              CGA, CGC, CGG, CGT, CTA, CTC, CTG, CTT, GAA, GAC, GAG, GAT,
//              GCA, GCC, GCG, GCT, GGA, GGC, GGG, GGT, GTA, GTC, GTG, GTT,
//              TAA, TAC, TAG, TAT, TCA, TCC, TCG, TCT, TGA, TGC, TGG, TGT,
//              TTA, TTC, TTG, TTT

/// Standard genetic code.
const STANDARD: [u8; 64] = [
    b'K', b'N', b'K', b'N', b'T', b'T', b'T', b'T', b'R', b'S', b'R', b'S',
    b'I', b'I', b'M', b'I', b'Q', b'H', b'Q', b'H', b'P', b'P', b'P', b'P',
    b'R', b'R', b'R', b'R', b'L', b'L', b'L', b'L', b'E', b'D', b'E', b'D',
    b'A', b'A', b'A', b'A', b'G', b'G', b'G', b'G', b'V', b'V', b'V', b'V',
    b'*', b'Y', b'*', b'Y', b'S', b'S', b'S', b'S', b'*', b'C', b'W', b'C',
    b'L', b'F', b'L', b'F',
];

/// Index of ATG in [`STANDARD`].
const START_INDEX: usize = 14;

/// Residue → codons (DNA), in the order reverse translation prefers them.
const REVERSE: &[(char, &[&str])] = &[
    ('M', &["ATG"]),
    ('F', &["TTT", "TTC"]),
    ('L', &["TTA", "TTG", "CTT", "CTC", "CTA", "CTG"]),
    ('I', &["ATT", "ATC", "ATA"]),
    ('V', &["GTT", "GTC", "GTA", "GTG"]),
    ('S', &["TCT", "TCC", "TCA", "TCG", "AGT", "AGC"]),
    ('P', &["CCT", "CCC", "CCA", "CCG"]),
    ('T', &["ACT", "ACC", "ACA", "ACG"]),
    ('A', &["GCT", "GCC", "GCA", "GCG"]),
    ('Y', &["TAT", "TAC"]),
    ('H', &["CAT", "CAC"]),
    ('Q', &["CAA", "CAG"]),
    ('N', &["AAT", "AAC"]),
    ('K', &["AAA", "AAG"]),
    ('D', &["GAT", "GAC"]),
    ('E', &["GAA", "GAG"]),
    ('C', &["TGT", "TGC"]),
    ('W', &["TGG"]),
    ('R', &["CGT", "CGC", "CGA", "CGG", "AGA", "AGG"]),
    ('G', &["GGT", "GGC", "GGA", "GGG"]),
    (STOP, &["TAA", "TAG", "TGA"]),
];

/// Translate one codon; `None` if it contains a non-nucleotide.
pub fn translate_codon(codon: &[u8]) -> Option<char> {
    codon_index(codon).map(|idx| STANDARD[idx] as char)
}

pub fn is_start_codon(codon: &[u8]) -> bool {
    codon_index(codon) == Some(START_INDEX)
}

pub fn is_stop_codon(codon: &[u8]) -> bool {
    codon_index(codon).is_some_and(|idx| STANDARD[idx] == b'*')
}

/// All codons for a residue, DNA alphabet, preferred first.
pub fn codons_for(residue: char) -> Option<&'static [&'static str]> {
    let residue = residue.to_ascii_uppercase();
    REVERSE
        .iter()
        .find(|(aa, _)| *aa == residue)
        .map(|(_, codons)| *codons)
}

// ---------------------------------------------------------------------------
// Reading frames
// ---------------------------------------------------------------------------

/// One of the three forward triplet alignments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReadingFrame(u8);

impl ReadingFrame {
    pub const ALL: [ReadingFrame; 3] = [ReadingFrame(0), ReadingFrame(1), ReadingFrame(2)];

    /// Frame starting at `offset`; only 0, 1 and 2 are frames.
    pub fn new(offset: usize) -> Option<Self> {
        (offset < 3).then_some(Self(offset as u8))
    }

    /// The first nucleotide offset read in this frame.
    pub fn offset(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ReadingFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Sequence operations
// ---------------------------------------------------------------------------

/// Replace `T` with `U`; nothing else changes.
pub fn to_rna(seq: &str) -> String {
    seq.chars()
        .map(|c| match c {
            'T' => 'U',
            't' => 'u',
            other => other,
        })
        .collect()
}

/// Replace `U` with `T`; nothing else changes.
pub fn to_dna(seq: &str) -> String {
    seq.chars()
        .map(|c| match c {
            'U' => 'T',
            'u' => 't',
            other => other,
        })
        .collect()
}

/// Translate the complete triplets of `seq` read in `frame`.
///
/// Stop codons become [`STOP`]; triplets that are not codons become
/// [`UNKNOWN`]. An incomplete trailing triplet is ignored. Both DNA and
/// RNA input are accepted.
pub fn translate(seq: &str, frame: ReadingFrame) -> String {
    let bytes = seq.as_bytes();
    bytes
        .get(frame.offset()..)
        .unwrap_or_default()
        .chunks_exact(3)
        .map(|codon| translate_codon(codon).unwrap_or(UNKNOWN))
        .collect()
}

/// Back-translate a protein to DNA using the first codon of each residue.
///
/// Accepts the 20 amino acids plus [`STOP`], case-insensitively. Any other
/// letter aborts with [`TranslationError::UnknownAminoAcid`].
pub fn reverse_translate(protein: &str) -> Result<String> {
    let mut dna = String::with_capacity(protein.len() * 3);
    for (position, residue) in protein.chars().enumerate() {
        let codon = codons_for(residue)
            .and_then(|codons| codons.first())
            .ok_or(TranslationError::UnknownAminoAcid { residue, position })?;
        dna.push_str(codon);
    }
    Ok(dna)
}
