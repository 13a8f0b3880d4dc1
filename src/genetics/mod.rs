//! Genetic code engine.
//!
//! Pure, stateless functions over sequence text:
//! - [`alphabet`] - per-kind alphabets and sequence kinds
//! - [`codon`] - the standard codon table, T/U conversion, translation and
//!   (lossy) reverse translation
//! - [`orf`] - open reading frame search
//! - [`stats`] - GC content, codon counts, Kozak context, fixed-width output
//! - [`report`] - plain-text rendering of ORF listings

pub mod alphabet;
pub mod codon;
mod error;
pub mod orf;
pub mod report;
pub mod stats;

pub use alphabet::{SequenceKind, is_nucleotide_sequence};
pub use codon::{
    ReadingFrame, STOP, UNKNOWN, codons_for, reverse_translate, to_dna, to_rna, translate,
};
pub use error::{Result, TranslationError};
pub use orf::{MIN_ORF_LENGTH, Orf, find_orfs, find_orfs_with_min_length};
pub use report::{Section, sequence_sections};
pub use stats::{
    KozakContext, SequenceStats, count_pattern, format_fixed_width, gc_content, kozak_context,
};
