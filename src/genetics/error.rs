//! Errors raised by the genetic code engine.

use thiserror::Error;

/// Failures that abort a single computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    /// A letter outside the amino-acid alphabet (plus stop) was given to
    /// reverse translation; no codon can stand in for it.
    #[error("invalid amino acid '{residue}' at position {position}")]
    UnknownAminoAcid { residue: char, position: usize },
}

/// Convenience alias for genetic code operations.
pub type Result<T> = std::result::Result<T, TranslationError>;
