//! Open Reading Frame (ORF) finder.
//!
//! Scans one forward reading frame for ORFs. An ORF begins at a start
//! codon (ATG) and ends at the first in-frame stop codon (TAA, TAG, TGA)
//! after it. Every in-frame ATG is tried on its own, so an ORF nested
//! inside a longer one is reported too. A start without a stop is not
//! an ORF.

use super::codon::{ReadingFrame, is_start_codon, is_stop_codon, translate};
use super::stats::{KozakContext, gc_content, kozak_context};
use std::fmt;

pub use crate::base::constants::MIN_ORF_LENGTH;

/// An open reading frame found in a sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Orf {
    /// Start position in the input sequence (0-indexed).
    pub start: usize,
    /// End position (exclusive), just past the stop codon.
    pub end: usize,
    /// Reading frame the ORF was found in.
    pub frame: ReadingFrame,
    /// The nucleotide sequence of the ORF, stop codon included.
    pub sequence: String,
}

impl Orf {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn translation(&self) -> String {
        translate(&self.sequence, ReadingFrame::ALL[0])
    }

    pub fn gc_content(&self) -> f64 {
        gc_content(&self.sequence)
    }

    pub fn kozak_context(&self) -> KozakContext {
        kozak_context(&self.sequence)
    }
}

/// `start+1-end (Frame f, Nbp)`
impl fmt::Display for Orf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{} (Frame {}, {}bp)",
            self.start + 1,
            self.end,
            self.frame,
            self.len()
        )
    }
}

/// Find ORFs of at least [`MIN_ORF_LENGTH`] nucleotides in `frame`.
pub fn find_orfs(seq: &str, frame: ReadingFrame) -> Vec<Orf> {
    find_orfs_with_min_length(seq, frame, MIN_ORF_LENGTH)
}

/// Find ORFs of at least `min_length` nucleotides in `frame`, left to right.
pub fn find_orfs_with_min_length(seq: &str, frame: ReadingFrame, min_length: usize) -> Vec<Orf> {
    let bytes = seq.as_bytes();
    let codon_at = |pos: usize| &bytes[pos..pos + 3];
    let mut orfs = Vec::new();

    let mut pos = frame.offset();
    while pos + 3 <= bytes.len() {
        if is_start_codon(codon_at(pos)) {
            let stop = (pos + 3..)
                .step_by(3)
                .take_while(|&j| j + 3 <= bytes.len())
                .find(|&j| is_stop_codon(codon_at(j)));
            if let Some(stop) = stop {
                let end = stop + 3;
                if end - pos >= min_length {
                    orfs.push(Orf {
                        start: pos,
                        end,
                        frame,
                        sequence: seq[pos..end].to_string(),
                    });
                }
            }
        }
        pos += 3;
    }

    orfs
}
