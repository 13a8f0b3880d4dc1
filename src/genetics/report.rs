//! Plain-text analysis sections for sequences.
//!
//! Output is a list of label/value pairs; presentation is left to the caller.

use super::alphabet::SequenceKind;
use super::codon::{ReadingFrame, codons_for, reverse_translate, to_dna, to_rna, translate};
use super::orf::{Orf, find_orfs_with_min_length};
use super::stats::{SequenceStats, format_fixed_width};
use crate::base::AnalysisConfig;

/// One labelled block of a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub label: String,
    pub value: String,
}

impl Section {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Render ORFs one block each, separated by a blank line.
pub fn orf_details(orfs: &[Orf], line_width: usize) -> String {
    orfs.iter()
        .map(|orf| {
            format!(
                "{orf}\n  Sequence: {}\n  Translation: {}\n  GC Content: {:.1}%\n  Kozak Context: {}",
                format_fixed_width(&orf.sequence, line_width),
                orf.translation(),
                orf.gc_content(),
                orf.kozak_context(),
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// `M: ATG` lines, one per residue in order; unknown residues list `Unknown`.
pub fn possible_codons(protein: &str) -> String {
    protein
        .chars()
        .map(|aa| {
            let codons = codons_for(aa).map_or_else(|| "Unknown".to_string(), |c| c.join(", "));
            format!("{aa}: {codons}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Sections describing `sequence` (whitespace already removed, uppercase).
///
/// Length, statistics and the sequence itself come first, followed by the
/// reading-frame analysis (or possible codons for proteins) and the
/// RNA/DNA/protein forms.
pub fn sequence_sections(sequence: &str, kind: SequenceKind, config: &AnalysisConfig) -> Vec<Section> {
    let stats = SequenceStats::compute(sequence);
    let mut sections = vec![
        Section::new("Sequence Length", format!("{} bp", stats.length)),
        Section::new("Basic Statistics", stats.to_string()),
        Section::new("Sequence", sequence),
    ];
    if sequence.is_empty() {
        return sections;
    }

    if kind == SequenceKind::AminoAcid {
        sections.push(Section::new("Possible DNA Codons", possible_codons(sequence)));
    } else {
        let analyzed = if kind == SequenceKind::Rna {
            to_dna(sequence)
        } else {
            sequence.to_string()
        };
        sections.extend(reading_frame_sections(&analyzed, config));
    }

    sections.extend(form_sections(sequence, kind, config.line_width));
    sections
}

fn reading_frame_sections(sequence: &str, config: &AnalysisConfig) -> Vec<Section> {
    let mut sections = Vec::new();
    for frame in ReadingFrame::ALL {
        let orfs = find_orfs_with_min_length(sequence, frame, config.min_orf_length);
        if orfs.is_empty() {
            continue;
        }
        if sections.is_empty() {
            sections.push(Section::new("Reading Frames Analysis", ""));
        }
        sections.push(Section::new(
            format!("Frame {frame}"),
            orf_details(&orfs, config.line_width),
        ));
        sections.push(Section::new(
            format!("Frame {frame} Translation"),
            format_fixed_width(&translate(sequence, frame), config.line_width),
        ));
    }
    sections
}

fn form_sections(sequence: &str, kind: SequenceKind, line_width: usize) -> Vec<Section> {
    let mut sections = Vec::new();
    match kind {
        SequenceKind::Nucleotide | SequenceKind::Dna | SequenceKind::Rna => {
            let dna = to_dna(sequence);
            if kind == SequenceKind::Rna {
                sections.push(Section::new("RNA Form", sequence));
                sections.push(Section::new("DNA Form", dna.as_str()));
            } else {
                sections.push(Section::new("RNA Form", to_rna(sequence)));
                sections.push(Section::new("DNA Form", sequence));
            }
            for frame in ReadingFrame::ALL {
                let protein = translate(&dna, frame);
                if !protein.is_empty() {
                    sections.push(Section::new(
                        format!("Amino Acid (Frame {frame})"),
                        format_fixed_width(&protein, line_width),
                    ));
                }
            }
        }
        SequenceKind::AminoAcid => match reverse_translate(sequence) {
            Ok(dna) => {
                sections.push(Section::new("RNA Form", to_rna(&dna)));
                sections.insert(0, Section::new("DNA Form", dna));
                sections.push(Section::new("Amino Acid", sequence));
            }
            Err(err) => {
                sections.push(Section::new("DNA Form", err.to_string()));
                sections.push(Section::new("Amino Acid", sequence));
            }
        },
    }
    sections
}
