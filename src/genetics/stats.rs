//! Composition statistics and display helpers.

use std::fmt;

/// Percentage of `G`/`C` characters (case-insensitive) over the total length.
///
/// An empty sequence has 0% GC.
pub fn gc_content(seq: &str) -> f64 {
    if seq.is_empty() {
        return 0.0;
    }
    let gc = seq
        .bytes()
        .filter(|b| matches!(b.to_ascii_uppercase(), b'G' | b'C'))
        .count();
    gc as f64 / seq.chars().count() as f64 * 100.0
}

/// Number of non-overlapping occurrences of `pattern`.
pub fn count_pattern(seq: &str, pattern: &str) -> usize {
    if pattern.is_empty() {
        return 0;
    }
    seq.matches(pattern).count()
}

/// Basic statistics of a nucleotide sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceStats {
    pub length: usize,
    pub gc_content: f64,
    /// Occurrences of `ATG`, in any frame.
    pub start_codons: usize,
    /// Occurrences of `TAA`, `TAG` and `TGA`, in any frame.
    pub stop_codons: usize,
}

impl SequenceStats {
    pub fn compute(seq: &str) -> Self {
        Self {
            length: seq.chars().count(),
            gc_content: gc_content(seq),
            start_codons: count_pattern(seq, "ATG"),
            stop_codons: ["TAA", "TAG", "TGA"]
                .iter()
                .map(|stop| count_pattern(seq, stop))
                .sum(),
        }
    }
}

/// Three lines: GC content, start codon count, stop codon count.
impl fmt::Display for SequenceStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "GC Content: {:.1}%", self.gc_content)?;
        writeln!(f, "Start Codons (ATG): {}", self.start_codons)?;
        write!(f, "Stop Codons (TAA/TAG/TGA): {}", self.stop_codons)
    }
}

/// The window of a sequence reported as its Kozak context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KozakContext {
    /// The first 9 nucleotides.
    Window(String),
    TooShort,
}

/// Length of the Kozak window.
const KOZAK_WINDOW: usize = 9;

/// The first 9 nucleotides of `seq`, informational only.
pub fn kozak_context(seq: &str) -> KozakContext {
    if seq.chars().count() < KOZAK_WINDOW {
        return KozakContext::TooShort;
    }
    KozakContext::Window(seq.chars().take(KOZAK_WINDOW).collect())
}

impl fmt::Display for KozakContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KozakContext::Window(window) => write!(f, "({window})"),
            KozakContext::TooShort => f.write_str("Sequence too short"),
        }
    }
}

/// Wrap `seq` into lines of at most `width` characters.
///
/// Existing line breaks are kept as they are; each existing line is wrapped
/// on its own. A width of zero is treated as one.
pub fn format_fixed_width(seq: &str, width: usize) -> String {
    let width = width.max(1);
    let mut lines = Vec::new();
    for line in seq.split('\n') {
        let chars: Vec<char> = line.chars().collect();
        if chars.is_empty() {
            lines.push(String::new());
            continue;
        }
        lines.extend(chars.chunks(width).map(|chunk| chunk.iter().collect::<String>()));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gc_content_percentage() {
        assert_eq!(gc_content("GGCC"), 100.0);
        assert_eq!(gc_content("ATGC"), 50.0);
        assert_eq!(gc_content("atgc"), 50.0);
        assert_eq!(gc_content("AAAT"), 0.0);
        assert_eq!(gc_content(""), 0.0);
    }

    #[test]
    fn pattern_counts_do_not_overlap() {
        assert_eq!(count_pattern("ATGATG", "ATG"), 2);
        assert_eq!(count_pattern("AAAA", "AA"), 2);
        assert_eq!(count_pattern("AAAA", ""), 0);
    }

    #[test]
    fn stats_display() {
        let stats = SequenceStats::compute("ATGAAATAA");
        assert_eq!(stats.length, 9);
        assert_eq!(stats.start_codons, 1);
        // TGA at offset 1 counts as well as the in-frame TAA
        assert_eq!(stats.stop_codons, 2);
        assert_eq!(
            stats.to_string(),
            "GC Content: 11.1%\nStart Codons (ATG): 1\nStop Codons (TAA/TAG/TGA): 2"
        );
    }

    #[test]
    fn codon_counts_ignore_frame() {
        let in_frame = SequenceStats::compute("ATGTAG");
        assert_eq!((in_frame.start_codons, in_frame.stop_codons), (1, 1));
        let shifted = SequenceStats::compute("CTGACATGC");
        assert_eq!((shifted.start_codons, shifted.stop_codons), (1, 1));
    }

    #[test]
    fn kozak() {
        assert_eq!(kozak_context("GCCACCATGG").to_string(), "(GCCACCATG)");
        assert_eq!(kozak_context("ATGAAATA"), KozakContext::TooShort);
        assert_eq!(kozak_context("ATG").to_string(), "Sequence too short");
    }

    #[test]
    fn fixed_width() {
        let seq = "A".repeat(130);
        let wrapped = format_fixed_width(&seq, 60);
        let lines: Vec<_> = wrapped.lines().map(str::len).collect();
        assert_eq!(lines, vec![60, 60, 10]);
        assert_eq!(wrapped.replace('\n', ""), seq);
    }

    #[test]
    fn fixed_width_keeps_existing_breaks() {
        assert_eq!(format_fixed_width("ABCDE\nFG", 2), "AB\nCD\nE\nFG");
        assert_eq!(format_fixed_width("", 60), "");
        assert_eq!(format_fixed_width("ABC", 0), "A\nB\nC");
    }
}
