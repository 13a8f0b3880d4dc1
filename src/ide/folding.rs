//! Folding ranges: multi-line gene bodies and resolved literal references.

use crate::base::{TextRange, TextSize};
use crate::hir::{AnalyzedFile, Entity, IndexSnapshot, ResolveResult};

use super::analysis::FileTable;

const ELLIPSIS: &str = "...";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FoldingKind {
    /// A gene body.
    Region,
    /// A literal reference shown as its definition's value.
    Reference,
}

/// A foldable range with the text shown while folded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FoldingRange {
    pub range: TextRange,
    pub kind: FoldingKind,
    pub placeholder: String,
    pub collapsed_by_default: bool,
}

/// Get folding ranges for a file, ordered by start offset.
pub fn folding_ranges(file: &AnalyzedFile, files: &FileTable, index: &IndexSnapshot) -> Vec<FoldingRange> {
    let mut ranges = Vec::new();

    for entity in file.entities.iter() {
        let Entity::Gene(gene) = entity else {
            continue;
        };
        let Some(body) = gene.body_range else {
            continue;
        };
        if file.text[body].contains('\n') {
            ranges.push(FoldingRange {
                range: body,
                kind: FoldingKind::Region,
                placeholder: "{...}".to_string(),
                collapsed_by_default: false,
            });
        }
    }

    for reference in file.references.iter() {
        // Only references with a single definition fold
        let ResolveResult::Found(def) = index.resolve(&reference.key) else {
            continue;
        };
        let value = files
            .get(&def.file)
            .and_then(|target| target.entities.get(def.entity))
            .and_then(Entity::value);
        let quote = TextSize::of('"');
        let literal = reference.literal_range;
        ranges.push(FoldingRange {
            range: TextRange::new(literal.start() + quote, literal.end() - quote),
            kind: FoldingKind::Reference,
            placeholder: value.map_or_else(|| ELLIPSIS.to_string(), placeholder_text),
            collapsed_by_default: true,
        });
    }

    ranges.sort_by_key(|r| r.range.start());
    ranges
}

/// Newlines are shown as `\n` and quotes as `\"` so the value reads like a
/// single-line literal.
fn placeholder_text(value: &str) -> String {
    value.replace('\n', "\\n").replace('"', "\\\"")
}
