//! Completion suggestions implementation.

use std::sync::Arc;

use crate::base::constants::{GENE_KEYWORD, GENE_PROPERTY_NAMES, START_CODONS, STOP_CODONS, TYPE_KEYWORDS};
use crate::base::{AnalysisConfig, LanguageMode, TextSize};
use crate::hir::{AnalyzedFile, IndexSnapshot};
use crate::parser::{SyntaxKind, Token, string_is_terminated, tokenize_with_mode, unescape_string};

use super::analysis::FileTable;

/// Kind of completion item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionKind {
    Keyword,
    /// A gene property name.
    Property,
    /// A literal value such as a codon.
    Value,
    /// A key for a literal reference.
    Reference,
}

impl CompletionKind {
    /// Convert to LSP completion item kind number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            CompletionKind::Keyword => 14,   // Keyword
            CompletionKind::Property => 10,  // Property
            CompletionKind::Value => 12,     // Value
            CompletionKind::Reference => 18, // Reference
        }
    }
}

/// A completion suggestion.
#[derive(Clone, Debug)]
pub struct CompletionItem {
    /// The text to insert.
    pub label: Arc<str>,
    /// The kind of completion.
    pub kind: CompletionKind,
    /// Detail text (shown after label).
    pub detail: Option<Arc<str>>,
    /// Sort priority (lower = higher priority).
    pub sort_priority: u32,
}

impl CompletionItem {
    /// Create a new completion item.
    pub fn new(label: impl Into<Arc<str>>, kind: CompletionKind) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: None,
            sort_priority: 100,
        }
    }

    /// Set the detail text.
    pub fn with_detail(mut self, detail: impl Into<Arc<str>>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Set the sort priority.
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.sort_priority = priority;
        self
    }
}

/// Completion context.
#[derive(Debug, PartialEq, Eq)]
enum CompletionContext {
    /// Inside a string that starts with the reference prefix
    ReferenceKey,
    /// Value of `Start_Codon`
    StartCodon,
    /// Value of `Stop_Codon`
    StopCodon,
    /// Between the braces of a gene
    GeneBody,
    /// Where an entity can start
    TopLevel,
    None,
}

/// Get completion suggestions at `offset`.
pub fn completions(
    file: &AnalyzedFile,
    files: &FileTable,
    index: &IndexSnapshot,
    config: &AnalysisConfig,
    offset: TextSize,
) -> Vec<CompletionItem> {
    let context = determine_context(file, config, offset);
    tracing::trace!("[COMPLETION] {:?} at {:?}", context, offset);

    match context {
        CompletionContext::ReferenceKey => reference_completions(files, index),
        CompletionContext::StartCodon => value_completions(START_CODONS),
        CompletionContext::StopCodon => value_completions(STOP_CODONS),
        CompletionContext::GeneBody => keyword_completions(GENE_PROPERTY_NAMES, CompletionKind::Property),
        CompletionContext::TopLevel => {
            let mut items = keyword_completions(TYPE_KEYWORDS, CompletionKind::Keyword);
            items.push(
                CompletionItem::new(GENE_KEYWORD, CompletionKind::Keyword)
                    .with_priority(TYPE_KEYWORDS.len() as u32),
            );
            items
        }
        CompletionContext::None => Vec::new(),
    }
}

fn determine_context(file: &AnalyzedFile, config: &AnalysisConfig, offset: TextSize) -> CompletionContext {
    let in_reference = file.references.iter().any(|r| {
        r.literal_range.start() < offset && offset < r.literal_range.end()
    });
    if in_reference {
        return CompletionContext::ReferenceKey;
    }
    if !file.is_biosyntax() {
        return CompletionContext::None;
    }
    let Some(before) = file.text.get(..usize::from(offset)) else {
        return CompletionContext::None;
    };

    let tokens: Vec<Token<'_>> = tokenize_with_mode(before, config.mode)
        .into_iter()
        .filter(|t| !t.kind.is_trivia() && t.kind != SyntaxKind::EOF)
        .collect();

    // An unterminated string at the end means the cursor is inside it
    let mut rest = tokens.as_slice();
    let mut in_string = false;
    if let Some((last, init)) = rest.split_last() {
        if last.kind == SyntaxKind::STRING && !string_is_terminated(last.text) {
            let content = unescape_string(last.text.trim_start_matches('"'));
            if content.starts_with(config.reference_prefix.as_str()) {
                return CompletionContext::ReferenceKey;
            }
            in_string = true;
            rest = init;
        }
    }

    if config.mode == LanguageMode::Properties {
        return CompletionContext::None;
    }

    let starts_entity = |kind: SyntaxKind| kind.is_type_keyword() || kind == SyntaxKind::GENE_KW;
    match rest {
        [.., keyword, eq] if eq.kind == SyntaxKind::EQ => {
            return match keyword.kind {
                SyntaxKind::START_CODON_KW => CompletionContext::StartCodon,
                SyntaxKind::STOP_CODON_KW => CompletionContext::StopCodon,
                _ => CompletionContext::None,
            };
        }
        _ if in_string => return CompletionContext::None,
        // Typing the name of a declaration or gene
        [.., last] if starts_entity(last.kind) => return CompletionContext::None,
        [.., keyword, name] if starts_entity(keyword.kind) && name.kind == SyntaxKind::IDENT => {
            return CompletionContext::None;
        }
        _ => {}
    }

    if in_gene_body(rest) {
        CompletionContext::GeneBody
    } else {
        CompletionContext::TopLevel
    }
}

/// Whether the tokens end inside an open gene body.
fn in_gene_body(tokens: &[Token<'_>]) -> bool {
    let mut in_body = false;
    let mut after_gene = false;
    for token in tokens {
        match token.kind {
            SyntaxKind::GENE_KW => {
                in_body = false;
                after_gene = true;
            }
            SyntaxKind::L_BRACE if after_gene => {
                in_body = true;
                after_gene = false;
            }
            SyntaxKind::R_BRACE => in_body = false,
            kind if kind.is_type_keyword() => {
                in_body = false;
                after_gene = false;
            }
            _ => {}
        }
    }
    in_body
}

fn keyword_completions(keywords: &[&str], kind: CompletionKind) -> Vec<CompletionItem> {
    keywords
        .iter()
        .enumerate()
        .map(|(i, label)| CompletionItem::new(*label, kind).with_priority(i as u32))
        .collect()
}

fn value_completions(codons: &[&str]) -> Vec<CompletionItem> {
    keyword_completions(codons, CompletionKind::Value)
}

/// Every known key, with the file(s) defining it as detail.
fn reference_completions(files: &FileTable, index: &IndexSnapshot) -> Vec<CompletionItem> {
    index
        .completion_variants()
        .into_iter()
        .map(|key| {
            let locations: Vec<String> = index
                .resolve_all(&key)
                .iter()
                .map(|def| {
                    files
                        .get(&def.file)
                        .map(|f| f.display_name())
                        .unwrap_or_else(|| def.file.to_string())
                })
                .collect();
            CompletionItem::new(key.as_str(), CompletionKind::Reference)
                .with_detail(locations.join(", "))
                .with_priority(10)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::base::FileId;
    use crate::hir::{FileContribution, ProjectIndex};

    fn labels(source_with_cursor: &str) -> Vec<String> {
        let offset = source_with_cursor.find('|').expect("cursor marker");
        let source = source_with_cursor.replacen('|', "", 1);
        let config = AnalysisConfig::default();
        let index = ProjectIndex::new();
        let mut files = FileTable::new();
        for (i, (path, text)) in [("defs.biosyntax", "DNASeq dna1 = \"ATG\"\nmsg = \"hi\""), ("cur.biosyntax", source.as_str())]
            .into_iter()
            .enumerate()
        {
            let file = AnalyzedFile::analyze(FileId::new(i as u32), PathBuf::from(path), Arc::from(text), &config);
            index.update_file(file.id, FileContribution::new(&file.entities, &file.references));
            files.insert(file.id, Arc::new(file));
        }
        let current = &files[&FileId::new(1)];
        completions(current, &files, &index.snapshot(), &config, TextSize::new(offset as u32))
            .into_iter()
            .map(|item| item.label.to_string())
            .collect()
    }

    #[test]
    fn test_top_level_keywords() {
        assert_eq!(labels("|"), vec!["NtSeq", "RNASeq", "DNASeq", "AASeq", "Gene"]);
        assert_eq!(labels("msg = \"x\"\n|"), vec!["NtSeq", "RNASeq", "DNASeq", "AASeq", "Gene"]);
    }

    #[test]
    fn test_gene_body_properties() {
        assert_eq!(
            labels("Gene g {\n  |"),
            vec!["Promoter", "Start_Codon", "Stop_Codon", "Coding_Sequence", "Terminator"]
        );
        assert_eq!(labels("Gene g { Promoter; }\n|")[0], "NtSeq");
    }

    #[test]
    fn test_codon_values() {
        assert_eq!(labels("Gene g { Start_Codon = |"), vec!["ATG"]);
        assert_eq!(labels("Gene g { Stop_Codon = \"T|"), vec!["TAA", "TAG", "TGA"]);
        assert!(labels("Gene g { Promoter = |").is_empty());
    }

    #[test]
    fn test_no_keywords_after_type_keyword() {
        assert!(labels("DNASeq |").is_empty());
        assert!(labels("Gene my|").is_empty());
    }

    #[test]
    fn test_reference_keys() {
        // `r` itself is a property of the current file
        assert_eq!(labels("r = \"biosyntax:|"), vec!["dna1", "msg", "r"]);
        assert_eq!(labels("r = \"biosyntax:d|na1\""), vec!["dna1", "msg", "r"]);
    }

    #[test]
    fn test_reference_detail_names_defining_file() {
        let source = "r = \"biosyntax:\"";
        let config = AnalysisConfig::default();
        let file = AnalyzedFile::analyze(FileId::new(0), PathBuf::from("a.biosyntax"), Arc::from(source), &config);
        let index = ProjectIndex::new();
        index.update_file(file.id, FileContribution::new(&file.entities, &file.references));
        let mut files = FileTable::new();
        files.insert(file.id, Arc::new(file));
        let items = completions(&files[&FileId::new(0)], &files, &index.snapshot(), &config, TextSize::new(15));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].label.as_ref(), "r");
        assert_eq!(items[0].detail.as_deref(), Some("a.biosyntax"));
        assert_eq!(items[0].kind.to_lsp(), 18);
    }
}
