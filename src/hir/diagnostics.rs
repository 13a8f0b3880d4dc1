//! Diagnostics: alphabet validation, syntax errors and reference checks.
//!
//! [`check_file`] turns one analyzed file plus the current index snapshot
//! into an ordered list of diagnostics. Every problem is reported as data;
//! nothing here aborts analysis of the rest of the file.

use std::sync::Arc;

use crate::base::{FileId, TextRange, TextSize};
use crate::genetics::SequenceKind;
use crate::parser::{SyntaxError, SyntaxKind};

use super::entities::{Declaration, Entity, GeneDefinition};
use super::file::AnalyzedFile;
use super::index::{IndexSnapshot, ResolveResult};
use super::references::LiteralReference;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

impl Severity {
    /// Convert to LSP severity number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            Severity::Error => 1,
            Severity::Warning => 2,
            Severity::Info => 3,
            Severity::Hint => 4,
        }
    }
}

/// A suggested fix attached to a diagnostic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuickFix {
    /// Create a property definition for an unresolved key.
    CreateProperty { key: Arc<str> },
}

impl QuickFix {
    pub fn label(&self) -> String {
        match self {
            QuickFix::CreateProperty { key } => format!("create property `{}`", key),
        }
    }
}

/// A diagnostic message with location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// The file containing this diagnostic.
    pub file: FileId,
    /// Byte range in the file text.
    pub range: TextRange,
    pub severity: Severity,
    /// Error/info code (e.g., "E0003").
    pub code: Option<Arc<str>>,
    pub message: Arc<str>,
    pub fix: Option<QuickFix>,
}

impl Diagnostic {
    fn new(file: FileId, range: TextRange, severity: Severity, message: impl Into<Arc<str>>) -> Self {
        Self {
            file,
            range,
            severity,
            code: None,
            message: message.into(),
            fix: None,
        }
    }

    /// Create a new error diagnostic.
    pub fn error(file: FileId, range: TextRange, message: impl Into<Arc<str>>) -> Self {
        Self::new(file, range, Severity::Error, message)
    }

    /// Create a new warning diagnostic.
    pub fn warning(file: FileId, range: TextRange, message: impl Into<Arc<str>>) -> Self {
        Self::new(file, range, Severity::Warning, message)
    }

    /// Create a new informational diagnostic.
    pub fn info(file: FileId, range: TextRange, message: impl Into<Arc<str>>) -> Self {
        Self::new(file, range, Severity::Info, message)
    }

    /// Set the error code.
    pub fn with_code(mut self, code: impl Into<Arc<str>>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_fix(mut self, fix: QuickFix) -> Self {
        self.fix = Some(fix);
        self
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Diagnostic codes.
///
/// - **E0001-E0099**: errors
/// - **I0001-I0099**: informational
pub mod codes {
    /// Character the lexer does not recognize.
    pub const BAD_CHARACTER: &str = "E0001";
    /// Unexpected or missing token.
    pub const SYNTAX_ERROR: &str = "E0002";
    /// Sequence character outside the declared kind's alphabet.
    pub const INVALID_SEQUENCE_CHARACTER: &str = "E0003";
    /// Codon or coding sequence value that is not a nucleotide sequence.
    pub const INVALID_GENE_PROPERTY_VALUE: &str = "E0004";
    /// Literal reference with no definition.
    pub const UNRESOLVED_REFERENCE: &str = "E0005";

    /// Literal reference with several definitions.
    pub const AMBIGUOUS_REFERENCE: &str = "I0001";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics during validation.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn bad_character(&mut self, file: FileId, range: TextRange, text: &str) {
        self.add(
            Diagnostic::error(file, range, format!("Unexpected character '{}'", text))
                .with_code(codes::BAD_CHARACTER),
        );
    }

    pub fn syntax_error(&mut self, file: FileId, error: &SyntaxError) {
        self.add(
            Diagnostic::error(file, error.range, error.message.as_str())
                .with_code(codes::SYNTAX_ERROR),
        );
    }

    pub fn invalid_sequence_character(&mut self, file: FileId, offset: TextSize, c: char, kind: SequenceKind) {
        let range = TextRange::at(offset, TextSize::of(c));
        self.add(
            Diagnostic::error(
                file,
                range,
                format!(
                    "Invalid {} '{}'. Only {} allowed",
                    kind_noun(kind),
                    c,
                    allowed_list(kind)
                ),
            )
            .with_code(codes::INVALID_SEQUENCE_CHARACTER),
        );
    }

    pub fn invalid_gene_property_value(&mut self, file: FileId, range: TextRange, property: &str) {
        self.add(
            Diagnostic::error(
                file,
                range,
                format!("Invalid {} value. Only A, T, U, C, G allowed", property),
            )
            .with_code(codes::INVALID_GENE_PROPERTY_VALUE),
        );
    }

    pub fn unresolved_reference(&mut self, reference: &LiteralReference) {
        self.add(
            Diagnostic::error(reference.file, reference.key_range, "Unresolved property")
                .with_code(codes::UNRESOLVED_REFERENCE)
                .with_fix(QuickFix::CreateProperty {
                    key: Arc::from(reference.key.as_str()),
                }),
        );
    }

    pub fn ambiguous_reference(&mut self, reference: &LiteralReference, candidates: usize) {
        self.add(
            Diagnostic::info(
                reference.file,
                reference.key_range,
                format!("Ambiguous property '{}': {} definitions", reference.key, candidates),
            )
            .with_code(codes::AMBIGUOUS_REFERENCE),
        );
    }

    /// Get all diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Get the number of errors.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Diagnostics ordered by start offset; ties keep insertion order.
    pub fn finish(mut self) -> Vec<Diagnostic> {
        self.diagnostics.sort_by_key(|d| d.range.start());
        self.diagnostics
    }
}

fn kind_noun(kind: SequenceKind) -> &'static str {
    match kind {
        SequenceKind::Nucleotide => "nucleotide",
        SequenceKind::Rna => "RNA base",
        SequenceKind::Dna => "DNA base",
        SequenceKind::AminoAcid => "amino acid",
    }
}

fn allowed_list(kind: SequenceKind) -> String {
    match kind {
        SequenceKind::AminoAcid => "the 20 standard amino acid letters".to_string(),
        _ => {
            let letters: Vec<String> = kind
                .alphabet()
                .iter()
                .map(|b| (*b as char).to_string())
                .collect();
            letters.join(", ")
        }
    }
}

// ============================================================================
// SEMANTIC CHECKER
// ============================================================================

/// Validates one file against the project index.
pub struct SemanticChecker<'a> {
    index: &'a IndexSnapshot,
    collector: DiagnosticCollector,
}

impl<'a> SemanticChecker<'a> {
    pub fn new(index: &'a IndexSnapshot) -> Self {
        Self {
            index,
            collector: DiagnosticCollector::new(),
        }
    }

    pub fn check_file(&mut self, file: &AnalyzedFile) {
        if let Some(parse) = &file.parse {
            for token in parse
                .syntax()
                .descendants_with_tokens()
                .filter_map(|e| e.into_token())
                .filter(|t| t.kind() == SyntaxKind::BAD_CHARACTER)
            {
                self.collector
                    .bad_character(file.id, token.text_range(), token.text());
            }
            for error in &parse.errors {
                self.collector.syntax_error(file.id, error);
            }
        }

        for entity in file.entities.iter() {
            match entity {
                Entity::Declaration(declaration) => self.check_declaration(file.id, declaration),
                Entity::Gene(gene) => self.check_gene(file.id, gene),
                Entity::Property(_) => {}
            }
        }

        for reference in file.references.iter() {
            self.check_reference(reference);
        }
    }

    /// One diagnostic per character outside the declared alphabet.
    fn check_declaration(&mut self, file: FileId, declaration: &Declaration) {
        let Some(range) = declaration.sequence_range else {
            return;
        };
        for (idx, c) in declaration.sequence.char_indices() {
            if c.is_whitespace() || declaration.kind.accepts(c) {
                continue;
            }
            let offset = range.start() + TextSize::new(idx as u32);
            self.collector
                .invalid_sequence_character(file, offset, c, declaration.kind);
        }
    }

    /// Whole-value nucleotide check for codon and coding-sequence values.
    fn check_gene(&mut self, file: FileId, gene: &GeneDefinition) {
        for property in &gene.properties {
            if !property.key.is_nucleotide_valued() {
                continue;
            }
            let (Some(value), Some(range)) = (&property.value, property.value_range) else {
                continue;
            };
            let valid = value
                .chars()
                .filter(|c| !c.is_whitespace())
                .all(|c| SequenceKind::Nucleotide.accepts(c));
            if !valid {
                self.collector
                    .invalid_gene_property_value(file, range, property.key.as_str());
            }
        }
    }

    fn check_reference(&mut self, reference: &LiteralReference) {
        match self.index.resolve(&reference.key) {
            ResolveResult::Found(_) => {}
            ResolveResult::Ambiguous(candidates) => {
                self.collector
                    .ambiguous_reference(reference, candidates.len());
            }
            ResolveResult::NotFound => self.collector.unresolved_reference(reference),
        }
    }

    pub fn finish(self) -> Vec<Diagnostic> {
        self.collector.finish()
    }
}

/// Validate one file; diagnostics are ordered by start offset.
pub fn check_file(file: &AnalyzedFile, index: &IndexSnapshot) -> Vec<Diagnostic> {
    let mut checker = SemanticChecker::new(index);
    checker.check_file(file);
    let diagnostics = checker.finish();
    tracing::debug!(
        "[VALIDATE] {}: {} diagnostics",
        file.path.display(),
        diagnostics.len()
    );
    diagnostics
}
