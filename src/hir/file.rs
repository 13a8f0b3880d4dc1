//! Per-file analysis results.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::base::{AnalysisConfig, FileId, LineIndex, TextSize};
use crate::base::constants::BIOSYNTAX_EXT;
use crate::parser::{Parse, parse_with_mode};

use super::entities::EntityTree;
use super::references::{LiteralReference, scan_parse, scan_text};

/// What kind of source a project file holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// A `.biosyntax` file: parsed, validated and indexed.
    BioSyntax,
    /// Any other source file: only scanned for literal references.
    Host,
}

impl FileKind {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext == BIOSYNTAX_EXT => FileKind::BioSyntax,
            _ => FileKind::Host,
        }
    }
}

/// Everything derived from one version of a file's text.
///
/// Immutable; a text change produces a fresh `AnalyzedFile`.
#[derive(Clone, Debug)]
pub struct AnalyzedFile {
    pub id: FileId,
    pub path: PathBuf,
    pub kind: FileKind,
    pub text: Arc<str>,
    /// `None` for host files.
    pub parse: Option<Parse>,
    pub entities: Arc<EntityTree>,
    pub references: Arc<[LiteralReference]>,
    pub line_index: Arc<LineIndex>,
}

impl AnalyzedFile {
    /// Lex, parse and lower `text`, and collect its literal references.
    pub fn analyze(id: FileId, path: PathBuf, text: Arc<str>, config: &AnalysisConfig) -> Self {
        let kind = FileKind::from_path(&path);
        let (parse, entities, references) = match kind {
            FileKind::BioSyntax => {
                let parse = parse_with_mode(&text, config.mode);
                let entities = EntityTree::lower(id, &parse);
                let references = scan_parse(id, &parse, &config.reference_prefix);
                tracing::debug!(
                    "parsed {}: {} entities, {} syntax errors, {} references",
                    path.display(),
                    entities.entities.len(),
                    parse.errors.len(),
                    references.len()
                );
                (Some(parse), entities, references)
            }
            FileKind::Host => {
                let references = scan_text(id, &text, TextSize::new(0), &config.reference_prefix);
                (None, EntityTree::empty(id), references)
            }
        };
        Self {
            id,
            line_index: Arc::new(LineIndex::new(&text)),
            path,
            kind,
            text,
            parse,
            entities: Arc::new(entities),
            references: references.into(),
        }
    }

    /// The file name shown to users (last path component).
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn is_biosyntax(&self) -> bool {
        self.kind == FileKind::BioSyntax
    }
}
