//! Rename of a defining key.
//!
//! Only the key token of the entity under the cursor is rewritten.
//! References elsewhere are left as they are; they resolve against the new
//! key (or become unresolved) once the owning file is re-analyzed.

use thiserror::Error;

use crate::base::{AnalysisConfig, FileId, LanguageMode, TextRange, TextSize};
use crate::hir::AnalyzedFile;
use crate::parser::{SyntaxKind, escape_key, tokenize_with_mode};

/// Why a rename was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenameError {
    #[error("no renameable key at the cursor")]
    NothingToRename,
    #[error("'{0}' is not a valid name")]
    InvalidName(String),
    #[error("unknown file {0}")]
    UnknownFile(FileId),
}

/// Replace `range` with `new_text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub range: TextRange,
    pub new_text: String,
}

/// Edits to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceChange {
    pub file: FileId,
    pub edits: Vec<TextEdit>,
}

impl SourceChange {
    /// Apply the edits to `text`; edits must not overlap.
    pub fn apply(&self, text: &str) -> String {
        let mut edits: Vec<_> = self.edits.iter().collect();
        edits.sort_by_key(|e| std::cmp::Reverse(e.range.start()));
        let mut out = text.to_string();
        for edit in edits {
            out.replace_range(std::ops::Range::<usize>::from(edit.range), &edit.new_text);
        }
        out
    }
}

/// Rename the Property or Declaration whose key is at `offset`.
pub fn rename(
    file: &AnalyzedFile,
    offset: TextSize,
    new_name: &str,
    config: &AnalysisConfig,
) -> Result<SourceChange, RenameError> {
    let entity = file
        .entities
        .iter()
        .filter(|e| e.is_definition())
        .find(|e| e.key_range().contains_inclusive(offset))
        .ok_or(RenameError::NothingToRename)?;

    let new_text = key_text(new_name, config.mode)
        .ok_or_else(|| RenameError::InvalidName(new_name.to_string()))?;
    tracing::debug!(
        "[RENAME] '{}' -> '{}' in {}",
        entity.key(),
        new_name,
        file.path.display()
    );
    Ok(SourceChange {
        file: file.id,
        edits: vec![TextEdit {
            range: entity.key_range(),
            new_text,
        }],
    })
}

/// Source text for `name` as a key, if it lexes back to a single key token.
fn key_text(name: &str, mode: LanguageMode) -> Option<String> {
    let (text, expected) = match mode {
        LanguageMode::Structural => (name.to_string(), SyntaxKind::IDENT),
        LanguageMode::Properties => (escape_key(name), SyntaxKind::KEY),
    };
    let tokens = tokenize_with_mode(&text, mode);
    match tokens.as_slice() {
        [token, eof] if token.kind == expected && eof.kind == SyntaxKind::EOF => Some(text),
        _ => None,
    }
}
