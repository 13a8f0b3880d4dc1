//! Go-to-definition implementation.

use smol_str::SmolStr;

use crate::base::{FileId, TextRange, TextSize};
use crate::hir::{AnalyzedFile, DefinitionKind, DefinitionRef, IndexSnapshot};

/// Result of a go-to-definition request.
#[derive(Clone, Debug, Default)]
pub struct GotoResult {
    /// The targets to jump to.
    pub targets: Vec<GotoTarget>,
}

impl GotoResult {
    /// Create an empty result (no targets found).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a result with multiple targets.
    pub fn multiple(targets: Vec<GotoTarget>) -> Self {
        Self { targets }
    }

    /// Check if any targets were found.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// More than one candidate; no single-target navigation.
    pub fn is_ambiguous(&self) -> bool {
        self.targets.len() > 1
    }
}

/// A target location for go-to-definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GotoTarget {
    /// The file containing the target.
    pub file: FileId,
    /// The defining key.
    pub focus_range: TextRange,
    /// The whole defining entity.
    pub full_range: TextRange,
    pub kind: DefinitionKind,
    pub name: SmolStr,
}

impl From<&DefinitionRef> for GotoTarget {
    fn from(def: &DefinitionRef) -> Self {
        Self {
            file: def.file,
            focus_range: def.key_range,
            full_range: def.range,
            kind: def.kind,
            name: def.key.clone(),
        }
    }
}

/// The key under the cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct KeyAtCursor {
    pub key: SmolStr,
    pub range: TextRange,
    /// The cursor is on a defining entity rather than a reference.
    pub is_definition: bool,
}

/// Find the key at `offset`: a literal reference, or the key of a
/// Property/Declaration.
pub(crate) fn key_at(file: &AnalyzedFile, offset: TextSize) -> Option<KeyAtCursor> {
    if let Some(reference) = file
        .references
        .iter()
        .find(|r| r.literal_range.contains_inclusive(offset))
    {
        return Some(KeyAtCursor {
            key: reference.key.clone(),
            range: reference.key_range,
            is_definition: false,
        });
    }
    file.entities
        .iter()
        .filter(|e| e.is_definition())
        .find(|e| e.key_range().contains_inclusive(offset))
        .map(|e| KeyAtCursor {
            key: e.key().into(),
            range: e.key_range(),
            is_definition: true,
        })
}

/// Find the definitions of the key at `offset`.
///
/// Ambiguous keys yield every candidate, in file and offset order.
pub fn goto_definition(file: &AnalyzedFile, index: &IndexSnapshot, offset: TextSize) -> GotoResult {
    let Some(cursor) = key_at(file, offset) else {
        return GotoResult::empty();
    };
    let targets: Vec<_> = index
        .resolve_all(&cursor.key)
        .iter()
        .map(GotoTarget::from)
        .collect();
    tracing::trace!("[GOTO] '{}' -> {} targets", cursor.key, targets.len());
    GotoResult::multiple(targets)
}
