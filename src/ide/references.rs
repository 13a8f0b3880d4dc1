//! Find usages implementation.

use tokio_util::sync::CancellationToken;

use crate::base::{FileId, TextRange, TextSize};
use crate::hir::{AnalyzedFile, IndexSnapshot};

use super::goto::key_at;

/// Result of a find-references request.
#[derive(Clone, Debug, Default)]
pub struct ReferenceResult {
    /// All references found, definitions first.
    pub references: Vec<Reference>,
    /// Include the definition in the results.
    pub include_declaration: bool,
}

impl ReferenceResult {
    /// Create an empty result.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if any references were found.
    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    /// Get the number of references.
    pub fn len(&self) -> usize {
        self.references.len()
    }
}

/// A usage or definition of a key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reference {
    /// The file containing the reference.
    pub file: FileId,
    /// The key text.
    pub range: TextRange,
    /// Whether this is the definition (vs a reference).
    pub is_definition: bool,
}

/// Find all literal references to the key at `offset`.
///
/// The scan checks `cancel` at every file boundary; `None` means it was
/// cancelled and no partial result is returned.
pub fn find_references(
    file: &AnalyzedFile,
    index: &IndexSnapshot,
    offset: TextSize,
    include_declaration: bool,
    cancel: &CancellationToken,
) -> Option<ReferenceResult> {
    let Some(cursor) = key_at(file, offset) else {
        return Some(ReferenceResult::empty());
    };

    let mut references = Vec::new();
    if include_declaration {
        references.extend(index.resolve_all(&cursor.key).iter().map(|def| Reference {
            file: def.file,
            range: def.key_range,
            is_definition: true,
        }));
    }
    let usages = index.find_usages(&cursor.key, cancel)?;
    references.extend(usages.into_iter().map(|usage| Reference {
        file: usage.file,
        range: usage.key_range,
        is_definition: false,
    }));

    Some(ReferenceResult {
        references,
        include_declaration,
    })
}
