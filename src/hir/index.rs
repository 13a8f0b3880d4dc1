//! Project-wide key index and resolver.
//!
//! The index maps entity keys to their defining Property/Declaration
//! entities across every file of the project. It holds locations only;
//! entities themselves stay owned by their file's [`EntityTree`].
//!
//! Readers take an [`IndexSnapshot`] (`Arc` clone under a read lock) and
//! query it without further locking. Writers are serialized, build the
//! next snapshot from the current one, and swap it in; a reader sees a
//! file's contributions either entirely before or entirely after an
//! update.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tokio_util::sync::CancellationToken;

use crate::base::{FileId, TextRange};
use crate::genetics::SequenceKind;

use super::entities::{Entity, EntityTree};
use super::references::LiteralReference;

// ============================================================================
// INDEX ENTRIES
// ============================================================================

/// What kind of entity defines a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DefinitionKind {
    Property,
    Declaration(SequenceKind),
}

/// A location of a defining entity.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DefinitionRef {
    pub file: FileId,
    /// Position of the entity in its file's [`EntityTree`].
    pub entity: usize,
    pub key: SmolStr,
    pub kind: DefinitionKind,
    pub key_range: TextRange,
    pub range: TextRange,
}

/// Everything one file contributes to the index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileContribution {
    pub definitions: Vec<DefinitionRef>,
    pub references: Vec<LiteralReference>,
}

impl FileContribution {
    pub fn new(entities: &EntityTree, references: &[LiteralReference]) -> Self {
        let definitions = entities
            .iter()
            .enumerate()
            .filter_map(|(idx, entity)| {
                let kind = match entity {
                    Entity::Property(_) => DefinitionKind::Property,
                    Entity::Declaration(d) => DefinitionKind::Declaration(d.kind),
                    Entity::Gene(_) => return None,
                };
                Some(DefinitionRef {
                    file: entities.file,
                    entity: idx,
                    key: entity.key().into(),
                    kind,
                    key_range: entity.key_range(),
                    range: entity.range(),
                })
            })
            .collect();
        Self {
            definitions,
            references: references.to_vec(),
        }
    }
}

// ============================================================================
// RESOLVE RESULT
// ============================================================================

/// Result of resolving a key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveResult {
    /// Exactly one definition.
    Found(DefinitionRef),
    /// More than one definition; all candidates, never narrowed.
    Ambiguous(Vec<DefinitionRef>),
    /// No definition.
    NotFound,
}

impl ResolveResult {
    fn from_candidates(mut candidates: Vec<DefinitionRef>) -> Self {
        match candidates.len() {
            0 => ResolveResult::NotFound,
            1 => ResolveResult::Found(candidates.remove(0)),
            _ => ResolveResult::Ambiguous(candidates),
        }
    }

    /// Get the resolved definition if unambiguous.
    pub fn definition(&self) -> Option<&DefinitionRef> {
        match self {
            ResolveResult::Found(d) => Some(d),
            _ => None,
        }
    }

    /// All candidates, in file and offset order.
    pub fn candidates(&self) -> &[DefinitionRef] {
        match self {
            ResolveResult::Found(d) => std::slice::from_ref(d),
            ResolveResult::Ambiguous(all) => all,
            ResolveResult::NotFound => &[],
        }
    }

    /// Check if resolution was successful.
    pub fn is_found(&self) -> bool {
        matches!(self, ResolveResult::Found(_))
    }

    /// Check if the key was ambiguous.
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, ResolveResult::Ambiguous(_))
    }

    /// Check if nothing defines the key.
    pub fn is_unresolved(&self) -> bool {
        matches!(self, ResolveResult::NotFound)
    }
}

// ============================================================================
// SNAPSHOT
// ============================================================================

/// An immutable view of the whole index.
#[derive(Clone, Debug, Default)]
pub struct IndexSnapshot {
    revision: u64,
    files: FxHashMap<FileId, Arc<FileContribution>>,
    /// Key -> definitions, sorted by file then offset.
    by_key: FxHashMap<SmolStr, Vec<DefinitionRef>>,
}

impl IndexSnapshot {
    /// Incremented by every write.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn contains_file(&self, file: FileId) -> bool {
        self.files.contains_key(&file)
    }

    /// Every definition of `key`.
    pub fn resolve_all(&self, key: &str) -> &[DefinitionRef] {
        let found = self.by_key.get(key).map(Vec::as_slice).unwrap_or(&[]);
        tracing::trace!("[INDEX] resolve '{}' -> {} candidates", key, found.len());
        found
    }

    pub fn resolve(&self, key: &str) -> ResolveResult {
        ResolveResult::from_candidates(self.resolve_all(key).to_vec())
    }

    /// All known keys, sorted.
    pub fn completion_variants(&self) -> Vec<SmolStr> {
        let mut keys: Vec<_> = self.by_key.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// All definitions, sorted by key then location.
    pub fn all_definitions(&self) -> Vec<&DefinitionRef> {
        let mut defs: Vec<_> = self.by_key.values().flatten().collect();
        defs.sort_by(|a, b| {
            (&a.key, a.file, a.range.start()).cmp(&(&b.key, b.file, b.range.start()))
        });
        defs
    }

    pub fn definitions_in_file(&self, file: FileId) -> &[DefinitionRef] {
        self.files
            .get(&file)
            .map(|c| c.definitions.as_slice())
            .unwrap_or(&[])
    }

    pub fn references_in_file(&self, file: FileId) -> &[LiteralReference] {
        self.files
            .get(&file)
            .map(|c| c.references.as_slice())
            .unwrap_or(&[])
    }

    /// Literal references to `key` across all files, in file and offset order.
    ///
    /// Checks `cancel` before each file and returns `None` once it fires.
    pub fn find_usages(&self, key: &str, cancel: &CancellationToken) -> Option<Vec<LiteralReference>> {
        let mut files: Vec<_> = self.files.keys().copied().collect();
        files.sort();
        let mut usages = Vec::new();
        for file in files {
            if cancel.is_cancelled() {
                tracing::debug!("[INDEX] find_usages('{}') cancelled", key);
                return None;
            }
            usages.extend(
                self.references_in_file(file)
                    .iter()
                    .filter(|r| r.key == key)
                    .cloned(),
            );
        }
        Some(usages)
    }

    fn with_file(&self, file: FileId, contribution: Option<FileContribution>) -> Self {
        let mut next = self.clone();
        next.revision += 1;
        if next.files.remove(&file).is_some() {
            next.by_key.retain(|_, defs| {
                defs.retain(|d| d.file != file);
                !defs.is_empty()
            });
        }
        if let Some(contribution) = contribution {
            for def in &contribution.definitions {
                let defs = next.by_key.entry(def.key.clone()).or_default();
                defs.push(def.clone());
                defs.sort_by_key(|d| (d.file, d.range.start()));
            }
            next.files.insert(file, Arc::new(contribution));
        }
        next
    }
}

// ============================================================================
// PROJECT INDEX
// ============================================================================

/// The shared, concurrently readable project index.
#[derive(Debug, Default)]
pub struct ProjectIndex {
    current: RwLock<Arc<IndexSnapshot>>,
    /// Serializes writers so no update is lost between read and swap.
    writer: Mutex<()>,
}

impl ProjectIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current state; stays valid and unchanged while writers proceed.
    pub fn snapshot(&self) -> Arc<IndexSnapshot> {
        self.current.read().clone()
    }

    /// Replace everything `file` contributes.
    pub fn update_file(&self, file: FileId, contribution: FileContribution) {
        self.write(|snapshot| snapshot.with_file(file, Some(contribution)));
    }

    pub fn remove_file(&self, file: FileId) {
        self.write(|snapshot| snapshot.with_file(file, None));
    }

    /// Replace the whole index in one swap.
    pub fn replace_all(&self, contributions: impl IntoIterator<Item = (FileId, FileContribution)>) {
        let mut next = IndexSnapshot::default();
        for (file, contribution) in contributions {
            next = next.with_file(file, Some(contribution));
        }
        self.write(move |current| {
            next.revision = current.revision + 1;
            next
        });
    }

    fn write(&self, build: impl FnOnce(&IndexSnapshot) -> IndexSnapshot) {
        let _guard = self.writer.lock();
        let current = self.snapshot();
        let next = Arc::new(build(current.as_ref()));
        *self.current.write() = next;
    }

    pub fn resolve(&self, key: &str) -> ResolveResult {
        self.snapshot().resolve(key)
    }

    pub fn resolve_all(&self, key: &str) -> Vec<DefinitionRef> {
        self.snapshot().resolve_all(key).to_vec()
    }

    pub fn completion_variants(&self) -> Vec<SmolStr> {
        self.snapshot().completion_variants()
    }

    pub fn find_usages(&self, key: &str, cancel: &CancellationToken) -> Option<Vec<LiteralReference>> {
        self.snapshot().find_usages(key, cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::hir::references::scan_parse;

    fn contribution(file: u32, source: &str) -> (FileId, FileContribution) {
        let id = FileId::new(file);
        let parse = parse(source);
        let tree = EntityTree::lower(id, &parse);
        let refs = scan_parse(id, &parse, "biosyntax:");
        (id, FileContribution::new(&tree, &refs))
    }

    #[test]
    fn test_unique_resolution() {
        let index = ProjectIndex::new();
        let (id, c) = contribution(0, "DNASeq dna1 = \"ATG\"");
        index.update_file(id, c);
        let result = index.resolve("dna1");
        assert!(result.is_found());
        assert_eq!(
            result.definition().map(|d| d.kind),
            Some(DefinitionKind::Declaration(SequenceKind::Dna))
        );
        assert!(index.resolve("missing").is_unresolved());
    }

    #[test]
    fn test_ambiguous_across_files() {
        let index = ProjectIndex::new();
        for (id, c) in [
            contribution(1, "DNASeq dna1 = \"ATG\""),
            contribution(0, "DNASeq dna1 = \"GGG\""),
        ] {
            index.update_file(id, c);
        }
        let result = index.resolve("dna1");
        assert!(result.is_ambiguous());
        assert!(!result.is_unresolved());
        let files: Vec<_> = result.candidates().iter().map(|d| d.file).collect();
        assert_eq!(files, vec![FileId::new(0), FileId::new(1)]);
    }

    #[test]
    fn test_genes_are_not_definitions() {
        let index = ProjectIndex::new();
        let (id, c) = contribution(0, "Gene g { Promoter; }");
        index.update_file(id, c);
        assert!(index.resolve("g").is_unresolved());
    }

    #[test]
    fn test_update_replaces_file_contributions() {
        let index = ProjectIndex::new();
        let (id, c) = contribution(0, "old = \"1\"");
        index.update_file(id, c);
        let before = index.snapshot();
        let (id, c) = contribution(0, "new = \"1\"");
        index.update_file(id, c);

        assert!(index.resolve("old").is_unresolved());
        assert!(index.resolve("new").is_found());
        // Earlier snapshots are unaffected
        assert!(before.resolve("old").is_found());
        assert!(index.snapshot().revision() > before.revision());
    }

    #[test]
    fn test_remove_file() {
        let index = ProjectIndex::new();
        let (id, c) = contribution(4, "k = \"v\"");
        index.update_file(id, c);
        index.remove_file(id);
        assert!(index.completion_variants().is_empty());
        assert_eq!(index.snapshot().file_count(), 0);
    }

    #[test]
    fn test_completion_variants_sorted() {
        let index = ProjectIndex::new();
        index.replace_all([
            contribution(0, "zeta = \"1\"\nDNASeq alpha = \"A\""),
            contribution(1, "alpha = \"dup\""),
        ]);
        assert_eq!(index.completion_variants(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_find_usages() {
        let index = ProjectIndex::new();
        index.replace_all([
            contribution(0, "msg = \"hello\""),
            contribution(1, "a = \"biosyntax:msg\"\nb = \"biosyntax:other\""),
            contribution(2, "c = \"biosyntax:msg\""),
        ]);
        let usages = index
            .find_usages("msg", &CancellationToken::new())
            .expect("not cancelled");
        let files: Vec<_> = usages.iter().map(|u| u.file).collect();
        assert_eq!(files, vec![FileId::new(1), FileId::new(2)]);
    }

    #[test]
    fn test_find_usages_cancelled() {
        let index = ProjectIndex::new();
        let (id, c) = contribution(0, "a = \"biosyntax:msg\"");
        index.update_file(id, c);
        let cancel = CancellationToken::new();
        cancel.cancel();
        assert_eq!(index.find_usages("msg", &cancel), None);
    }

    #[test]
    fn test_concurrent_readers_see_whole_updates() {
        let index = Arc::new(ProjectIndex::new());
        let (id, c) = contribution(0, "a = \"1\"\nb = \"2\"");
        index.update_file(id, c);

        let writer = {
            let index = Arc::clone(&index);
            std::thread::spawn(move || {
                for i in 0..50 {
                    let source = if i % 2 == 0 {
                        "c = \"1\"\nd = \"2\""
                    } else {
                        "a = \"1\"\nb = \"2\""
                    };
                    let (id, c) = contribution(0, source);
                    index.update_file(id, c);
                }
            })
        };
        for _ in 0..50 {
            let snapshot = index.snapshot();
            // Both keys of a version are always present together
            assert_eq!(snapshot.definitions_in_file(FileId::new(0)).len(), 2);
            let keys = snapshot.completion_variants();
            assert!(keys == vec!["a", "b"] || keys == vec!["c", "d"], "{keys:?}");
        }
        writer.join().expect("writer thread");
    }
}
