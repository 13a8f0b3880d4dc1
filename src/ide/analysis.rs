//! AnalysisHost and Analysis - Unified state management for IDE features.
//!
//! The `AnalysisHost` owns all mutable state and provides `Analysis` snapshots
//! for querying. This pattern ensures consistent reads across multiple queries.
//!
//! ## Usage
//!
//! ```ignore
//! let mut host = AnalysisHost::new();
//!
//! // Apply file changes
//! let file_id = host.set_file_content("seqs.biosyntax", content);
//!
//! // Get a snapshot for queries
//! let analysis = host.analysis();
//! let hover = analysis.hover(file_id, LineCol { line: 0, col: 8 });
//! let symbols = analysis.document_symbols(file_id);
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use indexmap::IndexMap;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tokio_util::sync::CancellationToken;

use crate::base::{AnalysisConfig, FileId, LineCol, LineIndex, TextSize};
use crate::hir::{AnalyzedFile, Diagnostic, FileContribution, IndexSnapshot, ProjectIndex, check_file};

use super::{
    CompletionItem, Documentation, FoldingRange, GotoResult, HoverResult, ReferenceResult,
    RenameError, SemanticToken, SourceChange, SymbolInfo,
};

/// Files of a project in insertion order.
pub type FileTable = IndexMap<FileId, Arc<AnalyzedFile>>;

/// Owns all mutable state for the IDE layer.
///
/// Apply changes via `set_file_content()` and `remove_file()`,
/// then get a consistent snapshot via `analysis()`.
pub struct AnalysisHost {
    config: AnalysisConfig,
    files: FileTable,
    /// Map from file path to FileId
    file_id_map: FxHashMap<PathBuf, FileId>,
    next_file_id: u32,
    index: Arc<ProjectIndex>,
}

impl Default for AnalysisHost {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisHost {
    /// Create a new empty AnalysisHost.
    pub fn new() -> Self {
        Self::with_config(AnalysisConfig::default())
    }

    pub fn with_config(config: AnalysisConfig) -> Self {
        Self {
            config,
            files: IndexMap::new(),
            file_id_map: FxHashMap::default(),
            next_file_id: 0,
            index: Arc::new(ProjectIndex::new()),
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Set the content of a file, re-analyzing it and replacing its index
    /// contributions. Paths seen before keep their FileId.
    pub fn set_file_content(&mut self, path: impl AsRef<Path>, content: &str) -> FileId {
        let path = path.as_ref().to_path_buf();
        let file_id = match self.file_id_map.get(&path) {
            Some(&id) => id,
            None => {
                let id = FileId::new(self.next_file_id);
                self.next_file_id += 1;
                self.file_id_map.insert(path.clone(), id);
                id
            }
        };

        let analyzed = AnalyzedFile::analyze(file_id, path, Arc::from(content), &self.config);
        self.index.update_file(
            file_id,
            FileContribution::new(&analyzed.entities, &analyzed.references),
        );
        self.files.insert(file_id, Arc::new(analyzed));
        file_id
    }

    /// Remove a file from storage and from the index.
    pub fn remove_file(&mut self, path: impl AsRef<Path>) -> bool {
        let Some(file_id) = self.file_id_map.remove(path.as_ref()) else {
            return false;
        };
        self.files.shift_remove(&file_id);
        self.index.remove_file(file_id);
        true
    }

    /// Check if a file exists in storage.
    pub fn has_file(&self, path: impl AsRef<Path>) -> bool {
        self.file_id_map.contains_key(path.as_ref())
    }

    /// Get the number of files loaded.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Get the FileId for a path, if it exists.
    pub fn file_id(&self, path: impl AsRef<Path>) -> Option<FileId> {
        self.file_id_map.get(path.as_ref()).copied()
    }

    pub fn file(&self, file_id: FileId) -> Option<&Arc<AnalyzedFile>> {
        self.files.get(&file_id)
    }

    /// The shared index, for readers on other threads.
    pub fn index(&self) -> Arc<ProjectIndex> {
        Arc::clone(&self.index)
    }

    /// Re-analyze every file in parallel and swap in a fresh index.
    ///
    /// Cancellation is checked before each file. A cancelled rebuild leaves
    /// both files and index untouched and returns `false`.
    pub fn rebuild_all(&mut self, cancel: &CancellationToken) -> bool {
        let started = Instant::now();
        let config = &self.config;
        let rebuilt: Option<Vec<AnalyzedFile>> = self
            .files
            .values()
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|file| {
                if cancel.is_cancelled() {
                    return None;
                }
                Some(AnalyzedFile::analyze(
                    file.id,
                    file.path.clone(),
                    Arc::clone(&file.text),
                    config,
                ))
            })
            .collect();

        let Some(rebuilt) = rebuilt else {
            tracing::debug!("[ANALYSIS] rebuild cancelled");
            return false;
        };

        self.index.replace_all(rebuilt.iter().map(|file| {
            (
                file.id,
                FileContribution::new(&file.entities, &file.references),
            )
        }));
        for file in rebuilt {
            self.files.insert(file.id, Arc::new(file));
        }
        tracing::info!(
            "[ANALYSIS] rebuilt {} files in {:?}",
            self.files.len(),
            started.elapsed()
        );
        true
    }

    /// Rename the key at `position` and re-analyze the owning file.
    ///
    /// Only the defining key token changes; references elsewhere keep their
    /// text and resolve against the new key once their owner is reparsed.
    pub fn rename(
        &mut self,
        file_id: FileId,
        position: LineCol,
        new_name: &str,
    ) -> Result<SourceChange, RenameError> {
        let file = self
            .files
            .get(&file_id)
            .cloned()
            .ok_or(RenameError::UnknownFile(file_id))?;
        let offset = file
            .line_index
            .offset(position)
            .ok_or(RenameError::NothingToRename)?;
        let change = super::rename(&file, offset, new_name, &self.config)?;
        let text = change.apply(&file.text);
        self.set_file_content(file.path.clone(), &text);
        Ok(change)
    }

    /// Get a consistent snapshot for querying.
    pub fn analysis(&self) -> Analysis<'_> {
        Analysis {
            config: &self.config,
            files: &self.files,
            file_id_map: &self.file_id_map,
            index: self.index.snapshot(),
        }
    }
}

/// An immutable snapshot of the analysis state.
///
/// All IDE queries go through this struct to ensure consistent results.
pub struct Analysis<'a> {
    config: &'a AnalysisConfig,
    files: &'a FileTable,
    file_id_map: &'a FxHashMap<PathBuf, FileId>,
    index: Arc<IndexSnapshot>,
}

impl<'a> Analysis<'a> {
    fn locate(&self, file_id: FileId, position: LineCol) -> Option<(&'a AnalyzedFile, TextSize)> {
        let file: &'a AnalyzedFile = self.files.get(&file_id)?;
        let offset = file.line_index.offset(position)?;
        Some((file, offset))
    }

    // ==================== Index-based features ====================

    /// Get hover information at a position.
    pub fn hover(&self, file_id: FileId, position: LineCol) -> Option<HoverResult> {
        let (file, offset) = self.locate(file_id, position)?;
        super::hover(file, self.files, &self.index, self.config, offset)
    }

    /// Documentation for the definition at a position.
    pub fn documentation(&self, file_id: FileId, position: LineCol) -> Option<Documentation> {
        self.hover(file_id, position).map(|h| h.documentation)
    }

    /// `"name" in file` for the declaration at a position.
    pub fn quick_navigate_info(&self, file_id: FileId, position: LineCol) -> Option<String> {
        let (file, offset) = self.locate(file_id, position)?;
        super::quick_navigate_info(file, offset)
    }

    /// Go to definition at a position.
    pub fn goto_definition(&self, file_id: FileId, position: LineCol) -> GotoResult {
        match self.locate(file_id, position) {
            Some((file, offset)) => super::goto_definition(file, &self.index, offset),
            None => GotoResult::empty(),
        }
    }

    /// Find all usages of the key at a position.
    ///
    /// Returns `None` when `cancel` fires during the scan.
    pub fn find_references(
        &self,
        file_id: FileId,
        position: LineCol,
        include_declaration: bool,
        cancel: &CancellationToken,
    ) -> Option<ReferenceResult> {
        let Some((file, offset)) = self.locate(file_id, position) else {
            return Some(ReferenceResult::empty());
        };
        super::find_references(file, &self.index, offset, include_declaration, cancel)
    }

    /// Get completions at a position.
    pub fn completions(&self, file_id: FileId, position: LineCol) -> Vec<CompletionItem> {
        match self.locate(file_id, position) {
            Some((file, offset)) => super::completions(file, self.files, &self.index, self.config, offset),
            None => Vec::new(),
        }
    }

    /// Validate a file against the current index.
    pub fn diagnostics(&self, file_id: FileId) -> Vec<Diagnostic> {
        self.files
            .get(&file_id)
            .map(|file| check_file(file, &self.index))
            .unwrap_or_default()
    }

    /// Get all symbols in a document.
    pub fn document_symbols(&self, file_id: FileId) -> Vec<SymbolInfo> {
        self.files
            .get(&file_id)
            .map(|file| super::document_symbols(file))
            .unwrap_or_default()
    }

    /// Search for symbols across the workspace.
    pub fn workspace_symbols(&self, query: Option<&str>) -> Vec<SymbolInfo> {
        super::workspace_symbols(self.files, &self.index, query)
    }

    // ==================== Syntax-based features ====================

    /// Get folding ranges for a file.
    pub fn folding_ranges(&self, file_id: FileId) -> Vec<FoldingRange> {
        self.files
            .get(&file_id)
            .map(|file| super::folding_ranges(file, self.files, &self.index))
            .unwrap_or_default()
    }

    /// Get semantic tokens for a file.
    pub fn semantic_tokens(&self, file_id: FileId) -> Vec<SemanticToken> {
        self.files
            .get(&file_id)
            .map(|file| super::semantic_tokens(file))
            .unwrap_or_default()
    }

    // ==================== Accessors ====================

    /// Get the index snapshot.
    pub fn index(&self) -> &IndexSnapshot {
        &self.index
    }

    pub fn file(&self, file_id: FileId) -> Option<&'a AnalyzedFile> {
        self.files.get(&file_id).map(Arc::as_ref)
    }

    pub fn line_index(&self, file_id: FileId) -> Option<&'a LineIndex> {
        self.file(file_id).map(|f| f.line_index.as_ref())
    }

    /// Get the file path for a FileId.
    pub fn file_path(&self, file_id: FileId) -> Option<&'a Path> {
        self.file(file_id).map(|f| f.path.as_path())
    }

    /// Get the FileId for a path.
    pub fn file_id(&self, path: impl AsRef<Path>) -> Option<FileId> {
        self.file_id_map.get(path.as_ref()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_host_basic() {
        let mut host = AnalysisHost::new();
        let file_id = host.set_file_content("test.biosyntax", "DNASeq d = \"ATG\"");

        let analysis = host.analysis();
        assert_eq!(analysis.file_id("test.biosyntax"), Some(file_id));
        assert!(analysis.index().resolve("d").is_found());
    }

    #[test]
    fn test_same_path_keeps_file_id() {
        let mut host = AnalysisHost::new();
        let first = host.set_file_content("a.biosyntax", "x = \"1\"");
        let second = host.set_file_content("a.biosyntax", "y = \"1\"");
        assert_eq!(first, second);
        assert_eq!(host.file_count(), 1);

        let analysis = host.analysis();
        assert!(analysis.index().resolve("x").is_unresolved());
        assert!(analysis.index().resolve("y").is_found());
    }

    #[test]
    fn test_file_removal() {
        let mut host = AnalysisHost::new();
        host.set_file_content("test.biosyntax", "DNASeq d = \"ATG\"");
        assert!(host.remove_file("test.biosyntax"));
        assert!(!host.remove_file("test.biosyntax"));

        let analysis = host.analysis();
        assert!(analysis.file_id("test.biosyntax").is_none());
        assert!(analysis.index().resolve("d").is_unresolved());
    }

    #[test]
    fn test_rebuild_all() {
        let mut host = AnalysisHost::new();
        host.set_file_content("a.biosyntax", "DNASeq d = \"ATG\"");
        host.set_file_content("Main.java", "String s = \"biosyntax:d\";");
        let before = host.analysis().index().revision();

        assert!(host.rebuild_all(&CancellationToken::new()));
        let analysis = host.analysis();
        assert!(analysis.index().revision() > before);
        assert!(analysis.index().resolve("d").is_found());
        assert_eq!(analysis.index().file_count(), 2);
    }

    #[test]
    fn test_rebuild_all_cancelled() {
        let mut host = AnalysisHost::new();
        host.set_file_content("a.biosyntax", "DNASeq d = \"ATG\"");
        let before = host.analysis().index().revision();

        let cancel = CancellationToken::new();
        cancel.cancel();
        assert!(!host.rebuild_all(&cancel));
        assert_eq!(host.analysis().index().revision(), before);
    }

    #[test]
    fn test_rename_updates_index() {
        let mut host = AnalysisHost::new();
        let file_id = host.set_file_content("a.biosyntax", "DNASeq dna1 = \"ATG\"");
        let change = host
            .rename(file_id, LineCol { line: 0, col: 8 }, "dna2")
            .expect("rename");
        assert_eq!(change.edits.len(), 1);

        let analysis = host.analysis();
        assert!(analysis.index().resolve("dna1").is_unresolved());
        assert!(analysis.index().resolve("dna2").is_found());
        assert_eq!(&*analysis.file(file_id).expect("file").text, "DNASeq dna2 = \"ATG\"");
    }
}
