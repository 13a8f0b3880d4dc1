//! Symbol listing for workspace and document views.

use std::sync::Arc;

use crate::base::{FileId, TextRange};
use crate::genetics::SequenceKind;
use crate::hir::{AnalyzedFile, Entity, GeneProperty, IndexSnapshot};

use super::analysis::FileTable;

/// Kind of an outline symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SymbolKind {
    Property,
    Declaration(SequenceKind),
    Gene,
    GeneProperty,
}

/// A symbol for the workspace symbol list or document outline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolInfo {
    /// Symbol name.
    pub name: Arc<str>,
    /// `key = value` as shown in the structure view.
    pub presentable_text: Arc<str>,
    /// The immediately preceding comment, if any.
    pub location: Option<Arc<str>>,
    /// Symbol kind.
    pub kind: SymbolKind,
    /// File containing the symbol.
    pub file: FileId,
    /// Whole entity.
    pub range: TextRange,
    /// The name itself.
    pub selection_range: TextRange,
    /// Gene properties of a gene.
    pub children: Vec<SymbolInfo>,
}

impl SymbolInfo {
    /// Create from a lowered entity.
    pub fn from_entity(file: FileId, entity: &Entity) -> Self {
        let (kind, presentable_text, children) = match entity {
            Entity::Property(p) => (
                SymbolKind::Property,
                presentable(&p.key, p.value.as_deref()),
                Vec::new(),
            ),
            Entity::Declaration(d) => (
                SymbolKind::Declaration(d.kind),
                presentable(&d.name, entity.value()),
                Vec::new(),
            ),
            Entity::Gene(g) => (
                SymbolKind::Gene,
                g.name.to_string(),
                g.properties
                    .iter()
                    .map(|p| Self::from_gene_property(file, p))
                    .collect(),
            ),
        };
        Self {
            name: Arc::from(entity.key()),
            presentable_text: presentable_text.into(),
            location: entity.location().map(Arc::from),
            kind,
            file,
            range: entity.range(),
            selection_range: entity.key_range(),
            children,
        }
    }

    fn from_gene_property(file: FileId, property: &GeneProperty) -> Self {
        let name = property.key.as_str();
        Self {
            name: Arc::from(name),
            presentable_text: presentable(name, property.value.as_deref()).into(),
            location: None,
            kind: SymbolKind::GeneProperty,
            file,
            range: property.range,
            selection_range: property.key_range,
            children: Vec::new(),
        }
    }
}

/// `key = value` with line continuations removed, or just `key`.
fn presentable(key: &str, value: Option<&str>) -> String {
    match value {
        Some(value) => {
            let single_line: Vec<&str> = value.lines().map(str::trim).collect();
            format!("{} = {}", key, single_line.concat())
        }
        None => key.to_string(),
    }
}

/// Get all definitions in the workspace, optionally filtered by a query.
///
/// # Arguments
/// * `files` - The analyzed project files
/// * `index` - The index snapshot to search
/// * `query` - Optional search query (case-insensitive substring match)
///
/// # Returns
/// List of matching symbols, sorted by name.
pub fn workspace_symbols(files: &FileTable, index: &IndexSnapshot, query: Option<&str>) -> Vec<SymbolInfo> {
    let query_lower = query.map(|q| q.to_lowercase());

    index
        .all_definitions()
        .into_iter()
        .filter(|def| match &query_lower {
            Some(q) => def.key.to_lowercase().contains(q.as_str()),
            None => true,
        })
        .filter_map(|def| {
            let entity = files.get(&def.file)?.entities.get(def.entity)?;
            Some(SymbolInfo::from_entity(def.file, entity))
        })
        .collect()
}

/// Get the entities of a file for the document outline, in source order.
pub fn document_symbols(file: &AnalyzedFile) -> Vec<SymbolInfo> {
    file.entities
        .iter()
        .map(|entity| SymbolInfo::from_entity(file.id, entity))
        .collect()
}
