//! Hover and documentation for definitions.
//!
//! Documentation is a title plus ordered label/value sections; formatting
//! into markup is left to the presentation layer.

use std::fmt;

use crate::base::{AnalysisConfig, TextRange, TextSize};
use crate::genetics::{ReadingFrame, Section, is_nucleotide_sequence, sequence_sections, to_dna, to_rna, translate};
use crate::hir::{AnalyzedFile, Declaration, Entity, GeneDefinition, IndexSnapshot, Property, ResolveResult};

use super::analysis::FileTable;

/// Rendered documentation for one entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Documentation {
    pub title: String,
    pub sections: Vec<Section>,
}

impl Documentation {
    fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    fn push(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.sections.push(Section::new(label, value));
    }

    /// Value of the first section with this label.
    pub fn section(&self, label: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.value.as_str())
    }

    fn with_comment_and_file(mut self, doc: Option<&str>, file: &AnalyzedFile) -> Self {
        if let Some(doc) = doc.filter(|d| !d.is_empty()) {
            self.push("Comment", doc);
        }
        self.push("File", file.path.display().to_string());
        self
    }
}

impl fmt::Display for Documentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)?;
        for section in &self.sections {
            write!(f, "\n{}: {}", section.label, section.value)?;
        }
        Ok(())
    }
}

/// Result of a hover request.
#[derive(Clone, Debug)]
pub struct HoverResult {
    pub documentation: Documentation,
    /// The hovered range in the requesting file.
    pub range: TextRange,
}

pub fn declaration_documentation(
    declaration: &Declaration,
    file: &AnalyzedFile,
    config: &AnalysisConfig,
) -> Documentation {
    let full_name = declaration.kind.full_name();
    let mut doc = Documentation::new(format!("{} Definition", full_name));
    doc.push("Name", declaration.name.as_str());
    doc.push("Type", full_name);
    doc.sections.extend(sequence_sections(
        &declaration.normalized_sequence(),
        declaration.kind,
        config,
    ));
    doc.push("Description", declaration.kind.description());
    doc.with_comment_and_file(declaration.doc.as_deref(), file)
}

/// Gene documentation: every property in order, nucleotide values with
/// their RNA and protein forms.
pub fn gene_documentation(gene: &GeneDefinition, file: &AnalyzedFile) -> Documentation {
    let mut doc = Documentation::new("Gene Definition");
    doc.push("Name", gene.name.as_str());
    doc.push("Type", "Gene");

    if gene.properties.is_empty() {
        doc.push("Properties", "None specified");
    }
    for property in &gene.properties {
        let label = property.key.display_name();
        let value = property
            .value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty());
        let Some(value) = value else {
            doc.push(label, "unspecified");
            continue;
        };
        doc.push(label.as_str(), value);
        let upper = value.to_ascii_uppercase();
        if is_nucleotide_sequence(&upper) {
            doc.push(format!("{} (RNA)", label), to_rna(&upper));
            doc.push(
                format!("{} (Protein)", label),
                translate(&to_dna(&upper), ReadingFrame::default()),
            );
        }
    }
    doc.with_comment_and_file(gene.doc.as_deref(), file)
}

pub fn property_documentation(property: &Property, file: &AnalyzedFile) -> Documentation {
    let mut doc = Documentation::new("Property");
    doc.push("Name", property.key.as_str());
    doc.push("Value", property.value.as_deref().unwrap_or("unspecified"));
    doc.with_comment_and_file(property.doc.as_deref(), file)
}

pub fn entity_documentation(entity: &Entity, file: &AnalyzedFile, config: &AnalysisConfig) -> Documentation {
    match entity {
        Entity::Property(p) => property_documentation(p, file),
        Entity::Declaration(d) => declaration_documentation(d, file, config),
        Entity::Gene(g) => gene_documentation(g, file),
    }
}

/// Get hover information at `offset`.
///
/// On a literal reference the documentation of its unique definition is
/// shown; ambiguous references list the candidate files instead.
pub fn hover(
    file: &AnalyzedFile,
    files: &FileTable,
    index: &IndexSnapshot,
    config: &AnalysisConfig,
    offset: TextSize,
) -> Option<HoverResult> {
    if let Some(reference) = file
        .references
        .iter()
        .find(|r| r.literal_range.contains_inclusive(offset))
    {
        let documentation = match index.resolve(&reference.key) {
            ResolveResult::Found(def) => {
                let target = files.get(&def.file)?;
                let entity = target.entities.get(def.entity)?;
                entity_documentation(entity, target, config)
            }
            ResolveResult::Ambiguous(candidates) => {
                let mut doc = Documentation::new(format!("Ambiguous reference '{}'", reference.key));
                for def in &candidates {
                    let location = files
                        .get(&def.file)
                        .map(|f| f.path.display().to_string())
                        .unwrap_or_else(|| def.file.to_string());
                    doc.push("Candidate", location);
                }
                doc
            }
            ResolveResult::NotFound => return None,
        };
        return Some(HoverResult {
            documentation,
            range: reference.key_range,
        });
    }

    let (_, entity) = file.entities.entity_at(offset)?;
    Some(HoverResult {
        documentation: entity_documentation(entity, file, config),
        range: entity.key_range(),
    })
}

/// Short navigation text for a declaration: `"name" in file`.
pub fn quick_navigate_info(file: &AnalyzedFile, offset: TextSize) -> Option<String> {
    match file.entities.entity_at(offset)? {
        (_, Entity::Declaration(d)) => Some(format!("\"{}\" in {}", d.name, file.display_name())),
        _ => None,
    }
}
