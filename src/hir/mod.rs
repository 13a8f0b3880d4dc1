//! High-level IR (HIR): entities, validation and the project index.
//!
//! ## Key Types
//!
//! - [`EntityTree`] - Lowered entities of one file
//! - [`AnalyzedFile`] - Parse, entities and references of one file version
//! - [`ProjectIndex`] - Workspace-wide key index with snapshot reads
//! - [`ResolveResult`] - Unique, ambiguous or missing resolution
//!
//! ## Layers
//!
//! ```text
//! text(file)                ← INPUT: raw source text
//!     │
//!     ▼
//! AnalyzedFile::analyze     ← parse + lower + literal references (per-file)
//!     │
//!     ▼
//! ProjectIndex              ← key -> definitions (workspace-wide)
//!     │
//!     ▼
//! check_file(file, index)   ← diagnostics
//! ```

mod diagnostics;
mod entities;
mod file;
mod index;
mod references;

pub use diagnostics::{
    Diagnostic, DiagnosticCollector, QuickFix, SemanticChecker, Severity, check_file, codes,
};
pub use entities::{
    Declaration, Entity, EntityTree, GeneDefinition, GeneProperty, GenePropertyKey, Property,
};
pub use file::{AnalyzedFile, FileKind};
pub use index::{
    DefinitionKind, DefinitionRef, FileContribution, IndexSnapshot, ProjectIndex, ResolveResult,
};
pub use references::{LiteralReference, scan_parse, scan_text};
