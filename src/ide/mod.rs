//! IDE features - High-level APIs for editor integrations.
//!
//! This module provides the interface between the semantic model (HIR)
//! and an editor. Each function corresponds to one editor request.
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: Take data in, return data out
//! 2. **No protocol types**: Uses our own types, converted at the boundary
//! 3. **Composable**: Built on top of HIR and the genetics engine
//!
//! ## Usage
//!
//! The recommended way to use this module is through `AnalysisHost`:
//!
//! ```ignore
//! use biosyntax::ide::AnalysisHost;
//!
//! let mut host = AnalysisHost::new();
//! let file_id = host.set_file_content("seqs.biosyntax", "DNASeq d = \"ATG\"");
//!
//! let analysis = host.analysis();
//! let symbols = analysis.document_symbols(file_id);
//! ```

mod analysis;
mod completion;
mod folding;
mod goto;
mod hover;
mod references;
mod rename;
mod semantic_tokens;
mod symbols;

pub use analysis::{Analysis, AnalysisHost, FileTable};
pub use completion::{CompletionItem, CompletionKind, completions};
pub use folding::{FoldingKind, FoldingRange, folding_ranges};
pub use goto::{GotoResult, GotoTarget, goto_definition};
pub use hover::{
    Documentation, HoverResult, declaration_documentation, entity_documentation,
    gene_documentation, hover, property_documentation, quick_navigate_info,
};
pub use references::{Reference, ReferenceResult, find_references};
pub use rename::{RenameError, SourceChange, TextEdit, rename};
pub use semantic_tokens::{SemanticToken, TokenType, semantic_tokens};
pub use symbols::{SymbolInfo, SymbolKind, document_symbols, workspace_symbols};
