//! # biosyntax-base
//!
//! Core library for the BioSyntax sequence language: lexing, parsing,
//! validation, project-wide reference resolution and genetic-code analysis.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → Editor features (documentation, goto, usages, completion, folding)
//!   ↓
//! project   → Directory loading into an AnalysisHost
//!   ↓
//! hir       → Entity model, diagnostics, ProjectIndex
//!   ↓
//! genetics  → Genetic code engine (translation, ORFs, statistics)
//!   ↓
//! parser    → Logos lexer, recursive-descent parser, typed AST
//!   ↓
//! base      → Primitives (FileId, TextRange, LineIndex, AnalysisConfig)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → genetics → hir → project → ide)
// ============================================================================

/// Foundation types: FileId, TextRange, LineIndex, configuration
pub mod base;

/// Parser: Logos lexer, recursive-descent parser, typed AST
pub mod parser;

/// Genetic code engine: translation, reading frames, composition statistics
pub mod genetics;

/// High-level IR: entities, diagnostics, project index
pub mod hir;

/// IDE features: documentation, goto-definition, usages, completion
pub mod ide;

/// Project management: workspace loading
pub mod project;

// Re-export foundation types
pub use base::{AnalysisConfig, FileId, LanguageMode, LineCol, LineIndex, TextRange, TextSize};
