//! Foundation types for the BioSyntax toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FileId`] - Compact file identifiers
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineCol`], [`LineIndex`] - Line/column conversion
//! - [`AnalysisConfig`], [`LanguageMode`] - Analysis configuration
//! - Domain constants (file extension, keywords, reference marker)
//!
//! This module has NO dependencies on other biosyntax modules.

mod config;
pub mod constants;
mod file_id;
mod span;

pub use config::{AnalysisConfig, LanguageMode};
pub use file_id::FileId;
pub use span::{LineCol, LineIndex, TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
