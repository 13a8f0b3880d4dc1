//! Semantic tokens - token classification for highlighting.
//!
//! Tokens come straight from the syntax tree, refined by the node they sit
//! in (a STRING in a DNA declaration is a nucleotide literal, an IDENT that
//! starts a property is a key).

use crate::base::{TextRange, TextSize};
use crate::genetics::SequenceKind;
use crate::hir::{AnalyzedFile, GenePropertyKey};
use crate::parser::{SyntaxKind, SyntaxToken};

/// Token type for semantic highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    /// `NtSeq`, `RNASeq`, `DNASeq`, `AASeq`
    TypeKeyword,
    /// `Gene`
    Keyword,
    /// `Start_Codon`, `Stop_Codon`
    CodonKeyword,
    /// The other gene property names
    GeneProperty,
    Identifier,
    NucleotideLiteral,
    AminoAcidLiteral,
    String,
    PropertyKey,
    Separator,
    PropertyValue,
    Comment,
    BadCharacter,
}

impl TokenType {
    /// Convert to LSP token type index.
    pub fn to_lsp_index(self) -> u32 {
        match self {
            TokenType::TypeKeyword => 0,
            TokenType::Keyword => 1,
            TokenType::CodonKeyword => 2,
            TokenType::GeneProperty => 3,
            TokenType::Identifier => 4,
            TokenType::NucleotideLiteral => 5,
            TokenType::AminoAcidLiteral => 6,
            TokenType::String => 7,
            TokenType::PropertyKey => 8,
            TokenType::Separator => 9,
            TokenType::PropertyValue => 10,
            TokenType::Comment => 11,
            TokenType::BadCharacter => 12,
        }
    }
}

/// A semantic token for syntax highlighting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticToken {
    /// Line number (0-indexed)
    pub line: u32,
    /// Column number (0-indexed)
    pub col: u32,
    /// Length of the token in characters
    pub length: u32,
    /// The token type
    pub token_type: TokenType,
}

/// Get semantic tokens for a language file, sorted by position.
///
/// Tokens spanning several lines (continued legacy values) are split per
/// line. Host files have no tokens.
pub fn semantic_tokens(file: &AnalyzedFile) -> Vec<SemanticToken> {
    let Some(parse) = &file.parse else {
        return Vec::new();
    };

    let mut tokens = Vec::new();
    for token in parse
        .syntax()
        .descendants_with_tokens()
        .filter_map(|e| e.into_token())
    {
        let Some(token_type) = classify(&token) else {
            continue;
        };
        let start = token.text_range().start();
        let mut offset = 0usize;
        for segment in token.text().split_inclusive('\n') {
            let content = segment.trim_end_matches(['\r', '\n']);
            if !content.is_empty() {
                let range = TextRange::at(start + TextSize::new(offset as u32), TextSize::of(content));
                let pos = file.line_index.line_col(range.start());
                tokens.push(SemanticToken {
                    line: pos.line,
                    col: pos.col,
                    length: content.chars().count() as u32,
                    token_type,
                });
            }
            offset += segment.len();
        }
    }

    tokens.sort_by_key(|t| (t.line, t.col));
    tokens
}

fn classify(token: &SyntaxToken) -> Option<TokenType> {
    let parent = token.parent().map(|p| p.kind());
    let token_type = match token.kind() {
        kind if kind.is_type_keyword() => TokenType::TypeKeyword,
        SyntaxKind::GENE_KW => TokenType::Keyword,
        SyntaxKind::START_CODON_KW | SyntaxKind::STOP_CODON_KW => TokenType::CodonKeyword,
        kind if kind.is_gene_property_keyword() => TokenType::GeneProperty,
        SyntaxKind::IDENT if parent == Some(SyntaxKind::PROPERTY) => TokenType::PropertyKey,
        SyntaxKind::IDENT => TokenType::Identifier,
        SyntaxKind::KEY => TokenType::PropertyKey,
        SyntaxKind::VALUE => TokenType::PropertyValue,
        SyntaxKind::EQ | SyntaxKind::COLON if parent == Some(SyntaxKind::PROPERTY) => TokenType::Separator,
        SyntaxKind::STRING => classify_string(token),
        SyntaxKind::LINE_COMMENT => TokenType::Comment,
        SyntaxKind::BAD_CHARACTER => TokenType::BadCharacter,
        _ => return None,
    };
    Some(token_type)
}

fn classify_string(token: &SyntaxToken) -> TokenType {
    let Some(parent) = token.parent() else {
        return TokenType::String;
    };
    match parent.kind() {
        SyntaxKind::DECLARATION => {
            let kind = parent
                .children_with_tokens()
                .filter_map(|e| e.into_token())
                .find(|t| t.kind().is_type_keyword())
                .and_then(|t| SequenceKind::from_keyword(t.text()));
            match kind {
                Some(SequenceKind::AminoAcid) => TokenType::AminoAcidLiteral,
                Some(_) => TokenType::NucleotideLiteral,
                None => TokenType::String,
            }
        }
        SyntaxKind::GENE_PROPERTY => {
            let nucleotide_valued = parent
                .children_with_tokens()
                .filter_map(|e| e.into_token())
                .find_map(|t| GenePropertyKey::from_syntax_kind(t.kind()))
                .is_some_and(GenePropertyKey::is_nucleotide_valued);
            if nucleotide_valued {
                TokenType::NucleotideLiteral
            } else {
                TokenType::String
            }
        }
        _ => TokenType::String,
    }
}
