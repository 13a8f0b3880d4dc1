//! Typed AST wrappers over the untyped rowan CST.
//!
//! This module provides strongly-typed accessors for BioSyntax syntax nodes.
//! Each struct wraps a SyntaxNode and provides methods to access children.

use super::parser::string_is_terminated;
use super::syntax_kind::SyntaxKind;
use super::{SyntaxNode, SyntaxToken};
use rowan::{Direction, TextRange, TextSize};

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

/// Trait for AST tokens that wrap a SyntaxToken
pub trait AstToken: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(token: SyntaxToken) -> Option<Self>;
    fn syntax(&self) -> &SyntaxToken;
    fn text(&self) -> &str {
        self.syntax().text()
    }
}

// ============================================================================
// Helper macros
// ============================================================================

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

fn tokens(node: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> + '_ {
    node.children_with_tokens().filter_map(|e| e.into_token())
}

fn first_token(node: &SyntaxNode, pred: impl Fn(SyntaxKind) -> bool) -> Option<SyntaxToken> {
    tokens(node).find(|t| pred(t.kind()))
}

// ============================================================================
// Root
// ============================================================================

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    /// Wrap a root node produced by the parser.
    pub(crate) fn new(node: SyntaxNode) -> Self {
        Self(node)
    }

    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.0.children().filter_map(Entity::cast)
    }
}

// ============================================================================
// Top-level entities
// ============================================================================

/// Any top-level entity of a source file
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Entity {
    Property(Property),
    Declaration(Declaration),
    Gene(GeneDefinition),
}

impl AstNode for Entity {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::PROPERTY | SyntaxKind::DECLARATION | SyntaxKind::GENE_DEFINITION
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::PROPERTY => Some(Self::Property(Property(node))),
            SyntaxKind::DECLARATION => Some(Self::Declaration(Declaration(node))),
            SyntaxKind::GENE_DEFINITION => Some(Self::Gene(GeneDefinition(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Property(n) => n.syntax(),
            Self::Declaration(n) => n.syntax(),
            Self::Gene(n) => n.syntax(),
        }
    }
}

ast_node!(Property, PROPERTY);

impl Property {
    /// The key token: an identifier, or a raw key in legacy mode
    pub fn key_token(&self) -> Option<SyntaxToken> {
        first_token(&self.0, |k| matches!(k, SyntaxKind::IDENT | SyntaxKind::KEY))
    }

    /// The key with `\ ` escapes resolved
    pub fn key(&self) -> Option<String> {
        self.key_token().map(|t| unescape_key(t.text()))
    }

    pub fn separator(&self) -> Option<SyntaxToken> {
        first_token(&self.0, |k| matches!(k, SyntaxKind::EQ | SyntaxKind::COLON))
    }

    /// A quoted value (structural mode)
    pub fn string(&self) -> Option<StringLiteral> {
        tokens(&self.0).find_map(StringLiteral::cast)
    }

    /// A raw value (legacy mode)
    pub fn raw_value(&self) -> Option<SyntaxToken> {
        first_token(&self.0, |k| k == SyntaxKind::VALUE)
    }

    /// The logical value: unescaped string content, or the raw value with
    /// continuations joined
    pub fn value(&self) -> Option<String> {
        if let Some(string) = self.string() {
            return Some(string.value());
        }
        self.raw_value().map(|t| join_continuations(t.text()))
    }

    /// Range of the value text (string content without quotes, or raw value)
    pub fn value_range(&self) -> Option<TextRange> {
        self.string()
            .map(|s| s.content_range())
            .or_else(|| self.raw_value().map(|t| t.text_range()))
    }
}

ast_node!(Declaration, DECLARATION);

impl Declaration {
    pub fn type_keyword(&self) -> Option<SyntaxToken> {
        first_token(&self.0, SyntaxKind::is_type_keyword)
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        first_token(&self.0, |k| k == SyntaxKind::IDENT)
    }

    pub fn sequence(&self) -> Option<StringLiteral> {
        tokens(&self.0).find_map(StringLiteral::cast)
    }
}

ast_node!(GeneDefinition, GENE_DEFINITION);

impl GeneDefinition {
    pub fn name(&self) -> Option<SyntaxToken> {
        first_token(&self.0, |k| k == SyntaxKind::IDENT)
    }

    pub fn body(&self) -> Option<GeneBody> {
        self.0.children().find_map(GeneBody::cast)
    }

    pub fn properties(&self) -> impl Iterator<Item = GeneProperty> {
        self.body()
            .into_iter()
            .flat_map(|body| body.properties().collect::<Vec<_>>())
    }
}

ast_node!(GeneBody, GENE_BODY);

impl GeneBody {
    pub fn properties(&self) -> impl Iterator<Item = GeneProperty> + '_ {
        self.0.children().filter_map(GeneProperty::cast)
    }

    pub fn is_closed(&self) -> bool {
        first_token(&self.0, |k| k == SyntaxKind::R_BRACE).is_some()
    }
}

ast_node!(GeneProperty, GENE_PROPERTY);

impl GeneProperty {
    pub fn name(&self) -> Option<SyntaxToken> {
        first_token(&self.0, SyntaxKind::is_gene_property_keyword)
    }

    pub fn value(&self) -> Option<StringLiteral> {
        tokens(&self.0).find_map(StringLiteral::cast)
    }
}

// ============================================================================
// Tokens
// ============================================================================

/// A double-quoted string literal
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StringLiteral(SyntaxToken);

impl AstToken for StringLiteral {
    fn can_cast(kind: SyntaxKind) -> bool {
        kind == SyntaxKind::STRING
    }

    fn cast(token: SyntaxToken) -> Option<Self> {
        if Self::can_cast(token.kind()) {
            Some(Self(token))
        } else {
            None
        }
    }

    fn syntax(&self) -> &SyntaxToken {
        &self.0
    }
}

impl StringLiteral {
    pub fn is_terminated(&self) -> bool {
        string_is_terminated(self.text())
    }

    /// Range of the text between the quotes
    pub fn content_range(&self) -> TextRange {
        let range = self.0.text_range();
        let quote = TextSize::of('"');
        let end = if self.is_terminated() {
            range.end() - quote
        } else {
            range.end()
        };
        TextRange::new((range.start() + quote).min(end), end)
    }

    /// The raw text between the quotes, escapes untouched
    pub fn content(&self) -> &str {
        let range = self.content_range() - self.0.text_range().start();
        &self.text()[range]
    }

    /// The content with escape sequences resolved
    pub fn value(&self) -> String {
        unescape_string(self.content())
    }
}

/// Resolve `\n`, `\t`, `\r`, `\"` and `\\`; other escapes are kept verbatim.
pub fn unescape_string(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Legacy keys escape spaces as `\ `.
pub fn unescape_key(raw: &str) -> String {
    raw.replace("\\ ", " ")
}

/// Escape spaces so that a key survives legacy-mode lexing.
pub fn escape_key(key: &str) -> String {
    key.replace(' ', "\\ ")
}

/// Join backslash-newline continuations: the escape, the newline and the
/// following indentation are removed, then the result is trimmed.
pub fn join_continuations(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(idx) = rest.find('\\') {
        out.push_str(&rest[..idx]);
        let after = &rest[idx + 1..];
        let after_newline = after
            .strip_prefix("\r\n")
            .or_else(|| after.strip_prefix('\n'));
        match after_newline {
            Some(next_line) => {
                rest = next_line.trim_start_matches([' ', '\t', '\u{c}']);
            }
            None => {
                // Keep other escapes intact
                let width = after.chars().next().map_or(0, char::len_utf8);
                out.push('\\');
                out.push_str(&after[..width]);
                rest = &after[width..];
            }
        }
    }
    out.push_str(rest);
    out.trim().to_string()
}

// ============================================================================
// Documentation comments
// ============================================================================

/// The comment lines directly preceding `node`, separated from it and from
/// each other only by whitespace, with the comment prefix and one following
/// space stripped. Lines are joined with `\n` in source order.
pub fn doc_comment(node: &SyntaxNode) -> Option<String> {
    let mut lines = Vec::new();
    let preceding = node
        .siblings_with_tokens(Direction::Prev)
        .skip(1)
        .map_while(|e| e.into_token())
        .take_while(|t| t.kind().is_trivia());
    for token in preceding {
        if token.kind() == SyntaxKind::LINE_COMMENT {
            lines.push(strip_comment_prefix(token.text()).to_string());
        }
    }
    if lines.is_empty() {
        return None;
    }
    lines.reverse();
    Some(lines.join("\n"))
}

/// The single comment line closest before `node`, if any.
pub fn leading_comment(node: &SyntaxNode) -> Option<String> {
    node.siblings_with_tokens(Direction::Prev)
        .skip(1)
        .map_while(|e| e.into_token())
        .take_while(|t| t.kind().is_trivia())
        .find(|t| t.kind() == SyntaxKind::LINE_COMMENT)
        .map(|t| strip_comment_prefix(t.text()).to_string())
}

fn strip_comment_prefix(text: &str) -> &str {
    let body = text
        .strip_prefix("//")
        .or_else(|| text.strip_prefix('#'))
        .or_else(|| text.strip_prefix('!'))
        .unwrap_or(text);
    body.strip_prefix(' ').unwrap_or(body).trim_end()
}
