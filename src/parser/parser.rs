//! Recursive descent parser for BioSyntax
//!
//! Builds a rowan GreenNode tree from tokens.
//! Supports error recovery and produces a lossless CST: the text of the
//! root node is always exactly the input.

use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use crate::base::LanguageMode;
use rowan::{GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Get the typed root
    pub fn tree(&self) -> super::SourceFile {
        super::SourceFile::new(self.syntax())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Parse structural BioSyntax source into a CST
pub fn parse(input: &str) -> Parse {
    parse_with_mode(input, LanguageMode::Structural)
}

/// Parse source in the given language mode
///
/// Never fails: malformed input yields a partial tree plus errors.
pub fn parse_with_mode(input: &str, mode: LanguageMode) -> Parse {
    let tokens: Vec<_> = Lexer::with_mode(input, mode).collect();
    let mut parser = Parser::new(&tokens);
    parser.parse_source_file();
    parser.finish()
}

/// Whether a STRING token carries its closing quote.
pub fn string_is_terminated(text: &str) -> bool {
    let Some(body) = text.strip_prefix('"').and_then(|t| t.strip_suffix('"')) else {
        return false;
    };
    let trailing_backslashes = body.chars().rev().take_while(|&c| c == '\\').count();
    trailing_backslashes % 2 == 0
}

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&'a Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> SyntaxKind {
        self.current().map(|t| t.kind).unwrap_or(SyntaxKind::EOF)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == kind
    }

    fn at_eof(&self) -> bool {
        self.at(SyntaxKind::EOF)
    }

    /// Index of the n-th non-trivia token from the current position
    fn nth_index(&self, n: usize) -> Option<usize> {
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.kind.is_trivia())
            .nth(n)
            .map(|(i, _)| self.pos + i)
    }

    fn nth(&self, n: usize) -> SyntaxKind {
        // Look ahead, skipping trivia
        self.nth_index(n)
            .map(|i| self.tokens[i].kind)
            .unwrap_or(SyntaxKind::EOF)
    }

    fn nth_text(&self, n: usize) -> &'a str {
        self.nth_index(n).map(|i| self.tokens[i].text).unwrap_or("")
    }

    /// A top-level recovery point: something that can start an entity
    fn at_anchor(&self) -> bool {
        let kind = self.nth(0);
        kind.is_type_keyword()
            || kind == SyntaxKind::GENE_KW
            || kind == SyntaxKind::KEY
            || (kind == SyntaxKind::IDENT && self.nth(1) == SyntaxKind::EQ)
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump(&mut self) {
        if let Some(token) = self.current() {
            if token.kind == SyntaxKind::EOF {
                return;
            }
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn skip_trivia(&mut self) {
        while self.current().map(|t| t.kind.is_trivia()).unwrap_or(false) {
            self.bump();
        }
    }

    /// Consume leading trivia and `kind` only if `kind` is next
    ///
    /// Keeps trailing trivia outside of nodes that end early.
    fn eat_after_trivia(&mut self, kind: SyntaxKind) -> bool {
        if self.nth(0) == kind {
            self.skip_trivia();
            self.bump();
            true
        } else {
            false
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    /// Report an error at the next non-trivia token
    fn error(&mut self, message: impl Into<String>) {
        let range = self
            .nth_index(0)
            .map(|i| self.tokens[i].range())
            .unwrap_or_else(|| TextRange::empty(self.end_offset()));
        self.errors.push(SyntaxError::new(message, range));
    }

    fn end_offset(&self) -> TextSize {
        self.tokens
            .last()
            .map(|t| t.offset + t.len())
            .unwrap_or_default()
    }

    /// Skip tokens into an ERROR node until `stop` holds, reporting the whole
    /// skipped span as one error.
    fn error_recover(&mut self, message: impl Into<String>, stop: impl Fn(&Self) -> bool) {
        self.skip_trivia();
        let start = self.current().map(|t| t.offset).unwrap_or_default();
        let mut end = start;
        self.builder.start_node(SyntaxKind::ERROR.into());
        // Always consume at least one token to make progress
        while !self.at_eof() {
            if let Some(token) = self.current() {
                if !token.kind.is_trivia() {
                    end = token.offset + token.len();
                }
            }
            self.bump();
            if stop(self) {
                break;
            }
        }
        self.builder.finish_node();
        self.errors
            .push(SyntaxError::new(message, TextRange::new(start, end)));
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    // =========================================================================
    // Grammar rules
    // =========================================================================

    /// SourceFile = (Property | Declaration | GeneDefinition)*
    fn parse_source_file(&mut self) {
        self.start_node(SyntaxKind::SOURCE_FILE);

        while !self.at_eof() {
            let pos_before = self.pos;
            self.skip_trivia();
            if self.at_eof() {
                break;
            }
            self.parse_entity();
            // Safety: if we didn't make progress, force-skip a token
            if self.pos == pos_before && !self.at_eof() {
                self.bump();
            }
        }
        // Trailing trivia and the zero-length EOF stay inside the root
        self.skip_trivia();

        self.finish_node();
    }

    fn parse_entity(&mut self) {
        match self.current_kind() {
            kind if kind.is_type_keyword() => self.parse_declaration(),
            SyntaxKind::GENE_KW => self.parse_gene_definition(),
            SyntaxKind::KEY => self.parse_key_value_property(),
            SyntaxKind::IDENT if self.nth(1) == SyntaxKind::EQ => self.parse_property(),
            // Already reported per character by the validator
            SyntaxKind::BAD_CHARACTER => self.bump(),
            _ => self.error_recover(
                "expected a declaration, gene definition or property",
                |p| p.at_anchor() || p.nth(0) == SyntaxKind::BAD_CHARACTER,
            ),
        }
    }

    /// Property = Ident '=' String
    fn parse_property(&mut self) {
        self.start_node(SyntaxKind::PROPERTY);
        self.bump(); // key
        self.eat_after_trivia(SyntaxKind::EQ);
        self.expect_string("expected a string value");
        self.finish_node();
    }

    /// Legacy property = Key ((':' | '=') Value?)?
    fn parse_key_value_property(&mut self) {
        self.start_node(SyntaxKind::PROPERTY);
        self.bump(); // key
        if self.eat_after_trivia(SyntaxKind::EQ) || self.eat_after_trivia(SyntaxKind::COLON) {
            self.eat_after_trivia(SyntaxKind::VALUE);
        }
        self.finish_node();
    }

    /// Declaration = TypeKeyword Ident '=' String
    fn parse_declaration(&mut self) {
        self.start_node(SyntaxKind::DECLARATION);
        self.bump(); // type keyword
        if !self.eat_after_trivia(SyntaxKind::IDENT) {
            self.error("expected a sequence name");
        }
        if self.eat_after_trivia(SyntaxKind::EQ) {
            self.expect_string("expected a sequence string");
        } else {
            self.error("expected '='");
        }
        self.finish_node();
    }

    /// GeneDefinition = 'Gene' Ident '{' GeneProperty* '}'
    fn parse_gene_definition(&mut self) {
        self.start_node(SyntaxKind::GENE_DEFINITION);
        self.bump(); // Gene
        if !self.eat_after_trivia(SyntaxKind::IDENT) {
            self.error("expected a gene name");
        }
        if self.nth(0) == SyntaxKind::L_BRACE {
            self.skip_trivia();
            self.parse_gene_body();
        } else {
            self.error("expected '{'");
        }
        self.finish_node();
    }

    fn parse_gene_body(&mut self) {
        self.start_node(SyntaxKind::GENE_BODY);
        self.bump(); // {

        loop {
            let kind = self.nth(0);
            match kind {
                SyntaxKind::R_BRACE => {
                    self.skip_trivia();
                    self.bump();
                    break;
                }
                SyntaxKind::EOF => {
                    self.error("missing '}'");
                    break;
                }
                _ if kind.is_type_keyword() || kind == SyntaxKind::GENE_KW => {
                    // Close the gene implicitly; the next entity starts here
                    self.error("missing '}'");
                    break;
                }
                _ if kind.is_gene_property_keyword() => {
                    self.skip_trivia();
                    self.parse_gene_property();
                }
                SyntaxKind::BAD_CHARACTER => {
                    self.skip_trivia();
                    self.bump();
                }
                _ => {
                    let message = if kind == SyntaxKind::IDENT {
                        format!("unknown gene property `{}`", self.nth_text(0))
                    } else {
                        "expected a gene property or '}'".to_string()
                    };
                    self.error_recover(message, |p| {
                        let next = p.nth(0);
                        next.is_gene_property_keyword()
                            || next.is_type_keyword()
                            || matches!(
                                next,
                                SyntaxKind::R_BRACE
                                    | SyntaxKind::GENE_KW
                                    | SyntaxKind::BAD_CHARACTER
                            )
                    });
                }
            }
        }

        self.finish_node();
    }

    /// GeneProperty = PropertyName ('=' String ';'? | ';')
    fn parse_gene_property(&mut self) {
        self.start_node(SyntaxKind::GENE_PROPERTY);
        self.bump(); // property name
        if self.eat_after_trivia(SyntaxKind::EQ) {
            self.expect_string("expected a string value");
            self.eat_after_trivia(SyntaxKind::SEMICOLON);
        } else if !self.eat_after_trivia(SyntaxKind::SEMICOLON) {
            self.error("expected '=' or ';'");
        }
        self.finish_node();
    }

    fn expect_string(&mut self, message: &str) {
        if self.nth(0) != SyntaxKind::STRING {
            self.error(message);
            return;
        }
        self.skip_trivia();
        if let Some(token) = self.current() {
            if !string_is_terminated(token.text) {
                self.errors
                    .push(SyntaxError::new("unterminated string literal", token.range()));
            }
        }
        self.bump();
    }
}
