//! Logos-based lexer for BioSyntax
//!
//! Fast tokenization using the logos crate. The structural grammar uses a
//! single token enum; the legacy key/value grammar morphs between a key
//! lexer and a value lexer so that a separator switches the rest of the
//! line into raw-value mode.

use super::syntax_kind::SyntaxKind;
use crate::base::LanguageMode;
use logos::Logos;
use rowan::{TextRange, TextSize};
use std::ops::Range;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

impl Token<'_> {
    pub fn range(&self) -> TextRange {
        TextRange::at(self.offset, TextSize::of(self.text))
    }

    pub fn len(&self) -> TextSize {
        TextSize::of(self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Lexer wrapping the logos-generated tokenizers
///
/// Yields tokens covering every byte of the input, followed by a single
/// zero-length [`SyntaxKind::EOF`] token.
pub struct Lexer<'a> {
    input: &'a str,
    inner: Option<Inner<'a>>,
    /// Unrecognized text not yet emitted, split one character per token.
    pending_bad: Range<usize>,
    eof_emitted: bool,
}

enum Inner<'a> {
    Structural(logos::Lexer<'a, LogosToken>),
    Key(logos::Lexer<'a, PropertyKeyToken>),
    Value(logos::Lexer<'a, PropertyValueToken>),
}

type Lexed = Option<(Result<SyntaxKind, ()>, Range<usize>)>;

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_mode(input, LanguageMode::Structural)
    }

    pub fn with_mode(input: &'a str, mode: LanguageMode) -> Self {
        let inner = match mode {
            LanguageMode::Structural => Inner::Structural(LogosToken::lexer(input)),
            LanguageMode::Properties => Inner::Key(PropertyKeyToken::lexer(input)),
        };
        Self {
            input,
            inner: Some(inner),
            pending_bad: 0..0,
            eof_emitted: false,
        }
    }

    fn token(&self, kind: SyntaxKind, span: Range<usize>) -> Token<'a> {
        Token {
            kind,
            text: &self.input[span.clone()],
            offset: TextSize::new(span.start as u32),
        }
    }

    fn next_bad_char(&mut self) -> Option<Token<'a>> {
        if self.pending_bad.is_empty() {
            return None;
        }
        let start = self.pending_bad.start;
        let width = self.input[start..].chars().next().map_or(1, char::len_utf8);
        let end = (start + width).min(self.pending_bad.end);
        self.pending_bad.start = end;
        Some(self.token(SyntaxKind::BAD_CHARACTER, start..end))
    }

    fn advance(inner: Inner<'a>) -> (Lexed, Inner<'a>) {
        match inner {
            Inner::Structural(mut lex) => {
                let lexed = lex.next().map(|res| (res.map(SyntaxKind::from), lex.span()));
                (lexed, Inner::Structural(lex))
            }
            Inner::Key(mut lex) => match lex.next() {
                Some(Ok(token)) => {
                    let span = lex.span();
                    let next = if token.starts_value() {
                        Inner::Value(lex.morph())
                    } else {
                        Inner::Key(lex)
                    };
                    (Some((Ok(token.into()), span)), next)
                }
                Some(Err(())) => {
                    let span = lex.span();
                    (Some((Err(()), span)), Inner::Key(lex))
                }
                None => (None, Inner::Key(lex)),
            },
            Inner::Value(mut lex) => match lex.next() {
                Some(Ok(token)) => {
                    let span = lex.span();
                    let next = if token.ends_value() {
                        Inner::Key(lex.morph())
                    } else {
                        Inner::Value(lex)
                    };
                    (Some((Ok(token.into()), span)), next)
                }
                Some(Err(())) => {
                    let span = lex.span();
                    (Some((Err(()), span)), Inner::Value(lex))
                }
                None => (None, Inner::Value(lex)),
            },
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(bad) = self.next_bad_char() {
            return Some(bad);
        }

        let lexed = match self.inner.take() {
            Some(inner) => {
                let (lexed, inner) = Self::advance(inner);
                if lexed.is_some() {
                    self.inner = Some(inner);
                }
                lexed
            }
            None => None,
        };

        match lexed {
            Some((Ok(kind), span)) => Some(self.token(kind, span)),
            Some((Err(()), span)) => {
                self.pending_bad = span;
                self.next_bad_char()
            }
            None if !self.eof_emitted => {
                self.eof_emitted = true;
                let end = self.input.len();
                Some(self.token(SyntaxKind::EOF, end..end))
            }
            None => None,
        }
    }
}

/// Tokenize an entire string into a Vec (structural grammar)
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Tokenize an entire string into a Vec using the given grammar
pub fn tokenize_with_mode(input: &str, mode: LanguageMode) -> Vec<Token<'_>> {
    Lexer::with_mode(input, mode).collect()
}

/// Logos token enum for the structural grammar - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"//[^\r\n]*")]
    LineComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r#""([^"\\\r\n]|\\[^\r\n])*""#)]
    String,

    /// A string missing its closing quote; runs to end of line.
    #[regex(r#""([^"\\\r\n]|\\[^\r\n])*"#)]
    UnterminatedString,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("=")]
    Eq,
    #[token(";")]
    Semicolon,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("NtSeq")]
    NtSeqKw,
    #[token("RNASeq")]
    RnaSeqKw,
    #[token("DNASeq")]
    DnaSeqKw,
    #[token("AASeq")]
    AaSeqKw,
    #[token("Gene")]
    GeneKw,
    #[token("Promoter")]
    PromoterKw,
    #[token("Start_Codon")]
    StartCodonKw,
    #[token("Stop_Codon")]
    StopCodonKw,
    #[token("Coding_Sequence")]
    CodingSequenceKw,
    #[token("Terminator")]
    TerminatorKw,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::Whitespace => SyntaxKind::WHITESPACE,
            LogosToken::LineComment => SyntaxKind::LINE_COMMENT,
            LogosToken::Ident => SyntaxKind::IDENT,
            LogosToken::String | LogosToken::UnterminatedString => SyntaxKind::STRING,
            LogosToken::LBrace => SyntaxKind::L_BRACE,
            LogosToken::RBrace => SyntaxKind::R_BRACE,
            LogosToken::Eq => SyntaxKind::EQ,
            LogosToken::Semicolon => SyntaxKind::SEMICOLON,
            LogosToken::NtSeqKw => SyntaxKind::NT_SEQ_KW,
            LogosToken::RnaSeqKw => SyntaxKind::RNA_SEQ_KW,
            LogosToken::DnaSeqKw => SyntaxKind::DNA_SEQ_KW,
            LogosToken::AaSeqKw => SyntaxKind::AA_SEQ_KW,
            LogosToken::GeneKw => SyntaxKind::GENE_KW,
            LogosToken::PromoterKw => SyntaxKind::PROMOTER_KW,
            LogosToken::StartCodonKw => SyntaxKind::START_CODON_KW,
            LogosToken::StopCodonKw => SyntaxKind::STOP_CODON_KW,
            LogosToken::CodingSequenceKw => SyntaxKind::CODING_SEQUENCE_KW,
            LogosToken::TerminatorKw => SyntaxKind::TERMINATOR_KW,
        }
    }
}

/// Legacy grammar, start of a logical line: keys, separators, comments
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum PropertyKeyToken {
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"[#!][^\r\n]*")]
    Comment,

    #[regex(r"([^:=\s\\#!]|\\[^\r\n])([^:=\s\\]|\\[^\r\n])*")]
    Key,

    #[token("=")]
    Eq,

    #[token(":")]
    Colon,
}

impl PropertyKeyToken {
    fn starts_value(self) -> bool {
        matches!(self, Self::Eq | Self::Colon)
    }
}

impl From<PropertyKeyToken> for SyntaxKind {
    fn from(token: PropertyKeyToken) -> Self {
        match token {
            PropertyKeyToken::Whitespace => SyntaxKind::WHITESPACE,
            PropertyKeyToken::Comment => SyntaxKind::LINE_COMMENT,
            PropertyKeyToken::Key => SyntaxKind::KEY,
            PropertyKeyToken::Eq => SyntaxKind::EQ,
            PropertyKeyToken::Colon => SyntaxKind::COLON,
        }
    }
}

/// Legacy grammar, after a separator: the raw value with continuations
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum PropertyValueToken {
    #[regex(r"[ \t\f]+")]
    Whitespace,

    #[regex(r"\r?\n")]
    Newline,

    #[regex(r"([^\s\\]|\\[^\r\n]|\\\r?\n)([^\r\n\\]|\\[^\r\n]|\\\r?\n)*")]
    Value,
}

impl PropertyValueToken {
    fn ends_value(self) -> bool {
        matches!(self, Self::Newline | Self::Value)
    }
}

impl From<PropertyValueToken> for SyntaxKind {
    fn from(token: PropertyValueToken) -> Self {
        match token {
            PropertyValueToken::Whitespace | PropertyValueToken::Newline => SyntaxKind::WHITESPACE,
            PropertyValueToken::Value => SyntaxKind::VALUE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<SyntaxKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    fn legacy_kinds(input: &str) -> Vec<SyntaxKind> {
        tokenize_with_mode(input, LanguageMode::Properties)
            .into_iter()
            .filter(|t| !t.kind.is_trivia())
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_declaration_tokens() {
        assert_eq!(
            kinds(r#"DNASeq dna1 = "ATGC""#),
            vec![
                SyntaxKind::DNA_SEQ_KW,
                SyntaxKind::WHITESPACE,
                SyntaxKind::IDENT,
                SyntaxKind::WHITESPACE,
                SyntaxKind::EQ,
                SyntaxKind::WHITESPACE,
                SyntaxKind::STRING,
                SyntaxKind::EOF,
            ]
        );
    }

    #[test]
    fn test_keyword_prefix_is_ident() {
        assert_eq!(kinds("Gene"), vec![SyntaxKind::GENE_KW, SyntaxKind::EOF]);
        assert_eq!(kinds("Genes"), vec![SyntaxKind::IDENT, SyntaxKind::EOF]);
        assert_eq!(kinds("Start_Codon"), vec![SyntaxKind::START_CODON_KW, SyntaxKind::EOF]);
    }

    #[test]
    fn test_tokens_cover_input() {
        let input = "// doc\nGene g {\n  Start_Codon = \"ATG\";\n  Promoter;\n}\n$%";
        let tokens = tokenize(input);
        let mut expected = TextSize::new(0);
        for token in &tokens {
            assert_eq!(token.offset, expected);
            expected += token.len();
        }
        assert_eq!(usize::from(expected), input.len());
        let text: String = tokens.iter().map(|t| t.text).collect();
        assert_eq!(text, input);
    }

    #[test]
    fn test_bad_characters_one_per_char() {
        let tokens = tokenize("$$é");
        let bad: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind == SyntaxKind::BAD_CHARACTER)
            .map(|t| (u32::from(t.offset), t.text))
            .collect();
        assert_eq!(bad, vec![(0, "$"), (1, "$"), (2, "é")]);
    }

    #[test]
    fn test_unterminated_string() {
        let tokens = tokenize("\"ATG\nGene");
        assert_eq!(tokens[0].kind, SyntaxKind::STRING);
        assert_eq!(tokens[0].text, "\"ATG");
        assert_eq!(tokens[2].kind, SyntaxKind::GENE_KW);
    }

    #[test]
    fn test_eof_is_last_and_empty() {
        let tokens = tokenize("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, SyntaxKind::EOF);
        assert!(tokens[0].is_empty());
    }

    #[test]
    fn test_structural_hash_is_bad_character() {
        assert_eq!(kinds("#"), vec![SyntaxKind::BAD_CHARACTER, SyntaxKind::EOF]);
    }

    #[test]
    fn test_legacy_key_value() {
        assert_eq!(
            legacy_kinds("# comment\nkey = some value\nother: x\nlonely\n"),
            vec![
                SyntaxKind::KEY,
                SyntaxKind::EQ,
                SyntaxKind::VALUE,
                SyntaxKind::KEY,
                SyntaxKind::COLON,
                SyntaxKind::VALUE,
                SyntaxKind::KEY,
                SyntaxKind::EOF,
            ]
        );
    }

    #[test]
    fn test_legacy_comment_prefixes() {
        let tokens = tokenize_with_mode("! bang\n# hash\n", LanguageMode::Properties);
        let comments: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind == SyntaxKind::LINE_COMMENT)
            .map(|t| t.text)
            .collect();
        assert_eq!(comments, vec!["! bang", "# hash"]);
    }

    #[test]
    fn test_legacy_value_continuation() {
        let tokens = tokenize_with_mode("k = one \\\n    two\nnext = 1", LanguageMode::Properties);
        let values: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind == SyntaxKind::VALUE)
            .map(|t| t.text)
            .collect();
        assert_eq!(values, vec!["one \\\n    two", "1"]);
    }

    #[test]
    fn test_legacy_escaped_space_in_key() {
        let tokens = tokenize_with_mode("my\\ key = v", LanguageMode::Properties);
        assert_eq!(tokens[0].kind, SyntaxKind::KEY);
        assert_eq!(tokens[0].text, "my\\ key");
    }
}
