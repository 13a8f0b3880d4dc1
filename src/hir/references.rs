//! Literal references - string literals carrying the reference prefix.
//!
//! A literal such as `"biosyntax:dna1"` in any project file refers to the
//! key `dna1`. Language files are scanned through their syntax tree; host
//! files (any other source language) through a small logos scanner that
//! only recognizes string literals and comments.

use logos::Logos;
use smol_str::SmolStr;

use crate::base::{FileId, TextRange, TextSize};
use crate::parser::{Parse, SyntaxKind, string_is_terminated, unescape_string};

/// One literal reference found in a file.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LiteralReference {
    pub file: FileId,
    /// The key after the prefix.
    pub key: SmolStr,
    /// The whole literal, quotes included.
    pub literal_range: TextRange,
    /// The key text inside the literal.
    pub key_range: TextRange,
}

/// Scanner for host-language files.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum HostToken {
    #[regex(r#""([^"\\\r\n]|\\[^\r\n])*""#)]
    String,

    #[regex(r"//[^\r\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    #[regex(r#"[^"/]+"#)]
    Text,

    #[token("/")]
    Slash,
}

/// Extract a reference from one quoted literal starting at `offset`.
fn reference_in_literal(
    file: FileId,
    literal: &str,
    offset: TextSize,
    prefix: &str,
) -> Option<LiteralReference> {
    if !string_is_terminated(literal) {
        return None;
    }
    let content = literal.strip_prefix('"')?.strip_suffix('"')?;
    let value = unescape_string(content);
    let key = value.strip_prefix(prefix)?;
    let literal_range = TextRange::at(offset, TextSize::of(literal));
    let key_start = offset + TextSize::of('"') + TextSize::of(prefix);
    let key_end = literal_range.end() - TextSize::of('"');
    Some(LiteralReference {
        file,
        key: key.into(),
        literal_range,
        key_range: TextRange::new(key_start.min(key_end), key_end),
    })
}

/// Scan free text (host files, raw legacy values) for reference literals.
pub fn scan_text(file: FileId, text: &str, base: TextSize, prefix: &str) -> Vec<LiteralReference> {
    let mut lexer = HostToken::lexer(text);
    let mut references = Vec::new();
    while let Some(token) = lexer.next() {
        if token == Ok(HostToken::String) {
            let offset = base + TextSize::new(lexer.span().start as u32);
            references.extend(reference_in_literal(file, lexer.slice(), offset, prefix));
        }
    }
    references
}

/// Collect the reference literals of a parsed language file.
pub fn scan_parse(file: FileId, parse: &Parse, prefix: &str) -> Vec<LiteralReference> {
    let mut references = Vec::new();
    for token in parse
        .syntax()
        .descendants_with_tokens()
        .filter_map(|e| e.into_token())
    {
        match token.kind() {
            SyntaxKind::STRING => references.extend(reference_in_literal(
                file,
                token.text(),
                token.text_range().start(),
                prefix,
            )),
            SyntaxKind::VALUE => references.extend(scan_text(
                file,
                token.text(),
                token.text_range().start(),
                prefix,
            )),
            _ => {}
        }
    }
    references
}
