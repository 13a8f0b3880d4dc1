//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the syntax tree,
//! for both the structural grammar and the legacy key/value grammar.

/// All syntax kinds (tokens and nodes) in BioSyntax
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation).
/// Nodes are composite (properties, declarations, gene definitions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - preserved but not semantically meaningful)
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT, // `// ...` or, in legacy mode, `# ...` / `! ...`

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,  // dna1
    STRING, // "ATGC" (possibly unterminated)
    KEY,    // legacy property key
    VALUE,  // legacy property value, up to end of logical line

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_BRACE,   // {
    R_BRACE,   // }
    EQ,        // =
    COLON,     // :
    SEMICOLON, // ;

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    NT_SEQ_KW,
    RNA_SEQ_KW,
    DNA_SEQ_KW,
    AA_SEQ_KW,
    GENE_KW,
    PROMOTER_KW,
    START_CODON_KW,
    STOP_CODON_KW,
    CODING_SEQUENCE_KW,
    TERMINATOR_KW,

    // =========================================================================
    // SPECIAL TOKENS
    // =========================================================================
    BAD_CHARACTER, // one per unrecognized character
    EOF,

    // =========================================================================
    // NODES
    // =========================================================================
    SOURCE_FILE,
    PROPERTY,
    DECLARATION,
    GENE_DEFINITION,
    GENE_BODY,
    GENE_PROPERTY,
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::LINE_COMMENT)
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::NT_SEQ_KW as u16) && (self as u16) <= (Self::TERMINATOR_KW as u16)
    }

    /// Check if this is a sequence type keyword (`NtSeq`, `RNASeq`, `DNASeq`, `AASeq`)
    pub fn is_type_keyword(self) -> bool {
        matches!(
            self,
            Self::NT_SEQ_KW | Self::RNA_SEQ_KW | Self::DNA_SEQ_KW | Self::AA_SEQ_KW
        )
    }

    /// Check if this is a gene property name keyword
    pub fn is_gene_property_keyword(self) -> bool {
        (self as u16) >= (Self::PROMOTER_KW as u16) && (self as u16) <= (Self::TERMINATOR_KW as u16)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_BRACE as u16) && (self as u16) <= (Self::SEMICOLON as u16)
    }

    /// Check if this is a literal
    pub fn is_literal(self) -> bool {
        matches!(self, Self::IDENT | Self::STRING | Self::KEY | Self::VALUE)
    }

    /// Check if this is a node kind rather than a token kind
    pub fn is_node(self) -> bool {
        (self as u16) >= (Self::SOURCE_FILE as u16) && self != Self::__LAST
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BioSyntaxLanguage {}

impl rowan::Language for BioSyntaxLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<BioSyntaxLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<BioSyntaxLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<BioSyntaxLanguage>;
