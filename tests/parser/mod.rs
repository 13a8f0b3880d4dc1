use biosyntax::base::LanguageMode;
use biosyntax::parser::{Entity, SyntaxKind, parse, parse_with_mode, tokenize};
use rstest::rstest;

fn entity_kinds(source: &str, mode: LanguageMode) -> Vec<SyntaxKind> {
    let parse = parse_with_mode(source, mode);
    parse
        .tree()
        .entities()
        .map(|e| match e {
            Entity::Property(_) => SyntaxKind::PROPERTY,
            Entity::Declaration(_) => SyntaxKind::DECLARATION,
            Entity::Gene(_) => SyntaxKind::GENE_DEFINITION,
        })
        .collect()
}

#[test]
fn test_lossless_round_trip() {
    let source = "// header\nDNASeq d = \"ATG\"\nGene g {\n  Start_Codon = \"ATG\";\n}\n";
    let parse = parse(source);
    assert_eq!(parse.syntax().text().to_string(), source);
}

#[rstest]
#[case("NtSeq", SyntaxKind::NT_SEQ_KW)]
#[case("RNASeq", SyntaxKind::RNA_SEQ_KW)]
#[case("DNASeq", SyntaxKind::DNA_SEQ_KW)]
#[case("AASeq", SyntaxKind::AA_SEQ_KW)]
#[case("Gene", SyntaxKind::GENE_KW)]
fn test_keywords_lex(#[case] text: &str, #[case] kind: SyntaxKind) {
    let tokens = tokenize(text);
    assert_eq!(tokens[0].kind, kind);
}

#[test]
fn test_bad_character_is_a_token_not_a_parse_error() {
    let parse = parse("$ DNASeq d = \"ATG\"");
    assert!(parse.ok());
    let bad = parse
        .syntax()
        .descendants_with_tokens()
        .filter(|e| e.kind() == SyntaxKind::BAD_CHARACTER)
        .count();
    assert_eq!(bad, 1);
}

#[test]
fn test_mixed_entities_in_source_order() {
    let source = "DNASeq d = \"ATG\"\nGene g { Promoter; }\nAASeq p = \"MK\"";
    assert_eq!(
        entity_kinds(source, LanguageMode::Structural),
        vec![
            SyntaxKind::DECLARATION,
            SyntaxKind::GENE_DEFINITION,
            SyntaxKind::DECLARATION
        ]
    );
}

#[test]
fn test_unterminated_string_is_reported_once() {
    let parse = parse("DNASeq d = \"ATG\n");
    assert_eq!(parse.errors.len(), 1);
}

#[test]
fn test_legacy_whitespace_separated_keys() {
    assert_eq!(
        entity_kinds("a = 1\nb : 2\n", LanguageMode::Properties),
        vec![SyntaxKind::PROPERTY, SyntaxKind::PROPERTY]
    );
}
