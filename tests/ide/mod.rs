use biosyntax::LineCol;
use biosyntax::ide::{CompletionKind, FoldingKind, SymbolKind};
use tokio_util::sync::CancellationToken;

use crate::helpers::{host_with, position_of};

#[test]
fn test_hover_on_declaration() {
    let source = "// sample\nDNASeq dna1 = \"ATGC\"";
    let (host, ids) = host_with(&[("a.biosyntax", source)]);
    let hover = host
        .analysis()
        .hover(ids[0], position_of(source, "dna1", 1))
        .expect("hover");
    let doc = hover.documentation;
    assert_eq!(doc.title, "DNA Sequence Definition");
    assert_eq!(doc.section("Name"), Some("dna1"));
    assert_eq!(doc.section("RNA Form"), Some("AUGC"));
    assert_eq!(doc.section("Comment"), Some("sample"));
}

#[test]
fn test_hover_on_reference_in_host_file() {
    let host_text = "String s = \"biosyntax:msg\";";
    let (host, ids) = host_with(&[
        ("a.biosyntax", "msg = \"hello\""),
        ("Main.java", host_text),
    ]);
    let hover = host
        .analysis()
        .hover(ids[1], position_of(host_text, "msg", 1))
        .expect("hover");
    assert_eq!(hover.documentation.section("Value"), Some("hello"));
}

#[test]
fn test_goto_is_ambiguous_for_duplicate_keys() {
    let host_text = "String s = \"biosyntax:dna1\";";
    let (host, ids) = host_with(&[
        ("a.biosyntax", "DNASeq dna1 = \"ATG\""),
        ("b.biosyntax", "DNASeq dna1 = \"GGG\""),
        ("Main.java", host_text),
    ]);
    let result = host
        .analysis()
        .goto_definition(ids[2], position_of(host_text, "dna1", 0));
    assert!(result.is_ambiguous());
    let files: Vec<_> = result.targets.iter().map(|t| t.file).collect();
    assert_eq!(files, vec![ids[0], ids[1]]);
}

#[test]
fn test_goto_unique_definition() {
    let host_text = "x(\"biosyntax:seq\")";
    let (host, ids) = host_with(&[
        ("a.biosyntax", "RNASeq seq = \"AUG\""),
        ("b.py", host_text),
    ]);
    let result = host
        .analysis()
        .goto_definition(ids[1], position_of(host_text, "seq", 2));
    assert_eq!(result.targets.len(), 1);
    assert_eq!(result.targets[0].file, ids[0]);
    assert_eq!(result.targets[0].name, "seq");
}

#[test]
fn test_folding_placeholder_keeps_escaped_newline() {
    let (host, ids) = host_with(&[
        ("a.biosyntax", "msg = \"line one\\nline two\""),
        ("Main.java", "String s = \"biosyntax:msg\";"),
    ]);
    let ranges = host.analysis().folding_ranges(ids[1]);
    assert_eq!(ranges.len(), 1);
    assert_eq!(ranges[0].kind, FoldingKind::Reference);
    assert_eq!(ranges[0].placeholder, "line one\\nline two");
}

#[test]
fn test_top_level_completion_offers_keywords() {
    let source = "DNASeq d = \"ATG\"\n";
    let (host, ids) = host_with(&[("a.biosyntax", source)]);
    let items = host.analysis().completions(ids[0], LineCol { line: 1, col: 0 });
    let labels: Vec<_> = items.iter().map(|i| &*i.label).collect();
    for keyword in ["NtSeq", "RNASeq", "DNASeq", "AASeq", "Gene"] {
        assert!(labels.contains(&keyword), "missing {keyword} in {labels:?}");
    }
    assert!(items.iter().all(|i| i.kind == CompletionKind::Keyword));
}

#[test]
fn test_document_symbols_in_source_order() {
    let source = "a = \"1\"\nGene g { Promoter; Start_Codon = \"ATG\"; }\nAASeq p = \"MK\"";
    let (host, ids) = host_with(&[("a.biosyntax", source)]);
    let symbols = host.analysis().document_symbols(ids[0]);
    let names: Vec<_> = symbols.iter().map(|s| &*s.name).collect();
    assert_eq!(names, vec!["a", "g", "p"]);
    assert_eq!(symbols[1].kind, SymbolKind::Gene);
    assert_eq!(symbols[1].children.len(), 2);
}

#[test]
fn test_semantic_tokens_only_for_biosyntax_files() {
    let (host, ids) = host_with(&[
        ("a.biosyntax", "DNASeq d = \"ATG\""),
        ("Main.java", "String s = \"biosyntax:d\";"),
    ]);
    let analysis = host.analysis();
    assert!(!analysis.semantic_tokens(ids[0]).is_empty());
    assert!(analysis.semantic_tokens(ids[1]).is_empty());
}

#[test]
fn test_rename_definition_key() {
    let source = "msg = \"hello\"";
    let (mut host, ids) = host_with(&[("a.biosyntax", source)]);
    let change = host
        .rename(ids[0], position_of(source, "msg", 0), "greeting")
        .expect("rename");
    assert_eq!(change.edits.len(), 1);

    let analysis = host.analysis();
    assert_eq!(&*analysis.file(ids[0]).expect("file").text, "greeting = \"hello\"");
    assert!(analysis.index().resolve("greeting").is_found());
    assert!(analysis.index().resolve("msg").is_unresolved());
}

#[test]
fn test_rename_rejects_invalid_name() {
    let source = "msg = \"hello\"";
    let (mut host, ids) = host_with(&[("a.biosyntax", source)]);
    assert!(host.rename(ids[0], position_of(source, "msg", 0), "two words").is_err());
}

#[test]
fn test_rebuild_all_respects_cancellation() {
    let (mut host, _) = host_with(&[("a.biosyntax", "k = \"v\"")]);
    let revision = host.analysis().index().revision();

    let cancelled = CancellationToken::new();
    cancelled.cancel();
    assert!(!host.rebuild_all(&cancelled));
    assert_eq!(host.analysis().index().revision(), revision);

    assert!(host.rebuild_all(&CancellationToken::new()));
    assert!(host.analysis().index().resolve("k").is_found());
}
