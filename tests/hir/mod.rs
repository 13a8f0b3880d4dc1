use std::ops::Range;

use biosyntax::TextSize;
use biosyntax::genetics::SequenceKind;
use biosyntax::hir::{ProjectIndex, QuickFix, Severity, codes};
use rstest::rstest;
use tokio_util::sync::CancellationToken;

use crate::helpers::{host_with, position_of};

fn slice(text: &str, range: biosyntax::TextRange) -> &str {
    &text[Range::<usize>::from(range)]
}

#[rstest]
#[case(SequenceKind::Nucleotide)]
#[case(SequenceKind::Rna)]
#[case(SequenceKind::Dna)]
#[case(SequenceKind::AminoAcid)]
fn test_full_alphabet_validates(#[case] kind: SequenceKind) {
    let letters = std::str::from_utf8(kind.alphabet()).expect("ascii alphabet");
    let source = format!("{} s = \"{}\"", kind.keyword(), letters);
    let (host, ids) = host_with(&[("a.biosyntax", &source)]);
    assert!(host.analysis().diagnostics(ids[0]).is_empty());
}

#[test]
fn test_invalid_base_reported_at_exact_offset() {
    let source = "// comment\nDNASeq d = \"AT XG\"";
    let (host, ids) = host_with(&[("a.biosyntax", source)]);
    let diags = host.analysis().diagnostics(ids[0]);
    assert_eq!(diags.len(), 1);
    assert_eq!(slice(source, diags[0].range), "X");
    let x = source.find('X').expect("X") as u32;
    assert_eq!(diags[0].range.start(), TextSize::new(x));
    assert_eq!(diags[0].severity, Severity::Error);
    assert_eq!(diags[0].code.as_deref(), Some(codes::INVALID_SEQUENCE_CHARACTER));
}

#[test]
fn test_gene_codon_scenario() {
    let bad = "Gene g { Start_Codon = \"XYZ\" }";
    let (host, ids) = host_with(&[("a.biosyntax", bad)]);
    let diags = host.analysis().diagnostics(ids[0]);
    assert_eq!(diags.len(), 1);
    assert_eq!(slice(bad, diags[0].range), "XYZ");
    assert_eq!(diags[0].code.as_deref(), Some(codes::INVALID_GENE_PROPERTY_VALUE));

    let (host, ids) = host_with(&[("a.biosyntax", "Gene g { Start_Codon = \"ATG\" }")]);
    assert!(host.analysis().diagnostics(ids[0]).is_empty());
}

#[test]
fn test_duplicate_declarations_are_ambiguous() {
    let (host, ids) = host_with(&[
        ("a.biosyntax", "DNASeq dna1 = \"ATG\""),
        ("b.biosyntax", "DNASeq dna1 = \"GGG\""),
        ("Main.java", "String s = \"biosyntax:dna1\";"),
    ]);
    let analysis = host.analysis();

    let result = analysis.index().resolve("dna1");
    assert!(result.is_ambiguous());
    assert!(!result.is_unresolved());
    assert_eq!(result.candidates().len(), 2);
    assert!(result.definition().is_none());

    let diags = analysis.diagnostics(ids[2]);
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].severity, Severity::Info);
    assert_eq!(diags[0].code.as_deref(), Some(codes::AMBIGUOUS_REFERENCE));
}

#[test]
fn test_unresolved_reference_offers_fix() {
    let source = "String s = \"biosyntax:nope\";";
    let (host, ids) = host_with(&[("Main.java", source)]);
    let diags = host.analysis().diagnostics(ids[0]);
    assert_eq!(diags.len(), 1);
    assert_eq!(slice(source, diags[0].range), "nope");
    assert_eq!(diags[0].code.as_deref(), Some(codes::UNRESOLVED_REFERENCE));
    match &diags[0].fix {
        Some(QuickFix::CreateProperty { key }) => assert_eq!(&**key, "nope"),
        other => panic!("unexpected fix {other:?}"),
    }
}

#[test]
fn test_update_file_replaces_contributions() {
    let (mut host, _) = host_with(&[("a.biosyntax", "old = \"1\"")]);
    assert!(host.analysis().index().resolve("old").is_found());

    host.set_file_content("a.biosyntax", "new = \"1\"");
    let analysis = host.analysis();
    assert!(analysis.index().resolve("old").is_unresolved());
    assert!(analysis.index().resolve("new").is_found());
}

#[test]
fn test_find_usages_cancelled_returns_none() {
    let (host, ids) = host_with(&[
        ("a.biosyntax", "msg = \"hello\""),
        ("Main.java", "String s = \"biosyntax:msg\";"),
    ]);
    let analysis = host.analysis();
    let position = position_of("msg = \"hello\"", "msg", 1);

    let live = CancellationToken::new();
    let found = analysis
        .find_references(ids[0], position, false, &live)
        .expect("not cancelled");
    assert_eq!(found.len(), 1);

    let cancelled = CancellationToken::new();
    cancelled.cancel();
    assert!(analysis.find_references(ids[0], position, false, &cancelled).is_none());
}

#[test]
fn test_snapshot_is_stable_across_updates() {
    let index = ProjectIndex::new();
    let before = index.snapshot();
    let (host, _) = host_with(&[("a.biosyntax", "k = \"v\"")]);
    let file = host.analysis().file(biosyntax::FileId::new(0)).expect("file").clone();
    index.update_file(
        file.id,
        biosyntax::hir::FileContribution::new(&file.entities, &file.references),
    );
    assert_eq!(before.file_count(), 0);
    assert!(index.snapshot().resolve("k").is_found());
    assert!(index.snapshot().revision() > before.revision());
}
