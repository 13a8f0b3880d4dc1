use biosyntax::genetics::{
    KozakContext, ReadingFrame, TranslationError, find_orfs, find_orfs_with_min_length,
    format_fixed_width, gc_content, kozak_context, reverse_translate, to_dna, to_rna, translate,
};
use rstest::rstest;

#[rstest]
#[case("ATGC")]
#[case("atgcTTaa")]
#[case("")]
#[case("ACGT NNN")]
fn test_dna_rna_round_trip(#[case] dna: &str) {
    assert!(!dna.contains(['U', 'u']));
    assert_eq!(to_dna(&to_rna(dna)), dna);
}

#[test]
fn test_to_rna_changes_only_thymine() {
    assert_eq!(to_rna("ATGCTT"), "AUGCUU");
}

#[rstest]
#[case("MKWV*")]
#[case("ACDEFGHIKLMNPQRSTVWY")]
fn test_translate_inverts_reverse_translate(#[case] protein: &str) {
    let dna = reverse_translate(protein).expect("valid protein");
    assert_eq!(dna.len(), protein.len() * 3);
    assert_eq!(translate(&dna, ReadingFrame::default()), protein);
}

#[test]
fn test_reverse_translate_rejects_unknown_residue() {
    assert_eq!(
        reverse_translate("MBK"),
        Err(TranslationError::UnknownAminoAcid {
            residue: 'B',
            position: 1
        })
    );
}

#[test]
fn test_translate_frames() {
    let seq = "GATGAAATAA";
    let frame1 = ReadingFrame::new(1).expect("frame");
    assert_eq!(translate(seq, frame1), "MK*");
    assert!(ReadingFrame::new(3).is_none());
}

#[test]
fn test_orf_threshold_on_short_example() {
    let seq = "ATGAAATAAATGCCCTAAGGG";
    assert!(find_orfs(seq, ReadingFrame::default()).is_empty());
    let orfs = find_orfs_with_min_length(seq, ReadingFrame::default(), 9);
    assert_eq!(orfs.len(), 2);
    assert_eq!(orfs[0].sequence, "ATGAAATAA");
}

#[test]
fn test_orf_threshold_89_vs_90() {
    let ninety = format!("ATG{}TAA", "GCC".repeat(28));
    assert_eq!(ninety.len(), 90);
    let orfs = find_orfs(&ninety, ReadingFrame::default());
    assert_eq!(orfs.len(), 1);
    assert_eq!((orfs[0].start, orfs[0].end), (0, 90));

    // ORFs are whole codons, so the next length below 90 is 87.
    let eighty_seven = format!("ATG{}TAA", "GCC".repeat(27));
    assert!(find_orfs(&eighty_seven, ReadingFrame::default()).is_empty());
    assert_eq!(
        find_orfs_with_min_length(&eighty_seven, ReadingFrame::default(), 87).len(),
        1
    );
}

#[test]
fn test_gc_content() {
    assert_eq!(gc_content(""), 0.0);
    assert_eq!(gc_content("GGCC"), 100.0);
    assert_eq!(gc_content("ATGC"), 50.0);
}

#[test]
fn test_kozak_context() {
    assert_eq!(kozak_context("ATG"), KozakContext::TooShort);
    assert_eq!(
        kozak_context("GCCACCATGG"),
        KozakContext::Window("GCCACCATG".to_string())
    );
}

#[test]
fn test_format_fixed_width() {
    assert_eq!(format_fixed_width("ABCDEFG", 3), "ABC\nDEF\nG");
    assert_eq!(format_fixed_width("", 3), "");
}
