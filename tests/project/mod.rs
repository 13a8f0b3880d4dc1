use std::fs;

use biosyntax::ide::AnalysisHost;
use biosyntax::project::{LoadError, LoadSummary, WorkspaceLoader};

#[test]
fn test_load_workspace_and_resolve_across_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::create_dir(dir.path().join("seqs")).expect("mkdir");
    fs::write(dir.path().join("seqs/core.biosyntax"), "DNASeq dna1 = \"ATGAAATAA\"").expect("write");
    fs::write(dir.path().join("app.py"), "load(\"biosyntax:dna1\")").expect("write");

    let mut host = AnalysisHost::new();
    let summary = WorkspaceLoader::new()
        .with_host_extensions(["py"])
        .load_directory_into_host(dir.path(), &mut host)
        .expect("load");
    assert_eq!(summary, LoadSummary { loaded: 2, failed: 0 });
    assert_eq!(host.file_count(), 2);

    let analysis = host.analysis();
    let app = analysis.file_id(dir.path().join("app.py")).expect("app.py loaded");
    assert!(analysis.diagnostics(app).is_empty());
    assert!(analysis.index().resolve("dna1").is_found());
}

#[test]
fn test_host_files_ignored_without_extension() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("a.biosyntax"), "k = \"v\"").expect("write");
    fs::write(dir.path().join("app.py"), "\"biosyntax:k\"").expect("write");

    let mut host = AnalysisHost::new();
    let summary = WorkspaceLoader::new()
        .load_directory_into_host(dir.path(), &mut host)
        .expect("load");
    assert_eq!(summary.loaded, 1);
    assert!(!host.has_file(dir.path().join("app.py")));
}

#[test]
fn test_load_single_file_errors() {
    let mut host = AnalysisHost::new();
    let err = WorkspaceLoader::new()
        .load_file_into_host("/no/such/file.biosyntax", &mut host)
        .expect_err("missing file");
    assert!(matches!(err, LoadError::Io { .. }));
}
