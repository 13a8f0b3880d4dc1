//! Shared setup for integration tests.

use biosyntax::base::FileId;
use biosyntax::ide::AnalysisHost;
use biosyntax::{LineCol, LineIndex, TextSize};

/// Creates an AnalysisHost holding `files` (path, text), in order.
pub fn host_with(files: &[(&str, &str)]) -> (AnalysisHost, Vec<FileId>) {
    let mut host = AnalysisHost::new();
    let ids = files
        .iter()
        .map(|(path, text)| host.set_file_content(path, text))
        .collect();
    (host, ids)
}

/// Position of the first occurrence of `needle` in `text`, shifted by `delta`
/// characters.
pub fn position_of(text: &str, needle: &str, delta: usize) -> LineCol {
    let start = text
        .find(needle)
        .unwrap_or_else(|| panic!("'{needle}' not found in {text:?}"));
    let offset = TextSize::try_from(start + delta).expect("offset fits");
    LineIndex::new(text).line_col(offset)
}
