use std::path::Path;

use crate::ide::AnalysisHost;

use super::LoadError;
use super::file_loader;

/// Counts from one directory load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub loaded: usize,
    pub failed: usize,
}

/// Loads project files into an AnalysisHost.
///
/// `.biosyntax` files are always loaded; host-language files (scanned only
/// for literal references) when their extension is registered.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceLoader {
    host_extensions: Vec<String>,
}

impl WorkspaceLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also load files with these extensions (without the dot).
    pub fn with_host_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.host_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    fn accepts(&self, path: &Path) -> bool {
        file_loader::is_biosyntax_file(path)
            || file_loader::get_extension(path)
                .is_some_and(|ext| self.host_extensions.iter().any(|h| h == ext))
    }

    /// Loads all matching files under `path` (recursively) into `host`.
    ///
    /// Unreadable files are logged and counted, not fatal.
    pub fn load_directory_into_host(
        &self,
        path: impl AsRef<Path>,
        host: &mut AnalysisHost,
    ) -> Result<LoadSummary, LoadError> {
        let path = path.as_ref();
        let paths = file_loader::collect_file_paths(path, &|p| self.accepts(p))?;
        let mut summary = LoadSummary::default();

        for file in paths {
            match file_loader::load_file(&file) {
                Ok(text) => {
                    host.set_file_content(&file, &text);
                    summary.loaded += 1;
                }
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", file.display(), e);
                    summary.failed += 1;
                }
            }
        }

        tracing::info!(
            "Loaded {} files from {} ({} failed)",
            summary.loaded,
            path.display(),
            summary.failed
        );
        Ok(summary)
    }

    /// Loads a single file into an AnalysisHost.
    pub fn load_file_into_host(&self, path: impl AsRef<Path>, host: &mut AnalysisHost) -> Result<(), LoadError> {
        let path = path.as_ref();
        let text = file_loader::load_file(path)?;
        host.set_file_content(path, &text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_load_directory_with_host_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("defs.biosyntax"), "DNASeq d = \"ATG\"").expect("write");
        fs::write(dir.path().join("Main.java"), "String s = \"biosyntax:d\";").expect("write");
        fs::write(dir.path().join("README.md"), "\"biosyntax:d\"").expect("write");

        let mut host = AnalysisHost::new();
        let summary = WorkspaceLoader::new()
            .with_host_extensions(["java"])
            .load_directory_into_host(dir.path(), &mut host)
            .expect("load");
        assert_eq!(summary, LoadSummary { loaded: 2, failed: 0 });

        let analysis = host.analysis();
        let main = analysis.file_id(dir.path().join("Main.java")).expect("host file");
        assert!(analysis.diagnostics(main).is_empty());
    }

    #[test]
    fn test_load_directory_missing() {
        let mut host = AnalysisHost::new();
        let result = WorkspaceLoader::new().load_directory_into_host("/no/such/dir", &mut host);
        assert!(matches!(result, Err(LoadError::NotADirectory(_))));
    }
}
