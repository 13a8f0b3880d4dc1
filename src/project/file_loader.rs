//! File discovery and reading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::base::constants::BIOSYNTAX_EXT;

use super::LoadError;

/// Get the extension of a path, if it has a UTF-8 one.
pub fn get_extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str())
}

pub fn is_biosyntax_file(path: &Path) -> bool {
    get_extension(path) == Some(BIOSYNTAX_EXT)
}

/// Recursively collect files under `dir` accepted by `accept`, sorted by path.
pub fn collect_file_paths(dir: &Path, accept: &dyn Fn(&Path) -> bool) -> Result<Vec<PathBuf>, LoadError> {
    if !dir.is_dir() {
        return Err(LoadError::NotADirectory(dir.to_path_buf()));
    }
    let mut paths = Vec::new();
    collect_recursive(dir, accept, &mut paths)?;
    paths.sort();
    Ok(paths)
}

fn collect_recursive(dir: &Path, accept: &dyn Fn(&Path) -> bool, paths: &mut Vec<PathBuf>) -> Result<(), LoadError> {
    let entries = fs::read_dir(dir).map_err(|e| LoadError::io(dir, e))?;
    for entry in entries {
        let path = entry.map_err(|e| LoadError::io(dir, e))?.path();
        if path.is_dir() {
            collect_recursive(&path, accept, paths)?;
        } else if path.is_file() && accept(&path) {
            paths.push(path);
        }
    }
    Ok(())
}

/// Read a file as UTF-8 text.
pub fn load_file(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|e| LoadError::io(path, e))
}
