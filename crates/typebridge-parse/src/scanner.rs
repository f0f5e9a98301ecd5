//! Symbol discovery over a source tree
//!
//! Each `.rs` file is resolved to a namespace using two strategies, in
//! order:
//!
//! 1. conventional: base namespace plus the path components after the last
//!    `src` directory segment, with the file stem as the final segment
//!    (`mod.rs` and `lib.rs` stems are dropped);
//! 2. fallback: a textual `// namespace: foo::bar` header inside the file,
//!    combined with the file stem.
//!
//! A file resolving under neither strategy is skipped with a debug log, not
//! an error. Traversal follows directory order; results are not sorted.

use std::path::{Path, PathBuf};

use crate::error::ParseError;

/// A source file resolved to a loadable namespace.
#[derive(Debug, Clone, PartialEq)]
pub struct Discovered {
    pub namespace: String,
    pub path: PathBuf,
}

/// Scan a root directory and resolve each source file to a namespace.
pub fn scan(root: &Path, base_namespace: &str) -> Result<Vec<Discovered>, ParseError> {
    let mut files = Vec::new();
    walk(root, &mut files)?;

    let mut result = Vec::new();
    for path in files {
        match resolve_namespace(&path, base_namespace) {
            Some(namespace) => result.push(Discovered { namespace, path }),
            None => {
                tracing::debug!(path = %path.display(), "skipping file: no resolvable namespace");
            }
        }
    }
    Ok(result)
}

fn walk(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), ParseError> {
    let entries = std::fs::read_dir(dir).map_err(|source| ParseError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| ParseError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            walk(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            files.push(path);
        }
    }
    Ok(())
}

fn resolve_namespace(path: &Path, base_namespace: &str) -> Option<String> {
    conventional_namespace(path, base_namespace).or_else(|| header_namespace(path))
}

/// Strategy 1: path components after the last `src` segment.
fn conventional_namespace(path: &Path, base_namespace: &str) -> Option<String> {
    let components: Vec<&str> = path
        .iter()
        .filter_map(|c| c.to_str())
        .collect();
    let src_idx = components.iter().rposition(|c| *c == "src")?;

    let mut segments = vec![base_namespace.to_string()];
    // Everything between `src` and the file name is a module path.
    for dir in &components[src_idx + 1..components.len().saturating_sub(1)] {
        segments.push((*dir).to_string());
    }

    let stem = path.file_stem()?.to_str()?;
    if stem != "mod" && stem != "lib" {
        segments.push(stem.to_string());
    }
    Some(segments.join("::"))
}

/// Strategy 2: a `// namespace: foo::bar` header comment.
fn header_namespace(path: &Path) -> Option<String> {
    let source = std::fs::read_to_string(path).ok()?;
    let declared = source.lines().find_map(|line| {
        line.trim()
            .strip_prefix("// namespace:")
            .map(|rest| rest.trim().to_string())
    })?;
    if declared.is_empty() {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    if stem == "mod" || stem == "lib" {
        Some(declared)
    } else {
        Some(format!("{declared}::{stem}"))
    }
}
