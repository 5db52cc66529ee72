use std::collections::HashSet;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use rayon::prelude::*;
use resxbundle::formats::is_resx_file;

fn has_glob_meta(s: &str) -> bool {
    s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
}

/// Directory part of `pattern` before the first glob meta-character.
fn static_root(pattern: &str) -> PathBuf {
    let end = pattern
        .find(|c| matches!(c, '*' | '?' | '[' | '{'))
        .unwrap_or(pattern.len());
    let prefix = Path::new(&pattern[..end]);
    if prefix.is_dir() {
        prefix.to_path_buf()
    } else {
        prefix
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Walks `root` (honouring .gitignore) and keeps the files accepted by `keep`,
/// sorted for a stable order.
fn walk_files(root: &Path, keep: impl Fn(&Path) -> bool) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkBuilder::new(root)
        .git_ignore(true)
        .hidden(false)
        .parents(true)
        .build()
        .filter_map(Result::ok)
        .filter(|dent| dent.file_type().is_some_and(|t| t.is_file()))
        .map(|dent| dent.into_path())
        .filter(|path| keep(path))
        .collect();
    files.sort();
    files
}

fn build_glob(pattern: &str) -> Result<GlobSet, String> {
    let glob = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|e| format!("Invalid glob pattern '{}': {}", pattern, e))?;
    GlobSetBuilder::new()
        .add(glob)
        .build()
        .map_err(|e| format!("Failed to build glob set: {}", e))
}

/// Expands CLI inputs into concrete files, preserving the order of the inputs.
///
/// - plain paths are kept as given (missing files surface later as errors),
/// - directories contribute every `.resx` file below them,
/// - glob patterns are matched against a walk of their static prefix.
///
/// Each input is resolved in parallel; duplicates keep their first position.
pub fn expand_inputs(inputs: &[String]) -> Result<Vec<PathBuf>, String> {
    let expanded: Vec<Vec<PathBuf>> = inputs
        .par_iter()
        .map(|input| {
            if has_glob_meta(input) {
                let set = build_glob(input)?;
                let root = static_root(input);
                Ok(walk_files(&root, |path| {
                    set.is_match(path) || set.is_match(path.strip_prefix("./").unwrap_or(path))
                }))
            } else if Path::new(input).is_dir() {
                Ok(walk_files(Path::new(input), |path| is_resx_file(path)))
            } else {
                Ok(vec![PathBuf::from(input)])
            }
        })
        .collect::<Result<_, String>>()?;

    let mut seen: HashSet<PathBuf> = HashSet::new();
    Ok(expanded
        .into_iter()
        .flatten()
        .filter(|path| seen.insert(path.clone()))
        .collect())
}
