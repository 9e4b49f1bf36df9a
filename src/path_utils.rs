//! Cross-platform path utilities for stagekit

use std::path::Path;

/// Characters that are unsafe in file names
/// Replaced with hyphens and collapsed: `/`, `\`, `:`, `*`, `?`, `"`, `<`, `>`, `|`
const PATH_UNSAFE_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Turn a package or stage name into a file name stem.
///
/// Unsafe characters become hyphens, runs of hyphens collapse, and leading
/// or trailing hyphens are dropped. Returns "unnamed" if nothing is left.
///
/// ```ignore
/// assert_eq!(file_key("org/repo"), "org-repo");
/// assert_eq!(file_key("Ocean Shader"), "Ocean Shader");
/// ```
pub fn file_key(name: &str) -> String {
    let key: String = name
        .chars()
        .map(|c| if PATH_UNSAFE_CHARS.contains(&c) { '-' } else { c })
        .collect();

    let key = key
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
        .trim()
        .to_string();

    if key.is_empty() {
        "unnamed".to_string()
    } else {
        key
    }
}

/// Render a path with forward slashes regardless of platform
pub fn to_forward_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
