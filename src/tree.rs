//! Directory tree listing.
//!
//! One line per file below a root: relative path, size in bytes and last
//! write time in local time, e.g. `Templates/awards.pptx 48213 3/5/2024 2:07 PM`.

use crate::error::Result;
use chrono::{DateTime, Local};
use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use walkdir::WalkDir;

/// Short general date/time pattern: `M/D/YYYY h:mm AM|PM`.
pub const TIME_FORMAT: &str = "%-m/%-d/%Y %-I:%M %p";

/// A file found below the listing root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// Path relative to the root, `/`-separated
    pub relative_path: String,

    pub size: u64,

    pub modified: DateTime<Local>,
}

impl fmt::Display for TreeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.relative_path,
            self.size,
            self.modified.format(TIME_FORMAT)
        )
    }
}

/// Every regular file below `root`, sorted by relative path.
///
/// Symbolic links are not followed.
pub fn list_tree(root: &Path) -> Result<Vec<TreeEntry>> {
    let mut entries = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }

        let metadata = entry.metadata().map_err(io::Error::from)?;
        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let relative_path = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        entries.push(TreeEntry {
            relative_path,
            size: metadata.len(),
            modified: DateTime::<Local>::from(metadata.modified()?),
        });
    }

    entries.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    Ok(entries)
}

/// Write the listing of `root`, one line per file. Returns the file count.
pub fn write_tree<W: Write>(root: &Path, mut out: W) -> Result<usize> {
    let entries = list_tree(root)?;
    for entry in &entries {
        writeln!(out, "{}", entry)?;
    }
    out.flush()?;
    Ok(entries.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_entry_line_format() {
        let entry = TreeEntry {
            relative_path: "Templates/awards.pptx".to_string(),
            size: 48213,
            modified: Local.with_ymd_and_hms(2024, 3, 5, 14, 7, 0).single().unwrap(),
        };
        assert_eq!(entry.to_string(), "Templates/awards.pptx 48213 3/5/2024 2:07 PM");

        let morning = TreeEntry {
            modified: Local.with_ymd_and_hms(2023, 11, 20, 0, 30, 0).single().unwrap(),
            ..entry
        };
        assert!(morning.to_string().ends_with("11/20/2023 12:30 AM"));
    }

    #[test]
    fn test_list_tree_recurses_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("Templates/old")).unwrap();
        std::fs::write(dir.path().join("b.txt"), b"12345").unwrap();
        std::fs::write(dir.path().join("Templates/awards.pptx"), b"x").unwrap();
        std::fs::write(dir.path().join("Templates/old/a.pptx"), b"").unwrap();

        let entries = list_tree(dir.path()).unwrap();
        let paths: Vec<&str> = entries.iter().map(|e| e.relative_path.as_str()).collect();
        assert_eq!(paths, ["Templates/awards.pptx", "Templates/old/a.pptx", "b.txt"]);
        assert_eq!(entries[2].size, 5);

        let mut out = Vec::new();
        assert_eq!(write_tree(dir.path(), &mut out).unwrap(), 3);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.lines().next().unwrap().starts_with("Templates/awards.pptx 1 "));
    }

    #[test]
    fn test_missing_root() {
        assert!(list_tree(Path::new("/definitely/not/here")).is_err());
    }
}
