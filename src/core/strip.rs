//! Version-pin stripper — remove `@x.y.z` suffixes from import specifiers.
//!
//! Bundled UI component exports tend to arrive with version-pinned imports
//! (`import { X } from "pkg@1.2.3"`). This engine:
//! 1. Lists the immediate children of a target directory (non-recursive)
//! 2. Selects entries whose filename ends with the candidate extension
//! 3. Rewrites each selected file in place with every pin removed
//! 4. Notifies per file and returns an aggregate report
//!
//! The pass is fail-fast: the first I/O error aborts the run, leaving
//! already-rewritten files rewritten and later files untouched.

use crate::error::{Error, Result};
use crate::utils::io;
use regex::Regex;
use serde::Serialize;
use std::path::{Path, PathBuf};

// ============================================================================
// Types
// ============================================================================

/// Matches an `@` followed by a three-part dotted numeric version.
///
/// Pre-release and build-metadata tails are not part of the match, so
/// `pkg@1.2.3-beta` becomes `pkg-beta`. The pattern must stay exactly this
/// narrow; downstream cleanups depend on which suffixes it touches.
pub const VERSION_SUFFIX_PATTERN: &str = r"@\d+\.\d+\.\d+";

/// A processed candidate file.
#[derive(Debug, Clone, Serialize)]
pub struct FileFix {
    /// Filename (not the full path).
    pub file: String,
    /// Number of pins removed. Zero still counts as processed.
    pub replacements: usize,
}

/// The full result of a strip run.
#[derive(Debug, Clone, Serialize)]
pub struct StripReport {
    /// Per-file outcomes, in visitation order.
    pub fixes: Vec<FileFix>,
    /// Total candidate files processed.
    pub total_files: usize,
    /// Total pins removed across all files.
    pub total_replacements: usize,
    /// Whether changes were written to disk.
    pub applied: bool,
}

/// Compile the pin pattern. The pattern is a known-good literal.
pub fn version_suffix_regex() -> Regex {
    Regex::new(VERSION_SUFFIX_PATTERN).unwrap()
}

// ============================================================================
// Candidate selection
// ============================================================================

/// List the immediate children of `dir` whose filename ends with `extension`.
///
/// Non-recursive and unsorted; the order is whatever the directory listing
/// yields. Entries are selected on name alone, so a directory named `x.tsx`
/// is selected and will surface as a read error downstream.
pub fn candidate_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| Error::internal_io(e.to_string(), Some(format!("list {}", dir.display()))))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("list {}", dir.display())))
        })?;
        let name = entry.file_name().to_string_lossy().to_string();
        if name.ends_with(extension) {
            files.push(entry.path());
        }
    }

    Ok(files)
}

// ============================================================================
// Content transform
// ============================================================================

/// Remove every pin from `content`. Returns the new content and the number
/// of non-overlapping matches removed.
pub fn strip_pins(re: &Regex, content: &str) -> (String, usize) {
    let count = re.find_iter(content).count();
    if count == 0 {
        return (content.to_string(), 0);
    }
    (re.replace_all(content, "").into_owned(), count)
}

/// Read `path`, strip pins, and write the result back to the same path.
///
/// A file with zero matches is still rewritten with identical content.
/// The write truncates in place: no staging file, no atomicity.
pub fn strip_file(re: &Regex, path: &Path) -> Result<usize> {
    let content = io::read_file(path, &format!("read {}", path.display()))?;
    let (stripped, count) = strip_pins(re, &content);
    io::write_file(path, &stripped, &format!("write {}", path.display()))?;
    Ok(count)
}

/// Read `path` and count pins without writing anything.
pub fn count_pins(re: &Regex, path: &Path) -> Result<usize> {
    let content = io::read_file(path, &format!("read {}", path.display()))?;
    Ok(re.find_iter(&content).count())
}

// ============================================================================
// Directory pass
// ============================================================================

/// Run the full strip pass over `dir`.
///
/// Every entry whose name ends with `extension` is read, transformed, and
/// (when `apply` is true) written back in place. `notify` fires once per
/// candidate immediately after that file completes and before the next one
/// starts, so callers streaming progress see each file as it lands.
pub fn strip_directory(
    dir: &Path,
    extension: &str,
    apply: bool,
    mut notify: impl FnMut(&FileFix),
) -> Result<StripReport> {
    let re = version_suffix_regex();
    let files = candidate_files(dir, extension)?;

    log_status!(
        "strip",
        "Scanning {} ({} candidate files)",
        dir.display(),
        files.len()
    );

    let mut fixes = Vec::new();
    let mut total_replacements = 0;

    for path in &files {
        let replacements = if apply {
            strip_file(&re, path)?
        } else {
            count_pins(&re, path)?
        };

        let fix = FileFix {
            file: path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            replacements,
        };

        total_replacements += replacements;
        notify(&fix);
        fixes.push(fix);
    }

    Ok(StripReport {
        total_files: fixes.len(),
        total_replacements,
        fixes,
        applied: apply,
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn strip_pins_removes_single_pin() {
        let re = version_suffix_regex();
        let (out, count) = strip_pins(&re, "import x from \"pkg@1.2.3\"");
        assert_eq!(out, "import x from \"pkg\"");
        assert_eq!(count, 1);
    }

    #[test]
    fn strip_pins_removes_all_occurrences() {
        let re = version_suffix_regex();
        let input = "import a from \"x@1.0.0\";\nimport b from \"y@2.10.3\";\nimport c from \"x@1.0.0\";\n";
        let (out, count) = strip_pins(&re, input);
        assert_eq!(out, "import a from \"x\";\nimport b from \"y\";\nimport c from \"x\";\n");
        assert_eq!(count, 3);
    }

    #[test]
    fn strip_pins_handles_multi_digit_components() {
        let re = version_suffix_regex();
        let (out, count) = strip_pins(&re, "\"radix@12.340.5\"");
        assert_eq!(out, "\"radix\"");
        assert_eq!(count, 1);
    }

    #[test]
    fn strip_pins_leaves_prerelease_tail() {
        // Only the numeric triple is matched; the tail stays behind.
        let re = version_suffix_regex();
        let (out, count) = strip_pins(&re, "\"pkg@1.2.3-beta.1\"");
        assert_eq!(out, "\"pkg-beta.1\"");
        assert_eq!(count, 1);
    }

    #[test]
    fn strip_pins_leaves_fourth_component() {
        let re = version_suffix_regex();
        let (out, _) = strip_pins(&re, "\"pkg@1.2.3.4\"");
        assert_eq!(out, "\"pkg.4\"");
    }

    #[test]
    fn strip_pins_ignores_two_part_versions() {
        let re = version_suffix_regex();
        let input = "\"pkg@1.2\" and @scope/name";
        let (out, count) = strip_pins(&re, input);
        assert_eq!(out, input);
        assert_eq!(count, 0);
    }

    #[test]
    fn strip_pins_empty_content() {
        let re = version_suffix_regex();
        let (out, count) = strip_pins(&re, "");
        assert_eq!(out, "");
        assert_eq!(count, 0);
    }

    #[test]
    fn candidate_files_filters_by_name_suffix() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("button.tsx"), "").unwrap();
        std::fs::write(dir.path().join("card.test.tsx"), "").unwrap();
        std::fs::write(dir.path().join("readme.md"), "").unwrap();
        std::fs::write(dir.path().join("notatsx"), "").unwrap();

        let mut names: Vec<String> = candidate_files(dir.path(), ".tsx")
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        names.sort();

        assert_eq!(names, vec!["button.tsx", "card.test.tsx"]);
    }

    #[test]
    fn candidate_files_missing_dir_fails() {
        let err = candidate_files(Path::new("/nonexistent/ui"), ".tsx").unwrap_err();
        assert_eq!(err.code.as_str(), "internal.io_error");
    }

    #[test]
    fn strip_file_rewrites_in_place() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("button.tsx");
        std::fs::write(&path, "import x from \"pkg@1.2.3\"").unwrap();

        let re = version_suffix_regex();
        let count = strip_file(&re, &path).unwrap();

        assert_eq!(count, 1);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "import x from \"pkg\""
        );
    }

    #[test]
    fn strip_directory_touches_only_candidates() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("button.tsx"),
            "import x from \"pkg@1.2.3\"",
        )
        .unwrap();
        std::fs::write(dir.path().join("readme.md"), "pkg@1.2.3").unwrap();

        let report = strip_directory(dir.path(), ".tsx", true, |_| {}).unwrap();

        assert_eq!(report.total_files, 1);
        assert_eq!(report.total_replacements, 1);
        assert!(report.applied);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("button.tsx")).unwrap(),
            "import x from \"pkg\""
        );
        // Non-candidate untouched, pin and all
        assert_eq!(
            std::fs::read_to_string(dir.path().join("readme.md")).unwrap(),
            "pkg@1.2.3"
        );
    }

    #[test]
    fn strip_directory_notifies_every_candidate() {
        // Zero matches still counts as processed and notified.
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.tsx"), "import a from \"x@1.0.0\"").unwrap();
        std::fs::write(dir.path().join("empty.tsx"), "").unwrap();
        std::fs::write(dir.path().join("clean.tsx"), "import c from \"y\"").unwrap();

        let mut notified = Vec::new();
        let report = strip_directory(dir.path(), ".tsx", true, |fix| {
            notified.push(fix.file.clone());
        })
        .unwrap();

        assert_eq!(notified.len(), 3);
        assert_eq!(report.total_files, 3);
        assert!(notified.contains(&"empty.tsx".to_string()));
        assert_eq!(std::fs::read_to_string(dir.path().join("empty.tsx")).unwrap(), "");
    }

    #[test]
    fn strip_directory_empty_dir_reports_zero() {
        let dir = tempdir().unwrap();

        let mut notified = 0;
        let report = strip_directory(dir.path(), ".tsx", true, |_| notified += 1).unwrap();

        assert_eq!(notified, 0);
        assert_eq!(report.total_files, 0);
        assert_eq!(report.total_replacements, 0);
    }

    #[test]
    fn strip_directory_is_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("card.tsx");
        std::fs::write(&path, "import a from \"x@1.0.0\";\nimport b from \"y\";\n").unwrap();

        strip_directory(dir.path(), ".tsx", true, |_| {}).unwrap();
        let first = std::fs::read_to_string(&path).unwrap();

        let report = strip_directory(dir.path(), ".tsx", true, |_| {}).unwrap();
        let second = std::fs::read_to_string(&path).unwrap();

        assert_eq!(first, second);
        assert_eq!(report.total_replacements, 0);
        assert_eq!(report.total_files, 1);
    }

    #[test]
    fn strip_directory_dry_run_writes_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("button.tsx");
        let original = "import x from \"pkg@1.2.3\"";
        std::fs::write(&path, original).unwrap();

        let report = strip_directory(dir.path(), ".tsx", false, |_| {}).unwrap();

        assert!(!report.applied);
        assert_eq!(report.total_replacements, 1);
        assert_eq!(report.fixes[0].replacements, 1);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn strip_directory_missing_dir_fails_before_processing() {
        let mut notified = 0;
        let err = strip_directory(Path::new("/nonexistent/ui"), ".tsx", true, |_| notified += 1)
            .unwrap_err();

        assert_eq!(err.code.as_str(), "internal.io_error");
        assert_eq!(notified, 0);
    }
}
