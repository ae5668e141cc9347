//! Glob pattern utilities
//!
//! This module provides file-name glob matching for chapter discovery

use globset::{GlobBuilder, GlobMatcher};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Compile a shell-style glob that is matched against bare file names
///
/// `*` and `?` never cross a path separator, so `*_Ch*_*.md` only ever
/// selects direct children of the scanned directory.
pub fn compile_file_glob(pattern: &str) -> Result<GlobMatcher, globset::Error> {
    let glob = GlobBuilder::new(pattern).literal_separator(true).build()?;
    Ok(glob.compile_matcher())
}

/// List the regular files directly inside `dir` whose names match,
/// sorted by file name
///
/// Symlinks are kept when they resolve to a regular file.
pub fn matching_files<P: AsRef<Path>>(
    dir: P,
    matcher: &GlobMatcher,
) -> Result<Vec<PathBuf>, walkdir::Error> {
    let mut matching_paths = Vec::new();

    let walker = WalkDir::new(dir.as_ref())
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry?;
        if !matcher.is_match(entry.file_name()) {
            continue;
        }

        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if is_file {
            matching_paths.push(entry.into_path());
        }
    }

    Ok(matching_paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::TempDir;

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_compile_file_glob() -> Result<()> {
        let matcher = compile_file_glob("*_Ch*_*.md")?;
        assert!(matcher.is_match("05_Ch05_Pipeline.md"));
        assert!(matcher.is_match("AA_Ch_x_.md"));
        assert!(!matcher.is_match("05_Pipeline.md"));
        assert!(!matcher.is_match("sub/05_Ch05_Pipeline.md"));

        assert!(compile_file_glob("[unclosed").is_err());
        Ok(())
    }

    #[test]
    fn test_matching_files_sorted_and_flat() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path();

        fs::write(base_path.join("10_Ch10_Lighting.md"), "# ten")?;
        fs::write(base_path.join("02_Ch02_Math.md"), "# two")?;
        fs::write(base_path.join("01_Ch01_Intro.md"), "# one")?;
        fs::write(base_path.join("notes.txt"), "not a chapter")?;
        fs::create_dir(base_path.join("03_Ch03_Dir_.md"))?;
        fs::create_dir(base_path.join("nested"))?;
        fs::write(base_path.join("nested").join("04_Ch04_Hidden.md"), "# four")?;

        let matcher = compile_file_glob("*_Ch*_*.md")?;
        let results = matching_files(base_path, &matcher)?;

        assert_eq!(
            names(&results),
            vec!["01_Ch01_Intro.md", "02_Ch02_Math.md", "10_Ch10_Lighting.md"]
        );
        Ok(())
    }

    #[test]
    fn test_matching_files_missing_dir() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let matcher = compile_file_glob("*.md")?;
        assert!(matching_files(temp_dir.path().join("gone"), &matcher).is_err());
        Ok(())
    }
}
