//! JWalk-based single-pass tree scanner.

use std::path::Path;
use std::time::{Duration, Instant};

use globset::{Glob, GlobSet, GlobSetBuilder};
use jwalk::{Parallelism, WalkDir};
use tracing::{debug, trace, warn};

use treetally_core::{ScanAccumulator, ScanConfig, ScanError, ScanResult, ScanWarning};

/// Scans a directory tree into a [`ScanResult`].
///
/// Entries are yielded sorted by name, so two scans of an unchanged tree
/// produce identical results regardless of the thread count.
#[derive(Debug, Default)]
pub struct TreeScanner;

impl TreeScanner {
    /// Create a new scanner.
    pub fn new() -> Self {
        Self
    }

    /// Perform a scan described by `config`.
    ///
    /// Fails only when the root itself is unusable. Per-entry failures are
    /// recorded as warnings and the walk continues.
    pub fn scan(&self, config: &ScanConfig) -> Result<ScanResult, ScanError> {
        let start = Instant::now();
        let root_path = config
            .root
            .canonicalize()
            .map_err(|e| ScanError::io(&config.root, e))?;

        if !root_path.is_dir() {
            return Err(ScanError::NotADirectory { path: root_path });
        }
        // Surface an unreadable root before walking.
        std::fs::read_dir(&root_path).map_err(|e| ScanError::io(&root_path, e))?;

        let ignore = build_ignore_set(&config.ignore_patterns)?;

        debug!(root = %root_path.display(), "starting scan");

        let mut acc = ScanAccumulator::new(&root_path);
        self.walk(config, &root_path, ignore, &mut acc);

        let result = acc.finish(start.elapsed());
        debug!(
            files = result.files.len(),
            folders = result.folder_sizes.len(),
            warnings = result.warnings.len(),
            elapsed_ms = result.scan_duration.as_millis() as u64,
            "scan finished"
        );
        Ok(result)
    }

    /// Walk the tree and feed every entry into the accumulator.
    fn walk(
        &self,
        config: &ScanConfig,
        root_path: &Path,
        ignore: Option<GlobSet>,
        acc: &mut ScanAccumulator,
    ) {
        let parallelism = match config.threads {
            0 => Parallelism::RayonDefaultPool {
                busy_timeout: Duration::from_millis(100),
            },
            1 => Parallelism::Serial,
            n => Parallelism::RayonNewPool(n),
        };

        let mut walker = WalkDir::new(root_path)
            .parallelism(parallelism)
            .sort(true)
            .skip_hidden(!config.include_hidden)
            .follow_links(config.follow_symlinks)
            .min_depth(0)
            .max_depth(config.max_depth.map(|d| d as usize).unwrap_or(usize::MAX));

        if let Some(ignore) = ignore {
            // Dropping ignored children here also keeps ignored directories
            // from being descended.
            walker = walker.process_read_dir(move |_depth, _path, _state, children| {
                children.retain(|child| match child {
                    Ok(entry) => !ignore.is_match(Path::new(entry.file_name())),
                    Err(_) => true,
                });
            });
        }

        for entry_result in walker {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    let path = err.path().map(|p| p.to_path_buf()).unwrap_or_default();
                    record_warning(acc, ScanWarning::read_error(path, &err));
                    continue;
                }
            };

            let path = entry.path();
            let file_type = entry.file_type();

            if let Some(err) = &entry.read_children_error {
                record_warning(acc, ScanWarning::read_error(&path, err));
            }

            if file_type.is_dir() {
                if entry.depth() > 0 {
                    acc.record_subfolder();
                }
                // Directories at the depth limit are never read, so their
                // direct size is unknown.
                if config.max_depth.is_none_or(|max| entry.depth() < max as usize) {
                    acc.enter_directory(&path);
                }
            } else if file_type.is_file() {
                let size = match entry.metadata() {
                    Ok(metadata) => metadata.len(),
                    Err(err) => {
                        record_warning(acc, ScanWarning::metadata_error(&path, &err));
                        continue;
                    }
                };

                trace!(path = %path.display(), size, "file");
                acc.record_file(entry.parent_path(), path, size);

                if acc.file_count() % 1000 == 0 {
                    debug!(files = acc.file_count(), "scan progress");
                }
            } else {
                trace!(path = %path.display(), "skipping non-regular entry");
            }
        }
    }
}

/// Scan `root` with default settings.
pub fn scan(root: impl AsRef<Path>) -> Result<ScanResult, ScanError> {
    TreeScanner::new().scan(&ScanConfig::new(root.as_ref()))
}

fn record_warning(acc: &mut ScanAccumulator, warning: ScanWarning) {
    warn!(path = %warning.path.display(), "{}", warning.message);
    acc.record_warning(warning);
}

fn build_ignore_set(patterns: &[String]) -> Result<Option<GlobSet>, ScanError> {
    if patterns.is_empty() {
        return Ok(None);
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| ScanError::InvalidConfig {
            message: format!("invalid ignore pattern '{pattern}': {e}"),
        })?;
        builder.add(glob);
    }
    let set = builder.build().map_err(|e| ScanError::InvalidConfig {
        message: e.to_string(),
    })?;
    Ok(Some(set))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn create_test_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir(root.join("dir1")).unwrap();
        fs::create_dir(root.join("dir2")).unwrap();
        fs::create_dir(root.join("dir1/subdir")).unwrap();

        fs::write(root.join("file1.txt"), "hello").unwrap();
        fs::write(root.join("dir1/file2.txt"), "world world world").unwrap();
        fs::write(root.join("dir1/subdir/file3.md"), "test").unwrap();
        fs::write(root.join("dir2/file4"), "another file here").unwrap();

        temp
    }

    #[test]
    fn test_basic_scan() {
        let temp = create_test_tree();
        let result = scan(temp.path()).unwrap();

        assert_eq!(result.files.len(), 4);
        assert_eq!(result.subfolder_count, 3);
        // root + dir1 + dir2 + subdir
        assert_eq!(result.folder_sizes.len(), 4);
        assert_eq!(result.type_counts[".txt"], 2);
        assert_eq!(result.type_counts[".md"], 1);
        assert_eq!(result.type_counts[""], 1);
    }

    #[test]
    fn test_folder_sizes_count_direct_files_only() {
        let temp = create_test_tree();
        let result = scan(temp.path()).unwrap();
        let root = temp.path().canonicalize().unwrap();

        assert_eq!(result.folder_sizes[root.as_path()], 5);
        assert_eq!(result.folder_sizes[root.join("dir1").as_path()], 17);
        assert_eq!(result.folder_sizes[root.join("dir1/subdir").as_path()], 4);
        assert_eq!(result.folder_sizes[root.join("dir2").as_path()], 17);
    }

    #[test]
    fn test_paths_are_absolute() {
        let temp = create_test_tree();
        let result = scan(temp.path()).unwrap();

        assert!(result.files.iter().all(|f| f.path.is_absolute()));
        assert_eq!(result.root_path, temp.path().canonicalize().unwrap());
    }

    #[test]
    fn test_ignore_patterns() {
        let temp = create_test_tree();
        let config = ScanConfig::builder()
            .root(temp.path())
            .ignore_patterns(vec!["dir2".to_string(), "*.md".to_string()])
            .build()
            .unwrap();

        let result = TreeScanner::new().scan(&config).unwrap();
        let names: Vec<PathBuf> = result.files.iter().map(|f| f.path.clone()).collect();

        assert_eq!(result.files.len(), 2);
        assert!(!names.iter().any(|p| p.ends_with("dir2/file4")));
        assert!(!result.type_counts.contains_key(".md"));
        assert_eq!(result.subfolder_count, 2);
    }

    #[test]
    fn test_invalid_ignore_pattern() {
        let temp = create_test_tree();
        let config = ScanConfig::builder()
            .root(temp.path())
            .ignore_patterns(vec!["[".to_string()])
            .build()
            .unwrap();

        let err = TreeScanner::new().scan(&config).unwrap_err();
        assert!(matches!(err, ScanError::InvalidConfig { .. }));
    }

    #[test]
    fn test_hidden_files_excluded_when_requested() {
        let temp = create_test_tree();
        fs::write(temp.path().join(".hidden"), "secret").unwrap();

        let with_hidden = scan(temp.path()).unwrap();
        assert_eq!(with_hidden.files.len(), 5);

        let config = ScanConfig::builder()
            .root(temp.path())
            .include_hidden(false)
            .build()
            .unwrap();
        let without_hidden = TreeScanner::new().scan(&config).unwrap();
        assert_eq!(without_hidden.files.len(), 4);
    }

    #[test]
    fn test_max_depth() {
        let temp = create_test_tree();
        let config = ScanConfig::builder()
            .root(temp.path())
            .max_depth(Some(1u32))
            .build()
            .unwrap();

        let result = TreeScanner::new().scan(&config).unwrap();
        assert_eq!(result.files.len(), 1);
        assert_eq!(result.subfolder_count, 2);
    }

    #[test]
    fn test_max_depth_leaves_unread_folders_out_of_sizes() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("d")).unwrap();
        fs::write(temp.path().join("d/big.bin"), vec![0u8; 5000]).unwrap();
        let root = temp.path().canonicalize().unwrap();

        let config = ScanConfig::builder()
            .root(temp.path())
            .max_depth(Some(1u32))
            .build()
            .unwrap();
        let result = TreeScanner::new().scan(&config).unwrap();

        assert!(result.files.is_empty());
        assert_eq!(result.subfolder_count, 1);
        assert_eq!(result.folder_sizes.len(), 1);
        assert_eq!(result.folder_sizes[root.as_path()], 0);
        assert!(!result.folder_sizes.contains_key(root.join("d").as_path()));
    }

    #[test]
    fn test_missing_root() {
        let temp = TempDir::new().unwrap();
        let err = scan(temp.path().join("nope")).unwrap_err();
        assert!(matches!(err, ScanError::NotFound { .. }));
        assert!(err.is_path_error());
    }

    #[test]
    fn test_root_is_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("plain.txt");
        fs::write(&file, "x").unwrap();

        let err = scan(&file).unwrap_err();
        assert!(matches!(err, ScanError::NotADirectory { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_not_followed_by_default() {
        let temp = create_test_tree();
        std::os::unix::fs::symlink(
            temp.path().join("file1.txt"),
            temp.path().join("link.txt"),
        )
        .unwrap();
        std::os::unix::fs::symlink(temp.path().join("dir1"), temp.path().join("dirlink"))
            .unwrap();

        let result = scan(temp.path()).unwrap();
        assert_eq!(result.files.len(), 4);
        assert_eq!(result.subfolder_count, 3);
    }
}
