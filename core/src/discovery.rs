//! Header discovery over a library's source tree.

use crate::config::{GeneratorConfig, TraversalOrder};
use crate::error::{Result, UmbrellaError};
use log::{debug, warn};
use std::{cmp::Ordering, fs, path::Path};
use walkdir::{DirEntry, WalkDir};

/// Collect the base names of every header under `library_root`.
///
/// Each directory contributes its own headers before any of its
/// subdirectories are visited. Directories named in
/// `config.exclude_dirs` are pruned at any depth below the root, hidden
/// files are skipped, and the umbrella header's own name never appears.
/// Names are not deduplicated across directories.
pub fn discover(library_root: &Path, config: &GeneratorConfig) -> Result<Vec<String>> {
    let metadata = fs::metadata(library_root).map_err(|e| UmbrellaError::SourceDirectory {
        path: library_root.to_path_buf(),
        source: e,
    })?;
    if !metadata.is_dir() {
        return Err(UmbrellaError::NotADirectory(library_root.to_path_buf()));
    }

    let suffix = config.header_suffix();
    let umbrella = config.umbrella_file_name();
    let order = config.order;

    let walker = WalkDir::new(library_root)
        .follow_links(false)
        .sort_by(move |a, b| compare_entries(order, a, b))
        .into_iter()
        .filter_entry(|e| {
            let pruned = e.depth() > 0
                && e.file_type().is_dir()
                && e.file_name().to_str().is_some_and(|n| config.is_excluded_dir(n));
            if pruned {
                debug!("discover: pruning {}", e.path().display());
            }
            !pruned
        });

    let mut headers = Vec::new();
    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            warn!(
                "discover: skipping non UTF-8 file name {}",
                entry.path().display()
            );
            continue;
        };

        if is_header(name, &suffix) && name != umbrella {
            debug!("discover: found {}", entry.path().display());
            headers.push(name.to_string());
        }
    }

    debug!(
        "discover: {} header(s) under {}",
        headers.len(),
        library_root.display()
    );
    Ok(headers)
}

fn is_header(name: &str, suffix: &str) -> bool {
    name.ends_with(suffix) && !name.starts_with('.')
}

// Files sort ahead of directories so a directory's own headers are
// emitted before anything found beneath it. The sort is stable, so
// `Filesystem` keeps enumeration order inside each group.
fn compare_entries(order: TraversalOrder, a: &DirEntry, b: &DirEntry) -> Ordering {
    let by_kind = a.file_type().is_dir().cmp(&b.file_type().is_dir());
    match order {
        TraversalOrder::Sorted => by_kind.then_with(|| a.file_name().cmp(b.file_name())),
        TraversalOrder::Filesystem => by_kind,
    }
}
