//! Header searching within a source tree.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Find a header anywhere below `source_root`.
///
/// A header name may carry directories (`bits/c++config`); an entry matches
/// when its trailing path components equal the name's, so `bits/c++config`
/// matches `include/bits/c++config` but not `include/c++config`.
/// Directories never match.
///
/// The tree is walked in file-name order and the first match wins, so the
/// same tree always yields the same location.
///
/// Returns `None` if nothing matches.
#[must_use = "found header path should be used"]
pub fn find_header(source_root: &Path, header: &str) -> Option<PathBuf> {
    let wanted = Path::new(header);

    WalkDir::new(source_root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.into_path())
        .find(|path| {
            path.strip_prefix(source_root)
                .is_ok_and(|rel| rel.ends_with(wanted))
                && !path.is_dir()
        })
}
