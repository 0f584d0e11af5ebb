//! Freestanding C++ header extraction.
//!
//! Locates the freestanding subset of the C++ standard library headers inside a
//! libstdc++ source tree, follows their `#include <...>` directives to a fixed
//! point and installs the result under `<prefix>/include/c++`.

mod error;
mod install;
mod paths;
mod resolve;
mod scan;
mod tables;

use anyhow::Result;
use std::path::Path;

pub use error::ResolveError;
pub use install::{install_headers, patch_config_bytes, patch_config_header};
pub use paths::find_header;
pub use resolve::{resolve, HeaderResolver, ResolutionSet, ResolvedHeader};
pub use scan::{get_include_dependencies, parse_includes};
pub use tables::{CONFIG_HEADER, HEADER_ALIASES, INSTALL_SUBDIR, PROVIDED_HEADERS, SEED_HEADERS};

/// Resolve the freestanding header set under `source_root` and install it into `prefix`.
///
/// Returns the number of headers installed.
pub fn resolve_and_install(prefix: &Path, source_root: &Path) -> Result<usize> {
    let headers = resolve(source_root, SEED_HEADERS)?;
    install_headers(&headers, prefix)?;
    Ok(headers.len())
}
