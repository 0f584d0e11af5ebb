//! Resolution errors.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    /// No file under the source root matched the header name.
    #[error("Couldn't find any instance of {header} under {}", .source_root.display())]
    HeaderNotFound {
        header: String,
        source_root: PathBuf,
    },

    /// A matched header could not be read for include scanning.
    #[error("Failed to read header {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
