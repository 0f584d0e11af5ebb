//! Include-directive scanning.

use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use crate::error::ResolveError;

static INCLUDE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*#\s*include\s*<([^>]+)>").unwrap());

/// Read a header and return the headers it includes with angle brackets.
///
/// # Errors
///
/// Returns [`ResolveError::Read`] if the file cannot be read.
#[must_use = "include dependencies should be processed"]
pub fn get_include_dependencies(header_path: &Path) -> Result<Vec<String>, ResolveError> {
    let bytes = fs::read(header_path).map_err(|source| ResolveError::Read {
        path: header_path.to_path_buf(),
        source,
    })?;

    // libstdc++ sources are ASCII, but don't reject a stray Latin-1 comment
    let text = String::from_utf8_lossy(&bytes);
    Ok(parse_includes(&text))
}

/// Extract `#include <...>` targets from header text.
///
/// Dependencies are returned in first-seen order without duplicates. Quoted
/// includes (`#include "foo.h"`) are not dependencies here.
///
/// ```text
///   #include <bits/c++config.h>      -> bits/c++config.h
/// #  include <stddef.h>              -> stddef.h
/// #include "local.h"                 -> (ignored)
/// ```
pub fn parse_includes(text: &str) -> Vec<String> {
    let mut depends: Vec<String> = Vec::new();

    for line in text.lines() {
        if let Some(caps) = INCLUDE_RE.captures(line) {
            let name = caps[1].trim();
            if !name.is_empty() && !depends.iter().any(|d| d == name) {
                depends.push(name.to_string());
            }
        }
    }

    depends
}
