//! Fixed-point header resolution.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::ResolveError;
use crate::paths::find_header;
use crate::scan::get_include_dependencies;
use crate::tables::{HEADER_ALIASES, PROVIDED_HEADERS};

/// Requested header name -> location in the source tree.
pub type ResolutionSet = BTreeMap<String, PathBuf>;

/// A header located in the source tree, with its direct angle-bracket includes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedHeader {
    pub location: PathBuf,
    pub depends: Vec<String>,
}

/// Resolves header names against a source tree using an alias table and a set
/// of headers that are provided externally.
#[derive(Debug, Clone)]
pub struct HeaderResolver<'a> {
    aliases: &'a [(&'a str, &'a str)],
    provided: &'a [&'a str],
}

impl Default for HeaderResolver<'static> {
    fn default() -> Self {
        Self::new(HEADER_ALIASES, PROVIDED_HEADERS)
    }
}

impl<'a> HeaderResolver<'a> {
    pub fn new(aliases: &'a [(&'a str, &'a str)], provided: &'a [&'a str]) -> Self {
        Self { aliases, provided }
    }

    fn alias_for(&self, header: &str) -> Option<&'a str> {
        self.aliases
            .iter()
            .find(|(name, _)| *name == header)
            .map(|(_, alias)| *alias)
    }

    fn is_provided(&self, header: &str) -> bool {
        self.provided.iter().any(|p| *p == header)
    }

    /// Locate one header and read its includes.
    ///
    /// The alias table is applied before searching.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::HeaderNotFound`] naming the searched name if no
    /// file matches, or [`ResolveError::Read`] if the match can't be read.
    pub fn search_header(
        &self,
        source_root: &Path,
        header: &str,
    ) -> Result<ResolvedHeader, ResolveError> {
        let search_name = match self.alias_for(header) {
            Some(alias) => {
                info!("subst {} => {}", alias, header);
                alias
            }
            None => header,
        };

        let location =
            find_header(source_root, search_name).ok_or_else(|| ResolveError::HeaderNotFound {
                header: search_name.to_string(),
                source_root: source_root.to_path_buf(),
            })?;

        let depends = get_include_dependencies(&location)?;

        info!(
            "Found instance of {} ({})",
            search_name,
            location.parent().unwrap_or(source_root).display()
        );
        for dep in &depends {
            debug!("{} depends on {}", header, dep);
        }

        Ok(ResolvedHeader { location, depends })
    }

    /// Resolve `seeds` and everything they transitively include.
    ///
    /// Works frontier by frontier: every header in the current frontier is
    /// searched, and the next frontier is made of its dependencies that are
    /// neither provided nor already resolved. Seeds themselves are always
    /// searched, even when they appear in the provided set. Include cycles end
    /// because resolved headers never re-enter a frontier.
    ///
    /// # Errors
    ///
    /// Fails on the first header that can't be found or read.
    pub fn resolve(&self, source_root: &Path, seeds: &[&str]) -> Result<ResolutionSet, ResolveError> {
        let mut located = ResolutionSet::new();
        let mut required: Vec<String> = seeds.iter().map(|s| s.to_string()).collect();

        while !required.is_empty() {
            let mut discovered = Vec::new();

            for header in required {
                let resolved = self.search_header(source_root, &header)?;
                located.insert(header, resolved.location);
                discovered.extend(resolved.depends);
            }

            required = discovered
                .into_iter()
                .filter(|dep| !self.is_provided(dep) && !located.contains_key(dep))
                .collect();
        }

        Ok(located)
    }
}

/// Resolve `seeds` under `source_root` with the built-in alias and provided tables.
pub fn resolve(source_root: &Path, seeds: &[&str]) -> Result<ResolutionSet, ResolveError> {
    HeaderResolver::default().resolve(source_root, seeds)
}
