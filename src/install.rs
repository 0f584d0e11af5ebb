//! Header installation.

use anyhow::{Context, Result};
use regex::bytes::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, info};

use crate::resolve::ResolutionSet;
use crate::tables::{CONFIG_HEADER, INSTALL_SUBDIR};

// Byte patterns: the line may hold non-UTF-8 text, and the terminator
// (LF or CRLF) is left alone.
static VISIBILITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m-u)^[ \t]*#[ \t]*define[ \t]+_GLIBCXX_HAVE_ATTRIBUTE_VISIBILITY\b[^\r\n]*")
        .unwrap()
});
static INLINE_VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m-u)^[ \t]*#[ \t]*define[ \t]+_GLIBCXX_INLINE_VERSION\b[^\r\n]*").unwrap()
});

/// Patch the raw contents of the generated `bits/c++config.h`.
///
/// Forces `_GLIBCXX_HAVE_ATTRIBUTE_VISIBILITY` to 1 and
/// `_GLIBCXX_INLINE_VERSION` to 0. Whole lines are replaced, so patching an
/// already patched header changes nothing.
pub fn patch_config_bytes(data: &[u8]) -> Vec<u8> {
    let data = VISIBILITY_RE.replace_all(data, &b"# define _GLIBCXX_HAVE_ATTRIBUTE_VISIBILITY 1"[..]);
    INLINE_VERSION_RE
        .replace_all(&data, &b"# define _GLIBCXX_INLINE_VERSION 0"[..])
        .into_owned()
}

/// Text form of [`patch_config_bytes`].
pub fn patch_config_header(text: &str) -> String {
    // Replacements are ASCII and only whole lines are swapped, so valid UTF-8 stays valid
    String::from_utf8_lossy(&patch_config_bytes(text.as_bytes())).into_owned()
}

/// Install resolved headers into `<prefix>/include/c++`.
///
/// Every header is copied verbatim except the configuration header, which is
/// written through [`patch_config_bytes`]. Existing files are overwritten.
/// The first failure aborts the install; files already written stay in place.
pub fn install_headers(headers: &ResolutionSet, prefix: &Path) -> Result<()> {
    let install_root = prefix.join(INSTALL_SUBDIR);

    info!("Installing C++ freestanding headers to {}", install_root.display());
    fs::create_dir_all(&install_root)
        .with_context(|| format!("Failed to create {}", install_root.display()))?;

    for (dest, src) in headers {
        let install_path = install_root.join(dest);

        if let Some(parent) = install_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        if dest == CONFIG_HEADER {
            let data =
                fs::read(src).with_context(|| format!("Failed to read {}", src.display()))?;
            fs::write(&install_path, patch_config_bytes(&data))
                .with_context(|| format!("Failed to write {}", install_path.display()))?;
            debug!("patched {} -> {}", src.display(), install_path.display());
        } else {
            fs::copy(src, &install_path).with_context(|| {
                format!(
                    "Failed to copy {} to {}",
                    src.display(),
                    install_path.display()
                )
            })?;
            debug!("copied {} -> {}", src.display(), install_path.display());
        }
    }

    info!("Installed {} headers", headers.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const CONFIG: &str = "\
#ifndef _GLIBCXX_CXX_CONFIG_H
#define _GLIBCXX_CXX_CONFIG_H 1
/* #undef _GLIBCXX_HAVE_ATTRIBUTE_VISIBILITY */
#define _GLIBCXX_HAVE_ATTRIBUTE_VISIBILITY 0
#if _GLIBCXX_HAVE_ATTRIBUTE_VISIBILITY
#endif
# define _GLIBCXX_INLINE_VERSION 1
#endif
";

    #[test]
    fn test_patch_config_header() {
        let patched = patch_config_header(CONFIG);
        assert_eq!(
            patched,
            "\
#ifndef _GLIBCXX_CXX_CONFIG_H
#define _GLIBCXX_CXX_CONFIG_H 1
/* #undef _GLIBCXX_HAVE_ATTRIBUTE_VISIBILITY */
# define _GLIBCXX_HAVE_ATTRIBUTE_VISIBILITY 1
#if _GLIBCXX_HAVE_ATTRIBUTE_VISIBILITY
#endif
# define _GLIBCXX_INLINE_VERSION 0
#endif
"
        );
    }

    #[test]
    fn test_patch_config_header_idempotent() {
        let once = patch_config_header(CONFIG);
        assert_eq!(patch_config_header(&once), once);
    }

    #[test]
    fn test_patch_config_header_leaves_similar_macros() {
        let text = "#define _GLIBCXX_INLINE_VERSION_EXTRA 3\n";
        assert_eq!(patch_config_header(text), text);
    }

    #[test]
    fn test_patch_config_header_keeps_crlf() {
        let text = "#define _GLIBCXX_HAVE_ATTRIBUTE_VISIBILITY 0\r\n#define X 1\r\n#define _GLIBCXX_INLINE_VERSION 1\r\n";
        assert_eq!(
            patch_config_header(text),
            "# define _GLIBCXX_HAVE_ATTRIBUTE_VISIBILITY 1\r\n#define X 1\r\n# define _GLIBCXX_INLINE_VERSION 0\r\n"
        );
    }

    #[test]
    fn test_patch_config_bytes_non_utf8() {
        let data = b"/* caf\xe9 */\n#define _GLIBCXX_HAVE_ATTRIBUTE_VISIBILITY 0 /* \xff */\n";
        assert_eq!(
            patch_config_bytes(data),
            b"/* caf\xe9 */\n# define _GLIBCXX_HAVE_ATTRIBUTE_VISIBILITY 1\n".to_vec()
        );
    }

    #[test]
    fn test_install_headers() {
        let temp = TempDir::new().unwrap();
        let src_root = temp.path().join("src");
        let prefix = temp.path().join("prefix");
        fs::create_dir_all(src_root.join("bits")).unwrap();

        let limits = src_root.join("limits");
        fs::write(&limits, "#include <bits/c++config.h>\n").unwrap();
        let config = src_root.join("bits/c++config");
        fs::write(&config, CONFIG).unwrap();

        let mut headers = ResolutionSet::new();
        headers.insert("limits".to_string(), limits);
        headers.insert(CONFIG_HEADER.to_string(), config);

        install_headers(&headers, &prefix).unwrap();

        let installed = prefix.join("include/c++");
        assert_eq!(
            fs::read_to_string(installed.join("limits")).unwrap(),
            "#include <bits/c++config.h>\n"
        );
        assert_eq!(
            fs::read_to_string(installed.join("bits/c++config.h")).unwrap(),
            patch_config_header(CONFIG)
        );
    }

    #[test]
    fn test_install_headers_overwrites() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("cstddef");
        fs::write(&src, "new\n").unwrap();
        let prefix = temp.path().join("prefix");
        fs::create_dir_all(prefix.join("include/c++")).unwrap();
        fs::write(prefix.join("include/c++/cstddef"), "old\n").unwrap();

        let mut headers = ResolutionSet::new();
        headers.insert("cstddef".to_string(), src);
        install_headers(&headers, &prefix).unwrap();

        assert_eq!(
            fs::read_to_string(prefix.join("include/c++/cstddef")).unwrap(),
            "new\n"
        );
    }

    #[test]
    fn test_install_headers_missing_source_aborts() {
        let temp = TempDir::new().unwrap();
        let prefix = temp.path().join("prefix");

        let mut headers = ResolutionSet::new();
        headers.insert("atomic".to_string(), PathBuf::from("/nonexistent/atomic"));

        let err = install_headers(&headers, &prefix).unwrap_err();
        assert!(
            err.to_string().contains("Failed to copy"),
            "Expected copy failure, got: {}",
            err
        );
    }

    #[test]
    fn test_install_headers_non_utf8_config() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("c++config");
        fs::write(&src, b"// caf\xe9\n#define _GLIBCXX_INLINE_VERSION 1\n").unwrap();
        let prefix = temp.path().join("prefix");

        let mut headers = ResolutionSet::new();
        headers.insert(CONFIG_HEADER.to_string(), src);
        install_headers(&headers, &prefix).unwrap();

        assert_eq!(
            fs::read(prefix.join("include/c++/bits/c++config.h")).unwrap(),
            b"// caf\xe9\n# define _GLIBCXX_INLINE_VERSION 0\n".to_vec()
        );
    }

    #[test]
    fn test_install_headers_partial_output_kept() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("a");
        fs::write(&src, "a\n").unwrap();
        let prefix = temp.path().join("prefix");

        // "a" sorts before "b", so it is written before the failure
        let mut headers = ResolutionSet::new();
        headers.insert("a".to_string(), src);
        headers.insert("b".to_string(), temp.path().join("missing/b"));

        assert!(install_headers(&headers, &prefix).is_err());
        assert_eq!(
            fs::read_to_string(prefix.join("include/c++/a")).unwrap(),
            "a\n"
        );
        assert!(!prefix.join("include/c++/b").exists());
    }
}
