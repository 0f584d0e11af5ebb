//! Fixed header tables.

/// Headers available in a C++ freestanding environment.
///
/// `thread`, `exception` and `typeinfo` need RTTI, `new` needs exception
/// support, so none of them are included.
pub const SEED_HEADERS: &[&str] = &[
    "cstddef",
    "limits",
    "cstdlib",
    "initializer_list",
    "cstdarg",
    "type_traits",
    "atomic",
];

/// Headers supplied by the freestanding C environment.
pub const PROVIDED_HEADERS: &[&str] = &["stdint.h", "stddef.h", "stdarg.h", "stdbool.h"];

/// Headers whose location in the source tree differs from the installed name.
pub const HEADER_ALIASES: &[(&str, &str)] = &[
    ("bits/c++config.h", "bits/c++config"),
    ("bits/os_defines.h", "generic/os_defines.h"),
    ("bits/cpu_defines.h", "generic/cpu_defines.h"),
    (
        "bits/atomic_lockfree_defines.h",
        "libsupc++/atomic_lockfree_defines.h",
    ),
];

/// Generated configuration header; patched during install since libstdc++ was
/// never configured for the target.
pub const CONFIG_HEADER: &str = "bits/c++config.h";

/// Install location relative to the prefix.
pub const INSTALL_SUBDIR: &str = "include/c++";
