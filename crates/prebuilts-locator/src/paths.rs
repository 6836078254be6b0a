//! Toolchain path construction.
//!
//! Paths are `/`-separated strings, cleaned lexically. Nothing here touches
//! the filesystem; probing is a separate step (see [`crate::probe`]).
//!
//! Layout under a toolchain root:
//! ```text
//! <base>/<version>/
//!   bin/
//!   include/                      export headers (c++/v1 for libc++)
//!   lib/                          host libraries
//!   lib/clang/<short>/include/    builtin headers
//!   lib/clang/<short>/lib/linux/  runtime libraries (resource dir)
//!   lib/clang/<short>/lib/darwin/
//!   lib/clang/<short>/lib/windows/
//!   musl/lib/<triple>/lib/linux/  musl runtime libraries
//! ```

use prebuilts_targets::Location;

use crate::release::ToolchainRelease;

/// Lexically clean a `/`-separated path.
///
/// Drops `.` components and empty segments, and resolves `..` against a
/// preceding component where one exists. An empty result is `.`.
pub fn clean(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();
    for seg in path.split('/') {
        match seg {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if rooted => {}
                _ => parts.push(".."),
            },
            _ => parts.push(seg),
        }
    }
    let joined = parts.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Join segments with `/` and clean the result. Empty segments are ignored.
pub fn join<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let parts: Vec<String> = segments
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if parts.is_empty() {
        return String::new();
    }
    clean(&parts.join("/"))
}

/// Computes directories of one toolchain release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathBuilder {
    root: String,
    short_version: String,
}

impl PathBuilder {
    /// Paths for `release` installed under `base` (usually `.`).
    pub fn new(base: &str, release: &ToolchainRelease) -> Self {
        Self {
            root: join([base, release.version()]),
            short_version: release.short_version().to_string(),
        }
    }

    /// Toolchain root (`<base>/<version>`).
    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn lib_dir(&self) -> String {
        join([self.root.as_str(), "lib"])
    }

    pub fn include_dir(&self) -> String {
        join([self.root.as_str(), "include"])
    }

    /// `lib/clang/<short>` under the root.
    pub fn clang_lib_dir(&self) -> String {
        join([self.root.as_str(), "lib", "clang", self.short_version.as_str()])
    }

    /// Directory holding the linux runtime libraries.
    pub fn resource_dir(&self) -> String {
        join([self.clang_lib_dir().as_str(), "lib", "linux"])
    }

    pub fn builtin_headers_dir(&self) -> String {
        join([self.clang_lib_dir().as_str(), "include"])
    }

    pub fn musl_dir(&self, triple: &str) -> String {
        join([self.root.as_str(), "musl", "lib", triple, "lib", "linux"])
    }

    pub fn darwin_dir(&self) -> String {
        join([self.clang_lib_dir().as_str(), "lib", "darwin"])
    }

    pub fn windows_dir(&self) -> String {
        join([self.clang_lib_dir().as_str(), "lib", "windows"])
    }

    /// Directory a table row resolves into.
    pub fn location_dir(&self, location: Location) -> String {
        match location {
            Location::ResourceDir => self.resource_dir(),
            Location::ResourceSubdir(dir) => join([self.resource_dir().as_str(), dir]),
            Location::Musl(triple) => self.musl_dir(triple),
            Location::Darwin => self.darwin_dir(),
            Location::Windows => self.windows_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> PathBuilder {
        PathBuilder::new(".", &ToolchainRelease::new("clang-r522817", "18"))
    }

    #[test]
    fn clean_paths() {
        assert_eq!(clean("./clang-r1"), "clang-r1");
        assert_eq!(clean("a//b/./c/"), "a/b/c");
        assert_eq!(clean("a/b/../c"), "a/c");
        assert_eq!(clean("../a/../../b"), "../../b");
        assert_eq!(clean("/../a"), "/a");
        assert_eq!(clean(""), ".");
        assert_eq!(clean("."), ".");
        assert_eq!(clean("/"), "/");
    }

    #[test]
    fn join_ignores_empty_segments() {
        assert_eq!(join(["a", "", "b"]), "a/b");
        assert_eq!(join(["./", "x"]), "x");
        assert_eq!(join(Vec::<&str>::new()), "");
    }

    #[test]
    fn layout() {
        let p = builder();
        assert_eq!(p.root(), "clang-r522817");
        assert_eq!(p.lib_dir(), "clang-r522817/lib");
        assert_eq!(p.include_dir(), "clang-r522817/include");
        assert_eq!(p.resource_dir(), "clang-r522817/lib/clang/18/lib/linux");
        assert_eq!(p.builtin_headers_dir(), "clang-r522817/lib/clang/18/include");
        assert_eq!(
            p.musl_dir("x86_64-unknown-linux-musl"),
            "clang-r522817/musl/lib/x86_64-unknown-linux-musl/lib/linux"
        );
        assert_eq!(p.darwin_dir(), "clang-r522817/lib/clang/18/lib/darwin");
        assert_eq!(p.windows_dir(), "clang-r522817/lib/clang/18/lib/windows");
    }

    #[test]
    fn custom_base() {
        let p = PathBuilder::new("prebuilts/clang/", &ToolchainRelease::new("clang-r1", "17"));
        assert_eq!(p.root(), "prebuilts/clang/clang-r1");
        assert_eq!(
            p.location_dir(Location::ResourceDir),
            "prebuilts/clang/clang-r1/lib/clang/17/lib/linux"
        );
        assert_eq!(
            p.location_dir(Location::ResourceSubdir("riscv64")),
            "prebuilts/clang/clang-r1/lib/clang/17/lib/linux/riscv64"
        );
    }
}
