//! Headless browser executable discovery.
//!
//! Deployment environments install the browser differently or not at all:
//! local machines have a system package, containers bake a fixed path, and
//! constrained serverless hosts unpack a minimal headless-shell distribution
//! at cold start. Resolution walks an ordered strategy chain and returns the
//! first candidate that exists and is executable. It never fails: when no
//! strategy verifies a candidate, the bundled default path is handed back
//! unverified so the launch attempt produces a diagnosable error instead of
//! resolution failing silently.

use std::path::{Path, PathBuf};

use crate::config::Config;

/// Capability snapshot passed into resolution. Built once from [`Config`];
/// the resolver itself never inspects ambient environment variables.
#[derive(Debug, Clone)]
pub struct BrowserEnv {
    /// Constrained/serverless context: prefer the minimal headless-shell
    /// distribution and the reduced process-isolation argument set.
    pub constrained: bool,
    /// Explicit executable path, checked before any discovery.
    pub executable_override: Option<PathBuf>,
    /// Directory scanned for installed browser version directories.
    pub cache_dir: Option<PathBuf>,
}

impl BrowserEnv {
    pub fn from_config(config: &Config) -> Self {
        BrowserEnv {
            constrained: config.serverless,
            executable_override: config.chrome_path.clone(),
            cache_dir: config
                .chrome_cache_dir
                .clone()
                .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".cache/chromium"))),
        }
    }
}

/// Outcome of resolution. `verified` is false only on the final fall-through,
/// where the path's existence could not be confirmed.
#[derive(Debug, Clone)]
pub struct ResolvedBrowser {
    pub executable: PathBuf,
    pub verified: bool,
}

/// Default executable location of the bundled full browser (container images).
const BUNDLED_EXECUTABLE: &str = "/opt/chromium/chrome";
/// Cold-start unpack location of the minimal headless-shell distribution used
/// on constrained hosts.
const CONSTRAINED_BUNDLED_EXECUTABLE: &str = "/tmp/chromium";

const SYSTEM_INSTALL_PATHS: &[&str] = &[
    "/usr/bin/chromium",
    "/usr/bin/chromium-browser",
    "/usr/bin/google-chrome-stable",
    "/usr/bin/google-chrome",
    "/snap/bin/chromium",
    "/usr/local/bin/chrome",
];

/// Conventional binary locations inside a cached version directory.
const FULL_BINARY_SUBPATHS: &[&str] = &["chrome-linux64/chrome", "chrome"];
const SHELL_BINARY_SUBPATHS: &[&str] = &[
    "chrome-headless-shell-linux64/chrome-headless-shell",
    "chrome-headless-shell",
];

/// Resolves a usable browser executable for the given environment.
pub fn resolve(env: &BrowserEnv) -> ResolvedBrowser {
    let strategies: &[fn(&BrowserEnv) -> Option<PathBuf>] = &[
        from_override,
        from_cache_scan,
        from_bundled,
        from_system_install,
    ];

    for strategy in strategies {
        if let Some(executable) = strategy(env) {
            return ResolvedBrowser {
                executable,
                verified: true,
            };
        }
    }

    ResolvedBrowser {
        executable: PathBuf::from(bundled_default(env.constrained)),
        verified: false,
    }
}

fn bundled_default(constrained: bool) -> &'static str {
    if constrained {
        CONSTRAINED_BUNDLED_EXECUTABLE
    } else {
        BUNDLED_EXECUTABLE
    }
}

fn from_override(env: &BrowserEnv) -> Option<PathBuf> {
    env.executable_override
        .as_deref()
        .filter(|path| is_executable(path))
        .map(Path::to_path_buf)
}

/// Scans the cache directory for version-named subdirectories, trying the
/// lexicographically-latest first. Constrained hosts prefer the
/// headless-shell binary layout over the full browser.
fn from_cache_scan(env: &BrowserEnv) -> Option<PathBuf> {
    let cache_dir = env.cache_dir.as_deref()?;
    let mut versions: Vec<PathBuf> = std::fs::read_dir(cache_dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    versions.sort();

    let subpaths: Vec<&str> = if env.constrained {
        SHELL_BINARY_SUBPATHS
            .iter()
            .chain(FULL_BINARY_SUBPATHS)
            .copied()
            .collect()
    } else {
        FULL_BINARY_SUBPATHS
            .iter()
            .chain(SHELL_BINARY_SUBPATHS)
            .copied()
            .collect()
    };

    for version_dir in versions.iter().rev() {
        for subpath in &subpaths {
            let candidate = version_dir.join(subpath);
            if is_executable(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

fn from_bundled(env: &BrowserEnv) -> Option<PathBuf> {
    let candidate = PathBuf::from(bundled_default(env.constrained));
    is_executable(&candidate).then_some(candidate)
}

fn from_system_install(_env: &BrowserEnv) -> Option<PathBuf> {
    SYSTEM_INSTALL_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|path| is_executable(path))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn make_executable(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "#!/bin/sh\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
        }
    }

    fn env_with(
        constrained: bool,
        executable_override: Option<PathBuf>,
        cache_dir: Option<PathBuf>,
    ) -> BrowserEnv {
        BrowserEnv {
            constrained,
            executable_override,
            cache_dir,
        }
    }

    #[test]
    fn test_override_wins_when_executable() {
        let dir = TempDir::new().unwrap();
        let exe = dir.path().join("my-chrome");
        make_executable(&exe);

        let resolved = resolve(&env_with(false, Some(exe.clone()), None));
        assert!(resolved.verified);
        assert_eq!(resolved.executable, exe);
    }

    #[test]
    fn test_missing_override_falls_through_to_cache() {
        let cache = TempDir::new().unwrap();
        let binary = cache.path().join("120.0.6099.71/chrome-linux64/chrome");
        make_executable(&binary);

        let resolved = resolve(&env_with(
            false,
            Some(PathBuf::from("/definitely/not/here")),
            Some(cache.path().to_path_buf()),
        ));
        assert!(resolved.verified);
        assert_eq!(resolved.executable, binary);
    }

    #[test]
    fn test_cache_scan_prefers_lexicographically_latest_version() {
        let cache = TempDir::new().unwrap();
        let older = cache.path().join("119.0.5998.10/chrome-linux64/chrome");
        let newer = cache.path().join("121.0.6167.85/chrome-linux64/chrome");
        make_executable(&older);
        make_executable(&newer);

        let resolved = resolve(&env_with(false, None, Some(cache.path().to_path_buf())));
        assert_eq!(resolved.executable, newer);
    }

    #[test]
    fn test_constrained_scan_prefers_headless_shell() {
        let cache = TempDir::new().unwrap();
        let full = cache.path().join("121.0.6167.85/chrome-linux64/chrome");
        let shell = cache
            .path()
            .join("121.0.6167.85/chrome-headless-shell-linux64/chrome-headless-shell");
        make_executable(&full);
        make_executable(&shell);

        let constrained = resolve(&env_with(true, None, Some(cache.path().to_path_buf())));
        assert_eq!(constrained.executable, shell);

        let standard = resolve(&env_with(false, None, Some(cache.path().to_path_buf())));
        assert_eq!(standard.executable, full);
    }

    #[test]
    fn test_non_executable_candidates_are_skipped() {
        let cache = TempDir::new().unwrap();
        let binary = cache.path().join("121.0.6167.85/chrome-linux64/chrome");
        fs::create_dir_all(binary.parent().unwrap()).unwrap();
        fs::write(&binary, "not a binary").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&binary, fs::Permissions::from_mode(0o644)).unwrap();
        }

        let resolved = resolve(&env_with(
            false,
            None,
            Some(cache.path().to_path_buf()),
        ));
        #[cfg(unix)]
        assert_ne!(resolved.executable, binary);
    }

    #[test]
    fn test_resolution_never_fails() {
        let empty = TempDir::new().unwrap();
        let resolved = resolve(&env_with(
            false,
            Some(PathBuf::from("/no/such/browser")),
            Some(empty.path().to_path_buf()),
        ));
        // Either a real system install was found, or the bundled default came
        // back unverified. Both are usable downstream.
        assert!(!resolved.executable.as_os_str().is_empty());
        if !resolved.verified {
            assert_eq!(resolved.executable, PathBuf::from(BUNDLED_EXECUTABLE));
        }
    }

    #[test]
    fn test_constrained_fall_through_uses_minimal_distribution() {
        let empty = TempDir::new().unwrap();
        let resolved = resolve(&env_with(true, None, Some(empty.path().to_path_buf())));
        if !resolved.verified {
            assert_eq!(
                resolved.executable,
                PathBuf::from(CONSTRAINED_BUNDLED_EXECUTABLE)
            );
        }
    }
}
