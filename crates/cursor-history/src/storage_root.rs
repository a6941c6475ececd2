//! Storage root resolution.
//!
//! Cursor keeps one directory per workspace under `User/workspaceStorage`
//! inside its per-user application data directory. The location depends on
//! the host OS; an explicit override always wins.

use std::env;
use std::path::PathBuf;

/// Host operating system family, as far as Cursor's data layout cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    /// Linux and every other Unix
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Other
        }
    }
}

/// Snapshot of the process environment used to compute the default root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostEnv {
    /// `%APPDATA%` on Windows
    pub appdata: Option<String>,
    pub home: Option<PathBuf>,
}

impl HostEnv {
    /// Capture the current process environment.
    pub fn capture() -> Self {
        Self {
            appdata: env::var("APPDATA").ok(),
            home: dirs::home_dir(),
        }
    }
}

/// Resolve the workspace storage root.
///
/// A non-empty override is returned verbatim. Otherwise the OS default is
/// built from `env`; missing variables yield a relative (but well-formed)
/// path, which surfaces later as a missing directory.
pub fn resolve_storage_root(
    override_path: Option<&str>,
    platform: Platform,
    env: &HostEnv,
) -> PathBuf {
    if let Some(path) = override_path.filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }

    let home = env.home.clone().unwrap_or_default();
    match platform {
        Platform::Windows => PathBuf::from(env.appdata.as_deref().unwrap_or_default())
            .join("Cursor")
            .join("User")
            .join("workspaceStorage"),
        Platform::MacOs => home
            .join("Library")
            .join("Application Support")
            .join("Cursor")
            .join("User")
            .join("workspaceStorage"),
        Platform::Other => home
            .join(".config")
            .join("Cursor")
            .join("User")
            .join("workspaceStorage"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> HostEnv {
        HostEnv {
            appdata: Some("C:\\Users\\dev\\AppData\\Roaming".to_string()),
            home: Some(PathBuf::from("/home/dev")),
        }
    }

    #[test]
    fn test_override_wins() {
        for platform in [Platform::Windows, Platform::MacOs, Platform::Other] {
            assert_eq!(
                resolve_storage_root(Some("/data/ws"), platform, &host()),
                PathBuf::from("/data/ws")
            );
        }
    }

    #[test]
    fn test_empty_override_is_ignored() {
        assert_eq!(
            resolve_storage_root(Some(""), Platform::Other, &host()),
            PathBuf::from("/home/dev/.config/Cursor/User/workspaceStorage")
        );
    }

    #[test]
    fn test_linux_default() {
        assert_eq!(
            resolve_storage_root(None, Platform::Other, &host()),
            PathBuf::from("/home/dev/.config/Cursor/User/workspaceStorage")
        );
    }

    #[test]
    fn test_macos_default() {
        assert_eq!(
            resolve_storage_root(None, Platform::MacOs, &host()),
            PathBuf::from("/home/dev/Library/Application Support/Cursor/User/workspaceStorage")
        );
    }

    #[test]
    fn test_windows_default() {
        let root = resolve_storage_root(None, Platform::Windows, &host());
        assert!(root.starts_with("C:\\Users\\dev\\AppData\\Roaming"));
        assert!(root.ends_with(PathBuf::from("Cursor/User/workspaceStorage")));
    }

    #[test]
    fn test_windows_without_appdata_is_relative() {
        let env = HostEnv {
            appdata: None,
            home: None,
        };
        assert_eq!(
            resolve_storage_root(None, Platform::Windows, &env),
            PathBuf::from("Cursor/User/workspaceStorage")
        );
    }
}
