//! Plugin identity and search paths
//!
//! The loading subsystem matches converter plugins against a versioned
//! interface string and consults a platform-dependent directory list when
//! resolving them. This module only supplies both; discovery and loading
//! live elsewhere.

use std::env;
use std::path::PathBuf;

/// Versioned interface name converter plugins are matched against.
///
/// Bumped whenever the contract changes incompatibly, so the loader refuses
/// plugins built against a different revision.
pub const PLUGIN_INTERFACE: &str = "dev.meshport.Trade.SceneConverter/0.1";

/// Directories the plugin loader consults when resolving converter plugins.
///
/// Relative to the running executable's `lib` sibling first, then relative
/// to the working directory. Debug builds look in a `-d` suffixed tree so a
/// debug host never picks up release plugins.
pub fn plugin_search_paths() -> Vec<PathBuf> {
    let suffix = if cfg!(debug_assertions) {
        "meshport-d/sceneconverters"
    } else {
        "meshport/sceneconverters"
    };

    let mut paths = Vec::new();
    if let Ok(exe) = env::current_exe() {
        if let Some(dir) = exe.parent() {
            paths.push(dir.join("../lib").join(suffix));
        }
    }
    paths.push(PathBuf::from(suffix));
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interface_is_versioned() {
        assert!(PLUGIN_INTERFACE.ends_with("/0.1"));
        assert!(PLUGIN_INTERFACE.contains("SceneConverter"));
    }

    #[test]
    fn test_search_paths() {
        let paths = plugin_search_paths();
        assert!(!paths.is_empty());
        assert!(
            paths
                .iter()
                .all(|path| path.ends_with("sceneconverters"))
        );
    }
}
