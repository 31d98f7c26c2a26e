// SPDX-License-Identifier: MPL-2.0
//! Config directory resolution.
//!
//! # Path Resolution Order
//!
//! 1. **Explicit override** - parameter to `_with_override()` functions (for tests)
//! 2. **CLI argument** (`--config-dir`) - set via [`init_cli_override`]
//! 3. **Environment variable** (`MAGNIFY_GLASS_CONFIG_DIR`)
//! 4. **Platform default** - via `dirs` crate

use std::path::PathBuf;
use std::sync::OnceLock;

/// Application name used for directory naming.
const APP_NAME: &str = "MagnifyGlass";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "MAGNIFY_GLASS_CONFIG_DIR";

/// Global CLI override for config directory (set once at startup).
static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Records the `--config-dir` CLI argument.
///
/// Only the first call has an effect; later calls are logged and ignored.
pub fn init_cli_override(config_dir: Option<String>) {
    if CLI_CONFIG_DIR.set(config_dir.map(PathBuf::from)).is_err() {
        tracing::warn!("config dir override already initialized, ignoring");
    }
}

fn get_cli_config_dir() -> Option<PathBuf> {
    CLI_CONFIG_DIR.get().and_then(Clone::clone)
}

/// Returns the config directory path.
///
/// Platform defaults:
/// - Linux: `~/.config/MagnifyGlass/`
/// - macOS: `~/Library/Application Support/MagnifyGlass/`
/// - Windows: `C:\Users\<User>\AppData\Roaming\MagnifyGlass\`
pub fn get_config_dir() -> Option<PathBuf> {
    get_config_dir_with_override(None)
}

/// Returns the config directory path with an optional override that takes
/// priority over everything else.
pub fn get_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve_config_dir(
        override_path,
        get_cli_config_dir(),
        std::env::var(ENV_CONFIG_DIR).ok(),
    )
}

/// Applies the resolution order to already-gathered candidates. Empty
/// environment values count as unset.
fn resolve_config_dir(
    override_path: Option<PathBuf>,
    cli_path: Option<PathBuf>,
    env_path: Option<String>,
) -> Option<PathBuf> {
    if let Some(path) = override_path.or(cli_path) {
        return Some(path);
    }

    if let Some(env_path) = env_path.filter(|path| !path.is_empty()) {
        return Some(PathBuf::from(env_path));
    }

    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}
