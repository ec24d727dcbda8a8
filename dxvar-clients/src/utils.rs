use std::env;
use std::path::{Path, PathBuf};

use dirs::home_dir;

use super::consts::{DEFAULT_CONFIG_FILE, DEFAULT_CONFIG_FOLDER, DXVAR_CONFIG_ENV};

/// Get the default configuration file from environment variable, if not available then
/// `~/.dxvar/config.toml`
///
/// # Returns
/// - path to the configuration file (it may not exist)
pub fn get_default_config_path() -> PathBuf {
    if let Ok(val) = env::var(DXVAR_CONFIG_ENV) {
        expand_path(Path::new(&val))
    } else {
        let home = env::var("HOME")
            .or_else(|_| {
                home_dir()
                    .map(|p| p.to_string_lossy().into_owned())
                    .ok_or(std::env::VarError::NotPresent)
            })
            .unwrap_or_else(|_| "/tmp".to_string());

        let mut path = PathBuf::from(home);
        path.push(DEFAULT_CONFIG_FOLDER);
        path.push(DEFAULT_CONFIG_FILE);
        path
    }
}

/// Expand `~` and environment variables in a user supplied path
///
/// # Returns
/// - the expanded path, or the path unchanged when expansion fails
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy().into_owned();
    match shellexpand::full(&raw) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => PathBuf::from(&raw),
    }
}

/// Join a base URL and a path without doubling or dropping the slash
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
