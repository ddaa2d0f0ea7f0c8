// Configuration loader
// Loads ~/.toolbox/config.toml, falling back to built-in defaults

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use super::settings::Config;

/// Load configuration from the toolbox config file or defaults.
///
/// Missing config file is not an error — the sandbox runs fine on the
/// built-in defaults. `TOOLBOX_BIND` overrides the bind address either way.
pub fn load_config() -> Result<Config> {
    let mut config = match config_path() {
        Some(path) if path.exists() => load_from_file(&path)?,
        _ => Config::default(),
    };

    if let Ok(bind) = std::env::var("TOOLBOX_BIND") {
        if !bind.is_empty() {
            config.server.bind_address = bind;
        }
    }

    Ok(config)
}

/// Load configuration from a specific TOML file.
pub fn load_from_file(path: &std::path::Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".toolbox/config.toml"))
}
