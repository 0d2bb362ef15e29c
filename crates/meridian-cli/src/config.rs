use std::path::{Path, PathBuf};

use meridian_report::config::ScoringConfig;

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("meridian"))
}

fn config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("scoring.json"))
}

/// Load the scoring config.
///
/// An explicit path must exist. Without one, the platform config dir is
/// tried and built-in defaults are used when nothing is there.
pub fn load_config(explicit: Option<&Path>) -> eyre::Result<ScoringConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = config_path()?;
            if !path.exists() {
                tracing::debug!(path = %path.display(), "no scoring config, using defaults");
                return Ok(ScoringConfig::default());
            }
            path
        }
    };

    let contents = std::fs::read_to_string(&path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;
    let config = ScoringConfig::from_json_str(&contents)
        .map_err(|e| eyre::eyre!("invalid config at {}: {e}", path.display()))?;
    tracing::info!(path = %path.display(), version = config.config_version, "loaded scoring config");
    Ok(config)
}

/// Write the default config to the platform config dir, for editing.
pub fn write_default_config() -> eyre::Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir)?;
    let path = config_path()?;
    std::fs::write(&path, ScoringConfig::default().to_json_string()?)?;
    Ok(path)
}
