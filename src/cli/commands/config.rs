//! Create-config command implementation.

use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Write a configuration file holding the defaults.
pub fn run_create_config(path: &str) -> Result<()> {
    let path = Settings::expand_path(path);
    if path.exists() {
        Output::error(&format!("{} already exists", path.display()));
        anyhow::bail!("Refusing to overwrite {}", path.display());
    }

    Settings::default().save_to(&path)?;
    Output::success(&format!("Created default config at {}", path.display()));
    Output::info("Edit it, then pass it with --config.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_config_writes_loadable_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ytsum").join("config.json");
        let path_str = path.to_string_lossy().to_string();

        run_create_config(&path_str).unwrap();
        let loaded = Settings::load_from(Some(path.as_path())).unwrap();
        assert_eq!(loaded.default_provider, "openrouter");

        assert!(run_create_config(&path_str).is_err());
    }
}
