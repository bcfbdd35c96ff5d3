use std::{io::Write, path::Path};

use crate::Config;

/// Read the configuration file and apply environment overrides.
///
/// A missing file is not an error: the bundle metadata may come from the
/// environment alone, `Config::bundle` reports what is still missing.
pub fn load(config_path: &str) -> eyre::Result<Config> {
    let config = match read_file_content_if_exist(config_path)? {
        Some(content) => toml::from_str(&content)
            .map_err(|e| eyre::eyre!("Failed to parse config file '{config_path}': {e}"))?,
        None => Config::default(),
    };

    Ok(config.with_env_overrides())
}

fn read_file_content_if_exist(file_path: &str) -> eyre::Result<Option<String>> {
    let expanded = shellexpand::tilde(file_path);
    let path = Path::new(expanded.as_ref());

    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)?;
    Ok(Some(content))
}

pub fn save(config_path: &str, config: &Config) -> eyre::Result<()> {
    let toml_string =
        toml::to_string(config).map_err(|e| eyre::eyre!("Failed to serialize config: {e}"))?;

    let expanded = shellexpand::tilde(config_path);
    let path = Path::new(expanded.as_ref());
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| eyre::eyre!("Failed to create directory {parent:?}: {e}"))?;
    }

    let mut file = std::fs::File::create(path)
        .map_err(|e| eyre::eyre!("Failed to create or truncate file '{config_path}': {e}"))?;

    file.write_all(toml_string.as_bytes())
        .map_err(|e| eyre::eyre!("Failed to write to file '{config_path}': {e}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BundleConfig;
    use tempfile::tempdir;

    #[test]
    fn test_save_then_load_from_disk() -> eyre::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join("config.toml");
        let path = path.to_str().ok_or_else(|| eyre::eyre!("non utf-8 temp path"))?;

        let config = Config {
            bundle: BundleConfig {
                service_name: Some("org.laptop.Chat".to_string()),
                default_type: Some("_chat_olpc._udp".to_string()),
            },
        };
        save(path, &config)?;

        let content = std::fs::read_to_string(path)?;
        assert!(content.contains("[bundle]"));
        assert_eq!(toml::from_str::<Config>(&content)?, config);
        Ok(())
    }

    #[test]
    fn test_missing_file_yields_defaults() -> eyre::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("absent.toml");
        let path = path.to_str().ok_or_else(|| eyre::eyre!("non utf-8 temp path"))?;

        assert!(read_file_content_if_exist(path)?.is_none());
        Ok(())
    }

    #[test]
    fn test_invalid_file_is_reported() -> eyre::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[bundle\nservice_name = ")?;
        let path = path.to_str().ok_or_else(|| eyre::eyre!("non utf-8 temp path"))?;

        let err = load(path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
        Ok(())
    }
}
