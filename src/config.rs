use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Database file used when neither the flag nor the config names one
pub const DEFAULT_DATABASE: &str = "products.db";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StockroomConfig {
    pub database: Option<String>,
    pub history: Option<String>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("stockroom.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<StockroomConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: StockroomConfig = toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("invalid config {}: {}", path.display(), e))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(Some(config))
}

/// Write `config` as TOML, creating parent directories as needed.
pub fn write_config(path: &Path, config: &StockroomConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    ensure_parent_dir(path)?;
    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)
        .with_context(|| format!("could not write config {}", path.display()))?;
    tracing::debug!(path = %path.display(), force, "wrote config");
    Ok(())
}

/// Flag first, then config, then [`DEFAULT_DATABASE`].
pub fn resolve_database(flag: Option<&Path>, config: &StockroomConfig) -> PathBuf {
    flag.map(Path::to_path_buf)
        .or_else(|| config.database.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE))
}

/// Create the directory that will hold `path` (a database or config file).
pub fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    if parent.is_dir() {
        return Ok(());
    }

    std::fs::create_dir_all(parent)
        .with_context(|| format!("could not create directory for {}", path.display()))?;
    tracing::debug!(dir = %parent.display(), "created directory");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config(Some(&dir.path().join("absent.toml"))).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stockroom.toml");
        let config = StockroomConfig {
            database: Some("data/shop.db".into()),
            history: None,
        };

        write_config(&path, &config, false).unwrap();
        assert_eq!(load_config(Some(&path)).unwrap(), Some(config.clone()));

        assert!(write_config(&path, &config, false).is_err());
        write_config(&path, &config, true).unwrap();
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stockroom.toml");
        std::fs::write(&path, "database = [").unwrap();
        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn test_resolve_database_precedence() {
        let config = StockroomConfig {
            database: Some("from_config.db".into()),
            history: None,
        };
        assert_eq!(
            resolve_database(Some(Path::new("flag.db")), &config),
            PathBuf::from("flag.db")
        );
        assert_eq!(resolve_database(None, &config), PathBuf::from("from_config.db"));
        assert_eq!(
            resolve_database(None, &StockroomConfig::default()),
            PathBuf::from(DEFAULT_DATABASE)
        );
    }

    #[test]
    fn test_ensure_parent_dir_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested").join("deeper").join("products.db");
        ensure_parent_dir(&db).unwrap();
        assert!(db.parent().unwrap().is_dir());

        ensure_parent_dir(Path::new("products.db")).unwrap();
    }

    #[test]
    fn test_ensure_parent_dir_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let db = blocker.join("sub").join("products.db");

        let err = ensure_parent_dir(&db).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("could not create directory for"));
        assert!(message.contains("products.db"));
    }

    #[test]
    fn test_write_config_into_new_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("etc").join("stockroom.toml");
        write_config(&path, &StockroomConfig::default(), false).unwrap();
        assert_eq!(load_config(Some(&path)).unwrap(), Some(StockroomConfig::default()));
    }
}
