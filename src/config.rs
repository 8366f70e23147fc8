use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SchemascanConfig {
    /// Base directory schema paths are resolved against
    pub base_dir: Option<String>,
    /// Default schema file, relative to `base_dir`
    pub schema: Option<String>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("schemascan.toml")
}

/// Resolve a schema path against the installation base directory.
/// Absolute paths pass through untouched.
pub fn resolve_schema_path(base_dir: Option<&Path>, path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match base_dir {
        Some(base) => base.join(path),
        None => path.to_path_buf(),
    }
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<SchemascanConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: SchemascanConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &SchemascanConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_against_base() {
        let resolved = resolve_schema_path(Some(Path::new("/opt/schemascan")), Path::new("shop.sql"));
        assert_eq!(resolved, PathBuf::from("/opt/schemascan/shop.sql"));
    }

    #[test]
    fn test_resolve_absolute_passes_through() {
        let resolved = resolve_schema_path(Some(Path::new("/opt/schemascan")), Path::new("/tmp/s.sql"));
        assert_eq!(resolved, PathBuf::from("/tmp/s.sql"));
    }

    #[test]
    fn test_resolve_without_base() {
        let resolved = resolve_schema_path(None, Path::new("shop.sql"));
        assert_eq!(resolved, PathBuf::from("shop.sql"));
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schemascan.toml");

        let config = SchemascanConfig {
            base_dir: Some("/opt/schemascan".to_string()),
            schema: Some("shop.sql".to_string()),
        };
        write_config(&path, &config, false).unwrap();

        let loaded = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(loaded.base_dir.as_deref(), Some("/opt/schemascan"));
        assert_eq!(loaded.schema.as_deref(), Some("shop.sql"));
    }

    #[test]
    fn test_write_refuses_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schemascan.toml");

        write_config(&path, &SchemascanConfig::default(), false).unwrap();
        assert!(write_config(&path, &SchemascanConfig::default(), false).is_err());
        assert!(write_config(&path, &SchemascanConfig::default(), true).is_ok());
    }

    #[test]
    fn test_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(load_config(Some(&path)).unwrap().is_none());
    }
}
