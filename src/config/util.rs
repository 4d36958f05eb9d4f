//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from `start`.
///
/// Walks up parent directories until finding `config_name`.
///
/// # Example
/// ```text
/// /home/user/site/src/content/blog/  ← start
/// /home/user/site/site.toml          ← found!
/// ```
pub fn find_config_file(start: &Path, config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    start
        .ancestors()
        .map(|dir| dir.join(config_name))
        .find(|candidate| candidate.is_file())
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_ancestor() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("src/content/blog");
        fs::create_dir_all(&nested).unwrap();
        fs::write(tmp.path().join("site.toml"), "").unwrap();

        let found = find_config_file(&nested, Path::new("site.toml")).unwrap();
        assert_eq!(found, tmp.path().join("site.toml"));
    }

    #[test]
    fn test_find_config_absolute() {
        let tmp = TempDir::new().unwrap();
        let config = tmp.path().join("custom.toml");
        assert_eq!(find_config_file(tmp.path(), &config), None);

        fs::write(&config, "").unwrap();
        assert_eq!(find_config_file(Path::new("/"), &config), Some(config));
    }

    #[test]
    fn test_find_config_missing() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(
            find_config_file(tmp.path(), Path::new("definitely-not-here-site.toml")),
            None
        );
    }
}
