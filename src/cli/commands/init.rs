use std::path::Path;

use crate::config::Config;

pub fn cmd_init(path: &Path) -> anyhow::Result<()> {
    if Config::create_default_at(path)? {
        println!(
            "✓ Config file created at {}. Edit it and run again.",
            path.display()
        );
    } else {
        println!("Config file already exists at {}, leaving it as is.", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir() -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("placefinder-init-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_init_writes_loadable_defaults() {
        let dir = scratch_dir();
        let path = dir.join("config.toml");

        cmd_init(&path).unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.search.rate_limit, 10);
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_init_ignores_malformed_existing_file() {
        let dir = scratch_dir();
        let path = dir.join("config.toml");
        std::fs::write(&path, "[search\nrate_limit = ").unwrap();

        assert!(Config::load_from_path(&path).is_err());
        assert!(cmd_init(&path).is_ok());
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "[search\nrate_limit = "
        );
        std::fs::remove_dir_all(dir).unwrap();
    }
}
