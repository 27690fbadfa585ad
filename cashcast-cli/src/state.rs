use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$CASHCAST_HOME`, or `~/.cashcast`.
pub fn cashcast_home() -> Result<PathBuf> {
    resolve_home(
        std::env::var("CASHCAST_HOME").ok(),
        std::env::var("HOME").ok(),
    )
}

fn resolve_home(override_dir: Option<String>, home: Option<String>) -> Result<PathBuf> {
    if let Some(dir) = override_dir.filter(|d| !d.trim().is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = home.context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".cashcast"))
}

pub fn ensure_cashcast_home() -> Result<PathBuf> {
    let dir = cashcast_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{load_config, save_config, Config, OutputFormat};

    #[test]
    fn test_override_wins_over_home() {
        let dir = resolve_home(Some("/srv/cc".into()), Some("/home/u".into())).unwrap();
        assert_eq!(dir, PathBuf::from("/srv/cc"));
    }

    #[test]
    fn test_blank_override_falls_back_to_home() {
        let dir = resolve_home(Some("  ".into()), Some("/home/u".into())).unwrap();
        assert_eq!(dir, PathBuf::from("/home/u/.cashcast"));
        assert!(resolve_home(None, None).is_err());
    }

    // The only test in this crate that touches the process environment.
    #[test]
    fn test_config_lives_under_cashcast_home() {
        let tmp = tempfile::tempdir().unwrap();
        let home = tmp.path().join("nested");
        unsafe { std::env::set_var("CASHCAST_HOME", &home) };

        assert_eq!(ensure_cashcast_home().unwrap(), home);
        assert!(home.is_dir());

        let mut cfg = Config::default();
        cfg.engine.horizon_days = 45;
        cfg.output.format = OutputFormat::Json;
        save_config(&cfg).unwrap();

        assert!(home.join("config.toml").is_file());
        assert_eq!(load_config().unwrap(), cfg);

        unsafe { std::env::remove_var("CASHCAST_HOME") };
    }
}
