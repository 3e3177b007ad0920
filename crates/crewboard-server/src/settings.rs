//! Runtime configuration: an optional TOML file layered under `CREWBOARD_*`
//! environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

/// Runtime server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:           String,
  pub port:           u16,
  pub store_path:     PathBuf,
  /// Fill an empty store with demo sites and employees at startup.
  pub seed_demo_data: bool,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:           "127.0.0.1".to_string(),
      port:           8080,
      store_path:     PathBuf::from("crewboard.db"),
      seed_demo_data: true,
    }
  }
}

impl ServerConfig {
  /// Read `file` (if it exists) and the environment.
  pub fn load(file: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix("CREWBOARD"))
      .build()
      .context("failed to read config file")?;

    let mut cfg: Self = settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")?;
    cfg.store_path = expand_tilde(&cfg.store_path);
    Ok(cfg)
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_file_gives_defaults() {
    let cfg = ServerConfig::load(Path::new("does-not-exist.toml")).unwrap();
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.store_path, PathBuf::from("crewboard.db"));
    assert!(cfg.seed_demo_data);
    assert_eq!(cfg.address(), "127.0.0.1:8080");
  }

  #[test]
  fn relative_paths_are_left_alone() {
    let p = Path::new("data/crewboard.db");
    assert_eq!(expand_tilde(p), p);
  }

  #[test]
  fn leading_tilde_expands_to_home() {
    let Ok(home) = std::env::var("HOME") else { return };
    let expanded = expand_tilde(Path::new("~/crew/board.db"));
    assert_eq!(expanded, PathBuf::from(home).join("crew/board.db"));
  }
}
