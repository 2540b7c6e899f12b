use serde::Deserialize;
use std::fs::read_to_string;

use crate::error::Error;

const DEFAULT_PAYLOAD_LIMIT: usize = 4 * (1 << 20); // 4 MiB

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
  pub host: String,
  pub port: u16,
  pub static_dir: String,
  pub index_file: String,
  pub show_listing: bool,
  pub payload_limit: usize,
}

impl Default for ServerConfig {
  fn default() -> Self {
    ServerConfig {
      host: String::from("0.0.0.0"),
      port: 8080,
      static_dir: String::from("./static"),
      index_file: String::from("index.html"),
      show_listing: true,
      payload_limit: DEFAULT_PAYLOAD_LIMIT,
    }
  }
}

impl ServerConfig {
  pub fn load(path: &str) -> Result<ServerConfig, Error> {
    let config_str = read_to_string(path).map_err(|source| Error::ConfigRead {
      path: path.to_string(),
      source,
    })?;
    ServerConfig::from_yaml(&config_str).map_err(|source| Error::ConfigParse {
      path: path.to_string(),
      source,
    })
  }

  pub fn from_yaml(s: &str) -> Result<ServerConfig, serde_yaml::Error> {
    // an empty document means all defaults
    if s.trim().is_empty() {
      return Ok(ServerConfig::default());
    }
    serde_yaml::from_str(s)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_file_is_default() {
    assert_eq!(ServerConfig::from_yaml("").unwrap(), ServerConfig::default());
  }

  #[test]
  fn partial_overrides() {
    let config = ServerConfig::from_yaml("port: 9000\nshow_listing: false\n").unwrap();
    assert_eq!(config.port, 9000);
    assert!(!config.show_listing);
    assert_eq!(config.static_dir, "./static");
    assert_eq!(config.payload_limit, DEFAULT_PAYLOAD_LIMIT);
  }

  #[test]
  fn rejects_unknown_keys() {
    assert!(ServerConfig::from_yaml("prot: 9000\n").is_err());
  }

  #[test]
  fn missing_file() {
    match ServerConfig::load("/nonexistent/trackgrid.yaml") {
      Err(Error::ConfigRead { path, .. }) => assert_eq!(path, "/nonexistent/trackgrid.yaml"),
      other => panic!("unexpected result {:?}", other),
    }
  }
}
