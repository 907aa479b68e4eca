use std::fmt::Display;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use tracing::warn;

use crate::session::{ColorPair, DEFAULT_BG, DEFAULT_FG};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_ASSETS_DIR: &str = "client/assets";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub assets_dir: PathBuf,
    /// Pair the page starts with.
    pub initial: ColorPair,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            initial: ColorPair::default(),
        }
    }
}

/// Parse `key` if set, warning and keeping `default` when it does not parse.
fn parse_var<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Display,
{
    match get(key) {
        Some(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                warn!("Ignoring {}={:?}, using {}", key, raw, default);
                default
            }
        },
        None => default,
    }
}

impl Config {
    /// Read `HOST`, `PORT`, `ASSETS_DIR`, `DEFAULT_FG` and `DEFAULT_BG`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let host = parse_var(&get, "HOST", defaults.host);
        let port = parse_var(&get, "PORT", defaults.port);
        let assets_dir = get("ASSETS_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.assets_dir);

        let fg = get("DEFAULT_FG").unwrap_or_else(|| DEFAULT_FG.to_string());
        let bg = get("DEFAULT_BG").unwrap_or_else(|| DEFAULT_BG.to_string());
        let initial = match ColorPair::new(&fg, &bg) {
            Ok(pair) => pair,
            Err(e) => {
                warn!("Ignoring configured colors: {}", e);
                defaults.initial
            }
        };

        Self {
            host,
            port,
            assets_dir,
            initial,
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = lookup(&[]);
        assert_eq!(config.addr(), "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.assets_dir, PathBuf::from("client/assets"));
        assert_eq!(config.initial, ColorPair::default());
    }

    #[test]
    fn test_overrides() {
        let config = lookup(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "3000"),
            ("ASSETS_DIR", "/srv/assets"),
            ("DEFAULT_FG", "#000"),
            ("DEFAULT_BG", "#fafafa"),
        ]);
        assert_eq!(config.addr(), "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.assets_dir, PathBuf::from("/srv/assets"));
        assert_eq!(config.initial.fg, "#000");
        assert_eq!(config.initial.bg, "#fafafa");
    }

    #[test]
    fn test_parse_var() {
        let get = |key: &str| match key {
            "PORT" => Some("9000".to_string()),
            "BAD" => Some("-1".to_string()),
            _ => None,
        };
        assert_eq!(parse_var(&get, "PORT", 8080u16), 9000);
        assert_eq!(parse_var(&get, "BAD", 8080u16), 8080);
        assert_eq!(parse_var(&get, "MISSING", 8080u16), 8080);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = lookup(&[
            ("HOST", "localhost:80"),
            ("PORT", "http"),
            ("DEFAULT_FG", "white"),
        ]);
        assert_eq!(config.host, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(config.port, 8080);
        assert_eq!(config.initial, ColorPair::default());
    }
}
