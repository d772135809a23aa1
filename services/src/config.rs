use serde::Deserialize;
use std::env::vars;
use std::path::{Path, PathBuf};
use tracing::info;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_SERVER_ADDR: &str = "0.0.0.0";
const DEFAULT_DATA_PATH: &str = "data/tableData.json";
const DEFAULT_PUBLIC_DIR: &str = "public";

// The final, validated configuration struct.
#[derive(Debug, Clone)]
pub struct Config {
    server_addr: String,
    port: u16,
    data_path: PathBuf,
    public_dir: PathBuf,
}

// An intermediate struct for deserializing environment variables
// where every field is optional.
#[derive(Deserialize)]
struct RawConfig {
    server_addr: Option<String>,
    port: Option<u16>,
    data_path: Option<String>,
    public_dir: Option<String>,
}

impl Config {
    /// Create a test configuration with default values.
    ///
    /// This function is available for both unit tests and integration tests.
    /// It should not be used in production code.
    pub fn new_for_test() -> Self {
        Self {
            server_addr: "127.0.0.1".to_owned(),
            port: DEFAULT_PORT,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
        }
    }

    /// Test configuration serving static assets from `public_dir`.
    pub fn new_for_test_with_public_dir(public_dir: impl Into<PathBuf>) -> Self {
        Self {
            public_dir: public_dir.into(),
            ..Self::new_for_test()
        }
    }

    pub fn server_addr(&self) -> &str {
        &self.server_addr
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn public_dir(&self) -> &Path {
        &self.public_dir
    }

    /// Initializes configuration by reading from environment variables
    /// and applying defaults.
    pub fn init() -> anyhow::Result<Self> {
        info!("Loading configuration from environment variables");

        let raw_config: RawConfig = serde_env::from_iter(vars())?;
        Ok(Self::from_raw(raw_config))
    }

    fn from_raw(raw_config: RawConfig) -> Self {
        let RawConfig {
            server_addr,
            port,
            data_path,
            public_dir,
        } = raw_config;

        let server_addr = server_addr.unwrap_or_else(|| {
            info!("SERVER_ADDR not set, defaulting to {}", DEFAULT_SERVER_ADDR);
            DEFAULT_SERVER_ADDR.to_owned()
        });

        let port = port.unwrap_or_else(|| {
            info!("PORT not set, defaulting to {}", DEFAULT_PORT);
            DEFAULT_PORT
        });

        Config {
            server_addr,
            port,
            data_path: PathBuf::from(data_path.as_deref().unwrap_or(DEFAULT_DATA_PATH)),
            public_dir: PathBuf::from(public_dir.as_deref().unwrap_or(DEFAULT_PUBLIC_DIR)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_env::from_iter;

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let raw: RawConfig =
            from_iter(Vec::<(&str, &str)>::new()).expect("RawConfig should deserialize");

        let config = Config::from_raw(raw);
        assert_eq!(config.port(), 3000);
        assert_eq!(config.server_addr(), "0.0.0.0");
        assert_eq!(config.data_path(), Path::new("data/tableData.json"));
        assert_eq!(config.public_dir(), Path::new("public"));
    }

    #[test]
    fn port_is_read_from_env() {
        let raw: RawConfig = from_iter(vec![("PORT", "8081")]).expect("RawConfig should deserialize");

        let config = Config::from_raw(raw);
        assert_eq!(config.port(), 8081);
    }

    #[test]
    fn paths_are_read_from_env() {
        let raw: RawConfig = from_iter(vec![
            ("DATA_PATH", "/srv/table.json"),
            ("PUBLIC_DIR", "/srv/www"),
            ("SERVER_ADDR", "127.0.0.1"),
        ])
        .expect("RawConfig should deserialize");

        let config = Config::from_raw(raw);
        assert_eq!(config.data_path(), Path::new("/srv/table.json"));
        assert_eq!(config.public_dir(), Path::new("/srv/www"));
        assert_eq!(config.server_addr(), "127.0.0.1");
    }

    #[test]
    fn invalid_port_is_rejected() {
        let raw: Result<RawConfig, _> = from_iter(vec![("PORT", "not-a-port")]);
        assert!(raw.is_err());
    }
}
