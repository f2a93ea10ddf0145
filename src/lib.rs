//! Triage platform core library
//!
//! Emergency department triage, admissions and discharge paperwork. The
//! triage core (`clinical`) is pure; the record stores (`db`) persist flat JSON
//! files; `api` exposes everything over HTTP.

pub mod api;
pub mod clinical;
pub mod db;
pub mod error;
pub mod models;
pub mod session;

pub use crate::clinical::cnp::{parse_identifier_lenient, parse_identifier_strict};
pub use crate::clinical::discharge::recall_discharge;
pub use crate::clinical::triage::{classify, triage};

/// Application configuration
pub mod config {
    use serde::{Deserialize, Serialize};
    use std::path::{Path, PathBuf};

    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct Config {
        pub server: ServerConfig,
        pub storage: StorageConfig,
        pub hospital: HospitalConfig,
        pub auth: AuthConfig,
        pub logging: LoggingConfig,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct ServerConfig {
        pub host: String,
        pub port: u16,
    }

    impl Default for ServerConfig {
        fn default() -> Self {
            Self {
                host: "127.0.0.1".to_string(),
                port: 8000,
            }
        }
    }

    /// Where the flat JSON collections, uploads and static assets live.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct StorageConfig {
        pub data_dir: PathBuf,
        pub uploads_dir: PathBuf,
        pub static_dir: PathBuf,
    }

    impl Default for StorageConfig {
        fn default() -> Self {
            Self::rooted_at("data")
        }
    }

    impl StorageConfig {
        /// Data and uploads under `data_dir`; static assets in `./static`.
        pub fn rooted_at(data_dir: impl AsRef<Path>) -> Self {
            let data_dir = data_dir.as_ref().to_path_buf();
            Self {
                uploads_dir: data_dir.join("uploads"),
                data_dir,
                static_dir: PathBuf::from("static"),
            }
        }

        pub fn records_path(&self) -> PathBuf {
            self.data_dir.join("db.json")
        }

        pub fn doctors_path(&self) -> PathBuf {
            self.data_dir.join("doctors.json")
        }

        pub fn discharge_history_path(&self) -> PathBuf {
            self.data_dir.join("discharge_learning.json")
        }
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct HospitalConfig {
        pub name: String,
        pub address: String,
    }

    impl Default for HospitalConfig {
        fn default() -> Self {
            Self {
                name: "ArmoniaLife Hospital".to_string(),
                address: "Str. Bld Serantei, 110, Iasi, Iasi".to_string(),
            }
        }
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct AuthConfig {
        pub pin_salt: String,
        pub session_ttl_hours: i64,
    }

    impl Default for AuthConfig {
        fn default() -> Self {
            Self {
                pin_salt: "triage_local_salt_v1".to_string(),
                session_ttl_hours: 12,
            }
        }
    }

    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct LoggingConfig {
        /// Emit JSON lines instead of human-readable output.
        pub json: bool,
    }

    /// Load configuration from file
    pub fn load_config() -> Result<Config, ::config::ConfigError> {
        load_config_in(Path::new("config"))
    }

    /// Layered load: built-in defaults, `{dir}/default`, `{dir}/{TRIAGE_ENV}`,
    /// then `TRIAGE_*` environment variables.
    pub fn load_config_in(dir: &Path) -> Result<Config, ::config::ConfigError> {
        let env = std::env::var("TRIAGE_ENV").unwrap_or_else(|_| "development".into());

        ::config::Config::builder()
            // Start with built-in defaults
            .add_source(::config::Config::try_from(&Config::default())?)
            .add_source(
                ::config::File::with_name(&dir.join("default").to_string_lossy()).required(false),
            )
            // Override with environment-specific settings
            .add_source(
                ::config::File::with_name(&dir.join(&env).to_string_lossy()).required(false),
            )
            // Override with environment variables, e.g. TRIAGE_SERVER__PORT=9000
            .add_source(
                ::config::Environment::with_prefix("TRIAGE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}
