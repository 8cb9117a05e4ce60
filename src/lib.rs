//! Healthdesk: the data-sync core of a healthcare administration dashboard.
//!
//! Healthdesk manages three record kinds (doctors, patients, appointments)
//! and a scripted health assistant. Every management screen follows the same
//! pattern: load a collection, filter it by a search string, and open a form
//! to create, edit or delete a record through a REST API or local in-memory
//! state.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Presentation (main.rs, or an embedding UI)          │
//! └─────────────────────────────────────────────────────┘
//!                        │ ScreenEvent / Action
//! ┌─────────────────────────────────────────────────────┐
//! │  Dashboard (dashboard) + Screen controllers (screen) │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Forms         │   │ Search        │   │ Assistant     │
//! │ (form/)       │   │ (search/)     │   │ (chatbot/)    │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Storage (storage/): RecordStore over a backend      │
//! │  - MemoryBackend          - HttpResource (remote/)   │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/): records, ids, errors              │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Everything is single-threaded and blocking: a mutation completes, then the
//! collection is reloaded, before the next event is handled.
//!
//! # Modules
//!
//! - [`domain`]: record types, the [`Entity`](domain::Entity) trait and errors
//! - [`storage`]: record store, backend trait and the in-memory backend
//! - [`remote`]: REST client and resource backend
//! - [`search`]: case-insensitive substring filter
//! - [`form`]: create/edit sessions and the doctor directory
//! - [`screen`]: per-screen event handling
//! - [`chatbot`]: keyword rules and the chat transcript
//! - [`dashboard`]: the screens wired together from a [`Config`]
//! - [`infrastructure`]: filesystem locations
//! - `observability`: OpenTelemetry tracing to a local file
//!
//! # Configuration
//!
//! A flat TOML file, every key optional:
//!
//! ```toml
//! api_base_url = "http://127.0.0.1:8000/api"
//! doctor_backend = "remote"
//! patient_backend = "memory"
//! appointment_backend = "remote"
//! refresh_policy = "reload"
//! request_timeout_secs = 30
//! seed_file = "~/healthdesk/seed.json"
//! trace_level = "debug"
//! data_dir = "~/.local/share/healthdesk"
//! ```
//!
//! # Example
//!
//! ```
//! use healthdesk::screen::ScreenEvent;
//! use healthdesk::{initialize, BackendKind, Config};
//!
//! let config = Config {
//!     doctor_backend: BackendKind::Memory,
//!     appointment_backend: BackendKind::Memory,
//!     ..Config::default()
//! };
//! let mut dashboard = initialize(&config)?;
//! dashboard.load_all();
//!
//! dashboard.doctors.handle_event(ScreenEvent::SetSearchTerm("tim mạch".into()));
//! assert_eq!(dashboard.doctors.visible().len(), 1);
//! # Ok::<(), healthdesk::DashboardError>(())
//! ```

pub mod chatbot;
pub mod dashboard;
pub mod domain;
pub mod form;
pub mod infrastructure;
pub mod remote;
pub mod screen;
pub mod search;
pub mod storage;

pub mod observability;

pub use dashboard::{Dashboard, Overview, Section};
pub use domain::{DashboardError, Result};
pub use storage::RefreshPolicy;

use crate::domain::fields::labeled_enum;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "HEALTHDESK_CONFIG";

labeled_enum! {
    /// Where one screen's records are kept.
    pub enum BackendKind {
        /// The REST API at `api_base_url`.
        Remote => "remote",
        /// Local state seeded from fixtures; lost on exit.
        Memory => "memory",
    }
}

/// Runtime configuration.
///
/// Doctors and appointments talk to the REST API by default; patients are kept
/// in memory, as the API has no patient endpoint yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the REST API, without the resource segment.
    pub api_base_url: String,
    pub doctor_backend: BackendKind,
    pub patient_backend: BackendKind,
    pub appointment_backend: BackendKind,
    pub refresh_policy: RefreshPolicy,

    /// Per-request timeout. `None` waits indefinitely.
    pub request_timeout_secs: Option<u64>,

    /// JSON fixtures for the in-memory backends, see [`storage::SeedFile`].
    pub seed_file: Option<String>,

    /// `EnvFilter` directive for exported spans. Default: `"info"`
    pub trace_level: Option<String>,

    /// Directory for the trace file. Default: platform data dir + `healthdesk`.
    pub data_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: remote::DEFAULT_BASE_URL.to_string(),
            doctor_backend: BackendKind::Remote,
            patient_backend: BackendKind::Memory,
            appointment_backend: BackendKind::Remote,
            refresh_policy: RefreshPolicy::Reload,
            request_timeout_secs: None,
            seed_file: None,
            trace_level: None,
            data_dir: None,
        }
    }
}

impl Config {
    /// Builds a configuration from string key/value pairs.
    ///
    /// Unknown keys are ignored. Values that fail to parse keep their default
    /// and are logged.
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use healthdesk::{BackendKind, Config, RefreshPolicy};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("patient_backend".to_string(), "remote".to_string());
    /// map.insert("refresh_policy".to_string(), "patch".to_string());
    /// map.insert("request_timeout_secs".to_string(), "15".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.patient_backend, BackendKind::Remote);
    /// assert_eq!(config.refresh_policy, RefreshPolicy::Patch);
    /// assert_eq!(config.request_timeout_secs, Some(15));
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            map.get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(String::from)
        };

        Self {
            api_base_url: text("api_base_url").unwrap_or(defaults.api_base_url),
            doctor_backend: parsed(map, "doctor_backend").unwrap_or(defaults.doctor_backend),
            patient_backend: parsed(map, "patient_backend").unwrap_or(defaults.patient_backend),
            appointment_backend: parsed(map, "appointment_backend")
                .unwrap_or(defaults.appointment_backend),
            refresh_policy: parsed(map, "refresh_policy").unwrap_or(defaults.refresh_policy),
            request_timeout_secs: parsed::<u64>(map, "request_timeout_secs").filter(|secs| *secs > 0),
            seed_file: text("seed_file"),
            trace_level: text("trace_level"),
            data_dir: text("data_dir"),
        }
    }

    /// Reads a flat TOML table of the same keys as [`from_map`](Self::from_map).
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read and `Config` if it is not a
    /// flat TOML table of strings, integers and booleans.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let table: BTreeMap<String, toml::Value> = toml::from_str(&contents)
            .map_err(|e| DashboardError::Config(format!("{}: {e}", path.display())))?;

        let mut map = BTreeMap::new();
        for (key, value) in table {
            let text = match value {
                toml::Value::String(text) => text,
                toml::Value::Integer(number) => number.to_string(),
                toml::Value::Boolean(flag) => flag.to_string(),
                other => {
                    return Err(DashboardError::Config(format!(
                        "{key}: expected a string or number, found {}",
                        other.type_str()
                    )))
                }
            };
            map.insert(key, text);
        }

        tracing::debug!(path = ?path, keys = map.len(), "loaded config file");
        Ok(Self::from_map(&map))
    }

    /// Loads the file named by `HEALTHDESK_CONFIG`, or the defaults when unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is set but the file is unusable.
    pub fn load() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(&infrastructure::expand_tilde(&path.to_string_lossy())),
            None => Ok(Self::default()),
        }
    }

    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Resolved data directory, with `~` expanded.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.as_deref().map_or_else(
            infrastructure::default_data_dir,
            infrastructure::expand_tilde,
        )
    }
}

fn parsed<T>(map: &BTreeMap<String, String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = map.get(key)?.trim();
    match raw.parse() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, value = raw, error = %e, "ignoring invalid config value");
            None
        }
    }
}

/// Builds the dashboard described by `config`.
///
/// Tracing is not installed here; call
/// [`observability::init_tracing`] first if spans should be exported.
///
/// # Errors
///
/// Returns an error if the seed file is unusable or the HTTP client cannot be
/// built.
pub fn initialize(config: &Config) -> Result<Dashboard> {
    tracing::debug!(
        api_base_url = %config.api_base_url,
        refresh_policy = %config.refresh_policy,
        "initializing dashboard"
    );
    Dashboard::from_config(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn defaults_match_the_deployed_api() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "http://127.0.0.1:8000/api");
        assert_eq!(config.doctor_backend, BackendKind::Remote);
        assert_eq!(config.patient_backend, BackendKind::Memory);
        assert_eq!(config.refresh_policy, RefreshPolicy::Reload);
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let config = Config::from_map(&map(&[
            ("doctor_backend", "ftp"),
            ("refresh_policy", "sometimes"),
            ("request_timeout_secs", "soon"),
            ("api_base_url", "   "),
        ]));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn zero_timeout_means_no_timeout() {
        let config = Config::from_map(&map(&[("request_timeout_secs", "0")]));
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn toml_file_accepts_strings_and_integers() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "api_base_url = \"http://clinic.local/api\"\nrequest_timeout_secs = 20\nappointment_backend = \"memory\"\ndata_dir = \"/var/lib/healthdesk\""
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.api_base_url, "http://clinic.local/api");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(20)));
        assert_eq!(config.appointment_backend, BackendKind::Memory);
        assert_eq!(config.data_dir(), PathBuf::from("/var/lib/healthdesk"));
    }

    #[test]
    fn nested_toml_tables_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nbase = \"x\"").unwrap();

        assert!(matches!(
            Config::from_file(file.path()),
            Err(DashboardError::Config(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = Config::from_file(Path::new("/nonexistent/healthdesk.toml"));
        assert!(matches!(result, Err(DashboardError::Io(_))));
    }
}
