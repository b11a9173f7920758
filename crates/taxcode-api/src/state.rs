//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! The place registry is loaded once at startup and shared read-only by the
//! encoder and the decoder through an `Arc`; handlers never lock anything.

use std::path::PathBuf;
use std::sync::Arc;

use taxcode_core::{
    loader, DecodeOptions, PlaceRegistry, RegistryError, TaxCodeDecoder, TaxCodeEncoder,
};

/// Runtime configuration, read from the environment by the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Place dataset to load instead of the bundled one.
    pub places_csv: Option<PathBuf>,
    /// Reject tax codes with a wrong control character on decode.
    pub verify_checksum: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            places_csv: None,
            verify_checksum: false,
        }
    }
}

impl AppConfig {
    /// Build configuration from `PORT`, `PLACES_CSV` and `VERIFY_CHECKSUM`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Unparseable values fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let port = lookup("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(defaults.port);
        let places_csv = lookup("PLACES_CSV")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        let verify_checksum = lookup("VERIFY_CHECKSUM")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(defaults.verify_checksum);
        Self {
            port,
            places_csv,
            verify_checksum,
        }
    }
}

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub registry: Arc<PlaceRegistry>,
    pub encoder: TaxCodeEncoder,
    pub decoder: TaxCodeDecoder,
}

impl AppState {
    /// Create state with default configuration over the bundled places.
    pub fn try_new() -> Result<Self, RegistryError> {
        Self::try_with_config(AppConfig::default())
    }

    /// Create state, loading places from `config.places_csv` when set.
    pub fn try_with_config(config: AppConfig) -> Result<Self, RegistryError> {
        let registry = match &config.places_csv {
            Some(path) => loader::from_path(path)?,
            None => PlaceRegistry::bundled()?,
        };
        Ok(Self::with_registry(config, Arc::new(registry)))
    }

    /// Create state over an already built registry.
    pub fn with_registry(config: AppConfig, registry: Arc<PlaceRegistry>) -> Self {
        let options = DecodeOptions {
            verify_checksum: config.verify_checksum,
        };
        Self {
            encoder: TaxCodeEncoder::new(Arc::clone(&registry)),
            decoder: TaxCodeDecoder::with_options(Arc::clone(&registry), options),
            registry,
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn config_defaults() {
        assert_eq!(AppConfig::from_lookup(lookup(&[])), AppConfig::default());
    }

    #[test]
    fn config_reads_variables() {
        let config = AppConfig::from_lookup(lookup(&[
            ("PORT", "9090"),
            ("PLACES_CSV", "/data/places.csv"),
            ("VERIFY_CHECKSUM", "TRUE"),
        ]));
        assert_eq!(config.port, 9090);
        assert_eq!(config.places_csv, Some(PathBuf::from("/data/places.csv")));
        assert!(config.verify_checksum);
    }

    #[test]
    fn config_ignores_garbage() {
        let config = AppConfig::from_lookup(lookup(&[
            ("PORT", "eighty"),
            ("PLACES_CSV", "  "),
            ("VERIFY_CHECKSUM", "maybe"),
        ]));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn state_uses_bundled_places_by_default() {
        let state = AppState::try_new().unwrap();
        assert!(!state.registry.is_empty());
        assert!(!state.decoder.options().verify_checksum);
    }

    #[test]
    fn state_loads_configured_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("places.csv");
        std::fs::write(&path, "name;province;code\nRIMINI;RN;H294\n").unwrap();

        let state = AppState::try_with_config(AppConfig {
            places_csv: Some(path),
            verify_checksum: true,
            ..AppConfig::default()
        })
        .unwrap();
        assert_eq!(state.registry.len(), 1);
        assert!(state.decoder.options().verify_checksum);
    }

    #[test]
    fn state_reports_missing_file() {
        let config = AppConfig {
            places_csv: Some(PathBuf::from("/nonexistent/places.csv")),
            ..AppConfig::default()
        };
        assert!(matches!(
            AppState::try_with_config(config),
            Err(RegistryError::Io(_))
        ));
    }
}
