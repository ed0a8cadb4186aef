use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::str::FromStr;
use crate::services::catalog::FieldCatalog;
use crate::services::probe::ExtractorOptions;

fn default_max_file_size() -> usize {
    // 10 MB in bytes
    10 * 1024 * 1024
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub max_file_size: usize,
    pub parallel_batch: bool,
    pub field_catalog: FieldCatalog,
    /// Pins the year vintage is measured against; the clock is used otherwise.
    pub report_year: Option<i32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            max_file_size: default_max_file_size(),
            parallel_batch: false,
            field_catalog: FieldCatalog::builtin(),
            report_year: None,
        }
    }
}

fn parse_var<T>(key: &str, raw: Option<String>) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("Invalid value for {}: {}", key, value)),
        None => Ok(None),
    }
}

impl Config {
    pub fn new() -> Result<Self> {
        // Load .env file first
        dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `new` passes the process env.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let field_catalog = match lookup("PROBE_FIELD_CATALOG").filter(|p| !p.trim().is_empty()) {
            Some(path) => FieldCatalog::load(path.trim())
                .with_context(|| format!("Failed to load field catalog from {}", path))?,
            None => defaults.field_catalog,
        };

        Ok(Config {
            bind_addr: parse_var("PROBE_BIND_ADDR", lookup("PROBE_BIND_ADDR"))?.unwrap_or(defaults.bind_addr),
            max_file_size: parse_var("PROBE_MAX_FILE_SIZE", lookup("PROBE_MAX_FILE_SIZE"))?
                .unwrap_or(defaults.max_file_size),
            parallel_batch: parse_var("PROBE_PARALLEL_BATCH", lookup("PROBE_PARALLEL_BATCH"))?
                .unwrap_or(defaults.parallel_batch),
            field_catalog,
            report_year: parse_var("PROBE_REPORT_YEAR", lookup("PROBE_REPORT_YEAR"))?,
        })
    }

    pub fn extractor_options(&self) -> ExtractorOptions {
        let mut options = ExtractorOptions {
            parallel: self.parallel_batch,
            ..ExtractorOptions::default()
        };
        if let Some(year) = self.report_year {
            options.current_year = year;
        }
        options
    }
}

pub fn load_config() -> Result<Config> {
    let config = Config::new()?;
    tracing::info!(
        "Config loaded: bind {}, max file size {} bytes, catalog {}, parallel batch {}",
        config.bind_addr,
        config.max_file_size,
        config.field_catalog.version(),
        config.parallel_batch
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr, default_bind_addr());
        assert_eq!(config.max_file_size, 10 * 1024 * 1024);
        assert!(!config.parallel_batch);
        assert_eq!(config.report_year, None);
        assert_eq!(config.field_catalog, FieldCatalog::builtin());
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("PROBE_BIND_ADDR", "0.0.0.0:8080"),
            ("PROBE_MAX_FILE_SIZE", "2048"),
            ("PROBE_PARALLEL_BATCH", "true"),
            ("PROBE_REPORT_YEAR", " 2025 "),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.max_file_size, 2048);
        assert!(config.parallel_batch);
        assert_eq!(config.report_year, Some(2025));

        let options = config.extractor_options();
        assert_eq!(options.current_year, 2025);
        assert!(options.parallel);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Config::from_lookup(lookup(&[("PROBE_MAX_FILE_SIZE", "ten")])).is_err());
        assert!(Config::from_lookup(lookup(&[("PROBE_FIELD_CATALOG", "/nonexistent/catalog.json")])).is_err());
    }
}
