use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

/// Top-level pyramid configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PyramidConfig {
    /// Demo run settings.
    #[serde(default)]
    pub demo: DemoToml,

    /// Worker pool settings.
    #[serde(default)]
    pub parallel: ParallelToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DemoToml {
    #[serde(default = "default_signal")]
    pub signal: Vec<f64>,
    #[serde(default)]
    pub level: Option<usize>,
    #[serde(default)]
    pub arbitrary_length: bool,
}

impl Default for DemoToml {
    fn default() -> Self {
        Self {
            signal: default_signal(),
            level: None,
            arbitrary_length: false,
        }
    }
}

fn default_signal() -> Vec<f64> {
    vec![1.2, 2.3, 3.4, 4.5, 5.4, 4.3, 3.2, 2.1]
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParallelToml {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub threads: usize,
    #[serde(default = "default_min_len")]
    pub min_len: usize,
}

impl Default for ParallelToml {
    fn default() -> Self {
        Self {
            enabled: false,
            threads: 0,
            min_len: default_min_len(),
        }
    }
}

fn default_min_len() -> usize {
    4
}

/// Reads the TOML file at `path`, or returns defaults if it does not exist.
pub fn load(path: &Path) -> Result<PyramidConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(PyramidConfig::default());
    }
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str(&toml_str)
        .with_context(|| format!("failed to parse TOML config: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(&dir.path().join("pyramid.toml")).unwrap();
        assert_eq!(config.demo.signal.len(), 8);
        assert_eq!(config.demo.level, None);
        assert!(!config.demo.arbitrary_length);
        assert!(!config.parallel.enabled);
        assert_eq!(config.parallel.min_len, 4);
    }

    #[test]
    fn full_file() {
        let file = write_config(
            r#"
[demo]
signal = [1.0, 2.0, 3.0]
level = 1
arbitrary_length = true

[parallel]
enabled = true
threads = 2
min_len = 16
"#,
        );
        let config = load(file.path()).unwrap();
        assert_eq!(config.demo.signal, vec![1.0, 2.0, 3.0]);
        assert_eq!(config.demo.level, Some(1));
        assert!(config.demo.arbitrary_length);
        assert!(config.parallel.enabled);
        assert_eq!(config.parallel.threads, 2);
        assert_eq!(config.parallel.min_len, 16);
    }

    #[test]
    fn partial_section_keeps_field_defaults() {
        let file = write_config("[parallel]\nenabled = true\n");
        let config = load(file.path()).unwrap();
        assert!(config.parallel.enabled);
        assert_eq!(config.parallel.threads, 0);
        assert_eq!(config.parallel.min_len, 4);
        assert_eq!(config.demo.signal.len(), 8);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let file = write_config("[demo]\nwavelet = \"haar\"\n");
        let err = load(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("unknown field"));
    }
}
