use serde::Deserialize;
use std::path::Path;

#[derive(Deserialize, Debug)]
pub struct TrapzConfig {
    /// Number of ranks to run. Must be at least 1.
    #[serde(default = "defaults::ranks")]
    pub ranks: usize,
    /// Path of the `a b n` job record, read by the root rank only.
    #[serde(default = "defaults::input_path")]
    pub input_path: String,
    #[serde(default = "defaults::log_level")]
    pub log_level: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read '{path}'")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),
}

mod defaults {
    pub fn ranks() -> usize {
        4
    }

    pub fn input_path() -> String {
        "trapz-inputs.txt".into()
    }

    pub fn log_level() -> String {
        "info".into()
    }
}

impl Default for TrapzConfig {
    fn default() -> Self {
        Self {
            ranks: defaults::ranks(),
            input_path: defaults::input_path(),
            log_level: defaults::log_level(),
        }
    }
}

impl TrapzConfig {
    pub fn load(path: impl AsRef<Path> + ToString) -> Result<Self, ConfigError> {
        let toml_to_str = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        let trapz_config: TrapzConfig = toml::from_str(&toml_to_str)?;
        Ok(trapz_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: TrapzConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.ranks, 4);
        assert_eq!(cfg.input_path, "trapz-inputs.txt");
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn explicit_fields_win() {
        let cfg: TrapzConfig = toml::from_str(
            r#"
            ranks = 8
            input_path = "/var/run/job.txt"
            log_level = "trace"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.ranks, 8);
        assert_eq!(cfg.input_path, "/var/run/job.txt");
        assert_eq!(cfg.log_level, "trace");
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = TrapzConfig::load("/no/such/trapz.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/no/such/trapz.toml"));
    }
}
