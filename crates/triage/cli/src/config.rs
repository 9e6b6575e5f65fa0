//! Configuration loading for the CLI.
//!
//! Sources, lowest precedence first: built-in defaults, an optional config
//! file (format picked from its extension), then `TRIAGE__*` environment
//! variables, e.g. `TRIAGE__RECURRENCE_BONUS=0.05`.

use std::path::Path;

use ::config::{Config, Environment, File};
use tracing::debug;
use triage_core::TriageConfig;

use crate::error::CliResult;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "TRIAGE";

/// Load and validate the engine configuration.
pub fn load(path: Option<&Path>) -> CliResult<TriageConfig> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::from(path));
    }
    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let config: TriageConfig = builder.build()?.try_deserialize()?;
    config.validate()?;
    debug!(?config, "Loaded triage configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_argument_uses_defaults() {
        let config = load(None).unwrap();
        assert_eq!(config.confidence_ceiling, 0.95);
    }

    #[test]
    fn toml_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "recurrence_bonus = 0.05").unwrap();

        let config = load(Some(file.path())).unwrap();
        assert_eq!(config.recurrence_bonus, 0.05);
        assert_eq!(config.autonomy_threshold, 0.80);
    }

    #[test]
    fn out_of_range_file_is_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "confidence_ceiling = 0.99").unwrap();

        assert!(load(Some(file.path())).is_err());
    }
}
