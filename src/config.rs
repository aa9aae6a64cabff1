use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::LazyLock;
use thiserror::Error;
use validator::{Validate, ValidationError};

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Table prefixes end up inside SQL identifiers, so keep them to word characters
static TABLE_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]*$").unwrap());

/// Per-run configuration with validation. The original tool hardcoded these
/// as module-level literals; here they are explicit inputs to the pipeline.
#[derive(Clone, Debug, Validate, Serialize, Deserialize)]
pub struct JobConfig {
    /// Output path for the type defs handed to the SQL schema compiler
    pub output_filepath: PathBuf,

    /// Target database name forwarded to the SQL schema compiler
    #[validate(length(min = 1, message = "Database name cannot be empty"))]
    pub database_name: String,

    /// Prefix applied to generated table names
    #[validate(custom(function = validate_table_prefix))]
    pub table_prefix: String,

    /// Whether to syntax-check the final type defs before writing them
    pub validate_schema: bool,
}

fn validate_table_prefix(prefix: &str) -> Result<(), ValidationError> {
    if TABLE_PREFIX.is_match(prefix) {
        Ok(())
    } else {
        let mut err = ValidationError::new("table_prefix");
        err.message = Some("Table prefix may only contain letters, digits and underscores".into());
        Err(err)
    }
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            output_filepath: PathBuf::from("schema.typedefs.graphql"),
            database_name: "dbname".to_string(),
            table_prefix: "test_".to_string(),
            validate_schema: false,
        }
    }
}

impl JobConfig {
    /// Create configuration from CLI arguments with validation
    pub fn from_cli(cli: CliConfig) -> Result<Self, ConfigError> {
        let config = Self {
            output_filepath: cli.output_filepath,
            database_name: cli.database_name,
            table_prefix: cli.table_prefix,
            validate_schema: cli.validate_schema,
        };

        config.validate()?;
        Ok(config)
    }
}

/// CLI configuration (parsed from command line arguments)
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub output_filepath: PathBuf,
    pub database_name: String,
    pub table_prefix: String,
    pub validate_schema: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = JobConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.database_name, "dbname");
        assert_eq!(config.table_prefix, "test_");
    }

    #[test]
    fn test_empty_database_name() {
        let config = JobConfig {
            database_name: "".to_string(), // Invalid
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_table_prefix() {
        let config = JobConfig {
            table_prefix: "bad prefix;".to_string(), // Invalid
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_table_prefix_allowed() {
        let config = JobConfig {
            table_prefix: "".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
