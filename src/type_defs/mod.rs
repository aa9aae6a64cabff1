//! Compiler handoff for the decorated schema.
//!
//! The downstream GraphQL-to-SQL compiler consumes a type-defs document: the
//! `@sql` directive declaration followed by the decorated schema, plus the
//! output path, database name and table prefix. SQL generation itself happens
//! downstream; this crate ends at the written type-defs file.

pub mod errors;

use self::errors::TypeDefsError;
use std::fs;
use std::path::PathBuf;

/// Declaration of the `@sql` directive, matching the argument set the SQL
/// schema compiler understands.
pub const SQL_DIRECTIVE_DECLARATION: &str = r#"directive @sql(
  unicode: Boolean
  auto: Boolean
  default: String
  index: Boolean
  nullable: Boolean
  primary: Boolean
  type: String
  unique: Boolean
  generated: String
  constraints: String
) on FIELD_DEFINITION"#;

/// Everything the SQL schema compiler is handed for one run
#[derive(Debug, Clone)]
pub struct CompileRequest {
    /// Directive declaration plus decorated schema
    pub type_defs: String,
    /// Where the type defs are written
    pub output_filepath: PathBuf,
    /// Target database name forwarded to the compiler
    pub database_name: String,
    /// Prefix applied to generated table names
    pub table_prefix: String,
}

/// Prefix the decorated schema with the `@sql` directive declaration
pub fn build_type_defs(decorated_schema: &str) -> String {
    format!("{}\n\n{}", SQL_DIRECTIVE_DECLARATION, decorated_schema)
}

/// Parse the final type defs as GraphQL SDL, so malformed output is caught
/// here rather than inside the downstream compiler.
pub fn validate_type_defs(type_defs: &str) -> Result<(), TypeDefsError> {
    async_graphql_parser::parse_schema(type_defs)
        .map(|_| ())
        .map_err(|e| TypeDefsError::InvalidTypeDefs(e.to_string()))
}

/// Write the type defs to the request's output path, creating parent
/// directories as needed.
pub fn write_type_defs(request: &CompileRequest) -> Result<(), TypeDefsError> {
    if let Some(parent) = request.output_filepath.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| TypeDefsError::Write {
                path: request.output_filepath.clone(),
                source: e,
            })?;
        }
    }
    fs::write(&request.output_filepath, &request.type_defs).map_err(|e| TypeDefsError::Write {
        path: request.output_filepath.clone(),
        source: e,
    })?;
    log::info!(
        "wrote type defs to {} (database '{}', table prefix '{}')",
        request.output_filepath.display(),
        request.database_name,
        request.table_prefix
    );
    Ok(())
}
