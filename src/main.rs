use anyhow::Context;
use clap::Parser;
use gql_sql_annotate::directive_map::ConversionMap;
use gql_sql_annotate::{config, rewriter, type_defs};
use std::fs;
use std::path::PathBuf;

/// Built-in sample schema, used when no schema file is given
const SAMPLE_SCHEMA: &str = r#"
  type User {
    id: ID!,
    name: String,
    email: String,
    posts: [Post]
  }

  type Post {
    id: ID!
  }
"#;

/// gql-sql-annotate - decorate a GraphQL schema with @sql directives
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// GraphQL schema file to annotate (built-in sample schema when omitted)
    schema: Option<PathBuf>,

    /// YAML conversion map (ID/String reference map when omitted)
    #[arg(long)]
    map: Option<PathBuf>,

    /// Output path for the generated type defs
    #[arg(long, default_value = "schema.typedefs.graphql")]
    output: PathBuf,

    /// Database name forwarded to the SQL schema compiler
    #[arg(long, default_value = "dbname")]
    database_name: String,

    /// Prefix applied to generated table names
    #[arg(long, default_value = "test_")]
    table_prefix: String,

    /// Syntax-check the final type defs before writing them
    #[arg(long)]
    validate_schema: bool,

    /// Print the generated type defs to stdout
    #[arg(long)]
    print: bool,
}

impl From<&Cli> for config::CliConfig {
    fn from(cli: &Cli) -> Self {
        config::CliConfig {
            output_filepath: cli.output.clone(),
            database_name: cli.database_name.clone(),
            table_prefix: cli.table_prefix.clone(),
            validate_schema: cli.validate_schema,
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize logger - defaults to INFO level, can be overridden with RUST_LOG env var
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = config::JobConfig::from_cli((&cli).into())?;

    let schema = match &cli.schema {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read schema file '{}'", path.display()))?,
        None => SAMPLE_SCHEMA.to_string(),
    };

    let map = match &cli.map {
        Some(path) => ConversionMap::from_yaml_file(path)?,
        None => ConversionMap::default_map(),
    };

    let result = rewriter::map_identifiers_to_directives(&schema, &map);
    log::info!(
        "rewrote {} of {} mapped scalar(s): {:?}",
        result.rewritten.len(),
        map.len(),
        result.rewritten
    );

    let request = type_defs::CompileRequest {
        type_defs: type_defs::build_type_defs(&result.schema),
        output_filepath: config.output_filepath.clone(),
        database_name: config.database_name.clone(),
        table_prefix: config.table_prefix.clone(),
    };

    if config.validate_schema {
        type_defs::validate_type_defs(&request.type_defs)?;
        log::info!("type defs passed GraphQL syntax check");
    }

    type_defs::write_type_defs(&request)?;

    if cli.print {
        println!("{}", request.type_defs);
    }

    Ok(())
}
