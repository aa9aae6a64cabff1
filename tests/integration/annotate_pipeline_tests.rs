//! End-to-end pipeline tests: rewrite a schema with a conversion map, build
//! the type defs and write them out.

use gql_sql_annotate::directive_map::ConversionMap;
use gql_sql_annotate::rewriter::map_identifiers_to_directives;
use gql_sql_annotate::type_defs::{
    build_type_defs, validate_type_defs, write_type_defs, CompileRequest,
};

const USER_SCHEMA: &str = r#"
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

#[test]
fn test_user_schema_annotation() {
    let map = ConversionMap::default_map();
    let result = map_identifiers_to_directives(USER_SCHEMA, &map);

    // ID! on the id field becomes a non-nullable auto primary key
    assert!(result
        .schema
        .contains("id: Int @sql(primary: true, auto: true, nullable: false)"));
    // The first String occurrence (name) becomes a nullable TEXT column
    assert!(result
        .schema
        .contains("name: String @sql(type: \"TEXT\", nullable: true)"));
    // Only the first occurrence per identifier is converted
    assert!(!result.schema.contains("email: String @sql"));
    assert!(result.schema.contains("email: String"));
    // Unmapped references are untouched
    assert!(result.schema.contains("posts: [Post]"));

    assert_eq!(result.rewritten, vec!["ID".to_string(), "String".to_string()]);
}

#[test]
fn test_annotated_type_defs_are_valid_graphql() {
    let map = ConversionMap::default_map();
    let result = map_identifiers_to_directives(USER_SCHEMA, &map);
    let type_defs = build_type_defs(&result.schema);

    validate_type_defs(&type_defs).expect("decorated schema parses as SDL");
}

#[test]
fn test_yaml_map_drives_pipeline() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let map_path = dir.path().join("map.yaml");
    std::fs::write(
        &map_path,
        r#"
rules:
  - scalar: UUID
    base_type: String
    directives:
      type: "BINARY(16)"
      index: true
"#,
    )?;

    let map = ConversionMap::from_yaml_file(&map_path)?;
    let result = map_identifiers_to_directives("type Session { token: UUID! }", &map);
    assert!(result
        .schema
        .contains("token: String @sql(type: \"BINARY(16)\", index: true, nullable: false)"));
    Ok(())
}

#[test]
fn test_pipeline_writes_type_defs_file() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let output = dir.path().join("schema.typedefs.graphql");

    let map = ConversionMap::default_map();
    let result = map_identifiers_to_directives(USER_SCHEMA, &map);
    let request = CompileRequest {
        type_defs: build_type_defs(&result.schema),
        output_filepath: output.clone(),
        database_name: "dbname".to_string(),
        table_prefix: "test_".to_string(),
    };
    write_type_defs(&request)?;

    let written = std::fs::read_to_string(&output)?;
    assert!(written.starts_with("directive @sql("));
    assert!(written.contains("id: Int @sql(primary: true, auto: true, nullable: false)"));
    Ok(())
}
