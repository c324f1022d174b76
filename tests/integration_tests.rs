//! Integration tests on on-disk projects
//!
//! Tests the full end-to-end flow: HML files → CLI runner → rewritten files

use clap::Parser;
use hml_expressions::cli::{Cli, Runner};
use hml_expressions::document::DocumentStream;
use hml_expressions::{DocumentKind, Error};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CONNECTOR: &str = r#"kind: Connector
version: v2
definition:
  name: chinook
  subgraph: app
---
kind: DataConnectorLink
version: v1
definition:
  name: chinook
  url:
    readWriteUrls:
      read:
        valueFromEnv: APP_CHINOOK_READ_URL
      write:
        valueFromEnv: APP_CHINOOK_WRITE_URL
  schema:
    version: v0.1
    schema:
      scalar_types:
        int4:
          aggregate_functions:
            avg:
              result_type: { type: named, name: numeric }
            max: { type: max }
            count:
              result_type: { type: named, name: int8 }
          comparison_operators:
            _eq: { type: equal }
            _gt:
              type: custom
              argument_type: { type: named, name: int4 }
        int8:
          aggregate_functions: {}
          comparison_operators:
            _eq: { type: equal }
        numeric:
          aggregate_functions: {}
          comparison_operators:
            _eq: { type: equal }
        varchar:
          aggregate_functions:
            max: { type: max }
          comparison_operators:
            _eq: { type: equal }
            _like:
              type: custom
              argument_type: { type: named, name: varchar }
      object_types:
        artist: { fields: {} }
        album: { fields: {} }
"#;

const TYPES: &str = r#"---
kind: ScalarType
version: v1
definition:
  name: Int4
  graphql:
    typeName: App_Int4
---
kind: DataConnectorScalarRepresentation
version: v1
definition:
  dataConnectorName: chinook
  dataConnectorScalarType: int4
  representation: Int4
---
kind: DataConnectorScalarRepresentation
version: v1
definition:
  dataConnectorName: chinook
  dataConnectorScalarType: varchar
  representation: String
"#;

const ARTISTS: &str = r#"---
kind: ObjectType
version: v1
definition:
  name: Artist
  fields:
    - name: artistId
      type: Int4!
    - name: name
      type: String
---
kind: Model
version: v1
definition:
  name: Artist
  objectType: Artist
  source:
    dataConnectorName: chinook
    collection: artist
  graphql:
    selectMany:
      queryRootField: artist
"#;

const ALBUMS: &str = r#"---
kind: ObjectType
version: v1
definition:
  name: Album
  fields:
    - name: albumId
      type: Int4!
    - name: title
      type: String!
    - name: artist
      type: Artist
    - name: ratings
      type: "[Int4!]"
---
kind: ObjectBooleanExpressionType
version: v1
definition:
  name: AlbumBoolExpLegacy
  objectType: Album
---
kind: Model
version: v1
definition:
  name: Album
  objectType: Album
  filterExpressionType: AlbumBoolExpLegacy
  source:
    dataConnectorName: chinook
    collection: album
"#;

const GRAPHQL_CONFIG: &str = r#"kind: GraphqlConfig
version: v1
definition:
  query:
    rootOperationTypeName: Query
    argumentsInput:
      fieldName: args
  mutation:
    rootOperationTypeName: Mutation
"#;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).unwrap()
}

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "app/connector/chinook/connector.hml", CONNECTOR);
    write(root, "app/metadata/chinook-types.hml", TYPES);
    write(root, "app/metadata/Artist.hml", ARTISTS);
    write(root, "app/metadata/Album.hml", ALBUMS);
    write(root, "globals/metadata/graphql-config.hml", GRAPHQL_CONFIG);
    // Never read
    write(
        root,
        "app/node_modules/pkg/broken.hml",
        "kind: [this is not yaml\n",
    );
    dir
}

fn run(args: &[&str]) {
    let cli = Cli::parse_from(std::iter::once("hml-expressions").chain(args.iter().copied()));
    Runner::new(cli).run().unwrap();
}

fn run_boolean(root: &Path, extra: &[&str]) {
    let project = root.join("app");
    let output = root.join("app/metadata/boolean-expressions.hml");
    let mut args = extra.to_vec();
    args.extend([
        "boolean",
        "--project-path",
        project.to_str().unwrap(),
        "--output-file",
        output.to_str().unwrap(),
    ]);
    run(&args);
}

fn run_aggregate(root: &Path) {
    let path = |relative: &str| root.join(relative).to_str().unwrap().to_string();
    let models = format!(
        "{},{}",
        path("app/metadata/Artist.hml"),
        path("app/metadata/Album.hml")
    );
    run(&[
        "aggregate",
        "--data-connector-link",
        &path("app/connector/chinook/connector.hml"),
        "--data-connector-link-types",
        &path("app/metadata/chinook-types.hml"),
        "--models",
        &models,
        "--output-file",
        &path("app/metadata/aggregate-expressions.hml"),
        "--graphql-config",
        &path("globals/metadata/graphql-config.hml"),
    ]);
}

fn names(content: &str, kind: DocumentKind) -> Vec<String> {
    DocumentStream::parse(content, "out.hml")
        .unwrap()
        .documents_of(&kind)
        .filter_map(|d| d.name().map(str::to_string))
        .collect()
}

fn model_field(content: &str, field: &str) -> serde_yaml::Value {
    let stream = DocumentStream::parse(content, "model.hml").unwrap();
    let model = stream.documents_of(&DocumentKind::Model).next().unwrap();
    model.definition().unwrap()[field].clone()
}

// ============================================================================
// Boolean Pass
// ============================================================================

#[test]
fn test_boolean_generates_and_rewires_models() {
    let dir = project();
    let root = dir.path();
    run_boolean(root, &[]);

    let output = read(root, "app/metadata/boolean-expressions.hml");
    let generated = names(&output, DocumentKind::BooleanExpressionType);
    assert!(generated.contains(&"AlbumBoolExp".to_string()));
    assert!(generated.contains(&"ArtistBoolExp".to_string()));

    let albums = read(root, "app/metadata/Album.hml");
    assert!(names(&albums, DocumentKind::ObjectBooleanExpressionType).is_empty());
    assert_eq!(model_field(&albums, "filterExpressionType"), "AlbumBoolExp");

    let artists = read(root, "app/metadata/Artist.hml");
    assert_eq!(model_field(&artists, "filterExpressionType"), "ArtistBoolExp");

    // Files without anything to change keep their exact bytes
    assert_eq!(read(root, "app/metadata/chinook-types.hml"), TYPES);
    assert_eq!(read(root, "app/connector/chinook/connector.hml"), CONNECTOR);
}

#[test]
fn test_boolean_second_run_changes_nothing() {
    let dir = project();
    let root = dir.path();
    run_boolean(root, &[]);
    let output = read(root, "app/metadata/boolean-expressions.hml");
    let albums = read(root, "app/metadata/Album.hml");

    run_boolean(root, &[]);
    assert_eq!(read(root, "app/metadata/boolean-expressions.hml"), output);
    assert_eq!(read(root, "app/metadata/Album.hml"), albums);
}

#[test]
fn test_boolean_dry_run_writes_nothing() {
    let dir = project();
    let root = dir.path();
    run_boolean(root, &["--dry-run"]);

    assert!(!root.join("app/metadata/boolean-expressions.hml").exists());
    assert_eq!(read(root, "app/metadata/Album.hml"), ALBUMS);
}

#[test]
fn test_boolean_with_config_file() {
    let dir = project();
    let root = dir.path();
    write(root, "generator.yaml", "boolean_suffix: Filter\n");
    let config = root.join("generator.yaml");
    run_boolean(root, &["--config", config.to_str().unwrap()]);

    let output = read(root, "app/metadata/boolean-expressions.hml");
    let generated = names(&output, DocumentKind::BooleanExpressionType);
    assert!(generated.contains(&"AlbumFilter".to_string()));
}

// ============================================================================
// Aggregate Pass
// ============================================================================

#[test]
fn test_aggregate_generates_expressions_and_config() {
    let dir = project();
    let root = dir.path();
    run_aggregate(root);

    let output = read(root, "app/metadata/aggregate-expressions.hml");
    let generated = names(&output, DocumentKind::AggregateExpression);
    assert!(generated.contains(&"Int4_aggregate_exp".to_string()));
    assert!(generated.contains(&"Album_aggregate_exp".to_string()));
    assert!(generated.contains(&"Artist_aggregate_exp".to_string()));

    let albums = read(root, "app/metadata/Album.hml");
    assert_eq!(model_field(&albums, "aggregateExpression"), "Album_aggregate_exp");

    let types = read(root, "app/metadata/chinook-types.hml");
    assert!(types.starts_with(TYPES));
    let declared = names(&types, DocumentKind::ScalarType);
    assert!(declared.contains(&"Int8".to_string()));
    assert!(declared.contains(&"Numeric".to_string()));

    let graphql = read(root, "globals/metadata/graphql-config.hml");
    assert!(graphql.contains("countDistinctFieldName: _count_distinct"));
    assert!(graphql.contains("fieldName: args"));
}

#[test]
fn test_aggregate_second_run_changes_nothing() {
    let dir = project();
    let root = dir.path();
    run_aggregate(root);
    let snapshot: Vec<String> = [
        "app/metadata/aggregate-expressions.hml",
        "app/metadata/chinook-types.hml",
        "app/metadata/Album.hml",
        "app/metadata/Artist.hml",
        "globals/metadata/graphql-config.hml",
    ]
    .iter()
    .map(|p| read(root, p))
    .collect();

    run_aggregate(root);
    let again: Vec<String> = [
        "app/metadata/aggregate-expressions.hml",
        "app/metadata/chinook-types.hml",
        "app/metadata/Album.hml",
        "app/metadata/Artist.hml",
        "globals/metadata/graphql-config.hml",
    ]
    .iter()
    .map(|p| read(root, p))
    .collect();
    assert_eq!(again, snapshot);
}

#[test]
fn test_passes_compose() {
    let dir = project();
    let root = dir.path();
    run_boolean(root, &[]);
    run_aggregate(root);
    let albums = read(root, "app/metadata/Album.hml");

    run_boolean(root, &[]);
    run_aggregate(root);
    assert_eq!(read(root, "app/metadata/Album.hml"), albums);
    assert_eq!(model_field(&albums, "filterExpressionType"), "AlbumBoolExp");
    assert_eq!(model_field(&albums, "aggregateExpression"), "Album_aggregate_exp");
}

#[test]
fn test_aggregate_without_link_fails() {
    let dir = project();
    let root = dir.path();
    write(root, "app/connector/chinook/connector.hml", TYPES);

    let path = |relative: &str| root.join(relative).to_str().unwrap().to_string();
    let cli = Cli::parse_from([
        "hml-expressions".to_string(),
        "aggregate".to_string(),
        "--data-connector-link".to_string(),
        path("app/connector/chinook/connector.hml"),
        "--data-connector-link-types".to_string(),
        path("app/metadata/chinook-types.hml"),
        "--models".to_string(),
        path("app/metadata/Album.hml"),
        "--output-file".to_string(),
        path("app/metadata/aggregate-expressions.hml"),
        "--graphql-config".to_string(),
        path("globals/metadata/graphql-config.hml"),
    ]);
    let err = Runner::new(cli).run().unwrap_err();
    assert!(matches!(err, Error::MissingLink { .. }));
    assert!(!root.join("app/metadata/aggregate-expressions.hml").exists());
}
