//! Tests for loader module

use super::*;
use crate::config::GeneratorConfig;
use crate::error::Error;
use std::fs;
use std::path::Path;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

// ============================================================================
// Reading Tests
// ============================================================================

#[test]
fn test_read_project_selects_extensions() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "app/metadata/album.hml", "kind: ObjectType\n");
    write(dir.path(), "app/subgraph.yaml", "kind: Subgraph\n");
    write(dir.path(), "globals/config.yml", "kind: GraphqlConfig\n");
    write(dir.path(), "README.md", "# project\n");
    write(dir.path(), "app/connector/schema.json", "{}");

    let files = read_project(dir.path(), &GeneratorConfig::default()).unwrap();
    let names: Vec<_> = files
        .keys()
        .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();
    assert_eq!(
        names,
        vec!["app/metadata/album.hml", "app/subgraph.yaml", "globals/config.yml"]
    );
}

#[test]
fn test_read_project_skips_excluded_dirs() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "app/album.hml", "kind: ObjectType\n");
    write(dir.path(), "node_modules/pkg/types.hml", "kind: ObjectType\n");
    write(dir.path(), "app/node_modules/nested.hml", "kind: ObjectType\n");

    let files = read_project(dir.path(), &GeneratorConfig::default()).unwrap();
    assert_eq!(files.len(), 1);
    assert!(files.keys().all(|p| !p.to_string_lossy().contains("node_modules")));
}

#[test]
fn test_excluded_name_only_applies_to_directories() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "cache.hml", "kind: ObjectType\n");
    write(dir.path(), "cache/inner.hml", "kind: ObjectType\n");

    let config = GeneratorConfig::from_yaml("excluded_dirs: [cache, cache.hml]").unwrap();
    let files = read_project(dir.path(), &config).unwrap();
    assert_eq!(files.len(), 1);
    assert!(files.keys().next().unwrap().ends_with("cache.hml"));
}

#[test]
fn test_read_project_missing_dir() {
    let dir = tempfile::tempdir().unwrap();
    let result = read_project(dir.path().join("missing"), &GeneratorConfig::default());
    assert!(matches!(result, Err(Error::FileNotFound { .. })));
}

#[test]
fn test_read_file_helpers() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "link.hml", "kind: DataConnectorLink\n");

    assert_eq!(
        read_file(dir.path().join("link.hml")).unwrap(),
        "kind: DataConnectorLink\n"
    );
    assert!(matches!(
        read_file(dir.path().join("nope.hml")),
        Err(Error::FileNotFound { .. })
    ));
    assert_eq!(read_optional(dir.path().join("nope.hml")).unwrap(), None);
}

// ============================================================================
// Parsing Tests
// ============================================================================

#[test]
fn test_parse_project_isolates_failures() {
    let mut files = ProjectFiles::new();
    files.insert(
        "good.hml".into(),
        "kind: ObjectType\nversion: v1\ndefinition:\n  name: Album\n".to_string(),
    );
    files.insert(
        "bad.hml".into(),
        "kind: Model\ndefinition: [unclosed\n".to_string(),
    );

    let project = parse_project(&files);
    assert_eq!(project.streams.len(), 1);
    assert_eq!(project.document_count(), 1);
    assert_eq!(project.failures.len(), 1);
    assert_eq!(project.failures[0].path, Path::new("bad.hml"));
    assert!(project.failures[0].message.contains("bad.hml"));
}
