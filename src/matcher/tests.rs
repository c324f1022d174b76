//! Tests for matcher module

use super::*;
use crate::classify::Sourced;
use crate::document::{DataConnectorLinkDef, ObjectTypeDef};

fn object_type(yaml: &str) -> Sourced<ObjectTypeDef> {
    Sourced::new("types.hml", serde_yaml::from_str(yaml).unwrap())
}

fn link(file: &str, name: &str, object_types: &str) -> Sourced<DataConnectorLinkDef> {
    let yaml = format!("name: {name}\nschema:\n  schema:\n    object_types: {object_types}\n");
    Sourced::new(file, serde_yaml::from_str(&yaml).unwrap())
}

#[test]
fn test_match_by_comparison_key() {
    let types = vec![
        object_type("name: AlbumTracks\nfields: []"),
        object_type("name: Artist\nfields: []"),
    ];
    let links = vec![link("chinook.hml", "chinook", "{ album_tracks: {}, artist: {} }")];

    let outcome = match_object_types(&types, &links);
    assert_eq!(outcome.table.len(), 2);

    let matched = outcome.table.get("albumtracks").unwrap();
    assert_eq!(matched.object_type.name, "AlbumTracks");
    assert_eq!(matched.connector_type.name, "album_tracks");
    assert_eq!(matched.source.link, "chinook");
    assert!(outcome.unmatched.is_empty());
}

#[test]
fn test_unmatched_is_reported_not_fatal() {
    let types = vec![object_type("name: Album\nfields: []")];
    let links = vec![link("chinook.hml", "chinook", "[Album, invoices]")];

    let outcome = match_object_types(&types, &links);
    assert_eq!(outcome.table.len(), 1);
    assert_eq!(outcome.unmatched, vec!["invoices".to_string()]);
}

#[test]
fn test_first_link_wins_in_path_order() {
    let types = vec![object_type("name: Album\nfields: []")];
    // Declared out of order; b.hml must lose to a.hml
    let links = vec![
        link("b.hml", "second", "[album]"),
        link("a.hml", "first", "[ALBUM]"),
    ];

    let outcome = match_object_types(&types, &links);
    let matched = outcome.table.get("album").unwrap();
    assert_eq!(matched.source.link, "first");
    assert_eq!(matched.connector_type.name, "ALBUM");

    assert_eq!(outcome.duplicates.len(), 1);
    assert_eq!(outcome.duplicates[0].kept.link, "first");
    assert_eq!(outcome.duplicates[0].dropped.link, "second");
}

#[test]
fn test_explicit_type_mapping_wins() {
    let types = vec![object_type(
        r#"
name: Album
fields: []
dataConnectorTypeMapping:
  - dataConnectorName: chinook
    dataConnectorObjectType: albums
"#,
    )];
    let links = vec![link("chinook.hml", "chinook", "[albums]")];

    let outcome = match_object_types(&types, &links);
    let matched = outcome
        .table
        .iter()
        .find(|m| m.object_type.name == "Album")
        .unwrap();
    assert_eq!(matched.key, "album");
    assert_eq!(matched.connector_type.name, "albums");
}

#[test]
fn test_shadowed_local_types() {
    let types = vec![
        object_type("name: album_tracks\nfields: []"),
        object_type("name: AlbumTracks\nfields: []"),
    ];
    let links = vec![link("chinook.hml", "chinook", "[AlbumTracks]")];

    let outcome = match_object_types(&types, &links);
    assert_eq!(outcome.shadowed, vec!["AlbumTracks".to_string()]);
    assert_eq!(
        outcome.table.get("albumtracks").unwrap().object_type.name,
        "album_tracks"
    );
}

#[test]
fn test_malformed_entries_are_skipped() {
    let types = vec![object_type("name: Album\nfields: []")];
    let links = vec![link("chinook.hml", "chinook", "[42, { fields: {} }, Album]")];

    let outcome = match_object_types(&types, &links);
    assert_eq!(outcome.table.len(), 1);
    assert!(outcome.unmatched.is_empty());
}

#[test]
fn test_table_iterates_sorted_by_key() {
    let types = vec![
        object_type("name: Track\nfields: []"),
        object_type("name: Album\nfields: []"),
        object_type("name: Genre\nfields: []"),
    ];
    let links = vec![link("chinook.hml", "chinook", "[Track, Genre, Album]")];

    let outcome = match_object_types(&types, &links);
    let names: Vec<_> = outcome
        .table
        .iter()
        .map(|m| m.object_type.name.as_str())
        .collect();
    assert_eq!(names, vec!["Album", "Genre", "Track"]);
}
