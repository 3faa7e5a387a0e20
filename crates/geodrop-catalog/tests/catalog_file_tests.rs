//! Integration tests for loading catalogs from disk

use geodrop_catalog::{CatalogError, TargetCatalog};
use geodrop_domain::{TargetId, TierRadii};
use std::io::Write;
use tempfile::NamedTempFile;

const DCREW_CATALOG: &str = r#"
[defaults]
nearby_m = 50.0
claimable_m = 10.0

[[targets]]
id = "4"
name = "Team DCrew Airdrop 4"
latitude = 12.979025
longitude = 77.728035
reward = "450 DCREW Tokens"
render = { kind = "image", asset = "icons/music_logo.png" }

[[targets]]
id = "5"
name = "Team DCrew Airdrop 5"
latitude = 12.978735
longitude = 77.727962
reward = "550 DCREW Tokens"

[[targets]]
id = "6"
name = "Team DCrew Airdrop 6"
latitude = 12.978783
longitude = 77.728152
reward = "650 DCREW Tokens"
radii = { nearby_m = 20.0, claimable_m = 20.0 }
"#;

fn write_catalog(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_catalog_file() {
    let file = write_catalog(DCREW_CATALOG);
    let catalog = TargetCatalog::from_file(file.path()).unwrap();

    assert_eq!(catalog.len(), 3);
    let ids: Vec<&str> = catalog.targets().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["4", "5", "6"]);

    let six = catalog.get(&TargetId::new("6")).unwrap();
    assert_eq!(six.radii, TierRadii::new(20.0, 20.0));
    let four = catalog.get(&TargetId::new("4")).unwrap();
    assert_eq!(four.radii, TierRadii::new(50.0, 10.0));
}

#[test]
fn test_missing_file() {
    let result = TargetCatalog::from_file("/nonexistent/geodrop/catalog.toml");
    assert!(matches!(result, Err(CatalogError::Io(_))));
}

#[test]
fn test_malformed_toml() {
    let file = write_catalog("[[targets]]\nid = 4\n");
    let result = TargetCatalog::from_file(file.path());
    assert!(matches!(result, Err(CatalogError::Toml(_))));
}

#[test]
fn test_inverted_default_radii_rejected_at_load() {
    let file = write_catalog(
        r#"
        [defaults]
        nearby_m = 10.0
        claimable_m = 50.0

        [[targets]]
        id = "4"
        latitude = 12.979025
        longitude = 77.728035
        "#,
    );
    let result = TargetCatalog::from_file(file.path());
    assert!(matches!(result, Err(CatalogError::RadiusInvariant { .. })));
}
