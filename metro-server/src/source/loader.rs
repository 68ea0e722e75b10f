//! Reading a catalog from disk.

use std::path::Path;

use tracing::info;

use crate::domain::StationCatalog;

use super::convert::convert_document;
use super::error::SourceError;
use super::types::CatalogDocument;

/// Parse a catalog from JSON text.
pub fn parse_catalog(json: &str) -> Result<StationCatalog, SourceError> {
    let document: CatalogDocument = serde_json::from_str(json)?;
    convert_document(document)
}

/// Read and parse the catalog file at `path`.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<StationCatalog, SourceError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let catalog = parse_catalog(&json)?;
    info!(
        path = %path.display(),
        lines = catalog.lines().len(),
        stations = catalog.list_station_names().len(),
        "Loaded station catalog"
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r##"{
        "lines": [
            {
                "name": "Inokashira",
                "color": "#00a7db",
                "stations": [
                    { "name": "Shibuya", "lat": 35.658034, "lng": 139.701636 },
                    { "name": "Shinsen", "lat": 35.656003, "lng": 139.692003 }
                ]
            },
            {
                "name": "Yamanote",
                "color": "#9acd32",
                "stations": [
                    { "name": "Shibuya", "lat": 35.658517, "lng": 139.701334 },
                    { "name": "Harajuku", "lat": 35.670168, "lng": 139.702687 }
                ]
            }
        ]
    }"##;

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.lines().len(), 2);
        assert_eq!(catalog.occurrence_count(), 4);
        assert_eq!(
            catalog.list_station_names(),
            vec!["Harajuku", "Shibuya", "Shinsen"]
        );
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        match load_catalog(&path) {
            Err(SourceError::Io { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json() {
        let err = parse_catalog(r#"{ "lines": [ { "name": "A" } ] }"#).unwrap_err();
        assert!(matches!(err, SourceError::Json { .. }));
        assert!(err.to_string().starts_with("JSON parse error"));
    }

    #[test]
    fn duplicate_line_names() {
        let json = r##"{ "lines": [
            { "name": "A", "color": "#000", "stations": [ { "name": "x", "lat": 0, "lng": 0 } ] },
            { "name": "A", "color": "#fff", "stations": [ { "name": "y", "lat": 1, "lng": 1 } ] }
        ] }"##;

        let err = parse_catalog(json).unwrap_err();
        assert_eq!(err.to_string(), "duplicate line name: A");
    }

    #[test]
    fn shipped_catalog_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/lines.json");
        let catalog = load_catalog(path).unwrap();

        assert!(catalog.lines().len() >= 4);
        let names = catalog.list_station_names();
        for name in ["Shibuya", "Shinjuku", "Kichijoji", "Shimo-Kitazawa"] {
            assert!(names.iter().any(|n| n == name), "missing {name}");
        }
    }
}
