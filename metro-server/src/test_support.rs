//! Catalog fixtures shared by unit tests.

use proptest::prelude::*;

use crate::domain::{GeoPoint, Line, LineColor, Station, StationCatalog};

/// Builds a catalog from `(line, [(station, lat, lng)])` tuples.
pub fn catalog(lines: &[(&str, &[(&str, f64, f64)])]) -> StationCatalog {
    let lines = lines
        .iter()
        .map(|(name, stations)| {
            let stations = stations
                .iter()
                .map(|(s, lat, lng)| Station::new(*s, GeoPoint::new(*lat, *lng).unwrap()))
                .collect();
            Line::new(*name, LineColor::parse("#123456").unwrap(), stations)
        })
        .collect();
    StationCatalog::new(lines).unwrap()
}

/// Builds a catalog whose stations are spread 1 km apart along each line,
/// with each line on its own parallel 10 km from the others. Shared names
/// are the only way two lines meet unless the threshold is huge.
pub fn named_catalog(lines: &[(&str, &[&str])]) -> StationCatalog {
    let lines = lines
        .iter()
        .enumerate()
        .map(|(li, (name, stations))| {
            let stations = stations
                .iter()
                .enumerate()
                .map(|(si, s)| {
                    let lat = 35.0 + li as f64 * 0.09;
                    let lng = 139.0 + si as f64 * 0.011;
                    Station::new(*s, GeoPoint::new(lat, lng).unwrap())
                })
                .collect();
            Line::new(*name, LineColor::parse("#123456").unwrap(), stations)
        })
        .collect();
    StationCatalog::new(lines).unwrap()
}

/// Small random catalogs packed into roughly a square kilometre, with
/// names drawn from a tiny pool so that shared names are common.
pub fn arb_catalog() -> impl Strategy<Value = StationCatalog> {
    let station = (0usize..8, 0.0f64..0.01, 0.0f64..0.01);
    let line = prop::collection::vec(station, 1..6);

    prop::collection::vec(line, 1..5).prop_map(|lines| {
        let lines = lines
            .into_iter()
            .enumerate()
            .map(|(li, stations)| {
                let stations = stations
                    .into_iter()
                    .map(|(n, dlat, dlng)| {
                        Station::new(
                            format!("s{n}"),
                            GeoPoint::new(35.0 + dlat, 139.0 + dlng).unwrap(),
                        )
                    })
                    .collect();
                Line::new(format!("L{li}"), LineColor::parse("#000").unwrap(), stations)
            })
            .collect();
        StationCatalog::new(lines).unwrap()
    })
}
