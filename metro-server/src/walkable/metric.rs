//! Local planar distance between two positions.

use crate::domain::GeoPoint;

/// Earth's mean radius in meters (IUGG).
pub const EARTH_MEAN_RADIUS_M: f64 = 6_371_008.8;

/// Measures how far apart two positions are, in meters.
///
/// This abstraction allows the cluster builder to be tested with synthetic
/// distances.
pub trait ProximityMetric {
    /// Distance between `a` and `b` in meters.
    fn distance_meters(&self, a: GeoPoint, b: GeoPoint) -> f64;
}

/// Equirectangular projection centred on the pair's mean latitude.
///
/// Accurate to well under a percent over a few kilometres, which is all
/// interchange clustering needs. Not valid for long distances: the error
/// grows with separation and near the poles.
#[derive(Debug, Clone, Copy, Default)]
pub struct Equirectangular;

impl ProximityMetric for Equirectangular {
    fn distance_meters(&self, a: GeoPoint, b: GeoPoint) -> f64 {
        let lat1 = a.lat().to_radians();
        let lat2 = b.lat().to_radians();
        let mean_lat = (lat1 + lat2) / 2.0;

        let x = (b.lng() - a.lng()).to_radians() * mean_lat.cos() * EARTH_MEAN_RADIUS_M;
        let y = (lat2 - lat1) * EARTH_MEAN_RADIUS_M;

        x.hypot(y)
    }
}

impl<M: ProximityMetric + ?Sized> ProximityMetric for &M {
    fn distance_meters(&self, a: GeoPoint, b: GeoPoint) -> f64 {
        (**self).distance_meters(a, b)
    }
}
