//! Station and coordinate types.

use std::fmt;

use serde::Serialize;

/// Error returned when a coordinate pair is not a usable position.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid coordinate ({lat}, {lng}): {reason}")]
pub struct InvalidCoordinate {
    lat: f64,
    lng: f64,
    reason: &'static str,
}

/// A WGS84 latitude/longitude pair in degrees.
///
/// Both components are finite and within their geographic range; any
/// `GeoPoint` is valid by construction.
///
/// # Examples
///
/// ```
/// use metro_server::domain::GeoPoint;
///
/// let shibuya = GeoPoint::new(35.658034, 139.701636).unwrap();
/// assert_eq!(shibuya.lat(), 35.658034);
///
/// assert!(GeoPoint::new(f64::NAN, 139.7).is_err());
/// assert!(GeoPoint::new(91.0, 0.0).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    lat: f64,
    lng: f64,
}

impl GeoPoint {
    /// Validate and build a point from degrees.
    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidCoordinate> {
        let invalid = |reason| InvalidCoordinate { lat, lng, reason };

        if !lat.is_finite() || !lng.is_finite() {
            return Err(invalid("coordinates must be finite"));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(invalid("latitude must be within [-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(invalid("longitude must be within [-180, 180]"));
        }

        Ok(Self { lat, lng })
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lng(&self) -> f64 {
        self.lng
    }
}

impl fmt::Debug for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GeoPoint({}, {})", self.lat, self.lng)
    }
}

/// A named point on a line.
///
/// The same name may appear on several lines; that is how an interchange
/// is usually expressed in a catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub name: String,
    pub position: GeoPoint,
}

impl Station {
    /// Creates a station at an already validated position.
    pub fn new(name: impl Into<String>, position: GeoPoint) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_points() {
        assert!(GeoPoint::new(0.0, 0.0).is_ok());
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
        assert!(GeoPoint::new(35.690921, 139.700258).is_ok());
    }

    #[test]
    fn rejects_non_finite() {
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(0.0, f64::INFINITY).is_err());
        assert!(GeoPoint::new(f64::NEG_INFINITY, 0.0).is_err());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(GeoPoint::new(90.5, 0.0).is_err());
        assert!(GeoPoint::new(-91.0, 0.0).is_err());
        assert!(GeoPoint::new(0.0, 180.1).is_err());
        assert!(GeoPoint::new(0.0, -200.0).is_err());
    }

    #[test]
    fn error_display() {
        let err = GeoPoint::new(f64::NAN, 1.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid coordinate (NaN, 1): coordinates must be finite"
        );
    }

    #[test]
    fn debug() {
        let p = GeoPoint::new(1.5, 2.0).unwrap();
        assert_eq!(format!("{:?}", p), "GeoPoint(1.5, 2)");
    }
}
