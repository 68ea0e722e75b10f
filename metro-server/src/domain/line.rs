//! Line types: identity, display colour and the ordered station list.

use std::fmt;

use serde::{Serialize, Serializer};

use super::Station;

/// Error returned when parsing an invalid line colour.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid line colour: {reason}")]
pub struct InvalidLineColor {
    reason: &'static str,
}

/// A display colour written as CSS hex, `#rgb` or `#rrggbb`.
///
/// Stored normalised to lowercase `#rrggbb`.
///
/// # Examples
///
/// ```
/// use metro_server::domain::LineColor;
///
/// let c = LineColor::parse("#003F8C").unwrap();
/// assert_eq!(c.as_str(), "#003f8c");
///
/// let short = LineColor::parse("#f0a").unwrap();
/// assert_eq!(short.as_str(), "#ff00aa");
///
/// assert!(LineColor::parse("003f8c").is_err());
/// assert!(LineColor::parse("#00zz8c").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineColor([u8; 7]);

impl LineColor {
    /// Parse a colour from `#rgb` or `#rrggbb`.
    pub fn parse(s: &str) -> Result<Self, InvalidLineColor> {
        let Some(hex) = s.strip_prefix('#') else {
            return Err(InvalidLineColor {
                reason: "must start with '#'",
            });
        };

        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(InvalidLineColor {
                reason: "must contain only hex digits",
            });
        }

        let digits: Vec<u8> = match hex.len() {
            3 => hex.bytes().flat_map(|b| [b, b]).collect(),
            6 => hex.bytes().collect(),
            _ => {
                return Err(InvalidLineColor {
                    reason: "must have 3 or 6 hex digits",
                });
            }
        };

        let mut out = [b'#'; 7];
        for (slot, b) in out[1..].iter_mut().zip(digits) {
            *slot = b.to_ascii_lowercase();
        }
        Ok(LineColor(out))
    }

    /// Returns the colour as `#rrggbb`.
    pub fn as_str(&self) -> &str {
        // Only ASCII '#' and hex digits are ever stored.
        std::str::from_utf8(&self.0).unwrap_or("#000000")
    }
}

impl fmt::Debug for LineColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineColor({})", self.as_str())
    }
}

impl fmt::Display for LineColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LineColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Position of a line in its catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(pub usize);

/// A named, coloured, ordered sequence of stations.
///
/// Order matters: the station at index `i` is adjacent only to `i - 1`
/// and `i + 1`.
#[derive(Debug, Clone)]
pub struct Line {
    pub name: String,
    pub color: LineColor,
    pub stations: Vec<Station>,
}

impl Line {
    /// Creates a line. Emptiness is checked when the catalog is built.
    pub fn new(name: impl Into<String>, color: LineColor, stations: Vec<Station>) -> Self {
        Self {
            name: name.into(),
            color,
            stations,
        }
    }

    /// Number of stations on the line.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Returns true if the line has no stations.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}
