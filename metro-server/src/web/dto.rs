//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Line, Route, StationCatalog};
use crate::planner::{PairRoutes, SearchError};

/// Query for `/route`.
#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    /// Origin station name
    pub from: String,

    /// Destination station name
    pub to: String,

    /// Clustering threshold in meters; blank means the server default
    pub threshold: Option<String>,

    /// `one` (default) or `all`
    pub mode: Option<String>,
}

/// Request to search station names.
#[derive(Debug, Deserialize)]
pub struct StationSearchRequest {
    /// Search query (substring of the name, any case)
    pub q: String,

    /// Maximum results (default 10, max 50)
    pub limit: Option<usize>,

    /// Comma-separated names to leave out, e.g. already selected stations
    pub exclude: Option<String>,
}

impl StationSearchRequest {
    /// The excluded names, trimmed, without blanks.
    pub fn excluded(&self) -> Vec<String> {
        self.exclude
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Station name list, for both autocomplete and the full list.
#[derive(Debug, Serialize)]
pub struct StationNamesResponse {
    pub stations: Vec<String>,
}

/// A station as listed under its line.
#[derive(Debug, Serialize)]
pub struct StationResult {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

/// A line with its colour and stations in running order.
#[derive(Debug, Serialize)]
pub struct LineResult {
    pub name: String,
    pub color: String,
    pub stations: Vec<StationResult>,
}

impl LineResult {
    pub fn from_line(line: &Line) -> Self {
        Self {
            name: line.name.clone(),
            color: line.color.to_string(),
            stations: line
                .stations
                .iter()
                .map(|s| StationResult {
                    name: s.name.clone(),
                    lat: s.position.lat(),
                    lng: s.position.lng(),
                })
                .collect(),
        }
    }
}

/// Response listing every line.
#[derive(Debug, Serialize)]
pub struct LinesResponse {
    pub lines: Vec<LineResult>,
}

/// Request to search routes between every pair of several stations.
#[derive(Debug, Deserialize)]
pub struct BatchRouteRequest {
    /// Selected station names, in selection order
    pub stations: Vec<String>,

    /// Clustering threshold in meters
    pub threshold: Option<f64>,
}

/// One step of a serialized route.
#[derive(Debug, Clone, Serialize)]
pub struct StepResult {
    pub station_name: String,
    pub lat: f64,
    pub lng: f64,
    /// Name of the line this step is travelled on
    pub line: String,
    pub color: String,
}

/// A run of consecutive steps on one line.
#[derive(Debug, Clone, Serialize)]
pub struct SegmentResult {
    pub line: String,
    pub color: String,
    /// Index of the first step of the segment
    pub start: usize,
    /// Number of steps in the segment
    pub count: usize,
}

/// A route ready for drawing: steps, per-line segments and the step
/// indices worth labelling.
#[derive(Debug, Clone, Serialize)]
pub struct RouteResult {
    pub steps: Vec<StepResult>,
    pub transfers: usize,
    pub segments: Vec<SegmentResult>,
    pub labels: Vec<usize>,
}

impl RouteResult {
    pub fn from_route(catalog: &StationCatalog, route: &Route) -> Self {
        let steps = route
            .steps()
            .iter()
            .map(|step| {
                let station = catalog.station(step.occurrence);
                let line = catalog.line(step.line());
                StepResult {
                    station_name: station.name.clone(),
                    lat: station.position.lat(),
                    lng: station.position.lng(),
                    line: line.name.clone(),
                    color: line.color.to_string(),
                }
            })
            .collect();

        let segments = route
            .segments()
            .iter()
            .map(|seg| {
                let line = catalog.line(seg.line);
                SegmentResult {
                    line: line.name.clone(),
                    color: line.color.to_string(),
                    start: seg.start,
                    count: seg.steps.len(),
                }
            })
            .collect();

        Self {
            steps,
            transfers: route.transfers(),
            segments,
            labels: route.label_indices(),
        }
    }
}

/// Outcome of a route query.
///
/// Unknown stations and unreachable destinations are ordinary answers,
/// not HTTP errors.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchOutcome {
    Ok {
        transfers: usize,
        routes: Vec<RouteResult>,
    },
    StationNotFound {
        from_found: bool,
        to_found: bool,
    },
    NoRouteFound,
}

impl SearchOutcome {
    /// Convert a search result.
    ///
    /// # Errors
    ///
    /// Hands back errors that describe a bad request rather than an answer.
    pub fn from_search(
        catalog: &StationCatalog,
        result: Result<Vec<Route>, SearchError>,
    ) -> Result<Self, SearchError> {
        match result {
            Ok(routes) => Ok(SearchOutcome::Ok {
                transfers: routes.first().map_or(0, Route::transfers),
                routes: routes
                    .iter()
                    .map(|r| RouteResult::from_route(catalog, r))
                    .collect(),
            }),
            Err(SearchError::StationNotFound {
                from_found,
                to_found,
            }) => Ok(SearchOutcome::StationNotFound {
                from_found,
                to_found,
            }),
            Err(SearchError::NoRouteFound) => Ok(SearchOutcome::NoRouteFound),
            Err(e @ SearchError::InvalidThreshold(_)) => Err(e),
        }
    }
}

/// Outcome for one pair of a batch.
#[derive(Debug, Serialize)]
pub struct PairResult {
    pub from: String,
    pub to: String,
    pub result: SearchOutcome,
}

impl PairResult {
    pub fn from_pair(catalog: &StationCatalog, pair: PairRoutes) -> Result<Self, SearchError> {
        Ok(Self {
            result: SearchOutcome::from_search(catalog, pair.outcome)?,
            from: pair.from,
            to: pair.to,
        })
    }
}

/// Response for a batch search.
#[derive(Debug, Serialize)]
pub struct BatchRouteResponse {
    pub threshold: f64,
    pub pairs: Vec<PairResult>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
