//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::{Route, StationCatalog};

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with search form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub default_threshold: f64,
    pub max_threshold: f64,
    pub lines: Vec<LineSummary>,
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Route results fragment.
#[derive(Template)]
#[template(path = "route_results.html")]
pub struct RouteResultsTemplate {
    pub from: String,
    pub to: String,
    pub threshold: f64,
    pub routes: Vec<RouteView>,
    /// Shown instead of routes when the search has no answer.
    pub message: Option<String>,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Line name and colour for the legend.
#[derive(Debug, Clone)]
pub struct LineSummary {
    pub name: String,
    pub color: String,
    pub station_count: usize,
}

/// Route view model for templates.
#[derive(Debug, Clone)]
pub struct RouteView {
    pub transfers: usize,
    pub segments: Vec<SegmentView>,
}

impl RouteView {
    pub fn from_route(catalog: &StationCatalog, route: &Route) -> Self {
        let segments = route
            .segments()
            .iter()
            .map(|seg| {
                let line = catalog.line(seg.line);
                SegmentView {
                    line: line.name.clone(),
                    color: line.color.to_string(),
                    stations: seg
                        .steps
                        .iter()
                        .map(|s| catalog.station(s.occurrence).name.clone())
                        .collect(),
                }
            })
            .collect();

        Self {
            transfers: route.transfers(),
            segments,
        }
    }

    /// Total stations passed through, counting an interchange once per line.
    pub fn station_count(&self) -> usize {
        self.segments.iter().map(|s| s.stations.len()).sum()
    }
}

/// One line's part of a route.
#[derive(Debug, Clone)]
pub struct SegmentView {
    pub line: String,
    pub color: String,
    pub stations: Vec<String>,
}

impl SegmentView {
    pub fn first(&self) -> &str {
        self.stations.first().map_or("", String::as_str)
    }

    pub fn last(&self) -> &str {
        self.stations.last().map_or("", String::as_str)
    }

    /// Stops after the first, i.e. how far this segment rides.
    pub fn stops(&self) -> usize {
        self.stations.len().saturating_sub(1)
    }
}
