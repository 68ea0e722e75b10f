//! HTTP route handlers.

use std::sync::Arc;

use askama::Template;
use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::cache::ClusterCache;
use crate::domain::{Route, StationCatalog};
use crate::planner::{Planner, SearchError, SearchMode, SearchRequest};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Most stations accepted in one batch request.
const MAX_BATCH_STATIONS: usize = 20;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/stations", get(list_stations))
        .route("/api/stations/search", get(search_stations))
        .route("/api/lines", get(list_lines))
        .route("/route", get(find_route))
        .route("/api/routes/batch", post(batch_routes))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with search form.
async fn index_page(State(state): State<AppState>) -> impl IntoResponse {
    let lines = state
        .catalog
        .lines()
        .iter()
        .map(|l| LineSummary {
            name: l.name.clone(),
            color: l.color.to_string(),
            station_count: l.len(),
        })
        .collect();

    let template = IndexTemplate {
        default_threshold: state.config.default_threshold_m,
        max_threshold: state.config.max_threshold_m,
        lines,
    };

    Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

async fn not_found() -> impl IntoResponse {
    let template = ErrorTemplate {
        title: "Not found".to_string(),
        message: "There is nothing at this address.".to_string(),
    };

    (
        StatusCode::NOT_FOUND,
        Html(
            template
                .render()
                .unwrap_or_else(|e| format!("Template error: {}", e)),
        ),
    )
}

/// All station names, sorted.
async fn list_stations(State(state): State<AppState>) -> Json<StationNamesResponse> {
    Json(StationNamesResponse {
        stations: state.names.all().to_vec(),
    })
}

/// Search station names for autocomplete.
async fn search_stations(
    State(state): State<AppState>,
    Query(req): Query<StationSearchRequest>,
) -> Json<StationNamesResponse> {
    let limit = req.limit.unwrap_or(10).min(50);
    let stations = state
        .names
        .search(&req.q, limit, &req.excluded())
        .into_iter()
        .map(str::to_string)
        .collect();

    Json(StationNamesResponse { stations })
}

/// Every line with its colour and stations.
async fn list_lines(State(state): State<AppState>) -> Json<LinesResponse> {
    let lines = state
        .catalog
        .lines()
        .iter()
        .map(LineResult::from_line)
        .collect();

    Json(LinesResponse { lines })
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

fn parse_mode(mode: Option<&str>) -> Result<SearchMode, AppError> {
    match mode.map(str::trim) {
        None | Some("") => Ok(SearchMode::Single),
        Some(m) => m.parse().map_err(|e: crate::planner::UnknownMode| AppError::BadRequest {
            message: e.to_string(),
        }),
    }
}

fn parse_threshold(threshold: Option<&str>) -> Result<Option<f64>, AppError> {
    match threshold.map(str::trim) {
        None | Some("") => Ok(None),
        Some(t) => t.parse().map(Some).map_err(|_| AppError::BadRequest {
            message: format!("Invalid threshold: {t}"),
        }),
    }
}

/// Run planner work on the blocking pool.
///
/// Searches are CPU-bound and can take a while on a large catalog, so they
/// stay off the async worker threads.
async fn with_planner<T, F>(state: &AppState, f: F) -> Result<T, AppError>
where
    F: for<'p> FnOnce(&Planner<'p, ClusterCache>) -> T + Send + 'static,
    T: Send + 'static,
{
    let catalog = Arc::clone(&state.catalog);
    let clusters = Arc::clone(&state.clusters);
    let config = Arc::clone(&state.config);

    tokio::task::spawn_blocking(move || {
        let planner = Planner::new(&catalog, &*clusters, &config);
        f(&planner)
    })
    .await
    .map_err(|e| AppError::Internal {
        message: format!("search task failed: {e}"),
    })
}

/// Find the route(s) with the fewest transfers between two stations.
async fn find_route(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(req): Query<RouteQuery>,
) -> Result<Response, AppError> {
    let mode = parse_mode(req.mode.as_deref())?;
    let threshold_m =
        parse_threshold(req.threshold.as_deref())?.unwrap_or(state.config.default_threshold_m);

    let from = req.from.trim().to_string();
    let to = req.to.trim().to_string();

    let request = SearchRequest::new(from.clone(), to.clone())
        .with_threshold(threshold_m)
        .with_mode(mode);
    let routes = with_planner(&state, move |planner| planner.search(&request))
        .await?
        .map(|result| result.routes);

    // Return HTML or JSON based on Accept header
    if accepts_html(&headers) {
        let template = results_template(&state.catalog, from, to, threshold_m, routes)?;
        let html = template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;

        Ok(Html(html).into_response())
    } else {
        let outcome = SearchOutcome::from_search(&state.catalog, routes)?;
        Ok(Json(outcome).into_response())
    }
}

fn results_template(
    catalog: &StationCatalog,
    from: String,
    to: String,
    threshold: f64,
    routes: Result<Vec<Route>, SearchError>,
) -> Result<RouteResultsTemplate, AppError> {
    let (routes, message) = match routes {
        Ok(routes) => (
            routes
                .iter()
                .map(|r| RouteView::from_route(catalog, r))
                .collect(),
            None,
        ),
        Err(SearchError::StationNotFound {
            from_found,
            to_found,
        }) => {
            let message = match (from_found, to_found) {
                (false, false) => format!("Unknown stations: {from} and {to}"),
                (false, true) => format!("Unknown station: {from}"),
                _ => format!("Unknown station: {to}"),
            };
            (Vec::new(), Some(message))
        }
        Err(SearchError::NoRouteFound) => (
            Vec::new(),
            Some(format!("No route found from {from} to {to}")),
        ),
        Err(e @ SearchError::InvalidThreshold(_)) => return Err(e.into()),
    };

    Ok(RouteResultsTemplate {
        from,
        to,
        threshold,
        routes,
        message,
    })
}

/// Find routes between every pair of the selected stations.
async fn batch_routes(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: BatchRouteRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "Invalid batch request");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    if req.stations.len() > MAX_BATCH_STATIONS {
        return Err(AppError::BadRequest {
            message: format!("At most {MAX_BATCH_STATIONS} stations per batch"),
        });
    }

    let threshold = req.threshold.unwrap_or(state.config.default_threshold_m);
    let stations = req.stations;
    let pairs = with_planner(&state, move |planner| {
        planner.find_all_pairs(&stations, threshold)
    })
    .await??;

    let pairs = pairs
        .into_iter()
        .map(|pair| PairResult::from_pair(&state.catalog, pair))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(BatchRouteResponse { threshold, pairs }).into_response())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::InvalidThreshold(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        };

        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        } else {
            warn!(%status, %message, "Request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
