//! Domain value types shared by the catalogue and the renderer.

use crate::geo::Coordinates;

/// Stable handle into the catalogue's stop store.
/// Remains valid for the catalogue's lifetime; overwriting a stop by name
/// reuses its handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StopId(pub(crate) usize);

/// A named geographic point of service.
#[derive(Debug, Clone)]
pub struct Stop {
    pub name: String,
    pub coordinates: Coordinates,
}

/// A named, ordered sequence of stops.
/// A linear route is stored as its there-and-back expansion; a roundtrip
/// route is stored exactly as given.
#[derive(Debug, Clone)]
pub struct Route {
    pub name: String,
    pub stops: Vec<StopId>,
    pub is_roundtrip: bool,
}

/// Statistics derived from a route on demand, never cached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteInfo {
    pub stop_count: usize,
    pub unique_stop_count: usize,
    /// Meters, summed over directed distances of consecutive stored pairs.
    pub route_length: f64,
    /// Ratio of `route_length` to the straight/perimeter reference distance.
    pub curvature: f64,
}
