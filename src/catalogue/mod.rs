//! The transport catalogue: single source of truth for the network and its
//! derived statistics.
//!
//! Stops and routes live in two keyed stores; routes reference stops through
//! stable handles. The stop→routes mapping is a cache with an explicit
//! validity flag: invalidated eagerly on any stop or route mutation, rebuilt
//! lazily and in full on the next read, never partially updated.

mod store;

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use anyhow::{bail, Result};

use crate::domain::{Route, RouteInfo, Stop, StopId};
use crate::geo::{self, Coordinates};
use store::Store;

/// What to do with a route stop name that is missing from the stop table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingStopPolicy {
    /// Drop the name without a trace (historical behavior).
    Skip,
    /// Drop the name and report it on stderr.
    #[default]
    Warn,
    /// Fail the route insertion.
    Reject,
}

#[derive(Debug, Default)]
struct StopRoutesCache {
    valid: bool,
    routes_by_stop: HashMap<String, Vec<String>>,
}

pub struct Catalogue {
    stops: Store<Stop>,
    routes: Store<Route>,
    // from -> (to -> meters); directed, (A,B) and (B,A) independent
    distances: HashMap<String, HashMap<String, f64>>,
    cache: RefCell<StopRoutesCache>,
    missing_stop_policy: MissingStopPolicy,
}

impl Default for Catalogue {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalogue {
    pub fn new() -> Self {
        Self {
            stops: Store::new(),
            routes: Store::new(),
            distances: HashMap::new(),
            cache: RefCell::new(StopRoutesCache::default()),
            missing_stop_policy: MissingStopPolicy::default(),
        }
    }

    pub fn with_missing_stop_policy(policy: MissingStopPolicy) -> Self {
        Self { missing_stop_policy: policy, ..Self::new() }
    }

    fn invalidate_cache(&self) {
        self.cache.borrow_mut().valid = false;
    }

    /// Bulk-insert stops; a repeated name overwrites the earlier entry.
    pub fn add_stops<I>(&mut self, stops: I)
    where
        I: IntoIterator<Item = (String, Coordinates)>,
    {
        for (name, coordinates) in stops {
            let stop = Stop { name: name.clone(), coordinates };
            self.stops.insert(&name, stop);
        }
        self.invalidate_cache();
    }

    /// Bulk-insert directed distance entries; a repeated (from, to) pair
    /// overwrites. Does not touch the stop→routes cache.
    pub fn add_distances<I>(&mut self, distances: I)
    where
        I: IntoIterator<Item = (String, String, f64)>,
    {
        for (from, to, meters) in distances {
            self.distances.entry(from).or_default().insert(to, meters);
        }
    }

    /// Insert a route. A linear route is stored as the forward path followed
    /// by the reverse of all but its last stop; a roundtrip route is stored
    /// verbatim. Unknown stop names are handled per the missing-stop policy.
    pub fn add_route(&mut self, name: &str, stop_names: &[String], is_roundtrip: bool) -> Result<()> {
        let mut stops = Vec::with_capacity(stop_names.len() * 2);
        for stop_name in stop_names {
            match self.stops.id(stop_name) {
                Some(id) => stops.push(StopId(id)),
                None => match self.missing_stop_policy {
                    MissingStopPolicy::Skip => {}
                    MissingStopPolicy::Warn => {
                        eprintln!("[catalogue] route '{name}' references unknown stop '{stop_name}'; dropped");
                    }
                    MissingStopPolicy::Reject => {
                        bail!("route '{name}' references unknown stop '{stop_name}'");
                    }
                },
            }
        }
        if !is_roundtrip && stop_names.len() > 1 {
            for stop_name in stop_names[..stop_names.len() - 1].iter().rev() {
                if let Some(id) = self.stops.id(stop_name) {
                    stops.push(StopId(id));
                }
            }
        }

        let route = Route { name: name.to_owned(), stops, is_roundtrip };
        self.routes.insert(name, route);
        self.invalidate_cache();
        Ok(())
    }

    /// O(1) stop lookup.
    pub fn stop(&self, name: &str) -> Option<&Stop> {
        self.stops.get_by_name(name)
    }

    pub fn route_exists(&self, name: &str) -> bool {
        self.routes.exists(name)
    }

    /// Resolve a handle taken from a route's stop sequence.
    #[inline]
    pub fn stop_by_id(&self, id: StopId) -> &Stop {
        self.stops.get(id.0)
    }

    /// Iterator over all routes in insertion order.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    /// Road distance from `from` to `to` in meters. Resolution order: exact
    /// directed entry, reverse directed entry, great-circle fallback between
    /// the stops' coordinates, 0 if either stop is unknown.
    pub fn distance(&self, from: &str, to: &str) -> f64 {
        if let Some(meters) = self.distances.get(from).and_then(|m| m.get(to)) {
            return *meters;
        }
        if let Some(meters) = self.distances.get(to).and_then(|m| m.get(from)) {
            return *meters;
        }
        match (self.stop(from), self.stop(to)) {
            (Some(a), Some(b)) => geo::distance(a.coordinates, b.coordinates),
            _ => 0.0,
        }
    }

    /// Derived statistics for a route, or `None` for an unknown name.
    /// A route with fewer than 2 stored stops has length 0 and curvature 1.
    pub fn route_info(&self, name: &str) -> Option<RouteInfo> {
        let route = self.routes.get_by_name(name)?;

        let stop_count = route.stops.len();
        let unique_stop_count = route.stops.iter().collect::<HashSet<_>>().len();
        if stop_count < 2 {
            return Some(RouteInfo { stop_count, unique_stop_count, route_length: 0.0, curvature: 1.0 });
        }

        let mut route_length = 0.0;
        for pair in route.stops.windows(2) {
            let from = self.stops.get(pair[0].0);
            let to = self.stops.get(pair[1].0);
            route_length += self.distance(&from.name, &to.name);
        }

        let reference = if route.is_roundtrip {
            // Perimeter of the stored loop.
            route.stops
                .windows(2)
                .map(|pair| {
                    geo::distance(
                        self.stops.get(pair[0].0).coordinates,
                        self.stops.get(pair[1].0).coordinates,
                    )
                })
                .sum()
        } else {
            // The stored sequence of a linear route ends where it started, so
            // the straight-line reference runs between the original terminals:
            // the first stop and the midpoint of the there-and-back expansion.
            let first = route.stops[0];
            let last = route.stops[(stop_count + 1) / 2 - 1];
            geo::distance(self.stops.get(first.0).coordinates, self.stops.get(last.0).coordinates)
        };

        let curvature = if reference > 0.0 { route_length / reference } else { 1.0 };
        Some(RouteInfo { stop_count, unique_stop_count, route_length, curvature })
    }

    /// Sorted, deduplicated names of routes visiting `name`, via the cache.
    /// `None` for an unknown stop; an empty list for a known stop no route
    /// visits.
    pub fn stop_routes(&self, name: &str) -> Option<Vec<String>> {
        if !self.stops.exists(name) {
            return None;
        }
        self.update_cache();
        let cache = self.cache.borrow();
        Some(cache.routes_by_stop.get(name).cloned().unwrap_or_default())
    }

    fn update_cache(&self) {
        let mut cache = self.cache.borrow_mut();
        if cache.valid {
            return;
        }

        cache.routes_by_stop.clear();
        for route in self.routes.iter() {
            for stop_id in &route.stops {
                let stop = self.stops.get(stop_id.0);
                cache
                    .routes_by_stop
                    .entry(stop.name.clone())
                    .or_default()
                    .push(route.name.clone());
            }
        }
        for routes in cache.routes_by_stop.values_mut() {
            routes.sort_unstable();
            routes.dedup();
        }
        cache.valid = true;
    }
}
