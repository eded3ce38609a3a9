//! Map rendering: projects the catalogue's stops onto a canvas and draws
//! routes, stop markers and labels as an SVG document.

mod proj;
mod settings;
mod svg;

pub use proj::Projector;
pub use settings::{Color, Offset, RenderSettings};

use std::collections::HashSet;

use crate::catalogue::Catalogue;
use crate::domain::{Route, Stop, StopId};
use svg::{Label, SvgDocument};

/// Renders a catalogue as an SVG map according to a style configuration.
/// Holds no catalogue data; each call reads the catalogue it is given.
pub struct MapRenderer {
    settings: RenderSettings,
}

impl MapRenderer {
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Produce the full document. Layer order is fixed: route lines, route
    /// labels, stop markers, stop labels.
    pub fn render(&self, catalogue: &Catalogue) -> String {
        let mut doc = SvgDocument::new();

        let stops = used_stops(catalogue);
        if stops.is_empty() {
            return doc.finish();
        }
        let coordinates = stops.iter().map(|stop| stop.coordinates).collect::<Vec<_>>();
        let projector = Projector::new(
            &coordinates,
            self.settings.width,
            self.settings.height,
            self.settings.padding,
        );

        let routes = sorted_routes(catalogue);
        self.draw_route_lines(catalogue, &routes, &projector, &mut doc);
        self.draw_route_labels(catalogue, &routes, &projector, &mut doc);
        self.draw_stop_markers(&stops, &projector, &mut doc);
        self.draw_stop_labels(&stops, &projector, &mut doc);

        doc.finish()
    }

    /// Stroke color for the route at `rank` among rendered routes; the
    /// palette repeats cyclically and an empty palette falls back to black.
    fn route_color(&self, rank: usize) -> String {
        let palette = &self.settings.color_palette;
        if palette.is_empty() {
            "black".to_owned()
        } else {
            palette[rank % palette.len()].to_svg()
        }
    }

    fn draw_route_lines(
        &self,
        catalogue: &Catalogue,
        routes: &[&Route],
        projector: &Projector,
        doc: &mut SvgDocument,
    ) {
        let mut rank = 0;
        for route in routes {
            if route.stops.is_empty() {
                continue;
            }
            let points = route
                .stops
                .iter()
                .map(|&id| catalogue.stop_by_id(id))
                .filter(|stop| !stop.coordinates.is_zero())
                .map(|stop| projector.project(stop.coordinates))
                .collect::<Vec<_>>();
            doc.polyline(&points, &self.route_color(rank), self.settings.line_width);
            rank += 1;
        }
    }

    fn draw_route_labels(
        &self,
        catalogue: &Catalogue,
        routes: &[&Route],
        projector: &Projector,
        doc: &mut SvgDocument,
    ) {
        let underlay = self.settings.underlayer_color.to_svg();
        let mut rank = 0;
        for route in routes {
            if route.stops.is_empty() {
                continue;
            }
            let color = self.route_color(rank);
            rank += 1;

            for id in terminal_stops(route) {
                let stop = catalogue.stop_by_id(id);
                if stop.coordinates.is_zero() {
                    continue;
                }
                let label = Label {
                    position: projector.project(stop.coordinates),
                    offset: self.settings.bus_label_offset,
                    font_size: self.settings.bus_label_font_size,
                    bold: true,
                    text: &route.name,
                };
                doc.text(&label, &underlay, Some((&underlay, self.settings.underlayer_width)));
                doc.text(&label, &color, None);
            }
        }
    }

    fn draw_stop_markers(&self, stops: &[&Stop], projector: &Projector, doc: &mut SvgDocument) {
        for stop in stops {
            doc.circle(projector.project(stop.coordinates), self.settings.stop_radius, "white");
        }
    }

    fn draw_stop_labels(&self, stops: &[&Stop], projector: &Projector, doc: &mut SvgDocument) {
        let underlay = self.settings.underlayer_color.to_svg();
        for stop in stops {
            let label = Label {
                position: projector.project(stop.coordinates),
                offset: self.settings.stop_label_offset,
                font_size: self.settings.stop_label_font_size,
                bold: false,
                text: &stop.name,
            };
            doc.text(&label, &underlay, Some((&underlay, self.settings.underlayer_width)));
            doc.text(&label, "black", None);
        }
    }
}

/// Stops referenced by at least one route and carrying a nonzero coordinate,
/// sorted lexicographically by name. This is both the projector's input set
/// and the marker/label draw list.
fn used_stops(catalogue: &Catalogue) -> Vec<&Stop> {
    let mut ids = HashSet::new();
    for route in catalogue.routes() {
        for &id in &route.stops {
            if !catalogue.stop_by_id(id).coordinates.is_zero() {
                ids.insert(id);
            }
        }
    }
    let mut stops = ids.into_iter().map(|id| catalogue.stop_by_id(id)).collect::<Vec<_>>();
    stops.sort_by(|a, b| a.name.cmp(&b.name));
    stops
}

fn sorted_routes(catalogue: &Catalogue) -> Vec<&Route> {
    let mut routes = catalogue.routes().collect::<Vec<_>>();
    routes.sort_by(|a, b| a.name.cmp(&b.name));
    routes
}

/// Terminals for label placement: a roundtrip route is labelled at its first
/// stop only; a linear route at both original endpoints (one label when they
/// coincide). The second terminal sits at the midpoint of the stored
/// there-and-back sequence.
fn terminal_stops(route: &Route) -> Vec<StopId> {
    let mut terminals = vec![route.stops[0]];
    if !route.is_roundtrip {
        let original_len = (route.stops.len() + 1) / 2;
        if original_len > 1 && route.stops[original_len - 1] != route.stops[0] {
            terminals.push(route.stops[original_len - 1]);
        }
    }
    terminals
}
