//! Map lat/lng onto the padded canvas, preserving aspect ratio.

use geo::Coord;

use crate::geo::Coordinates;

const EPSILON: f64 = 1e-6;

/// Scale-and-offset transform from geocoordinates to canvas pixels.
///
/// Built once per render pass from the exact point set it will project;
/// a different point set needs a fresh projector.
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    padding: f64,
    min_lng: f64,
    max_lat: f64,
    zoom: f64,
}

impl Projector {
    /// `width`, `height` and `padding` come straight from the render settings.
    /// An axis whose coordinate span is zero contributes no zoom factor; if
    /// both spans are zero the zoom is 0 and every point lands on the padded
    /// corner.
    pub fn new(points: &[Coordinates], width: f64, height: f64, padding: f64) -> Self {
        let mut projector = Self { padding, min_lng: 0.0, max_lat: 0.0, zoom: 0.0 };
        if points.is_empty() {
            return projector;
        }

        let (mut min_lng, mut max_lng) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut min_lat, mut max_lat) = (f64::INFINITY, f64::NEG_INFINITY);
        for point in points {
            min_lng = min_lng.min(point.lng);
            max_lng = max_lng.max(point.lng);
            min_lat = min_lat.min(point.lat);
            max_lat = max_lat.max(point.lat);
        }
        projector.min_lng = min_lng;
        projector.max_lat = max_lat;

        let width_zoom = (max_lng - min_lng > EPSILON)
            .then(|| (width - 2.0 * padding) / (max_lng - min_lng));
        let height_zoom = (max_lat - min_lat > EPSILON)
            .then(|| (height - 2.0 * padding) / (max_lat - min_lat));

        projector.zoom = match (width_zoom, height_zoom) {
            (Some(w), Some(h)) => w.min(h),
            (Some(w), None) => w,
            (None, Some(h)) => h,
            (None, None) => 0.0,
        };
        projector
    }

    /// Project a geographic position to canvas pixels (y grows downward).
    pub fn project(&self, coords: Coordinates) -> Coord<f64> {
        Coord {
            x: (coords.lng - self.min_lng) * self.zoom + self.padding,
            y: (self.max_lat - coords.lat) * self.zoom + self.padding,
        }
    }
}
