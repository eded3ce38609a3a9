//! Spherical geometry on raw lat/lng degrees.

/// Mean Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A geographic position in double-precision degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// True for the (0, 0) placeholder of a stop that never received real coordinates.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.lat == 0.0 && self.lng == 0.0
    }
}

/// Great-circle distance between two positions in meters (haversine form).
/// Symmetric within floating-point tolerance.
pub fn distance(a: Coordinates, b: Coordinates) -> f64 {
    if a == b {
        return 0.0;
    }
    let (lat_a, lat_b) = (a.lat.to_radians(), b.lat.to_radians());
    let half_dlat = (lat_b - lat_a) / 2.0;
    let half_dlng = (b.lng - a.lng).to_radians() / 2.0;
    let h = half_dlat.sin().powi(2) + lat_a.cos() * lat_b.cos() * half_dlng.sin().powi(2);
    2.0 * h.sqrt().asin() * EARTH_RADIUS_M
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{distance, Coordinates};

    #[test]
    fn zero_for_identical_points() {
        let point = Coordinates::new(55.611087, 37.20829);
        assert_eq!(distance(point, point), 0.0);
    }

    #[test]
    fn symmetric() {
        let a = Coordinates::new(55.611087, 37.20829);
        let b = Coordinates::new(55.632761, 37.333324);
        assert_relative_eq!(distance(a, b), distance(b, a), max_relative = 1e-12);
    }

    #[test]
    fn nearby_stops_moscow() {
        // ~1.7 km mostly north-south.
        let a = Coordinates::new(55.611087, 37.20829);
        let b = Coordinates::new(55.595884, 37.209755);
        let meters = distance(a, b);
        assert!(meters > 1600.0 && meters < 1800.0, "got {meters}");
    }

    #[test]
    fn quarter_meridian() {
        // Equator to pole along a meridian is a quarter of the great circle.
        let equator = Coordinates::new(0.0, 10.0);
        let pole = Coordinates::new(90.0, 10.0);
        let expected = std::f64::consts::FRAC_PI_2 * 6_371_000.0;
        assert_relative_eq!(distance(equator, pole), expected, max_relative = 1e-9);
    }

    #[test]
    fn zero_flag() {
        assert!(Coordinates::default().is_zero());
        assert!(!Coordinates::new(0.0, 1.0).is_zero());
        assert!(!Coordinates::new(1.0, 0.0).is_zero());
    }
}
