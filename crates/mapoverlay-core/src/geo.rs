//! Geographic points and the small amount of spherical math the engine needs.
//!
//! Measurements are approximations on a sphere of radius [`EARTH_RADIUS_M`];
//! areas use a local equirectangular projection around the first vertex.

use kurbo::{BezPath, Point, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mean equatorial radius used by the map's spherical helpers (meters).
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// A latitude/longitude pair in degrees.
///
/// Only finiteness is checked by the engine; out-of-range values are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Check that both components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lng)
    }
}

/// Orientation of a closed ring in the projected (east, north) plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
    /// Zero signed area (fewer than 3 points or collinear).
    Degenerate,
}

/// Great-circle distance between two points in meters (haversine).
pub fn distance_m(a: LatLng, b: LatLng) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let d_phi = (b.lat - a.lat).to_radians();
    let d_lambda = (b.lng - a.lng).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

/// Point reached by travelling `distance` meters from `origin` on the given
/// bearing (degrees clockwise from north).
pub fn destination(origin: LatLng, bearing_deg: f64, distance: f64) -> LatLng {
    let delta = distance / EARTH_RADIUS_M;
    let theta = bearing_deg.to_radians();
    let phi1 = origin.lat.to_radians();
    let lambda1 = origin.lng.to_radians();

    let phi2 = (phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * theta.cos()).asin();
    let lambda2 = lambda1
        + (theta.sin() * delta.sin() * phi1.cos()).atan2(delta.cos() - phi1.sin() * phi2.sin());

    LatLng::new(phi2.to_degrees(), lambda2.to_degrees())
}

/// Project `p` into a local meter plane centred on `origin` (x = east, y = north).
pub fn project(origin: LatLng, p: LatLng) -> Point {
    let offset = Vec2::new(
        (p.lng - origin.lng).to_radians() * origin.lat.to_radians().cos(),
        (p.lat - origin.lat).to_radians(),
    ) * EARTH_RADIUS_M;
    Point::ZERO + offset
}

/// Build a closed planar path for a ring, projected around its first vertex.
fn ring_path(ring: &[LatLng]) -> Option<BezPath> {
    let origin = *ring.first()?;
    let mut path = BezPath::new();
    path.move_to(project(origin, origin));
    for &p in &ring[1..] {
        path.line_to(project(origin, p));
    }
    path.close_path();
    Some(path)
}

/// Signed planar area of a ring in square meters.
///
/// Positive for counter-clockwise rings in the (east, north) plane.
pub fn signed_ring_area_m2(ring: &[LatLng]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    // Shoelace sign: positive when counter-clockwise with y pointing north.
    ring_path(ring).map_or(0.0, |path| path.area())
}

/// Winding of a ring; holes should wind opposite to their outer ring.
pub fn ring_winding(ring: &[LatLng]) -> Winding {
    let area = signed_ring_area_m2(ring);
    if area.abs() < f64::EPSILON {
        Winding::Degenerate
    } else if area > 0.0 {
        Winding::CounterClockwise
    } else {
        Winding::Clockwise
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_zero() {
        let p = LatLng::new(40.7128, -74.0060);
        assert!(distance_m(p, p).abs() < f64::EPSILON);
    }

    #[test]
    fn test_distance_one_degree_latitude() {
        let a = LatLng::new(0.0, 0.0);
        let b = LatLng::new(1.0, 0.0);
        let expected = EARTH_RADIUS_M * 1.0_f64.to_radians();
        assert!((distance_m(a, b) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_distance_symmetric() {
        let a = LatLng::new(51.5074, -0.1278);
        let b = LatLng::new(48.8566, 2.3522);
        assert!((distance_m(a, b) - distance_m(b, a)).abs() < 1e-6);
    }

    #[test]
    fn test_destination_round_trips_distance() {
        let origin = LatLng::new(37.7749, -122.4194);
        let target = destination(origin, 90.0, 2500.0);
        assert!((distance_m(origin, target) - 2500.0).abs() < 1e-6);
        assert!(target.lng > origin.lng);
    }

    #[test]
    fn test_project_origin_is_zero() {
        let origin = LatLng::new(10.0, 20.0);
        let p = project(origin, origin);
        assert!(p.x.abs() < f64::EPSILON && p.y.abs() < f64::EPSILON);
    }

    #[test]
    fn test_winding_reverses() {
        let ring = vec![
            LatLng::new(0.0, 0.0),
            LatLng::new(0.0, 0.01),
            LatLng::new(0.01, 0.01),
            LatLng::new(0.01, 0.0),
        ];
        let mut reversed = ring.clone();
        reversed.reverse();

        let w1 = ring_winding(&ring);
        let w2 = ring_winding(&reversed);
        assert_ne!(w1, Winding::Degenerate);
        assert_ne!(w1, w2);
        assert_eq!(w2, Winding::Clockwise);
    }

    #[test]
    fn test_degenerate_ring() {
        let ring = vec![LatLng::new(0.0, 0.0), LatLng::new(1.0, 1.0)];
        assert_eq!(ring_winding(&ring), Winding::Degenerate);
    }

    #[test]
    fn test_display_six_decimals() {
        assert_eq!(LatLng::new(1.5, -2.25).to_string(), "1.500000, -2.250000");
    }
}
