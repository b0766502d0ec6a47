//! Derived measurements and display formatting.
//!
//! Everything here is a pure function of committed geometry.

use crate::geo::{LatLng, distance_m, signed_ring_area_m2};
use crate::shapes::{Circle, Polygon, Polyline, Shape};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

const METERS_PER_KM: f64 = 1000.0;
const SQ_METERS_PER_SQ_KM: f64 = 1_000_000.0;

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Area of a circle in square kilometers.
pub fn circle_area(radius_m: f64) -> f64 {
    let r_km = radius_m / METERS_PER_KM;
    PI * r_km * r_km
}

/// Sum starting from `+0.0`; `Iterator::sum` yields `-0.0` when empty.
fn sum_positive(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(0.0, |acc, x| acc + x)
}

/// Summed area of circles in square kilometers.
///
/// Overlaps are counted once per circle; this is not a geometric union.
pub fn total_area<'a>(circles: impl IntoIterator<Item = &'a Circle>) -> f64 {
    sum_positive(circles.into_iter().map(|c| circle_area(c.radius())))
}

/// Planar area of a polygon in square meters (outer ring minus holes).
pub fn polygon_area_m2(polygon: &Polygon) -> f64 {
    let outer = signed_ring_area_m2(&polygon.paths).abs();
    let holes = sum_positive(
        polygon
            .holes
            .iter()
            .map(|hole| signed_ring_area_m2(hole).abs()),
    );
    (outer - holes).max(0.0)
}

/// Length of a path in meters.
pub fn path_length_m(path: &[LatLng]) -> f64 {
    sum_positive(path.windows(2).map(|w| distance_m(w[0], w[1])))
}

/// Perimeter of a polygon's outer ring in meters, including the closing edge.
pub fn polygon_perimeter_m(polygon: &Polygon) -> f64 {
    let closing = match (polygon.paths.first(), polygon.paths.last()) {
        (Some(&first), Some(&last)) if polygon.paths.len() > 2 => distance_m(last, first),
        _ => 0.0,
    };
    path_length_m(&polygon.paths) + closing
}

/// `"{m}m"` under a kilometer, `"{km}km"` otherwise.
pub fn format_length(meters: f64) -> String {
    if meters < METERS_PER_KM {
        format!("{meters}m")
    } else {
        format!("{}km", meters / METERS_PER_KM)
    }
}

/// Radius label; same units as lengths.
pub fn format_radius(meters: f64) -> String {
    format_length(meters)
}

/// Square kilometers to 2 decimal places.
pub fn format_area(km2: f64) -> String {
    format!("{km2:.2}")
}

/// Square kilometers to 2 decimal places with unit.
pub fn format_area_km2(km2: f64) -> String {
    format!("{} km²", format_area(km2))
}

/// A coordinate component fixed to 6 decimal places.
pub fn format_coordinate(value: f64) -> String {
    format!("{value:.6}")
}

/// `"lat, lng"` with 6 decimal places each.
pub fn format_point(point: LatLng) -> String {
    format!("{}, {}", format_coordinate(point.lat), format_coordinate(point.lng))
}

/// Metrics computed for a shape at commit time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Measurement {
    Circle { radius_m: f64, area_km2: f64 },
    Polygon { area_km2: f64, perimeter_m: f64 },
    Polyline { length_m: f64 },
}

impl Measurement {
    /// Measure any shape.
    pub fn of(shape: &Shape) -> Self {
        match shape {
            Shape::Circle(c) => Self::of_circle(c),
            Shape::Polygon(p) => Self::of_polygon(p),
            Shape::Polyline(l) => Self::of_polyline(l),
        }
    }

    pub fn of_circle(circle: &Circle) -> Self {
        Measurement::Circle {
            radius_m: circle.radius(),
            area_km2: circle_area(circle.radius()),
        }
    }

    pub fn of_polygon(polygon: &Polygon) -> Self {
        Measurement::Polygon {
            area_km2: polygon_area_m2(polygon) / SQ_METERS_PER_SQ_KM,
            perimeter_m: polygon_perimeter_m(polygon),
        }
    }

    pub fn of_polyline(polyline: &Polyline) -> Self {
        Measurement::Polyline {
            length_m: path_length_m(&polyline.path),
        }
    }

    /// Human-facing summary.
    pub fn display(&self) -> String {
        match *self {
            Measurement::Circle { radius_m, area_km2 } => format!(
                "Radius: {}, Area: {}",
                format_radius(radius_m),
                format_area_km2(area_km2)
            ),
            Measurement::Polygon {
                area_km2,
                perimeter_m,
            } => format!(
                "Area: {}, Perimeter: {}",
                format_area_km2(area_km2),
                format_length(round_to(perimeter_m, 2))
            ),
            Measurement::Polyline { length_m } => {
                format!("Length: {}", format_length(round_to(length_m, 2)))
            }
        }
    }
}
