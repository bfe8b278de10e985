//! Great-circle geometry for hotspot sizing.
//!
//! Centroids are plain coordinate means. At hotspot scale (tens of
//! kilometres) the error against a true spherical centroid is negligible.

use crate::constants::{EARTH_RADIUS_KM, MIN_HOTSPOT_RADIUS_KM, RADIUS_BUFFER};
use crate::types::GeoPoint;

/// Haversine great-circle distance between two points in kilometres.
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    // Rounding can push h a hair above 1 for antipodal points.
    let c = 2.0 * h.clamp(0.0, 1.0).sqrt().asin();
    EARTH_RADIUS_KM * c
}

/// Arithmetic mean of the latitudes and longitudes. `None` for an empty slice.
pub fn centroid(points: &[GeoPoint]) -> Option<GeoPoint> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (lat_sum, lng_sum) = points
        .iter()
        .fold((0.0, 0.0), |(lat, lng), p| (lat + p.lat, lng + p.lng));
    Some(GeoPoint::new(lat_sum / n, lng_sum / n))
}

/// Radius that encloses every point around their centroid.
///
/// The farthest member distance is padded by 20% and floored at
/// [`MIN_HOTSPOT_RADIUS_KM`], which is also the result for empty or
/// single-point inputs.
pub fn enclosing_radius_km(points: &[GeoPoint]) -> f64 {
    let Some(center) = centroid(points) else {
        return MIN_HOTSPOT_RADIUS_KM;
    };
    let farthest = points
        .iter()
        .map(|p| distance_km(center, *p))
        .fold(0.0_f64, f64::max);
    (farthest * RADIUS_BUFFER).max(MIN_HOTSPOT_RADIUS_KM)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn chennai() -> GeoPoint {
        GeoPoint::new(13.0827, 80.2707)
    }

    fn puducherry() -> GeoPoint {
        GeoPoint::new(11.9416, 79.8083)
    }

    #[test]
    fn distance_chennai_to_puducherry() {
        let d = distance_km(chennai(), puducherry());
        assert!((d - 135.0).abs() < 5.0, "expected ~135 km, got {d}");
    }

    #[test]
    fn distance_same_point_is_zero() {
        assert_eq!(distance_km(chennai(), chennai()), 0.0);
    }

    #[test]
    fn distance_one_degree_latitude() {
        let d = distance_km(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0));
        assert!((d - 111.19).abs() < 0.1, "got {d}");
    }

    #[test]
    fn distance_antipodal_is_half_circumference() {
        let d = distance_km(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 180.0));
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn centroid_of_empty_is_none() {
        assert!(centroid(&[]).is_none());
    }

    #[test]
    fn centroid_is_mean() {
        let c = centroid(&[GeoPoint::new(10.0, 80.0), GeoPoint::new(12.0, 82.0)]).unwrap();
        assert_eq!(c, GeoPoint::new(11.0, 81.0));
    }

    #[test]
    fn enclosing_radius_single_point_is_floor() {
        assert_eq!(enclosing_radius_km(&[chennai()]), MIN_HOTSPOT_RADIUS_KM);
        assert_eq!(enclosing_radius_km(&[]), MIN_HOTSPOT_RADIUS_KM);
    }

    #[test]
    fn enclosing_radius_applies_buffer() {
        let pts = [chennai(), puducherry()];
        let c = centroid(&pts).unwrap();
        let farthest = distance_km(c, chennai()).max(distance_km(c, puducherry()));
        let r = enclosing_radius_km(&pts);
        assert!((r - farthest * RADIUS_BUFFER).abs() < 1e-9);
    }

    #[test]
    fn enclosing_radius_tight_cluster_hits_floor() {
        let pts = [
            GeoPoint::new(13.05, 80.28),
            GeoPoint::new(13.06, 80.29),
            GeoPoint::new(13.04, 80.27),
        ];
        assert_eq!(enclosing_radius_km(&pts), MIN_HOTSPOT_RADIUS_KM);
    }

    fn point() -> impl Strategy<Value = GeoPoint> {
        (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lng)| GeoPoint::new(lat, lng))
    }

    proptest! {
        #[test]
        fn distance_symmetric(a in point(), b in point()) {
            let ab = distance_km(a, b);
            let ba = distance_km(b, a);
            prop_assert!((ab - ba).abs() < 1e-9, "d(a,b)={} d(b,a)={}", ab, ba);
        }

        #[test]
        fn distance_non_negative_and_bounded(a in point(), b in point()) {
            let d = distance_km(a, b);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_KM + 1e-6);
        }

        #[test]
        fn distance_to_self_zero(a in point()) {
            prop_assert_eq!(distance_km(a, a), 0.0);
        }

        #[test]
        fn enclosing_radius_covers_members(pts in prop::collection::vec(point(), 1..8)) {
            let c = centroid(&pts).unwrap();
            let r = enclosing_radius_km(&pts);
            prop_assert!(r >= MIN_HOTSPOT_RADIUS_KM);
            for p in &pts {
                prop_assert!(distance_km(c, *p) <= r + 1e-9);
            }
        }
    }
}
