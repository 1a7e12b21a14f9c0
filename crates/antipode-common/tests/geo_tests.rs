//! Tests for the antipode transform and the recentering rule.

use antipode_common::{central_longitude, compute_antipode, GeoPoint};
use test_utils::{assert_approx_eq, points};

fn point((lat, lon): (f64, f64)) -> GeoPoint {
    GeoPoint::new(lat, lon).unwrap()
}

// ============================================================================
// Antipode branch rule
// ============================================================================

#[test]
fn test_non_positive_longitudes_shift_east() {
    for lon in [-179.5, -120.0, -81.36, -0.25, 0.0] {
        let a = compute_antipode(GeoPoint::new_unchecked(12.0, lon));
        assert_approx_eq!(a.longitude, lon + 180.0, 1e-12);
    }
}

#[test]
fn test_positive_longitudes_shift_west() {
    for lon in [0.25, 0.9, 28.0, 98.64, 180.0] {
        let a = compute_antipode(GeoPoint::new_unchecked(-12.0, lon));
        assert_approx_eq!(a.longitude, lon - 180.0, 1e-12);
    }
}

#[test]
fn test_latitude_negates_exactly() {
    for lat in [-90.0, -26.2, 0.0, 41.15, 51.8, 90.0] {
        let a = compute_antipode(GeoPoint::new_unchecked(lat, 10.0));
        assert_eq!(a.latitude, -lat);
    }
}

#[test]
fn test_poles() {
    let north = compute_antipode(GeoPoint::new_unchecked(90.0, -81.36));
    assert_eq!(north.latitude, -90.0);
    assert_approx_eq!(north.longitude, 98.64, 1e-9);
}

// ============================================================================
// Round trips
// ============================================================================

#[test]
fn test_double_antipode_is_identity() {
    for lon in [-179.0, -81.36, -1.0, 0.0, 0.9, 28.0, 179.0, 180.0] {
        for lat in [-45.0, 0.0, 41.15] {
            let p = GeoPoint::new_unchecked(lat, lon);
            let back = compute_antipode(compute_antipode(p));
            assert_approx_eq!(back.longitude, p.longitude, 1e-9);
            assert_eq!(back.latitude, p.latitude);
        }
    }
}

#[test]
fn test_double_antipode_boundary_case() {
    // -180 lands on the 0 boundary, which takes the eastward branch.
    let p = GeoPoint::new_unchecked(10.0, -180.0);
    let once = compute_antipode(p);
    assert_eq!(once.longitude, 0.0);
    let twice = compute_antipode(once);
    assert_eq!(twice.longitude, 180.0);
    assert_ne!(twice.longitude, p.longitude);
}

// ============================================================================
// Recentering
// ============================================================================

#[test]
fn test_recenter_default_point() {
    let p = GeoPoint::default();
    assert_approx_eq!(p.antipode().longitude, 98.64, 1e-9);
    assert_approx_eq!(central_longitude(p, true), 8.64, 1e-9);
}

#[test]
fn test_no_recenter_is_prime_meridian() {
    assert_eq!(central_longitude(GeoPoint::default(), false), 0.0);
    assert_eq!(central_longitude(point(points::UK), false), 0.0);
}

#[test]
fn test_recenter_other_points() {
    // UK: 0.9 and -179.1
    assert_approx_eq!(central_longitude(point(points::UK), true), -89.1, 1e-9);
    // South Africa: 28 and -152
    assert_approx_eq!(central_longitude(point(points::SOUTH_AFRICA), true), -62.0, 1e-9);
}

#[test]
fn test_fixture_points() {
    assert_eq!(point(points::OHIO), GeoPoint::default());
    let pole = point(points::NORTH_POLE).antipode();
    assert_eq!(pole.latitude, -90.0);
    // 0 takes the eastward branch
    assert_eq!(point(points::PRIME_MERIDIAN).antipode().longitude, 180.0);
}
