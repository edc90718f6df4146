// File: crates/forecast-core/tests/coast.rs
// Purpose: Coastal proximity decisions against the bundled dataset and hand-built geometry.

use forecast_core::geometry::{point_in_polygon, point_to_segment_distance};
use forecast_core::{haversine_distance, CoastGeometry, CoastValidator, InvalidReason, LatLng, Polygon, ValidatorConfig};

macro_rules! assert_approx {
    ($left:expr, $right:expr, $tol:expr) => {
        let (l, r) = ($left as f64, $right as f64);
        assert!(
            (l - r).abs() <= $tol,
            "assert_approx failed: left={}, right={}, diff={}, tol={}",
            l, r, (l - r).abs(), $tol
        );
    };
}

fn validator() -> CoastValidator {
    CoastValidator::bundled().expect("bundled geometry loads")
}

#[test]
fn bundled_geometry_loads() {
    let v = validator();
    // peninsula plus seven islands
    assert_eq!(v.geometry().land.len(), 8);
    assert_eq!(v.geometry().segment_count(), 326);
    assert_eq!(v.geometry().tolerance_meters, 1_000.0);
    assert_eq!(*v.config(), ValidatorConfig::default());
}

#[test]
fn far_offshore_is_outside_spain() {
    let v = validator();
    for (lat, lng) in [(40.0, -20.0), (48.8566, 2.3522), (38.72, -9.14)] {
        let r = v.validate(lat, lng);
        assert!(!r.valid, "({lat}, {lng}) should be invalid");
        assert_eq!(r.reason, Some(InvalidReason::OutsideSpain));
        assert!(r.distance_to_coast_meters > 160_000.0);
    }
}

#[test]
fn deep_inland_is_rejected() {
    let v = validator();
    let r = v.validate(40.4168, -3.7038);
    assert!(!r.valid);
    assert_eq!(r.reason, Some(InvalidReason::Inland));
    assert!(r.distance_to_coast_meters > 200_000.0);

    // coastal cities a few km back from the shore
    for (lat, lng) in [(43.263, -2.935), (43.29, -1.99), (39.47, -0.376)] {
        let r = v.validate(lat, lng);
        assert_eq!(r.reason, Some(InvalidReason::Inland), "({lat}, {lng}): {r:?}");
        assert!(r.distance_to_coast_meters > 3_000.0);
    }
}

#[test]
fn sea_within_reach_is_valid() {
    let v = validator();
    for (lat, lng) in [(41.30, 2.30), (40.5, 2.0), (44.5, -4.0), (39.50, -0.28)] {
        let r = v.validate(lat, lng);
        assert!(r.valid, "({lat}, {lng}) should be valid: {r:?}");
        assert_eq!(r.reason, None);
        assert!(r.distance_to_coast_meters <= 160_000.0);
    }
}

#[test]
fn surf_beaches_validate() {
    let v = validator();
    let beaches = [
        ("Zarautz", 43.2845, -2.1697),
        ("Zarautz promenade", 43.282, -2.17),
        ("La Concha", 43.318, -1.986),
        ("Mundaka", 43.407, -2.698),
        ("Somo", 43.451, -3.737),
        ("Salinas", 43.578, -5.957),
        ("Razo", 43.289, -8.69),
        ("A Lanzada", 42.44, -8.87),
        ("Barceloneta", 41.378, 2.192),
        ("Malvarrosa", 39.478, -0.325),
        ("El Palmar", 36.23, -6.07),
        ("Famara", 29.12, -13.56),
        ("Las Canteras", 28.14, -15.44),
        ("El Medano", 28.045, -16.54),
    ];
    for (name, lat, lng) in beaches {
        let r = v.validate(lat, lng);
        assert!(r.valid, "{name} ({lat}, {lng}) should be valid: {r:?}");
        assert!(r.distance_to_coast_meters < 1_300.0, "{name}: {r:?}");
    }
}

#[test]
fn beach_band_decides_for_points_on_land() {
    let v = validator();
    // ~1.2 km inland of the Valencia coastline
    let r = v.validate(39.50, -0.33);
    assert!(r.valid, "{r:?}");
    assert!(r.distance_to_coast_meters > 1_100.0 && r.distance_to_coast_meters < 1_300.0);

    let tight = v.validate_with_band(39.50, -0.33, 100.0);
    assert!(!tight.valid);
    assert_eq!(tight.reason, Some(InvalidReason::Inland));
    assert_eq!(tight.distance_to_coast_meters, r.distance_to_coast_meters);

    let wide = validator().with_config(ValidatorConfig { beach_band_meters: 20_000.0, ..ValidatorConfig::default() });
    assert!(wide.validate(28.3, -16.55).valid, "island interior within a 20 km band");
    assert_eq!(validator().validate(28.3, -16.55).reason, Some(InvalidReason::Inland));
}

#[test]
fn tolerance_widens_the_beach_band() {
    // ~2.1 km inland: inside band + tolerance, outside the bare band
    let (lat, lng) = (39.478, -0.35);
    let bundled = validator();
    let r = bundled.validate(lat, lng);
    assert!(r.valid, "{r:?}");
    assert!(r.distance_to_coast_meters > 1_300.0 && r.distance_to_coast_meters < 2_300.0);

    let exact = CoastGeometry { tolerance_meters: 0.0, ..bundled.geometry().clone() };
    let strict = CoastValidator::new(exact, ValidatorConfig::default()).validate(lat, lng);
    assert_eq!(strict.reason, Some(InvalidReason::Inland));
    assert_eq!(strict.distance_to_coast_meters, r.distance_to_coast_meters);
}

#[test]
fn coastline_vertex_is_valid() {
    let r = validator().validate(43.468, -3.77);
    assert!(r.valid);
    assert!(r.distance_to_coast_meters < 1.0);
}

#[test]
fn non_finite_coordinates_are_outside() {
    let r = validator().validate(f64::NAN, 2.0);
    assert!(!r.valid);
    assert_eq!(r.reason, Some(InvalidReason::OutsideSpain));
    assert!(r.distance_to_coast_meters.is_infinite());
}

#[test]
fn haversine_matches_known_distance() {
    let london = LatLng::new(51.5074, -0.1278);
    let paris = LatLng::new(48.8566, 2.3522);
    assert_approx!(haversine_distance(london, paris), 343_500.0, 1_500.0);
    assert_eq!(haversine_distance(paris, paris), 0.0);
}

#[test]
fn segment_distance_uses_cross_track_or_endpoints() {
    let a = LatLng::new(0.0, 0.0);
    let b = LatLng::new(0.0, 1.0);
    // one degree of latitude above the middle of an equatorial segment
    let above = point_to_segment_distance(LatLng::new(1.0, 0.5), a, b);
    assert_approx!(above, 111_195.0, 50.0);
    // beyond the end the nearest endpoint wins
    let beyond = point_to_segment_distance(LatLng::new(0.0, 2.0), a, b);
    assert_approx!(beyond, haversine_distance(LatLng::new(0.0, 2.0), b), 1e-6);
    // degenerate segment
    let p = LatLng::new(0.5, 0.5);
    assert_approx!(point_to_segment_distance(p, a, a), haversine_distance(p, a), 1e-6);
}

#[test]
fn polygons_with_holes() {
    let square = |lo: f64, hi: f64| vec![LatLng::new(lo, lo), LatLng::new(lo, hi), LatLng::new(hi, hi), LatLng::new(hi, lo)];
    let poly = Polygon { exterior: square(0.0, 10.0), holes: vec![square(4.0, 6.0)] };
    assert!(point_in_polygon(LatLng::new(2.0, 2.0), &poly));
    assert!(!point_in_polygon(LatLng::new(5.0, 5.0), &poly));
    assert!(!point_in_polygon(LatLng::new(12.0, 5.0), &poly));
}

#[test]
fn custom_geojson_and_rejections() {
    let text = r#"{"type":"FeatureCollection","features":[
        {"type":"Feature","properties":{"kind":"land"},"geometry":{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,1],[0,0]]]}},
        {"type":"Feature","properties":{"kind":"coastline"},"geometry":{"type":"LineString","coordinates":[[1,0],[1,1]]}},
        {"type":"Feature","properties":{"kind":"label"},"geometry":{"type":"LineString","coordinates":[[5,5],[6,6]]}}
    ]}"#;
    let geometry = CoastGeometry::from_geojson(text).expect("valid geojson");
    assert_eq!(geometry.land.len(), 1);
    assert_eq!(geometry.segment_count(), 1);
    assert_eq!(geometry.tolerance_meters, 0.0);

    let v = CoastValidator::new(geometry, ValidatorConfig::default());
    let on_shore = v.validate(0.5, 0.995);
    assert!(on_shore.valid);
    let inland = v.validate(0.5, 0.5);
    assert_eq!(inland.reason, Some(InvalidReason::Inland));

    assert!(CoastGeometry::from_geojson("{").is_err());
    let bad_ring = r#"{"type":"FeatureCollection","features":[
        {"type":"Feature","properties":{"kind":"land"},"geometry":{"type":"Polygon","coordinates":[[[0,0],[1,0]]]}}]}"#;
    assert!(CoastGeometry::from_geojson(bad_ring).is_err());
    let bad_position = r#"{"type":"FeatureCollection","features":[
        {"type":"Feature","properties":{"kind":"coastline"},"geometry":{"type":"LineString","coordinates":[[1],[2,2]]}}]}"#;
    assert!(CoastGeometry::from_geojson(bad_position).is_err());
    let negative_tolerance = r#"{"type":"FeatureCollection","toleranceMeters":-5,"features":[]}"#;
    assert!(CoastGeometry::from_geojson(negative_tolerance).is_err());
}
