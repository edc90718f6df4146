// File: crates/forecast-core/src/geometry.rs
// Summary: Spherical geometry helpers: great-circle distances and point-in-polygon tests.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters (WGS84).
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    fn to_unit_vector(self) -> [f64; 3] {
        let (lat, lng) = (self.lat.to_radians(), self.lng.to_radians());
        [lat.cos() * lng.cos(), lat.cos() * lng.sin(), lat.sin()]
    }
}

/// Closed ring plus optional holes. Rings need not repeat their first vertex.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    pub exterior: Vec<LatLng>,
    pub holes: Vec<Vec<LatLng>>,
}

/// Great-circle distance in meters (haversine).
pub fn haversine_distance(a: LatLng, b: LatLng) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

#[inline]
fn cross(u: [f64; 3], v: [f64; 3]) -> [f64; 3] {
    [u[1] * v[2] - u[2] * v[1], u[2] * v[0] - u[0] * v[2], u[0] * v[1] - u[1] * v[0]]
}

#[inline]
fn dot(u: [f64; 3], v: [f64; 3]) -> f64 {
    u[0] * v[0] + u[1] * v[1] + u[2] * v[2]
}

#[inline]
fn norm(u: [f64; 3]) -> f64 {
    dot(u, u).sqrt()
}

/// Shortest great-circle distance in meters from `p` to the arc `a`-`b`.
/// Uses the cross-track distance when the perpendicular foot lies on the arc,
/// otherwise the nearer endpoint.
pub fn point_to_segment_distance(p: LatLng, a: LatLng, b: LatLng) -> f64 {
    let endpoints = || haversine_distance(p, a).min(haversine_distance(p, b));

    let (pv, av, bv) = (p.to_unit_vector(), a.to_unit_vector(), b.to_unit_vector());
    let n = cross(av, bv);
    let n_len = norm(n);
    if n_len < 1e-12 {
        // coincident or antipodal endpoints
        return endpoints();
    }
    let n = [n[0] / n_len, n[1] / n_len, n[2] / n_len];

    let off_plane = dot(pv, n);
    let foot = [pv[0] - n[0] * off_plane, pv[1] - n[1] * off_plane, pv[2] - n[2] * off_plane];
    if norm(foot) < 1e-12 {
        // p sits on the pole of the arc's great circle
        return endpoints();
    }

    let on_arc = dot(cross(av, foot), n) >= 0.0 && dot(cross(foot, bv), n) >= 0.0;
    if on_arc {
        EARTH_RADIUS_M * off_plane.clamp(-1.0, 1.0).asin().abs()
    } else {
        endpoints()
    }
}

/// Ray casting in the lng/lat plane.
pub fn point_in_ring(p: LatLng, ring: &[LatLng]) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (vi, vj) = (ring[i], ring[j]);
        if (vi.lat > p.lat) != (vj.lat > p.lat) {
            let x = vj.lng + (p.lat - vj.lat) / (vi.lat - vj.lat) * (vi.lng - vj.lng);
            if p.lng < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

pub fn point_in_polygon(p: LatLng, polygon: &Polygon) -> bool {
    point_in_ring(p, &polygon.exterior) && !polygon.holes.iter().any(|h| point_in_ring(p, h))
}
