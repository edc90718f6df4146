// File: crates/forecast-core/src/coast.rs
// Summary: Coastal proximity validation of spot locations against bundled land/coastline geometry.
// Notes:
// - Distance search is a linear scan over every coastline segment.
// - GeoJSON positions are [lng, lat]; they are converted to `LatLng` on load.

use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, Result};
use crate::geometry::{haversine_distance, point_in_polygon, point_to_segment_distance, LatLng, Polygon};

const BUNDLED_SPAIN_GEOJSON: &str = include_str!("../data/spain.geojson");

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValidatorConfig {
    /// Max distance from the coast for a point on land, meters.
    pub beach_band_meters: f64,
    /// Max distance from the coast for a point at sea, meters.
    pub max_sea_distance_meters: f64,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self { beach_band_meters: 1_300.0, max_sea_distance_meters: 160_000.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    OutsideSpain,
    Inland,
}

impl InvalidReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvalidReason::OutsideSpain => "outside_spain",
            InvalidReason::Inland => "inland",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<InvalidReason>,
    /// Always set, valid or not.
    pub distance_to_coast_meters: f64,
}

/// Land polygons and coastline polylines.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CoastGeometry {
    pub land: Vec<Polygon>,
    pub coastline: Vec<Vec<LatLng>>,
    /// Max offset of the digitized coastline from the real shore, meters.
    /// Widens the beach band for points on land; zero for exact data.
    pub tolerance_meters: f64,
}

// ---- GeoJSON wire model ------------------------------------------------------

type Position = Vec<f64>;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeatureCollection {
    features: Vec<Feature>,
    #[serde(default)]
    tolerance_meters: f64,
}

#[derive(Deserialize)]
struct Feature {
    #[serde(default)]
    properties: FeatureProperties,
    geometry: Geometry,
}

#[derive(Default, Deserialize)]
struct FeatureProperties {
    #[serde(default)]
    kind: String,
}

#[derive(Deserialize)]
#[serde(tag = "type", content = "coordinates")]
enum Geometry {
    LineString(Vec<Position>),
    MultiLineString(Vec<Vec<Position>>),
    Polygon(Vec<Vec<Position>>),
    MultiPolygon(Vec<Vec<Vec<Position>>>),
}

fn to_line(positions: &[Position]) -> Result<Vec<LatLng>> {
    positions
        .iter()
        .map(|pos| match pos.as_slice() {
            [lng, lat, ..] => Ok(LatLng::new(*lat, *lng)),
            _ => Err(ForecastError::InvalidGeometry(format!("position with {} coordinate(s)", pos.len()))),
        })
        .collect()
}

fn to_polygon(rings: &[Vec<Position>]) -> Result<Polygon> {
    let mut rings = rings.iter().map(|r| to_line(r));
    let exterior = rings
        .next()
        .transpose()?
        .ok_or_else(|| ForecastError::InvalidGeometry("polygon without rings".to_string()))?;
    if exterior.len() < 3 {
        return Err(ForecastError::InvalidGeometry(format!("polygon ring with {} vertices", exterior.len())));
    }
    let holes = rings.collect::<Result<Vec<_>>>()?;
    Ok(Polygon { exterior, holes })
}

impl CoastGeometry {
    /// Parse a FeatureCollection. Features tagged `kind: "land"` feed the land polygons,
    /// `kind: "coastline"` the coastline; anything else is ignored. An optional top-level
    /// `toleranceMeters` member states how far the coastline may stray from the shore.
    pub fn from_geojson(text: &str) -> Result<Self> {
        let collection: FeatureCollection = serde_json::from_str(text)?;
        if !(collection.tolerance_meters.is_finite() && collection.tolerance_meters >= 0.0) {
            return Err(ForecastError::InvalidGeometry(format!(
                "toleranceMeters must be a non-negative number, got {}",
                collection.tolerance_meters
            )));
        }
        let mut geometry = CoastGeometry { tolerance_meters: collection.tolerance_meters, ..CoastGeometry::default() };
        for feature in &collection.features {
            match (feature.properties.kind.as_str(), &feature.geometry) {
                ("land", Geometry::Polygon(rings)) => geometry.land.push(to_polygon(rings)?),
                ("land", Geometry::MultiPolygon(polys)) => {
                    for rings in polys {
                        geometry.land.push(to_polygon(rings)?);
                    }
                }
                ("coastline", Geometry::LineString(line)) => geometry.coastline.push(to_line(line)?),
                ("coastline", Geometry::MultiLineString(lines)) => {
                    for line in lines {
                        geometry.coastline.push(to_line(line)?);
                    }
                }
                (kind, _) => log::debug!("skipping feature of kind '{kind}'"),
            }
        }
        log::debug!(
            "loaded coast geometry: {} land polygon(s), {} coastline segment(s), tolerance {} m",
            geometry.land.len(),
            geometry.segment_count(),
            geometry.tolerance_meters
        );
        Ok(geometry)
    }

    pub fn segment_count(&self) -> usize {
        self.coastline.iter().map(|l| l.len().saturating_sub(1)).sum()
    }

    /// Minimum great-circle distance in meters to any coastline segment; infinite without coastline.
    pub fn distance_to_coast(&self, p: LatLng) -> f64 {
        self.coastline
            .iter()
            .map(|line| match line.as_slice() {
                [] => f64::INFINITY,
                [only] => haversine_distance(p, *only),
                _ => line
                    .windows(2)
                    .map(|seg| point_to_segment_distance(p, seg[0], seg[1]))
                    .fold(f64::INFINITY, f64::min),
            })
            .fold(f64::INFINITY, f64::min)
    }

    pub fn is_inside_land(&self, p: LatLng) -> bool {
        self.land.iter().any(|poly| point_in_polygon(p, poly))
    }
}

pub struct CoastValidator {
    geometry: CoastGeometry,
    config: ValidatorConfig,
}

impl CoastValidator {
    pub fn new(geometry: CoastGeometry, config: ValidatorConfig) -> Self {
        Self { geometry, config }
    }

    /// Validator over the hand-digitized Spain dataset shipped with the crate
    /// (peninsula, Balearics, eastern Canaries; Ceuta, Melilla and the western Canaries are absent).
    pub fn bundled() -> Result<Self> {
        Ok(Self::new(CoastGeometry::from_geojson(BUNDLED_SPAIN_GEOJSON)?, ValidatorConfig::default()))
    }

    pub fn with_config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn geometry(&self) -> &CoastGeometry {
        &self.geometry
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn validate(&self, lat: f64, lng: f64) -> ValidationResult {
        self.validate_with_band(lat, lng, self.config.beach_band_meters)
    }

    /// Land points are checked against `beach_band_meters` plus the geometry's tolerance.
    pub fn validate_with_band(&self, lat: f64, lng: f64, beach_band_meters: f64) -> ValidationResult {
        let p = LatLng::new(lat, lng);
        if !p.is_finite() {
            return ValidationResult {
                valid: false,
                reason: Some(InvalidReason::OutsideSpain),
                distance_to_coast_meters: f64::INFINITY,
            };
        }

        let distance = self.geometry.distance_to_coast(p);
        let reason = if self.geometry.is_inside_land(p) {
            (distance > beach_band_meters + self.geometry.tolerance_meters).then_some(InvalidReason::Inland)
        } else {
            (distance > self.config.max_sea_distance_meters).then_some(InvalidReason::OutsideSpain)
        };
        ValidationResult { valid: reason.is_none(), reason, distance_to_coast_meters: distance }
    }
}
