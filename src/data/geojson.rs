use crate::core::geo::LatLng;
use geo_types::{Coord, LineString, MultiPolygon, Polygon};
use serde::{Deserialize, Serialize};

/// Countries dataset used by the base map
pub const WORLD_GEOJSON_URL: &str =
    "https://raw.githubusercontent.com/holtzy/D3-graph-gallery/master/DATA/world.geojson";

/// GeoJSON geometry types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point {
        coordinates: [f64; 2],
    },
    LineString {
        coordinates: Vec<[f64; 2]>,
    },
    Polygon {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    MultiPoint {
        coordinates: Vec<[f64; 2]>,
    },
    MultiLineString {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<[f64; 2]>>>,
    },
    GeometryCollection {
        geometries: Vec<GeoJsonGeometry>,
    },
}

/// GeoJSON feature with geometry and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonFeature {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub geometry: Option<GeoJsonGeometry>,
    #[serde(default)]
    pub properties: Option<serde_json::Map<String, serde_json::Value>>,
}

impl GeoJsonFeature {
    /// `properties.name`, falling back to the feature id
    pub fn name(&self) -> Option<String> {
        self.properties
            .as_ref()
            .and_then(|p| p.get("name"))
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .or_else(|| match &self.id {
                Some(serde_json::Value::String(s)) => Some(s.clone()),
                Some(serde_json::Value::Number(n)) => Some(n.to_string()),
                _ => None,
            })
    }
}

/// Root GeoJSON object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJson {
    Feature(GeoJsonFeature),
    FeatureCollection { features: Vec<GeoJsonFeature> },
}

/// One country outline, in geographic coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct CountryShape {
    pub name: String,
    pub shape: MultiPolygon<f64>,
}

impl CountryShape {
    fn from_feature(feature: &GeoJsonFeature) -> crate::Result<Self> {
        let name = feature
            .name()
            .ok_or_else(|| crate::Error::ParseError("feature has no name".into()))?;

        let polygons = match &feature.geometry {
            Some(GeoJsonGeometry::Polygon { coordinates }) => vec![to_polygon(coordinates)?],
            Some(GeoJsonGeometry::MultiPolygon { coordinates }) => coordinates
                .iter()
                .map(|rings| to_polygon(rings))
                .collect::<crate::Result<Vec<_>>>()?,
            Some(_) => {
                return Err(crate::Error::ParseError(format!(
                    "{}: geometry is not areal",
                    name
                )))
            }
            None => return Err(crate::Error::ParseError(format!("{}: no geometry", name))),
        };

        Ok(Self {
            name,
            shape: MultiPolygon(polygons),
        })
    }

    /// Rings as (lat, lng) sequences: exterior first, then holes, per polygon
    pub fn rings(&self) -> impl Iterator<Item = Vec<LatLng>> + '_ {
        self.shape.0.iter().flat_map(|polygon| {
            std::iter::once(polygon.exterior())
                .chain(polygon.interiors().iter())
                .map(|ring| ring.coords().map(|c| LatLng::from_lng_lat(c.x, c.y)).collect())
        })
    }
}

fn to_polygon(rings: &[Vec<[f64; 2]>]) -> crate::Result<Polygon<f64>> {
    let mut rings = rings.iter().map(|ring| to_ring(ring));
    let exterior = rings
        .next()
        .ok_or_else(|| crate::Error::ParseError("polygon without rings".into()))??;
    let interiors = rings.collect::<crate::Result<Vec<_>>>()?;
    Ok(Polygon::new(exterior, interiors))
}

fn to_ring(coords: &[[f64; 2]]) -> crate::Result<LineString<f64>> {
    if coords.len() < 3 {
        return Err(crate::Error::ParseError("ring has fewer than 3 positions".into()));
    }
    coords
        .iter()
        .map(|&[x, y]| {
            if x.is_finite() && y.is_finite() && (-180.0..=180.0).contains(&x) && (-90.0..=90.0).contains(&y) {
                Ok(Coord { x, y })
            } else {
                Err(crate::Error::InvalidCoordinates(format!("[{}, {}]", x, y)))
            }
        })
        .collect::<crate::Result<Vec<_>>>()
        .map(LineString::new)
}

/// The loaded country layer. Invalid features are skipped, not fatal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geography {
    countries: Vec<CountryShape>,
    skipped: usize,
}

impl Geography {
    pub fn new(countries: Vec<CountryShape>) -> Self {
        Self {
            countries,
            skipped: 0,
        }
    }

    /// Builds the country layer from a GeoJSON document
    pub fn from_str(geojson_str: &str) -> crate::Result<Self> {
        let data: GeoJson = serde_json::from_str(geojson_str)
            .map_err(|e| crate::Error::ParseError(format!("Invalid GeoJSON: {}", e)))?;
        Ok(Self::from_geojson(&data))
    }

    pub fn from_geojson(data: &GeoJson) -> Self {
        let features: &[GeoJsonFeature] = match data {
            GeoJson::Feature(feature) => std::slice::from_ref(feature),
            GeoJson::FeatureCollection { features } => features,
        };

        let mut countries = Vec::with_capacity(features.len());
        let mut skipped = 0;
        for feature in features {
            match CountryShape::from_feature(feature) {
                Ok(country) => countries.push(country),
                Err(e) => {
                    log::warn!("skipping geography feature: {}", e);
                    skipped += 1;
                }
            }
        }

        log::info!("loaded {} countries ({} skipped)", countries.len(), skipped);
        Self { countries, skipped }
    }

    pub fn countries(&self) -> &[CountryShape] {
        &self.countries
    }

    pub fn country(&self, name: &str) -> Option<&CountryShape> {
        self.countries.iter().find(|c| c.name == name)
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}

/// Fetches and parses a countries GeoJSON document
pub async fn load_from_url(url: &str) -> crate::Result<Geography> {
    log::debug!("fetching geography from {}", url);
    let body = reqwest::get(url).await?.error_for_status()?.text().await?;
    Geography::from_str(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "properties": {"name": "Squareland"},
             "geometry": {"type": "Polygon", "coordinates": [[[0,0],[10,0],[10,10],[0,10],[0,0]]]}},
            {"type": "Feature", "id": "ISL",
             "geometry": {"type": "MultiPolygon", "coordinates": [
                [[[20,20],[21,20],[21,21],[20,20]]],
                [[[30,30],[31,30],[31,31],[30,30]]]
             ]}},
            {"type": "Feature", "properties": {"name": "Broken"},
             "geometry": {"type": "Polygon", "coordinates": [[[0,0],[500,0],[0,1],[0,0]]]}},
            {"type": "Feature", "properties": {"name": "Pointy"},
             "geometry": {"type": "Point", "coordinates": [1, 1]}},
            {"type": "Feature", "properties": {"name": "Empty"}, "geometry": null}
        ]
    }"#;

    #[test]
    fn test_invalid_features_are_skipped() {
        let geography = Geography::from_str(SAMPLE).unwrap();
        assert_eq!(geography.countries().len(), 2);
        assert_eq!(geography.skipped(), 3);
        assert!(geography.country("Squareland").is_some());
        assert_eq!(geography.country("ISL").unwrap().shape.0.len(), 2);
    }

    #[test]
    fn test_rings_are_lat_lng() {
        let geography = Geography::from_str(SAMPLE).unwrap();
        let rings: Vec<_> = geography.country("Squareland").unwrap().rings().collect();
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0][1], LatLng::new(0.0, 10.0));
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        assert!(Geography::from_str("{\"type\": \"Nope\"}").is_err());
        assert!(Geography::default().is_empty());
    }
}
