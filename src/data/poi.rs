use crate::core::{geo::LatLng, theater::Theater};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PoiKind {
    Base,
    Strait,
    Sea,
    City,
    Province,
}

/// Static reference point drawn under the assets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub name: String,
    pub position: LatLng,
    pub kind: PoiKind,
    pub theater: Theater,
}

impl PointOfInterest {
    fn new(name: &str, lat: f64, lng: f64, kind: PoiKind, theater: Theater) -> Self {
        Self {
            name: name.to_string(),
            position: LatLng::new(lat, lng),
            kind,
            theater,
        }
    }
}

static STRATEGIC_POIS: Lazy<Vec<PointOfInterest>> = Lazy::new(|| {
    use PoiKind::*;
    use Theater::*;

    let p = PointOfInterest::new;
    vec![
        // North America
        p("Washington D.C.", 38.8951, -77.0364, City, Global),
        p("Ottawa", 45.4215, -75.6972, City, Global),
        p("Mexico City", 19.4326, -99.1332, City, Global),
        // Europe
        p("London", 51.5074, -0.1278, City, Global),
        p("Paris", 48.8566, 2.3522, City, Global),
        p("Berlin", 52.5200, 13.4050, City, Global),
        p("Brussels", 50.8503, 4.3517, City, Global),
        p("Rome", 41.9028, 12.4964, City, Global),
        p("Madrid", 40.4168, -3.7038, City, Global),
        p("Warsaw", 52.2297, 21.0122, City, Global),
        p("Kyiv", 50.4501, 30.5234, City, Ukraine),
        p("Moscow", 55.7558, 37.6173, City, Ukraine),
        p("Oslo", 59.9139, 10.7522, City, Global),
        p("Helsinki", 60.1699, 24.9384, City, Global),
        p("Stockholm", 59.3293, 18.0686, City, Global),
        p("Copenhagen", 55.6761, 12.5683, City, Global),
        p("Athens", 37.9838, 23.7275, City, Global),
        p("Lisbon", 38.7223, -9.1393, City, Global),
        // Middle East and Iran
        p("Tehran", 35.6892, 51.3890, City, Iran),
        p("Isfahan", 32.6539, 51.6660, City, Iran),
        p("Shiraz", 29.5918, 52.5837, City, Iran),
        p("Jerusalem", 31.7683, 35.2137, City, MiddleEast),
        p("Riyadh", 24.7136, 46.6753, City, MiddleEast),
        p("Cairo", 30.0444, 31.2357, City, MiddleEast),
        p("Baghdad", 33.3128, 44.3615, City, MiddleEast),
        p("Ankara", 39.9334, 32.8597, City, MiddleEast),
        p("Doha", 25.2854, 51.5310, City, MiddleEast),
        p("Abu Dhabi", 24.4539, 54.3773, City, MiddleEast),
        // Asia Pacific
        p("Beijing", 39.9042, 116.4074, City, Pacific),
        p("Tokyo", 35.6762, 139.6503, City, Pacific),
        p("Seoul", 37.5665, 126.9780, City, Pacific),
        p("Taipei", 25.0330, 121.5654, City, Pacific),
        p("New Delhi", 28.6139, 77.2090, City, Pacific),
        p("Canberra", -35.2809, 149.1300, City, Global),
        p("Jakarta", -6.2088, 106.8456, City, Pacific),
        p("Hanoi", 21.0285, 105.8542, City, Pacific),
        p("Singapore", 1.3521, 103.8198, City, Pacific),
        // Africa
        p("Nairobi", -1.2921, 36.8219, City, Africa),
        p("Pretoria", -25.7479, 28.2293, City, Africa),
        p("Addis Ababa", 9.0306, 38.7469, City, Africa),
        p("Algiers", 36.7538, 3.0588, City, Africa),
        p("Abuja", 9.0765, 7.3986, City, Africa),
        // South America
        p("Brasilia", -15.7975, -47.8919, City, SouthCentralAmerica),
        p("Buenos Aires", -34.6037, -58.3816, City, SouthCentralAmerica),
        p("Bogota", 4.7110, -74.0721, City, SouthCentralAmerica),
        p("Santiago", -33.4489, -70.6693, City, SouthCentralAmerica),
        p("Lima", -12.0464, -77.0428, City, SouthCentralAmerica),
        // Maritime and tactical
        p("Strait of Hormuz", 26.5, 56.2, Strait, Iran),
        p("Bab-el-Mandeb", 12.6, 43.3, Strait, MiddleEast),
        p("Bushehr Nuclear Plant", 28.8, 50.8, Base, Iran),
        p("Kharg Island", 29.2, 50.3, Base, Iran),
        p("Bandar Abbas Base", 27.2, 56.3, Base, Iran),
    ]
});

/// The fixed point-of-interest roster
pub fn strategic_pois() -> &'static [PointOfInterest] {
    &STRATEGIC_POIS
}

/// Points of interest owned by `theater`
pub fn pois_in(theater: Theater) -> impl Iterator<Item = &'static PointOfInterest> {
    strategic_pois().iter().filter(move |p| p.theater == theater)
}
