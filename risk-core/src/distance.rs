use geoutils::Location;

use crate::Coordinates;

/// Great-circle distance between two positions in kilometers, haversine over
/// a 6371 km mean Earth radius.
pub fn haversine_km(from: &Coordinates, to: &Coordinates) -> f64 {
    let from = Location::new(from.latitude, from.longitude);
    let to = Location::new(to.latitude, to.longitude);

    from.haversine_distance_to(&to).meters() / 1000.0
}
