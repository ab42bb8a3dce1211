use geo::Point;

/// Search centre. `x` is the latitude and `y` the longitude.
pub type Location = Point;

// https://tinyurl.com/suidar
const GRID: [(f64, f64); 26] = [
    (1.448065, 103.808533),
    (1.408855, 103.734970),
    (1.429104, 103.770676),
    (1.418250, 103.829271),
    (1.402442, 103.875811),
    (1.398666, 103.921817),
    (1.364635, 103.712674),
    (1.370001, 103.757378),
    (1.369041, 103.841400),
    (1.361941, 103.888858),
    (1.357822, 103.936580),
    (1.369149, 103.980182),
    (1.331685, 103.677998),
    (1.327909, 103.727093),
    (1.327175, 103.766966),
    (1.330608, 103.807211),
    (1.327862, 103.852873),
    (1.324872, 103.900874),
    (1.309351, 103.940013),
    (1.328915, 103.975718),
    (1.284271, 103.787909),
    (1.288733, 103.829183),
    (1.289076, 103.876562),
    (1.248231, 103.823347),
    (1.401291, 103.786646),
    (1.454833, 103.849131),
];

pub fn all() -> Vec<Location> {
    GRID.iter().map(|&(lat, lng)| Point::new(lat, lng)).collect()
}

/// `lat,lng`, the format the nearby search expects in its `location` parameter.
pub fn query_value(location: &Location) -> String {
    format!("{},{}", location.x(), location.y())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_order() {
        let all = all();
        assert_eq!(all.len(), 26);
        assert_eq!(all[0], Point::new(1.448065, 103.808533));
        assert_eq!(all[25], Point::new(1.454833, 103.849131));
    }

    #[test]
    fn query_value_is_lat_first() {
        assert_eq!(
            query_value(&Point::new(1.248231, 103.823347)),
            "1.248231,103.823347"
        );
        assert_eq!(query_value(&Point::new(1.40885, 103.73497)), "1.40885,103.73497");
    }
}
