use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

/// spherical radius used by EPSG:3857
const R: f64 = 6_378_137.0;

/// latitude bound of the square Web Mercator world
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

pub fn wgs84_to_web_mercator(lon_deg: f64, lat_deg: f64) -> (f64, f64) {
    let x = R * lon_deg.to_radians();
    let y = R * (FRAC_PI_4 + lat_deg.to_radians() / 2.0).tan().ln();
    (x, y)
}

pub fn web_mercator_to_wgs84(x: f64, y: f64) -> (f64, f64) {
    let lon = (x / R).to_degrees();
    let lat = (2.0 * (y / R).exp().atan() - FRAC_PI_2).to_degrees();
    (lon, lat)
}
