/// Coordinates of the Kaaba in Mecca.
pub const KAABA_LATITUDE: f64 = 21.4225;
pub const KAABA_LONGITUDE: f64 = 39.8262;

/// Initial great-circle bearing from (`lat`, `lng`) to the Kaaba, in degrees
/// clockwise from true north, within `[0, 360)`.
pub fn qibla_bearing(lat: f64, lng: f64) -> f64 {
    let phi1 = lat.to_radians();
    let phi2 = KAABA_LATITUDE.to_radians();
    let delta_lambda = (KAABA_LONGITUDE - lng).to_radians();

    let y = delta_lambda.sin();
    let x = phi1.cos() * phi2.tan() - phi1.sin() * delta_lambda.cos();
    let bearing = y.atan2(x).to_degrees();
    bearing.rem_euclid(360.0)
}

/// Nearest of the eight compass points for a bearing in degrees.
pub fn compass_point(bearing: f64) -> &'static str {
    const POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
    let idx = ((bearing.rem_euclid(360.0) + 22.5) / 45.0) as usize % 8;
    POINTS[idx]
}
