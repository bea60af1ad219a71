/// Clamps a latitude in degrees to [-90, 90]
///
/// NaN maps to the equator.
#[inline]
pub fn clamp_latitude(lat: f64) -> f64 {
    if lat.is_nan() {
        return 0.0;
    }
    lat.min(90.0).max(-90.0)
}

/// Wraps a longitude in degrees into [-180, 180)
///
/// +180 maps to -180. Non-finite input maps to the prime meridian.
#[inline]
pub fn normalize_longitude(lon: f64) -> f64 {
    if !lon.is_finite() {
        return 0.0;
    }

    // rem_euclid can round up to the divisor for tiny negative operands
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped >= 180.0 {
        -180.0
    } else {
        wrapped
    }
}
