//! Polyline representation for route geometries.
//!
//! Paths are held as decoded coordinate sequences. The compact encoded
//! format (precision 5, as produced by OSRM with `geometries=polyline`)
//! only appears at the boundary, when a directions response is parsed.

use serde::{Deserialize, Serialize};

use crate::error::PolylineError;
use crate::geo::{Bounds, LatLng};
use crate::haversine::haversine_m;

/// Scale factor for precision-5 encoded polylines.
const PRECISION_FACTOR: f64 = 1e5;

/// Maximum bit shift before a single encoded value stops fitting in an i64.
const MAX_SHIFT: u32 = 60;

/// A polyline representing a route geometry as decoded coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<LatLng>,
}

impl Polyline {
    /// Wraps already decoded points. Only valid coordinates survive an
    /// [`encode`](Self::encode) / [`decode`](Self::decode) round trip.
    pub fn new(points: Vec<LatLng>) -> Self {
        Self { points }
    }

    /// Decodes an encoded polyline string.
    ///
    /// Fails if the running coordinate sums overflow or if any decoded point
    /// lies outside valid latitude/longitude ranges.
    pub fn decode(encoded: &str) -> Result<Self, PolylineError> {
        let bytes = encoded.as_bytes();
        let mut offset = 0;
        let mut lat = 0i64;
        let mut lng = 0i64;
        let mut points = Vec::new();

        while offset < bytes.len() {
            lat = accumulate(lat, bytes, &mut offset)?;
            lng = accumulate(lng, bytes, &mut offset)?;
            points.push(LatLng::new(
                lat as f64 / PRECISION_FACTOR,
                lng as f64 / PRECISION_FACTOR,
            ));
        }

        if let Some(index) = points.iter().position(|point| !point.is_valid()) {
            return Err(PolylineError::OutOfRange { index });
        }

        Ok(Self { points })
    }

    /// Encodes the points as a precision-5 polyline string.
    pub fn encode(&self) -> String {
        let mut encoded = String::new();
        let mut prev_lat = 0i64;
        let mut prev_lng = 0i64;

        for point in &self.points {
            let lat = (point.lat * PRECISION_FACTOR).round() as i64;
            let lng = (point.lng * PRECISION_FACTOR).round() as i64;
            // Saturated casts of non-finite points can make the delta wrap.
            push_value(lat.wrapping_sub(prev_lat), &mut encoded);
            push_value(lng.wrapping_sub(prev_lng), &mut encoded);
            prev_lat = lat;
            prev_lng = lng;
        }

        encoded
    }

    pub fn points(&self) -> &[LatLng] {
        &self.points
    }

    pub fn into_points(self) -> Vec<LatLng> {
        self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.points.iter().copied())
    }

    /// Great-circle length of the path in metres.
    pub fn length_m(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| haversine_m(pair[0], pair[1]))
            .sum()
    }
}

/// Adds the next delta to a running coordinate sum.
fn accumulate(sum: i64, bytes: &[u8], offset: &mut usize) -> Result<i64, PolylineError> {
    let start = *offset;
    let delta = next_value(bytes, offset)?;
    sum.checked_add(delta).ok_or(PolylineError::Overflow { offset: start })
}

fn next_value(bytes: &[u8], offset: &mut usize) -> Result<i64, PolylineError> {
    let start = *offset;
    let mut result = 0i64;
    let mut shift = 0u32;

    loop {
        let byte = *bytes
            .get(*offset)
            .ok_or(PolylineError::Truncated { offset: *offset })?;
        if !(63..127).contains(&byte) {
            return Err(PolylineError::InvalidByte {
                offset: *offset,
                byte,
            });
        }
        if shift > MAX_SHIFT {
            return Err(PolylineError::Overflow { offset: start });
        }
        *offset += 1;

        let chunk = i64::from(byte - 63);
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        if chunk < 0x20 {
            break;
        }
    }

    Ok(if result & 1 != 0 {
        !(result >> 1)
    } else {
        result >> 1
    })
}

fn push_value(value: i64, out: &mut String) {
    let mut value = ((value << 1) ^ (value >> 63)) as u64;
    while value >= 0x20 {
        out.push(char::from((0x20 | (value & 0x1f)) as u8 + 63));
        value >>= 5;
    }
    out.push(char::from(value as u8 + 63));
}

#[cfg(test)]
mod tests {
    use super::*;

    // Reference vector from the encoded polyline format documentation.
    const ENCODED: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

    fn reference_points() -> Vec<LatLng> {
        vec![
            LatLng::new(38.5, -120.2),
            LatLng::new(40.7, -120.95),
            LatLng::new(43.252, -126.453),
        ]
    }

    #[test]
    fn test_decode_reference() {
        let polyline = Polyline::decode(ENCODED).unwrap();
        assert_eq!(polyline.points(), &reference_points()[..]);
    }

    #[test]
    fn test_encode_reference() {
        let polyline = Polyline::new(reference_points());
        assert_eq!(polyline.encode(), ENCODED);
    }

    #[test]
    fn test_decode_empty() {
        let polyline = Polyline::decode("").unwrap();
        assert!(polyline.is_empty());
        assert_eq!(polyline.bounds(), None);
    }

    #[test]
    fn test_decode_truncated() {
        // Drop the final byte so the last longitude never terminates.
        let truncated = &ENCODED[..ENCODED.len() - 1];
        let err = Polyline::decode(truncated).unwrap_err();
        assert!(matches!(err, PolylineError::Truncated { .. }));
    }

    #[test]
    fn test_decode_missing_longitude() {
        // "_p~iF" is a complete latitude with no longitude after it.
        let err = Polyline::decode("_p~iF").unwrap_err();
        assert_eq!(err, PolylineError::Truncated { offset: 5 });
    }

    #[test]
    fn test_decode_invalid_byte() {
        let err = Polyline::decode("_p~iF ps|U").unwrap_err();
        assert_eq!(err, PolylineError::InvalidByte { offset: 5, byte: b' ' });
    }

    #[test]
    fn test_decode_overflow() {
        let endless = "~".repeat(20);
        let err = Polyline::decode(&endless).unwrap_err();
        assert_eq!(err, PolylineError::Overflow { offset: 0 });
    }

    #[test]
    fn test_decode_running_sum_overflow() {
        // Each group is a single delta of 2^61 - 1, ten values in all. The
        // fifth latitude pushes the running sum past i64::MAX.
        let huge = "}~~~~~~~~~~~B".repeat(10);
        let err = Polyline::decode(&huge).unwrap_err();
        assert_eq!(err, PolylineError::Overflow { offset: 104 });
    }

    #[test]
    fn test_decode_out_of_range_point() {
        let encoded = Polyline::new(vec![LatLng::new(38.5, -120.2), LatLng::new(100.0, -120.2)]).encode();
        let err = Polyline::decode(&encoded).unwrap_err();
        assert_eq!(err, PolylineError::OutOfRange { index: 1 });

        // A single huge delta decodes without overflowing but is not a coordinate.
        let err = Polyline::decode("}~~~~~~~~~~~B?").unwrap_err();
        assert_eq!(err, PolylineError::OutOfRange { index: 0 });
    }

    #[test]
    fn test_encode_non_finite_points() {
        let wild = Polyline::new(vec![
            LatLng::new(f64::INFINITY, f64::NEG_INFINITY),
            LatLng::new(f64::NEG_INFINITY, f64::INFINITY),
            LatLng::new(f64::NAN, 0.0),
        ]);
        let encoded = wild.encode();
        assert!(!encoded.is_empty());
        assert!(encoded.bytes().all(|byte| (63..127).contains(&byte)));
    }

    #[test]
    fn test_bounds_and_into_points() {
        let polyline = Polyline::new(reference_points());
        let bounds = polyline.bounds().unwrap();
        assert_eq!(bounds.south_west, LatLng::new(38.5, -126.453));
        assert_eq!(bounds.north_east, LatLng::new(43.252, -120.2));
        assert_eq!(polyline.into_points(), reference_points());
    }

    #[test]
    fn test_length() {
        let single = Polyline::new(vec![LatLng::new(36.17, -115.14)]);
        assert_eq!(single.length_m(), 0.0);

        // One degree of latitude is roughly 111 km.
        let north = Polyline::new(vec![LatLng::new(0.0, 0.0), LatLng::new(1.0, 0.0)]);
        let length = north.length_m();
        assert!(length > 110_000.0 && length < 112_000.0, "got {}", length);
    }
}
