// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::fmt;

/// Number of fixed-point units in one degree of latitude or longitude.
pub const FIXED_POINT_SCALE: i64 = 100_000;

/// Largest absolute latitude, in decimal degrees.
pub const MAX_LATITUDE: f64 = 90.0;

/// Largest absolute longitude, in decimal degrees.
pub const MAX_LONGITUDE: f64 = 180.0;

/// A position on Earth, in fixed-point units of 10<sup>-5</sup> degree.
///
/// Integers are used instead of floats so that distance comparisons
/// are exact and reproducible.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub lat: i64,
    pub lon: i64,
}

impl Point {
    pub const fn new(lat: i64, lon: i64) -> Self {
        Self { lat, lon }
    }

    /// Converts a position given in decimal degrees into fixed-point units,
    /// rounding to the nearest unit.
    ///
    /// Panics if the position is outside of the valid latitude or longitude range;
    /// use [Point::try_from_degrees] for untrusted input.
    pub fn from_degrees(lat: f64, lon: f64) -> Self {
        match Self::try_from_degrees(lat, lon) {
            Some(p) => p,
            None => panic!("position out of range: {} {}", lat, lon),
        }
    }

    /// Converts a position given in decimal degrees into fixed-point units,
    /// rounding to the nearest unit. Returns [None] if the latitude is not within
    /// ±[MAX_LATITUDE] or the longitude is not within ±[MAX_LONGITUDE].
    ///
    /// Keeping coordinates in range bounds every [manhattan_distance]
    /// well below [u64::MAX].
    pub fn try_from_degrees(lat: f64, lon: f64) -> Option<Self> {
        if is_valid_degrees(lat, MAX_LATITUDE) && is_valid_degrees(lon, MAX_LONGITUDE) {
            Some(Self {
                lat: degrees_to_fixed(lat),
                lon: degrees_to_fixed(lon),
            })
        } else {
            None
        }
    }
}

/// Returns `true` if `degrees` is a finite number within `-limit..=limit`.
pub fn is_valid_degrees(degrees: f64, limit: f64) -> bool {
    degrees.is_finite() && degrees.abs() <= limit
}

/// Formats the point as `"<lat> <lon>"` with exactly 5 decimal places,
/// computed without going through floating point.
impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_fixed(f, self.lat)?;
        f.write_str(" ")?;
        write_fixed(f, self.lon)
    }
}

fn degrees_to_fixed(degrees: f64) -> i64 {
    (degrees * FIXED_POINT_SCALE as f64).round() as i64
}

fn write_fixed(f: &mut fmt::Formatter<'_>, value: i64) -> fmt::Result {
    let sign = if value < 0 { "-" } else { "" };
    let abs = value.unsigned_abs();
    let scale = FIXED_POINT_SCALE as u64;
    write!(f, "{}{}.{:05}", sign, abs / scale, abs % scale)
}

/// Calculates the [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry)
/// between two points, in fixed-point units.
pub fn manhattan_distance(a: Point, b: Point) -> u64 {
    a.lat.abs_diff(b.lat) + a.lon.abs_diff(b.lon)
}
