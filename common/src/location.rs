//! Location related module
//!
//! A location is a latitude/longitude pair in decimal degrees, north and east being positive.
//! Distances are great-circle distances on a spherical Earth, in meters.
//!
use std::fmt;
use std::str::FromStr;

use geo::{point, HaversineDistance};
use nom::{
    character::complete::{char, space0},
    combinator::all_consuming,
    number::complete::double,
    sequence::{delimited, separated_pair},
    IResult,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Mean Earth radius in meters, the one `geo` uses for haversine distances
pub const EARTH_RADIUS: f64 = 6_371_008.8;

#[derive(Debug, Error, PartialEq)]
pub enum LocationError {
    #[error("Latitude {0} is not in [-90, 90]")]
    BadLatitude(f64),
    #[error("Longitude {0} is not in [-180, 180]")]
    BadLongitude(f64),
    #[error("Can not parse '{0}' as latitude,longitude")]
    Unparsable(String),
}

/// Actual location
///
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Coordinates {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lon: f64,
}

impl Coordinates {
    /// Create a checked pair
    ///
    pub fn new(lat: f64, lon: f64) -> Result<Self, LocationError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(LocationError::BadLatitude(lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(LocationError::BadLongitude(lon));
        }
        Ok(Coordinates { lat, lon })
    }

    /// Haversine distance to `other`, in meters.
    ///
    pub fn distance(&self, other: &Coordinates) -> f64 {
        let here = point!(x: self.lon, y: self.lat);
        let there = point!(x: other.lon, y: other.lat);
        here.haversine_distance(&there)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}

impl FromStr for Coordinates {
    type Err = LocationError;

    /// Parse "lat,lon" with optional blanks around the comma.
    ///
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (_, (lat, lon)) = all_consuming(delimited(space0, lat_lon, space0))(s)
            .map_err(|_| LocationError::Unparsable(s.to_string()))?;
        Coordinates::new(lat, lon)
    }
}

/// Parse `<lat> , <lon>`, unchecked.
///
pub fn lat_lon(input: &str) -> IResult<&str, (f64, f64)> {
    separated_pair(double, delimited(space0, char(','), space0), double)(input)
}

/// Parse a bracketed annotation such as `[34.05, -118.24]`, unchecked.
///
pub fn bracketed_lat_lon(input: &str) -> IResult<&str, (f64, f64)> {
    delimited(char('['), delimited(space0, lat_lon, space0), char(']'))(input)
}
