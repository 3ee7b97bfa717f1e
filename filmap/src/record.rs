//! One entry of the locations dataset.
//!

use std::fmt;

use serde::Serialize;

use filmap_common::Coordinates;

/// A film and one of its shooting locations.
///
/// `coordinates` and `year` are optional; such a record is kept by the loader but never matches
/// a query.
///
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FilmLocationRecord {
    /// Title, without the year
    pub title: String,
    /// Location as written in the dataset
    pub location_text: String,
    /// Resolved position
    pub coordinates: Option<Coordinates>,
    /// Release year, `None` when listed as `(????)`
    pub year: Option<i32>,
}

impl FilmLocationRecord {
    pub fn new(title: &str, location_text: &str, year: Option<i32>) -> Self {
        FilmLocationRecord {
            title: title.to_string(),
            location_text: location_text.to_string(),
            coordinates: None,
            year,
        }
    }

    /// Same record, positioned
    ///
    pub fn with_coordinates(self, coordinates: Coordinates) -> Self {
        FilmLocationRecord {
            coordinates: Some(coordinates),
            ..self
        }
    }

    /// Label used on the map: `Title (2010)`.
    ///
    pub fn label(&self) -> String {
        match self.year {
            Some(year) => format!("{} ({})", self.title, year),
            None => format!("{} (????)", self.title),
        }
    }

    /// Distance in meters to `point`, if we know where this is.
    ///
    pub fn distance_to(&self, point: &Coordinates) -> Option<f64> {
        self.coordinates.map(|c| c.distance(point))
    }
}

impl fmt::Display for FilmLocationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.label(), self.location_text)
    }
}
