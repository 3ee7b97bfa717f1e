//! Select the records close enough in space and time.
//!

use tracing::trace;

use filmap_common::Coordinates;

use crate::{FilmLocationRecord, Status};

/// Tolerance on the radius, in meters, to absorb rounding in the distance computation.
pub const DISTANCE_EPSILON: f64 = 1e-3;

/// What we are looking for.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QueryParameters {
    /// Center of the search
    pub center: Coordinates,
    /// Year of the films
    pub target_year: i32,
    /// Accepted difference in years, `u32::MAX` means any year
    pub year_diff: u32,
    /// Search radius in meters, may be infinite
    pub radius: f64,
}

impl QueryParameters {
    /// Checked constructor, `center` is checked again in case it was built by hand.
    ///
    pub fn new(
        center: Coordinates,
        target_year: i32,
        year_diff: u32,
        radius: f64,
    ) -> Result<Self, Status> {
        if radius.is_nan() || radius < 0.0 {
            return Err(Status::BadParameter(format!("radius {radius}")));
        }
        let center = Coordinates::new(center.lat, center.lon)
            .map_err(|e| Status::BadParameter(e.to_string()))?;
        Ok(QueryParameters {
            center,
            target_year,
            year_diff,
            radius,
        })
    }

    /// Does `record` fall within the query?  Records without position or year never do.
    ///
    pub fn matches(&self, record: &FilmLocationRecord) -> bool {
        let (Some(pos), Some(year)) = (record.coordinates, record.year) else {
            return false;
        };
        if year.abs_diff(self.target_year) > self.year_diff {
            return false;
        }
        let dist = self.center.distance(&pos);
        trace!("{} is {dist:.1} m away", record.title);
        dist <= self.radius + DISTANCE_EPSILON
    }
}

/// Keep the matching records, in order.
///
#[tracing::instrument(skip(records))]
pub fn filter<'a>(
    records: &'a [FilmLocationRecord],
    params: &QueryParameters,
) -> Vec<&'a FilmLocationRecord> {
    records.iter().filter(|r| params.matches(r)).collect()
}
