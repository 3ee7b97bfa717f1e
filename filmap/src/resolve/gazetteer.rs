//! Offline resolver reading a CSV table of known places.
//!
//! ```text
//! location,lat,lon
//! "Los Angeles, California, USA",34.0536909,-118.242766
//! ```
//!
//! Matching ignores case and surrounding blanks.
//!

use std::collections::HashMap;
use std::path::Path;

use eyre::{Result, WrapErr};
use serde::Deserialize;
use tracing::{debug, warn};

use filmap_common::Coordinates;

use crate::{Resolver, Status};

#[derive(Debug, Deserialize)]
struct Entry {
    location: String,
    lat: f64,
    lon: f64,
}

#[derive(Debug, Default)]
pub struct Gazetteer {
    places: HashMap<String, Coordinates>,
}

#[inline]
fn key(location: &str) -> String {
    location.trim().to_lowercase()
}

impl Gazetteer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a CSV file with a `location,lat,lon` header.  Bad rows are skipped.
    ///
    #[tracing::instrument]
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Status::FileNotFound(path.display().to_string()).into());
        }

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .wrap_err_with(|| format!("Can not open {}", path.display()))?;

        let mut gz = Gazetteer::new();
        for (n, row) in rdr.deserialize::<Entry>().enumerate() {
            let entry = match row {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("{}: skipping row {}: {e}", path.display(), n + 1);
                    continue;
                }
            };
            match Coordinates::new(entry.lat, entry.lon) {
                Ok(c) => gz.insert(&entry.location, c),
                Err(e) => warn!("{}: skipping {}: {e}", path.display(), entry.location),
            }
        }
        debug!("{} places loaded", gz.len());
        Ok(gz)
    }

    pub fn insert(&mut self, location: &str, coordinates: Coordinates) {
        self.places.insert(key(location), coordinates);
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

impl FromIterator<(String, Coordinates)> for Gazetteer {
    fn from_iter<T: IntoIterator<Item = (String, Coordinates)>>(iter: T) -> Self {
        let mut gz = Gazetteer::new();
        iter.into_iter().for_each(|(l, c)| gz.insert(&l, c));
        gz
    }
}

impl Resolver for Gazetteer {
    fn name(&self) -> &str {
        "gazetteer"
    }

    fn resolve(&mut self, location: &str) -> Option<Coordinates> {
        self.places.get(&key(location)).copied()
    }
}
