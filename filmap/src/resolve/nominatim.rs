//! Geocoding through an OpenStreetMap [Nominatim] server.
//!
//! The public server asks for at most one request per second and an identifying
//! `User-Agent`, both are enforced here.
//!
//! [Nominatim]: https://nominatim.org/release-docs/develop/api/Search/
//!

use std::thread::sleep;
use std::time::{Duration, Instant};

use eyre::{Result, WrapErr};
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, trace, warn};

use filmap_common::Coordinates;

use crate::Resolver;

/// Default server
pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";

/// HTTP timeout for one lookup
const TIMEOUT: Duration = Duration::from_secs(10);

/// One answer, Nominatim sends numbers as strings.
///
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: String,
}

#[derive(Debug)]
pub struct Nominatim {
    /// Search endpoint
    url: String,
    /// Minimum time between two requests
    delay: Duration,
    /// When we sent the last request
    last: Option<Instant>,
    /// reqwest blocking client
    client: Client,
}

impl Nominatim {
    pub fn new(url: &str, user_agent: &str, delay: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(TIMEOUT)
            .build()
            .wrap_err("Can not create HTTP client")?;
        Ok(Nominatim {
            url: url.to_string(),
            delay,
            last: None,
            client,
        })
    }

    /// Wait until we are allowed to send another request.
    ///
    fn throttle(&mut self) {
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.delay {
                trace!("throttling for {:?}", self.delay - elapsed);
                sleep(self.delay - elapsed);
            }
        }
        self.last = Some(Instant::now());
    }

    #[tracing::instrument(skip(self))]
    fn lookup(&mut self, location: &str) -> Result<Option<Coordinates>> {
        self.throttle();

        let places: Vec<Place> = self
            .client
            .get(self.url.as_str())
            .query(&[("q", location), ("format", "jsonv2"), ("limit", "1")])
            .send()?
            .error_for_status()?
            .json()?;

        let Some(place) = places.first() else {
            return Ok(None);
        };
        debug!("{location} is {}", place.display_name);

        let lat = place.lat.parse::<f64>()?;
        let lon = place.lon.parse::<f64>()?;
        Ok(Some(Coordinates::new(lat, lon)?))
    }
}

impl Resolver for Nominatim {
    fn name(&self) -> &str {
        "nominatim"
    }

    fn resolve(&mut self, location: &str) -> Option<Coordinates> {
        match self.lookup(location) {
            Ok(found) => found,
            Err(e) => {
                warn!("lookup of {location} failed: {e}");
                None
            }
        }
    }
}
