//! Configuration module
//!
//! Everything the pipeline needs besides the query itself is in [`Config`], read from
//! `$HOME/.config/filmap/config.hcl` (or the file given with `-c`) and then overridden by the
//! command-line.
//!
//! ```hcl
//! version = 1
//!
//! dataset   = "locations.list"
//! output    = "out_map.html"
//! radius    = 1000.0
//! year_diff = 3
//! resolver  = "nominatim"
//!
//! nominatim {
//!   url        = "https://nominatim.openstreetmap.org/search"
//!   user_agent = "filmap"
//!   delay      = 1000
//! }
//! ```
//!

use std::path::{Path, PathBuf};

use eyre::Result;
use serde::Deserialize;
use tracing::trace;

use filmap_common::{ConfigFile, IntoConfig, Versioned};

use crate::{Opts, ResolverKind, NOMINATIM_URL};

/// Current version
pub const CVERSION: usize = 1;

/// Default output file
pub const DEF_OUTPUT: &str = "out_map.html";
/// Default dataset
pub const DEF_DATASET: &str = "locations.list";
/// Default search radius, in meters
pub const DEF_RADIUS: f64 = 1_000.0;
/// Default tolerance on the year
pub const DEF_YEAR_DIFF: u32 = 3;
/// Default initial zoom level
pub const DEF_ZOOM: u8 = 17;
/// Delay between two geocoding requests, in ms
pub const DEF_DELAY: u64 = 1_000;

/// Nominatim access parameters
///
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct NominatimConfig {
    /// Search endpoint
    pub url: String,
    /// Who we are
    pub user_agent: String,
    /// Minimum time between two requests, in ms
    pub delay: u64,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        NominatimConfig {
            url: NOMINATIM_URL.to_string(),
            user_agent: format!("filmap/{}", env!("CARGO_PKG_VERSION")),
            delay: DEF_DELAY,
        }
    }
}

/// Configuration for the pipeline
///
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// File format version
    pub version: usize,
    /// Locations list
    pub dataset: PathBuf,
    /// HTML file to write
    pub output: PathBuf,
    /// Search radius in meters
    pub radius: f64,
    /// Accepted difference on the year
    pub year_diff: u32,
    /// How to turn location names into coordinates
    pub resolver: ResolverKind,
    /// CSV file for the gazetteer resolver
    pub gazetteer: PathBuf,
    /// Nominatim parameters
    pub nominatim: NominatimConfig,
    /// Initial zoom level
    pub zoom: u8,
    /// Maximum number of markers
    pub limit: Option<usize>,
    /// Only one marker per position
    pub unique: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            version: CVERSION,
            dataset: PathBuf::from(DEF_DATASET),
            output: PathBuf::from(DEF_OUTPUT),
            radius: DEF_RADIUS,
            year_diff: DEF_YEAR_DIFF,
            resolver: ResolverKind::default(),
            gazetteer: PathBuf::from("gazetteer.csv"),
            nominatim: NominatimConfig::default(),
            zoom: DEF_ZOOM,
            limit: None,
            unique: false,
        }
    }
}

impl Versioned for Config {
    fn version(&self) -> usize {
        self.version
    }
}

impl IntoConfig for Config {
    const VERSION: usize = CVERSION;
    const FILENAME: &'static str = "config.hcl";
}

impl Config {
    /// Read the given file, or the default one, or use defaults.
    ///
    #[tracing::instrument]
    pub fn load(fname: Option<&Path>) -> Result<Config> {
        let cfile = ConfigFile::<Config>::load(fname)?;
        trace!("config from {:?}", cfile.source());
        Ok(cfile.into_inner())
    }

    /// Command-line values take precedence over the file.
    ///
    pub fn merge(mut self, opts: &Opts) -> Config {
        if let Some(dataset) = &opts.dataset {
            self.dataset = dataset.clone();
        }
        if let Some(output) = &opts.output {
            self.output = output.clone();
        }
        if let Some(radius) = opts.radius {
            self.radius = radius;
        }
        if let Some(year_diff) = opts.year_diff {
            self.year_diff = year_diff;
        }
        if let Some(resolver) = opts.resolver {
            self.resolver = resolver;
        }
        if let Some(gazetteer) = &opts.gazetteer {
            self.gazetteer = gazetteer.clone();
        }
        if let Some(zoom) = opts.zoom {
            self.zoom = zoom;
        }
        if opts.limit.is_some() {
            self.limit = opts.limit;
        }
        self.unique |= opts.unique;
        self
    }
}
