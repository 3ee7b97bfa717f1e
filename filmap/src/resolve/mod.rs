//! Turn a location string into coordinates.
//!
//! Every resolver implements [`Resolver`].  Lookups never fail hard: anything that goes wrong
//! is logged and the location is left unresolved.
//!
//! - [`Nominatim`] asks an OpenStreetMap geocoder over HTTP,
//! - [`Gazetteer`] reads a local CSV table,
//! - [`Offline`] knows nothing, only positions embedded in the dataset are used,
//! - [`Cached`] remembers the answers of another resolver.
//!

use std::collections::HashMap;
use std::time::Duration;

use clap::ValueEnum;
use eyre::Result;
use serde::Deserialize;
use strum::{EnumString, VariantNames};
use tracing::{debug, trace};

use filmap_common::Coordinates;

pub use gazetteer::*;
pub use nominatim::*;

use crate::Config;

mod gazetteer;
mod nominatim;

/// Something able to locate a place from its name.
///
pub trait Resolver {
    /// Name used in logs.
    fn name(&self) -> &str;
    /// Find where `location` is, `None` if unknown or if the lookup failed.
    fn resolve(&mut self, location: &str) -> Option<Coordinates>;
}

impl<R: Resolver + ?Sized> Resolver for Box<R> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn resolve(&mut self, location: &str) -> Option<Coordinates> {
        (**self).resolve(location)
    }
}

/// Which resolver to use, from the CLI or the configuration file.
///
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    EnumString,
    PartialEq,
    strum::Display,
    ValueEnum,
    VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ResolverKind {
    /// OpenStreetMap Nominatim geocoder
    #[default]
    Nominatim,
    /// Local CSV table
    Gazetteer,
    /// No lookup at all
    #[serde(rename = "none")]
    #[strum(serialize = "none")]
    #[value(name = "none")]
    Offline,
}

/// Resolver that never finds anything.
///
#[derive(Debug, Default)]
pub struct Offline;

impl Resolver for Offline {
    fn name(&self) -> &str {
        "none"
    }

    fn resolve(&mut self, _location: &str) -> Option<Coordinates> {
        None
    }
}

/// Memoize answers, including negative ones, so that a location is only looked up once.
///
#[derive(Debug)]
pub struct Cached<R: Resolver> {
    inner: R,
    seen: HashMap<String, Option<Coordinates>>,
    /// Number of answers served from the cache
    pub hits: usize,
}

impl<R: Resolver> Cached<R> {
    pub fn new(inner: R) -> Self {
        Cached {
            inner,
            seen: HashMap::new(),
            hits: 0,
        }
    }

    /// Number of distinct locations asked
    ///
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

impl<R: Resolver> Resolver for Cached<R> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn resolve(&mut self, location: &str) -> Option<Coordinates> {
        if let Some(known) = self.seen.get(location) {
            trace!("cache hit for {location}");
            self.hits += 1;
            return *known;
        }
        let found = self.inner.resolve(location);
        self.seen.insert(location.to_string(), found);
        found
    }
}

/// Build the resolver described by the configuration, wrapped in a cache.
///
#[tracing::instrument(skip(cfg))]
pub fn resolver_from(cfg: &Config) -> Result<Cached<Box<dyn Resolver>>> {
    let inner: Box<dyn Resolver> = match cfg.resolver {
        ResolverKind::Nominatim => {
            let nm = &cfg.nominatim;
            Box::new(Nominatim::new(
                &nm.url,
                &nm.user_agent,
                Duration::from_millis(nm.delay),
            )?)
        }
        ResolverKind::Gazetteer => Box::new(Gazetteer::load(&cfg.gazetteer)?),
        ResolverKind::Offline => Box::new(Offline),
    };
    debug!("using resolver {}", inner.name());
    Ok(Cached::new(inner))
}
