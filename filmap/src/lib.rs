//! Put the films shot near a place on a map.
//!
//! The pipeline reads a locations file (IMDb `locations.list` style) into
//! [`FilmLocationRecord`]s, resolving location names through a [`Resolver`], keeps the
//! records selected by [`QueryParameters`] and writes them as markers on a Leaflet map.
//!
//! ```no_run
//! use filmap::{generate_map, resolver_from, Config, QueryParameters};
//! use filmap_common::Coordinates;
//!
//! # fn main() -> eyre::Result<()> {
//! let cfg = Config::default();
//! let center = Coordinates::new(34.0536909, -118.242766)?;
//! let params = QueryParameters::new(center, 2010, 3, 1000.0)?;
//!
//! let mut resolver = resolver_from(&cfg)?;
//! let report = generate_map(&cfg, &params, &mut resolver)?;
//! report.map.save(&cfg.output)?;
//! # Ok(())
//! # }
//! ```
//!

use clap::{crate_name, crate_version};

pub use cli::*;
pub use config::*;
pub use error::*;
pub use filter::*;
pub use loader::*;
pub use map::*;
pub use parse::*;
pub use pipeline::*;
pub use record::*;
pub use resolve::*;

mod cli;
mod config;
mod error;
mod filter;
mod loader;
mod map;
mod parse;
mod pipeline;
mod record;
mod resolve;

const NAME: &str = crate_name!();
const VERSION: &str = crate_version!();

/// Returns the library version
///
pub fn version() -> String {
    format!("{}/{}", NAME, VERSION)
}
