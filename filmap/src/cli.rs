//! Command-line options
//!

use std::path::PathBuf;

use clap::{crate_authors, crate_description, crate_name, crate_version, Parser};

use crate::ResolverKind;

#[derive(Debug, Parser)]
#[command(allow_negative_numbers = true)]
#[clap(name = crate_name!(), about = crate_description!())]
#[clap(version = crate_version!(), author = crate_authors!())]
pub struct Opts {
    /// Configuration file.
    #[clap(short = 'c', long)]
    pub config: Option<PathBuf>,
    /// Output HTML file (default is out_map.html).
    #[clap(short = 'o', long)]
    pub output: Option<PathBuf>,
    /// Search radius in meters (default is 1000).
    #[clap(short = 'r', long)]
    pub radius: Option<f64>,
    /// Accepted difference in years (default is 3).
    #[clap(short = 'y', long)]
    pub year_diff: Option<u32>,
    /// How to find where a location is.
    #[clap(short = 'R', long, value_enum)]
    pub resolver: Option<ResolverKind>,
    /// CSV file for the gazetteer resolver.
    #[clap(short = 'g', long)]
    pub gazetteer: Option<PathBuf>,
    /// Maximum number of markers.
    #[clap(short = 'l', long)]
    pub limit: Option<usize>,
    /// Only one marker per position.
    #[clap(short = 'u', long)]
    pub unique: bool,
    /// Initial zoom level (default is 17).
    #[clap(short = 'z', long)]
    pub zoom: Option<u8>,
    /// No banner, no list of films.
    #[clap(short = 'q', long)]
    pub quiet: bool,
    /// Hierarchical logs.
    #[clap(long)]
    pub tree: bool,
    /// Also log into hourly files in this directory.
    #[clap(long)]
    pub log_dir: Option<PathBuf>,
    /// Year of the films.
    pub year: i32,
    /// Latitude of the center.
    pub latitude: f64,
    /// Longitude of the center.
    pub longitude: f64,
    /// Locations file.
    pub dataset: Option<PathBuf>,
}
