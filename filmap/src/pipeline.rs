//! Load, select and draw in one go.
//!

use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::info;

use crate::{filter, load, Config, FilmMap, LoadStats, MapOptions, QueryParameters, Resolver};

/// One selected film
///
#[derive(Clone, Debug, PartialEq)]
pub struct Match {
    pub label: String,
    pub location: String,
    /// Distance to the center in meters
    pub distance: f64,
}

/// Result of a run
///
#[derive(Debug)]
pub struct Report {
    pub map: FilmMap,
    pub stats: LoadStats,
    pub matches: Vec<Match>,
}

impl Report {
    /// List the matches into a string using `tabled`.
    ///
    pub fn table(&self) -> String {
        let mut builder = Builder::default();
        builder.push_record(["#", "Film", "Location", "Distance (m)"]);

        self.matches.iter().enumerate().for_each(|(n, m)| {
            builder.push_record([
                (n + 1).to_string(),
                m.label.clone(),
                m.location.clone(),
                format!("{:.0}", m.distance),
            ]);
        });
        builder.build().with(Style::modern()).to_string()
    }
}

/// Read the dataset named in `cfg`, keep what `params` selects and put it on a map.
///
#[tracing::instrument(skip(cfg, resolver))]
pub fn generate_map(
    cfg: &Config,
    params: &QueryParameters,
    resolver: &mut dyn Resolver,
) -> eyre::Result<Report> {
    let dataset = load(&cfg.dataset, resolver)?;

    let selected = filter(&dataset.records, params);
    info!("{} films selected out of {}", selected.len(), dataset.len());

    let opts = MapOptions {
        zoom: cfg.zoom,
        limit: cfg.limit,
        unique: cfg.unique,
    };
    let mut map = FilmMap::new(params.center, opts).with_year(params.target_year);
    map.add_records(selected.iter().copied());

    let matches = selected
        .iter()
        .map(|r| Match {
            label: r.label(),
            location: r.location_text.clone(),
            distance: r.distance_to(&params.center).unwrap_or_default(),
        })
        .collect();

    Ok(Report {
        map,
        stats: dataset.stats,
        matches,
    })
}
