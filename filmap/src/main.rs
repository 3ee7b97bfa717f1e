use clap::{crate_authors, crate_description, crate_version, Parser};
use eyre::Result;
use tracing::{info, trace};

use filmap::{generate_map, resolver_from, Config, Opts, QueryParameters};
use filmap_common::{init_logging, Coordinates};

/// Binary name
pub const NAME: &str = env!("CARGO_BIN_NAME");
/// Binary version
pub const VERSION: &str = crate_version!();
/// Authors
pub const AUTHORS: &str = crate_authors!();

fn main() -> Result<()> {
    let opts = Opts::parse();

    // Initialise logging.
    //
    init_logging(NAME, opts.tree, opts.log_dir.clone())?;
    trace!("modules: {} {}", filmap::version(), filmap_common::version());

    // Banner
    //
    if !opts.quiet {
        banner()?;
    }

    // File first, then the command-line on top.
    //
    let cfg = Config::load(opts.config.as_deref())?.merge(&opts);
    trace!("cfg = {cfg:?}");

    // Check the query before spending time on the dataset.
    //
    let center = Coordinates {
        lat: opts.latitude,
        lon: opts.longitude,
    };
    let params = QueryParameters::new(center, opts.year, cfg.year_diff, cfg.radius)?;

    let mut resolver = resolver_from(&cfg)?;
    let report = generate_map(&cfg, &params, &mut resolver)?;
    info!("{} lookups, {} from cache", resolver.len(), resolver.hits);

    report.map.save(&cfg.output)?;

    if !opts.quiet {
        eprintln!("{}", report.stats);
        if report.matches.is_empty() {
            eprintln!("No films from {} near {}.", params.target_year, params.center);
        } else {
            println!("{}", report.table());
        }
        eprintln!("Map written to {}", cfg.output.display());
    }
    Ok(())
}

/// Display banner
///
fn banner() -> Result<()> {
    Ok(eprintln!(
        r##"
{}/{} by {}
{}
"##,
        NAME,
        VERSION,
        AUTHORS,
        crate_description!()
    ))
}
