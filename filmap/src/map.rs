//! Render the selected records as a Leaflet map in a standalone HTML page.
//!
//! Markers are stored as JSON inside the page and added by a small script, the page itself
//! only needs Leaflet from its CDN.
//!

use std::fs;
use std::path::Path;

use eyre::{Result, WrapErr};
use serde::Serialize;
use tracing::{debug, info, trace};

use filmap_common::Coordinates;

use crate::{FilmLocationRecord, Status};

/// Page skeleton
const TEMPLATE: &str = include_str!("map.html");

/// Name of the marker layer
pub const LAYER_NAME: &str = "Film pins";

/// Rendering options
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapOptions {
    /// Initial zoom level
    pub zoom: u8,
    /// Maximum number of markers
    pub limit: Option<usize>,
    /// Skip markers at an already used position
    pub unique: bool,
}

impl Default for MapOptions {
    fn default() -> Self {
        MapOptions {
            zoom: 17,
            limit: None,
            unique: false,
        }
    }
}

/// One pin
///
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Marker {
    pub label: String,
    pub lat: f64,
    pub lon: f64,
}

impl Marker {
    pub fn position(&self) -> Coordinates {
        Coordinates {
            lat: self.lat,
            lon: self.lon,
        }
    }
}

#[derive(Clone, Debug)]
pub struct FilmMap {
    center: Coordinates,
    opts: MapOptions,
    /// Year shown in the overlay
    year: Option<i32>,
    markers: Vec<Marker>,
}

impl FilmMap {
    pub fn new(center: Coordinates, opts: MapOptions) -> Self {
        FilmMap {
            center,
            opts,
            year: None,
            markers: vec![],
        }
    }

    /// Set the year displayed in the overlay.
    ///
    pub fn with_year(self, year: i32) -> Self {
        FilmMap {
            year: Some(year),
            ..self
        }
    }

    pub fn center(&self) -> Coordinates {
        self.center
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    fn is_full(&self) -> bool {
        self.opts.limit.is_some_and(|max| self.markers.len() >= max)
    }

    /// Add one marker per positioned record, within the limits of the options.  Returns how
    /// many were placed.
    ///
    pub fn add_records<'a, I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = &'a FilmLocationRecord>,
    {
        let before = self.markers.len();
        for r in records {
            if self.is_full() {
                debug!("marker limit reached");
                break;
            }
            let Some(pos) = r.coordinates else {
                continue;
            };
            if self.opts.unique && self.markers.iter().any(|m| m.position() == pos) {
                trace!("{} shares its position, skipped", r.title);
                continue;
            }
            self.markers.push(Marker {
                label: r.label(),
                lat: pos.lat,
                lon: pos.lon,
            });
        }
        self.markers.len() - before
    }

    /// Overlay lines
    ///
    fn hud(&self) -> (String, String) {
        let year = match self.year {
            Some(year) => format!("Films from the year {year}"),
            None => "Films".to_string(),
        };
        (year, format!("Nearby {}", self.center))
    }

    /// Build the whole page.
    ///
    pub fn to_html(&self) -> Result<String> {
        let markers = serde_json::to_string(&self.markers)
            .wrap_err("Can not serialize markers")?
            .replace("</", "<\\/");
        let (hud_year, hud_center) = self.hud();

        let html = TEMPLATE
            .replace("{{GENERATOR}}", &crate::version())
            .replace("{{TITLE}}", &escape_html(&hud_year))
            .replace("{{HUD_YEAR}}", &escape_html(&hud_year))
            .replace("{{HUD_CENTER}}", &escape_html(&hud_center))
            .replace("{{LAYER}}", LAYER_NAME)
            .replace("{{LAT}}", &self.center.lat.to_string())
            .replace("{{LON}}", &self.center.lon.to_string())
            .replace("{{ZOOM}}", &self.opts.zoom.to_string())
            .replace("{{MARKERS}}", &markers);
        Ok(html)
    }

    /// Write the page into `path`.
    ///
    #[tracing::instrument(skip(self))]
    pub fn save(&self, path: &Path) -> Result<()> {
        let fname = path.display().to_string();

        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.is_dir() {
                return Err(Status::NoOutputDirectory(fname).into());
            }
        }
        let html = self.to_html()?;
        fs::write(path, html).map_err(|e| Status::CannotWrite(fname.clone(), e))?;
        info!("{} markers written to {fname}", self.markers.len());
        Ok(())
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use tempfile::tempdir;

    use super::*;

    fn la() -> Coordinates {
        Coordinates::new(34.0536909, -118.242766).unwrap()
    }

    fn records() -> Vec<FilmLocationRecord> {
        let here = Coordinates::new(34.05, -118.24).unwrap();
        let there = Coordinates::new(34.06, -118.25).unwrap();
        vec![
            FilmLocationRecord::new("One", "LA", Some(2010)).with_coordinates(here),
            FilmLocationRecord::new("Two", "LA", Some(2011)).with_coordinates(here),
            FilmLocationRecord::new("Nowhere", "?", Some(2011)),
            FilmLocationRecord::new("Three", "LA", None).with_coordinates(there),
        ]
    }

    #[rstest]
    #[case(MapOptions::default(), vec!["One (2010)", "Two (2011)", "Three (????)"])]
    #[case(MapOptions { unique: true, ..MapOptions::default() }, vec!["One (2010)", "Three (????)"])]
    #[case(MapOptions { limit: Some(1), ..MapOptions::default() }, vec!["One (2010)"])]
    #[case(MapOptions { limit: Some(0), ..MapOptions::default() }, vec![])]
    fn test_add_records(#[case] opts: MapOptions, #[case] labels: Vec<&str>) {
        let mut map = FilmMap::new(la(), opts);
        let records = records();

        let n = map.add_records(&records);
        assert_eq!(labels.len(), n);
        let found: Vec<_> = map.markers().iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, found);
    }

    #[test]
    fn test_to_html() -> Result<()> {
        let mut map = FilmMap::new(la(), MapOptions::default()).with_year(2010);
        map.add_records(&records()[..1]);

        let html = map.to_html()?;
        assert!(html.contains("Films from the year 2010"));
        assert!(html.contains("Nearby (34.0536909, -118.242766)"));
        assert!(html.contains("setView([34.0536909, -118.242766], 17)"));
        assert!(html.contains(r#"[{"label":"One (2010)","lat":34.05,"lon":-118.24}]"#));
        assert!(html.contains(LAYER_NAME));
        assert!(!html.contains("{{"));
        Ok(())
    }

    #[test]
    fn test_to_html_escaped() -> Result<()> {
        let evil = FilmLocationRecord::new("</script><b>&", "LA", Some(2010))
            .with_coordinates(la());
        let mut map = FilmMap::new(la(), MapOptions::default());
        map.add_records([&evil]);

        let html = map.to_html()?;
        assert!(!html.contains("</script><b>"));
        assert!(html.contains(r#"<\/script><b>&"#));
        Ok(())
    }

    #[test]
    fn test_empty_map() -> Result<()> {
        let map = FilmMap::new(la(), MapOptions::default());
        let html = map.to_html()?;
        assert!(html.contains(r#"id="film-markers">[]</script>"#));
        assert!(html.contains("setView([34.0536909, -118.242766], 17)"));
        Ok(())
    }

    #[test]
    fn test_save() -> Result<()> {
        let dir = tempdir()?;
        let out = dir.path().join("out_map.html");

        let mut map = FilmMap::new(la(), MapOptions::default());
        map.add_records(&records());
        map.save(&out)?;

        let html = fs::read_to_string(&out)?;
        assert!(html.contains("Three (????)"));
        Ok(())
    }

    #[test]
    fn test_save_no_directory() {
        let map = FilmMap::new(la(), MapOptions::default());
        let err = map.save(Path::new("/nonexistent/dir/out.html")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Status>(),
            Some(Status::NoOutputDirectory(_))
        ));
    }

    #[test]
    fn test_save_cannot_write() -> Result<()> {
        let dir = tempdir()?;
        let map = FilmMap::new(la(), MapOptions::default());

        // A directory is in the way.
        let err = map.save(dir.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Status>(),
            Some(Status::CannotWrite(..))
        ));
        Ok(())
    }
}
