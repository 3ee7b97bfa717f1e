//! Read a locations file into records.
//!
//! The file is read at once and split into lines; every line is decoded and parsed on its own
//! so that a bad line only costs that line.  Positions come from the line itself when it is
//! annotated, otherwise from the [`Resolver`].
//!

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, trace};

use crate::{parse_line, FilmLocationRecord, LineError, Resolver, Status};

/// What happened while loading.
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct LoadStats {
    /// Non-blank lines seen
    pub lines: usize,
    /// Records produced
    pub records: usize,
    /// Lines skipped because they could not be parsed
    pub malformed: usize,
    /// Lines skipped because they are not UTF-8
    pub undecodable: usize,
    /// Records without coordinates
    pub unresolved: usize,
}

impl LoadStats {
    /// Total of skipped lines
    ///
    pub fn skipped(&self) -> usize {
        self.malformed + self.undecodable
    }
}

impl fmt::Display for LoadStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} lines, {} records, {} skipped, {} unresolved",
            self.lines,
            self.records,
            self.skipped(),
            self.unresolved
        )
    }
}

/// All records of a file, in file order.
///
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    pub records: Vec<FilmLocationRecord>,
    pub stats: LoadStats,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// UTF-8 byte order mark
const BOM: &[u8] = b"\xef\xbb\xbf";

fn decode(raw: &[u8]) -> Result<&str, LineError> {
    std::str::from_utf8(raw).map_err(|_| LineError::NotUtf8)
}

/// Load `path`, asking `resolver` for every location without an embedded position.
///
#[tracing::instrument(skip(resolver), fields(resolver = resolver.name()))]
pub fn load(path: &Path, resolver: &mut dyn Resolver) -> eyre::Result<Dataset> {
    let fname = path.display().to_string();

    if !path.exists() {
        return Err(Status::FileNotFound(fname).into());
    }
    let data = fs::read(path).map_err(|e| Status::CannotRead(fname.clone(), e))?;

    if data.contains(&0) {
        return Err(Status::NotText(fname).into());
    }

    let mut stats = LoadStats::default();
    let mut records = vec![];

    let text = data.strip_prefix(BOM).unwrap_or(&data);
    for (n, raw) in text.split(|&b| b == b'\n').enumerate() {
        let lineno = n + 1;

        let line = match decode(raw) {
            Ok(line) => line,
            Err(e) => {
                debug!("{fname}:{lineno}: {e}");
                stats.lines += 1;
                stats.undecodable += 1;
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        stats.lines += 1;

        let record = match parse_line(line) {
            Ok(record) => record,
            Err(e) => {
                debug!("{fname}:{lineno}: skipped, {e}");
                stats.malformed += 1;
                continue;
            }
        };

        let record = match record.coordinates {
            Some(_) => record,
            None => match resolver.resolve(&record.location_text) {
                Some(pos) => record.with_coordinates(pos),
                None => {
                    trace!("{fname}:{lineno}: {} not found", record.location_text);
                    stats.unresolved += 1;
                    record
                }
            },
        };
        records.push(record);
    }

    // Something was there but nothing of it was text.
    if stats.lines > 0 && stats.undecodable == stats.lines {
        return Err(Status::NotText(fname).into());
    }

    stats.records = records.len();
    info!("{fname}: {stats}");
    Ok(Dataset { records, stats })
}
