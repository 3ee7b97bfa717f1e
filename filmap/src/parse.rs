//! Parser for one line of the locations dataset.
//!
//! The format is the one of the IMDb `locations.list` file:
//!
//! ```text
//! "#1 Single" (2006) {Cats and Dogs (#1.4)}	Los Angeles, California, USA
//! Example Film (2010) (TV)		Santa Monica, California, USA	(pier)
//! Lost Reel (????)	Coventry, West Midlands, England, UK [52.4081812, -1.510477]
//! ```
//!
//! - exactly one year token `(YYYY)`, `(YYYY/II)` or `(????)`, the title is what comes before,
//! - the `{episode}` part and qualifiers like `(TV)` or `(V)` are dropped,
//! - the first remaining tab-separated field is the location, the other ones are notes, as is
//!   a trailing `(...)` group separated by blanks,
//! - an optional `[lat, lon]` suffix on the location gives its position directly.
//!

use nom::{
    branch::alt,
    bytes::complete::{is_not, tag, take_while1},
    character::complete::{char, one_of, satisfy, space0, space1},
    combinator::{all_consuming, map, map_res, opt, recognize, value, verify},
    multi::{count, many0_count, many1_count},
    sequence::{delimited, pair, preceded},
    IResult,
};
use tracing::debug;

use filmap_common::{bracketed_lat_lon, Coordinates};

use crate::{FilmLocationRecord, LineError};

/// Oldest and newest years we accept in a title.
const YEARS: std::ops::RangeInclusive<i32> = 1000..=2099;

/// What is between the parentheses after a title
///
#[derive(Clone, Copy, Debug, PartialEq)]
enum Year {
    Known(i32),
    Unknown,
}

impl From<Year> for Option<i32> {
    fn from(value: Year) -> Self {
        match value {
            Year::Known(y) => Some(y),
            Year::Unknown => None,
        }
    }
}

#[inline]
fn digits4(input: &str) -> IResult<&str, i32> {
    map_res(recognize(count(satisfy(|c| c.is_ascii_digit()), 4)), |s: &str| {
        s.parse::<i32>()
    })(input)
}

/// `(2006)`, `(2006/II)` or `(????)`
///
fn year_token(input: &str) -> IResult<&str, Year> {
    let known = map(verify(digits4, |y: &i32| YEARS.contains(y)), Year::Known);
    let unknown = value(Year::Unknown, tag("????"));
    let roman = opt(preceded(char('/'), many1_count(one_of("IVXL"))));

    delimited(char('('), alt((known, unknown)), pair(roman, char(')')))(input)
}

/// `(TV)`, `(V)`, `(VG)`…
///
fn qualifier(input: &str) -> IResult<&str, &str> {
    delimited(char('('), take_while1(|c: char| c.is_ascii_uppercase()), char(')'))(input)
}

fn strip_qualifiers(input: &str) -> &str {
    match many0_count(delimited(space0, qualifier, space0))(input) {
        Ok((rest, _)) => rest.trim(),
        Err(_) => input.trim(),
    }
}

/// Remove everything between the first `{` and the last `}`.
///
fn strip_episode(input: &str) -> String {
    match (input.find('{'), input.rfind('}')) {
        (Some(start), Some(end)) if start < end => {
            format!("{}{}", &input[..start], &input[end + 1..])
        }
        _ => input.to_string(),
    }
}

/// Balanced parentheses, nested ones included.
///
fn parens(input: &str) -> IResult<&str, &str> {
    recognize(delimited(
        char('('),
        many0_count(alt((is_not("()"), parens))),
        char(')'),
    ))(input)
}

/// Remove trailing notes like `  (pier)` when they are separated by blanks instead of a tab.
///
fn strip_notes(location: &str) -> &str {
    location
        .char_indices()
        .filter(|&(_, c)| c == ' ' || c == '\t')
        .find(|&(i, _)| all_consuming(preceded(space1, parens))(&location[i..]).is_ok())
        .map(|(i, _)| location[..i].trim_end())
        .filter(|l| !l.is_empty())
        .unwrap_or(location)
}

/// Split a trailing `[lat, lon]` from the location.
///
fn split_annotation(location: &str) -> (&str, Option<(f64, f64)>) {
    if let Some(start) = location.rfind('[') {
        if let Ok((_, pos)) = all_consuming(bracketed_lat_lon)(location[start..].trim_end()) {
            return (location[..start].trim_end(), Some(pos));
        }
    }
    (location, None)
}

/// Find all year tokens as `(start, end, year)`.
///
fn find_years(line: &str) -> Vec<(usize, usize, Year)> {
    line.char_indices()
        .filter(|&(_, c)| c == '(')
        .filter_map(|(i, _)| {
            year_token(&line[i..])
                .ok()
                .map(|(rest, year)| (i, line.len() - rest.len(), year))
        })
        .collect()
}

/// Parse one line into a record.  Coordinates are only set when the line carries them.
///
pub fn parse_line(line: &str) -> Result<FilmLocationRecord, LineError> {
    let line = line.trim_end_matches(['\r', '\n']);

    let years = find_years(line);
    let (start, end, year) = match years.as_slice() {
        [] => return Err(LineError::NoYear),
        [one] => *one,
        many => return Err(LineError::SeveralYears(many.len())),
    };

    let title = line[..start].trim();
    if title.is_empty() {
        return Err(LineError::NoTitle);
    }

    let tail = strip_episode(&line[end..]);
    let location = tail
        .split('\t')
        .map(strip_qualifiers)
        .find(|f| !f.is_empty())
        .ok_or(LineError::NoLocation)?;

    let (location, pos) = split_annotation(strip_notes(location));
    if location.is_empty() {
        return Err(LineError::NoLocation);
    }

    let record = FilmLocationRecord::new(title, location, year.into());
    match pos.map(|(lat, lon)| Coordinates::new(lat, lon)) {
        Some(Ok(c)) => Ok(record.with_coordinates(c)),
        Some(Err(e)) => {
            debug!("ignoring annotation for {title}: {e}");
            Ok(record)
        }
        None => Ok(record),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("(2006)", Year::Known(2006))]
    #[case("(1999/II)", Year::Known(1999))]
    #[case("(????)", Year::Unknown)]
    #[case("(1000)", Year::Known(1000))]
    fn test_year_token(#[case] input: &str, #[case] year: Year) {
        let (rest, y) = year_token(input).unwrap();
        assert!(rest.is_empty());
        assert_eq!(year, y);
    }

    #[rstest]
    #[case("(2100)")]
    #[case("(999)")]
    #[case("(TV)")]
    #[case("(20066)")]
    #[case("(#1.4)")]
    fn test_year_token_invalid(#[case] input: &str) {
        assert!(year_token(input).is_err());
    }

    #[rstest]
    #[case("(TV) Los Angeles", "Los Angeles")]
    #[case("  (V)(VG)  Paris", "Paris")]
    #[case("Paris", "Paris")]
    #[case("(studio)", "(studio)")]
    fn test_strip_qualifiers(#[case] input: &str, #[case] out: &str) {
        assert_eq!(out, strip_qualifiers(input));
    }

    #[rstest]
    #[case("Santa Monica, California, USA    (pier)", "Santa Monica, California, USA")]
    #[case("Burbank, California, USA (Stage 12 (interior))", "Burbank, California, USA")]
    #[case("Paris [48.85, 2.35]  (Eiffel tower)", "Paris [48.85, 2.35]")]
    #[case("Santa Monica, California, USA", "Santa Monica, California, USA")]
    #[case("Los Angeles (unbalanced", "Los Angeles (unbalanced")]
    fn test_strip_notes(#[case] input: &str, #[case] out: &str) {
        assert_eq!(out, strip_notes(input));
    }

    #[test]
    fn test_parse_line_imdb() {
        let line = "\"#1 Single\" (2006) {Cats and Dogs (#1.4)}\tLos Angeles, California, USA";
        let r = parse_line(line).unwrap();
        assert_eq!("\"#1 Single\"", r.title);
        assert_eq!(Some(2006), r.year);
        assert_eq!("Los Angeles, California, USA", r.location_text);
        assert!(r.coordinates.is_none());
    }

    #[test]
    fn test_parse_line_spaces() {
        let r = parse_line("Example Film (2010)    Los Angeles, California, USA").unwrap();
        assert_eq!("Example Film", r.title);
        assert_eq!(Some(2010), r.year);
        assert_eq!("Los Angeles, California, USA", r.location_text);
    }

    #[test]
    fn test_parse_line_notes_and_qualifier() {
        let line = "Example Film (2010) (TV)\t\tSanta Monica, California, USA\t(pier)\r\n";
        let r = parse_line(line).unwrap();
        assert_eq!("Example Film", r.title);
        assert_eq!("Santa Monica, California, USA", r.location_text);
    }

    #[rstest]
    #[case("Night Shift (2008) (TV)    Santa Monica, California, USA    (pier)")]
    #[case("Night Shift (2008) (TV)\t\tSanta Monica, California, USA\t(pier)")]
    #[case("Night Shift (2008) (TV)\tSanta Monica, California, USA  (pier)")]
    fn test_parse_line_notes(#[case] line: &str) {
        let r = parse_line(line).unwrap();
        assert_eq!("Night Shift", r.title);
        assert_eq!("Santa Monica, California, USA", r.location_text);
    }

    #[test]
    fn test_parse_line_notes_after_annotation() {
        let line = "Example Film (2010)   Los Angeles [34.05, -118.24]   (downtown)";
        let r = parse_line(line).unwrap();
        assert_eq!("Los Angeles", r.location_text);
        assert_eq!(Some(Coordinates::new(34.05, -118.24).unwrap()), r.coordinates);
    }

    #[test]
    fn test_parse_line_annotation() {
        let line = "Lost Reel (????)\tCoventry, England, UK [52.4081812, -1.510477]";
        let r = parse_line(line).unwrap();
        assert_eq!(None, r.year);
        assert_eq!("Coventry, England, UK", r.location_text);
        assert_eq!(Some(Coordinates::new(52.4081812, -1.510477).unwrap()), r.coordinates);
    }

    #[test]
    fn test_parse_line_bad_annotation() {
        let r = parse_line("Far Away (2001)\tMoon [120.0, 10.0]").unwrap();
        assert_eq!("Moon", r.location_text);
        assert!(r.coordinates.is_none());
    }

    #[rstest]
    #[case("LOCATIONS LIST", LineError::NoYear)]
    #[case("Example Film\tLos Angeles", LineError::NoYear)]
    #[case("Remake (1999) of (2009)\tParis", LineError::SeveralYears(2))]
    #[case("(2010)\tParis", LineError::NoTitle)]
    #[case("Example Film (2010)", LineError::NoLocation)]
    #[case("Example Film (2010) {Pilot}\t\t", LineError::NoLocation)]
    #[case("Example Film (2010)\t[34.05, -118.24]", LineError::NoLocation)]
    fn test_parse_line_malformed(#[case] line: &str, #[case] err: LineError) {
        assert_eq!(Err(err), parse_line(line));
    }
}
