use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::OnceLock;

use log::debug;
use regex::Regex;

use crate::errors::SplitError;
use crate::song::{AlbumMeta, TrackSpec};
use crate::timestamp::Timestamp;

static TRACK_LINE: OnceLock<Regex> = OnceLock::new();
static HEADER_LINE: OnceLock<Regex> = OnceLock::new();

fn track_line() -> &'static Regex {
    TRACK_LINE.get_or_init(|| Regex::new(r"^([0-9:.]+)\s+(?:[-–]\s+)?(.*)$").unwrap())
}

fn header_line() -> &'static Regex {
    HEADER_LINE.get_or_init(|| Regex::new(r"^([A-Za-z][A-Za-z _]*?)\s*:\s*(.*)$").unwrap())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tracklist {
    pub album: AlbumMeta,
    pub tracks: Vec<TrackSpec>,
}

impl Tracklist {
    pub fn len(&self) -> usize {
        self.tracks.len()
    }
}

/// Reads a tracklist file. A relative cover path is taken relative to the file.
pub fn load(file: &Path) -> Result<Tracklist, SplitError> {
    let data = fs::read_to_string(file).map_err(|e| SplitError::io(file, e))?;
    let mut tracklist = parse(&data)?;
    if let Some(cover) = tracklist.album.cover.take() {
        let base = file.parent().unwrap_or_else(|| Path::new(""));
        tracklist.album.cover = Some(base.join(cover));
    }
    debug!("Read {} tracks from {:?}", tracklist.len(), file);
    Ok(tracklist)
}

pub fn parse(data: &str) -> Result<Tracklist, SplitError> {
    let mut album = AlbumMeta::default();
    let mut tracks: Vec<TrackSpec> = vec![];
    for (index, raw_line) in data.lines().enumerate() {
        let line_num = index + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(track) = parse_track_line(line, line_num, tracks.len() + 1)? {
            if let Some(previous) = tracks.last() {
                if track.start <= previous.start {
                    return Err(SplitError::parse(
                        line_num,
                        format!(
                            "timestamp {} of '{}' is not after {} of '{}'",
                            track.start, track.title, previous.start, previous.title
                        ),
                    ));
                }
            }
            tracks.push(track);
        } else if tracks.is_empty() {
            parse_header_line(line, line_num, &mut album)?;
        } else {
            return Err(SplitError::parse(
                line_num,
                format!("expected '<timestamp> <title>', found '{}'", line),
            ));
        }
    }
    if tracks.is_empty() {
        return Err(SplitError::EmptyTracklist);
    }
    Ok(Tracklist { album, tracks })
}

/// Returns `None` if the line does not look like a track line at all.
fn parse_track_line(
    line: &str,
    line_num: usize,
    number: usize,
) -> Result<Option<TrackSpec>, SplitError> {
    let captures = match track_line().captures(line) {
        Some(captures) => captures,
        None => return Ok(None),
    };
    let start: Timestamp = captures[1]
        .parse()
        .map_err(|e| SplitError::parse(line_num, format!("{}", e)))?;
    let title = unquote(captures[2].trim());
    if title.is_empty() {
        return Err(SplitError::parse(line_num, "track has no title"));
    }
    Ok(Some(TrackSpec {
        number,
        title: title.to_owned(),
        start,
    }))
}

fn parse_header_line(line: &str, line_num: usize, album: &mut AlbumMeta) -> Result<(), SplitError> {
    let captures = header_line().captures(line).ok_or_else(|| {
        SplitError::parse(
            line_num,
            format!("expected 'key: value' or '<timestamp> <title>', found '{}'", line),
        )
    })?;
    let key = captures[1].to_lowercase().replace('_', " ");
    let value = unquote(captures[2].trim()).to_owned();
    match key.as_str() {
        "album" => album.album = Some(value),
        "artist" => album.artist = Some(value),
        "album artist" => album.album_artist = Some(value),
        "genre" => album.genre = Some(value),
        "year" => {
            let year = value
                .parse()
                .map_err(|_| SplitError::parse(line_num, format!("invalid year '{}'", value)))?;
            album.year = Some(year);
        }
        "cover" => album.cover = Some(PathBuf::from(value)),
        _ => {
            return Err(SplitError::parse(
                line_num,
                format!("unknown header '{}'", &captures[1]),
            ))
        }
    }
    Ok(())
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
