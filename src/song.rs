use std::fmt;
use std::path::PathBuf;

use crate::timestamp::Timestamp;

/// One entry of a tracklist. The track ends where the next one starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackSpec {
    pub number: usize,
    pub title: String,
    pub start: Timestamp,
}

impl fmt::Display for TrackSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {} ({})", self.number, self.title, self.start)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlbumMeta {
    pub album: Option<String>,
    pub artist: Option<String>,
    pub album_artist: Option<String>,
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub cover: Option<PathBuf>,
}

impl AlbumMeta {
    /// Fields set in `overrides` win over the ones in `self`.
    pub fn merged_with(self, overrides: AlbumMeta) -> AlbumMeta {
        AlbumMeta {
            album: overrides.album.or(self.album),
            artist: overrides.artist.or(self.artist),
            album_artist: overrides.album_artist.or(self.album_artist),
            genre: overrides.genre.or(self.genre),
            year: overrides.year.or(self.year),
            cover: overrides.cover.or(self.cover),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_take_precedence() {
        let from_tracklist = AlbumMeta {
            album: Some("Tracklist Album".into()),
            artist: Some("Tracklist Artist".into()),
            year: Some(1999),
            ..Default::default()
        };
        let from_cli = AlbumMeta {
            artist: Some("Cli Artist".into()),
            genre: Some("Jazz".into()),
            ..Default::default()
        };
        let merged = from_tracklist.merged_with(from_cli);
        assert_eq!(merged.album.as_deref(), Some("Tracklist Album"));
        assert_eq!(merged.artist.as_deref(), Some("Cli Artist"));
        assert_eq!(merged.genre.as_deref(), Some("Jazz"));
        assert_eq!(merged.year, Some(1999));
        assert_eq!(merged.cover, None);
    }
}
