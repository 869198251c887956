use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::config_file::expanduser;
use crate::song::AlbumMeta;

/// Everything one run needs, in a single YAML file.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AlbumFile {
    pub source: PathBuf,
    pub tracklist: PathBuf,
    pub output_dir: Option<PathBuf>,
    pub cover: Option<PathBuf>,
    pub album: Option<String>,
    pub artist: Option<String>,
    pub album_artist: Option<String>,
    pub genre: Option<String>,
    pub year: Option<i32>,
}

impl AlbumFile {
    pub fn album_meta(&self) -> AlbumMeta {
        AlbumMeta {
            album: self.album.clone(),
            artist: self.artist.clone(),
            album_artist: self.album_artist.clone(),
            genre: self.genre.clone(),
            year: self.year,
            cover: self.cover.clone(),
        }
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |path: &Path| base.join(expanduser(path));
        self.source = resolve(&self.source);
        self.tracklist = resolve(&self.tracklist);
        self.output_dir = self.output_dir.as_deref().map(resolve);
        self.cover = self.cover.as_deref().map(resolve);
    }
}

/// Relative paths in the file are taken relative to the file itself.
pub fn load(filename: &Path) -> Result<AlbumFile> {
    let data = fs::read_to_string(filename)
        .context(format!("Unable to read album file {:?}", filename))?;
    let mut album_file: AlbumFile =
        serde_yaml::from_str(&data).context("Unable to load album file content.")?;
    album_file.resolve_paths(filename.parent().unwrap_or_else(|| Path::new("")));
    Ok(album_file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_and_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("album.yaml");
        fs::write(
            &file,
            "source: rip.mp3\n\
             tracklist: tracks.txt\n\
             cover: /pictures/front.jpg\n\
             album: \"Red Sky\"\n\
             year: 2004\n",
        )
        .unwrap();

        let album_file = load(&file).unwrap();

        assert_eq!(album_file.source, dir.path().join("rip.mp3"));
        assert_eq!(album_file.tracklist, dir.path().join("tracks.txt"));
        assert_eq!(album_file.output_dir, None);
        assert_eq!(album_file.cover, Some(PathBuf::from("/pictures/front.jpg")));
        let meta = album_file.album_meta();
        assert_eq!(meta.album.as_deref(), Some("Red Sky"));
        assert_eq!(meta.artist, None);
        assert_eq!(meta.year, Some(2004));
    }

    #[test]
    fn requires_source_and_tracklist() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("album.yaml");
        fs::write(&file, "source: rip.mp3\n").unwrap();
        assert!(load(&file).is_err());
    }
}
