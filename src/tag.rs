use std::fs;
use std::path::Path;

use id3::frame::{Picture, PictureType};
use id3::{ErrorKind, Tag, TagLike};
use log::debug;

use crate::config::{COVER_DESCRIPTION, DEFAULT_COVER_MIME_TYPE, TAG_VERSION};
use crate::errors::SplitError;
use crate::song::{AlbumMeta, TrackSpec};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverArt {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl CoverArt {
    pub fn load(path: &Path) -> Result<CoverArt, SplitError> {
        let data = fs::read(path).map_err(|e| SplitError::io(path, e))?;
        Ok(CoverArt {
            mime_type: cover_mime_type(path),
            data,
        })
    }
}

fn cover_mime_type(path: &Path) -> String {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase());
    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg".to_owned(),
        Some("png") => "image/png".to_owned(),
        Some("gif") => "image/gif".to_owned(),
        Some("bmp") => "image/bmp".to_owned(),
        Some("webp") => "image/webp".to_owned(),
        _ => DEFAULT_COVER_MIME_TYPE.to_owned(),
    }
}

/// Stamps album-wide and per-track metadata onto exported files.
pub struct Tagger {
    album: AlbumMeta,
    cover: Option<CoverArt>,
}

impl Tagger {
    /// Reads the cover image once, so a missing image fails before anything is written.
    pub fn new(album: AlbumMeta) -> Result<Tagger, SplitError> {
        let cover = album.cover.as_deref().map(CoverArt::load).transpose()?;
        Ok(Tagger { album, cover })
    }

    pub fn tag_file(
        &self,
        path: &Path,
        track: &TrackSpec,
        num_tracks: usize,
    ) -> Result<(), SplitError> {
        let tag_error = |source| SplitError::Tag {
            path: path.to_owned(),
            source,
        };
        let mut tag = match Tag::read_from_path(path) {
            Ok(tag) => tag,
            Err(e) if matches!(e.kind, ErrorKind::NoTag) => Tag::new(),
            Err(e) => return Err(tag_error(e)),
        };
        self.fill_tag(&mut tag, track, num_tracks);
        tag.write_to_path(path, TAG_VERSION).map_err(tag_error)?;
        debug!("Tagged {:?} as '{}'", path, track.title);
        Ok(())
    }

    fn fill_tag(&self, tag: &mut Tag, track: &TrackSpec, num_tracks: usize) {
        tag.set_title(track.title.as_str());
        tag.set_track(track.number as u32);
        tag.set_total_tracks(num_tracks as u32);
        if let Some(album) = &self.album.album {
            tag.set_album(album.as_str());
        }
        if let Some(artist) = &self.album.artist {
            tag.set_artist(artist.as_str());
        }
        if let Some(album_artist) = &self.album.album_artist {
            tag.set_album_artist(album_artist.as_str());
        }
        if let Some(genre) = &self.album.genre {
            tag.set_genre(genre.as_str());
        }
        if let Some(year) = self.album.year {
            tag.set_year(year);
        }
        if let Some(cover) = &self.cover {
            tag.remove_all_pictures();
            tag.add_frame(Picture {
                mime_type: cover.mime_type.clone(),
                picture_type: PictureType::CoverFront,
                description: COVER_DESCRIPTION.to_owned(),
                data: cover.data.clone(),
            });
        }
    }
}
