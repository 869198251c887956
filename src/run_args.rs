use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::album_file;
use crate::args::Action;
use crate::config_file::ConfigFile;
use crate::song::AlbumMeta;

/// The fully resolved inputs of one run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunArgs {
    pub source: PathBuf,
    pub tracklist: PathBuf,
    pub output_dir: PathBuf,
    /// Overrides for whatever the tracklist header says.
    pub album: AlbumMeta,
    pub dry_run: bool,
}

impl RunArgs {
    pub fn new(
        source: &Path,
        tracklist: &Path,
        output_dir: Option<&Path>,
        album: AlbumMeta,
        config_file: &ConfigFile,
        dry_run: bool,
    ) -> Self {
        let output_dir = output_dir
            .or_else(|| config_file.output_dir.as_deref())
            .map(|dir| dir.to_path_buf())
            .unwrap_or_else(|| default_output_dir(source));
        Self {
            source: source.into(),
            tracklist: tracklist.into(),
            output_dir,
            album,
            dry_run,
        }
    }

    pub fn from_action(action: &Action, config_file: &ConfigFile) -> Result<Self> {
        Ok(match action {
            Action::Split {
                source,
                tracklist,
                output,
                dry_run,
            } => RunArgs::new(
                source,
                tracklist,
                output.output_dir.as_deref(),
                output.album_meta(),
                config_file,
                *dry_run,
            ),
            Action::Run {
                album_file,
                dry_run,
            } => {
                let album_file = album_file::load(album_file)?;
                RunArgs::new(
                    &album_file.source,
                    &album_file.tracklist,
                    album_file.output_dir.as_deref(),
                    album_file.album_meta(),
                    config_file,
                    *dry_run,
                )
            }
            Action::Plan { source, tracklist } => RunArgs::new(
                source,
                tracklist,
                None,
                AlbumMeta::default(),
                config_file,
                true,
            ),
        })
    }
}

/// `~/rips/album.mp3` is split into `~/rips/album/`.
fn default_output_dir(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = if source.extension().is_some() {
        stem
    } else {
        format!("{}_tracks", stem)
    };
    source.with_file_name(name)
}
