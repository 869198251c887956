use std::ops::Range;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use log::{info, warn};

use crate::audio_time::AudioTime;
use crate::errors::SplitError;
use crate::export::{export_slice, target_file};
use crate::mp3::AudioBuffer;
use crate::song::TrackSpec;
use crate::tag::Tagger;
use crate::timestamp::Timestamp;

/// Everything needed to write one track: which frames go where.
#[derive(Debug, Clone, PartialEq)]
pub struct CutInfo {
    pub track: TrackSpec,
    pub frames: Range<usize>,
    pub start: AudioTime,
    pub end: AudioTime,
    pub target_file: PathBuf,
}

impl CutInfo {
    pub fn duration(&self) -> Timestamp {
        (self.end - self.start).as_timestamp()
    }
}

/// Plans every cut up front, so that a bad timestamp is reported before any file is written.
pub fn get_cut_infos(
    buffer: &AudioBuffer,
    tracks: &[TrackSpec],
    music_dir: &Path,
) -> Result<Vec<CutInfo>, SplitError> {
    let mut boundaries = Vec::with_capacity(tracks.len() + 1);
    for track in tracks {
        let start = AudioTime::from_timestamp(track.start, buffer.sample_rate());
        if start >= buffer.end() {
            return Err(SplitError::Range {
                track: track.title.clone(),
                start: track.start,
                length: buffer.duration(),
            });
        }
        boundaries.push(buffer.frame_at_or_after(start));
    }
    boundaries.push(buffer.num_frames());

    if let (Some(first_track), Some(&first_frame)) = (tracks.first(), boundaries.first()) {
        if first_frame > 0 {
            warn!(
                "Skipping {} of audio before '{}'",
                buffer.frame_start(first_frame).as_timestamp(),
                first_track.title
            );
        }
    }

    tracks
        .iter()
        .zip(boundaries.iter().tuple_windows())
        .map(|(track, (&first, &last))| {
            if first >= last {
                return Err(SplitError::TooShort {
                    track: track.title.clone(),
                    start: track.start,
                });
            }
            Ok(CutInfo {
                track: track.clone(),
                frames: first..last,
                start: buffer.frame_start(first),
                end: buffer.frame_start(last),
                target_file: target_file(music_dir, track, tracks.len()),
            })
        })
        .collect()
}

pub fn cut_song(
    buffer: &AudioBuffer,
    info: &CutInfo,
    tagger: &Tagger,
    num_tracks: usize,
) -> Result<(), SplitError> {
    let file_name = info
        .target_file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    info!(
        "Cutting {}+{}: {} to {:?}",
        info.start.as_timestamp(),
        info.duration(),
        info.track.title,
        info.target_file
    );
    export_slice(buffer.frame_bytes(info.frames.clone()), &info.target_file)?;
    info!("{} >> SPLIT ({}/{})", file_name, info.track.number, num_tracks);
    tagger.tag_file(&info.target_file, &info.track, num_tracks)?;
    info!("{} >> TAGGED ({}/{})", file_name, info.track.number, num_tracks);
    Ok(())
}

/// Writes and tags all tracks in order. The first failure stops the run.
pub fn cut_album(
    buffer: &AudioBuffer,
    cut_infos: &[CutInfo],
    tagger: &Tagger,
) -> Result<Vec<PathBuf>, SplitError> {
    let mut written = vec![];
    for info in cut_infos {
        cut_song(buffer, info, tagger, cut_infos.len())?;
        written.push(info.target_file.clone());
    }
    Ok(written)
}
