use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::{FALLBACK_TITLE, MIN_TRACK_NUMBER_WIDTH, MP3_EXTENSION, PARTIAL_FILE_SUFFIX};
use crate::errors::SplitError;
use crate::song::TrackSpec;

/// Replaces characters that are not allowed in file names on common file systems.
pub fn sanitize_title(title: &str) -> String {
    let replaced: String = title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let trimmed = replaced.trim_matches(|c: char| c.is_whitespace() || c == '.');
    if trimmed.is_empty() {
        FALLBACK_TITLE.to_owned()
    } else {
        trimmed.to_owned()
    }
}

pub fn target_file_name(track: &TrackSpec, num_tracks: usize) -> String {
    let width = num_tracks.to_string().len().max(MIN_TRACK_NUMBER_WIDTH);
    format!(
        "{:0width$}. {}.{}",
        track.number,
        sanitize_title(&track.title),
        MP3_EXTENSION,
        width = width
    )
}

pub fn target_file(music_dir: &Path, track: &TrackSpec, num_tracks: usize) -> PathBuf {
    music_dir.join(target_file_name(track, num_tracks))
}

fn partial_file(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".");
    name.push(PARTIAL_FILE_SUFFIX);
    target.with_file_name(name)
}

/// Writes the frames next to `target` first and renames afterwards, so an
/// interrupted write never leaves a truncated file under the final name.
pub fn export_slice<'a>(
    frames: impl Iterator<Item = &'a [u8]>,
    target: &Path,
) -> Result<u64, SplitError> {
    if let Some(dir) = target.parent() {
        fs::create_dir_all(dir).map_err(|e| SplitError::io(dir, e))?;
    }
    let partial = partial_file(target);
    let written = write_frames(frames, &partial).map_err(|e| {
        let _ = fs::remove_file(&partial);
        SplitError::io(&partial, e)
    })?;
    fs::rename(&partial, target).map_err(|e| SplitError::io(target, e))?;
    debug!("Wrote {} bytes to {:?}", written, target);
    Ok(written)
}

fn write_frames<'a>(
    frames: impl Iterator<Item = &'a [u8]>,
    file: &Path,
) -> std::io::Result<u64> {
    let mut writer = BufWriter::new(File::create(file)?);
    let mut written = 0;
    for frame in frames {
        writer.write_all(frame)?;
        written += frame.len() as u64;
    }
    writer.flush()?;
    Ok(written)
}
