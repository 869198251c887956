use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::timestamp::Timestamp;

#[derive(Debug, Error)]
pub enum SplitError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("track '{track}' starts at {start}, but the recording is only {length} long")]
    Range {
        track: String,
        start: Timestamp,
        length: Timestamp,
    },

    #[error("track '{track}' at {start} is shorter than one audio frame")]
    TooShort { track: String, start: Timestamp },

    #[error("I/O error on {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to tag {path:?}")]
    Tag {
        path: PathBuf,
        #[source]
        source: id3::Error,
    },

    #[error("tracklist contains no tracks")]
    EmptyTracklist,

    #[error("cannot read MPEG audio")]
    Audio(#[from] symphonia::core::errors::Error),

    #[error("not a usable MP3 stream: {0}")]
    InvalidAudio(String),
}

impl SplitError {
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        SplitError::Parse {
            line,
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SplitError::Io {
            path: path.into(),
            source,
        }
    }
}
