use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;

use crate::song::AlbumMeta;

/// Split an album recording into tagged per-track MP3 files.
#[derive(Parser, Debug)]
#[clap(version)]
pub struct Opts {
    /// Show debug output
    #[clap(short, long, global = true, value_parser)]
    pub verbose: bool,
    /// Only show warnings and errors
    #[clap(short, long, global = true, value_parser, conflicts_with = "verbose")]
    pub quiet: bool,
    #[clap(subcommand)]
    pub action: Action,
}

#[derive(Subcommand, Debug)]
pub enum Action {
    /// Split SOURCE at the timestamps listed in TRACKLIST
    Split {
        #[clap(value_parser)]
        source: PathBuf,
        #[clap(value_parser)]
        tracklist: PathBuf,
        #[clap(flatten)]
        output: OutputArgs,
        /// Print the planned tracks instead of writing them
        #[clap(long, value_parser)]
        dry_run: bool,
    },
    /// Split according to a YAML album file
    Run {
        #[clap(value_parser)]
        album_file: PathBuf,
        #[clap(long, value_parser)]
        dry_run: bool,
    },
    /// Print the planned tracks for SOURCE and TRACKLIST
    Plan {
        #[clap(value_parser)]
        source: PathBuf,
        #[clap(value_parser)]
        tracklist: PathBuf,
    },
}

#[derive(Args, Debug, Default)]
pub struct OutputArgs {
    /// Directory for the split files [default: next to SOURCE, named after it]
    #[clap(short, long, value_parser)]
    pub output_dir: Option<PathBuf>,
    /// Image to embed as front cover
    #[clap(long, value_parser)]
    pub cover: Option<PathBuf>,
    #[clap(long, value_parser)]
    pub album: Option<String>,
    #[clap(long, value_parser)]
    pub artist: Option<String>,
    #[clap(long, value_parser)]
    pub album_artist: Option<String>,
    #[clap(long, value_parser)]
    pub genre: Option<String>,
    #[clap(long, value_parser)]
    pub year: Option<i32>,
}

impl OutputArgs {
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
}

impl Opts {
    pub fn log_level(&self, configured: LevelFilter) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else if self.quiet {
            LevelFilter::Warn
        } else {
            configured
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_split_with_metadata() {
        let opts = Opts::try_parse_from([
            "albumsplit",
            "split",
            "rip.mp3",
            "tracks.txt",
            "-o",
            "out",
            "--artist",
            "The Band",
            "--year",
            "2004",
            "-v",
        ])
        .unwrap();
        assert_eq!(opts.log_level(LevelFilter::Info), LevelFilter::Debug);
        match opts.action {
            Action::Split {
                source,
                output,
                dry_run,
                ..
            } => {
                assert_eq!(source, PathBuf::from("rip.mp3"));
                assert_eq!(output.output_dir, Some(PathBuf::from("out")));
                let meta = output.album_meta();
                assert_eq!(meta.artist.as_deref(), Some("The Band"));
                assert_eq!(meta.year, Some(2004));
                assert!(!dry_run);
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        let result = Opts::try_parse_from(["albumsplit", "-v", "-q", "plan", "a.mp3", "t.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn quiet_lowers_log_level() {
        let opts = Opts::try_parse_from(["albumsplit", "run", "album.yaml", "-q"]).unwrap();
        assert_eq!(opts.log_level(LevelFilter::Info), LevelFilter::Warn);
    }
}
