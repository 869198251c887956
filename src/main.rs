pub mod album_file;
pub mod args;
pub mod audio_time;
pub mod config;
pub mod config_file;
pub mod cut;
pub mod errors;
pub mod export;
pub mod logging;
pub mod mp3;
pub mod run_args;
pub mod song;
pub mod tag;
pub mod timestamp;
pub mod tracklist;
#[cfg(test)]
mod test_utils;

use std::path::PathBuf;

use anyhow::{Context, Result};
use args::Opts;
use clap::Parser;
use config_file::ConfigFile;
use cut::{cut_album, get_cut_infos, CutInfo};
use export::target_file_name;
use log::info;
use mp3::AudioBuffer;
use run_args::RunArgs;
use tag::Tagger;

fn main() -> Result<(), anyhow::Error> {
    let args = Opts::parse();
    let config_file = ConfigFile::read()?;
    logging::init(args.log_level(config_file.log_level()?))?;
    let run_args = RunArgs::from_action(&args.action, &config_file)?;
    run_albumsplit(&run_args)?;
    Ok(())
}

fn run_albumsplit(run_args: &RunArgs) -> Result<Vec<PathBuf>> {
    let tracklist = tracklist::load(&run_args.tracklist)
        .context(format!("While reading tracklist {:?}", run_args.tracklist))?;
    let album = tracklist.album.clone().merged_with(run_args.album.clone());
    let buffer = AudioBuffer::open(&run_args.source)
        .context(format!("While reading source {:?}", run_args.source))?;
    info!(
        "Splitting {:?} ({}) into {} tracks",
        run_args.source,
        buffer.duration(),
        tracklist.len()
    );
    let cut_infos = get_cut_infos(&buffer, &tracklist.tracks, &run_args.output_dir)?;
    if run_args.dry_run {
        print_plan(&cut_infos);
        return Ok(vec![]);
    }
    let tagger = Tagger::new(album)?;
    let written = cut_album(&buffer, &cut_infos, &tagger)?;
    info!("Wrote {} files to {:?}", written.len(), run_args.output_dir);
    Ok(written)
}

fn print_plan(cut_infos: &[CutInfo]) {
    for info in cut_infos {
        println!(
            "{:>12} {:>12}  {}",
            info.start.as_timestamp(),
            info.duration(),
            target_file_name(&info.track, cut_infos.len())
        );
    }
}
