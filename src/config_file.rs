use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::anyhow;
use anyhow::Context;
use anyhow::Result;
use log::LevelFilter;
use serde::Deserialize;

use crate::config;

/// Per-user defaults, read from `$XDG_CONFIG_HOME/albumsplit/config.yaml`.
#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub output_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl ConfigFile {
    /// A missing config file is not an error, a broken one is.
    pub fn read() -> Result<Self> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix(config::APP_NAME)
            .context("Locating config directory")?;
        match xdg_dirs.find_config_file(config::CONFIG_FILE_NAME) {
            Some(config_path) => ConfigFile::from_file(&config_path),
            None => Ok(ConfigFile::default()),
        }
    }

    fn from_file(file: &Path) -> Result<ConfigFile> {
        let data =
            fs::read_to_string(file).context(format!("While reading config file at {:?}", file))?;
        let mut config_file: ConfigFile =
            serde_yaml::from_str(&data).context("Reading config file contents")?;
        config_file.output_dir = config_file.output_dir.as_deref().map(expanduser);
        Ok(config_file)
    }

    pub fn log_level(&self) -> Result<LevelFilter> {
        match &self.log_level {
            Some(level) => LevelFilter::from_str(level)
                .map_err(|_| anyhow!("Unknown log level in config file: {}", level)),
            None => Ok(LevelFilter::Info),
        }
    }
}

pub fn expanduser(path: &Path) -> PathBuf {
    let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
    PathBuf::from(expanded)
}
