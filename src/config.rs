use id3::Version;

pub static APP_NAME: &str = "albumsplit";
pub static CONFIG_FILE_NAME: &str = "config.yaml";

// v2.3 is what most players and Windows Explorer read reliably
pub static TAG_VERSION: Version = Version::Id3v23;
pub static COVER_DESCRIPTION: &str = "Cover";
pub static DEFAULT_COVER_MIME_TYPE: &str = "image/jpeg";

pub static MIN_TRACK_NUMBER_WIDTH: usize = 2;
pub static MP3_EXTENSION: &str = "mp3";
pub static PARTIAL_FILE_SUFFIX: &str = "part";
pub static FALLBACK_TITLE: &str = "Track";

pub static LOG_PATTERN: &str = "{h({l:<5})} {m}{n}";
