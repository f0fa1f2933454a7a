use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;

use crate::Error;

/// Defaults for the command-line flags.
#[derive(Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub pattern: Option<String>,
    pub recurse: Option<bool>,
    pub probe: Option<bool>,
}

impl Config {
    /// Missing file means default configuration.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        match fs_err::read_to_string(path.as_ref()) {
            Ok(s) => Ok(toml::from_str(&s)?),
            Err(ref e) if e.kind() == ErrorKind::NotFound => Ok(Default::default()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Text files and rotated logs.
pub const DEFAULT_PATTERN: &str = r".*\.(txt|log(\.\d+)?)$";
