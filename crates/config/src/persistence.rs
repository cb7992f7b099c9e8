//! Locating and parsing the settings file.
//!
//! Lookup order, first existing file wins:
//!
//! 1. `./lookout.json5`, then `./lookout.json`
//! 2. `<config dir>/lookout/config.json5`, then `<config dir>/lookout/config.json`
//!
//! `<config dir>` is [`dirs::config_dir`], e.g. `~/.config` on Linux. Both
//! extensions are parsed as JSON5, which accepts plain JSON too.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{ConfigError, Result};

const LOCAL_CANDIDATES: [&str; 2] = ["lookout.json5", "lookout.json"];
const USER_SUBDIR: &str = "lookout";
const USER_CANDIDATES: [&str; 2] = ["config.json5", "config.json"];

/// Returns the first settings file found in the working directory or the
/// user config directory.
#[must_use]
pub fn find_config_file() -> Option<PathBuf> {
    find_config_file_in(Path::new("."), dirs::config_dir().as_deref())
}

/// Same as [`find_config_file`], with both search roots supplied by the
/// caller.
#[must_use]
pub fn find_config_file_in(local_dir: &Path, user_config_dir: Option<&Path>) -> Option<PathBuf> {
    let local = LOCAL_CANDIDATES.iter().map(|name| local_dir.join(name));
    let user = user_config_dir
        .map(|dir| dir.join(USER_SUBDIR))
        .into_iter()
        .flat_map(|dir| USER_CANDIDATES.iter().map(move |name| dir.join(name)));

    local.chain(user).find(|candidate| candidate.is_file())
}

/// Parses the settings file at `path`. Validation is left to the caller.
pub(crate) fn parse_config_file(path: &Path) -> Result<Config> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json5::from_str(&text)?)
}
