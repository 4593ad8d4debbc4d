//! Theme preference persistence.
//!
//! The one piece of locally persisted state: a `dark`/`light` theme choice,
//! stored as a small versioned JSON file under a well-known path, read at
//! startup and written on every toggle.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{from_reader, to_writer_pretty};

use crate::error::{Error, Result};

/// Display theme preference.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Dark theme (the default).
    Dark,

    /// Light theme.
    Light,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Dark
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Dark => write!(f, "dark"),
            Theme::Light => write!(f, "light"),
        }
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.to_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            _ => Err(Error::validation(
                "theme must be 'dark' or 'light'",
                Some("theme".to_string()),
            )),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct PrefsFile {
    version: u8,
    theme: Theme,
}

impl PrefsFile {
    fn new(theme: Theme) -> Self {
        Self { version: 1, theme }
    }
}

/// Loads the persisted theme, falling back to the default when the file is
/// missing or unreadable.
pub fn load_theme<P: AsRef<Path>>(path: P) -> Theme {
    let Ok(file) = File::open(path.as_ref()) else {
        return Theme::default();
    };
    let reader = BufReader::new(file);
    from_reader::<_, PrefsFile>(reader)
        .map(|prefs| prefs.theme)
        .unwrap_or_default()
}

/// Persists the theme preference.
pub fn save_theme<P: AsRef<Path>>(path: P, theme: Theme) -> Result<()> {
    let file = File::create(path.as_ref())
        .map_err(|err| Error::io("failed to create preferences file", err))?;
    let writer = BufWriter::new(file);
    to_writer_pretty(writer, &PrefsFile::new(theme)).map_err(|err| {
        Error::serialization("failed to serialize preferences", Some(Box::new(err)))
    })
}
