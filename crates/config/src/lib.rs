//! Configuration loading and validation for shelfmark.
//!
//! Settings are merged from three sources, with later sources winning:
//! hardcoded defaults, a TOML configuration file, and `SHELFMARK_`-prefixed
//! environment variables.

pub mod error;

use std::path::{Path, PathBuf};

use exn::ResultExt;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use shelfmark_catalog::consts::{DEFAULT_CATALOG_FILE, MAX_PUBLICATION_YEAR};

use crate::error::{ErrorKind, Result};

const ENV_PREFIX: &str = "SHELFMARK_";
const CONFIG_FILE: &str = "config.toml";

/// Runtime settings for the catalog manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Storage location of the catalog document.
    pub storage_file: PathBuf,
    /// Latest publication year accepted when adding a book.
    pub max_year: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_file: PathBuf::from(DEFAULT_CATALOG_FILE),
            max_year: MAX_PUBLICATION_YEAR,
        }
    }
}

impl Settings {
    /// Load settings, merging defaults, a TOML file and the environment.
    ///
    /// `explicit` overrides the configuration file location; when it is
    /// `None` the file is looked up in the platform config directory. A
    /// missing file at either location simply contributes nothing.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = explicit.map(Path::to_path_buf).or_else(default_config_file) {
            tracing::debug!(path = %path.display(), "merging configuration file");
            figment = figment.merge(Toml::file(path));
        }
        let settings: Self =
            figment.merge(Env::prefixed(ENV_PREFIX)).extract().or_raise(|| ErrorKind::Extract)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.max_year < 0 {
            exn::bail!(ErrorKind::InvalidMaxYear(self.max_year));
        }
        Ok(())
    }
}

/// Per-user configuration file in the platform config directory.
fn default_config_file() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "shelfmark").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}
