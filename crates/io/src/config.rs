//! TOML configuration.
//!
//! ```toml
//! [naming]
//! pcd_prefix = "PCD_Step"
//! tracked_prefix = "TRACKED_"
//!
//! [report]
//! nodes = "MetalFlow_RZ.txt"
//! ```
//!
//! Every table and key is optional.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

use crate::{naming::Naming, report::ReportFiles};

/// File naming and report file names for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    naming: Naming,
    report: ReportFiles,
}

/// Errors that can occur while loading a [`Config`].
#[derive(Debug, Error)]
pub enum LoadConfigError {
    #[error("failed to read config {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl Config {
    #[must_use]
    pub fn new(naming: Naming, report: ReportFiles) -> Self {
        Self { naming, report }
    }

    /// Loads a config from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid config.
    pub fn load(path: &Path) -> Result<Self, LoadConfigError> {
        let text = fs::read_to_string(path).map_err(|source| LoadConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| LoadConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    #[must_use]
    pub fn naming(&self) -> &Naming {
        &self.naming
    }

    #[must_use]
    pub fn report(&self) -> &ReportFiles {
        &self.report
    }
}
