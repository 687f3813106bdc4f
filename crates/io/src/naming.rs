//! File naming for step tables.
//!
//! Every table file is named `{prefix}{step}{extension}`, where the step is the
//! signed integer written with [`Display`](std::fmt::Display). Tracked point
//! clouds prepend a further prefix to the point cloud prefix, so that
//! `PCD_Step-15.csv` is tracked as `TRACKED_PCD_Step-15.csv`.

use std::fmt;

use remesh_core::Step;
use serde::Deserialize;
use thiserror::Error;

/// The kinds of per-step table a simulation directory holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    /// Node coordinates.
    Nodes,
    /// Element connectivity.
    Elements,
    /// Effective strain per element.
    Strain,
    /// Raw point cloud.
    PointCloud,
    /// Point cloud enriched by the backward sweep.
    Tracked,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Nodes => "nodes",
            Self::Elements => "elements",
            Self::Strain => "strain",
            Self::PointCloud => "point cloud",
            Self::Tracked => "tracked point cloud",
        })
    }
}

/// File name prefixes and extension for step tables.
///
/// Deserializes from a table whose keys are all optional:
///
/// ```toml
/// pcd_prefix = "PCD_Step"
/// tracked_prefix = "TRACKED_"
/// extension = ".csv"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "NamingFile")]
pub struct Naming {
    pcd_prefix: String,
    tracked_prefix: String,
    nodes_prefix: String,
    elements_prefix: String,
    strain_prefix: String,
    extension: String,
}

/// Errors that can occur when validating a [`Naming`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} prefix must not be empty")]
    EmptyPrefix(TableKind),

    #[error("extension must not be empty")]
    EmptyExtension,

    #[error("{0} prefix must not contain a path separator")]
    PathSeparator(TableKind),
}

/// Error returned when a file name does not encode a step.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{name:?} is not a {kind} file name")]
pub struct MalformedStepName {
    pub name: String,
    pub kind: TableKind,
}

impl Default for Naming {
    fn default() -> Self {
        Self {
            pcd_prefix: "PCD_Step".into(),
            tracked_prefix: "TRACKED_".into(),
            nodes_prefix: "RZ_Step".into(),
            elements_prefix: "ELMCON_Step".into(),
            strain_prefix: "STRAIN_Step".into(),
            extension: ".csv".into(),
        }
    }
}

impl Naming {
    /// Replaces the prefix used for one table kind.
    ///
    /// For [`TableKind::Tracked`] this is the prefix prepended to the point
    /// cloud prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the prefix is empty or contains a path separator.
    pub fn with_prefix(
        mut self,
        kind: TableKind,
        prefix: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let prefix = prefix.into();
        if prefix.is_empty() {
            return Err(ConfigError::EmptyPrefix(kind));
        }
        if prefix.contains(['/', '\\']) {
            return Err(ConfigError::PathSeparator(kind));
        }

        let slot = match kind {
            TableKind::Nodes => &mut self.nodes_prefix,
            TableKind::Elements => &mut self.elements_prefix,
            TableKind::Strain => &mut self.strain_prefix,
            TableKind::PointCloud => &mut self.pcd_prefix,
            TableKind::Tracked => &mut self.tracked_prefix,
        };
        *slot = prefix;

        Ok(self)
    }

    /// Replaces the file extension, including its leading dot.
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is empty.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Result<Self, ConfigError> {
        let extension = extension.into();
        if extension.is_empty() {
            return Err(ConfigError::EmptyExtension);
        }
        self.extension = extension;
        Ok(self)
    }

    /// Returns the full file name prefix for a table kind.
    #[must_use]
    pub fn prefix(&self, kind: TableKind) -> String {
        match kind {
            TableKind::Nodes => self.nodes_prefix.clone(),
            TableKind::Elements => self.elements_prefix.clone(),
            TableKind::Strain => self.strain_prefix.clone(),
            TableKind::PointCloud => self.pcd_prefix.clone(),
            TableKind::Tracked => format!("{}{}", self.tracked_prefix, self.pcd_prefix),
        }
    }

    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Returns the file name of a step's table.
    #[must_use]
    pub fn file_name(&self, kind: TableKind, step: Step) -> String {
        format!("{}{step}{}", self.prefix(kind), self.extension)
    }

    /// Extracts the step from a table file name.
    ///
    /// The token between the prefix and the extension must be a signed
    /// integer. Tracked point clouds do not parse as raw point clouds.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedStepName`] if the name has the wrong prefix or
    /// extension, or if the token is not an integer.
    pub fn parse_step(
        &self,
        kind: TableKind,
        file_name: &str,
    ) -> Result<Step, MalformedStepName> {
        let malformed = || MalformedStepName {
            name: file_name.to_owned(),
            kind,
        };

        let token = file_name
            .strip_prefix(self.prefix(kind).as_str())
            .and_then(|rest| rest.strip_suffix(self.extension.as_str()))
            .ok_or_else(malformed)?;

        // Reject tokens `FromStr` would otherwise trim or accept.
        if token.is_empty() || token.starts_with('+') || token.trim() != token {
            return Err(malformed());
        }

        token.parse().map_err(|_| malformed())
    }
}

/// On-disk shape of [`Naming`], validated on conversion.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct NamingFile {
    pcd_prefix: Option<String>,
    tracked_prefix: Option<String>,
    nodes_prefix: Option<String>,
    elements_prefix: Option<String>,
    strain_prefix: Option<String>,
    extension: Option<String>,
}

impl TryFrom<NamingFile> for Naming {
    type Error = ConfigError;

    fn try_from(file: NamingFile) -> Result<Self, Self::Error> {
        let prefixes = [
            (TableKind::PointCloud, file.pcd_prefix),
            (TableKind::Tracked, file.tracked_prefix),
            (TableKind::Nodes, file.nodes_prefix),
            (TableKind::Elements, file.elements_prefix),
            (TableKind::Strain, file.strain_prefix),
        ];

        let mut naming = prefixes
            .into_iter()
            .try_fold(Self::default(), |naming, (kind, prefix)| match prefix {
                Some(prefix) => naming.with_prefix(kind, prefix),
                None => Ok(naming),
            })?;

        if let Some(extension) = file.extension {
            naming = naming.with_extension(extension)?;
        }

        Ok(naming)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_names_match_the_report_export() {
        let naming = Naming::default();

        let name = |kind, step| naming.file_name(kind, Step::new(step));

        assert_eq!(name(TableKind::PointCloud, -15), "PCD_Step-15.csv");
        assert_eq!(name(TableKind::Tracked, 30), "TRACKED_PCD_Step30.csv");
        assert_eq!(name(TableKind::Nodes, -1), "RZ_Step-1.csv");
        assert_eq!(name(TableKind::Elements, 4), "ELMCON_Step4.csv");
        assert_eq!(name(TableKind::Strain, 4), "STRAIN_Step4.csv");
    }

    #[test]
    fn parses_signed_tokens() {
        let naming = Naming::default();

        let parse = |kind, name| naming.parse_step(kind, name).map(Step::get);

        assert_eq!(parse(TableKind::PointCloud, "PCD_Step-223.csv"), Ok(-223));
        assert_eq!(parse(TableKind::PointCloud, "PCD_Step222.csv"), Ok(222));
        assert_eq!(parse(TableKind::Tracked, "TRACKED_PCD_Step7.csv"), Ok(7));
    }

    #[test]
    fn file_names_parse_back() {
        let naming = Naming::default();
        let name = naming.file_name(TableKind::Strain, Step::new(-9));

        assert_eq!(naming.parse_step(TableKind::Strain, &name), Ok(Step::new(-9)));
    }

    #[test]
    fn rejects_malformed_names() {
        let naming = Naming::default();

        for name in [
            "PCD_Step.csv",
            "PCD_Stepabc.csv",
            "PCD_Step12.txt",
            "PCD_Step+12.csv",
            "PCD_Step 12.csv",
            "RZ_Step12.csv",
            "TRACKED_PCD_Step12.csv",
            "notes.md",
        ] {
            let err = naming
                .parse_step(TableKind::PointCloud, name)
                .expect_err("name should be rejected");
            assert_eq!(err.name, name);
        }
    }

    #[test]
    fn custom_prefixes_are_validated() {
        let naming = Naming::default()
            .with_prefix(TableKind::PointCloud, "CLOUD_")
            .expect("valid prefix");
        assert_eq!(
            naming.file_name(TableKind::Tracked, Step::new(1)),
            "TRACKED_CLOUD_1.csv"
        );

        assert_eq!(
            Naming::default().with_prefix(TableKind::Nodes, ""),
            Err(ConfigError::EmptyPrefix(TableKind::Nodes))
        );
        assert_eq!(
            Naming::default().with_prefix(TableKind::Strain, "a/b"),
            Err(ConfigError::PathSeparator(TableKind::Strain))
        );
        assert_eq!(
            Naming::default().with_extension(""),
            Err(ConfigError::EmptyExtension)
        );
    }

    #[test]
    fn deserializes_partial_tables() {
        let naming: Naming =
            toml::from_str("extension = \".txt\"\npcd_prefix = \"P\"").expect("valid toml");

        assert_eq!(naming.file_name(TableKind::PointCloud, Step::new(2)), "P2.txt");
        assert_eq!(naming.file_name(TableKind::Nodes, Step::new(2)), "RZ_Step2.txt");
    }

    #[test]
    fn rejects_invalid_tables() {
        assert!(toml::from_str::<Naming>("extension = \"\"").is_err());
        assert!(toml::from_str::<Naming>("pcd_prfix = \"P\"").is_err());
    }
}
