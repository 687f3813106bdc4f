//! Parser for the simulation's text report.
//!
//! A report export holds three files, one per quantity. Each is a sequence of
//! step blocks:
//!
//! ```text
//! * Step -1
//! RZ           1   4
//! 1  0.0  0.0  0.0
//! 2  1.0  0.0  0.0
//!
//! * Step 5
//! ...
//! ```
//!
//! A line whose first token starts with `*` opens a block. The remaining text
//! of the line, with whitespace removed, is the block label (`Step-1`). Section
//! header lines are skipped, and a blank line or the end of the file closes the
//! block. Every other line is a whitespace separated data row.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::{debug, info};
use remesh_core::Step;
use serde::Deserialize;
use thiserror::Error;
use walkdir::WalkDir;

use crate::{
    naming::{Naming, TableKind},
    table::{self, ConnectivityRecord, NodeRecord, Record, StrainRecord, TableError},
};

const SECTION_MARKERS: [&str; 3] = ["RZ", "ELMCON", "STRAIN"];
const LABEL_PREFIX: &str = "Step";

/// File names of the three report files.
///
/// All keys are optional when deserialized:
///
/// ```toml
/// elements = "MetalFlow_ELMCON.txt"
/// nodes = "MetalFlow_RZ.txt"
/// strain = "StateVar__Strain.txt"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportFiles {
    elements: String,
    nodes: String,
    strain: String,
}

impl Default for ReportFiles {
    fn default() -> Self {
        Self {
            elements: "MetalFlow_ELMCON.txt".into(),
            nodes: "MetalFlow_RZ.txt".into(),
            strain: "StateVar__Strain.txt".into(),
        }
    }
}

impl ReportFiles {
    #[must_use]
    pub fn elements(&self) -> &str {
        &self.elements
    }

    #[must_use]
    pub fn nodes(&self) -> &str {
        &self.nodes
    }

    #[must_use]
    pub fn strain(&self) -> &str {
        &self.strain
    }
}

/// Locations of the three report files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub elements: PathBuf,
    pub nodes: PathBuf,
    pub strain: PathBuf,
}

/// One step block of a report file.
#[derive(Debug, Clone, PartialEq)]
pub struct Block<R> {
    pub step: Step,
    pub rows: Vec<R>,
}

/// Errors that can occur while parsing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("no {name} found under {}; generate the report export first", dir.display())]
    MissingReport { name: String, dir: PathBuf },

    #[error("failed to access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}:{line}: {reason}", path.display())]
    InvalidRecord {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error(transparent)]
    Table(#[from] TableError),
}

/// Finds the report files anywhere under `dir`.
///
/// When a name occurs more than once, the last match in walk order wins.
///
/// # Errors
///
/// Returns [`ReportError::MissingReport`] naming the first file not found.
pub fn locate(dir: &Path, files: &ReportFiles) -> Result<ReportPaths, ReportError> {
    let mut found: [Option<PathBuf>; 3] = [None, None, None];
    let names = [files.elements(), files.nodes(), files.strain()];

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| ReportError::Io {
            path: e.path().unwrap_or(dir).to_owned(),
            source: e.into(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if let Some(i) = names.iter().position(|&n| n == name.as_ref()) {
            found[i] = Some(entry.path().to_owned());
        }
    }

    let [elements, nodes, strain] = found;
    let missing = |name: &str| ReportError::MissingReport {
        name: name.to_owned(),
        dir: dir.to_owned(),
    };

    Ok(ReportPaths {
        elements: elements.ok_or_else(|| missing(files.elements()))?,
        nodes: nodes.ok_or_else(|| missing(files.nodes()))?,
        strain: strain.ok_or_else(|| missing(files.strain()))?,
    })
}

/// Parses the step blocks of one report file.
///
/// `path` is only used in error messages.
///
/// # Errors
///
/// Returns [`ReportError::InvalidRecord`] for a block label that does not name
/// a step, a data row outside any block, or a row that does not parse.
pub fn parse_blocks<R: Record>(text: &str, path: &Path) -> Result<Vec<Block<R>>, ReportError> {
    let invalid = |line: usize, reason: String| ReportError::InvalidRecord {
        path: path.to_owned(),
        line,
        reason,
    };

    let mut blocks = Vec::new();
    let mut current: Option<Block<R>> = None;

    for (i, line) in text.lines().enumerate() {
        let line_no = i + 1;
        let tokens: Vec<&str> = line.split_whitespace().collect();

        let Some(&first) = tokens.first() else {
            blocks.extend(current.take());
            continue;
        };

        if let Some(rest) = first.strip_prefix('*') {
            blocks.extend(current.take());
            let label = std::iter::once(rest)
                .chain(tokens[1..].iter().copied())
                .collect::<String>();
            let step = parse_label(&label)
                .ok_or_else(|| invalid(line_no, format!("{label:?} does not name a step")))?;
            current = Some(Block {
                step,
                rows: Vec::new(),
            });
            continue;
        }

        if SECTION_MARKERS.iter().any(|m| first.contains(m)) {
            continue;
        }

        let block = current
            .as_mut()
            .ok_or_else(|| invalid(line_no, "data row outside a step block".into()))?;
        if tokens.len() != R::COLUMNS.len() {
            return Err(invalid(
                line_no,
                format!("expected {} fields, found {}", R::COLUMNS.len(), tokens.len()),
            ));
        }
        let row = R::from_cells(&tokens).map_err(|reason| invalid(line_no, reason))?;
        block.rows.push(row);
    }
    blocks.extend(current);

    Ok(blocks)
}

fn parse_label(label: &str) -> Option<Step> {
    label.strip_prefix(LABEL_PREFIX)?.parse::<i64>().ok().map(Step::new)
}

/// Reads and parses one report file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not parse.
pub fn read_blocks<R: Record>(path: &Path) -> Result<Vec<Block<R>>, ReportError> {
    let text = fs::read_to_string(path).map_err(|source| ReportError::Io {
        path: path.to_owned(),
        source,
    })?;
    parse_blocks(&text, path)
}

fn write_blocks<R: Record>(
    blocks: &[Block<R>],
    kind: TableKind,
    out: &Path,
    naming: &Naming,
) -> Result<(), ReportError> {
    for block in blocks {
        debug!("  {kind} table for step {}: {} rows", block.step, block.rows.len());
        table::write(&out.join(naming.file_name(kind, block.step)), &block.rows)?;
    }
    Ok(())
}

/// Splits the report files found under `dir` into per-step tables in `out`.
///
/// `out` is created if missing. Existing tables with the same names are
/// replaced and other files are left alone.
///
/// Returns the steps that received a node table, in ascending order.
///
/// # Errors
///
/// Returns an error if a report file is missing or does not parse, or if a
/// table cannot be written.
pub fn split(
    dir: &Path,
    files: &ReportFiles,
    out: &Path,
    naming: &Naming,
) -> Result<Vec<Step>, ReportError> {
    let paths = locate(dir, files)?;
    fs::create_dir_all(out).map_err(|source| ReportError::Io {
        path: out.to_owned(),
        source,
    })?;

    info!("Processing element data from {}", paths.elements.display());
    let elements = read_blocks::<ConnectivityRecord>(&paths.elements)?;
    write_blocks(&elements, TableKind::Elements, out, naming)?;

    info!("Processing node data from {}", paths.nodes.display());
    let nodes = read_blocks::<NodeRecord>(&paths.nodes)?;
    write_blocks(&nodes, TableKind::Nodes, out, naming)?;

    info!("Processing strain data from {}", paths.strain.display());
    let strains = read_blocks::<StrainRecord>(&paths.strain)?;
    write_blocks(&strains, TableKind::Strain, out, naming)?;

    let mut steps: Vec<Step> = nodes.iter().map(|b| b.step).collect();
    steps.sort_unstable();
    steps.dedup();
    Ok(steps)
}
