//! CSV codecs for per-step tables.
//!
//! Every table has a header row and comma separated cells. Columns are located
//! by header name, so extra columns and reordered columns are tolerated.
//!
//! | table       | columns                                                   |
//! |-------------|-----------------------------------------------------------|
//! | nodes       | `Node Id,X,Y,Z`                                           |
//! | elements    | `Element Id,V1,V2,V3,V4`                                  |
//! | strain      | `Element Id,Eff-Strain`                                   |
//! | point cloud | `Element Id,Element Volume,CX,CY,CZ,Eff-Strain`           |
//!
//! In point clouds an unknown volume is written as `n/a` and an unknown strain
//! as an empty cell.

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

use remesh_core::{Element, PointCloud};
use thiserror::Error;

const VOLUME_PLACEHOLDER: &str = "n/a";

/// A node and its coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeRecord {
    pub id: u64,
    pub position: [f64; 3],
}

/// A tetrahedral element and the ids of its four nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectivityRecord {
    pub id: u64,
    pub nodes: [u64; 4],
}

/// The effective strain of one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrainRecord {
    pub id: u64,
    pub strain: f64,
}

/// Errors that can occur while reading or writing a table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} has no {column:?} column", path.display())]
    SchemaMismatch { path: PathBuf, column: &'static str },

    #[error("{}:{line}: {reason}", path.display())]
    InvalidRecord {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

impl TableError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_owned(),
            source,
        }
    }
}

/// A record type with a fixed set of named columns.
pub trait Record: Sized {
    /// Column names, in the order they are written.
    const COLUMNS: &'static [&'static str];

    /// Builds a record from cells ordered like [`Record::COLUMNS`].
    ///
    /// # Errors
    ///
    /// Returns a description of the first cell that does not parse.
    fn from_cells(cells: &[&str]) -> Result<Self, String>;

    /// Writes the record's cells, comma separated, without a line ending.
    ///
    /// # Errors
    ///
    /// Returns any error from the writer.
    fn write_cells<W: Write>(&self, out: &mut W) -> io::Result<()>;
}

fn cell<T: FromStr>(cells: &[&str], index: usize, column: &str) -> Result<T, String> {
    let raw = cells.get(index).copied().unwrap_or_default();
    raw.parse()
        .map_err(|_| format!("{column} value {raw:?} is not valid"))
}

/// Parses a coordinate, rejecting NaN and infinities.
fn coordinate(cells: &[&str], index: usize, column: &str) -> Result<f64, String> {
    let value: f64 = cell(cells, index, column)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("{column} value {value} is not finite"))
    }
}

/// Parses an optional float, treating an empty cell or NaN as absent.
fn optional_cell(cells: &[&str], index: usize, column: &str) -> Result<Option<f64>, String> {
    match cells.get(index).copied().unwrap_or_default() {
        "" => Ok(None),
        _ => cell::<f64>(cells, index, column).map(|v| (!v.is_nan()).then_some(v)),
    }
}

impl Record for NodeRecord {
    const COLUMNS: &'static [&'static str] = &["Node Id", "X", "Y", "Z"];

    fn from_cells(cells: &[&str]) -> Result<Self, String> {
        Ok(Self {
            id: cell(cells, 0, "Node Id")?,
            position: [
                coordinate(cells, 1, "X")?,
                coordinate(cells, 2, "Y")?,
                coordinate(cells, 3, "Z")?,
            ],
        })
    }

    fn write_cells<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let [x, y, z] = self.position;
        write!(out, "{},{x},{y},{z}", self.id)
    }
}

impl Record for ConnectivityRecord {
    const COLUMNS: &'static [&'static str] = &["Element Id", "V1", "V2", "V3", "V4"];

    fn from_cells(cells: &[&str]) -> Result<Self, String> {
        Ok(Self {
            id: cell(cells, 0, "Element Id")?,
            nodes: [
                cell(cells, 1, "V1")?,
                cell(cells, 2, "V2")?,
                cell(cells, 3, "V3")?,
                cell(cells, 4, "V4")?,
            ],
        })
    }

    fn write_cells<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let [a, b, c, d] = self.nodes;
        write!(out, "{},{a},{b},{c},{d}", self.id)
    }
}

impl Record for StrainRecord {
    const COLUMNS: &'static [&'static str] = &["Element Id", "Eff-Strain"];

    fn from_cells(cells: &[&str]) -> Result<Self, String> {
        Ok(Self {
            id: cell(cells, 0, "Element Id")?,
            strain: cell(cells, 1, "Eff-Strain")?,
        })
    }

    fn write_cells<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{},{}", self.id, self.strain)
    }
}

impl Record for Element {
    const COLUMNS: &'static [&'static str] = &[
        "Element Id",
        "Element Volume",
        "CX",
        "CY",
        "CZ",
        "Eff-Strain",
    ];

    fn from_cells(cells: &[&str]) -> Result<Self, String> {
        let volume = match cells.get(1).copied().unwrap_or_default() {
            VOLUME_PLACEHOLDER => None,
            _ => optional_cell(cells, 1, "Element Volume")?,
        };
        let centroid = [
            coordinate(cells, 2, "CX")?,
            coordinate(cells, 3, "CY")?,
            coordinate(cells, 4, "CZ")?,
        ];

        Ok(Element::new(cell(cells, 0, "Element Id")?, centroid)
            .with_volume(volume)
            .with_strain(optional_cell(cells, 5, "Eff-Strain")?))
    }

    fn write_cells<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{},", self.id)?;
        match self.volume {
            Some(volume) => write!(out, "{volume},")?,
            None => write!(out, "{VOLUME_PLACEHOLDER},")?,
        }
        let [x, y, z] = self.centroid;
        write!(out, "{x},{y},{z},")?;
        if let Some(strain) = self.strain {
            write!(out, "{strain}")?;
        }
        Ok(())
    }
}

/// Parses table text read from `path`.
///
/// `path` is only used in error messages.
///
/// # Errors
///
/// Returns [`TableError::SchemaMismatch`] if a column is missing and
/// [`TableError::InvalidRecord`] if a row does not parse.
pub fn parse<R: Record>(text: &str, path: &Path) -> Result<Vec<R>, TableError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim_end_matches('\r')));

    let header: Vec<&str> = match lines.next() {
        Some((_, line)) => line.split(',').map(str::trim).collect(),
        None => Vec::new(),
    };
    let positions = R::COLUMNS
        .iter()
        .map(|&column| {
            header
                .iter()
                .position(|&name| name == column)
                .ok_or_else(|| TableError::SchemaMismatch {
                    path: path.to_owned(),
                    column,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut records = Vec::new();
    for (line, text) in lines {
        if text.trim().is_empty() {
            continue;
        }
        let row: Vec<&str> = text.split(',').map(str::trim).collect();
        let cells: Vec<&str> = positions
            .iter()
            .map(|&i| row.get(i).copied().unwrap_or_default())
            .collect();

        let record = R::from_cells(&cells).map_err(|reason| TableError::InvalidRecord {
            path: path.to_owned(),
            line,
            reason,
        })?;
        records.push(record);
    }

    Ok(records)
}

/// Reads a table file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not parse.
pub fn read<R: Record>(path: &Path) -> Result<Vec<R>, TableError> {
    let text = fs::read_to_string(path).map_err(|e| TableError::io(path, e))?;
    parse(&text, path)
}

/// Writes records to a table file, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write<'a, R, I>(path: &Path, records: I) -> Result<(), TableError>
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let write_all = || -> io::Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        writeln!(out, "{}", R::COLUMNS.join(","))?;
        for record in records {
            record.write_cells(&mut out)?;
            writeln!(out)?;
        }
        out.flush()
    };
    write_all().map_err(|e| TableError::io(path, e))
}

/// Reads a point cloud file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not parse.
pub fn read_point_cloud(path: &Path) -> Result<PointCloud, TableError> {
    read::<Element>(path).map(PointCloud::new)
}

/// Writes a point cloud file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_point_cloud(path: &Path, cloud: &PointCloud) -> Result<(), TableError> {
    write(path, cloud.elements())
}
