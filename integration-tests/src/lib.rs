//! Shared fixtures for the end-to-end tests.
//!
//! [`write_report`] writes a small report export for a forming history with
//! one remeshing event:
//!
//! - Step 10 uses the original two-element mesh.
//! - The mesh is regenerated at step 15 (marker `-15`) into three elements,
//!   which persist through steps 20 and 30.
//!
//! Both meshes share their first two element centroids, at `(1, 1, 1)` and
//! `(2, 2, 2)`, so strain crosses the remesh without ambiguity.

use std::{fmt::Write, fs, path::Path};

/// Strain of the three elements at the final step.
pub const FINAL_STRAIN: [f64; 3] = [0.3, 0.6, 0.9];

/// Strain the first step reports before backtracking.
pub const INITIAL_STRAIN: [f64; 2] = [0.01, 0.02];

const NODES: [[f64; 3]; 6] = [
    [0.0, 0.0, 0.0],
    [4.0, 0.0, 0.0],
    [0.0, 4.0, 0.0],
    [0.0, 0.0, 4.0],
    [4.0, 4.0, 4.0],
    [8.0, 8.0, 8.0],
];

const ORIGINAL_MESH: [[u64; 4]; 2] = [[1, 2, 3, 4], [2, 3, 4, 5]];
const REMESHED_MESH: [[u64; 4]; 3] = [[1, 2, 3, 4], [2, 3, 4, 5], [3, 4, 5, 6]];

struct Snapshot {
    label: &'static str,
    node_count: usize,
    elements: &'static [[u64; 4]],
    strains: &'static [f64],
}

const HISTORY: [Snapshot; 4] = [
    Snapshot {
        label: "10",
        node_count: 5,
        elements: &ORIGINAL_MESH,
        strains: &INITIAL_STRAIN,
    },
    Snapshot {
        label: "-15",
        node_count: 6,
        elements: &REMESHED_MESH,
        strains: &[0.15, 0.16, 0.17],
    },
    Snapshot {
        label: "20",
        node_count: 6,
        elements: &REMESHED_MESH,
        strains: &[0.2, 0.21, 0.22],
    },
    Snapshot {
        label: "30",
        node_count: 6,
        elements: &REMESHED_MESH,
        strains: &FINAL_STRAIN,
    },
];

/// Writes the three report files into `dir`.
///
/// # Panics
///
/// Panics if a file cannot be written.
pub fn write_report(dir: &Path) {
    let mut nodes = String::new();
    let mut elements = String::new();
    let mut strain = String::new();

    for snapshot in &HISTORY {
        let label = snapshot.label;

        writeln!(nodes, "* Step {label}\nRZ 1 {}", snapshot.node_count).unwrap();
        for (i, [x, y, z]) in NODES.iter().take(snapshot.node_count).enumerate() {
            writeln!(nodes, "{} {x} {y} {z}", i + 1).unwrap();
        }
        nodes.push('\n');

        writeln!(elements, "* Step {label}\nELMCON 1 {}", snapshot.elements.len()).unwrap();
        for (i, [a, b, c, d]) in snapshot.elements.iter().enumerate() {
            writeln!(elements, "{} {a} {b} {c} {d}", i + 1).unwrap();
        }
        elements.push('\n');

        writeln!(strain, "* Step {label}\nSTRAIN 1 {}", snapshot.strains.len()).unwrap();
        for (i, value) in snapshot.strains.iter().enumerate() {
            writeln!(strain, "{} {value}", i + 1).unwrap();
        }
        strain.push('\n');
    }

    fs::write(dir.join("MetalFlow_RZ.txt"), nodes).unwrap();
    fs::write(dir.join("MetalFlow_ELMCON.txt"), elements).unwrap();
    fs::write(dir.join("StateVar__Strain.txt"), strain).unwrap();
}

/// Returns the names of the files directly inside `dir`, sorted.
///
/// # Panics
///
/// Panics if the directory cannot be read.
#[must_use]
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
