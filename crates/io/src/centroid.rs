//! Reduction of node and connectivity tables to element centroids.

use std::{collections::HashMap, path::Path};

use log::info;
use remesh_core::{Element, PointCloud, Step};
use thiserror::Error;

use crate::{
    discover::discover_kind,
    naming::{Naming, TableKind},
    table::{self, ConnectivityRecord, NodeRecord, StrainRecord, TableError},
};

/// Errors that can occur while building point clouds.
#[derive(Debug, Error)]
pub enum CentroidError {
    #[error("element {element} references unknown node {node}")]
    UnknownNode { element: u64, node: u64 },

    #[error("failed to build the point cloud for step {step}")]
    Step {
        step: Step,
        #[source]
        source: Box<CentroidError>,
    },

    #[error(transparent)]
    Table(#[from] TableError),
}

/// Builds a point cloud from one step's tables.
///
/// Each element's centroid is the mean of its four node positions. Volume is
/// left unknown. Strain is joined by element id, and elements without a strain
/// row get none. Element order follows the connectivity table.
///
/// # Errors
///
/// Returns [`CentroidError::UnknownNode`] if an element references a node id
/// missing from `nodes`.
pub fn point_cloud(
    nodes: &[NodeRecord],
    elements: &[ConnectivityRecord],
    strains: &[StrainRecord],
) -> Result<PointCloud, CentroidError> {
    let positions: HashMap<u64, [f64; 3]> = nodes.iter().map(|n| (n.id, n.position)).collect();
    let strains: HashMap<u64, f64> = strains.iter().map(|s| (s.id, s.strain)).collect();

    elements
        .iter()
        .map(|element| {
            let mut sum = [0.0; 3];
            for &node in &element.nodes {
                let position = positions.get(&node).ok_or(CentroidError::UnknownNode {
                    element: element.id,
                    node,
                })?;
                for (total, coord) in sum.iter_mut().zip(position) {
                    *total += coord;
                }
            }
            let centroid = sum.map(|total| total / 4.0);

            Ok(Element::new(element.id, centroid).with_strain(strains.get(&element.id).copied()))
        })
        .collect()
}

/// Loads one step's tables from `dir` and builds its point cloud.
///
/// # Errors
///
/// Returns an error if a table cannot be read or references an unknown node.
pub fn load_point_cloud(
    dir: &Path,
    naming: &Naming,
    step: Step,
) -> Result<PointCloud, CentroidError> {
    let path = |kind| dir.join(naming.file_name(kind, step));

    let nodes: Vec<NodeRecord> = table::read(&path(TableKind::Nodes))?;
    let elements: Vec<ConnectivityRecord> = table::read(&path(TableKind::Elements))?;
    let strains: Vec<StrainRecord> = table::read(&path(TableKind::Strain))?;

    point_cloud(&nodes, &elements, &strains)
}

/// Writes a point cloud for every step with a node table under `dir`.
///
/// Node tables are found recursively. Each step's element and strain tables
/// are read from the directory holding its node table, and the point cloud is
/// written there too. Returns the steps written, in ascending order.
///
/// # Errors
///
/// Returns an error naming the step whose point cloud could not be built or
/// written.
pub fn write_point_clouds(dir: &Path, naming: &Naming) -> Result<Vec<Step>, CentroidError> {
    let discovered = discover_kind(dir, naming, TableKind::Nodes);
    let steps: Vec<Step> = discovered.steps().collect();
    info!("Processing element centroids for {} steps", steps.len());

    for &step in &steps {
        info!("  Step{step}");
        let wrap = |source| CentroidError::Step {
            step,
            source: Box::new(source),
        };

        let step_dir = discovered.path(step).and_then(Path::parent).unwrap_or(dir);
        let cloud = load_point_cloud(step_dir, naming, step).map_err(wrap)?;
        let path = step_dir.join(naming.file_name(TableKind::PointCloud, step));
        table::write_point_cloud(&path, &cloud).map_err(|e| wrap(e.into()))?;
    }

    Ok(steps)
}
