//! Nearest-centroid correspondence between two point clouds.
//!
//! A [`SpatialMatcher`] indexes the centroids of a *candidate* cloud, the one
//! holding trusted strain values, in an R-tree. Each element of a *source*
//! cloud is then matched to its single nearest candidate by Euclidean
//! centroid distance.
//!
//! The index is built once per matcher and is read-only afterwards, so the
//! per-element queries are independent. With the `rayon` feature enabled,
//! [`SpatialMatcher::match_all`] runs them in parallel; results are identical.
//!
//! Among equidistant candidates the one with the lowest index wins, so results
//! do not depend on the R-tree's internal layout.
//!
//! Centroids must be finite. A NaN or infinite coordinate in either cloud is
//! reported as [`MatchError::NonFiniteCentroid`] before the tree sees it.

mod error;

pub use error::{EmptySourceSetError, MatchError};

use remesh_core::{Element, PointCloud};
use rstar::{AABB, PointDistance, RTree, RTreeObject};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// A candidate centroid stored in the R-tree.
#[derive(Debug, Clone, Copy)]
struct IndexedCentroid {
    centroid: [f64; 3],
    index: usize,
}

impl RTreeObject for IndexedCentroid {
    type Envelope = AABB<[f64; 3]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.centroid)
    }
}

impl PointDistance for IndexedCentroid {
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        squared_distance(&self.centroid, point)
    }
}

fn is_finite(point: &[f64; 3]) -> bool {
    point.iter().all(|coord| coord.is_finite())
}

fn check_finite<'e>(elements: impl IntoIterator<Item = &'e Element>) -> Result<(), MatchError> {
    match elements.into_iter().find(|element| !is_finite(&element.centroid)) {
        Some(element) => Err(MatchError::NonFiniteCentroid(element.id)),
        None => Ok(()),
    }
}

fn squared_distance(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a.iter().zip(b).map(|(a, b)| (a - b) * (a - b)).sum()
}

/// The nearest candidate for one source element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match {
    /// Index of the candidate element in its cloud.
    pub index: usize,

    /// Euclidean distance between the two centroids.
    pub distance: f64,
}

/// Read-only spatial index over a candidate cloud.
pub struct SpatialMatcher<'a> {
    candidates: &'a PointCloud,
    tree: RTree<IndexedCentroid>,
}

impl<'a> SpatialMatcher<'a> {
    /// Bulk-loads the index over the candidate centroids.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::EmptySourceSet`] if `candidates` has no elements
    /// and [`MatchError::NonFiniteCentroid`] if a candidate centroid is not
    /// finite.
    pub fn new(candidates: &'a PointCloud) -> Result<Self, MatchError> {
        if candidates.is_empty() {
            return Err(EmptySourceSetError.into());
        }
        check_finite(candidates.iter())?;

        let indexed: Vec<IndexedCentroid> = candidates
            .iter()
            .enumerate()
            .map(|(index, element)| IndexedCentroid {
                centroid: element.centroid,
                index,
            })
            .collect();

        Ok(Self {
            candidates,
            tree: RTree::bulk_load(indexed),
        })
    }

    /// Returns the candidate cloud this matcher indexes.
    #[must_use]
    pub fn candidates(&self) -> &'a PointCloud {
        self.candidates
    }

    /// Finds the nearest candidate to a point.
    ///
    /// Ties go to the lowest candidate index. Returns `None` only when `point`
    /// is not finite, since the index is never empty.
    #[must_use]
    pub fn nearest(&self, point: &[f64; 3]) -> Option<Match> {
        if !is_finite(point) {
            return None;
        }
        let mut ordered = self.tree.nearest_neighbor_iter(point);
        let first = ordered.next()?;
        let best = first.distance_2(point);

        let index = ordered
            .take_while(|candidate| candidate.distance_2(point) <= best)
            .fold(first.index, |lowest, candidate| lowest.min(candidate.index));

        Some(Match {
            index,
            distance: best.sqrt(),
        })
    }

    /// Finds the nearest candidate for every source element, in source order.
    ///
    /// The result holds one match per source element with a finite centroid.
    #[must_use]
    pub fn match_all(&self, source: &PointCloud) -> Vec<Match> {
        #[cfg(feature = "rayon")]
        {
            source
                .elements()
                .par_iter()
                .filter_map(|element| self.nearest(&element.centroid))
                .collect()
        }

        #[cfg(not(feature = "rayon"))]
        {
            source
                .iter()
                .filter_map(|element| self.nearest(&element.centroid))
                .collect()
        }
    }

    /// Returns `source` with each strain taken from its nearest candidate.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::NonFiniteCentroid`] if a source centroid is not
    /// finite.
    pub fn transfer(&self, source: PointCloud) -> Result<PointCloud, MatchError> {
        check_finite(source.iter())?;

        let matches = self.match_all(&source);
        if let Some(worst) = matches.iter().map(|m| m.distance).reduce(f64::max) {
            log::debug!(
                "matched {} elements against {} candidates (max distance {worst:.6})",
                source.len(),
                self.candidates.len(),
            );
        }

        let elements = self.candidates.elements();
        Ok(source.with_strains(matches.iter().map(|m| elements[m.index].strain)))
    }
}

/// Assigns each `source` element the strain of its nearest `candidates` element.
///
/// The returned cloud keeps the identifiers, centroids, and order of `source`;
/// only strain values change.
///
/// # Errors
///
/// Returns [`MatchError::EmptySourceSet`] if `candidates` has no elements
/// and [`MatchError::NonFiniteCentroid`] if any centroid is not finite.
pub fn transfer(source: PointCloud, candidates: &PointCloud) -> Result<PointCloud, MatchError> {
    SpatialMatcher::new(candidates)?.transfer(source)
}
