//! Step sequencing, spatial matching, and the backward strain sweep.
//!
//! The three modules build on each other, leaf first:
//!
//! - [`matching`]: nearest-centroid correspondence between two point clouds
//! - [`sequence`]: canonical ordered step list from raw discovery
//! - [`backtrack`]: walks the sequence backward, carrying strain from the
//!   most future snapshot to the most past one

pub mod backtrack;
pub mod matching;
pub mod sequence;
