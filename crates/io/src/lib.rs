//! File formats and persistence for remesh-track.
//!
//! The pipeline this crate supports runs in three stages:
//!
//! 1. [`report`] splits a simulation's text report into per-step node,
//!    connectivity, and strain tables.
//! 2. [`centroid`] reduces those tables to one point cloud per step.
//! 3. [`CsvStore`] serves point clouds to the backward sweep and persists the
//!    tracked results next to them.
//!
//! File names for every stage come from [`Naming`], and [`Config`] bundles
//! everything that can be set from a TOML file.

pub mod centroid;
pub mod config;
pub mod discover;
pub mod naming;
pub mod report;
pub mod store;
pub mod table;

pub use config::Config;
pub use discover::{Discovered, discover};
pub use naming::{Naming, TableKind};
pub use report::ReportFiles;
pub use store::{CsvStore, StoreError};
