//! Core types and traits for remesh-track.
//!
//! This crate defines the shared vocabulary that the sequencer, the backward
//! sweep, the observers, and the persistence layer build on:
//!
//! - [`Step`]: a signed simulation step identifier (negative marks a remesh)
//! - [`Element`] and [`PointCloud`]: element centroids carrying effective strain
//! - [`SnapshotStore`]: loads raw snapshots and persists backtracked ones
//! - [`Observer`]: receives sweep events and optionally returns control actions

mod cloud;
mod memory;
mod observer;
mod step;
mod store;

pub use cloud::{Element, ElementId, PointCloud};
pub use memory::{MemoryStore, MissingSnapshot};
pub use observer::Observer;
pub use step::{ParseStepError, Sign, Step};
pub use store::SnapshotStore;
