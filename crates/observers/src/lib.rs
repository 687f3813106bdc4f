//! Reusable observers for the backward strain sweep.
//!
//! This crate provides [`Observer`] implementations for
//! [`remesh_sweep::backtrack::solve`] and the capability traits they are
//! written against.
//!
//! # Modules
//!
//! - [`traits`]: capability traits ([`HasStep`], [`CanStopEarly`])
//!
//! # Observers
//!
//! - [`LogObserver`] logs one line per persisted step.
//! - [`History`] records a summary of every event.
//! - [`StopAt`] stops the sweep once a given step has been persisted.
//!
//! [`Observer`]: remesh_core::Observer
//! [`HasStep`]: traits::HasStep
//! [`CanStopEarly`]: traits::CanStopEarly

pub mod traits;

mod history;
mod logger;
mod stop;

pub use history::{History, Record};
pub use logger::LogObserver;
pub use stop::StopAt;
