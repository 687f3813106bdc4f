use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use log::{info, warn};
use remesh_core::{Observer, Step};
use remesh_io::{Config, CsvStore, centroid, report};
use remesh_observers::{History, LogObserver, StopAt};
use remesh_sweep::{
    backtrack::{self, Action, Event, Solution},
    sequence::{StepSequence, sequence},
};

const METADATA_DIR: &str = "_metadata";

/// Returns the default output directory for a simulation directory.
///
/// This is a `_metadata` directory beside the simulation directory.
#[must_use]
pub fn metadata_dir(simulation_dir: &Path) -> PathBuf {
    simulation_dir
        .parent()
        .unwrap_or(simulation_dir)
        .join(METADATA_DIR)
}

/// Splits the report export under `simulation_dir` into step tables.
///
/// Returns the directory the tables were written to.
///
/// # Errors
///
/// Returns an error if a report file is missing or cannot be parsed.
pub fn parse(
    config: &Config,
    simulation_dir: &Path,
    out: Option<&Path>,
) -> anyhow::Result<PathBuf> {
    let out = out.map_or_else(|| metadata_dir(simulation_dir), Path::to_path_buf);
    info!("Parsing step data from {}", simulation_dir.display());

    let steps = report::split(simulation_dir, config.report(), &out, config.naming())
        .context("parsing the report export")?;
    info!("Wrote tables for {} steps to {}", steps.len(), out.display());

    Ok(out)
}

/// Builds a point cloud for every step with tables in `dir`.
///
/// # Errors
///
/// Returns an error if no step tables are found or a point cloud cannot be
/// built.
pub fn pcd(config: &Config, dir: &Path) -> anyhow::Result<Vec<Step>> {
    info!("Creating point clouds in {}", dir.display());

    let steps =
        centroid::write_point_clouds(dir, config.naming()).context("creating point clouds")?;
    if steps.is_empty() {
        bail!("no step tables found under {}", dir.display());
    }

    Ok(steps)
}

/// Backtracks strain through every point cloud found under `dir`.
///
/// Nothing is written when no point cloud is found. With `until`, the sweep
/// stops once that step has been written.
///
/// # Errors
///
/// Returns an error if no point cloud is found or any step fails to load,
/// transfer, or persist. Steps written before the failure are kept.
pub fn backtrack(config: &Config, dir: &Path, until: Option<Step>) -> anyhow::Result<Solution> {
    info!("Backtracking mesh state in {}", dir.display());

    let mut store = CsvStore::open(dir, config.naming().clone());
    let steps = sequence(store.steps().collect::<Vec<_>>())
        .with_context(|| format!("no point clouds found under {}", dir.display()))?;

    for bracket in steps.brackets() {
        if !bracket.is_complete() {
            warn!(
                "Remeshing marker {} is missing a neighbor (prev: {:?}, next: {:?})",
                bracket.marker(),
                bracket.prev(),
                bracket.next()
            );
        }
    }
    info!(
        "Sweeping {} steps from {} back to {}",
        steps.len(),
        steps.last(),
        steps.first()
    );

    let mut log = LogObserver::new();
    let mut history = History::new();
    let mut stop = stop_target(&steps, until).map(StopAt::new);
    let observer = |event: &Event<'_>| -> Option<Action> {
        log.observe(event);
        history.observe(event);
        stop.as_mut().and_then(|s| s.observe(event))
    };

    let solution = backtrack::solve(&mut store, &steps, observer)?;

    let spatial = history.spatial().count();
    info!(
        "Tracked {} steps ({spatial} by spatial matching), ending at step {}",
        solution.visited.len(),
        solution.step
    );

    Ok(solution)
}

/// Returns `until` if the sweep will reach it, warning when it will not.
fn stop_target(steps: &StepSequence, until: Option<Step>) -> Option<Step> {
    let until = until?;
    if steps.steps().contains(&until) {
        Some(until)
    } else {
        warn!("Step {until} is not in the sequence, sweeping every step");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_target_must_be_a_sequenced_step() {
        let steps = sequence(vec![Step::new(10), Step::new(-15), Step::new(20)]).expect("steps");

        assert_eq!(stop_target(&steps, Some(Step::new(-15))), Some(Step::new(-15)));
        assert_eq!(stop_target(&steps, Some(Step::new(15))), None);
        assert_eq!(stop_target(&steps, None), None);
    }
}
