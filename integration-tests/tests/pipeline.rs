use std::fs;

use approx::assert_relative_eq;
use clap::Parser;
use integration_tests::{FINAL_STRAIN, INITIAL_STRAIN, file_names, write_report};
use remesh_cli::Cli;
use remesh_core::{SnapshotStore, Step};
use remesh_io::{Config, CsvStore, Naming, table};
use remesh_observers::History;
use remesh_sweep::{
    backtrack::{self, Status, Transition},
    sequence::sequence,
};
use tempfile::TempDir;

fn steps(ids: &[i64]) -> Vec<Step> {
    ids.iter().copied().map(Step::new).collect()
}

/// Writes the report into `root/sim` and returns the metadata directory.
fn prepared(root: &TempDir) -> std::path::PathBuf {
    let sim = root.path().join("sim");
    fs::create_dir(&sim).expect("simulation dir");
    write_report(&sim);

    let config = Config::default();
    let meta = remesh_cli::parse(&config, &sim, None).expect("report parses");
    remesh_cli::pcd(&config, &meta).expect("point clouds built");
    meta
}

#[test]
fn parse_writes_metadata_beside_the_simulation() {
    let root = TempDir::new().expect("temp dir");

    let meta = prepared(&root);

    assert_eq!(meta, root.path().join("_metadata"));
    let names = file_names(&meta);
    for step in ["10", "-15", "20", "30"] {
        for prefix in ["RZ_Step", "ELMCON_Step", "STRAIN_Step", "PCD_Step"] {
            let name = format!("{prefix}{step}.csv");
            assert!(names.contains(&name), "{name} missing");
        }
    }
}

#[test]
fn point_clouds_carry_report_strain() {
    let root = TempDir::new().expect("temp dir");
    let meta = prepared(&root);

    let cloud = table::read_point_cloud(&meta.join("PCD_Step10.csv")).expect("readable");

    assert_eq!(cloud.len(), 2);
    assert_eq!(cloud.strains(), INITIAL_STRAIN.map(Some).to_vec());
    let [x, y, z] = cloud.elements()[1].centroid;
    assert_relative_eq!(x, 2.0);
    assert_relative_eq!(y, 2.0);
    assert_relative_eq!(z, 2.0);
}

#[test]
fn first_step_inherits_final_strain() {
    let root = TempDir::new().expect("temp dir");
    let meta = prepared(&root);

    let solution = remesh_cli::backtrack(&Config::default(), &meta, None).expect("sweep succeeds");

    assert_eq!(solution.status, Status::Complete);
    assert_eq!(solution.visited, steps(&[30, 20, -15, 10]));

    let tracked = table::read_point_cloud(&meta.join("TRACKED_PCD_Step10.csv")).expect("readable");
    assert_eq!(tracked.strains(), vec![Some(FINAL_STRAIN[0]), Some(FINAL_STRAIN[1])]);
    assert_eq!(tracked, solution.carry);

    // Raw inputs are left as they were.
    let raw = table::read_point_cloud(&meta.join("PCD_Step10.csv")).expect("readable");
    assert_eq!(raw.strains(), INITIAL_STRAIN.map(Some).to_vec());
}

#[test]
fn sweep_over_csv_store_reports_transitions() {
    let root = TempDir::new().expect("temp dir");
    let meta = prepared(&root);
    let mut store = CsvStore::open(&meta, Naming::default());
    let order = sequence(store.steps().collect::<Vec<_>>()).expect("steps discovered");
    let mut history = History::new();

    backtrack::solve(&mut store, &order, &mut history).expect("sweep succeeds");

    let transitions: Vec<_> = history.records().iter().map(|r| r.transition).collect();
    assert_eq!(
        transitions,
        vec![
            None,
            Some(Transition::Stable),
            Some(Transition::RemeshExit),
            Some(Transition::RemeshEnter),
        ]
    );
    let seed = store.load(Step::new(30)).expect("raw seed");
    let tracked_seed =
        table::read_point_cloud(&meta.join("TRACKED_PCD_Step30.csv")).expect("readable");
    assert_eq!(tracked_seed, seed);
}

#[test]
fn until_stops_after_the_named_step() {
    let root = TempDir::new().expect("temp dir");
    let meta = prepared(&root);

    let solution = remesh_cli::backtrack(&Config::default(), &meta, Some(Step::new(20)))
        .expect("sweep stops");

    assert_eq!(solution.status, Status::StoppedByObserver);
    let tracked: Vec<_> = file_names(&meta)
        .into_iter()
        .filter(|name| name.starts_with("TRACKED_"))
        .collect();
    assert_eq!(tracked, vec!["TRACKED_PCD_Step20.csv", "TRACKED_PCD_Step30.csv"]);
}

#[test]
fn run_command_drives_every_stage() {
    let root = TempDir::new().expect("temp dir");
    let sim = root.path().join("sim");
    fs::create_dir(&sim).expect("simulation dir");
    write_report(&sim);
    let out = root.path().join("out");
    let out_arg = out.to_string_lossy().into_owned();
    let sim_arg = sim.to_string_lossy().into_owned();

    let cli = Cli::try_parse_from(["remesh-track", "run", sim_arg.as_str(), "--out", out_arg.as_str()])
        .expect("valid arguments");
    remesh_cli::run(&cli).expect("pipeline succeeds");

    assert!(out.join("TRACKED_PCD_Step10.csv").is_file());
    assert!(!root.path().join("_metadata").exists());
}

#[test]
fn config_file_renames_outputs() {
    let root = TempDir::new().expect("temp dir");
    let meta = prepared(&root);
    let config_path = root.path().join("remesh.toml");
    fs::write(&config_path, "[naming]\ntracked_prefix = \"BACK_\"\n").expect("config written");
    let config = Config::load(&config_path).expect("valid config");

    remesh_cli::backtrack(&config, &meta, None).expect("sweep succeeds");

    assert!(meta.join("BACK_PCD_Step10.csv").is_file());
    assert!(!meta.join("TRACKED_PCD_Step10.csv").exists());
}

#[test]
fn empty_discovery_fails_without_writing() {
    let root = TempDir::new().expect("temp dir");

    let err = remesh_cli::backtrack(&Config::default(), root.path(), None)
        .expect_err("nothing to sweep");

    assert!(err.to_string().contains("no point clouds found"));
    assert!(file_names(root.path()).is_empty());
}

#[test]
fn missing_report_fails_before_writing() {
    let root = TempDir::new().expect("temp dir");
    let sim = root.path().join("sim");
    fs::create_dir(&sim).expect("simulation dir");
    write_report(&sim);
    fs::remove_file(sim.join("StateVar__Strain.txt")).expect("removed");

    let err = remesh_cli::parse(&Config::default(), &sim, None).expect_err("strain missing");

    assert!(format!("{err:#}").contains("StateVar__Strain.txt"));
    assert!(!root.path().join("_metadata").exists());
}

#[test]
fn broken_history_names_the_failing_step() {
    let root = TempDir::new().expect("temp dir");
    let meta = prepared(&root);
    fs::write(meta.join("PCD_Step20.csv"), "Element Id,CX\n1,0\n").expect("corrupted");

    let err = remesh_cli::backtrack(&Config::default(), &meta, None).expect_err("bad table");

    assert_eq!(err.to_string(), "failed to load step 20");
    assert!(meta.join("TRACKED_PCD_Step30.csv").is_file());
    assert!(!meta.join("TRACKED_PCD_Step-15.csv").exists());
}
