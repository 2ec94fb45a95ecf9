use std::sync::Arc;
use std::thread;

use cutoff_core::{AdmissionEngine, AdmissionRecord, EngineConfig, RoundCutoffs, Snapshot, SortOrder};

fn record(code: &str, name: &str, branch: &str, r1: Option<u32>, r2: Option<u32>, r3: Option<u32>) -> AdmissionRecord {
    AdmissionRecord::new(code, name, branch, RoundCutoffs::new(r1, r2, r3))
}

fn fixture() -> Vec<AdmissionRecord> {
    vec![
        record("E005", "R V College of Engineering", "Computer Science Engineering", Some(1200), Some(1500), Some(1800)),
        record("E005", "R V College of Engineering", "Mechanical Engineering", Some(9000), Some(9800), None),
        record("E009", "PES University", "Computer Science Engineering", Some(2500), Some(2900), Some(3300)),
        record("E009", "PES University", "Civil Engineering", Some(30000), None, Some(42000)),
        record("E012", "M S Ramaiah Institute of Technology", "Computer Science Engineering", Some(2500), Some(2700), None),
        record("E020", "BMS College of Engineering", "Mechanical Engineering", Some(15000), Some(16000), Some(17500)),
    ]
}

fn engine() -> AdmissionEngine {
    AdmissionEngine::new(Arc::new(Snapshot::new(fixture())), EngineConfig::default()).unwrap()
}

fn run_all(engine: &AdmissionEngine) -> String {
    let listing = engine.colleges_by_rank(2000, 1, None, SortOrder::Asc).unwrap();
    let names = engine.search_college_by_name("engineering", 5).unwrap();
    let prospects = engine.analyze_rank_prospects(2000, 2).unwrap();
    let comparison = engine.compare_colleges(&["E005", "E009", "E020"], 1).unwrap();
    let popularity = engine.branch_popularity(None, 1).unwrap();

    serde_json::to_string(&(listing, names, prospects, comparison, popularity)).unwrap()
}

#[test]
fn repeated_queries_produce_identical_output() {
    let engine = engine();
    let first = run_all(&engine);
    for _ in 0..5 {
        assert_eq!(run_all(&engine), first);
    }
}

#[test]
fn independent_snapshots_of_same_data_agree() {
    assert_eq!(run_all(&engine()), run_all(&engine()));
}

#[test]
fn dataset_version_tracks_content() {
    let a = Snapshot::new(fixture());
    let b = Snapshot::new(fixture());
    assert_eq!(a.version(), b.version());
    assert!(a.version().as_str().starts_with("sha256:"));

    let mut changed = fixture();
    changed[0] = record("E005", "R V College of Engineering", "Computer Science Engineering", Some(1201), Some(1500), Some(1800));
    assert_ne!(Snapshot::new(changed).version(), a.version());
}

#[test]
fn concurrent_readers_see_the_same_results() {
    let engine = engine();
    let expected = run_all(&engine);

    let outputs: Vec<String> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let engine = engine.clone();
                scope.spawn(move || run_all(&engine))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(outputs.iter().all(|out| *out == expected));
}
