use std::fs;
use std::path::Path;
use std::sync::Arc;

use cutoff_core::config::ConfigError;
use cutoff_core::matching::Resolution;
use cutoff_core::types::{Competitiveness, PopularityReport, QueryError, SortOrder};
use cutoff_core::{AdmissionEngine, EngineConfig, SearchParams, SnapshotLoader};
use tempfile::tempdir;

const CSV: &str = "\
college_code,college_name,branch_name,cutoff_rank_round1,cutoff_rank_round2,cutoff_rank_round3
E005,R V College of Engineering,Computer Science Engineering,1200,1500,1800
E005,R V College of Engineering,Mechanical Engineering,9000,9800,
E005,R V College of Engineering,Electronics and Communication Engineering,3000,3400,3900
E009,PES University,Computer Science Engineering,2500,2900,3300
E009,PES University,Civil Engineering,30000,,42000
E012,M S Ramaiah Institute of Technology,Computer Science Engineering,2500,2700,
E012,M S Ramaiah Institute of Technology,Information Science Engineering,6000,6500,7100
E020,BMS College of Engineering,Artificial Intelligence and Machine Learning,4200,4800,5100
E020,BMS College of Engineering,Mechanical Engineering,15000,16000,17500
E031,Dayananda Sagar College of Engineering,Electrical and Electronics Engineering,18000,,
";

fn engine() -> AdmissionEngine {
    engine_with(EngineConfig::default())
}

fn engine_with(config: EngineConfig) -> AdmissionEngine {
    let snapshot = SnapshotLoader::from_csv_reader(CSV.as_bytes()).unwrap();
    AdmissionEngine::new(Arc::new(snapshot), config).unwrap()
}

fn assert_invalid<T: std::fmt::Debug>(result: Result<T, QueryError>) {
    match result {
        Err(QueryError::InvalidArgument(_)) => {}
        other => panic!("expected invalid argument, got {other:?}"),
    }
}

#[test]
fn primitive_arguments_are_validated() {
    let engine = engine();

    assert_invalid(engine.colleges_by_rank(0, 1, None, SortOrder::Asc));
    assert_invalid(engine.colleges_by_rank(-10, 1, None, SortOrder::Asc));
    assert_invalid(engine.colleges_by_rank(1000, 0, None, SortOrder::Asc));
    assert_invalid(engine.colleges_by_rank(1000, 4, None, SortOrder::Asc));
    assert_invalid(engine.colleges_by_rank(1000, 1, Some(0), SortOrder::Asc));
    assert_invalid(engine.colleges_by_rank(1000, 1, Some(501), SortOrder::Asc));
    assert_invalid(engine.colleges_by_branch("Civil Engineering", 9, None, SortOrder::Asc));
    assert_invalid(engine.analyze_rank_prospects(0, 1));
    assert_invalid(engine.search_college_by_name("rv", 0));
    assert_invalid(engine.branch_popularity(None, 5));
    assert_invalid(engine.search_colleges(&SearchParams {
        min_rank: Some(0),
        round: 1,
        ..SearchParams::default()
    }));

    assert!(engine.colleges_by_rank(1000, 1, Some(500), SortOrder::Asc).is_ok());
}

#[test]
fn empty_listings_are_not_errors() {
    let engine = engine();

    assert_eq!(engine.colleges_by_rank(99_999, 1, None, SortOrder::Asc), Ok(vec![]));
    assert_eq!(engine.colleges_by_branch("Textile Engineering", 1, None, SortOrder::Asc), Ok(vec![]));
    assert_eq!(engine.search_college_by_name("qqqqqqqq", 5), Ok(vec![]));
}

#[test]
fn name_then_compare_workflow() {
    let engine = engine();

    let rv = match engine.resolve_college("RV", 5).unwrap() {
        Resolution::Unique(m) => m.candidate_key,
        other => panic!("expected unique match, got {other:?}"),
    };
    let pes = engine.search_college_by_name("PES", 1).unwrap()[0].candidate_key.clone();
    assert_eq!((rv.as_str(), pes.as_str()), ("E005", "E009"));

    let report = engine.compare_colleges(&[rv, pes], 1).unwrap();
    assert_eq!(report.colleges[0].best_cutoff, 1200);
    assert_eq!(report.colleges[1].best_cutoff, 2500);

    assert_invalid(engine.compare_colleges(&["E005"], 1));
}

#[test]
fn casual_branch_then_search_workflow() {
    let engine = engine();

    let branch = match engine.resolve_branch("CS", 5).unwrap() {
        Resolution::Unique(m) => m.candidate_key,
        other => panic!("expected unique match, got {other:?}"),
    };
    assert_eq!(branch, "Computer Science Engineering");

    let seats = engine
        .search_colleges(&SearchParams {
            max_rank: Some(2600),
            branches: vec![branch],
            round: 1,
            ..SearchParams::default()
        })
        .unwrap();
    assert_eq!(seats.len(), 3);

    let matches = engine.match_branch_names("mech", 3).unwrap();
    assert_eq!(matches[0].candidate_key, "Mechanical Engineering");
}

#[test]
fn branch_popularity_scenario() {
    let engine = engine();

    match engine.branch_popularity(Some("Computer Science Engineering"), 1).unwrap() {
        PopularityReport::Branch(report) => {
            assert_eq!(report.stats.best_cutoff, 1200);
            assert_eq!(report.stats.competitiveness, Competitiveness::High);
        }
        other => panic!("expected branch report, got {other:?}"),
    }

    assert!(matches!(
        engine.branch_popularity(Some("Textile Engineering"), 1),
        Err(QueryError::NotFound(_))
    ));
}

#[test]
fn supplementary_lookups() {
    let engine = engine();

    assert_eq!(engine.all_branches().len(), 7);
    assert_eq!(engine.college_branches("E012").unwrap().branches.len(), 2);
    assert_eq!(
        engine
            .cutoff_trends("E005", "Mechanical Engineering")
            .unwrap()
            .cutoff_trends
            .get(cutoff_core::Round::Three),
        None
    );
}

#[test]
fn config_file_changes_thresholds() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cutoff.toml");
    fs::write(
        &path,
        r#"
max_limit = 20

[prospects]
percentile_ceiling = 100000
best_margin = 500
"#,
    )
    .unwrap();

    let config = EngineConfig::load_from(&path).unwrap();
    let engine = engine_with(config);

    let report = engine.analyze_rank_prospects(1000, 1).unwrap();
    assert_eq!(report.percentile_estimate, 99.0);
    assert_eq!(report.counts.best, 1);

    assert_invalid(engine.colleges_by_rank(1000, 1, Some(21), SortOrder::Asc));
}

#[test]
fn invalid_config_file_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[popularity]\nhigh_below = 50000\n").unwrap();

    assert!(EngineConfig::load_from(&path).is_err());
    assert!(EngineConfig::load_from(Path::new("/nonexistent/cutoff.toml")).is_ok());
}

#[test]
fn engine_rejects_config_that_bypasses_validation() {
    let snapshot = Arc::new(SnapshotLoader::from_csv_reader(CSV.as_bytes()).unwrap());

    let mut lenient_compare = EngineConfig::default();
    lenient_compare.comparison.min_colleges = 0;
    assert!(matches!(
        AdmissionEngine::new(Arc::clone(&snapshot), lenient_compare),
        Err(ConfigError::Validation(_))
    ));

    let oversized = EngineConfig {
        max_limit: 10_000,
        ..EngineConfig::default()
    };
    assert!(matches!(
        AdmissionEngine::new(Arc::clone(&snapshot), oversized),
        Err(ConfigError::Validation(_))
    ));

    let engine = AdmissionEngine::new(snapshot, EngineConfig::default()).unwrap();
    assert_invalid(engine.compare_colleges(&["E005"], 1));
    assert_invalid(engine.colleges_by_rank(1, 1, Some(1000), SortOrder::Asc));
}

#[test]
fn config_file_with_oversized_limit_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wide.toml");
    fs::write(&path, "max_limit = 1000\n").unwrap();

    assert!(matches!(
        EngineConfig::load_from(&path),
        Err(ConfigError::Validation(_))
    ));
}
