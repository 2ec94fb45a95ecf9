use std::fs;

use cutoff_core::dataset::{DatasetLoadError, SnapshotLoader};
use cutoff_core::types::{QueryError, Round};
use tempfile::tempdir;

const CSV: &str = "\
college_code,college_name,branch_name,cutoff_rank_round1,cutoff_rank_round2,cutoff_rank_round3
E005,R V College of Engineering,Computer Science Engineering,1200,1500,1800
E005,R V College of Engineering,Mechanical Engineering,9000,,0
E009,\"PES University, Bengaluru\",Computer Science Engineering,2500,2900,3300
E009,\"PES University, Bengaluru\",Civil Engineering,,,
";

const JSON: &str = r#"[
  {"college_code": "E005", "college_name": "R V College of Engineering", "branch_name": "Computer Science Engineering",
   "cutoff_rank_round1": 1200, "cutoff_rank_round2": 1500, "cutoff_rank_round3": 1800},
  {"college_code": "E005", "college_name": "R V College of Engineering", "branch_name": "Mechanical Engineering",
   "cutoff_rank_round1": 9000, "cutoff_rank_round2": null, "cutoff_rank_round3": 0},
  {"college_code": "E009", "college_name": "PES University, Bengaluru", "branch_name": "Computer Science Engineering",
   "cutoff_rank_round1": 2500, "cutoff_rank_round2": 2900, "cutoff_rank_round3": 3300},
  {"college_code": "E009", "college_name": "PES University, Bengaluru", "branch_name": "Civil Engineering"}
]"#;

#[test]
fn csv_loads_with_absent_and_zero_cutoffs_as_none() {
    let snapshot = SnapshotLoader::from_csv_reader(CSV.as_bytes()).unwrap();

    assert_eq!(snapshot.records().len(), 4);
    let mech = &snapshot.records()[1];
    assert_eq!(mech.cutoff(Round::One), Some(9000));
    assert_eq!(mech.cutoff(Round::Two), None);
    assert_eq!(mech.cutoff(Round::Three), None);

    let pes = &snapshot.records()[2];
    assert_eq!(pes.college_name, "PES University, Bengaluru");

    let civil = &snapshot.records()[3];
    assert!(Round::ALL.iter().all(|&round| civil.cutoff(round).is_none()));
}

#[test]
fn csv_and_json_exports_produce_the_same_snapshot() {
    let from_csv = SnapshotLoader::from_csv_reader(CSV.as_bytes()).unwrap();
    let from_json = SnapshotLoader::from_json_reader(JSON.as_bytes()).unwrap();

    assert_eq!(from_csv.records(), from_json.records());
    assert_eq!(from_csv.version(), from_json.version());
    assert!(from_csv.version().as_str().starts_with("sha256:"));
}

#[test]
fn original_column_names_are_accepted() {
    let csv = "\
college_code,college_name,branch_name,GM_rank_r1,GM_rank_r2,GM_rank_r3
E005,R V College of Engineering,Computer Science Engineering,1200,1500,1800
";
    let snapshot = SnapshotLoader::from_csv_reader(csv.as_bytes()).unwrap();
    assert_eq!(snapshot.records()[0].cutoff(Round::Three), Some(1800));
}

#[test]
fn from_path_dispatches_on_extension() {
    let dir = tempdir().unwrap();

    let csv_path = dir.path().join("kcet_2024.csv");
    fs::write(&csv_path, CSV).unwrap();
    let json_path = dir.path().join("kcet_2024.json");
    fs::write(&json_path, JSON).unwrap();
    let txt_path = dir.path().join("kcet_2024.txt");
    fs::write(&txt_path, CSV).unwrap();

    assert_eq!(SnapshotLoader::from_path(&csv_path).unwrap().records().len(), 4);
    assert_eq!(SnapshotLoader::from_path(&json_path).unwrap().records().len(), 4);
    assert!(matches!(
        SnapshotLoader::from_path(&txt_path),
        Err(DatasetLoadError::UnsupportedFormat(_))
    ));
    assert!(matches!(
        SnapshotLoader::from_path(&dir.path().join("missing.csv")),
        Err(DatasetLoadError::Io(_))
    ));
}

#[test]
fn invalid_cutoffs_are_rejected() {
    let negative = "\
college_code,college_name,branch_name,cutoff_rank_round1,cutoff_rank_round2,cutoff_rank_round3
E005,R V College of Engineering,Computer Science Engineering,-5,,
";
    match SnapshotLoader::from_csv_reader(negative.as_bytes()) {
        Err(DatasetLoadError::InvalidRecord { row, .. }) => assert_eq!(row, 1),
        other => panic!("expected invalid record, got {other:?}"),
    }

    let fractional = r#"[{"college_code": "E005", "college_name": "R V", "branch_name": "CSE", "cutoff_rank_round1": 12.5}]"#;
    assert!(matches!(
        SnapshotLoader::from_json_reader(fractional.as_bytes()),
        Err(DatasetLoadError::InvalidRecord { .. })
    ));

    let text = "\
college_code,college_name,branch_name,cutoff_rank_round1,cutoff_rank_round2,cutoff_rank_round3
E005,R V College of Engineering,Computer Science Engineering,abc,,
";
    match SnapshotLoader::from_csv_reader(text.as_bytes()) {
        Err(DatasetLoadError::InvalidRecord { row, reason }) => {
            assert_eq!(row, 1);
            assert!(reason.contains("abc"), "{reason}");
        }
        other => panic!("expected invalid record, got {other:?}"),
    }

    let json_text = r#"[{"college_code": "E005", "college_name": "R V", "branch_name": "CSE", "cutoff_rank_round2": "n/a"}]"#;
    assert!(matches!(
        SnapshotLoader::from_json_reader(json_text.as_bytes()),
        Err(DatasetLoadError::InvalidRecord { row: 1, .. })
    ));

    let numeric_text = r#"[{"college_code": "E005", "college_name": "R V", "branch_name": "CSE", "cutoff_rank_round1": "1200"}]"#;
    let snapshot = SnapshotLoader::from_json_reader(numeric_text.as_bytes()).unwrap();
    assert_eq!(snapshot.records()[0].cutoff(Round::One), Some(1200));
}

#[test]
fn blank_college_code_is_rejected() {
    let csv = "\
college_code,college_name,branch_name,cutoff_rank_round1,cutoff_rank_round2,cutoff_rank_round3
E005,R V College of Engineering,Computer Science Engineering,1200,,
  ,Nameless College,Civil Engineering,40000,,
";
    match SnapshotLoader::from_csv_reader(csv.as_bytes()) {
        Err(DatasetLoadError::InvalidRecord { row, .. }) => assert_eq!(row, 2),
        other => panic!("expected invalid record, got {other:?}"),
    }
}

#[test]
fn snapshot_lookups() {
    let snapshot = SnapshotLoader::from_csv_reader(CSV.as_bytes()).unwrap();

    let branches: Vec<String> = snapshot.all_branch_names().into_iter().collect();
    assert_eq!(
        branches,
        vec![
            "Civil Engineering".to_string(),
            "Computer Science Engineering".to_string(),
            "Mechanical Engineering".to_string(),
        ]
    );

    assert_eq!(snapshot.records_for_college("E005").len(), 2);
    assert!(snapshot.records_for_college("E404").is_empty());

    let colleges: Vec<&str> = snapshot
        .colleges()
        .iter()
        .map(|c| c.college_code.as_str())
        .collect();
    assert_eq!(colleges, vec!["E005", "E009"]);

    let info = snapshot.info();
    assert_eq!((info.record_count, info.college_count, info.branch_count), (4, 2, 3));
}

#[test]
fn college_branches_lists_all_rounds() {
    let snapshot = SnapshotLoader::from_csv_reader(CSV.as_bytes()).unwrap();

    let rv = snapshot.college_branches("E005").unwrap();
    assert_eq!(rv.college_name, "R V College of Engineering");
    assert_eq!(rv.branches.len(), 2);
    assert_eq!(rv.branches[0].cutoff_ranks.get(Round::Two), Some(1500));

    assert!(matches!(
        snapshot.college_branches("E404"),
        Err(QueryError::NotFound(_))
    ));
}

#[test]
fn cutoff_trends_match_branch_case_insensitively() {
    let snapshot = SnapshotLoader::from_csv_reader(CSV.as_bytes()).unwrap();

    let trend = snapshot
        .cutoff_trends("E009", "computer science engineering")
        .unwrap();
    assert_eq!(trend.branch_name, "Computer Science Engineering");
    assert_eq!(
        trend.cutoff_trends.iter().collect::<Vec<_>>(),
        vec![
            (Round::One, Some(2500)),
            (Round::Two, Some(2900)),
            (Round::Three, Some(3300)),
        ]
    );

    assert!(matches!(
        snapshot.cutoff_trends("E009", "Mechanical Engineering"),
        Err(QueryError::NotFound(_))
    ));
}
