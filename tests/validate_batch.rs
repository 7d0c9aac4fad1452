use std::{fs, path::Path};

use stations::{
    layout::{errors_dir, feed_dir},
    validate, FeedError, RunDate, ValidateSettings,
};

fn settings(root: &Path) -> ValidateSettings {
    let mut settings = ValidateSettings::new(
        root.join("fuel_prices"),
        RunDate::from_ymd(2024, 3, 5).unwrap(),
    );
    settings.errors_root = root.join("errors");
    settings
}

fn write_feed(settings: &ValidateSettings, file: &str, contents: &str) {
    let dir = feed_dir(&settings.feed_root, settings.date);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(file), contents).unwrap();
}

#[test]
fn reports_per_feed() {
    let tmp = tempfile::tempdir().unwrap();
    let settings = settings(tmp.path());

    write_feed(
        &settings,
        "ampol.json",
        r#"{"stations": [
            {"site_id": "abcdefghijkl", "location": {"latitude": 0.0, "longitude": 0.0}},
            {"site_id": "r3gx2f77bn44", "location": {"latitude": "-33.8688", "longitude": "151.2093"}}
        ]}"#,
    );
    write_feed(
        &settings,
        "bp.json",
        r#"{"stations": [
            {"site_id": "r1r0fsnzv41c", "location": {"latitude": -37.8136, "longitude": 144.9631}},
            {"site_id": "r1r0fsnzv41c", "location": {"latitude": -37.8136, "longitude": 144.9631}}
        ]}"#,
    );
    write_feed(&settings, "empty.json", r#"{"stations": []}"#);
    write_feed(&settings, "notes.txt", "not a feed");

    let summary = validate::run(&settings).unwrap();
    assert!(summary.is_ok());

    let checked: Vec<_> = summary
        .checked
        .iter()
        .map(|x| (x.file.as_str(), x.total, x.mismatches, x.duplicates))
        .collect();
    assert_eq!(
        checked,
        vec![
            ("ampol.json", 2, 1, 0),
            ("bp.json", 2, 0, 1),
            ("empty.json", 0, 0, 0),
        ]
    );

    let errors = errors_dir(&settings.errors_root, settings.date);
    assert_eq!(
        fs::read_to_string(errors.join("ampol_geohash_mismatches.csv")).unwrap(),
        "site_id (provided geohash), actual geohash, lat, lon\nabcdefghijkl, 7zzzzzzzzzzz, 0.0, 0.0\n"
    );
    assert_eq!(
        fs::read_to_string(errors.join("bp_duplicates.csv")).unwrap(),
        "site_id, count\nr1r0fsnzv41c, 2\n"
    );

    let mut written: Vec<_> = fs::read_dir(&errors)
        .unwrap()
        .map(|x| x.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    written.sort();
    assert_eq!(
        written,
        vec!["ampol_geohash_mismatches.csv", "bp_duplicates.csv"]
    );
}

#[test]
fn malformed_feed_does_not_stop_the_batch() {
    let tmp = tempfile::tempdir().unwrap();
    let settings = settings(tmp.path());

    write_feed(&settings, "a_truncated.json", r#"{"stations": [{"site_id": "#);
    write_feed(
        &settings,
        "b_coords.json",
        r#"{"stations": [{"site_id": "x", "location": {"latitude": "north", "longitude": 1}}]}"#,
    );
    write_feed(
        &settings,
        "c_good.json",
        r#"{"stations": [{"site_id": "abcdefghijkl", "location": {"latitude": 0, "longitude": 0}}]}"#,
    );

    let summary = validate::run(&settings).unwrap();

    assert!(!summary.is_ok());
    assert_eq!(summary.failed.len(), 2);
    assert_eq!(summary.failed[0].0, "a_truncated.json");
    assert!(matches!(summary.failed[0].1, FeedError::Json(_)));
    assert_eq!(summary.failed[1].0, "b_coords.json");
    assert!(matches!(summary.failed[1].1, FeedError::Coordinate { .. }));

    assert_eq!(summary.checked.len(), 1);
    assert_eq!(summary.checked[0].file, "c_good.json");
    let errors = errors_dir(&settings.errors_root, settings.date);
    assert!(errors.join("c_good_geohash_mismatches.csv").is_file());
    assert!(!errors.join("b_coords_geohash_mismatches.csv").exists());
}

#[test]
fn rerun_regenerates_reports() {
    let tmp = tempfile::tempdir().unwrap();
    let settings = settings(tmp.path());
    write_feed(
        &settings,
        "bp.json",
        r#"{"stations": [{"site_id": "abcdefghijkl", "location": {"latitude": 0, "longitude": 0}}]}"#,
    );

    validate::run(&settings).unwrap();
    let summary = validate::run(&settings).unwrap();
    assert!(summary.is_ok());

    let errors = errors_dir(&settings.errors_root, settings.date);
    assert_eq!(
        fs::read_to_string(errors.join("bp_geohash_mismatches.csv"))
            .unwrap()
            .lines()
            .count(),
        2
    );
}

#[test]
fn missing_date_directory_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    assert!(validate::run(&settings(tmp.path())).is_err());
}
