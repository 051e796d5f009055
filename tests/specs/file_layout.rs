//! On-disk layout: date bucketing, the `_cli` suffix, single-file mode,
//! apart files, rotation, and pruning.

use crate::prelude::*;
use reqlog::{ApartLevels, Config, SingleFile};
use tempfile::tempdir;

#[test]
fn served_output_is_bucketed_into_a_month_directory() {
    let dir = tempdir().unwrap();
    let mut logger = served_logger(dir.path(), Config::default());
    logger.info("hello");

    assert!(logger.save());

    assert!(dir.path().join("202608/05.log").exists());
}

#[test]
fn batch_output_gets_the_cli_suffix_and_plain_format() {
    let dir = tempdir().unwrap();
    let mut logger = batch_logger(dir.path(), Config::default());

    logger.info("job finished");

    let content = read(&dir.path().join("202608/05_cli.log"));
    assert!(content.starts_with("[2026-08-05T09:30:00"));
    assert!(content.contains("[ info ] job finished"));
    assert!(!content.contains("---------------------------------"));
}

#[test]
fn single_file_mode_ignores_the_date() {
    let dir = tempdir().unwrap();
    let config = Config {
        single: SingleFile::Named("app".to_string()),
        ..Config::default()
    };
    let mut logger = served_logger(dir.path(), config);
    logger.info("hello");

    assert!(logger.save());

    assert!(dir.path().join("app.log").exists());
    assert!(!dir.path().join("202608").exists());
}

#[test]
fn file_count_ceiling_flattens_names_and_prunes_the_oldest() {
    let dir = tempdir().unwrap();
    for name in ["20260801.log", "20260802.log", "20260803.log"] {
        std::fs::write(dir.path().join(name), b"old").unwrap();
    }

    let config = Config {
        max_files: 2,
        ..Config::default()
    };
    let mut logger = served_logger(dir.path(), config);
    logger.info("today");
    assert!(logger.save());

    assert!(!dir.path().join("20260801.log").exists(), "oldest pruned");
    assert!(dir.path().join("20260802.log").exists());
    assert!(read(&dir.path().join("20260805.log")).contains("today"));
}

#[test]
fn apart_level_entries_land_only_in_their_own_file() {
    let dir = tempdir().unwrap();
    let config = Config {
        apart_level: ApartLevels::Levels(vec!["error".to_string()]),
        ..Config::default()
    };
    let mut logger = served_logger(dir.path(), config);
    logger.error("boom");
    logger.info("fine");

    assert!(logger.save());

    let main = read(&dir.path().join("202608/05.log"));
    let apart = read(&dir.path().join("202608/05_error.log"));
    assert!(main.contains("fine") && !main.contains("boom"));
    assert!(apart.contains("boom") && !apart.contains("fine"));
}

#[test]
fn crossing_the_size_threshold_creates_exactly_one_backup() {
    let dir = tempdir().unwrap();
    let config = Config {
        single: SingleFile::Enabled(true),
        file_size: 64,
        ..Config::default()
    };
    std::fs::write(dir.path().join("single.log"), vec![b'x'; 80]).unwrap();

    let mut logger = served_logger(dir.path(), config);
    logger.info("fresh start");
    assert!(logger.save());

    let backups: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with("-single.log"))
        .collect();
    assert_eq!(backups.len(), 1, "exactly one backup: {backups:?}");

    let active = read(&dir.path().join("single.log"));
    assert!(active.contains("fresh start"));
    assert!(!active.contains("xxx"), "old bytes stay in the backup");
}

#[test]
fn undersized_file_keeps_appending_without_rotation() {
    let dir = tempdir().unwrap();
    let config = Config {
        single: SingleFile::Enabled(true),
        ..Config::default()
    };
    let mut logger = served_logger(dir.path(), config.clone());
    logger.info("first");
    assert!(logger.save());

    let mut logger = served_logger(dir.path(), config);
    logger.info("second");
    assert!(logger.save());

    let content = read(&dir.path().join("single.log"));
    assert!(content.contains("first"));
    assert!(content.contains("second"));
}
