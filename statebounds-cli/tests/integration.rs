use assert_cmd::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use shapefile::dbase::{FieldName, FieldValue, Record, TableWriterBuilder};
use shapefile::{Point, Polygon, PolygonRing};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Helper to create a `statebounds` command that runs in an isolated temp directory.
fn statebounds_cmd(work_dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("statebounds");
    cmd.current_dir(work_dir.path());
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Clockwise square with its lower-left corner at (x, y).
fn square(x: f64, y: f64) -> Vec<Point> {
    vec![
        Point::new(x, y),
        Point::new(x, y + 1.0),
        Point::new(x + 1.0, y + 1.0),
        Point::new(x + 1.0, y),
        Point::new(x, y),
    ]
}

/// Write a small boundary shapefile with the given names and one square each.
fn write_states(dir: &Path, field: &str, names: &[&str]) -> PathBuf {
    let path = dir.join("states.shp");
    let table =
        TableWriterBuilder::new().add_character_field(FieldName::try_from(field).unwrap(), 50);
    let mut writer = shapefile::Writer::from_path(&path, table).unwrap();
    for (i, name) in names.iter().enumerate() {
        let shape = Polygon::with_rings(vec![PolygonRing::Outer(square(i as f64 * 2.0, 0.0))]);
        let mut record = Record::default();
        record.insert(
            field.to_string(),
            FieldValue::Character(Some(name.to_string())),
        );
        writer.write_shape_and_record(&shape, &record).unwrap();
    }
    drop(writer);
    std::fs::write(dir.join("states.prj"), "GEOGCS[\"GCS_North_American_1983\"]").unwrap();
    path
}

// ============================================================================
// Happy path tests
// ============================================================================

#[test]
fn version_flag() {
    cargo_bin_cmd!("statebounds")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("statebounds"));
}

#[test]
fn help_flag() {
    cargo_bin_cmd!("statebounds")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("WKT multipolygon"))
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("inspect"))
        .stdout(predicate::str::contains("verify"));
}

#[test]
fn verbose_quiet_conflict() {
    cargo_bin_cmd!("statebounds")
        .args(["--verbose", "--quiet", "names"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn names_lists_contiguous_states() {
    let tmp = TempDir::new().unwrap();
    let assert = statebounds_cmd(&tmp).arg("names").assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout.lines().count(), 48);
    assert!(stdout.contains("Wyoming"));
    assert!(!stdout.contains("Alaska"));
}

#[test]
fn names_all_states() {
    let tmp = TempDir::new().unwrap();
    let assert = statebounds_cmd(&tmp)
        .args(["names", "--all-states"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout.lines().count(), 50);
    assert!(stdout.contains("Hawaii"));
}

#[test]
fn names_follow_config_file() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("statebounds.toml"),
        "names = [\"Utah\", \"Ohio\"]\n",
    )
    .unwrap();

    statebounds_cmd(&tmp)
        .arg("names")
        .assert()
        .success()
        .stdout("Ohio\nUtah\n");

    std::fs::write(tmp.path().join("alt.toml"), "name_set = \"all-states\"\n").unwrap();
    let assert = statebounds_cmd(&tmp)
        .args(["--config", "alt.toml", "names"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout.lines().count(), 50);
}

#[test]
fn golden_path() {
    let tmp = TempDir::new().unwrap();
    let shp = write_states(tmp.path(), "STATE", &["Alabama", "Puerto Rico", "Wyoming"]);

    statebounds_cmd(&tmp)
        .args(["run", shp.to_str().unwrap(), "us-boundaries.wkt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Records read:   3"))
        .stdout(predicate::str::contains("Accepted:       2"))
        .stdout(predicate::str::contains("Rejected names: Puerto Rico"))
        .stdout(predicate::str::contains("Polygons:       2"))
        .stdout(predicate::str::contains("verified"));

    let text = std::fs::read_to_string(tmp.path().join("us-boundaries.wkt")).unwrap();
    assert!(text.starts_with("MULTIPOLYGON"));

    statebounds_cmd(&tmp)
        .args(["verify", "us-boundaries.wkt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Polygons:       2"))
        .stdout(predicate::str::contains("Rings:          2"));
}

#[test]
fn run_with_preview() {
    let tmp = TempDir::new().unwrap();
    let shp = write_states(tmp.path(), "STATE", &["Ohio", "Utah"]);

    statebounds_cmd(&tmp)
        .args([
            "run",
            shp.to_str().unwrap(),
            "out.wkt",
            "--preview",
            "map.geojson",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Preview:        map.geojson"));

    let geojson = std::fs::read_to_string(tmp.path().join("map.geojson")).unwrap();
    assert!(geojson.contains("\"FeatureCollection\""));
    assert!(geojson.contains("\"Utah\""));
}

#[test]
fn quiet_run_prints_only_output_path() {
    let tmp = TempDir::new().unwrap();
    let shp = write_states(tmp.path(), "STATE", &["Ohio"]);

    statebounds_cmd(&tmp)
        .args(["--quiet", "run", shp.to_str().unwrap(), "out.wkt"])
        .assert()
        .success()
        .stdout("out.wkt\n");
}

#[test]
fn inspect_marks_accepted_records() {
    let tmp = TempDir::new().unwrap();
    let shp = write_states(tmp.path(), "STATE", &["Alaska", "Texas"]);

    statebounds_cmd(&tmp)
        .args(["inspect", shp.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Records:  2 (1 accepted)"))
        .stdout(predicate::str::contains("GCS_North_American_1983"))
        .stdout(predicate::str::contains("Alaska"));

    statebounds_cmd(&tmp)
        .args(["inspect", shp.to_str().unwrap(), "--all-states"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Records:  2 (2 accepted)"));
}

#[test]
fn name_field_from_config_file() {
    let tmp = TempDir::new().unwrap();
    let shp = write_states(tmp.path(), "NAME", &["Ohio", "Ontario"]);
    std::fs::write(tmp.path().join("statebounds.toml"), "name_field = \"NAME\"\n").unwrap();

    statebounds_cmd(&tmp)
        .args(["run", shp.to_str().unwrap(), "out.wkt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Accepted:       1"));
}

// ============================================================================
// Error tests
// ============================================================================

#[test]
fn missing_input_fails() {
    let tmp = TempDir::new().unwrap();
    statebounds_cmd(&tmp)
        .args(["run", "nope.shp", "out.wkt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Record source unavailable"));
}

#[test]
fn wrong_name_field_fails() {
    let tmp = TempDir::new().unwrap();
    let shp = write_states(tmp.path(), "STATE", &["Ohio"]);
    statebounds_cmd(&tmp)
        .args(["run", shp.to_str().unwrap(), "out.wkt", "--name-field", "NAME"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing attribute 'NAME'"));
}

#[test]
fn require_matches_fails_without_matches() {
    let tmp = TempDir::new().unwrap();
    let shp = write_states(tmp.path(), "STATE", &["Ontario"]);
    statebounds_cmd(&tmp)
        .args(["run", shp.to_str().unwrap(), "out.wkt", "--require-matches"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no records matched"));
    assert!(!tmp.path().join("out.wkt").exists());
}

#[test]
fn zero_matches_writes_empty_multipolygon() {
    let tmp = TempDir::new().unwrap();
    let shp = write_states(tmp.path(), "STATE", &["Ontario"]);
    statebounds_cmd(&tmp)
        .args(["run", shp.to_str().unwrap(), "out.wkt"])
        .assert()
        .success();
    assert_eq!(
        std::fs::read_to_string(tmp.path().join("out.wkt")).unwrap(),
        "MULTIPOLYGON EMPTY"
    );
}

#[test]
fn verify_rejects_malformed_wkt() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("bad.wkt"), "MULTIPOLYGON(((").unwrap();
    statebounds_cmd(&tmp)
        .args(["verify", "bad.wkt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Malformed WKT"));
}

#[test]
fn verify_json_output() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("one.wkt"),
        "MULTIPOLYGON (((0 0, 1 0, 1 1, 0 0)))\n",
    )
    .unwrap();
    statebounds_cmd(&tmp)
        .args(["verify", "one.wkt", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"polygons\": 1"));
}

#[test]
fn missing_config_file_fails() {
    let tmp = TempDir::new().unwrap();
    statebounds_cmd(&tmp)
        .args(["--config", "absent.toml", "names"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("config file not found"));

    let shp = write_states(tmp.path(), "STATE", &["Ohio"]);
    statebounds_cmd(&tmp)
        .args([
            "--config",
            "absent.toml",
            "run",
            shp.to_str().unwrap(),
            "out.wkt",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn same_input_and_output_is_usage_error() {
    let tmp = TempDir::new().unwrap();
    let shp = write_states(tmp.path(), "STATE", &["Ohio"]);
    statebounds_cmd(&tmp)
        .args(["run", shp.to_str().unwrap(), shp.to_str().unwrap()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("must differ"));

    statebounds_cmd(&tmp)
        .args(["run", "./states.shp", "states.shp"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("must differ"));
}
