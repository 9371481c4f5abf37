use assert_cmd::Command;
use image::{ImageFormat, Rgb, RgbImage};
use predicates::prelude::*;
use std::fs::{self, File};
use std::io::{Cursor, Write};
use std::path::Path;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

fn png_bytes() -> Vec<u8> {
    let image = RgbImage::from_pixel(8, 8, Rgb([30, 90, 200]));
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png).unwrap();
    buffer.into_inner()
}

/// `A100 RED.zip`, its extracted `A100/RED` and `A100/BLUE` folders, and a
/// table with a code for RED only.
fn season_fixture(root: &Path) -> std::path::PathBuf {
    let input = root.join("season");
    fs::create_dir_all(input.join("A100").join("RED")).unwrap();
    fs::create_dir_all(input.join("A100").join("BLUE")).unwrap();
    fs::write(input.join("A100").join("RED").join("img1.png"), png_bytes()).unwrap();
    fs::write(input.join("A100").join("BLUE").join("img1.png"), png_bytes()).unwrap();

    let mut writer = ZipWriter::new(File::create(input.join("A100 RED.zip")).unwrap());
    writer
        .start_file("A100/RED/img1.png", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(&png_bytes()).unwrap();
    writer.finish().unwrap();

    let table = root.join("codes.csv");
    fs::write(&table, "款号,颜色,色号\nA100,RED,C01\n").unwrap();
    table
}

fn picget() -> Command {
    Command::cargo_bin("picget").unwrap()
}

#[test]
fn test_full_run_writes_style_and_colour_images() {
    let temp_dir = TempDir::new().unwrap();
    let table = season_fixture(temp_dir.path());
    let input = temp_dir.path().join("season");

    picget()
        .arg(&input)
        .arg("--table")
        .arg(&table)
        .arg("--output-format")
        .arg("plain")
        .assert()
        .success()
        .stdout(predicate::str::contains("A100 / BLUE"))
        .stdout(predicate::str::contains("COMPLETED: Image extraction"));

    assert!(input.join("款号图").join("A100.jpg").is_file());
    assert!(input.join("款色图").join("A100_C01_IMAGEURL.jpg").is_file());
    assert_eq!(fs::read_dir(input.join("款色图")).unwrap().count(), 1);
}

#[test]
fn test_json_summary() {
    let temp_dir = TempDir::new().unwrap();
    let table = season_fixture(temp_dir.path());

    picget()
        .arg(temp_dir.path().join("season"))
        .args(["-t"])
        .arg(&table)
        .args(["--output-format", "json", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type\": \"summary\""))
        .stdout(predicate::str::contains("\"style_images_saved\": 1"));
}

#[test]
fn test_dry_run_creates_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let table = season_fixture(temp_dir.path());
    let input = temp_dir.path().join("season");

    picget()
        .arg(&input)
        .arg("--table")
        .arg(&table)
        .args(["--dry-run", "--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would save A100.jpg"));

    assert!(!input.join("款号图").exists());
    assert!(!input.join("款色图").exists());
}

#[test]
fn test_custom_output_directories() {
    let temp_dir = TempDir::new().unwrap();
    let table = season_fixture(temp_dir.path());
    let input = temp_dir.path().join("season");

    picget()
        .arg(&input)
        .arg("--table")
        .arg(&table)
        .args(["--style-dir", "styles", "--color-dir", "colours", "-q"])
        .assert()
        .success();

    assert!(input.join("styles").join("A100.jpg").is_file());
    assert!(input.join("colours").join("A100_C01_IMAGEURL.jpg").is_file());
}

#[test]
fn test_corrupt_archive_exits_with_partial_failure() {
    let temp_dir = TempDir::new().unwrap();
    let table = season_fixture(temp_dir.path());
    let input = temp_dir.path().join("season");
    fs::write(input.join("B200.zip"), b"not a zip").unwrap();

    picget()
        .arg(&input)
        .arg("--table")
        .arg(&table)
        .args(["--output-format", "plain"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("B200.zip"));

    assert!(input.join("款号图").join("A100.jpg").is_file());
}

#[test]
fn test_missing_table_is_fatal() {
    let temp_dir = TempDir::new().unwrap();

    picget()
        .arg(temp_dir.path())
        .arg("--table")
        .arg(temp_dir.path().join("missing.xlsx"))
        .assert()
        .code(1);
}

#[test]
fn test_table_without_required_column_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let table = temp_dir.path().join("codes.csv");
    fs::write(&table, "款号,颜色\nA100,RED\n").unwrap();

    picget()
        .arg(temp_dir.path())
        .arg("--table")
        .arg(&table)
        .args(["--output-format", "plain"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("色号"));
}

#[test]
fn test_missing_table_argument_without_terminal_cancels() {
    let temp_dir = TempDir::new().unwrap();

    picget().arg(temp_dir.path()).assert().code(130);
}

#[test]
fn test_generate_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("picget.toml");

    picget()
        .arg("--generate-config")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated sample configuration file"));

    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("style_column"));
}

#[test]
fn test_invalid_quality_is_rejected() {
    picget()
        .args(["--quality", "150"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("150"));
}
