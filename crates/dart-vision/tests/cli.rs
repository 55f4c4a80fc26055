#![cfg(feature = "cli")]

mod common;

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use dart_vision::core::GrayImage;
use predicates::prelude::*;
use tempfile::TempDir;

use common::synthetic_throw;

fn save(dir: &Path, name: &str, img: &GrayImage) -> PathBuf {
    let path = dir.join(name);
    image::GrayImage::from_raw(img.width as u32, img.height as u32, img.data.clone())
        .expect("buffer size")
        .save(&path)
        .expect("write png");
    path
}

fn score_cmd(dir: &TempDir) -> Command {
    let (prev, cur) = synthetic_throw();
    let mut cmd = Command::cargo_bin("dart-vision").unwrap();
    cmd.arg("score");
    for (view, img) in prev.iter() {
        cmd.arg(format!("--prev-{view}"))
            .arg(save(dir.path(), &format!("prev_{view}.png"), img));
    }
    for (view, img) in cur.iter() {
        cmd.arg(format!("--cur-{view}"))
            .arg(save(dir.path(), &format!("cur_{view}.png"), img));
    }
    cmd
}

#[test]
fn default_config_prints_json() {
    Command::cargo_bin("dart-vision")
        .unwrap()
        .arg("default-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"edge_bin_threshold\": 40"))
        .stdout(predicate::str::contains("\"starting_score\": 501"));
}

#[test]
fn score_prints_voted_result() {
    let dir = TempDir::new().unwrap();
    score_cmd(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"label\": \"Single 20\""))
        .stdout(predicate::str::contains("\"agreement\": \"unanimous\""));
}

#[test]
fn score_honours_config_file() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("params.json");
    std::fs::write(&config, r#"{"triangulation": {"cross_check": true}}"#).unwrap();
    score_cmd(&dir)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"method\": \"analytic\""));
}

#[test]
fn unchanged_images_fail_with_extraction_error() {
    let dir = TempDir::new().unwrap();
    let (prev, _) = synthetic_throw();
    let mut cmd = Command::cargo_bin("dart-vision").unwrap();
    cmd.arg("score");
    for (view, img) in prev.iter() {
        let path = save(dir.path(), &format!("{view}.png"), img);
        cmd.arg(format!("--prev-{view}")).arg(&path);
        cmd.arg(format!("--cur-{view}")).arg(&path);
    }
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("axis extraction failed"));
}

#[test]
fn missing_image_is_reported() {
    Command::cargo_bin("dart-vision")
        .unwrap()
        .args(["score", "--prev-top", "/nonexistent/a.png"])
        .args(["--cur-top", "/nonexistent/b.png"])
        .args(["--prev-right", "/nonexistent/c.png"])
        .args(["--cur-right", "/nonexistent/d.png"])
        .args(["--prev-left", "/nonexistent/e.png"])
        .args(["--cur-left", "/nonexistent/f.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("/nonexistent/a.png"));
}
