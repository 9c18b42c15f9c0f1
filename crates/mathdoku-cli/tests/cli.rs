use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn missing_image_file_exits_non_zero() {
    let mut cmd = Command::cargo_bin("mathdoku-ocr").unwrap();
    cmd.arg("does-not-exist.png");
    cmd.assert().failure().stderr(predicate::str::contains("error:"));
}

#[test]
fn help_lists_the_size_and_output_flags() {
    let mut cmd = Command::cargo_bin("mathdoku-ocr").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--size"))
        .stdout(predicate::str::contains("--output"));
}

#[test]
fn rejects_a_grid_size_outside_four_to_nine() {
    let mut cmd = Command::cargo_bin("mathdoku-ocr").unwrap();
    cmd.arg("does-not-exist.png").arg("--size").arg("12");
    cmd.assert().failure().stderr(predicate::str::contains("size"));
}
