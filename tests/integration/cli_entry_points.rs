#![allow(missing_docs)]

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

fn fixture(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("utf8 stdout")
}

fn assert_usage(output: &std::process::Output, bin: &str) {
    assert_eq!(
        stdout_of(output).trim(),
        format!("Usage: {bin} <csv_file1> <csv_file2> ...")
    );
}

#[test]
fn no_files_prints_usage_and_exits_one() {
    let output = cargo_bin_cmd!("benchmark-plot")
        .assert()
        .code(1)
        .get_output()
        .clone();
    assert_usage(&output, "benchmark-plot");

    let output = cargo_bin_cmd!("compare-plot")
        .assert()
        .code(1)
        .get_output()
        .clone();
    assert_usage(&output, "compare-plot");

    let output = cargo_bin_cmd!("depth-plot")
        .assert()
        .code(1)
        .get_output()
        .clone();
    assert_usage(&output, "depth-plot");
}

#[test]
fn benchmark_plot_writes_one_svg_per_category() {
    let dir = TempDir::new().expect("tempdir");
    let csv = fixture(
        &dir,
        "results.csv",
        "Signal,deep,100,1,1.0\nSignal,deep,200,1,2.0\nMemo,deep,100,0,0.5\n",
    );
    let out_dir = dir.path().join("plots");
    let output = cargo_bin_cmd!("benchmark-plot")
        .arg("--out-dir")
        .arg(&out_dir)
        .arg(&csv)
        .env_remove("BENCHPLOT_CONFIG")
        .assert()
        .success()
        .get_output()
        .clone();
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Statistics for Signal:"));
    assert!(stdout.contains("Statistics for Memo:"));
    assert!(out_dir.join("signal.svg").exists());
    assert!(out_dir.join("memo.svg").exists());
}

#[test]
fn benchmark_plot_keeps_colliding_category_files_apart() {
    let dir = TempDir::new().expect("tempdir");
    let csv = fixture(
        &dir,
        "results.csv",
        "Signal,x,1,0,1.0\nsignal,x,1,0,2.0\nA/B,x,1,0,3.0\nA B,x,1,0,4.0\n",
    );
    let out_dir = dir.path().join("plots");
    cargo_bin_cmd!("benchmark-plot")
        .arg("--out-dir")
        .arg(&out_dir)
        .arg(&csv)
        .env_remove("BENCHPLOT_CONFIG")
        .assert()
        .success();
    for name in ["signal.svg", "signal_2.svg", "a_b.svg", "a_b_2.svg"] {
        assert!(out_dir.join(name).exists(), "missing {name}");
    }
    assert_eq!(fs::read_dir(&out_dir).expect("read plots").count(), 4);
}

#[test]
fn benchmark_plot_renders_infinite_and_nan_times() {
    let dir = TempDir::new().expect("tempdir");
    let csv = fixture(
        &dir,
        "results.csv",
        "Signal,a,1,0,inf\nSignal,a,2,0,1.0\nSignal,a,3,0,NaN\nSignal,a,4,0,2.0\n",
    );
    let out_dir = dir.path().join("plots");
    let output = cargo_bin_cmd!("benchmark-plot")
        .arg("--out-dir")
        .arg(&out_dir)
        .arg(&csv)
        .env_remove("BENCHPLOT_CONFIG")
        .timeout(Duration::from_secs(60))
        .assert()
        .success()
        .get_output()
        .clone();
    assert!(stdout_of(&output).contains("Statistics for Signal:"));
    assert!(out_dir.join("signal.svg").exists());
}

#[test]
fn compare_plot_labels_runs_and_writes_json_report() {
    let dir = TempDir::new().expect("tempdir");
    let a = fixture(&dir, "host1-cpuX-impl_A-test_B.csv", "Signal,x,1,0,1.0\n");
    let b = fixture(&dir, "host1-cpuX-impl_B-test_B-fast.csv", "Signal,x,1,0,2.0\n");
    let out_dir = dir.path().join("plots");
    let output = cargo_bin_cmd!("compare-plot")
        .args(["--format", "json", "--out-dir"])
        .arg(&out_dir)
        .arg(&a)
        .arg(&b)
        .assert()
        .success()
        .get_output()
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(json[0]["label"], "host1 cpuX impl A test B");
    assert_eq!(json[1]["label"], "host1 cpuX impl B test B fast");
    assert!(out_dir.join("benchmark_comparison.svg").exists());
}

#[test]
fn compare_plot_rejects_short_file_names() {
    let dir = TempDir::new().expect("tempdir");
    let bad = fixture(&dir, "host-cpu.csv", "Signal,x,1,0,1.0\n");
    let output = cargo_bin_cmd!("compare-plot")
        .arg("--out-dir")
        .arg(dir.path().join("plots"))
        .arg(&bad)
        .assert()
        .code(1)
        .get_output()
        .clone();
    let stderr = String::from_utf8(output.stderr).expect("utf8 stderr");
    assert!(stderr.contains("compare-plot failed"));
    assert!(stderr.contains("2 segment(s)"));
}

#[test]
fn depth_plot_reads_headered_files() {
    let dir = TempDir::new().expect("tempdir");
    let csv = fixture(
        &dir,
        "box-ryzen-graph-layers.csv",
        "Updates,Depth,Time (ms)\n46,1,0.5\n46,2,0.9\n51,1,1.1\n",
    );
    let config = fixture(&dir, "bp.toml", "columns = 1\nupdate_buckets = [46]\n");
    let out_dir = dir.path().join("plots");
    let output = cargo_bin_cmd!("depth-plot")
        .arg("--config")
        .arg(&config)
        .arg("--out-dir")
        .arg(&out_dir)
        .arg(&csv)
        .assert()
        .success()
        .get_output()
        .clone();
    assert!(stdout_of(&output).contains("Statistics for box ryzen graph layers:"));
    let svg = fs::read_to_string(out_dir.join("depth_comparison.svg")).expect("svg");
    assert!(svg.contains("Updates 46"));
    assert!(!svg.contains("Updates 51"));
}

#[test]
fn malformed_csv_fails_with_message() {
    let dir = TempDir::new().expect("tempdir");
    let csv = fixture(&dir, "results.csv", "Signal,deep,lots,1,1.0\n");
    cargo_bin_cmd!("benchmark-plot")
        .arg("--out-dir")
        .arg(dir.path().join("plots"))
        .arg(&csv)
        .assert()
        .code(1);
}

#[test]
fn bad_log_filter_fails_before_loading() {
    let dir = TempDir::new().expect("tempdir");
    let csv = fixture(&dir, "results.csv", "Signal,deep,1,1,1.0\n");
    let output = cargo_bin_cmd!("benchmark-plot")
        .arg("--log-level")
        .arg("benchplot=loud")
        .arg("--out-dir")
        .arg(dir.path().join("plots"))
        .arg(&csv)
        .assert()
        .code(1)
        .get_output()
        .clone();
    let stderr = String::from_utf8(output.stderr.clone()).expect("utf8 stderr");
    assert!(stderr.contains("benchmark-plot failed: invalid argument: invalid log filter"));
    assert!(!dir.path().join("plots").exists());
}
