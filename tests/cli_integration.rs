//! CLI tests using the local directory store.

use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use selclip::audio::{AudioBuffer, encode_wav};
use tempfile::TempDir;

const TABLE: &str = "Selection\tBegin Time (s)\tEnd Time (s)\tsound_category\tsound_type\tlabel_id\tconfidence\n\
                     1\t1.0\t2.0\trumble\tlow\t42\t0.9\n\
                     2\t3.0\t2.0\troar\thigh\t43\t0.8\n";

/// Lay out `<root>/field/rec.wav` and `<root>/field/rec.txt`.
fn seed_bucket(root: &Path) {
    let bucket = root.join("field");
    fs::create_dir_all(&bucket).unwrap();
    let audio = AudioBuffer::mono(vec![0.25; 48_000], 16_000);
    fs::write(bucket.join("rec.wav"), encode_wav(&audio).unwrap()).unwrap();
    fs::write(bucket.join("rec.txt"), TABLE).unwrap();
}

fn extract_cmd(temp: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("selclip");
    cmd.env_remove("SELCLIP_BUCKET")
        .env_remove("SELCLIP_CONFIG")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(temp.path().join("config.toml"))
        .arg("extract")
        .arg("--store")
        .arg("local")
        .arg("--local-root")
        .arg(temp.path().join("store"))
        .arg("--bucket")
        .arg("field")
        .arg("--table")
        .arg("rec.txt")
        .arg("--no-progress");
    cmd
}

#[test]
fn test_extract_local_writes_clip_and_prints_key() {
    let temp = TempDir::new().unwrap();
    seed_bucket(&temp.path().join("store"));

    extract_cmd(&temp)
        .arg("--audio")
        .arg("rec.wav")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "soundfiles_trimmed/confidence_0.9/rumble/low/42.wav",
        ))
        .stdout(predicate::str::contains("43.wav").not());

    let clip = temp
        .path()
        .join("store/field/soundfiles_trimmed/confidence_0.9/rumble/low/42.wav");
    let reader = hound::WavReader::open(clip).unwrap();
    assert_eq!(reader.len(), 16_000);
}

#[test]
fn test_extract_json_reports_uploads_and_skips() {
    let temp = TempDir::new().unwrap();
    seed_bucket(&temp.path().join("store"));

    let output = extract_cmd(&temp)
        .arg("--audio")
        .arg("rec.wav")
        .arg("--output-mode")
        .arg("json")
        .arg("--prefix")
        .arg("clips")
        .output()
        .unwrap();
    assert!(output.status.success());

    let envelope: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(envelope["event"], "result");
    let payload = &envelope["payload"];
    assert_eq!(payload["result_type"], "clip_extraction");
    assert_eq!(payload["total_rows"], 2);
    assert_eq!(
        payload["uploaded"][0]["key"],
        "clips/confidence_0.9/rumble/low/42.wav"
    );
    assert_eq!(payload["skipped"][0]["line"], 3);
    assert_eq!(payload["skipped"][0]["reason"], "invalid_interval");
}

/// Count warning events in captured log output.
fn warning_count(stderr: &[u8]) -> usize {
    String::from_utf8_lossy(stderr).matches("WARN").count()
}

#[test]
fn test_extract_missing_audio_fails_without_uploads() {
    let temp = TempDir::new().unwrap();
    seed_bucket(&temp.path().join("store"));

    let output = extract_cmd(&temp)
        .arg("--audio")
        .arg("missing.wav")
        .arg("--output-mode")
        .arg("json")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"event\":\"error\""));
    assert!(stdout.contains("source_unavailable"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing.wav"));
    assert_eq!(warning_count(&output.stderr), 1);

    assert!(!temp.path().join("store/field/soundfiles_trimmed").exists());
}

#[test]
fn test_extract_table_without_begin_column_warns_once() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("store");
    seed_bucket(&root);
    fs::write(
        root.join("field/rec.txt"),
        "End Time (s)\tsound_category\tsound_type\tlabel_id\tconfidence\n2.0\trumble\tlow\t42\t0.9\n",
    )
    .unwrap();

    let output = extract_cmd(&temp)
        .arg("--audio")
        .arg("rec.wav")
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Begin Time (s)"));
    assert_eq!(warning_count(&output.stderr), 1);
    assert!(!root.join("field/soundfiles_trimmed").exists());
}

#[test]
fn test_fail_fast_exits_nonzero() {
    let temp = TempDir::new().unwrap();
    seed_bucket(&temp.path().join("store"));

    extract_cmd(&temp)
        .arg("--audio")
        .arg("rec.wav")
        .arg("--fail-fast")
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 3"));
}

#[test]
fn test_local_store_requires_root() {
    let mut cmd = cargo_bin_cmd!("selclip");
    cmd.env_remove("SELCLIP_BUCKET")
        .args(["extract", "--store", "local", "--bucket", "b"])
        .args(["--audio", "a.wav", "--table", "t.txt"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--local-root"));
}

#[test]
fn test_s3_store_without_credentials_fails() {
    let temp = TempDir::new().unwrap();

    let mut cmd = cargo_bin_cmd!("selclip");
    cmd.env_remove("SELCLIP_BUCKET")
        .arg("--config")
        .arg(temp.path().join("config.toml"))
        .args(["extract", "--bucket", "b", "--audio", "a.wav", "--table", "t.txt"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("access_key"));
}

#[test]
fn test_config_init_then_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested/config.toml");

    let mut init = cargo_bin_cmd!("selclip");
    init.arg("--config").arg(&path).args(["config", "init"]);
    init.assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("[credentials]"));
    assert!(contents.contains("key_prefix = \"soundfiles_trimmed\""));

    let mut again = cargo_bin_cmd!("selclip");
    again.arg("--config").arg(&path).args(["config", "init"]);
    again
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    let mut show_path = cargo_bin_cmd!("selclip");
    show_path.arg("--config").arg(&path).args(["config", "path"]);
    show_path
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}
