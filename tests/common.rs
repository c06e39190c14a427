#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn tg() -> Command {
    let mut cmd = cargo_bin_cmd!("testgate");
    // Internal diagnostics share stderr with user-facing messages; keep them
    // out of the assertions.
    cmd.env("RUST_LOG", "off");
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_testgate.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a unique blob directory inside the system temp dir
pub fn setup_blob_dir(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_testgate_blobs", name));
    let dir = path.to_string_lossy().to_string();
    fs::remove_dir_all(&dir).ok();
    dir
}

/// Write a small proof file to upload and return its path
pub fn write_proof_file(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_proof.png", name));
    fs::write(&path, b"\x89PNG fake image bytes").expect("write proof file");
    path.to_string_lossy().to_string()
}

/// Initialize the store and add one enabled invite
pub fn init_with_invite(db_path: &str, code: &str, hours: &str) {
    tg().args(["--db", db_path, "--test", "init"]).assert().success();

    tg().args([
        "--db",
        db_path,
        "--test",
        "invite",
        code,
        "--hours",
        hours,
        "--problem",
        "prob-123",
        "--form",
        "https://forms.example/{code}",
    ])
    .assert()
    .success();
}
