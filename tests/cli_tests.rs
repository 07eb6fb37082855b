use regex::Regex;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

const PLAINTEXT: &str = "we are discovered so flee at once and meet the others at the old \
mill by the river where the boats wait for the night crossing";

struct TestContext {
    dir: TempDir,
    plain_path: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let plain_path = dir.path().join("plain.txt");
        fs::write(&plain_path, PLAINTEXT).unwrap();
        Self { dir, plain_path }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_colcrack"))
        .args(args)
        .output()
        .expect("Failed to execute colcrack")
}

fn arg(path: &PathBuf) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_encode_then_decode_round_trip() {
    let ctx = TestContext::new();
    let cipher = ctx.path("cipher.txt");
    let plain = ctx.path("decoded.txt");

    let out = run(&[
        "encode", "-i", arg(&ctx.plain_path), "-o", arg(&cipher), "--keyword", "ZEBRAS",
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let ciphertext = fs::read_to_string(&cipher).unwrap();
    assert_ne!(ciphertext, PLAINTEXT);
    assert_eq!(ciphertext.len(), PLAINTEXT.len());

    let out = run(&[
        "decode", "-i", arg(&cipher), "-o", arg(&plain), "--key", "6[5|2|1|3|0|4]",
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(fs::read_to_string(&plain).unwrap(), PLAINTEXT);
}

#[test]
fn test_crack_recovers_plaintext() {
    let ctx = TestContext::new();
    let cipher = ctx.path("cipher.txt");
    let cracked = ctx.path("cracked.txt");

    let out = run(&["encode", "-i", arg(&ctx.plain_path), "-o", arg(&cipher), "-w", "lion"]);
    assert!(out.status.success());

    let out = run(&[
        "crack", "-i", arg(&cipher), "-o", arg(&cracked), "--key-min", "4", "--key-max", "4",
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(fs::read_to_string(&cracked).unwrap(), PLAINTEXT);

    let stdout = String::from_utf8_lossy(&out.stdout);
    // Decode key for LION is the inverse of 4[1|0|3|2], i.e. itself.
    let re = Regex::new(r"\|\s*column_to_row\s*\|\s*(\d+)\s*\|\s*4\s*\|\s*4\[1\|0\|3\|2\]").unwrap();
    assert!(re.is_match(&stdout), "unexpected report:\n{}", stdout);
}

#[test]
fn test_crack_json_output() {
    let ctx = TestContext::new();
    let cipher = ctx.path("cipher.txt");
    let config = ctx.path("search.json");
    fs::write(&config, r#"{ "search": { "key_min": 2, "key_max": 3 } }"#).unwrap();

    let out = run(&["encode", "-i", arg(&ctx.plain_path), "-o", arg(&cipher), "-k", "2,0,1"]);
    assert!(out.status.success());

    let out = run(&["crack", "-i", arg(&cipher), "--json", "--config", arg(&config)]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let result: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(result["key_size"], 3);
    assert_eq!(result["candidates"], 2 + 6);
    assert_eq!(result["transform"], "column_to_row");
    assert_eq!(result["key"], serde_json::json!([1, 2, 0]));
}

#[test]
fn test_key_command_shows_inverse() {
    let out = run(&["key", "ZEBRAS"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);

    let re = Regex::new(r"Key: 6\[5\|2\|1\|3\|0\|4\] \(inverse 6\[4\|2\|1\|3\|5\|0\]\)").unwrap();
    assert!(re.is_match(&stdout), "unexpected output:\n{}", stdout);
}

#[test]
fn test_invalid_input_fails() {
    let out = run(&["key", "3[0|0|1]"]);
    assert!(!out.status.success());

    let out = run(&["key", "AB1"]);
    assert!(!out.status.success());

    let ctx = TestContext::new();
    let out = run(&["crack", "-i", arg(&ctx.plain_path), "--key-min", "5", "--key-max", "3"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("not searchable"));

    let out = run(&["decode", "-i", arg(&ctx.plain_path)]);
    assert!(!out.status.success());
}
