//! Process-level behavior of the `nova` binary

use std::path::PathBuf;
use std::process::Command;

fn nova() -> Command {
    Command::new(env!("CARGO_BIN_EXE_nova"))
}

fn shipped_brain() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/brain.toml")
}

#[test]
fn test_missing_knowledge_base_is_fatal() {
    let output = nova()
        .args(["--cli", "--brain", "/nonexistent/nova/brain.toml"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error:"), "stderr: {}", stderr);
    assert!(stderr.contains("knowledge base"), "stderr: {}", stderr);
    // No loop was entered
    assert!(!String::from_utf8_lossy(&output.stdout).contains("You: "));
}

#[test]
fn test_once_prints_reply() {
    let output = nova()
        .arg("--brain")
        .arg(shipped_brain())
        .args(["--dry-run", "--once", "Thank you!"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "You're welcome!");
}

#[test]
fn test_once_json_report() {
    let output = nova()
        .arg("--brain")
        .arg(shipped_brain())
        .args(["--dry-run", "--once", "open notepad", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["directive"]["kind"], "LAUNCH_APP");
    assert_eq!(report["directive"]["value"], "TEXT_EDITOR");
    assert_eq!(report["text"], "Opening text editor...");
    assert_eq!(report["degraded"], false);
}

#[test]
fn test_bad_config_file_is_fatal() {
    let path = std::env::temp_dir().join(format!("nova-bad-config-{}.toml", std::process::id()));
    std::fs::write(&path, "home_url = \"ftp://example.com\"\n").unwrap();

    let output = nova().arg("--config").arg(&path).arg("--cli").output().unwrap();
    let _ = std::fs::remove_file(&path);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("home_url"));
}
