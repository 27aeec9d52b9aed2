use std::fs;
use std::process::Command;

use serde_json::Value;
use tempfile::TempDir;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_donelog"))
}

#[test]
fn dates_lists_subsections_with_entry_counts() {
    let temp = TempDir::new().expect("tempdir");
    let file = temp.path().join("todo.md");
    fs::write(
        &file,
        "# History\n## 2026-08-05\n- [x] a\n## 2026-08-06\n- [x] b\n- [x] c",
    )
    .expect("write");

    let output = bin()
        .arg("dates")
        .arg(&file)
        .arg("--json")
        .output()
        .expect("dates");
    assert!(output.status.success());

    let payload: Value = serde_json::from_slice(&output.stdout).expect("json");
    let dates = payload
        .get("dates")
        .and_then(|v| v.as_array())
        .expect("dates");
    assert_eq!(dates.len(), 2);
    assert_eq!(
        dates[0].get("date").and_then(|v| v.as_str()),
        Some("2026-08-05")
    );
    assert_eq!(dates[0].get("entries").and_then(|v| v.as_u64()), Some(1));
    assert_eq!(
        dates[1].get("date").and_then(|v| v.as_str()),
        Some("2026-08-06")
    );
    assert_eq!(dates[1].get("entries").and_then(|v| v.as_u64()), Some(2));
}

#[test]
fn dates_without_a_history_section_reports_none() {
    let temp = TempDir::new().expect("tempdir");
    let file = temp.path().join("todo.md");
    fs::write(&file, "- [ ] nothing archived yet").expect("write");

    let output = bin().arg("dates").arg(&file).output().expect("dates");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(stdout.contains("no history section"));
}
