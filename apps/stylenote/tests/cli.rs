use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;
use tempfile::tempdir;

fn cmd() -> Command {
    let mut c = Command::cargo_bin("stylenote").unwrap();
    c.env("NO_COLOR", "1").env_remove("STYLENOTE_LOG");
    c
}

fn book() -> tempfile::TempDir {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join(".git")).unwrap();
    dir
}

#[test]
fn read_password_yields_one_finding() {
    let dir = book();
    fs::write(dir.path().join("ch1.txt"), "bool read_password = true;\n").unwrap();
    cmd()
        .arg(dir.path())
        .assert()
        .code(1)
        .stdout(contains("ch1.txt:1 ❲ambiguous-boolean❳"))
        .stdout(contains("findings=1 documents=1"));
}

#[test]
fn empty_directory_exits_zero() {
    let dir = book();
    cmd()
        .arg(dir.path())
        .assert()
        .code(0)
        .stdout(contains("findings=0 documents=0"));
}

#[test]
fn missing_root_exits_two() {
    let dir = book();
    cmd()
        .arg(dir.path().join("nope"))
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(contains("root path not found"));
}

#[test]
fn json_format_and_rule_subset() {
    let dir = book();
    fs::write(
        dir.path().join("ch2.md"),
        "int tmp = 1;\ndo {\n} while (x);\nbool read_it = false;\n",
    )
    .unwrap();
    let out = cmd()
        .arg(dir.path())
        .args(["--format", "json", "--rules", "do-while,generic-name"])
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let findings = v["documents"][0]["findings"].as_array().unwrap();
    let rules: Vec<_> = findings.iter().map(|f| f["rule"].as_str().unwrap()).collect();
    assert_eq!(rules, ["generic-name", "do-while"]);
    assert_eq!(v["summary"]["total"], 2);
}

#[test]
fn unknown_rule_is_fatal() {
    let dir = book();
    cmd()
        .arg(dir.path())
        .args(["--rules", "no-such-rule"])
        .assert()
        .code(2)
        .stderr(contains("unknown rule 'no-such-rule'"));
}

#[test]
fn config_pattern_rule_and_format() {
    let dir = book();
    fs::write(
        dir.path().join("stylenote.toml"),
        "format = \"json\"\nrules = [\"no-todo\"]\n[[pattern]]\nname = \"no-todo\"\nregex = \"TODO\"\n",
    )
    .unwrap();
    fs::write(dir.path().join("notes.md"), "ok\nTODO later\n").unwrap();
    cmd()
        .arg(dir.path())
        .assert()
        .code(1)
        .stdout(contains("\"rule\": \"no-todo\""))
        .stdout(contains("\"line\": 2"));
}

#[test]
fn unreadable_file_is_io_finding() {
    let dir = book();
    fs::write(dir.path().join("cover.png"), [0x89u8, 0x50, 0xff, 0xfe]).unwrap();
    cmd()
        .arg(dir.path())
        .assert()
        .code(1)
        .stdout(contains("cover.png ❲io❳"))
        .stderr(contains("could not be read"));
}

#[test]
fn list_rules_prints_catalogue() {
    cmd()
        .arg("--list-rules")
        .assert()
        .success()
        .stdout(contains("ambiguous-boolean"))
        .stdout(contains("long-line"));
}

#[test]
fn single_job_matches_default_run() {
    let dir = book();
    fs::write(dir.path().join("ch1.txt"), "bool read_password = true;\n").unwrap();
    fs::write(dir.path().join("ch2.txt"), "int tmp = 1;\n").unwrap();
    cmd()
        .arg(dir.path())
        .args(["--jobs", "1"])
        .assert()
        .code(1)
        .stdout(contains("ch1.txt:1 ❲ambiguous-boolean❳"))
        .stdout(contains("ch2.txt:1 ❲generic-name❳"))
        .stdout(contains("findings=2 documents=2"));
}

#[test]
fn explicit_config_overrides_discovered_one() {
    let dir = book();
    fs::write(dir.path().join("stylenote.toml"), "format = \"text\"\n").unwrap();
    fs::write(dir.path().join("other.toml"), "format = \"json\"\n").unwrap();
    fs::write(dir.path().join("ch1.md"), "clean prose\n").unwrap();
    let out = cmd()
        .current_dir(dir.path())
        .args([".", "--config", "other.toml"])
        .assert()
        .code(0)
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["summary"]["total"], 0);
    let docs: Vec<_> = v["documents"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["document"].as_str().unwrap())
        .collect();
    assert_eq!(docs, ["ch1.md", "stylenote.toml"]);
}

#[test]
fn missing_explicit_config_exits_two() {
    let dir = book();
    cmd()
        .arg(dir.path())
        .args(["--config"])
        .arg(dir.path().join("missing.toml"))
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(contains("invalid config"))
        .stderr(contains("missing.toml"));
}

#[test]
fn dot_prefixed_hidden_root_is_linted() {
    let dir = book();
    fs::create_dir(dir.path().join(".notes")).unwrap();
    fs::write(dir.path().join(".notes/ch1.txt"), "bool read_password = true;\n").unwrap();
    cmd()
        .current_dir(dir.path())
        .arg("./.notes")
        .assert()
        .code(1)
        .stdout(contains("ch1.txt:1 ❲ambiguous-boolean❳"))
        .stdout(contains("findings=1 documents=1"));
}

#[test]
fn discovered_config_is_not_linted() {
    let dir = book();
    fs::write(
        dir.path().join("stylenote.toml"),
        "[[pattern]]\nname = \"no-todo\"\nregex = \"TODO\"\n",
    )
    .unwrap();
    fs::write(dir.path().join("ch1.md"), "clean prose\n").unwrap();
    cmd()
        .arg(dir.path())
        .assert()
        .code(0)
        .stdout(contains("findings=0 documents=1"));
}
