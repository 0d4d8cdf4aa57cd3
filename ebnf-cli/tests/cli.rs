use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const NUMBER: &str = "%TAG ! tag:drosoft.org/ebnf,2016:
---
number: [!opt sign, !many1 digit]
sign: !alt [!token '+', !token '-']
digit: !charrange ['0', '9']
";

fn grammar_file(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("number.yaml");
    fs::write(&path, contents).expect("write grammar");
    path
}

#[test]
fn renders_ebnf_by_default() {
    let dir = TempDir::new().expect("temp dir");
    let path = grammar_file(&dir, NUMBER);

    let mut cmd = cargo_bin_cmd!("ebnf");
    cmd.arg(&path);
    cmd.assert().success().stdout(
        "\nnumber\n\t= [ sign ], digit, { digit };\n\
         \nsign\n\t= '+' | '-';\n\
         \ndigit\n\t= ?/[0-9]/?;\n",
    );
}

#[test]
fn reads_stdin_and_writes_canonical_yaml() {
    let mut cmd = cargo_bin_cmd!("ebnf");
    cmd.arg("-")
        .arg("--format")
        .arg("yaml")
        .write_stdin("%TAG ! ns:\n---\ntop: !group digit");
    cmd.assert()
        .success()
        .stdout("%TAG ! ns:\n---\ntop: !group\n- digit\n");
}

#[test]
fn namespace_option_applies_to_documents_without_one() {
    let mut cmd = cargo_bin_cmd!("ebnf");
    cmd.args(["-", "-f", "yaml", "--namespace", "tag:example.org,2024:"])
        .write_stdin("top: !opt digit\n");
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("%TAG ! tag:example.org,2024:\n---\n"));
}

#[test]
fn config_file_controls_rendering() {
    let dir = TempDir::new().expect("temp dir");
    let path = grammar_file(&dir, NUMBER);
    let config = dir.path().join("ebnf.toml");
    fs::write(&config, "[render]\nindent = \"  \"\n").expect("write config");

    let mut cmd = cargo_bin_cmd!("ebnf");
    cmd.arg(&path).arg("--config").arg(&config);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\nsign\n  = '+' | '-';\n"));
}

#[test]
fn line_width_option_wraps_definitions() {
    let mut cmd = cargo_bin_cmd!("ebnf");
    cmd.args(["-", "--line-width", "10"])
        .write_stdin("top: [alpha, beta]\n");
    cmd.assert()
        .success()
        .stdout("\ntop\n\t= alpha,\n\tbeta;\n");
}

#[test]
fn inspection_formats() {
    let dir = TempDir::new().expect("temp dir");
    let path = grammar_file(&dir, NUMBER);

    let mut treeviz = cargo_bin_cmd!("ebnf");
    treeviz.arg(&path).arg("-f").arg("treeviz");
    treeviz
        .assert()
        .success()
        .stdout(predicate::str::contains("3 rules").and(predicate::str::contains("number")));

    let mut json = cargo_bin_cmd!("ebnf");
    json.arg(&path).arg("-f").arg("json");
    json.assert()
        .success()
        .stdout(predicate::str::contains("\"node_type\": \"Grammar\""));
}

#[test]
fn lists_formats() {
    let mut cmd = cargo_bin_cmd!("ebnf");
    cmd.arg("--list-formats");
    cmd.assert().success().stdout(
        predicate::str::contains("ebnf")
            .and(predicate::str::contains("yaml"))
            .and(predicate::str::contains("treeviz"))
            .and(predicate::str::contains("json")),
    );
}

#[test]
fn unknown_format_fails() {
    let mut cmd = cargo_bin_cmd!("ebnf");
    cmd.args(["-", "-f", "pdf"]).write_stdin("top: a\n");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unknown format 'pdf'"));
}

#[test]
fn decode_errors_are_reported() {
    let mut cmd = cargo_bin_cmd!("ebnf");
    cmd.arg("-").write_stdin("top: !bogus x\n");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unknown construct 'bogus'"));
}

#[test]
fn unrenderable_grammar_fails() {
    let mut cmd = cargo_bin_cmd!("ebnf");
    cmd.arg("-").write_stdin("top: !times [digit, 1, 3]\n");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Cannot render"));
}

#[test]
fn missing_file_fails() {
    let mut cmd = cargo_bin_cmd!("ebnf");
    cmd.arg("/nonexistent/grammar.yaml");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open"));
}
