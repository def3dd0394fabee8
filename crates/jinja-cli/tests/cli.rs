//! End-to-end runs of the `jinja` binary.

use std::fs;
use std::path::Path;

use assert_cmd::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;

fn jinja() -> Command {
    let mut cmd = Command::new(cargo_bin!("jinja"));
    cmd.env_remove("JINJA_LOG");
    cmd
}

fn write(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn help_lists_options() {
    jinja()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("--define"))
        .stdout(predicate::str::contains("--strict-undefined"));
}

#[test]
fn template_on_stdin_with_define() {
    jinja()
        .args(["-D", "name", "World"])
        .write_stdin("Hello {{ name }}!\n")
        .assert()
        .success()
        .stdout("Hello World!\n");
}

#[test]
fn output_is_written_verbatim() {
    jinja()
        .args(["-D", "x", "1", "-"])
        .write_stdin("{{ x }}")
        .assert()
        .success()
        .stdout("1");
}

#[test]
fn json_data_file() {
    let dir = tempfile::tempdir().unwrap();
    let data = write(dir.path(), "data.json", r#"{"items": ["a", "b", "c"]}"#);
    let template = write(dir.path(), "list.j2", "{{ items | join(', ') }}\n");

    jinja()
        .args(["-d", &data, &template])
        .assert()
        .success()
        .stdout("a, b, c\n");
}

#[test]
fn csv_data_is_exposed_as_data() {
    let dir = tempfile::tempdir().unwrap();
    let data = write(dir.path(), "people.csv", "name,age\nAda,36\nGrace,45\n");
    let template = write(
        dir.path(),
        "people.j2",
        "{% for p in data %}{{ p.name }}={{ p.age }}\n{% endfor %}",
    );

    jinja()
        .args(["--data", &data, &template])
        .assert()
        .success()
        .stdout("Ada=36\nGrace=45\n");
}

#[test]
fn ini_default_section() {
    let dir = tempfile::tempdir().unwrap();
    let data = write(dir.path(), "app.ini", "[DEFAULT]\nx = 5\n\n[server]\nport = 80\n");

    jinja()
        .args(["-d", &data])
        .write_stdin("{{ server.x }}:{{ server.port }}")
        .assert()
        .success()
        .stdout("5:80");
}

#[test]
fn data_on_stdin_with_explicit_format() {
    let dir = tempfile::tempdir().unwrap();
    let template = write(dir.path(), "t.j2", "{{ name }}");

    jinja()
        .args(["-d", "-", "-f", "yaml", &template])
        .write_stdin("name: piped\n")
        .assert()
        .success()
        .stdout("piped");
}

#[test]
fn define_overrides_data() {
    let dir = tempfile::tempdir().unwrap();
    let data = write(dir.path(), "data.json", r#"{"name": "file"}"#);

    jinja()
        .args(["-d", &data, "-D", "name", "cli"])
        .write_stdin("{{ name }}")
        .assert()
        .success()
        .stdout("cli");
}

#[test]
fn output_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.txt");

    jinja()
        .args(["-D", "a", "b", "-o", out.to_str().unwrap()])
        .write_stdin("{{ a }}\n")
        .assert()
        .success()
        .stdout("");
    assert_eq!(fs::read_to_string(out).unwrap(), "b\n");
}

#[test]
fn render_failure_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.txt");

    jinja()
        .args(["--strict-undefined", "-o", out.to_str().unwrap()])
        .write_stdin("{{ missing }}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
    assert!(!out.exists());
}

#[test]
fn unknown_suffix_needs_format() {
    let dir = tempfile::tempdir().unwrap();
    let data = write(dir.path(), "data.txt", "{}");

    jinja()
        .args(["-d", &data])
        .write_stdin("x")
        .assert()
        .failure()
        .stderr(predicate::str::contains("format"));
}

#[test]
fn invalid_format_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let data = write(dir.path(), "data.json", "{}");

    jinja()
        .args(["-d", &data, "-f", "frobnicate"])
        .write_stdin("x")
        .assert()
        .failure()
        .stderr(predicate::str::contains("frobnicate"));
}

#[test]
fn malformed_data_fails() {
    let dir = tempfile::tempdir().unwrap();
    let data = write(dir.path(), "data.json", r#"{"name": "#);

    jinja()
        .args(["-d", &data])
        .write_stdin("{{ name }}")
        .assert()
        .failure()
        .stdout("");
}

#[test]
fn stdin_conflict() {
    jinja()
        .args(["-d", "-", "-f", "json"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("stdin"));
}

#[test]
fn missing_template_file() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("nope.j2");

    jinja()
        .arg(template.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("template not found"));
}

#[test]
fn csv_wrapping_is_logged_with_verbose() {
    let dir = tempfile::tempdir().unwrap();
    let data = write(dir.path(), "rows.csv", "a\n1\n");

    jinja()
        .args(["-v", "-d", &data])
        .write_stdin("{{ data | length }}")
        .assert()
        .success()
        .stdout("1")
        .stderr(predicate::str::contains("data"));
}

#[test]
fn quiet_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let data = write(dir.path(), "rows.csv", "a\n1\n");

    jinja()
        .args(["-d", &data])
        .write_stdin("{{ data[0].a }}")
        .assert()
        .success()
        .stdout("1")
        .stderr("");
}
