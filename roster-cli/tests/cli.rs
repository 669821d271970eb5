//! Binary tests for `roster`: exit codes, stdout lines and the written file.
//!
//! Every run passes `--no-default-lists` with local name files so nothing
//! touches the network.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

const CONTACTS: &str = "FirstName,LastName,Email\n\
                        JOHN,SMITH,\n\
                        Acme,Holdings LLC,info@acme.com\n\
                        Zorblax,Q,\n";

fn roster() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_roster"));
    for var in [
        "ROSTER_OUTPUT",
        "ROSTER_CHUNK_SIZE",
        "ROSTER_GIVEN_URLS",
        "ROSTER_SURNAME_URLS",
        "ROSTER_GIVEN_FILES",
        "ROSTER_SURNAME_FILES",
        "ROSTER_NO_DEFAULT_LISTS",
    ] {
        cmd.env_remove(var);
    }
    cmd.env("RUST_LOG", "off");
    cmd
}

/// Writes the name lists and returns the list flags.
fn list_args(dir: &Path) -> Vec<String> {
    let given = dir.join("given.txt");
    let surnames = dir.join("surnames.txt");
    fs::write(&given, "john\nmary\n").unwrap();
    fs::write(&surnames, "smith\n").unwrap();

    vec![
        "--no-default-lists".into(),
        "--given-file".into(),
        given.display().to_string(),
        "--surname-file".into(),
        surnames.display().to_string(),
    ]
}

fn write_input(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, CONTACTS).unwrap();
    path
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn writes_default_output_and_summary() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "contacts.csv");

    let output = roster()
        .args(list_args(dir.path()))
        .arg(&input)
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let expected_path = dir.path().join("contacts_output.csv");
    let lines: Vec<String> = stdout(&output).lines().map(str::to_string).collect();
    assert_eq!(
        lines,
        [
            "Loading reference name lists...".to_string(),
            format!("Done. Wrote {}", expected_path.display()),
            "3 rows: 1 person, 1 business, 1 undetermined".to_string(),
        ]
    );

    let written = fs::read_to_string(&expected_path).unwrap();
    assert_eq!(
        written,
        "FirstName,LastName,Email,FirstName_Clean,LastName_Clean,Type\n\
         JOHN,SMITH,,John,Smith,Person\n\
         Acme,Holdings LLC,info@acme.com,Acme,Holdings Llc,Business\n\
         Zorblax,Q,,Zorblax,Q,Undetermined\n"
    );
}

#[test]
fn explicit_output_and_small_chunks() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "contacts.csv");
    let target = dir.path().join("cleaned.csv");

    let output = roster()
        .args(list_args(dir.path()))
        .args(["--chunk-size", "1", "--output"])
        .arg(&target)
        .arg(&input)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(stdout(&output).contains(&format!("Done. Wrote {}", target.display())));
    assert!(!dir.path().join("contacts_output.csv").exists());
    assert_eq!(fs::read_to_string(&target).unwrap().lines().count(), 4);
}

#[test]
fn missing_input_exits_with_failure() {
    let dir = TempDir::new().unwrap();

    let output = roster()
        .args(list_args(dir.path()))
        .arg(dir.path().join("nope.csv"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "File not found.\n");
}

#[test]
fn unsupported_extension_exits_with_failure() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "contacts.txt");

    let output = roster()
        .args(list_args(dir.path()))
        .arg(&input)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "Unsupported file type. Please provide .csv, .xls, or .xlsx.\n"
    );
    assert!(!dir.path().join("contacts_output.csv").exists());
}

#[test]
fn output_over_input_is_refused() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "contacts.csv");

    let output = roster()
        .args(list_args(dir.path()))
        .arg("--output")
        .arg(dir.path().join(".").join("contacts.csv"))
        .arg(&input)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "Output path must differ from the input file.\n");
    assert_eq!(fs::read_to_string(&input).unwrap(), CONTACTS);
}

#[test]
fn prompts_for_input_when_omitted() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "contacts.csv");

    let mut child = roster()
        .args(list_args(dir.path()))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(format!("  {}  \n", input.display()).as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.starts_with("Enter path to source file (CSV or XLSX): Loading reference name lists..."));
    assert!(dir.path().join("contacts_output.csv").exists());
}

#[test]
fn missing_name_list_file_is_skipped() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "contacts.csv");

    let absent = dir.path().join("absent.txt");

    let output = roster()
        .args(["--no-default-lists", "--given-file"])
        .arg(&absent)
        .arg(&input)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(stdout(&output).ends_with("3 rows: 0 person, 1 business, 2 undetermined\n"));
}
