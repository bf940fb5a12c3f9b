use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::tempdir;

const WORK_SERVER: &str = r#"<key name="Sessions">
  <key name="Work">
    <key name="Server1">
      <string name="Hostname">10.0.0.5</string>
      <dword name="[SSH2] Port">2222</dword>
    </key>
  </key>
</key>
"#;

const EXPECTED: &str = "name,address,port,protocol\nSessions/Work/Server1,10.0.0.5,2222,SSH2\n";

fn binary() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_extract_sessions"));
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Run the binary with `args`, feeding `stdin` to it.
fn run_with_stdin(args: &[&str], stdin: &str) -> Output {
    let mut child = binary()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_no_arguments_stdin_to_stdout() {
    let output = run_with_stdin(&[], WORK_SERVER);

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), EXPECTED);
}

#[test]
fn test_explicit_placeholders() {
    let output = run_with_stdin(&["-", "-"], WORK_SERVER);

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), EXPECTED);
}

#[test]
fn test_logs_do_not_reach_stdout() {
    let output = run_with_stdin(&["-vv"], WORK_SERVER);

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), EXPECTED);
    assert!(!output.stderr.is_empty());
}

#[test]
fn test_file_arguments() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("sessions.xml");
    let csv_path = dir.path().join("sessions.csv");
    fs::write(&input, WORK_SERVER).unwrap();

    let output = binary()
        .arg(&input)
        .arg(&csv_path)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert_eq!(fs::read_to_string(&csv_path).unwrap(), EXPECTED);
}

#[test]
fn test_two_runs_are_byte_identical() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("sessions.xml");
    fs::write(&input, WORK_SERVER).unwrap();

    for name in ["a.csv", "b.csv"] {
        let status = binary()
            .arg(&input)
            .arg(dir.path().join(name))
            .status()
            .unwrap();
        assert!(status.success());
    }

    assert_eq!(
        fs::read(dir.path().join("a.csv")).unwrap(),
        fs::read(dir.path().join("b.csv")).unwrap()
    );
}

#[test]
fn test_missing_input_file() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.xml");

    let output = binary().arg(&missing).output().unwrap();

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("[XS002]"), "stderr: {}", stderr);
    assert!(stderr.contains("nope.xml"), "stderr: {}", stderr);
    assert!(output.stdout.is_empty());
}

#[test]
fn test_unwritable_output() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("missing_dir").join("out.csv");

    let output = run_with_stdin(&["-", target.to_str().unwrap()], WORK_SERVER);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("out.csv"), "stderr: {}", stderr);
}

#[test]
fn test_malformed_xml() {
    let output = run_with_stdin(&[], "<key name=\"Sessions\"><key name=\"a\"></key>");

    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("[XS003]"), "stderr: {}", stderr);
    assert!(stderr.contains("stdin"), "stderr: {}", stderr);
    assert!(output.stdout.is_empty());
}

#[test]
fn test_bad_port_aborts() {
    let xml = r#"<key name="Sessions"><key name="db"><dword name="[SSH2] Port">ssh</dword></key></key>"#;
    let output = run_with_stdin(&[], xml);

    assert_eq!(output.status.code(), Some(4));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Sessions/db"), "stderr: {}", stderr);
    assert!(stderr.contains("[SSH2] Port"), "stderr: {}", stderr);
}

#[test]
fn test_bad_port_lenient() {
    let xml = r#"<key name="Sessions"><key name="db"><dword name="[SSH2] Port">ssh</dword></key></key>"#;
    let output = run_with_stdin(&["--lenient-ports"], xml);

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "name,address,port,protocol\nSessions/db,,22,SSH2\n"
    );
}

#[test]
fn test_strict_missing_sessions() {
    let output = run_with_stdin(&["--strict"], "<VanDyke/>");

    assert_eq!(output.status.code(), Some(5));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("[XS005]"), "stderr: {}", stderr);
}

#[test]
fn test_missing_sessions_not_strict() {
    let output = run_with_stdin(&["-q"], "<VanDyke/>");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "name,address,port,protocol\n"
    );
}

#[test]
fn test_json_errors() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.xml");

    let output = binary()
        .arg("--json-errors")
        .arg("-q")
        .arg(&missing)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let json: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(json["code"], "XS002");
    assert_eq!(json["exit_code"], 2);
    assert!(json["message"].as_str().unwrap().contains("nope.xml"));
}

#[test]
fn test_strip_root_and_crlf_flags() {
    let output = run_with_stdin(&["--strip-root", "--crlf"], WORK_SERVER);

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "name,address,port,protocol\r\nWork/Server1,10.0.0.5,2222,SSH2\r\n"
    );
}
