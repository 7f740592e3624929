use std::path::Path;

use assert_cmd::Command;
use serde_json::Value;

/// Build a timeboard command isolated to a temp data directory, with a
/// deterministic acting user.
pub fn board_cmd(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("timeboard").expect("binary");
    cmd.current_dir(data_dir);
    cmd.arg("--data").arg(data_dir);
    cmd.env_remove("TIMEBOARD_USER");
    cmd.env_remove("TIMEBOARD_DATA");
    cmd
}

/// Run a command with --json and parse the success envelope's data field.
pub fn run_json(data_dir: &Path, args: &[&str]) -> Value {
    let output = board_cmd(data_dir)
        .args(args)
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let envelope: Value = serde_json::from_slice(&output).expect("json envelope");
    assert_eq!(envelope["schema_version"], "timeboard.v1");
    assert_eq!(envelope["status"], "success");
    envelope["data"].clone()
}
