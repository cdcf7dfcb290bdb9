use assert_cmd::Command;
use tempfile::TempDir;

pub fn blocknotes_cmd() -> Command {
    let mut cmd = Command::cargo_bin("blocknotes").unwrap();
    cmd.env_remove("BLOCKNOTES_ROOT");
    cmd.env_remove("BLOCKNOTES_RECORDER");
    cmd.env_remove("BLOCKNOTES_PLAYER");
    cmd.env_remove("BLOCKNOTES_LOG");
    cmd
}

/// An initialized notebook in a fresh temporary directory
#[allow(dead_code)]
pub fn notebook() -> TempDir {
    let temp = TempDir::new().unwrap();
    blocknotes_cmd().arg("init").arg(temp.path()).assert().success();
    temp
}

/// Run `new` in the notebook and return the printed note id
#[allow(dead_code)]
pub fn new_note(temp: &TempDir, args: &[&str]) -> String {
    let output = blocknotes_cmd()
        .current_dir(temp.path())
        .arg("new")
        .args(args)
        .output()
        .unwrap();
    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}
