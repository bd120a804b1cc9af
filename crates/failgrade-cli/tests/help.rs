use assert_cmd::Command;

/// Helper to get a Command for the failgrade binary.
#[allow(deprecated)]
fn failgrade_cmd() -> Command {
    Command::cargo_bin("failgrade").unwrap()
}

#[test]
fn help_works() {
    failgrade_cmd().arg("--help").assert().success();
}
