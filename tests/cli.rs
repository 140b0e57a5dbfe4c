use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("oprs").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("oprs"));
}

#[test]
fn spending_requires_chemical_and_org() {
    let mut cmd = Command::cargo_bin("oprs").unwrap();
    cmd.arg("spending");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--chemical"));
}

// Live test (opt-in): cargo test --features online
#[cfg(feature = "online")]
#[test]
fn search_online_lipid() {
    let mut cmd = Command::cargo_bin("oprs").unwrap();
    cmd.args(["search", "lipid"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Lipid").or(predicate::str::contains("lipid")));
}
