//! CLI surface tests

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_usage_and_modes() {
    Command::cargo_bin("domain-scout")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("USAGE")
                .and(predicate::str::contains("serve"))
                .and(predicate::str::contains("ENVIRONMENT VARIABLES")),
        );
}

#[test]
fn short_help_flag_works() {
    Command::cargo_bin("domain-scout")
        .unwrap()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Domain Scout"));
}
