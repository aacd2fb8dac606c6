#![cfg(feature = "cli_api")]

use assert_cmd::Command;
use predicates::str::contains as str_contains;
use team_planner::{CandidateMember, ExperienceTier, Role, save_roster_to_json};
use tempfile::NamedTempFile;

fn roster_file() -> NamedTempFile {
    let tmp = NamedTempFile::new().expect("create temp file");
    let members = vec![
        CandidateMember::new("m1", "Mira", Role::Manager, ExperienceTier::Lead, 120.0),
        CandidateMember::new("d1", "Dev", Role::Developer, ExperienceTier::Mid, 100.0)
            .with_skills(["rust"]),
    ];
    save_roster_to_json(&members, tmp.path()).expect("write roster");
    tmp
}

#[allow(deprecated)]
fn run_cli(roster: Option<&NamedTempFile>, script: &str) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("cli").expect("cli binary");
    if let Some(file) = roster {
        cmd.arg(file.path());
    }
    cmd.write_stdin(script.to_string()).assert()
}

#[test]
fn cli_loads_roster_and_adds_by_click() {
    let roster = roster_file();
    run_cli(Some(&roster), "add d1\nadd d1\nshow\nquit\n")
        .success()
        .stdout(str_contains("Loaded 2 candidates from"))
        .stdout(str_contains("Added d1 (developer)."))
        .stdout(str_contains("Member d1 already selected."));
}

#[test]
fn cli_drop_over_team_area_adds_member() {
    let roster = roster_file();
    run_cli(Some(&roster), "drag m1\nhover\ndrop\nreport\nquit\n")
        .success()
        .stdout(str_contains("Drag state: hovering_target"))
        .stdout(str_contains("Dropped m1 onto the team."))
        .stdout(str_contains("understaffed"));
}

#[test]
fn cli_drop_outside_team_area_cancels() {
    let roster = roster_file();
    let assert = run_cli(Some(&roster), "drag d1\ndrop\nshow\nquit\n").success();
    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(output.contains("Drag of d1 cancelled outside the team area."));
    assert!(output.contains("No members selected."));
}

#[test]
fn cli_without_roster_rejects_unknown_members() {
    run_cli(None, "add d1\nfrobnicate\nquit\n")
        .success()
        .stdout(str_contains("Member d1 not in roster."))
        .stdout(str_contains("Unknown command. Type 'help'."));
}

#[test]
fn cli_rejects_zero_duration() {
    run_cli(None, "duration 0\nbudget 5000\nquit\n")
        .success()
        .stdout(str_contains("Error: duration_days must be positive"))
        .stdout(str_contains("Budget updated."));
}
