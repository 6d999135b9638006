mod common;

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;

fn script(home: &Path, input: &str) -> assert_cmd::assert::Assert {
    Command::cargo_bin("budget_tracker_cli")
        .unwrap()
        .env("BUDGET_TRACKER_CLI_SCRIPT", "1")
        .env("BUDGET_TRACKER_HOME", home)
        .env("NO_COLOR", "1")
        .write_stdin(input.to_string())
        .assert()
}

#[test]
fn script_mode_runs_basic_flow() {
    let home = common::temp_base();
    let input = "\
budget 100
budget 50
add Coffee 10 2
add Bagel 5 1
delete 1
edit 0
add
totals
exit
";
    script(&home, input)
        .success()
        .stdout(contains("Budget is now $150."))
        .stdout(contains("Budget: $150  Expenses: $25  Balance: $125"))
        .stdout(contains("Deleted expense #1: Bagel."))
        .stdout(contains("Expense #0 removed for editing: Coffee, 10, 2."))
        .stdout(contains("Added expense #2: Coffee ($10 x 2)."))
        .stdout(contains("Budget: $150  Expenses: $20  Balance: $130"));

    let raw = std::fs::read_to_string(home.join("store.json")).unwrap();
    assert!(raw.contains("\"budget\": \"150\""));
    assert!(raw.contains("\"balance\": \"130\""));
}

#[test]
fn invalid_input_prints_notice_and_continues() {
    let home = common::temp_base();
    let input = "\
budget -5
add Coffee abc 1
add \"\" 3 1
totals
";
    script(&home, input)
        .success()
        .stdout(contains("[x] Please Enter a Valid Budget"))
        .stdout(contains("[x] Please Enter Valid Expense Details"))
        .stdout(contains("Budget: $0  Expenses: $0  Balance: $0"));
}

#[test]
fn state_carries_over_between_runs() {
    let home = common::temp_base();
    script(&home, "budget 40\nadd \"Bus pass\" 2 4\n").success();
    script(&home, "list\n")
        .success()
        .stdout(contains("Bus pass"))
        .stdout(contains("Budget: $40  Expenses: $8  Balance: $32"));
}

#[test]
fn tolerant_delete_and_unknown_commands() {
    let home = common::temp_base();
    script(&home, "delete 7\ndelte 1\nedit 3\n")
        .success()
        .stdout(contains("No expense #7; nothing deleted."))
        .stdout(contains("Suggestion: `delete`?"))
        .stdout(contains("No expense #3 to edit."));
}

#[test]
fn config_delay_is_persisted() {
    let home = common::temp_base();
    script(&home, "config delay 9\n")
        .success()
        .stdout(contains("Notice delay set to 9s."));
    script(&home, "config\n")
        .success()
        .stdout(contains("notice delay: 9s"))
        .stdout(contains("store.json").and(contains("config.json")));
}
