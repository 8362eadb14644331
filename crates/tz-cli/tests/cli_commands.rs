//! Integration tests for the tz-cli command-line interface.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use assert_cmd::Command;
use predicates::prelude::*;

fn tz() -> Command {
    let mut cmd = Command::cargo_bin("tz").unwrap();
    cmd.env_remove("TZ_API_KEY").env("NO_COLOR", "1");
    cmd
}

fn play_offline(input: &str) -> assert_cmd::assert::Assert {
    tz().args(["play", "--offline"]).write_stdin(input).assert()
}

const INTRO: &str = "hello\nyes\nAda\nyes\nyes\n";

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_opens_connection() {
    play_offline("")
        .success()
        .stdout(predicate::str::contains("Unknown device attempting connection..."))
        .stdout(predicate::str::contains("Can you...hear me?"));
}

#[test]
fn play_full_run_reaches_ending() {
    let input = format!(
        "{INTRO}\
         yes\nA-C-B-D\nB\n\
         yes\n3420\nB\n\
         yes\nHELLO WORLD\nB\n\
         yes\nC\nB\n\
         yes\n3,4,5,1,2\nB\n\
         A\n\n"
    );
    play_offline(&input)
        .success()
        .stdout(predicate::str::contains("Name recorded: Ada"))
        .stdout(predicate::str::contains("Modules repaired: 5/5"))
        .stdout(predicate::str::contains("【Ending: Return to Command Center】"))
        .stdout(predicate::str::contains("=== Game Over ==="));
}

#[test]
fn play_failed_attempts_show_remaining() {
    let input = format!("{INTRO}yes\nB-C-D\n");
    play_offline(&input)
        .success()
        .stdout(predicate::str::contains("Start point must be A."))
        .stdout(predicate::str::contains("Attempts remaining: 2"));
}

#[test]
fn play_quit_ends_session() {
    play_offline("hello\nquit\nyes\n")
        .success()
        .stdout(predicate::str::contains("Session terminated by user."))
        .stdout(predicate::str::contains("Initializing identity verification").not());
}

#[test]
fn play_state_command_prints_json() {
    play_offline("/state\n")
        .success()
        .stdout(predicate::str::contains("\"stage\": \"first_contact\""))
        .stdout(predicate::str::contains("\"persona\": \"Calm_Conscientious\""));
}

#[test]
fn play_tone_flag_sets_voice() {
    tz().args(["play", "--offline", "--tone", "10"])
        .write_stdin("/state\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"persona\": \"Melancholic_Sober\""));
}

#[test]
fn play_journal_command() {
    let input = format!("{INTRO}/journal text\n");
    play_offline(&input)
        .success()
        .stdout(predicate::str::contains("TZ Session Journal"))
        .stdout(predicate::str::contains("Commander: Ada"));
}

#[test]
fn play_unknown_command() {
    play_offline("/warp\n")
        .success()
        .stdout(predicate::str::contains("unknown command: /warp"));
}

#[test]
fn play_json_mode() {
    tz().args(["play", "--offline", "--json"])
        .write_stdin("hello\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"quick_yes_no\":true"))
        .stdout(predicate::str::contains(
            "(communication glitch) Identity verification request...",
        ));
}

#[test]
fn play_rejects_unknown_persona() {
    tz().args(["play", "--offline", "--persona", "Cheerful"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: unknown persona: Cheerful"));
}

// ---------------------------------------------------------------------------
// tone
// ---------------------------------------------------------------------------

#[test]
fn tone_shows_voice() {
    tz().args(["tone", "80"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Controlled_Anger"))
        .stdout(predicate::str::contains("anger"))
        .stdout(predicate::str::contains("Intensity: 1.00"));
}

#[test]
fn tone_out_of_range() {
    tz().args(["tone", "150"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid tone: 150"));
}

// ---------------------------------------------------------------------------
// ending
// ---------------------------------------------------------------------------

#[test]
fn ending_return_to_command() {
    tz().args(["ending", "--modules", "4", "--deviation", "-0.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Return to Command Center"))
        .stdout(predicate::str::contains("return_to_command"));
}

#[test]
fn ending_failure() {
    tz().args(["ending", "-m", "1", "-d", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("failure_ending"));
}

#[test]
fn ending_rejects_too_many_modules() {
    tz().args(["ending", "--modules", "9", "--deviation", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("modules must be between 0 and 5"));
}
