//! Integration tests for the `slots` CLI binary.
//!
//! These use `assert_cmd` and `predicates` to run every subcommand through the
//! actual binary against the JSON fixtures in `tests/fixtures/`.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

/// Helper: path to the settings.json fixture (10:00-13:00, 45-minute meetings).
fn settings_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/settings.json")
}

/// Helper: path to the invalid_settings.json fixture.
fn invalid_settings_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/invalid_settings.json")
}

/// Helper: path to the bookings.json fixture.
fn bookings_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/bookings.json")
}

fn slots() -> Command {
    Command::cargo_bin("slots").unwrap()
}

/// Run the command, assert success, and parse stdout as JSON.
fn run_json(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("stdout must be valid JSON")
}

fn labels(response: &Value) -> Vec<(String, bool)> {
    response["availableSlots"]
        .as_array()
        .expect("availableSlots must be an array")
        .iter()
        .map(|s| {
            (
                s["label"].as_str().unwrap().to_string(),
                s["available"].as_bool().unwrap(),
            )
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// available
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn available_with_defaults_and_no_bookings() {
    let response = run_json(slots().args(["available", "--date", "2026-03-16"]));

    let slots = labels(&response);
    assert_eq!(slots.len(), 7);
    assert_eq!(slots[0], ("09:00".to_string(), true));
    assert_eq!(slots[6].0, "16:30");
    assert_eq!(response["effectiveConfig"]["start"], "09:00");
    assert_eq!(response["effectiveConfig"]["meetingDurationMinutes"], 60);
}

#[test]
fn available_marks_pending_and_confirmed_bookings() {
    let response = run_json(slots().args([
        "available",
        "--date",
        "2026-03-16",
        "--bookings",
        bookings_path(),
    ]));

    let unavailable: Vec<String> = labels(&response)
        .into_iter()
        .filter(|(_, available)| !available)
        .map(|(label, _)| label)
        .collect();
    // 09:00 is confirmed, 11:30 pending; the cancelled 14:00 booking is ignored.
    assert_eq!(unavailable, vec!["09:00", "11:30"]);
}

#[test]
fn available_uses_settings_file() {
    let response = run_json(slots().args([
        "available",
        "--date",
        "2026-03-16",
        "--settings",
        settings_path(),
        "--bookings",
        bookings_path(),
    ]));

    assert_eq!(
        labels(&response),
        vec![
            ("10:00".to_string(), true),
            ("11:00".to_string(), false),
            ("12:00".to_string(), false),
        ]
    );
    assert_eq!(response["effectiveConfig"]["meetingDurationMinutes"], 45);
}

#[test]
fn pretty_output_is_indented() {
    slots()
        .args(["available", "--date", "2026-03-16", "--pretty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\n  \"availableSlots\""));
}

#[test]
fn invalid_date_fails() {
    slots()
        .args(["available", "--date", "2026-13-40"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --date"));
}

#[test]
fn missing_date_fails() {
    slots()
        .arg("available")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--date"));
}

#[test]
fn invalid_settings_fail() {
    slots()
        .args([
            "available",
            "--date",
            "2026-03-16",
            "--settings",
            invalid_settings_path(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid time of day"));
}

#[test]
fn missing_bookings_file_fails() {
    slots()
        .args([
            "available",
            "--date",
            "2026-03-16",
            "--bookings",
            "/nonexistent/bookings.json",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// day-status
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn day_status_with_default_settings() {
    let status = run_json(slots().args([
        "day-status",
        "--date",
        "2026-03-16",
        "--bookings",
        bookings_path(),
    ]));

    assert_eq!(status["totalSlotCount"], 7);
    assert_eq!(status["occupiedSlotCount"], 2);
    assert_eq!(status["availableSlotCount"], 5);
    assert_eq!(status["occupationRatePercent"], 29);
    assert_eq!(status["status"], "mixed");
    assert_eq!(status["hasPending"], true);
    assert_eq!(status["hasConfirmed"], true);
}

#[test]
fn day_status_with_settings_file() {
    let status = run_json(slots().args([
        "day-status",
        "--date",
        "2026-03-16",
        "--settings",
        settings_path(),
        "--bookings",
        bookings_path(),
    ]));

    assert_eq!(status["totalSlotCount"], 3);
    assert_eq!(status["occupationRatePercent"], 67);
    assert_eq!(status["status"], "mixed");
}

#[test]
fn day_status_on_weekend() {
    let status = run_json(slots().args(["day-status", "--date", "2026-03-21"]));

    assert_eq!(status["status"], "non_working");
    assert_eq!(status["isWorkingDay"], false);
    assert_eq!(status["totalSlotCount"], 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// check
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn check_free_start_prints_ok() {
    slots()
        .args([
            "check",
            "--start",
            "2026-03-16T10:15:00Z",
            "--bookings",
            bookings_path(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::diff("ok\n"));
}

#[test]
fn check_conflicting_start_fails() {
    slots()
        .args([
            "check",
            "--start",
            "2026-03-16T11:00:00Z",
            "--bookings",
            bookings_path(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Booking rejected"))
        .stderr(predicate::str::contains("conflicts with booking"));
}

#[test]
fn check_outside_working_hours_fails() {
    slots()
        .args(["check", "--start", "2026-03-16T18:00:00Z"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside working hours"));
}

#[test]
fn check_invalid_start_fails() {
    slots()
        .args(["check", "--start", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --start"));
}

// ─────────────────────────────────────────────────────────────────────────────
// defaults / logging
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn defaults_prints_canonical_record() {
    let defaults = run_json(slots().arg("defaults"));

    assert_eq!(defaults["workingHoursStart"], "09:00");
    assert_eq!(defaults["workingHoursEnd"], "18:00");
    assert_eq!(defaults["meetingDuration"], 60);
    assert_eq!(defaults["bufferTime"], 15);
    assert_eq!(defaults["workingDays"], serde_json::json!([1, 2, 3, 4, 5]));
    assert_eq!(defaults["timezone"], "UTC");
}

#[test]
fn verbose_logs_to_stderr_only() {
    let output = slots()
        .args(["--verbose", "day-status", "--date", "2026-03-16"])
        .assert()
        .success()
        .stderr(predicate::str::contains("classified day"))
        .get_output()
        .stdout
        .clone();

    let status: Value = serde_json::from_slice(&output).expect("stdout must stay pure JSON");
    assert_eq!(status["status"], "available");
}
