use std::fmt::Write as _;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn budgetwise(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("budgetwise").unwrap();
    cmd.env("BUDGETWISE_DATA_DIR", data_dir.path());
    cmd
}

fn add_user(data_dir: &TempDir) {
    budgetwise(data_dir)
        .args(["user", "add", "Ana Lima", "ana@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered user: Ana Lima <ana@example.com>"));
}

#[test]
fn help_lists_commands() {
    let data_dir = TempDir::new().unwrap();
    budgetwise(&data_dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("allocate"))
        .stdout(predicate::str::contains("forecast"));
}

#[test]
fn init_writes_config() {
    let data_dir = TempDir::new().unwrap();
    budgetwise(&data_dir).arg("init").assert().success();
    assert!(data_dir.path().join("config.json").exists());

    budgetwise(&data_dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized:      true"));
}

#[test]
fn user_add_and_list() {
    let data_dir = TempDir::new().unwrap();
    add_user(&data_dir);

    budgetwise(&data_dir)
        .args(["user", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ana@example.com"));

    budgetwise(&data_dir)
        .args(["user", "add", "Someone Else", "ANA@example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn expense_over_budget_is_rejected() {
    let data_dir = TempDir::new().unwrap();
    add_user(&data_dir);

    budgetwise(&data_dir)
        .args(["budget", "set", "ana@example.com", "100", "--period", "2025-11"])
        .assert()
        .success();

    budgetwise(&data_dir)
        .args([
            "expense", "add", "ana@example.com", "60", "-c", "food", "--date", "2025-11-03",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged $60.00 for Food & Dining"));

    budgetwise(&data_dir)
        .args([
            "expense", "add", "ana@example.com", "50", "-c", "shopping", "--date", "2025-11-04",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Budget exceeded for 2025-11"))
        .stderr(predicate::str::contains("would exceed by $10.00"));

    budgetwise(&data_dir)
        .args(["budget", "show", "ana@example.com", "--period", "2025-11"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$40.00"));
}

#[test]
fn import_then_list_and_stats() {
    let data_dir = TempDir::new().unwrap();
    add_user(&data_dir);

    let csv_path = data_dir.path().join("history.csv");
    std::fs::write(
        &csv_path,
        "Date,Amount,Category,Description\n\
         2025-10-01,1200,bills,Rent\n\
         2025-10-02,45.10,food,Groceries\n\
         oops,1,food,\n",
    )
    .unwrap();

    budgetwise(&data_dir)
        .args(["expense", "import", "ana@example.com"])
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 expense(s)"))
        .stdout(predicate::str::contains("1 row(s) skipped"));

    budgetwise(&data_dir)
        .args(["expense", "list", "ana@example.com", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-10-02,Food & Dining,45.10,Groceries"));

    budgetwise(&data_dir)
        .args(["expense", "stats", "ana@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Largest:"))
        .stdout(predicate::str::contains("$1200.00"));
}

#[test]
fn allocate_from_history_as_json() {
    let data_dir = TempDir::new().unwrap();
    add_user(&data_dir);

    let output = budgetwise(&data_dir)
        .args([
            "allocate",
            "ana@example.com",
            "2500",
            "--period",
            "2025-12",
            "--no-forecast",
            "--format",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["period"], "2025-12");
    let allocations = value["allocations"].as_array().unwrap();
    let total: i64 = allocations
        .iter()
        .map(|a| a["amount"].as_i64().unwrap())
        .sum();
    assert_eq!(total, 250_000);
    assert_eq!(allocations[0]["reason"], "fallback_equal");
}

#[test]
fn allocate_with_forecast_needs_a_model() {
    let data_dir = TempDir::new().unwrap();
    add_user(&data_dir);

    budgetwise(&data_dir)
        .args(["allocate", "ana@example.com", "2500", "--period", "2025-12"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Forecast unavailable"));
}

#[test]
fn forecast_train_from_csv_then_allocate() {
    let data_dir = TempDir::new().unwrap();
    add_user(&data_dir);

    let mut csv = String::from("Date,Amount\n");
    for day in 1..=28 {
        writeln!(csv, "2025-09-{:02},25.00", day).unwrap();
    }
    let csv_path = data_dir.path().join("daily.csv");
    std::fs::write(&csv_path, csv).unwrap();

    budgetwise(&data_dir)
        .args(["forecast", "train", "ana@example.com", "--csv"])
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("on 28 days"));

    budgetwise(&data_dir)
        .args(["forecast", "show", "ana@example.com", "--days", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-09-29"))
        .stdout(predicate::str::contains("Expected total over 7 day(s): $175.00"));

    budgetwise(&data_dir)
        .args([
            "allocate", "ana@example.com", "2000", "--period", "2025-12", "--save", "--format", "csv",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Period,Category,Amount,Percentage,Reason"))
        .stdout(predicate::str::contains("forecast"));

    budgetwise(&data_dir)
        .args(["audit", "--count", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ForecastModel"))
        .stdout(predicate::str::contains("Allocation"));
}

#[test]
fn malformed_amounts_are_rejected_cleanly() {
    let data_dir = TempDir::new().unwrap();
    add_user(&data_dir);

    for amount in ["1.€", "922337203685477580", "1.-5"] {
        budgetwise(&data_dir)
            .args(["allocate", "ana@example.com", amount, "--no-forecast"])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("Invalid money format"));
    }
}
