use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn gymdb(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("gymdb").unwrap();
    cmd.current_dir(dir);
    cmd.env_remove("GYMDB_DATABASE");
    cmd
}

fn seeded() -> TempDir {
    let dir = TempDir::new().unwrap();
    gymdb(&dir).args(["init", "--seed"]).assert().success();
    dir
}

#[test]
fn test_init_creates_default_database() {
    let dir = TempDir::new().unwrap();

    gymdb(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized gym database"))
        .stdout(predicate::str::contains("Created 8 tables"));
    assert!(dir.path().join("XYZGym.sqlite").exists());

    gymdb(&dir)
        .arg("init")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: Database schema already exists"));
}

#[test]
fn test_commands_before_init_fail() {
    let dir = TempDir::new().unwrap();

    gymdb(&dir)
        .args(["member", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("gymdb init"));
    assert!(!dir.path().join("XYZGym.sqlite").exists());
}

#[test]
fn test_seeded_stats() {
    let dir = seeded();

    let output = gymdb(&dir).args(["stats", "--json"]).output().unwrap();
    assert!(output.status.success());
    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    let tables = stats["tables"].as_array().unwrap();
    assert_eq!(tables.len(), 8);
    assert_eq!(tables[0]["table"], "Member");
    assert_eq!(tables[7]["table"], "Attends");
    assert!(tables.iter().all(|t| t["rows"] == 5));
    assert_eq!(stats["foreign_key_violations"].as_array().unwrap().len(), 0);

    gymdb(&dir)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Foreign keys: OK"));
}

#[test]
fn test_seed_requires_empty_tables() {
    let dir = seeded();

    gymdb(&dir)
        .arg("seed")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Table Member already contains rows"));

    gymdb(&dir)
        .arg("reset")
        .assert()
        .success()
        .stdout(predicate::str::contains("Reset gym database"));

    gymdb(&dir)
        .args(["member", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No members found"));

    gymdb(&dir)
        .arg("seed")
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded 40 seed rows"));
}

#[test]
fn test_db_flag_and_env() {
    let dir = TempDir::new().unwrap();

    gymdb(&dir)
        .args(["--db", "custom.sqlite", "init", "--seed"])
        .assert()
        .success();
    assert!(dir.path().join("custom.sqlite").exists());
    assert!(!dir.path().join("XYZGym.sqlite").exists());

    gymdb(&dir)
        .env("GYMDB_DATABASE", "custom.sqlite")
        .args(["gym", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Downtown"));
}

#[test]
fn test_member_rules() {
    let dir = seeded();

    gymdb(&dir)
        .args([
            "member", "add", "--name", "Kid", "--email", "kid@example.com", "--age", "14",
            "--start", "2025-01-01", "--end", "2025-06-30",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 15"));

    gymdb(&dir)
        .args([
            "member", "add", "--name", "Teen", "--email", "teen@example.com", "--age", "15",
            "--start", "2025-01-01", "--end", "2025-06-30",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added member #6: Teen"));

    gymdb(&dir)
        .args([
            "member", "add", "--name", "Copy", "--email", "alice.johnson@example.com", "--age",
            "30", "--start", "2025-01-01", "--end", "2025-06-30",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already associated"));

    gymdb(&dir)
        .args([
            "member", "add", "--name", "Backwards", "--email", "back@example.com", "--age", "30",
            "--start", "2025-06-30", "--end", "2025-06-30",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be later than start date"));
}

#[test]
fn test_member_add_with_payment_and_unknown_plan() {
    let dir = seeded();

    gymdb(&dir)
        .args([
            "member", "add", "--name", "Zoe", "--email", "zoe@example.com", "--age", "22",
            "--start", "2025-04-01", "--end", "2026-04-01", "--plan", "2", "--amount", "499.99",
            "--paid-on", "2025-04-01",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added member #6: Zoe"))
        .stdout(predicate::str::contains("Payment #6: plan #2, 499.99"));

    gymdb(&dir)
        .args([
            "member", "add", "--name", "Ghost", "--email", "ghost@example.com", "--age", "22",
            "--start", "2025-04-01", "--end", "2026-04-01", "--plan", "9", "--amount", "10",
            "--paid-on", "2025-04-01",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Membership plan #9 not found"))
        .stderr(predicate::str::contains("Available plans: #1, #2, #3, #4, #5"));

    // the failed registration left no member behind
    gymdb(&dir)
        .args(["member", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ghost@example.com").not());
}

#[test]
fn test_member_update_show_and_delete() {
    let dir = seeded();

    gymdb(&dir)
        .args(["member", "update", "2", "--end", "2025-08-01", "--phone", "555-9999"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated member #2: Brian Smith"));

    gymdb(&dir)
        .args(["member", "show", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("555-9999"))
        .stdout(predicate::str::contains("2025-02-01 to 2025-08-01"));

    gymdb(&dir)
        .args(["member", "delete", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted member #2"));

    // payments and attendance went with the member
    let output = gymdb(&dir).args(["--json", "payment", "list"]).output().unwrap();
    let payments: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let payments = payments.as_array().unwrap();
    assert_eq!(payments.len(), 4);
    assert!(payments.iter().all(|p| p["member_id"] != 2));

    gymdb(&dir)
        .args(["member", "show", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Member #2 not found"));
}

#[test]
fn test_member_plans_listing() {
    let dir = seeded();

    gymdb(&dir)
        .args(["member", "plans"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice Johnson"))
        .stdout(predicate::str::contains("Annual"));
}

#[test]
fn test_class_types_are_checked() {
    let dir = seeded();

    gymdb(&dir)
        .args([
            "class", "add", "--name", "Spin", "--type", "Spinning", "--duration", "45",
            "--capacity", "12", "--instructor", "2", "--gym", "1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Spinning"));

    gymdb(&dir)
        .args([
            "class", "add", "--name", "Lunch HIIT", "--type", "HIIT", "--duration", "30",
            "--capacity", "12", "--instructor", "2", "--gym", "1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added class #6: Lunch HIIT (HIIT)"));

    gymdb(&dir)
        .args([
            "class", "add", "--name", "Nowhere", "--type", "Yoga", "--duration", "30",
            "--capacity", "12", "--instructor", "1", "--gym", "42",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Gym #42 not found"));
}

#[test]
fn test_class_delete_moves_attendees() {
    let dir = seeded();

    gymdb(&dir)
        .args(["class", "delete", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--move-to"));

    gymdb(&dir)
        .args(["class", "delete", "1", "--move-to", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved 2 attendance record(s) to class #5"))
        .stdout(predicate::str::contains("Deleted class #1: Morning Flow"));

    gymdb(&dir)
        .args(["class", "roster", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice Johnson"))
        .stdout(predicate::str::contains("Emma Brown"));
}

#[test]
fn test_class_attendance_listing() {
    let dir = seeded();

    gymdb(&dir)
        .args(["class", "attend", "2", "3", "--date", "2025-03-12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded member #3 in class #2 on 2025-03-12"));

    let output = gymdb(&dir)
        .args(["class", "list", "--attendance", "--json"])
        .output()
        .unwrap();
    let classes: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let cardio = classes
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["id"] == 2)
        .unwrap();
    assert_eq!(cardio["attendees"], 2);

    gymdb(&dir)
        .args(["class", "attend", "2", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Member #99 not found"));
}

#[test]
fn test_equipment_quantity_must_be_positive() {
    let dir = seeded();

    gymdb(&dir)
        .args([
            "equipment", "add", "--name", "Bike", "--type", "Cardio", "--quantity", "0", "--gym",
            "1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("quantity must be positive"));

    gymdb(&dir)
        .args([
            "equipment", "add", "--name", "Bike", "--type", "Cardio", "--quantity", "3", "--gym",
            "1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added equipment #6: Bike x3"));

    gymdb(&dir)
        .args(["equipment", "delete", "6"])
        .assert()
        .success();

    gymdb(&dir)
        .args(["equipment", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rowing Machine"))
        .stdout(predicate::str::contains("Bike").not());
}

#[test]
fn test_reference_listings() {
    let dir = seeded();

    gymdb(&dir)
        .args(["plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Monthly"))
        .stdout(predicate::str::contains("499.99"));

    gymdb(&dir)
        .args(["instructor", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sarah Lin"));

    gymdb(&dir)
        .args(["attendance", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-02-10"));
}

#[test]
fn test_schema_script() {
    let dir = TempDir::new().unwrap();

    gymdb(&dir)
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("DROP TABLE IF EXISTS Attends;"))
        .stdout(predicate::str::contains("CREATE TABLE Member"))
        .stdout(predicate::str::contains("INSERT INTO").not());

    gymdb(&dir)
        .args(["schema", "--with-fixtures"])
        .assert()
        .success()
        .stdout(predicate::str::contains("'David O''Neil'"));

    // printing the script never touches the database
    assert!(!dir.path().join("XYZGym.sqlite").exists());
}
