#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn plants(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("plants").unwrap();
    cmd.current_dir(dir.path()).env("PLANTS_ROOT", dir.path());
    cmd
}

fn init(dir: &TempDir) {
    plants(dir).arg("init").assert().success();
}

fn json_output(cmd: &mut Command) -> serde_json::Value {
    let out = cmd.arg("--json").assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).unwrap()
}

fn add_fern(dir: &TempDir) -> String {
    let added = json_output(plants(dir).args([
        "add",
        "--name",
        "Fern",
        "--species",
        "Nephrolepis",
        "--frequency",
        "3",
    ]));
    added["id"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// plants init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_tree_and_seeds() {
    let dir = TempDir::new().unwrap();
    plants(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("seeded:  3 sample plants"));

    assert!(dir.path().join(".plants/config.yaml").exists());
    assert!(dir
        .path()
        .join(".plants/data/plant-care-tracker-data.json")
        .exists());
}

#[test]
fn init_is_idempotent() {
    let dir = TempDir::new().unwrap();
    init(&dir);
    plants(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("exists:  3 plants"));
}

// ---------------------------------------------------------------------------
// list / show
// ---------------------------------------------------------------------------

#[test]
fn list_seed_plants() {
    let dir = TempDir::new().unwrap();
    init(&dir);
    let list = json_output(plants(&dir).arg("list"));
    let names: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Monstera Deliciosa", "Snake Plant", "Peace Lily"]);
}

#[test]
fn list_needing_shows_overdue_seed_plant() {
    let dir = TempDir::new().unwrap();
    init(&dir);
    let needing = json_output(plants(&dir).args(["list", "--needing"]));
    let needing = needing.as_array().unwrap();
    assert_eq!(needing.len(), 1);
    assert_eq!(needing[0]["id"], "1");
    assert_eq!(needing[0]["needsWater"], true);
    assert_eq!(needing[0]["status"], "Needs water now!");
}

#[test]
fn list_table_has_headers() {
    let dir = TempDir::new().unwrap();
    init(&dir);
    plants(&dir)
        .args(["list", "--healthy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("LAST WATERED"))
        .stdout(predicate::str::contains("Snake Plant"))
        .stdout(predicate::str::contains("Monstera").not());
}

#[test]
fn show_unknown_plant_fails() {
    let dir = TempDir::new().unwrap();
    init(&dir);
    plants(&dir)
        .args(["show", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("plant 'nope' not found"));
}

// ---------------------------------------------------------------------------
// add / update / water / favorite / remove
// ---------------------------------------------------------------------------

#[test]
fn add_then_water() {
    let dir = TempDir::new().unwrap();
    init(&dir);
    let id = add_fern(&dir);

    let watered = json_output(plants(&dir).args(["water", &id]));
    assert_eq!(watered["daysSinceWatered"], 0);
    assert_eq!(watered["needsWater"], false);
    assert_eq!(watered["daysUntilNextWatering"], 3);

    let shown = json_output(plants(&dir).args(["show", &id]));
    assert_eq!(shown["name"], "Fern");
    assert_eq!(shown["wateringFrequency"], 3);
}

#[test]
fn add_with_past_watering_needs_water() {
    let dir = TempDir::new().unwrap();
    init(&dir);
    let added = json_output(plants(&dir).args([
        "add",
        "--name",
        "Cactus",
        "--species",
        "Cactaceae",
        "--frequency",
        "14",
        "--last-watered",
        "2020-01-01",
    ]));
    assert_eq!(added["needsWater"], true);
}

#[test]
fn add_empty_name_fails() {
    let dir = TempDir::new().unwrap();
    init(&dir);
    plants(&dir)
        .args(["add", "--name", "", "--species", "Fern", "--frequency", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("name must not be empty"));
}

#[test]
fn add_zero_frequency_fails() {
    let dir = TempDir::new().unwrap();
    init(&dir);
    plants(&dir)
        .args(["add", "--name", "Fern", "--species", "Fern", "--frequency", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("watering frequency"));
}

#[test]
fn update_nonexistent_fails() {
    let dir = TempDir::new().unwrap();
    init(&dir);
    plants(&dir)
        .args(["update", "nonexistent-id", "--name", "Ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("plant not found: nonexistent-id"));
}

#[test]
fn update_changes_and_clears_fields() {
    let dir = TempDir::new().unwrap();
    init(&dir);
    let updated = json_output(plants(&dir).args([
        "update",
        "2",
        "--name",
        "Mother-in-law's Tongue",
        "--clear-notes",
    ]));
    assert_eq!(updated["name"], "Mother-in-law's Tongue");
    assert!(updated.get("notes").is_none());
    assert_eq!(updated["species"], "Sansevieria trifasciata");
}

#[test]
fn favorite_toggles() {
    let dir = TempDir::new().unwrap();
    init(&dir);
    plants(&dir)
        .args(["favorite", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added Peace Lily to favorites"));
    let favorites = json_output(plants(&dir).args(["list", "--favorites"]));
    assert_eq!(favorites.as_array().unwrap().len(), 1);

    plants(&dir)
        .args(["favorite", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed Peace Lily from favorites"));
}

#[test]
fn remove_twice_succeeds() {
    let dir = TempDir::new().unwrap();
    init(&dir);
    plants(&dir)
        .args(["remove", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed plant [1]"));
    plants(&dir)
        .args(["remove", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No plant with id [1]"));

    let list = json_output(plants(&dir).arg("list"));
    assert_eq!(list.as_array().unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// dashboard / report / activity
// ---------------------------------------------------------------------------

#[test]
fn dashboard_counts() {
    let dir = TempDir::new().unwrap();
    init(&dir);
    let dash = json_output(plants(&dir).arg("dashboard"));
    assert_eq!(dash["counts"]["total"], 3);
    assert_eq!(dash["counts"]["needing_water"], 1);
    assert_eq!(dash["metrics"]["completion_rate"], 67);
}

#[test]
fn report_written_to_file() {
    let dir = TempDir::new().unwrap();
    init(&dir);
    plants(&dir).args(["water", "1"]).assert().success();
    let out = dir.path().join("PROGRESS.md");
    plants(&dir)
        .args(["report", "--output"])
        .arg(&out)
        .assert()
        .success();
    let md = std::fs::read_to_string(&out).unwrap();
    assert!(md.contains("# Plant Care Tracker - Progress Report"));
    assert!(md.contains("Watered plant (Monstera Deliciosa)"));
}

#[test]
fn activity_lists_commands() {
    let dir = TempDir::new().unwrap();
    init(&dir);
    let id = add_fern(&dir);
    plants(&dir).args(["water", &id]).assert().success();
    let log = json_output(plants(&dir).arg("activity"));
    let actions: Vec<&str> = log
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["action"].as_str().unwrap())
        .collect();
    assert_eq!(actions, ["Watered plant", "Added plant"]);
}

// ---------------------------------------------------------------------------
// auth / config
// ---------------------------------------------------------------------------

const AUTH_CONFIG: &str = r#"
auth:
  required: true
  users:
    - id: "u1"
      email: ana@example.com
      name: Ana
      role: admin
      password: hunter2
"#;

#[test]
fn login_gates_plant_commands() {
    let dir = TempDir::new().unwrap();
    init(&dir);
    std::fs::write(dir.path().join(".plants/config.yaml"), AUTH_CONFIG).unwrap();

    plants(&dir)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not logged in"));

    plants(&dir)
        .args(["login", "--email", "ana@example.com", "--password", "wrong"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid email or password"));

    plants(&dir)
        .args(["login", "--email", "ana@example.com", "--password", "hunter2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as Ana"));

    plants(&dir).arg("list").assert().success();
    plants(&dir)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ana <ana@example.com> (admin)"));

    plants(&dir).arg("logout").assert().success();
    plants(&dir).arg("list").assert().failure();
}

#[test]
fn config_validate_reports_errors() {
    let dir = TempDir::new().unwrap();
    init(&dir);
    plants(&dir)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config OK"));

    std::fs::write(
        dir.path().join(".plants/config.yaml"),
        "auth:\n  required: true\n",
    )
    .unwrap();
    plants(&dir)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("no users are configured"));
}
