use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn levit(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("levit").unwrap();
    cmd.current_dir(dir.path()).env("LEVIT_ROOT", dir.path());
    cmd
}

fn init_project(dir: &TempDir) {
    levit(dir).arg("init").assert().success();
}

// ---------------------------------------------------------------------------
// levit init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_directory_tree() {
    let dir = TempDir::new().unwrap();
    levit(&dir).arg("init").assert().success();

    assert!(dir.path().join(".levit").is_dir());
    assert!(dir.path().join(".levit/features").is_dir());
    assert!(dir.path().join(".levit/decisions").is_dir());
    assert!(dir.path().join(".levit/handoff").is_dir());
    assert!(dir.path().join(".levit/roles").is_dir());
    assert!(dir.path().join(".levit/workflows").is_dir());
    assert!(dir.path().join("SOCIAL_CONTRACT.md").exists());
    assert!(dir.path().join(".levit/AGENT_CONTRACT.md").exists());
    assert!(dir.path().join(".levit/AGENT_ONBOARDING.md").exists());
    assert!(dir.path().join(".levit/workflows/submit-for-review.md").exists());
    assert!(dir.path().join(".levit/features/README.md").exists());
    assert!(dir.path().join("levit.json").exists());
}

#[test]
fn init_is_idempotent() {
    let dir = TempDir::new().unwrap();
    levit(&dir).arg("init").assert().success();
    levit(&dir).arg("init").assert().success();
}

#[test]
fn init_preserves_edited_documents() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    std::fs::write(
        dir.path().join("SOCIAL_CONTRACT.md"),
        "# Our own contract\n",
    )
    .unwrap();
    levit(&dir).arg("init").assert().success();

    let content = std::fs::read_to_string(dir.path().join("SOCIAL_CONTRACT.md")).unwrap();
    assert_eq!(content, "# Our own contract\n");
}

#[test]
fn init_sets_project_name() {
    let dir = TempDir::new().unwrap();
    levit(&dir)
        .args(["init", "--name", "acme"])
        .assert()
        .success();

    let manifest = std::fs::read_to_string(dir.path().join("levit.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&manifest).unwrap();
    assert_eq!(json["project"]["name"], "acme");
}

// ---------------------------------------------------------------------------
// levit feature new / list / status
// ---------------------------------------------------------------------------

#[test]
fn feature_new_and_list() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    levit(&dir)
        .args(["feature", "new", "auth-login", "--title", "Auth Login"])
        .assert()
        .success()
        .stdout(predicate::str::contains("001-auth-login.md"));

    assert!(dir
        .path()
        .join(".levit/features/001-auth-login.md")
        .exists());

    levit(&dir)
        .args(["feature", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Auth Login"))
        .stdout(predicate::str::contains("001"));
}

#[test]
fn feature_ids_are_sequential() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    levit(&dir)
        .args(["feature", "new", "login"])
        .assert()
        .success();
    levit(&dir)
        .args(["feature", "new", "search"])
        .assert()
        .success()
        .stdout(predicate::str::contains("002-search.md"));
}

#[test]
fn feature_new_invalid_slug_fails() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    levit(&dir)
        .args(["feature", "new", "INVALID SLUG"])
        .assert()
        .failure();
}

#[test]
fn feature_new_duplicate_fails() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    levit(&dir)
        .args(["feature", "new", "auth", "--id", "001"])
        .assert()
        .success();
    levit(&dir)
        .args(["feature", "new", "auth", "--id", "001"])
        .assert()
        .failure();
}

#[test]
fn feature_status_updates_file_and_manifest() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    levit(&dir)
        .args(["feature", "new", "auth"])
        .assert()
        .success();
    levit(&dir)
        .args(["feature", "status", "001", "completed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("completed"));

    let content =
        std::fs::read_to_string(dir.path().join(".levit/features/001-auth.md")).unwrap();
    assert!(content.contains("status: completed"));

    levit(&dir)
        .args(["feature", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("completed"));
}

#[test]
fn feature_status_unknown_status_fails() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    levit(&dir)
        .args(["feature", "new", "auth"])
        .assert()
        .success();
    levit(&dir)
        .args(["feature", "status", "001", "bogus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected one of"));
}

#[test]
fn feature_list_json() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    levit(&dir)
        .args(["feature", "new", "auth", "--title", "Auth"])
        .assert()
        .success();

    let out = levit(&dir)
        .args(["--json", "feature", "list"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v[0]["id"], "001");
    assert_eq!(v[0]["slug"], "auth");
    assert_eq!(v[0]["status"], "active");
}

#[test]
fn commands_require_initialized_project() {
    let dir = TempDir::new().unwrap();

    levit(&dir)
        .args(["feature", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));
}

// ---------------------------------------------------------------------------
// levit decision new
// ---------------------------------------------------------------------------

#[test]
fn decision_new_creates_adr() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    levit(&dir)
        .args(["decision", "new", "Use Postgres"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ADR-001-use-postgres.md"));

    let content = std::fs::read_to_string(
        dir.path().join(".levit/decisions/ADR-001-use-postgres.md"),
    )
    .unwrap();
    assert!(content.contains("id: ADR-001"));
    assert!(content.contains("# ADR 001: Use Postgres"));
}

#[test]
fn decision_new_links_feature() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    levit(&dir)
        .args(["feature", "new", "auth"])
        .assert()
        .success();
    levit(&dir)
        .args(["decision", "new", "Use JWT", "--feature", "001"])
        .assert()
        .success();

    let content =
        std::fs::read_to_string(dir.path().join(".levit/decisions/ADR-001-use-jwt.md")).unwrap();
    assert!(content.contains("depends_on: [001]"));
}

// ---------------------------------------------------------------------------
// levit handoff new
// ---------------------------------------------------------------------------

#[test]
fn handoff_new_creates_document() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    levit(&dir)
        .args(["feature", "new", "auth"])
        .assert()
        .success();
    levit(&dir)
        .args(["handoff", "new", ".levit/features/001-auth.md", "builder"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".levit/handoff/"));

    let entries: Vec<_> = std::fs::read_dir(dir.path().join(".levit/handoff"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].ends_with("-001-auth-builder.md"));
}

#[test]
fn handoff_new_rejects_traversal() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    levit(&dir)
        .args(["handoff", "new", "evil..md.md", "builder"])
        .assert()
        .failure();
}

// ---------------------------------------------------------------------------
// levit sync
// ---------------------------------------------------------------------------

#[test]
fn sync_picks_up_manual_files() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    std::fs::write(
        dir.path().join(".levit/features/001-manual.md"),
        "---\nid: \"001\"\nstatus: draft\nowner: human\nlast_updated: 2026-08-29\nrisk_level: low\ndepends_on: []\n---\n\n# INTENT: Manual feature\n",
    )
    .unwrap();

    levit(&dir)
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 feature(s)"));

    levit(&dir)
        .args(["feature", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Manual feature"));
}

#[test]
fn sync_with_relative_root_keeps_features() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    levit(&dir)
        .args(["feature", "new", "auth"])
        .assert()
        .success();

    // A relative --root must behave exactly like an absolute one: the sync
    // still discovers the artifact instead of silently emptying the cache.
    Command::cargo_bin("levit")
        .unwrap()
        .current_dir(dir.path())
        .args(["--root", ".", "sync"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 feature(s)"));

    let manifest = std::fs::read_to_string(dir.path().join("levit.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&manifest).unwrap();
    assert_eq!(json["features"].as_array().unwrap().len(), 1);
}

#[test]
fn validate_with_relative_root_passes() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    levit(&dir)
        .args(["feature", "new", "auth"])
        .assert()
        .success();

    Command::cargo_bin("levit")
        .unwrap()
        .current_dir(dir.path())
        .args(["--root", ".", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("checks passed"));
}

#[test]
fn sync_preserves_project_section() {
    let dir = TempDir::new().unwrap();
    levit(&dir)
        .args(["init", "--name", "acme"])
        .assert()
        .success();

    levit(&dir).arg("sync").assert().success();

    let manifest = std::fs::read_to_string(dir.path().join("levit.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&manifest).unwrap();
    assert_eq!(json["project"]["name"], "acme");
}

// ---------------------------------------------------------------------------
// levit validate
// ---------------------------------------------------------------------------

#[test]
fn validate_fresh_project_passes_with_warning() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    levit(&dir)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("NO_FEATURES"))
        .stdout(predicate::str::contains("1 warning(s)"));
}

#[test]
fn validate_passes_cleanly_with_feature() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    levit(&dir)
        .args(["feature", "new", "auth"])
        .assert()
        .success();

    levit(&dir)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("checks passed"));
}

#[test]
fn validate_fails_on_missing_core_file() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    std::fs::remove_file(dir.path().join("SOCIAL_CONTRACT.md")).unwrap();

    levit(&dir)
        .arg("validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains("MISSING_FILE"))
        .stderr(predicate::str::contains("validation failed"));
}

#[test]
fn validate_fails_on_broken_frontmatter() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    std::fs::write(
        dir.path().join(".levit/features/001-broken.md"),
        "---\nid: \"001\"\nstatus: active\n\n# INTENT: never closed\n",
    )
    .unwrap();

    levit(&dir)
        .arg("validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains("INVALID_FRONTMATTER"));
}

#[test]
fn validate_fails_on_circular_dependency() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    let doc = |id: &str, dep: &str, title: &str| {
        format!(
            "---\nid: \"{id}\"\nstatus: active\nowner: human\nlast_updated: 2026-08-29\nrisk_level: low\ndepends_on: [\"{dep}\"]\n---\n\n# INTENT: {title}\n"
        )
    };
    std::fs::write(
        dir.path().join(".levit/features/001-a.md"),
        doc("001", "002", "A"),
    )
    .unwrap();
    std::fs::write(
        dir.path().join(".levit/features/002-b.md"),
        doc("002", "001", "B"),
    )
    .unwrap();

    levit(&dir)
        .arg("validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains("CIRCULAR_DEPENDENCY"))
        .stdout(predicate::str::contains("->"));
}

#[test]
fn validate_fails_on_unknown_dependency() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    std::fs::write(
        dir.path().join(".levit/features/001-a.md"),
        "---\nid: \"001\"\nstatus: active\nowner: human\nlast_updated: 2026-08-29\nrisk_level: low\ndepends_on: [\"999\"]\n---\n\n# INTENT: A\n",
    )
    .unwrap();

    levit(&dir)
        .arg("validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains("INVALID_DEPENDENCY"))
        .stdout(predicate::str::contains("999"));
}

#[test]
fn validate_json_output() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    let out = levit(&dir)
        .args(["--json", "validate"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["valid"], true);
    assert_eq!(v["metrics"]["warnings"], 1);
    assert_eq!(v["issues"][0]["code"], "NO_FEATURES");
    assert_eq!(v["issues"][0]["type"], "warning");
}

#[test]
fn validate_json_output_on_failure() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    std::fs::remove_file(dir.path().join(".levit/AGENT_CONTRACT.md")).unwrap();

    let out = levit(&dir)
        .args(["--json", "validate"])
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["valid"], false);
    assert!(v["metrics"]["errors"].as_u64().unwrap() >= 1);
}

#[test]
fn validate_reports_forbidden_pattern() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    levit(&dir)
        .args(["feature", "new", "auth"])
        .assert()
        .success();

    let manifest = std::fs::read_to_string(dir.path().join("levit.json")).unwrap();
    let mut json: serde_json::Value = serde_json::from_str(&manifest).unwrap();
    json["constraints"]["forbidden_patterns"] = serde_json::json!(["DO-NOT-COMMIT"]);
    std::fs::write(
        dir.path().join("levit.json"),
        serde_json::to_string_pretty(&json).unwrap(),
    )
    .unwrap();
    std::fs::write(dir.path().join("notes.md"), "DO-NOT-COMMIT: secret\n").unwrap();

    levit(&dir)
        .arg("validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains("FORBIDDEN_PATTERN"))
        .stdout(predicate::str::contains("notes.md"));
}

// ---------------------------------------------------------------------------
// E2E: full project lifecycle
// ---------------------------------------------------------------------------

#[test]
fn e2e_init_to_validated_project() {
    let dir = TempDir::new().unwrap();

    levit(&dir)
        .args(["init", "--name", "shop"])
        .assert()
        .success();

    levit(&dir)
        .args(["feature", "new", "catalog", "--title", "Product Catalog"])
        .assert()
        .success();
    levit(&dir)
        .args(["feature", "new", "checkout", "--title", "Checkout"])
        .assert()
        .success();

    levit(&dir)
        .args(["decision", "new", "Use Postgres", "--feature", "001"])
        .assert()
        .success();

    levit(&dir)
        .args(["handoff", "new", ".levit/features/002-checkout.md", "builder"])
        .assert()
        .success();

    levit(&dir).arg("validate").assert().success();

    let out = levit(&dir)
        .args(["--json", "validate"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["valid"], true);
    // Two features, one decision, one handoff
    assert_eq!(v["metrics"]["filesScanned"], 4);

    levit(&dir)
        .args(["feature", "status", "001", "completed"])
        .assert()
        .success();
    levit(&dir)
        .args(["feature", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("completed"))
        .stdout(predicate::str::contains("Checkout"));
}
