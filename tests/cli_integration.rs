//! CLI integration tests for SynapseFlow
//!
//! These tests run the `synapse` binary end to end: reading outlines from
//! files and stdin, writing definitions, and the error paths of rendering.

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command instance for the synapse binary
fn synapse_cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("synapse"));
    cmd.env_remove("SYNAPSE_CONFIG");
    cmd
}

/// Create a temporary directory holding an outline file
fn setup_outline(content: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("outline.txt"), content).unwrap();
    dir
}

// =============================================================================
// Transpile Tests
// =============================================================================

#[test]
fn test_transpile_from_stdin() {
    let dir = TempDir::new().unwrap();

    synapse_cmd()
        .current_dir(dir.path())
        .arg("transpile")
        .write_stdin("PROBLEM:\nA\nDOMAIN:\nB\n")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("classDiagram\n    direction BT\n"))
        .stdout(predicate::str::contains("    class Step1_Problem {\n      A\n    }"))
        .stdout(predicate::str::contains("    class Step2_Domain {\n      B\n    }"))
        .stdout(predicate::str::contains("    Step2_Domain <-- Step1_Problem"));
}

#[test]
fn test_transpile_empty_input_keeps_skeleton() {
    let dir = TempDir::new().unwrap();

    synapse_cmd()
        .current_dir(dir.path())
        .args(["transpile", "-"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("class Step5_Solution {\n    }"))
        .stdout(predicate::str::contains(
            "Step5_Solution <-- Step4_Resource_Component",
        ));
}

#[test]
fn test_transpile_sanitizes_default_section() {
    let dir = setup_outline("(x): y:z\n");

    synapse_cmd()
        .current_dir(dir.path())
        .args(["transpile", "outline.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("class Step1_Problem {\n      [x]= y=z\n    }"));
}

#[test]
fn test_transpile_writes_out_file() {
    let dir = setup_outline("SOLUTION:\nship it\n");

    synapse_cmd()
        .current_dir(dir.path())
        .args(["transpile", "outline.txt", "--out", "build/diagram.mmd"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote diagram to"));

    let written = fs::read_to_string(dir.path().join("build/diagram.mmd")).unwrap();
    assert!(written.contains("class Step5_Solution {\n      ship it\n    }"));
}

#[test]
fn test_transpile_json_output() {
    let dir = setup_outline("PROBLEM:\nA\nSKILL:\n(Skill): Rust\n");

    let output = synapse_cmd()
        .current_dir(dir.path())
        .args(["transpile", "outline.txt", "--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(json["sections"]["problem"], serde_json::json!(["A"]));
    assert_eq!(json["sections"]["resource"], serde_json::json!(["[Skill]= Rust"]));
    assert_eq!(json["sections"]["solution"], serde_json::json!([]));
    assert!(json["diagram"].as_str().unwrap().starts_with("classDiagram"));
    assert_eq!(json["warnings"], serde_json::json!([]));
}

#[test]
fn test_transpile_warns_about_braces() {
    let dir = setup_outline("map {a}\n");

    synapse_cmd()
        .current_dir(dir.path())
        .args(["transpile", "outline.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("      map {a}\n"))
        .stderr(predicate::str::contains("Warning: problem line 1"));
}

#[test]
fn test_transpile_strict_escapes_braces() {
    let dir = setup_outline("map {a}\n");

    synapse_cmd()
        .current_dir(dir.path())
        .args(["transpile", "outline.txt", "--strict"])
        .assert()
        .success()
        .stdout(predicate::str::contains("      map [a]\n"))
        .stderr(predicate::str::contains("Warning").not());
}

#[test]
fn test_transpile_strict_from_config() {
    let dir = setup_outline("map {a}\n");
    fs::write(
        dir.path().join("synapse.toml"),
        "[transpile]\nescaping = \"strict\"\n",
    )
    .unwrap();

    synapse_cmd()
        .current_dir(dir.path())
        .args(["transpile", "outline.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("      map [a]\n"));
}

#[test]
fn test_transpile_missing_file_fails() {
    let dir = TempDir::new().unwrap();

    synapse_cmd()
        .current_dir(dir.path())
        .args(["transpile", "nope.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read outline"));
}

// =============================================================================
// Sections Tests
// =============================================================================

#[test]
fn test_sections_lists_buckets() {
    let dir = setup_outline("intro\nANALYSIS:\nWHO: students\nRESOURCE:\nReact\n");

    synapse_cmd()
        .current_dir(dir.path())
        .args(["sections", "outline.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PROBLEM (1)\n  intro\n"))
        .stdout(predicate::str::contains("DOMAIN (0)\n"))
        .stdout(predicate::str::contains("ANALYSIS (1)\n  WHO= students\n"))
        .stdout(predicate::str::contains("RESOURCE (1)\n  React\n"))
        .stdout(predicate::str::contains("SOLUTION (0)"));
}

// =============================================================================
// Render Tests
// =============================================================================

#[test]
fn test_render_definition_target() {
    let dir = setup_outline("PROBLEM:\nA\n");

    synapse_cmd()
        .current_dir(dir.path())
        .args(["render", "outline.txt", "--out", "diagram.mmd"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered outline.txt to diagram.mmd"));

    let written = fs::read_to_string(dir.path().join("diagram.mmd")).unwrap();
    assert!(written.contains("      A\n"));
}

#[test]
fn test_render_engine_missing_is_an_error() {
    let dir = setup_outline("PROBLEM:\nA\n");
    fs::write(
        dir.path().join("synapse.toml"),
        "[render]\ncommand = \"synapse-no-such-renderer\"\nargs = [\"{output}\"]\n",
    )
    .unwrap();

    synapse_cmd()
        .current_dir(dir.path())
        .args(["render", "outline.txt", "--out", "diagram.svg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to start renderer"));
}

#[cfg(unix)]
#[test]
fn test_render_runs_configured_engine() {
    let dir = setup_outline("SOLUTION:\nship\n");
    fs::write(
        dir.path().join("synapse.toml"),
        "[render]\ncommand = \"cp\"\nargs = [\"{input}\", \"{output}\"]\n",
    )
    .unwrap();

    synapse_cmd()
        .current_dir(dir.path())
        .args(["render", "outline.txt", "--out", "diagram.svg"])
        .assert()
        .success();

    let written = fs::read_to_string(dir.path().join("diagram.svg")).unwrap();
    assert!(written.contains("      ship\n"));
    assert!(!dir.path().join("diagram.svg.synapse.mmd").exists());
}

// =============================================================================
// Watch Tests
// =============================================================================

#[test]
fn test_watch_once_renders() {
    let dir = setup_outline("DOMAIN:\nweb\n");

    synapse_cmd()
        .current_dir(dir.path())
        .args(["watch", "outline.txt", "--out", "diagram.mmd", "--once"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Rendered 1 line(s)"));

    let written = fs::read_to_string(dir.path().join("diagram.mmd")).unwrap();
    assert!(written.contains("class Step2_Domain {\n      web\n    }"));
}

#[test]
fn test_watch_logs_render_failure_without_exiting() {
    let dir = setup_outline("PROBLEM:\nA\n");
    fs::write(
        dir.path().join("synapse.toml"),
        "[render]\ncommand = \"synapse-no-such-renderer\"\nargs = [\"{output}\"]\n",
    )
    .unwrap();

    synapse_cmd()
        .current_dir(dir.path())
        .args(["watch", "outline.txt", "--out", "diagram.svg", "--once"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Render failed"));
}

// =============================================================================
// Setup Tests
// =============================================================================

#[test]
fn test_sample_prints_all_headers() {
    synapse_cmd()
        .arg("sample")
        .assert()
        .success()
        .stdout(predicate::str::contains("PROBLEM:"))
        .stdout(predicate::str::contains("DOMAIN:"))
        .stdout(predicate::str::contains("ANALYSIS:"))
        .stdout(predicate::str::contains("RESOURCE:"))
        .stdout(predicate::str::contains("SOLUTION:"));
}

#[test]
fn test_init_creates_files() {
    let dir = TempDir::new().unwrap();

    synapse_cmd()
        .arg("init")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized synapse workspace"));

    assert!(dir.path().join("synapse.toml").is_file());
    assert!(dir.path().join("outline.txt").is_file());
}

#[test]
fn test_init_is_idempotent() {
    let dir = TempDir::new().unwrap();

    synapse_cmd().arg("init").arg(dir.path()).assert().success();

    synapse_cmd()
        .arg("init")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("already initialized"));
}

#[test]
fn test_config_shows_effective_values() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("synapse.toml"), "[watch]\ndebounce_millis = 42\n").unwrap();

    let output = synapse_cmd()
        .current_dir(dir.path())
        .args(["config", "--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["config"]["watch"]["debounce_millis"], 42);
    assert_eq!(json["config"]["render"]["command"], "mmdc");
}

#[test]
fn test_invalid_config_is_reported() {
    let dir = setup_outline("A\n");
    fs::write(dir.path().join("synapse.toml"), "[watch]\ndebounce_millis = 0\n").unwrap();

    synapse_cmd()
        .current_dir(dir.path())
        .args(["transpile", "outline.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("debounce_millis"));
}

#[test]
fn test_invalid_config_does_not_block_sample_or_init() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("synapse.toml"), "[watch]\ndebounce_millis = 0\n").unwrap();

    synapse_cmd()
        .current_dir(dir.path())
        .arg("sample")
        .assert()
        .success()
        .stdout(predicate::str::contains("PROBLEM:"));

    synapse_cmd()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    assert!(dir.path().join("outline.txt").is_file());
}

// =============================================================================
// Roster Tests
// =============================================================================

#[test]
fn test_roster_table() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("staff.json"),
        r#"[
  {"firstName":"Ana","lastName":"Kim","email":"ana@example.com","salary":60000,"date":"2024-03-19","job":"Engineer","department":"Platform"},
  {"firstName":"Bo","lastName":"Lee","email":"bo@example.com","salary":1234.5,"date":"2023-01-02","job":"Designer","department":"Product"}
]"#,
    )
    .unwrap();

    synapse_cmd()
        .current_dir(dir.path())
        .args(["roster", "staff.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("First Name"))
        .stdout(predicate::str::contains("Avatar"))
        .stdout(predicate::str::contains("Ana"))
        .stdout(predicate::str::contains("$60,000"))
        .stdout(predicate::str::contains("$1,234.5"));
}

#[test]
fn test_roster_json_numbers_rows() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("staff.yaml"),
        "- firstName: Ana\n  lastName: Kim\n  email: ana@example.com\n  salary: 100\n- firstName: Bo\n  lastName: Lee\n  email: bo@example.com\n  salary: 200\n",
    )
    .unwrap();

    let output = synapse_cmd()
        .current_dir(dir.path())
        .args(["roster", "staff.yaml", "--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json[0]["id"], 1);
    assert_eq!(json[1]["id"], 2);
    assert_eq!(json[1]["name"], "Bo Lee");
    assert_eq!(json[1]["last_name"], "Lee");
    assert_eq!(json[1]["salary_display"], "$200");
}

#[test]
fn test_roster_empty() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("staff.json"), "[]").unwrap();

    synapse_cmd()
        .current_dir(dir.path())
        .args(["roster", "staff.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No employees."));
}
