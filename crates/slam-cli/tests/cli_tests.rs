//! End-to-end tests for the `slam` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

fn slam() -> assert_cmd::Command {
    let mut cmd = cargo::cargo_bin_cmd!("slam");
    cmd.env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("SLAM__TOOLCHAIN__PACKAGE_MANAGER");
    cmd
}

fn git_root() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join(".git")).unwrap();
    temp
}

#[test]
fn help_lists_commands() {
    slam()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("slam"))
        .stdout(predicate::str::contains("format"))
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("new"));
}

#[test]
fn version_flag() {
    slam()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_flag_is_usage_error() {
    slam().arg("--definitely-not-a-flag").assert().code(2);
}

// ── new ───────────────────────────────────────────────────────────────────────

#[test]
fn new_outside_git_root_fails() {
    let temp = TempDir::new().unwrap();
    slam()
        .current_dir(temp.path())
        .args(["new", "--yes", "--name", "demo"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not a project root"));
    assert!(!temp.path().join("pyproject.toml").exists());
}

#[test]
fn new_scaffolds_default_template() {
    let root = git_root();
    slam()
        .current_dir(root.path())
        .args(["new", "--yes", "--name", "demo-app"])
        .assert()
        .success()
        .stdout(predicate::str::contains("slam new: SUCCESS"));

    let manifest = fs::read_to_string(root.path().join("pyproject.toml")).unwrap();
    assert!(manifest.contains("name = \"demo-app\""));
    assert!(root.path().join("src/demo_app/cli.py").is_file());
    assert!(root.path().join("test/test_demo_app.py").is_file());
}

#[test]
fn new_twice_refuses_existing_manifest() {
    let root = git_root();
    slam()
        .args(["-C"])
        .arg(root.path())
        .args(["new", "--yes", "--name", "demo"])
        .assert()
        .success();

    slam()
        .args(["-C"])
        .arg(root.path())
        .args(["new", "--yes", "--name", "demo"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("slam init"));
}

#[test]
fn new_dry_run_writes_nothing() {
    let root = git_root();
    slam()
        .current_dir(root.path())
        .args(["new", "--dry-run", "--name", "demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("src/demo/cli.py"));
    assert!(!root.path().join("pyproject.toml").exists());
}

#[test]
fn new_unknown_template_is_not_found() {
    let root = git_root();
    slam()
        .current_dir(root.path())
        .args(["new", "--yes", "--template", "nope"])
        .assert()
        .code(3);
}

#[test]
fn new_with_user_template_and_vars() {
    let root = git_root();
    let templates = TempDir::new().unwrap();
    let dir = templates.path().join("mini");
    fs::create_dir_all(dir.join("src/${PACKAGE_NAME}")).unwrap();
    fs::write(dir.join("src/${PACKAGE_NAME}/about.txt"), "${PROJECT_NAME} by ${AUTHOR}\n").unwrap();

    slam()
        .current_dir(root.path())
        .args(["new", "--yes", "--name", "Mini Tool", "--template", "mini", "--var", "AUTHOR=ada"])
        .arg("--templates-dir")
        .arg(templates.path())
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(root.path().join("src/mini_tool/about.txt")).unwrap(),
        "Mini Tool by ada\n"
    );
}

#[test]
fn new_with_unresolved_placeholder_writes_nothing() {
    let root = git_root();
    let templates = TempDir::new().unwrap();
    let dir = templates.path().join("broken");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("a.txt"), "ok\n").unwrap();
    fs::write(dir.join("b.txt"), "${NOBODY_SET_THIS}\n").unwrap();

    slam()
        .current_dir(root.path())
        .args(["new", "--yes", "--template", "broken"])
        .arg("--templates-dir")
        .arg(templates.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("NOBODY_SET_THIS"));
    assert!(!root.path().join("a.txt").exists());
}

// ── init ──────────────────────────────────────────────────────────────────────

#[test]
fn init_applies_defaults_once() {
    let root = git_root();
    let manifest = root.path().join("pyproject.toml");
    fs::write(&manifest, "[tool.poetry]\nname = \"x\"\n").unwrap();

    slam()
        .current_dir(root.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("slam init: SUCCESS"));
    let once = fs::read_to_string(&manifest).unwrap();
    assert!(once.contains("[tool.black]"));
    assert!(root.path().join("pyproject.toml.bak").is_file());

    slam()
        .current_dir(root.path())
        .arg("init")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("slam init: ERROR"));
    assert_eq!(fs::read_to_string(&manifest).unwrap(), once);
}

#[test]
fn init_without_manifest_fails() {
    let root = git_root();
    slam()
        .current_dir(root.path())
        .arg("init")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No project manifest"));
}

// ── list / config ─────────────────────────────────────────────────────────────

#[test]
fn list_shows_builtin_template() {
    slam()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("default"));
}

#[test]
fn list_json_is_parseable() {
    let out = slam().args(["list", "--format", "json"]).output().unwrap();
    assert!(out.status.success());
    let names: Vec<String> = serde_json::from_slice(&out.stdout).unwrap();
    assert!(names.contains(&"default".to_string()));
}

#[test]
fn config_get_reflects_flags_and_env() {
    let temp = TempDir::new().unwrap();
    slam()
        .current_dir(temp.path())
        .args(["config", "get", "toolchain.package_manager"])
        .assert()
        .success()
        .stdout(predicate::str::diff("poetry\n"));

    slam()
        .current_dir(temp.path())
        .args(["--poetry", "/opt/poetry", "config", "get", "toolchain.package_manager"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/opt/poetry"));

    slam()
        .current_dir(temp.path())
        .env("SLAM__TOOLCHAIN__PACKAGE_MANAGER", "/env/poetry")
        .args(["config", "get", "toolchain.package_manager"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/env/poetry"));
}

#[test]
fn project_config_file_is_used() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("slam.toml"),
        "[layout]\nmanifest = \"setup.toml\"\n",
    )
    .unwrap();

    slam()
        .current_dir(temp.path())
        .args(["config", "get", "layout.manifest"])
        .assert()
        .success()
        .stdout(predicate::str::contains("setup.toml"));
}

#[test]
fn config_unknown_key_exits_four() {
    slam().args(["config", "get", "no.such.key"]).assert().code(4);
}

#[test]
fn missing_config_file_exits_four() {
    slam()
        .args(["--config", "/nonexistent/slam.toml", "list"])
        .assert()
        .code(4);
}

#[test]
fn completions_generate() {
    slam()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("slam"));
}

// ── tool-running commands, against a fake package manager ────────────────────

#[cfg(unix)]
mod tools {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    /// A package manager that logs its arguments and exits with `code`,
    /// or with `test_code` when asked to run pytest.
    fn fake_pm(dir: &Path, code: i32, test_code: i32) -> PathBuf {
        let path = dir.join("fake-pm");
        fs::write(
            &path,
            format!(
                "#!/bin/sh\n\
                 echo \"$*\" >> \"$(dirname \"$0\")/calls.log\"\n\
                 if [ \"$2\" = pytest ]; then exit {test_code}; fi\n\
                 exit {code}\n"
            ),
        )
        .unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn calls(dir: &Path) -> Vec<String> {
        fs::read_to_string(dir.join("calls.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn build_runs_every_phase_in_order() {
        let root = git_root();
        let pm = fake_pm(root.path(), 0, 0);

        slam()
            .current_dir(root.path())
            .arg("--package-manager")
            .arg(&pm)
            .assert()
            .success()
            .stdout(predicate::str::contains("slam build: SUCCESS"));

        let calls = calls(root.path());
        assert_eq!(calls.len(), 6);
        assert!(calls[0].starts_with("run isort"));
        assert!(calls[1].starts_with("run autoflake"));
        assert!(calls[2].starts_with("run black"));
        assert_eq!(calls[3], "install");
        assert_eq!(calls[4], "run pytest");
        assert_eq!(calls[5], "build");
    }

    #[test]
    fn build_stops_at_failing_tests() {
        let root = git_root();
        let pm = fake_pm(root.path(), 0, 4);

        slam()
            .current_dir(root.path())
            .arg("--package-manager")
            .arg(&pm)
            .arg("build")
            .assert()
            .code(4)
            .stdout(predicate::str::contains("slam build: ERROR"));

        let calls = calls(root.path());
        assert_eq!(calls.last().map(String::as_str), Some("run pytest"));
        assert!(!calls.iter().any(|c| c == "build"));
    }

    #[test]
    fn test_passes_args_and_exit_code_through() {
        let root = git_root();
        let pm = fake_pm(root.path(), 0, 7);

        slam()
            .current_dir(root.path())
            .arg("--package-manager")
            .arg(&pm)
            .args(["test", "-k", "parser", "-x"])
            .assert()
            .code(7)
            .stdout(predicate::str::contains("slam test: ERROR"));

        assert_eq!(calls(root.path()), vec!["run pytest -k parser -x"]);
    }

    #[test]
    fn test_short_flags_reach_the_runner() {
        let root = git_root();
        let pm = fake_pm(root.path(), 0, 0);

        slam()
            .current_dir(root.path())
            .arg("--package-manager")
            .arg(&pm)
            .args(["test", "-q", "-v", "-c", "x.ini"])
            .assert()
            .success()
            .stdout(predicate::str::contains("slam test: SUCCESS"));

        assert_eq!(calls(root.path()), vec!["run pytest -q -v -c x.ini"]);
    }

    #[test]
    fn failing_format_reports_tool_code() {
        let root = git_root();
        let pm = fake_pm(root.path(), 3, 0);

        slam()
            .current_dir(root.path())
            .arg("--package-manager")
            .arg(&pm)
            .arg("format")
            .assert()
            .code(3)
            .stdout(predicate::str::contains("slam format: ERROR"));
        // Fail fast: only the first formatter ran.
        assert_eq!(calls(root.path()).len(), 1);
    }

    #[test]
    fn install_success() {
        let root = git_root();
        let pm = fake_pm(root.path(), 0, 0);

        slam()
            .current_dir(root.path())
            .arg("--poetry")
            .arg(&pm)
            .arg("install")
            .assert()
            .success()
            .stdout(predicate::str::contains("slam install: SUCCESS"));
        assert_eq!(calls(root.path()), vec!["install"]);
    }

    #[test]
    fn missing_package_manager_is_reported() {
        let root = git_root();
        slam()
            .current_dir(root.path())
            .args(["--package-manager", "/nonexistent/poetry", "install"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("/nonexistent/poetry"));
    }
}
