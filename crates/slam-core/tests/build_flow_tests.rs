//! BuildService driven through a recording executor.

use std::sync::{Arc, Mutex};

use slam_core::prelude::*;

/// Records every command line and answers with a scripted exit code.
#[derive(Clone, Default)]
struct Recorder {
    calls: Arc<Mutex<Vec<String>>>,
    fail_on: Option<(&'static str, i32)>,
}

impl Recorder {
    fn failing(on: &'static str, code: i32) -> Self {
        Self {
            fail_on: Some((on, code)),
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandExecutor for Recorder {
    fn run(&self, invocation: &Invocation) -> SlamResult<ExecutionResult> {
        let line = invocation.command_line();
        self.calls.lock().unwrap().push(line.clone());
        let code = match self.fail_on {
            Some((needle, code)) if line.contains(needle) => code,
            _ => 0,
        };
        Ok(ExecutionResult::new(Vec::new(), b"tool said no".to_vec(), code))
    }
}

#[test]
fn build_runs_phases_in_order() {
    let recorder = Recorder::default();
    let service = BuildService::new(Box::new(recorder.clone()), Toolchain::default());

    let mut phases = Vec::new();
    service.build(&mut |phase| phases.push(phase)).unwrap();

    assert_eq!(phases, Phase::ALL.to_vec());
    assert_eq!(
        recorder.calls(),
        vec![
            "poetry run isort src test",
            "poetry run autoflake --in-place --recursive --remove-all-unused-imports src test",
            "poetry run black src test",
            "poetry install",
            "poetry run pytest",
            "poetry build",
        ]
    );
}

#[test]
fn build_stops_at_first_failure() {
    let recorder = Recorder::failing("install", 2);
    let service = BuildService::new(Box::new(recorder.clone()), Toolchain::default());

    let err = service.build(&mut |_| {}).unwrap_err();
    match err {
        SlamError::Command(failure) => {
            assert_eq!(failure.code, 2);
            assert_eq!(failure.command, "poetry install");
            assert_eq!(failure.stderr, "tool said no");
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(recorder.calls().len(), 4);
}

#[test]
fn test_returns_runner_code_without_failing() {
    let recorder = Recorder::failing("pytest", 1);
    let service = BuildService::new(Box::new(recorder.clone()), Toolchain::default());

    let result = service.test(&["-x"]).unwrap();
    assert_eq!(result.returncode, 1);
    assert_eq!(recorder.calls(), vec!["poetry run pytest -x"]);
}

#[test]
fn tools_run_directly_when_configured() {
    let recorder = Recorder::default();
    let toolchain = Toolchain {
        run_through_package_manager: false,
        ..Toolchain::default()
    };
    BuildService::new(Box::new(recorder.clone()), toolchain)
        .auto_format()
        .unwrap();

    assert_eq!(recorder.calls()[0], "isort src test");
}
