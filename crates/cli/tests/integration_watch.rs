//! Integration tests for watch mode
//!
//! Watch never exits on its own, so these spawn it and kill it.


use integration_test_helpers::*;
use serial_test::serial;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

fn spawn_watch(project: &TestProject, args: &[&str]) -> Child {
    Command::new(env!("CARGO_BIN_EXE_hogtyped"))
        .current_dir(&project.project_path)
        .arg("watch")
        .args(args)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("Failed to spawn watch command")
}

fn wait_for(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let start = Instant::now();
    while start.elapsed() < timeout {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(100));
    }
    condition()
}

#[test]
#[serial]
fn test_watch_generates_on_start() {
    let project = TestProject::with_schema(&simple_event_schema("initial_event"));

    let mut child = spawn_watch(&project, &["--lang", "typescript"]);

    let generated = wait_for(Duration::from_secs(5), || {
        project.file_exists("posthog_generated.ts")
    });

    if let Ok(Some(status)) = child.try_wait() {
        panic!("Watch process exited early with status: {status:?}");
    }
    child.kill().expect("Failed to kill watch process");
    let _ = child.wait();

    assert!(generated, "initial generation should write the wrapper");
    assert!(project
        .read_file("posthog_generated.ts")
        .contains("InitialEventProperties"));
}

#[test]
#[serial]
fn test_watch_regenerates_on_change() {
    let project = TestProject::with_schema(&simple_event_schema("initial_event"));

    let mut child = spawn_watch(&project, &[]);
    wait_for(Duration::from_secs(5), || {
        project.file_exists("posthog_generated.py")
    });

    project.write_file("schemas/more.schema.json", &simple_event_schema("added_event"));
    let regenerated = wait_for(Duration::from_secs(10), || {
        project
            .read_file("posthog_generated.py")
            .contains("AddedEventProperties")
    });

    child.kill().expect("Failed to kill watch process");
    let _ = child.wait();

    assert!(regenerated, "a new schema file should trigger regeneration");
}

#[test]
fn test_watch_missing_schema_directory() {
    let project = TestProject::new();

    let stderr = project.run_command_failure(&["watch"]);
    assert!(stderr.contains("Schema directory not found"));
}

#[test]
fn test_watch_mode_help() {
    let project = TestProject::new();

    let stdout = project.run_command_success(&["watch", "--help"]);
    assert!(stdout.contains("--schemas"));
    assert!(stdout.contains("--output"));
}
