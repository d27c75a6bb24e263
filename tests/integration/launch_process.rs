use crate::common::{argv_bytes, fixtures_dir, launcher, run_with_base_dir};

#[test]
fn pass_through_args_reach_module_in_order() {
    let output = run_with_base_dir(&["echo_args.wat", "--flag", "value", "-x", "last"]);

    assert!(
        output.status.success(),
        "launcher should succeed: {output:?}"
    );
    assert_eq!(
        output.stdout,
        argv_bytes(&["echo_args.wat", "--flag", "value", "-x", "last"]),
        "argv[0] is the module identifier, the rest is forwarded verbatim"
    );
}

#[test]
fn module_identifier_is_not_forwarded_twice() {
    let output = run_with_base_dir(&["echo_args.wat", "payload"]);

    assert!(output.status.success(), "output: {output:?}");
    assert_eq!(output.stdout, b"echo_args.wat\0payload\0");
}

#[test]
fn empty_argument_is_forwarded() {
    let output = run_with_base_dir(&["echo_args.wat", "a", "", "b"]);

    assert!(output.status.success(), "output: {output:?}");
    assert_eq!(output.stdout, b"echo_args.wat\0a\0\0b\0");
}

#[test]
fn launcher_flags_after_module_are_forwarded() {
    let output = run_with_base_dir(&["echo_args.wat", "--help", "-V", "--entry", "x"]);

    assert!(
        output.status.success(),
        "help and version after the module belong to the module: {output:?}"
    );
    assert_eq!(output.stdout, b"echo_args.wat\0--help\0-V\0--entry\0x\0");
}

#[test]
fn double_dash_after_module_is_forwarded() {
    let output = run_with_base_dir(&["echo_args.wat", "--", "x"]);

    assert!(output.status.success(), "output: {output:?}");
    assert_eq!(output.stdout, b"echo_args.wat\0--\0x\0");
}

#[test]
fn no_args_forwards_empty_vector() {
    let output = run_with_base_dir(&["exit_argc.wat"]);

    // argc counts only the program name.
    assert_eq!(output.status.code(), Some(1), "output: {output:?}");
}

#[test]
fn proc_exit_code_becomes_process_status() {
    let output = run_with_base_dir(&["exit_code.wat"]);
    assert_eq!(output.status.code(), Some(7), "output: {output:?}");
}

#[test]
fn missing_module_exits_nonzero_without_running() {
    let output = run_with_base_dir(&["absent.wasm", "--flag"]);

    assert_eq!(output.status.code(), Some(1), "output: {output:?}");
    assert!(output.stdout.is_empty(), "no module output expected");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("No module found"),
        "stderr should carry a diagnostic: {stderr}"
    );
}

#[test]
fn trap_exits_nonzero_with_diagnostic() {
    let output = run_with_base_dir(&["trap.wat"]);

    assert_eq!(output.status.code(), Some(1), "output: {output:?}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("trapped"), "stderr: {stderr}");
}

#[test]
fn base_dir_can_come_from_environment() {
    let output = launcher()
        .env("MODLAUNCH_BASE_DIR", fixtures_dir())
        .args(["echo_args.wat", "from-env"])
        .output()
        .expect("launcher process should start");

    assert!(output.status.success(), "output: {output:?}");
    assert_eq!(output.stdout, argv_bytes(&["echo_args.wat", "from-env"]));
}

#[test]
fn missing_module_argument_is_usage_error() {
    let output = launcher()
        .output()
        .expect("launcher process should start");

    assert_eq!(output.status.code(), Some(2), "output: {output:?}");
}
