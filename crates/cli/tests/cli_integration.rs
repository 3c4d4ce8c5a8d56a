use std::process::Command;

fn corral() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_corral"));
    // Keep the assertions independent of the caller's environment.
    cmd.env_remove("CORRAL_CONFIG");
    cmd
}

#[test]
fn missing_required_input_prints_help_and_fails() {
    let out = corral().output().expect("failed to run corral");

    assert_eq!(out.status.code(), Some(1), "expected exit status 1");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.contains("error: required argument missing: input"),
        "unexpected output:\n{stdout}"
    );
    assert!(stdout.contains("USAGE:"), "help not printed:\n{stdout}");
    assert!(stdout.contains("OPTIONS:"), "help not printed:\n{stdout}");
    assert!(
        stdout.contains("SUBCOMMANDS:"),
        "help not printed:\n{stdout}"
    );
}

#[test]
fn unknown_option_fails_with_its_name() {
    let out = corral()
        .arg("--bogus")
        .output()
        .expect("failed to run corral");

    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.contains("error: unknown option: --bogus"),
        "unexpected output:\n{stdout}"
    );
}

#[test]
fn processes_input_with_defaults() {
    let out = corral()
        .arg("data.txt")
        .output()
        .expect("failed to run corral");

    assert!(
        out.status.success(),
        "corral failed:\nstatus: {}\nstdout:\n{}",
        out.status,
        String::from_utf8_lossy(&out.stdout),
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.contains("Processing data.txt (config: corral.json)"),
        "defaults not applied:\n{stdout}"
    );
}

#[test]
fn env_fallback_beats_default() {
    let out = corral()
        .env("CORRAL_CONFIG", "custom.json")
        .arg("data.txt")
        .output()
        .expect("failed to run corral");

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.contains("(config: custom.json)"),
        "env fallback not applied:\n{stdout}"
    );
}

#[test]
fn serve_subcommand_skips_outer_requirements() {
    let out = corral()
        .arg("serve")
        .arg("--port")
        .arg("9090")
        .output()
        .expect("failed to run corral");

    assert!(
        out.status.success(),
        "corral serve failed:\nstdout:\n{}",
        String::from_utf8_lossy(&out.stdout),
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.contains("http://localhost:9090"),
        "unexpected output:\n{stdout}"
    );
}

#[test]
fn serve_alias_resolves() {
    let out = corral().arg("s").output().expect("failed to run corral");

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.contains("http://localhost:8080"),
        "alias did not resolve:\n{stdout}"
    );
}
