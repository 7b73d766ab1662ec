use std::process::Command;

fn help_text() -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_lucid"))
        .arg("--help")
        .output()
        .expect("failed to launch lucid binary");
    assert!(output.status.success(), "lucid --help exited with {}", output.status);
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn help_lists_every_exhaustion_policy() {
    let help = help_text();

    assert!(help.contains("--policy"));
    for value in ["end-run", "wrap", "stop"] {
        assert!(help.contains(value), "missing policy `{value}` in:\n{help}");
    }
}

#[test]
fn help_lists_run_and_test_mode_flags() {
    let help = help_text();

    for flag in [
        "--config",
        "--seed",
        "--stages",
        "--test-anomaly",
        "--test-hard",
        "--report",
    ] {
        assert!(help.contains(flag), "missing flag `{flag}` in:\n{help}");
    }
}
