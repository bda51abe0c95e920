//! CLI integration tests

use std::path::Path;
use std::process::Command;

use predicates::prelude::*;

/// Binary with its config directory pointed at `config_home`
fn notify_bin(config_home: &Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_notify-dispatch"));
    command
        .env("XDG_CONFIG_HOME", config_home)
        .env_remove("NOTIFY_DISPATCH_ENABLE_LOGGING");
    command
}

#[test]
fn help_output() {
    let home = tempfile::tempdir().unwrap();
    let output = notify_bin(home.path())
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("notifications"));
    assert!(stdout.contains("--title"));
    assert!(stdout.contains("--message"));
    assert!(stdout.contains("--application-name"));
    assert!(stdout.contains("--audio"));
    assert!(stdout.contains("--platform"));
    assert!(stdout.contains("--no-fallback"));
}

#[test]
fn version_output() {
    let home = tempfile::tempdir().unwrap();
    let output = notify_bin(home.path())
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("notify-dispatch"));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn config_help() {
    let home = tempfile::tempdir().unwrap();
    let output = notify_bin(home.path())
        .args(["config", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("init"));
    assert!(stdout.contains("set"));
    assert!(stdout.contains("get"));
    assert!(stdout.contains("list"));
    assert!(stdout.contains("path"));
}

#[cfg(target_os = "linux")]
#[test]
fn config_path_follows_xdg() {
    let home = tempfile::tempdir().unwrap();
    let output = notify_bin(home.path())
        .args(["config", "path"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("notify-dispatch"));
    assert!(stdout.contains("config.toml"));
    assert!(stdout.contains(&*home.path().to_string_lossy()));
}

#[cfg(target_os = "linux")]
#[test]
fn config_set_then_get() {
    let home = tempfile::tempdir().unwrap();

    let set = notify_bin(home.path())
        .args(["config", "set", "urgency", "critical"])
        .output()
        .expect("Failed to execute command");
    assert!(set.status.success());

    let get = notify_bin(home.path())
        .args(["config", "get", "urgency"])
        .output()
        .expect("Failed to execute command");
    assert!(get.status.success());
    assert_eq!(String::from_utf8_lossy(&get.stdout).trim(), "critical");
}

#[test]
fn config_set_rejects_bad_value() {
    let home = tempfile::tempdir().unwrap();
    let output = notify_bin(home.path())
        .args(["config", "set", "linux.fallback", "sometimes"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("linux.fallback"), "got: {}", stderr);
}

#[test]
fn invalid_urgency_is_usage_error() {
    let home = tempfile::tempdir().unwrap();
    let output = notify_bin(home.path())
        .args(["--urgency", "apocalyptic"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn zero_timeout_is_usage_error() {
    let home = tempfile::tempdir().unwrap();
    let output = notify_bin(home.path())
        .args(["-t", "Hi", "--timeout", "0"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
}

/// Same as [`notify_bin`], wrapped for assertion chaining
fn notify_cmd(config_home: &Path) -> assert_cmd::Command {
    assert_cmd::Command::from_std(notify_bin(config_home))
}

#[test]
fn mp3_audio_is_rejected_before_sending() {
    let home = tempfile::tempdir().unwrap();
    notify_cmd(home.path())
        .args(["-t", "Hi", "-s", "sound.mp3"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid audio format"));
}

#[test]
fn missing_icon_is_rejected() {
    let home = tempfile::tempdir().unwrap();
    notify_cmd(home.path())
        .args(["-t", "Hi", "-i", "definitely-missing.png"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid icon path"));
}

#[test]
fn unknown_platform_override_is_unsupported() {
    let home = tempfile::tempdir().unwrap();
    notify_cmd(home.path())
        .args(["--platform", "Plan9"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unsupported platform"));
}

#[test]
fn strategy_for_other_platform_is_invalid() {
    let home = tempfile::tempdir().unwrap();
    let output = notify_bin(home.path())
        .args(["--platform", "Linux", "--strategy", "windows-toast"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid argument"), "got: {}", stderr);
}

#[cfg(unix)]
mod with_fake_notify_send {
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    use super::notify_bin;

    /// Install a `notify-send` stand-in that records its arguments
    fn install(dir: &Path, exit_code: i32) -> PathBuf {
        let log = dir.join("args.log");
        let script = dir.join("notify-send");
        std::fs::write(
            &script,
            format!(
                "#!/bin/sh\nprintf '%s\\0' \"$@\" > '{}'\nexit {}\n",
                log.display(),
                exit_code
            ),
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        log
    }

    fn recorded(log: &Path) -> Vec<String> {
        let raw = std::fs::read(log).unwrap();
        String::from_utf8(raw)
            .unwrap()
            .split('\0')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn legacy_send_uses_notify_send() {
        let home = tempfile::tempdir().unwrap();
        let bin = tempfile::tempdir().unwrap();
        let log = install(bin.path(), 0);

        let output = notify_bin(home.path())
            .env("PATH", bin.path())
            .args([
                "--platform",
                "Linux",
                "--legacy",
                "--title=--not-a-flag",
                "-m",
                "$(rm -rf /) ; `whoami`",
                "-a",
                "CLI Test",
            ])
            .output()
            .expect("Failed to execute command");

        assert!(
            output.status.success(),
            "stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        let args = recorded(&log);
        assert_eq!(args[0..2], ["--app-name", "CLI Test"]);
        assert_eq!(
            args[args.len() - 3..],
            ["--", "--not-a-flag", "$(rm -rf /) ; `whoami`"]
        );
    }

    #[test]
    fn failed_delivery_exits_one() {
        let home = tempfile::tempdir().unwrap();
        let bin = tempfile::tempdir().unwrap();
        install(bin.path(), 1);

        let output = notify_bin(home.path())
            .env("PATH", bin.path())
            .args(["--platform", "Linux", "--legacy", "-t", "Nope"])
            .output()
            .expect("Failed to execute command");

        assert_eq!(output.status.code(), Some(1));
    }
}
