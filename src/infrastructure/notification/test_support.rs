//! Fake executables for strategy tests

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// A shell script standing in for an external binary.
/// Each invocation appends its arguments, NUL-separated, to `log`.
pub struct FakeBinary {
    pub path: PathBuf,
    pub log: PathBuf,
}

impl FakeBinary {
    pub fn new(dir: &Path, name: &str, exit_code: i32) -> Self {
        Self::write(dir, name, &format!("exit {}", exit_code))
    }

    /// Records its arguments, then sleeps for `secs` before exiting 0
    pub fn sleeping(dir: &Path, name: &str, secs: u32) -> Self {
        Self::write(dir, name, &format!("sleep {}\nexit 0", secs))
    }

    fn write(dir: &Path, name: &str, tail: &str) -> Self {
        let path = dir.join(name);
        let log = dir.join(format!("{}.args", name));
        let script = format!(
            "#!/bin/sh\nfor a in \"$@\"; do printf '%s\\0' \"$a\" >> '{}'; done\n{}\n",
            log.display(),
            tail
        );
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        Self { path, log }
    }

    /// Arguments recorded so far, or `None` if never invoked
    pub fn recorded_args(&self) -> Option<Vec<String>> {
        let raw = std::fs::read(&self.log).ok()?;
        Some(
            String::from_utf8(raw)
                .unwrap()
                .split_terminator('\0')
                .map(str::to_string)
                .collect(),
        )
    }
}
