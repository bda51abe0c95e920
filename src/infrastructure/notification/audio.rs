//! Detached audio playback through an external player

use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;

use crate::application::ports::LogSink;
use crate::domain::ResolvedPath;

use super::escape::powershell_literal;

/// Hide the console window of spawned PowerShell processes
#[cfg(windows)]
pub(crate) const CREATE_NO_WINDOW: u32 = 0x0800_0000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlayerStyle {
    /// `<player> <file>` (aplay, afplay)
    Direct,
    /// PowerShell `Media.SoundPlayer`
    PowerShell,
}

/// Fire-and-forget playback of custom notification sounds
#[derive(Debug, Clone)]
pub struct AudioPlayer {
    program: PathBuf,
    style: PlayerStyle,
}

impl AudioPlayer {
    /// Player invoked as `<program> <file>`
    pub fn direct(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            style: PlayerStyle::Direct,
        }
    }

    /// Play through PowerShell's `Media.SoundPlayer`
    pub fn powershell(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            style: PlayerStyle::PowerShell,
        }
    }

    /// Arguments passed to the player for `audio`
    pub fn args(&self, audio: &ResolvedPath) -> Vec<String> {
        match self.style {
            PlayerStyle::Direct => vec![audio.to_string_lossy()],
            PlayerStyle::PowerShell => vec![
                "-NoProfile".to_string(),
                "-NonInteractive".to_string(),
                "-Command".to_string(),
                format!(
                    "(New-Object Media.SoundPlayer {}).PlaySync();",
                    powershell_literal(&audio.to_string_lossy())
                ),
            ],
        }
    }

    /// Start playback without waiting for it.
    ///
    /// Spawn failures are logged and otherwise ignored.
    pub fn play_detached(&self, audio: &ResolvedPath, log: &dyn LogSink) {
        let mut command = Command::new(&self.program);
        command
            .args(self.args(audio))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        #[cfg(windows)]
        {
            command.creation_flags(CREATE_NO_WINDOW);
        }

        match command.spawn() {
            Ok(_child) => log.debug(&format!("Playing {}", audio)),
            Err(e) => log.warn(&format!(
                "Unable to play {} with {}: {}",
                audio,
                self.program.display(),
                e
            )),
        }
    }
}
