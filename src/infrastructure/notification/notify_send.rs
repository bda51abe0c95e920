//! notify-send notification adapter

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{LogSink, NotificationError, NotifierCapability};
use crate::domain::{Capabilities, NotificationRequest, PlatformId};

use super::audio::AudioPlayer;

/// Linux binary-invocation strategy wrapping libnotify's notify-send
pub struct NotifySendNotifier {
    binary: PathBuf,
    audio: Option<AudioPlayer>,
    log: Arc<dyn LogSink>,
}

impl NotifySendNotifier {
    /// Create with an explicit notify-send binary and optional audio player
    pub fn new(binary: impl Into<PathBuf>, audio: Option<AudioPlayer>, log: Arc<dyn LogSink>) -> Self {
        Self {
            binary: binary.into(),
            audio,
            log,
        }
    }

    /// Create from probed capabilities. Fails if notify-send is not installed.
    pub fn from_capabilities(
        caps: &Capabilities,
        log: Arc<dyn LogSink>,
    ) -> Result<Self, NotificationError> {
        let binary = caps
            .notify_send
            .clone()
            .ok_or_else(|| NotificationError::BinaryNotFound("notify-send".to_string()))?;
        let audio = caps
            .audio_player(PlatformId::Linux)
            .map(AudioPlayer::direct);

        Ok(Self::new(binary, audio, log))
    }

    /// Options first, then `--` so title and message are never read as flags
    pub fn args(&self, request: &NotificationRequest) -> Vec<String> {
        let mut args = vec![
            "--app-name".to_string(),
            request.application_name().to_string(),
            "--urgency".to_string(),
            request.urgency().to_string(),
        ];
        if let Some(icon) = request.icon() {
            args.push("--icon".to_string());
            args.push(icon.to_string_lossy());
        }
        args.push("--".to_string());
        args.push(request.title().to_string());
        args.push(request.message().to_string());
        args
    }
}

#[async_trait]
impl NotifierCapability for NotifySendNotifier {
    fn name(&self) -> &str {
        "linux-binary"
    }

    async fn send(&self, request: &NotificationRequest) -> Result<bool, NotificationError> {
        if let Some(audio) = request.audio() {
            let player = self
                .audio
                .as_ref()
                .ok_or_else(|| NotificationError::BinaryNotFound("aplay".to_string()))?;
            player.play_detached(audio, self.log.as_ref());
        }

        let status = Command::new(&self.binary)
            .args(self.args(request))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    NotificationError::BinaryNotFound(self.binary.display().to_string())
                } else {
                    NotificationError::LaunchFailed {
                        program: self.binary.display().to_string(),
                        message: e.to_string(),
                    }
                }
            })?;

        if !status.success() {
            self.log
                .warn(&format!("notify-send exited with status: {}", status));
            return Ok(false);
        }

        Ok(true)
    }
}
