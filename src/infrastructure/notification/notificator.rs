//! macOS notification adapter using the Notificator helper app
//!
//! Icons are not supported by the helper; build a custom bundle for that.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{LogSink, NotificationError, NotifierCapability};
use crate::domain::{Capabilities, NotificationRequest, PlatformId};

use super::audio::AudioPlayer;

/// Helper executable inside a Notificator.app bundle
pub const HELPER_IN_BUNDLE: &str = "Contents/Resources/Scripts/notificator";

/// Default bundle location under the resource root
pub const BUNDLED_APP: &str = "binaries/Notificator.app";

/// macOS helper-process strategy
pub struct NotificatorNotifier {
    helper: PathBuf,
    audio: Option<AudioPlayer>,
    log: Arc<dyn LogSink>,
}

impl NotificatorNotifier {
    pub fn new(helper: impl Into<PathBuf>, audio: Option<AudioPlayer>, log: Arc<dyn LogSink>) -> Self {
        Self {
            helper: helper.into(),
            audio,
            log,
        }
    }

    /// Locate the helper in `custom_bundle` if given, else in the bundled app
    pub fn from_capabilities(
        caps: &Capabilities,
        resource_root: Option<&Path>,
        custom_bundle: Option<&Path>,
        log: Arc<dyn LogSink>,
    ) -> Result<Self, NotificationError> {
        let helper = match custom_bundle {
            Some(bundle) => helper_in_bundle(bundle)?,
            None => {
                let root = resource_root.ok_or_else(|| {
                    NotificationError::BinaryNotFound("Notificator.app".to_string())
                })?;
                helper_in_bundle(&root.join(BUNDLED_APP))?
            }
        };
        let audio = caps
            .audio_player(PlatformId::Darwin)
            .map(AudioPlayer::direct);

        Ok(Self::new(helper, audio, log))
    }

    pub fn helper(&self) -> &Path {
        &self.helper
    }

    pub fn args(&self, request: &NotificationRequest) -> Vec<String> {
        vec![
            "--title".to_string(),
            request.application_name().to_string(),
            "--subtitle".to_string(),
            request.title().to_string(),
            "--message".to_string(),
            request.message().to_string(),
        ]
    }
}

/// Resolve and validate the helper executable of a Notificator.app bundle
pub fn helper_in_bundle(bundle: &Path) -> Result<PathBuf, NotificationError> {
    let helper = bundle.join(HELPER_IN_BUNDLE);
    if is_executable(&helper) {
        Ok(helper)
    } else {
        Err(NotificationError::BinaryNotFound(
            helper.display().to_string(),
        ))
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[async_trait]
impl NotifierCapability for NotificatorNotifier {
    fn name(&self) -> &str {
        "mac-helper"
    }

    async fn send(&self, request: &NotificationRequest) -> Result<bool, NotificationError> {
        if request.icon().is_some() {
            self.log
                .warn("Notification icons are not supported on macOS; ignoring icon.");
        }

        if let Some(audio) = request.audio() {
            let player = self
                .audio
                .as_ref()
                .ok_or_else(|| NotificationError::BinaryNotFound("afplay".to_string()))?;
            player.play_detached(audio, self.log.as_ref());
        }

        let status = Command::new(&self.helper)
            .args(self.args(request))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    NotificationError::BinaryNotFound(self.helper.display().to_string())
                } else {
                    NotificationError::LaunchFailed {
                        program: self.helper.display().to_string(),
                        message: e.to_string(),
                    }
                }
            })?;

        if !status.success() {
            self.log
                .warn(&format!("Notificator exited with status: {}", status));
            return Ok(false);
        }

        Ok(true)
    }
}
