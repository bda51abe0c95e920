//! Windows toast notification adapter
//!
//! Builds a toast XML document, wraps it in a PowerShell script that loads
//! the WinRT notification APIs, and runs that script from a temporary file.

use std::io::Write;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{LogSink, NotificationError, NotifierCapability};
use crate::domain::{Capabilities, NotificationRequest};

use super::audio::AudioPlayer;
#[cfg(windows)]
use super::audio::CREATE_NO_WINDOW;
use super::escape::{powershell_literal, xml_escape};

/// Binding template understood by the toast API
pub const TOAST_TEMPLATE: &str = "ToastImageAndText02";

/// Render the toast document.
///
/// A silent audio marker suppresses the default sound when custom audio
/// is played separately.
pub fn toast_xml(request: &NotificationRequest) -> String {
    let icon = request
        .icon()
        .map(|icon| xml_escape(&icon.to_string_lossy()))
        .unwrap_or_default();

    let mut xml = String::new();
    xml.push_str("<toast duration=\"short\">\n");
    xml.push_str("    <visual>\n");
    xml.push_str(&format!("        <binding template=\"{}\">\n", TOAST_TEMPLATE));
    xml.push_str(&format!("            <image id=\"1\" src=\"{}\" />\n", icon));
    xml.push_str(&format!(
        "            <text id=\"1\">{}</text>\n",
        xml_escape(request.title())
    ));
    xml.push_str(&format!(
        "            <text id=\"2\">{}</text>\n",
        xml_escape(request.message())
    ));
    xml.push_str("        </binding>\n");
    xml.push_str("    </visual>\n");
    if request.audio().is_some() {
        xml.push_str("    <audio silent=\"true\" />\n");
    }
    xml.push_str("</toast>");
    xml
}

/// Render the PowerShell script that shows the toast.
///
/// The document sits in a single-quoted here-string, so nothing in it is
/// interpolated; XML escaping guarantees it never contains a closing `'@`.
/// Any error stops the script so the host exits non-zero.
pub fn toast_script(request: &NotificationRequest) -> String {
    format!(
        "$ErrorActionPreference = 'Stop'\n\
         [Windows.UI.Notifications.ToastNotificationManager, Windows.UI.Notifications, ContentType = WindowsRuntime] | Out-Null\n\
         [Windows.UI.Notifications.ToastNotification, Windows.UI.Notifications, ContentType = WindowsRuntime] | Out-Null\n\
         [Windows.Data.Xml.Dom.XmlDocument, Windows.Data.Xml.Dom.XmlDocument, ContentType = WindowsRuntime] | Out-Null\n\
         $APP_ID = {app_id}\n\
         $template = @'\n\
         {xml}\n\
         '@\n\
         $xml = New-Object Windows.Data.Xml.Dom.XmlDocument\n\
         $xml.LoadXml($template)\n\
         $toast = New-Object Windows.UI.Notifications.ToastNotification $xml\n\
         [Windows.UI.Notifications.ToastNotificationManager]::CreateToastNotifier($APP_ID).Show($toast)\n",
        app_id = powershell_literal(request.application_name()),
        xml = toast_xml(request),
    )
}

/// Windows script-generation strategy
pub struct ToastNotifier {
    powershell: PathBuf,
    audio: Option<AudioPlayer>,
    log: Arc<dyn LogSink>,
}

impl ToastNotifier {
    pub fn new(powershell: impl Into<PathBuf>, log: Arc<dyn LogSink>) -> Self {
        let powershell = powershell.into();
        Self {
            audio: Some(AudioPlayer::powershell(&powershell)),
            powershell,
            log,
        }
    }

    /// Create from probed capabilities. Fails if PowerShell is not on `PATH`.
    pub fn from_capabilities(
        caps: &Capabilities,
        log: Arc<dyn LogSink>,
    ) -> Result<Self, NotificationError> {
        let powershell = caps
            .powershell
            .clone()
            .ok_or_else(|| NotificationError::BinaryNotFound("powershell".to_string()))?;
        Ok(Self::new(powershell, log))
    }

    /// Write the script to a uniquely named temporary file, removed on drop
    fn write_script(&self, request: &NotificationRequest) -> Result<tempfile::TempPath, NotificationError> {
        let mut file = tempfile::Builder::new()
            .prefix("notify-dispatch-")
            .suffix(".ps1")
            .tempfile()
            .map_err(|e| NotificationError::Script(e.to_string()))?;

        // BOM so Windows PowerShell reads the script as UTF-8
        file.write_all("\u{feff}".as_bytes())
            .and_then(|_| file.write_all(toast_script(request).as_bytes()))
            .and_then(|_| file.flush())
            .map_err(|e| NotificationError::Script(e.to_string()))?;

        Ok(file.into_temp_path())
    }
}

#[async_trait]
impl NotifierCapability for ToastNotifier {
    fn name(&self) -> &str {
        "windows-toast"
    }

    async fn send(&self, request: &NotificationRequest) -> Result<bool, NotificationError> {
        if let Some(audio) = request.audio() {
            let player = self
                .audio
                .as_ref()
                .ok_or_else(|| NotificationError::BinaryNotFound("powershell".to_string()))?;
            player.play_detached(audio, self.log.as_ref());
        }

        let script = self.write_script(request)?;
        self.log
            .debug(&format!("Running toast script {}", script.display()));

        let mut command = Command::new(&self.powershell);
        command
            .args(["-NoProfile", "-NonInteractive", "-ExecutionPolicy", "Bypass", "-File"])
            .arg(&*script)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        #[cfg(windows)]
        {
            command.creation_flags(CREATE_NO_WINDOW);
        }

        let status = command.status().await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                NotificationError::BinaryNotFound(self.powershell.display().to_string())
            } else {
                NotificationError::LaunchFailed {
                    program: self.powershell.display().to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        if !status.success() {
            self.log
                .warn(&format!("PowerShell exited with status: {}", status));
            return Ok(false);
        }

        Ok(true)
    }
}
