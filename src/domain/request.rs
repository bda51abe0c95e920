//! Notification request value object

use std::fmt;
use std::str::FromStr;

use super::resource::{ResolvedPath, ResourceKind};

/// Text substituted for an empty title or message.
/// Platform notifiers reject truly empty arguments.
pub const BLANK_TEXT: &str = " ";

pub const DEFAULT_TITLE: &str = "Default Title";
pub const DEFAULT_MESSAGE: &str = "Default Message";
pub const DEFAULT_APPLICATION_NAME: &str = "Rust Application (notify-dispatch)";

/// Notification urgency. Only honoured on Linux.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Urgency {
    Low,
    #[default]
    Normal,
    Critical,
}

impl Urgency {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Normal => "normal",
            Urgency::Critical => "critical",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for parsing an urgency level
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid urgency '{value}'. Valid options: low, normal, critical")]
pub struct ParseUrgencyError {
    pub value: String,
}

impl FromStr for Urgency {
    type Err = ParseUrgencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Urgency::Low),
            "normal" => Ok(Urgency::Normal),
            "critical" => Ok(Urgency::Critical),
            _ => Err(ParseUrgencyError {
                value: s.to_string(),
            }),
        }
    }
}

/// Everything a strategy needs to deliver one notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    title: String,
    message: String,
    application_name: String,
    icon: Option<ResolvedPath>,
    audio: Option<ResolvedPath>,
    urgency: Urgency,
}

impl NotificationRequest {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        application_name: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            application_name: application_name.into(),
            icon: None,
            audio: None,
            urgency: Urgency::default(),
        }
    }

    /// Title as shown; never empty
    pub fn title(&self) -> &str {
        non_blank(&self.title)
    }

    /// Message body as shown; never empty
    pub fn message(&self) -> &str {
        non_blank(&self.message)
    }

    pub fn application_name(&self) -> &str {
        &self.application_name
    }

    pub fn icon(&self) -> Option<&ResolvedPath> {
        self.icon.as_ref()
    }

    pub fn audio(&self) -> Option<&ResolvedPath> {
        self.audio.as_ref()
    }

    pub fn urgency(&self) -> Urgency {
        self.urgency
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub fn set_application_name(&mut self, application_name: impl Into<String>) {
        self.application_name = application_name.into();
    }

    pub fn set_urgency(&mut self, urgency: Urgency) {
        self.urgency = urgency;
    }

    /// Attach an icon. Paths of the wrong kind are ignored.
    pub fn set_icon(&mut self, icon: ResolvedPath) {
        if icon.kind() == ResourceKind::Icon {
            self.icon = Some(icon);
        }
    }

    pub fn clear_icon(&mut self) {
        self.icon = None;
    }

    /// Attach custom audio. Paths of the wrong kind are ignored.
    pub fn set_audio(&mut self, audio: ResolvedPath) {
        if audio.kind() == ResourceKind::Audio {
            self.audio = Some(audio);
        }
    }

    pub fn clear_audio(&mut self) {
        self.audio = None;
    }

    /// Copy with blank title/message replaced by [`BLANK_TEXT`]
    pub fn normalized(&self) -> Self {
        Self {
            title: self.title().to_string(),
            message: self.message().to_string(),
            ..self.clone()
        }
    }
}

impl Default for NotificationRequest {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE, DEFAULT_MESSAGE, DEFAULT_APPLICATION_NAME)
    }
}

fn non_blank(text: &str) -> &str {
    if text.is_empty() {
        BLANK_TEXT
    } else {
        text
    }
}
