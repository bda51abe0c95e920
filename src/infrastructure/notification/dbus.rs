//! Session bus notification adapter
//!
//! Calls `org.freedesktop.Notifications.Notify` directly. A fresh
//! connection is opened for every send.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use zbus::zvariant::Value;

use crate::application::ports::{LogSink, NotificationError, NotifierCapability};
use crate::domain::{Capabilities, NotificationRequest, PlatformId};

use super::audio::AudioPlayer;
use super::notify_send::NotifySendNotifier;

pub const BUS_NAME: &str = "org.freedesktop.Notifications";
pub const OBJECT_PATH: &str = "/org/freedesktop/Notifications";
pub const INTERFACE: &str = "org.freedesktop.Notifications";
pub const METHOD: &str = "Notify";

/// How long to wait for the notification server's reply
pub const CALL_TIMEOUT: Duration = Duration::from_secs(5);

/// Body of a `Notify` call, signature `susssasa{sv}i`
pub type NotifyArgs<'a> = (
    &'a str,
    u32,
    &'a str,
    &'a str,
    &'a str,
    Vec<&'a str>,
    HashMap<&'a str, Value<'a>>,
    i32,
);

/// Build the `Notify` body: app name, replace id, icon, summary, body,
/// actions, hints, expire timeout
pub fn notify_args<'a>(request: &'a NotificationRequest, icon: &'a str) -> NotifyArgs<'a> {
    (
        request.application_name(),
        0,
        icon,
        request.title(),
        request.message(),
        Vec::new(),
        HashMap::new(),
        -1,
    )
}

/// Linux bus strategy with optional one-shot fallback to notify-send
pub struct DbusNotifier {
    address: Option<String>,
    fallback: Option<NotifySendNotifier>,
    audio: Option<AudioPlayer>,
    call_timeout: Duration,
    log: Arc<dyn LogSink>,
}

impl DbusNotifier {
    /// Create a notifier talking to the user's session bus
    pub fn new(log: Arc<dyn LogSink>) -> Self {
        Self {
            address: None,
            fallback: None,
            audio: None,
            call_timeout: CALL_TIMEOUT,
            log,
        }
    }

    /// Create from probed capabilities.
    ///
    /// With `fallback` set, notify-send is used when the bus call fails. If
    /// notify-send is not installed the fallback is dropped with a warning.
    pub fn from_capabilities(caps: &Capabilities, fallback: bool, log: Arc<dyn LogSink>) -> Self {
        let mut notifier = Self::new(Arc::clone(&log));
        notifier.audio = caps
            .audio_player(PlatformId::Linux)
            .map(AudioPlayer::direct);

        if fallback {
            match NotifySendNotifier::from_capabilities(caps, Arc::clone(&log)) {
                Ok(binary) => notifier.fallback = Some(binary),
                Err(e) => log.warn(&format!("Bus fallback disabled: {}", e)),
            }
        }

        notifier
    }

    /// Connect to a specific bus address instead of the session bus
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_fallback(mut self, fallback: NotifySendNotifier) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn with_audio_player(mut self, player: AudioPlayer) -> Self {
        self.audio = Some(player);
        self
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    async fn connect(&self) -> zbus::Result<zbus::Connection> {
        match &self.address {
            Some(address) => {
                zbus::connection::Builder::address(address.as_str())?
                    .build()
                    .await
            }
            None => zbus::Connection::session().await,
        }
    }

    /// Send the `Notify` call and return the server-assigned id
    async fn call_notify(&self, request: &NotificationRequest) -> Result<u32, NotificationError> {
        let icon = request
            .icon()
            .map(|icon| icon.to_string_lossy())
            .unwrap_or_default();

        let call = async {
            let connection = self.connect().await?;
            let reply = connection
                .call_method(
                    Some(BUS_NAME),
                    OBJECT_PATH,
                    Some(INTERFACE),
                    METHOD,
                    &notify_args(request, &icon),
                )
                .await?;
            let id: u32 = reply.body().deserialize()?;
            Ok::<u32, zbus::Error>(id)
        };

        match tokio::time::timeout(self.call_timeout, call).await {
            Ok(Ok(id)) => Ok(id),
            Ok(Err(e)) => Err(NotificationError::Bus(e.to_string())),
            Err(_) => Err(NotificationError::Bus(format!(
                "no reply within {:?}",
                self.call_timeout
            ))),
        }
    }
}

#[async_trait]
impl NotifierCapability for DbusNotifier {
    fn name(&self) -> &str {
        "linux-bus"
    }

    async fn send(&self, request: &NotificationRequest) -> Result<bool, NotificationError> {
        if let Some(audio) = request.audio() {
            let player = self
                .audio
                .as_ref()
                .ok_or_else(|| NotificationError::BinaryNotFound("aplay".to_string()))?;
            player.play_detached(audio, self.log.as_ref());
        }

        match self.call_notify(request).await {
            Ok(id) => {
                self.log.debug(&format!("Notification server assigned id {}", id));
                Ok(true)
            }
            Err(e) => {
                self.log.warn(&format!("Unable to notify over the session bus: {}", e));
                match &self.fallback {
                    Some(fallback) => {
                        self.log.info("Falling back to notify-send");
                        // audio was already started above
                        let mut retry = request.clone();
                        retry.clear_audio();
                        fallback.send(&retry).await
                    }
                    None => Ok(false),
                }
            }
        }
    }
}
