//! Library-level delivery tests driven through a recording notifier

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use notify_dispatch::domain::error::ResourceError;
use notify_dispatch::{
    NotificationError, NotificationRequest, NotifierCapability, Notify, NotifyError, Urgency,
};

/// Records every request; answers with a fixed outcome
struct Recorder {
    outcome: Result<bool, NotificationError>,
    delay: Duration,
    sent: Mutex<Vec<NotificationRequest>>,
}

impl Recorder {
    fn answering(outcome: Result<bool, NotificationError>) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            delay: Duration::ZERO,
            sent: Mutex::new(Vec::new()),
        })
    }

    fn slow(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(true),
            delay,
            sent: Mutex::new(Vec::new()),
        })
    }

    fn sent(&self) -> Vec<NotificationRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotifierCapability for Recorder {
    fn name(&self) -> &str {
        "recorder"
    }

    async fn send(&self, request: &NotificationRequest) -> Result<bool, NotificationError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.sent.lock().unwrap().push(request.clone());
        self.outcome.clone()
    }
}

fn notify_with(recorder: Arc<Recorder>) -> Notify {
    Notify::builder()
        .custom_notifier(recorder)
        .resource_root("/nonexistent/notify-dispatch-resources")
        .build()
        .unwrap()
}

#[tokio::test]
async fn empty_text_is_sent_as_a_space() {
    let recorder = Recorder::answering(Ok(true));
    let mut notify = notify_with(recorder.clone());
    notify.set_title("");
    notify.set_message("");
    notify.set_application_name("Test");

    assert!(notify.send().await.unwrap());
    let sent = recorder.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].title(), " ");
    assert_eq!(sent[0].message(), " ");
}

#[tokio::test]
async fn sending_twice_delivers_twice() {
    let recorder = Recorder::answering(Ok(true));
    let notify = notify_with(recorder.clone());

    assert!(notify.send().await.unwrap());
    assert!(notify.send().await.unwrap());

    let sent = recorder.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0], sent[1]);
}

#[tokio::test]
async fn async_send_matches_blocking_send() {
    let recorder = Recorder::answering(Ok(false));
    let notify = notify_with(recorder.clone());

    let blocking = notify.send().await.unwrap();
    let handle = notify.send_async();
    let waited = handle.wait().await.unwrap();

    assert_eq!(blocking, waited);
    assert!(!waited);
    assert_eq!(recorder.sent().len(), 2);
}

#[tokio::test]
async fn strategy_error_becomes_notification_failure() {
    let recorder = Recorder::answering(Err(NotificationError::Bus("no server".into())));
    let notify = notify_with(recorder);

    let err = notify.send().await.unwrap_err();
    assert_eq!(
        err,
        NotifyError::NotificationFailure(NotificationError::Bus("no server".into()))
    );
}

#[tokio::test]
async fn timeout_reports_false_while_delivery_continues() {
    let recorder = Recorder::slow(Duration::from_millis(300));
    let mut notify = notify_with(recorder.clone());
    notify.set_timeout(Duration::from_millis(20));

    assert!(!notify.send().await.unwrap());

    // the abandoned delivery still completes in the background
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(recorder.sent().len(), 1);
}

#[tokio::test]
async fn handle_wait_timeout_gives_up_without_error() {
    let recorder = Recorder::slow(Duration::from_millis(300));
    let notify = notify_with(recorder);

    let handle = notify.send_async();
    assert!(!handle.is_finished());
    assert!(!handle.wait_timeout(Duration::from_millis(10)).await.unwrap());
}

#[tokio::test]
async fn invalid_audio_keeps_previous_value() {
    let dir = tempfile::tempdir().unwrap();
    let wav = dir.path().join("chime.wav");
    std::fs::write(&wav, b"RIFF").unwrap();

    let recorder = Recorder::answering(Ok(true));
    let mut notify = notify_with(recorder.clone());
    notify.set_audio(&wav).unwrap();

    let err = notify.set_audio(dir.path().join("chime.mp3")).unwrap_err();
    assert!(matches!(
        err,
        NotifyError::Resource(ResourceError::InvalidAudioFormat { .. })
    ));
    let err = notify.set_audio(dir.path().join("missing.wav")).unwrap_err();
    assert!(matches!(
        err,
        NotifyError::Resource(ResourceError::InvalidAudioPath { .. })
    ));

    assert!(notify.send().await.unwrap());
    let sent = recorder.sent();
    assert_eq!(sent[0].audio().map(|a| a.path()), Some(wav.as_path()));
}

#[test]
fn missing_icon_fails_before_any_send() {
    let recorder = Recorder::answering(Ok(true));
    let err = Notify::builder()
        .custom_notifier(recorder.clone())
        .icon("missing.png")
        .build()
        .err()
        .unwrap();

    assert!(matches!(
        err,
        NotifyError::Resource(ResourceError::InvalidIconPath { .. })
    ));
    assert!(recorder.sent().is_empty());
}

#[tokio::test]
async fn hostile_text_reaches_the_strategy_verbatim() {
    let recorder = Recorder::answering(Ok(true));
    let mut notify = notify_with(recorder.clone());
    let title = "\"\"\"\"\"; \"\"\" ;;# ##>>> <<>>< </>";
    let message = "مرحبا بالعالم 🐐 $(whoami) `id` 'quoted'";
    notify.set_title(title);
    notify.set_message(message);
    notify.set_urgency(Urgency::Critical);

    assert!(notify.send().await.unwrap());
    let sent = recorder.sent();
    assert_eq!(sent[0].title(), title);
    assert_eq!(sent[0].message(), message);
    assert_eq!(sent[0].urgency(), Urgency::Critical);
}

#[test]
fn nameless_custom_notifier_is_rejected() {
    struct Nameless(AtomicUsize);

    #[async_trait]
    impl NotifierCapability for Nameless {
        fn name(&self) -> &str {
            ""
        }

        async fn send(&self, _request: &NotificationRequest) -> Result<bool, NotificationError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(true)
        }
    }

    let err = Notify::builder()
        .custom_notifier(Arc::new(Nameless(AtomicUsize::new(0))))
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, NotifyError::InvalidArgument(_)));
}
