use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const REMINDER_TITLE: &str = "Your Daily Motivation is Ready!";
pub const REMINDER_BODY: &str = "Let's start the day with a positive boost. Click here!";
/// Stack tag so a missed reminder replaces the previous one instead of
/// piling up in the notification tray.
pub const REMINDER_TAG: &str = "daily-motivation";

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification failed: {0}")]
    Backend(String),
}

/// Abstraction over the desktop notification surface.
pub trait Notifier: Send + Sync {
    /// Whether notifications can be delivered at all on this system.
    fn probe(&self) -> bool;

    /// Show the daily reminder notification.
    fn notify(&self) -> Result<(), NotifyError>;
}

/// Real desktop notifications via the platform notification daemon.
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn probe(&self) -> bool {
        #[cfg(target_os = "linux")]
        {
            notify_rust::get_capabilities().is_ok()
        }
        #[cfg(not(target_os = "linux"))]
        {
            true
        }
    }

    fn notify(&self) -> Result<(), NotifyError> {
        let mut notification = notify_rust::Notification::new();
        notification
            .appname("brightside")
            .summary(REMINDER_TITLE)
            .body(REMINDER_BODY);
        #[cfg(target_os = "linux")]
        {
            use notify_rust::{Hint, Timeout, Urgency};
            notification
                .hint(Hint::Urgency(Urgency::Normal))
                .hint(Hint::Custom(
                    "x-dunst-stack-tag".to_string(),
                    REMINDER_TAG.to_string(),
                ))
                .timeout(Timeout::Milliseconds(10_000));
        }
        notification
            .show()
            .map(|_| ())
            .map_err(|e| NotifyError::Backend(e.to_string()))
    }
}

/// Test notifier that counts deliveries instead of showing anything.
#[derive(Clone)]
pub struct RecordingNotifier {
    capable: bool,
    fired: Arc<AtomicUsize>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            capable: true,
            fired: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn incapable() -> Self {
        Self {
            capable: false,
            ..Self::new()
        }
    }

    pub fn fired(&self) -> usize {
        self.fired.load(Ordering::SeqCst)
    }
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for RecordingNotifier {
    fn probe(&self) -> bool {
        self.capable
    }

    fn notify(&self) -> Result<(), NotifyError> {
        self.fired.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
