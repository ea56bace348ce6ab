pub mod clock;
pub mod notifier;

pub use notifier::{DesktopNotifier, Notifier, NotifyError, RecordingNotifier};
pub use notifier::{REMINDER_BODY, REMINDER_TAG, REMINDER_TITLE};

use std::sync::mpsc::Sender;
use std::sync::Arc;

use brightside_store::{StateStore, StoreError, REMINDER_TIMER_KEY};
use chrono::{Local, NaiveDateTime};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Emitted to the UI thread when the reminder fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderEvent {
    Fired,
}

type NowFn = fn() -> NaiveDateTime;

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

struct ArmedReminder {
    id: Uuid,
    cancel: watch::Sender<bool>,
    task: JoinHandle<()>,
}

/// Owns the single daily-reminder timer.
///
/// `schedule_next` cancels any live timer before arming a new one, so at
/// most one reminder loop exists per scheduler. The armed timer's handle is
/// persisted so a later session can see that a reminder was left standing.
pub struct ReminderScheduler {
    store: Arc<dyn StateStore>,
    notifier: Arc<dyn Notifier>,
    events: Sender<ReminderEvent>,
    now: NowFn,
    active: Option<ArmedReminder>,
}

impl ReminderScheduler {
    pub fn new(
        store: Arc<dyn StateStore>,
        notifier: Arc<dyn Notifier>,
        events: Sender<ReminderEvent>,
    ) -> Self {
        Self::with_clock(store, notifier, events, local_now)
    }

    /// Inject a clock. Tests freeze it so reminder delays are exact.
    pub fn with_clock(
        store: Arc<dyn StateStore>,
        notifier: Arc<dyn Notifier>,
        events: Sender<ReminderEvent>,
        now: NowFn,
    ) -> Self {
        Self {
            store,
            notifier,
            events,
            now,
            active: None,
        }
    }

    /// Handle left behind by a previous session, if any.
    pub async fn stored_handle(&self) -> Result<Option<Uuid>, ScheduleError> {
        let Some(raw) = self.store.get(REMINDER_TIMER_KEY).await? else {
            return Ok(None);
        };
        match raw.parse::<Uuid>() {
            Ok(id) => Ok(Some(id)),
            Err(e) => {
                tracing::warn!(%raw, error = %e, "discarding unparseable reminder handle");
                Ok(None)
            }
        }
    }

    /// Arm the reminder loop: wait until the next 9:00 AM, notify, repeat.
    /// Any previously armed timer is cancelled first.
    pub async fn schedule_next(&mut self) -> Result<Uuid, ScheduleError> {
        self.disarm();

        let id = Uuid::new_v4();
        self.store.set(REMINDER_TIMER_KEY, &id.to_string()).await?;

        let (cancel, mut cancelled) = watch::channel(false);
        let store = Arc::clone(&self.store);
        let notifier = Arc::clone(&self.notifier);
        let events = self.events.clone();
        let now = self.now;

        let task = tokio::spawn(async move {
            loop {
                let delay = clock::delay_until_reminder(now());
                tracing::info!(delay_secs = delay.as_secs(), "reminder armed");
                tokio::select! {
                    _ = tokio::time::sleep(delay) => {
                        if let Err(e) = notifier.notify() {
                            tracing::warn!(error = %e, "reminder notification failed");
                        }
                        if events.send(ReminderEvent::Fired).is_err() {
                            tracing::debug!("reminder listener gone, stopping loop");
                            return;
                        }
                        // Fresh handle for the re-armed timer.
                        let next = Uuid::new_v4();
                        if let Err(e) = store.set(REMINDER_TIMER_KEY, &next.to_string()).await {
                            tracing::warn!(error = %e, "failed to persist reminder handle");
                        }
                    }
                    _ = cancelled.changed() => {
                        tracing::debug!("reminder cancelled");
                        return;
                    }
                }
            }
        });

        self.active = Some(ArmedReminder { id, cancel, task });
        Ok(id)
    }

    /// Stop the live timer, if any. The persisted handle is left in place;
    /// it only marks that a reminder was once armed.
    pub fn cancel(&mut self) {
        self.disarm();
    }

    pub fn is_armed(&self) -> bool {
        self.active.is_some()
    }

    pub fn armed_id(&self) -> Option<Uuid> {
        self.active.as_ref().map(|a| a.id)
    }

    fn disarm(&mut self) {
        if let Some(armed) = self.active.take() {
            let _ = armed.cancel.send(true);
            armed.task.abort();
        }
    }
}

impl Drop for ReminderScheduler {
    fn drop(&mut self) {
        self.disarm();
    }
}
