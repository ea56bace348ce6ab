//! State machine tests for the TUI App.
//!
//! Each test builds an App over an in-memory store, a canned motivation
//! service, and a recording notifier, then simulates key events to test
//! mode transitions and permission handling.

use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::Duration;

use brightside_scheduler::{
    RecordingNotifier, ReminderEvent, ReminderScheduler, REMINDER_TITLE,
};
use brightside_service::{BlockingMotivationService, MotivationService, StaticMotivationService};
use brightside_store::{MemoryStore, StateStore, GOALS_KEY, REMINDER_TIMER_KEY};
use brightside_tui::app::{App, Mode, Permission};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn char_key(c: char) -> KeyEvent {
    key(KeyCode::Char(c))
}

struct Fixture {
    app: App,
    service: Arc<StaticMotivationService>,
    store: Arc<MemoryStore>,
    notifier: RecordingNotifier,
    reminder_tx: Sender<ReminderEvent>,
}

fn make_fixture_with(
    service: Arc<StaticMotivationService>,
    notifier: RecordingNotifier,
    store: Arc<MemoryStore>,
) -> Fixture {
    let blocking =
        BlockingMotivationService::new(service.clone() as Arc<dyn MotivationService>).unwrap();
    let (reminder_tx, reminder_rx) = std::sync::mpsc::channel();
    let scheduler = ReminderScheduler::new(
        store.clone(),
        Arc::new(notifier.clone()),
        reminder_tx.clone(),
    );
    let app = App::new(
        blocking,
        scheduler,
        store.clone(),
        Arc::new(notifier.clone()),
        reminder_rx,
    )
    .unwrap();
    Fixture {
        app,
        service,
        store,
        notifier,
        reminder_tx,
    }
}

fn make_fixture() -> Fixture {
    make_fixture_with(
        Arc::new(StaticMotivationService::new()),
        RecordingNotifier::new(),
        Arc::new(MemoryStore::new()),
    )
}

/// Pump `poll` until the in-flight fetch settles.
fn wait_for_fetch(app: &mut App) {
    for _ in 0..200 {
        app.poll();
        if !app.is_loading() {
            return;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    panic!("fetch did not complete in time");
}

fn read_store(store: &Arc<MemoryStore>, key: &str) -> Option<String> {
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(store.get(key)).unwrap()
}

// ---- Fetch lifecycle ----

#[test]
fn app_starts_loading_then_shows_record() {
    let mut f = make_fixture();
    assert!(f.app.is_loading());
    assert!(f.app.motivation().is_none());
    assert!(matches!(f.app.mode(), Mode::PermissionPrompt));

    wait_for_fetch(&mut f.app);
    let record = f.app.motivation().unwrap();
    assert_eq!(record.quote.author, "Mark Twain");
    assert!(f.app.error_message().is_none());
    assert_eq!(f.service.calls(), vec![String::new()]);
}

#[test]
fn canned_response_passes_through_unchanged() {
    let record = brightside_core::MotivationRecord {
        quote: brightside_core::Quote {
            text: "Go.".into(),
            author: "Anon".into(),
        },
        thought: "You can.".into(),
        tip: "Stretch first.".into(),
    };
    let mut f = make_fixture_with(
        Arc::new(StaticMotivationService::with_record(record.clone())),
        RecordingNotifier::new(),
        Arc::new(MemoryStore::new()),
    );
    wait_for_fetch(&mut f.app);

    assert_eq!(f.app.motivation(), Some(&record));
    assert!(f.app.error_message().is_none());
    assert!(!f.app.is_loading());
}

#[test]
fn failed_fetch_shows_generic_error() {
    let mut f = make_fixture_with(
        Arc::new(StaticMotivationService::failing()),
        RecordingNotifier::new(),
        Arc::new(MemoryStore::new()),
    );
    f.app.handle_key(key(KeyCode::Esc)); // dismiss reminder prompt
    wait_for_fetch(&mut f.app);

    assert!(f.app.motivation().is_none());
    assert_eq!(
        f.app.error_message(),
        Some("Could not get a motivational message from the AI. Please try again.")
    );
    assert!(matches!(f.app.mode(), Mode::Normal));
}

#[test]
fn refresh_key_fetches_again() {
    let mut f = make_fixture();
    wait_for_fetch(&mut f.app);
    f.app.handle_key(key(KeyCode::Esc)); // dismiss reminder prompt

    f.app.handle_key(char_key('r'));
    assert!(f.app.is_loading());
    wait_for_fetch(&mut f.app);
    assert_eq!(f.service.calls().len(), 2);
}

// ---- Reminder permission flow ----

#[test]
fn startup_offers_reminder_prompt_once() {
    let mut f = make_fixture();
    assert!(matches!(f.app.mode(), Mode::PermissionPrompt));
    assert_eq!(f.app.permission(), Permission::Default);

    // Dismissing it does not bring it back on later fetches.
    f.app.handle_key(key(KeyCode::Esc));
    wait_for_fetch(&mut f.app);
    assert!(matches!(f.app.mode(), Mode::Normal));
}

#[test]
fn accepting_reminder_arms_scheduler() {
    let mut f = make_fixture();
    wait_for_fetch(&mut f.app);
    assert!(matches!(f.app.mode(), Mode::PermissionPrompt));

    f.app.handle_key(char_key('y'));
    assert!(matches!(f.app.mode(), Mode::Normal));
    assert_eq!(f.app.permission(), Permission::Granted);
    assert!(f.app.reminder_armed());
    assert!(read_store(&f.store, REMINDER_TIMER_KEY).is_some());
    assert_eq!(
        f.app.status_message(),
        Some("Daily reminder set for 9:00 AM")
    );
}

#[test]
fn declining_prompt_suppresses_reprompt() {
    let mut f = make_fixture();
    wait_for_fetch(&mut f.app);
    f.app.handle_key(char_key('n'));
    assert_eq!(f.app.permission(), Permission::Denied);
    assert!(!f.app.reminder_armed());

    // A later successful fetch does not re-open the prompt.
    f.app.handle_key(char_key('r'));
    wait_for_fetch(&mut f.app);
    assert!(matches!(f.app.mode(), Mode::Normal));

    // Asking explicitly just explains the state.
    f.app.handle_key(char_key('n'));
    assert!(matches!(f.app.mode(), Mode::Normal));
    assert_eq!(
        f.app.status_message(),
        Some("Notifications were declined this session")
    );
}

#[test]
fn incapable_system_alerts_instead_of_arming() {
    let mut f = make_fixture_with(
        Arc::new(StaticMotivationService::new()),
        RecordingNotifier::incapable(),
        Arc::new(MemoryStore::new()),
    );
    wait_for_fetch(&mut f.app);
    f.app.handle_key(char_key('y'));

    assert!(matches!(f.app.mode(), Mode::Normal));
    assert_eq!(f.app.permission(), Permission::Default);
    assert!(!f.app.reminder_armed());
    assert_eq!(
        f.app.status_message(),
        Some("This system does not support desktop notifications")
    );
    assert_eq!(f.notifier.fired(), 0);
}

#[test]
fn fired_reminder_sets_status_and_refetches() {
    let mut f = make_fixture();
    wait_for_fetch(&mut f.app);
    f.app.handle_key(key(KeyCode::Esc));

    f.reminder_tx.send(ReminderEvent::Fired).unwrap();
    f.app.poll();
    assert_eq!(f.app.status_message(), Some(REMINDER_TITLE));
    assert!(f.app.is_loading());
    wait_for_fetch(&mut f.app);
    assert_eq!(f.service.calls().len(), 2);
}

// ---- Goal editing ----

#[test]
fn edit_goals_saves_and_refetches() {
    let mut f = make_fixture();
    wait_for_fetch(&mut f.app);
    f.app.handle_key(key(KeyCode::Esc));

    f.app.handle_key(char_key('g'));
    assert!(matches!(f.app.mode(), Mode::EditGoals { .. }));
    assert!(f.app.is_input_mode());

    for c in "run 5kk".chars() {
        f.app.handle_key(char_key(c));
    }
    f.app.handle_key(key(KeyCode::Backspace));
    f.app.handle_key(key(KeyCode::Enter));

    assert!(matches!(f.app.mode(), Mode::Normal));
    assert_eq!(f.app.goals(), "run 5k");
    assert_eq!(read_store(&f.store, GOALS_KEY).as_deref(), Some("run 5k"));

    wait_for_fetch(&mut f.app);
    assert_eq!(f.service.calls().last().map(String::as_str), Some("run 5k"));
}

#[test]
fn esc_cancels_goal_editing() {
    let mut f = make_fixture();
    wait_for_fetch(&mut f.app);
    f.app.handle_key(key(KeyCode::Esc));

    f.app.handle_key(char_key('g'));
    for c in "abandon".chars() {
        f.app.handle_key(char_key(c));
    }
    f.app.handle_key(key(KeyCode::Esc));

    assert!(matches!(f.app.mode(), Mode::Normal));
    assert_eq!(f.app.goals(), "");
    assert!(read_store(&f.store, GOALS_KEY).is_none());
    // No refetch on cancel.
    assert_eq!(f.service.calls().len(), 1);
}

#[test]
fn goals_load_from_store_on_startup() {
    let store = Arc::new(MemoryStore::new());
    {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(store.set(GOALS_KEY, "learn Rust")).unwrap();
    }
    let mut f = make_fixture_with(
        Arc::new(StaticMotivationService::new()),
        RecordingNotifier::new(),
        store,
    );

    assert_eq!(f.app.goals(), "learn Rust");
    wait_for_fetch(&mut f.app);
    assert_eq!(f.service.calls(), vec!["learn Rust".to_string()]);
}
