use std::time::Duration;

use chrono::{Days, NaiveDateTime, NaiveTime};

/// Reminders fire at 9:00 AM local time.
pub const REMINDER_HOUR: u32 = 9;

fn reminder_time() -> NaiveTime {
    NaiveTime::from_hms_opt(REMINDER_HOUR, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// The next 9:00 AM at or after `now`: today's if it has not passed yet,
/// otherwise tomorrow's. At exactly 9:00 AM the delay is zero.
pub fn next_reminder(now: NaiveDateTime) -> NaiveDateTime {
    let today = now.date().and_time(reminder_time());
    if now > today {
        today
            .checked_add_days(Days::new(1))
            .unwrap_or(today)
    } else {
        today
    }
}

/// Wall-clock delay from `now` until the next reminder.
pub fn delay_until_reminder(now: NaiveDateTime) -> Duration {
    (next_reminder(now) - now).to_std().unwrap_or(Duration::ZERO)
}
