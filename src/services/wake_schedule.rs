use chrono::{Duration, NaiveDateTime, NaiveTime};

use crate::models::WakeWindow;

/// Seconds the frame should sleep before its next wake-up.
///
/// Inside the window the frame wakes every `interval_secs`. Outside it,
/// the frame sleeps until the window opens again: later today when it is
/// still early, otherwise tomorrow.
pub fn wake_interval(now: NaiveDateTime, window: &WakeWindow) -> u64 {
    let start = hour(window.start_hour);
    let time = now.time();
    let before_end = window.end_hour >= 24 || time < hour(window.end_hour);

    if start <= time && before_end {
        return window.interval_secs;
    }

    let today_start = now.date().and_time(start);
    let next_start = if time < start {
        today_start
    } else {
        today_start + Duration::days(1)
    };
    (next_start - now).num_seconds().max(0) as u64
}

fn hour(h: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h.min(23), 0, 0).unwrap_or(NaiveTime::MIN)
}
