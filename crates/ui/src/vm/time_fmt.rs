use chrono::Duration;

/// Countdown badge text, e.g. `⏱ 42s`.
#[must_use]
pub fn format_countdown(remaining_secs: u32) -> String {
    format!("⏱ {remaining_secs}s")
}

/// Elapsed time as `m:ss`; negative spans clamp to zero.
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.num_seconds().max(0);
    let minutes = total / 60;
    let seconds = total % 60;
    format!("{minutes}:{seconds:02}")
}
