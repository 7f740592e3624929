//! Time accounting helpers.
//!
//! Pure functions over integer seconds. Parsing is deliberately permissive:
//! a missing or non-numeric component of an `HH:MM:SS` field counts as
//! zero, so a partial or garbled timer field degrades to 0 instead of
//! erroring.

use crate::task::Task;

/// Format seconds as `HH:MM:SS`.
pub fn encode_hms(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Parse `HH:MM:SS` into seconds. Any missing or non-numeric component is
/// treated as zero.
pub fn decode_hms(text: &str) -> u64 {
    let mut parts = text.split(':');
    let hours = component(parts.next());
    let minutes = component(parts.next());
    let seconds = component(parts.next());
    hours * 3600 + minutes * 60 + seconds
}

fn component(part: Option<&str>) -> u64 {
    part.and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(0)
}

/// Whether a task finished within its estimate. Only meaningful for
/// completed tasks, where `elapsed_time` is frozen.
pub fn is_on_time(task: &Task) -> bool {
    task.elapsed_time <= task.estimated_time
}

/// Free-form display duration: hours+minutes when hours > 0,
/// minutes+seconds when minutes > 0, else seconds. Display only; nothing
/// else depends on this shape.
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}
